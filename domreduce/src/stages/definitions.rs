//! definition-lists-to-text: `<dl>` → term / `:  definition` lines in `<pre data-dl="1">`

use crate::dom::Document;
use crate::stage::Stage;
use crate::stages::replace_with_text_block;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct DefinitionListsToText;

impl Stage for DefinitionListsToText {
    fn name(&self) -> &str {
        "definition-lists-to-text"
    }

    fn description(&self) -> &str {
        "Replace <dl> elements with term/definition text lines"
    }

    fn aliases(&self) -> &[&str] {
        &["preserve_deflists_as_markdown"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut converted = 0;
        for dl in doc.elements_by_tag(&["dl"]) {
            if !doc.is_attached(dl) {
                continue;
            }
            let lines: Vec<String> = doc
                .element_children(dl)
                .filter_map(|child| match doc.tag_name(child) {
                    Some("dt") => Some(format!("{}  ", doc.normalized_text(child))),
                    Some("dd") => Some(format!(":  {}  ", doc.normalized_text(child))),
                    _ => None,
                })
                .collect();
            if lines.is_empty() {
                continue;
            }
            let text = lines.join("\n");
            replace_with_text_block(doc, dl, "data-dl", text.trim_end());
            converted += 1;
        }
        debug!(converted, "converted definition lists to text");
    }
}
