//! lists-to-text: `<ul>`/`<ol>` → indented bullets in `<pre data-list="1">`

use crate::dom::{text, Document, NodeId};
use crate::stage::Stage;
use crate::stages::replace_with_text_block;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListsToText;

/// Render the items of `list` at `depth`.
///
/// Only the direct text of an item is captured on its line; `ul`/`ol` children of the
/// item follow as their own block, one level deeper.
fn render_list(doc: &Document, list: NodeId, depth: usize, lines: &mut Vec<String>) {
    let ordered = doc.has_tag(list, &["ol"]);
    let items: Vec<NodeId> = doc
        .element_children(list)
        .filter(|child| doc.has_tag(*child, &["li"]))
        .collect();

    for (index, item) in items.into_iter().enumerate() {
        let marker = if ordered {
            format!("{}. ", index + 1)
        } else {
            "- ".to_string()
        };
        let content = text::collapse_whitespace(&doc.direct_text(item));
        lines.push(format!("{}{marker}{content}", "  ".repeat(depth)));

        let nested: Vec<NodeId> = doc
            .element_children(item)
            .filter(|child| doc.has_tag(*child, &["ul", "ol"]))
            .collect();
        for sublist in nested {
            render_list(doc, sublist, depth + 1, lines);
        }
    }
}

impl Stage for ListsToText {
    fn name(&self) -> &str {
        "lists-to-text"
    }

    fn description(&self) -> &str {
        "Replace <ul>/<ol> elements with indented text bullets"
    }

    fn aliases(&self) -> &[&str] {
        &["preserve_lists_as_markdown"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut converted = 0;
        for list in doc.elements_by_tag(&["ul", "ol"]) {
            if !doc.is_attached(list) {
                continue;
            }
            let mut lines = Vec::new();
            render_list(doc, list, 0, &mut lines);
            if lines.is_empty() {
                continue;
            }
            replace_with_text_block(doc, list, "data-list", &lines.join("\n"));
            converted += 1;
        }
        debug!(converted, "converted lists to text");
    }
}
