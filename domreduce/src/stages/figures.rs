//! figures-to-text: `<figure>` → `![caption](src)` in `<pre data-figure="1">`

use crate::dom::Document;
use crate::stage::Stage;
use crate::stages::replace_with_text_block;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct FiguresToText;

impl Stage for FiguresToText {
    fn name(&self) -> &str {
        "figures-to-text"
    }

    fn description(&self) -> &str {
        "Replace <figure> elements with an image reference line"
    }

    fn aliases(&self) -> &[&str] {
        &["preserve_figures_as_markdown"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut converted = 0;
        for figure in doc.elements_by_tag(&["figure"]) {
            if !doc.is_attached(figure) {
                continue;
            }
            let Some(&img) = doc.descendants_by_tag(figure, &["img"]).first() else {
                continue;
            };
            let src = doc.attr(img, "src").unwrap_or("").trim().to_string();
            let alt = doc.attr(img, "alt").unwrap_or("").trim().to_string();
            let caption = doc
                .descendants_by_tag(figure, &["figcaption"])
                .first()
                .map(|cap| doc.stripped_text(*cap, " "))
                .filter(|text| !text.is_empty())
                .unwrap_or(alt);

            replace_with_text_block(doc, figure, "data-figure", &format!("![{caption}]({src})"));
            converted += 1;
        }
        debug!(converted, "converted figures to text");
    }
}
