//! minify-whitespace: squeeze text whitespace outside preformatted content

use crate::dom::{text, Document, NodeData};
use crate::stage::Stage;
use tracing::debug;

/// Text under these keeps its whitespace verbatim
pub const PRESERVE_TAGS: &[&str] = &["pre", "textarea", "script", "style"];

/// Containers where whitespace-only text never renders
pub const STRUCTURAL_CONTAINERS: &[&str] = &[
    "html", "head", "table", "thead", "tbody", "tfoot", "tr", "ul", "ol", "dl", "select",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct MinifyWhitespace;

impl Stage for MinifyWhitespace {
    fn name(&self) -> &str {
        "minify-whitespace"
    }

    fn description(&self) -> &str {
        "Collapse whitespace runs in text and drop blank text between structural tags"
    }

    fn aliases(&self) -> &[&str] {
        &["minify_whitespace"]
    }

    fn apply(&self, doc: &mut Document) {
        let merged = doc.merge_adjacent_text();
        let mut dropped = 0;
        let mut squeezed = 0;
        for id in doc.descendants(doc.root()) {
            let Some(content) = doc.data(id).as_text() else {
                continue;
            };
            if doc.ancestors(id).any(|a| doc.has_tag(a, PRESERVE_TAGS)) {
                continue;
            }
            let in_structural = doc
                .parent(id)
                .is_some_and(|parent| doc.has_tag(parent, STRUCTURAL_CONTAINERS));
            if in_structural && text::is_blank(content) {
                doc.detach(id);
                dropped += 1;
                continue;
            }
            let minified = text::squeeze_whitespace(content);
            if minified != content {
                *doc.data_mut(id) = NodeData::Text(minified);
                squeezed += 1;
            }
        }
        debug!(merged, dropped, squeezed, "minified whitespace");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::stages::test_support::{apply_to_body, assert_idempotent};
    use crate::stages::StripClutter;

    #[test]
    fn squeezes_text_runs() {
        let out = apply_to_body(
            &MinifyWhitespace,
            "<body><p>  a \n\n  b  </p>\n\n<div>\t</div></body>",
        );
        assert_eq!(out, "<p> a b </p> <div> </div>");
    }

    #[test]
    fn preformatted_text_is_untouched() {
        let out = apply_to_body(
            &MinifyWhitespace,
            "<body><pre>a\n  b</pre><textarea>x  y</textarea></body>",
        );
        assert_eq!(out, "<pre>a\n  b</pre><textarea>x  y</textarea>");
    }

    #[test]
    fn blank_text_between_rows_and_items_is_dropped() {
        let out = apply_to_body(
            &MinifyWhitespace,
            "<body><ul>\n  <li>a</li>\n  <li>b</li>\n</ul><table>\n<tr>\n<td> x </td>\n</tr>\n</table></body>",
        );
        assert_eq!(
            out,
            "<ul><li>a</li><li>b</li></ul><table><tbody><tr><td> x </td></tr></tbody></table>"
        );
    }

    #[test]
    fn text_left_adjacent_by_a_removal_is_merged() {
        let mut doc = parse_html("<p>a <!-- note --> b</p>");
        StripClutter.apply(&mut doc);
        MinifyWhitespace.apply(&mut doc);
        let p = doc.elements_by_tag(&["p"])[0];
        assert_eq!(doc.children(p).len(), 1);
        assert_eq!(doc.text_content(p), "a b");
    }

    #[test]
    fn is_idempotent() {
        assert_idempotent(
            &MinifyWhitespace,
            "<html>\n<head>\n<title> t </title>\n</head>\n<body>\n<p> a  b </p>\n</body>\n</html>",
        );
    }
}
