//! strip-clutter: comments and tags that never take part in layout

use crate::dom::{Document, NodeData};
use crate::stage::Stage;
use tracing::debug;

/// Executable content, style sheets, frames, metadata and resource links
pub const CLUTTER_TAGS: &[&str] = &["script", "noscript", "style", "iframe", "meta", "link"];

#[derive(Debug, Clone, Copy, Default)]
pub struct StripClutter;

impl Stage for StripClutter {
    fn name(&self) -> &str {
        "strip-clutter"
    }

    fn description(&self) -> &str {
        "Remove comments and script/style/iframe/meta/link elements"
    }

    fn aliases(&self) -> &[&str] {
        &["strip_out_non_structural_nodes"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut comments = 0;
        let mut elements = 0;
        for id in doc.descendants(doc.root()) {
            if !doc.is_attached(id) {
                continue;
            }
            match doc.data(id) {
                NodeData::Comment(_) => comments += 1,
                NodeData::Element(el) if el.is_any(CLUTTER_TAGS) => elements += 1,
                _ => continue,
            }
            doc.detach(id);
        }
        debug!(comments, elements, "stripped clutter");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::test_support::{apply_to_body, assert_idempotent};
    use crate::dom::parse_html;

    #[test]
    fn removes_comments_and_clutter_tags() {
        let out = apply_to_body(
            &StripClutter,
            "<body><!-- c --><script>var x = 1;</script><p>keep</p><iframe src='x'></iframe><noscript>n</noscript></body>",
        );
        assert_eq!(out, "<p>keep</p>");
    }

    #[test]
    fn removes_head_metadata() {
        let mut doc = parse_html(
            "<html><head><meta charset='utf-8'><link rel='stylesheet' href='a.css'><style>p{}</style><title>T</title></head><body></body></html>",
        );
        StripClutter.apply(&mut doc);
        assert_eq!(
            doc.to_html().unwrap(),
            "<html><head><title>T</title></head><body></body></html>"
        );
    }

    #[test]
    fn removes_nested_comments() {
        let mut doc = parse_html("<body><div><!-- a --><p><!-- b -->x</p></div></body>");
        StripClutter.apply(&mut doc);
        assert!(!doc.to_html().unwrap().contains("<!--"));
    }

    #[test]
    fn is_idempotent() {
        assert_idempotent(
            &StripClutter,
            "<body><style>a{}</style><!--x--><div>t<script></script></div></body>",
        );
    }
}
