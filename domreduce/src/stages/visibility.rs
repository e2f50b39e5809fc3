//! strip-non-visual: explicitly hidden leaves and empty inline wrappers

use crate::dom::{style, Document, Element, NodeId};
use crate::stage::Stage;
use tracing::debug;

/// Inline decorative tags dropped once they have no content at all
pub const EMPTY_INLINE_TAGS: &[&str] = &["span", "b", "i", "u"];

#[derive(Debug, Clone, Copy, Default)]
pub struct StripNonVisual;

/// `hidden`, `aria-hidden="true"` or an inline `display: none`
pub fn is_hidden(el: &Element) -> bool {
    el.has_attr("hidden")
        || el
            .attr("aria-hidden")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
        || el.attr("style").is_some_and(style::is_display_none)
}

impl StripNonVisual {
    /// Remove hidden elements that have no element children.
    ///
    /// Candidates are visited deepest-first so a hidden container whose hidden
    /// children all go away in this pass is itself reconsidered as a leaf.
    fn remove_hidden_leaves(doc: &mut Document) -> usize {
        let candidates: Vec<NodeId> = doc
            .elements()
            .into_iter()
            .filter(|id| doc.element(*id).is_some_and(is_hidden))
            .collect();

        let mut removed = 0;
        for id in candidates.into_iter().rev() {
            if doc.first_element_child(id).is_none() && doc.is_attached(id) {
                doc.detach(id);
                removed += 1;
            }
        }
        removed
    }

    fn remove_empty_inline(doc: &mut Document) -> usize {
        let candidates = doc.elements_by_tag(EMPTY_INLINE_TAGS);
        let mut removed = 0;
        for id in candidates.into_iter().rev() {
            if doc.children(id).is_empty() && doc.is_attached(id) {
                doc.detach(id);
                removed += 1;
            }
        }
        removed
    }
}

impl Stage for StripNonVisual {
    fn name(&self) -> &str {
        "strip-non-visual"
    }

    fn description(&self) -> &str {
        "Remove hidden leaf elements and empty span/b/i/u wrappers"
    }

    fn aliases(&self) -> &[&str] {
        &["strip_out_non_visual_nodes"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut hidden = 0;
        let mut empty = 0;
        loop {
            let h = Self::remove_hidden_leaves(doc);
            let e = Self::remove_empty_inline(doc);
            hidden += h;
            empty += e;
            if h + e == 0 {
                break;
            }
        }
        debug!(hidden, empty, "stripped non-visual nodes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::test_support::{apply_to_body, assert_idempotent};

    #[test]
    fn hidden_leaf_is_removed() {
        let out = apply_to_body(
            &StripNonVisual,
            "<body><p style=\"display:none\">gone</p><p>kept</p></body>",
        );
        assert_eq!(out, "<p>kept</p>");
    }

    #[test]
    fn hidden_container_with_visible_child_is_kept() {
        let out = apply_to_body(
            &StripNonVisual,
            "<body><div style=\"DISPLAY : None\"><p>inner</p></div></body>",
        );
        assert_eq!(out, "<div style=\"DISPLAY : None\"><p>inner</p></div>");
    }

    #[test]
    fn all_hidden_markers_are_recognized() {
        let out = apply_to_body(
            &StripNonVisual,
            "<body><p hidden>a</p><p aria-hidden=\"true\">b</p><p aria-hidden=\"false\">c</p><p style=\"color:red; display: none !important\">d</p></body>",
        );
        assert_eq!(out, "<p aria-hidden=\"false\">c</p>");
    }

    #[test]
    fn display_other_than_none_is_visible() {
        let out = apply_to_body(
            &StripNonVisual,
            "<body><p style=\"display:none; display:block\">x</p></body>",
        );
        assert!(out.contains(">x</p>"));
    }

    #[test]
    fn hidden_container_of_hidden_leaves_goes_too() {
        let out = apply_to_body(
            &StripNonVisual,
            "<body><div hidden><span hidden>a</span><span hidden>b</span></div><p>x</p></body>",
        );
        assert_eq!(out, "<p>x</p>");
    }

    #[test]
    fn empty_inline_wrappers_are_removed() {
        let out = apply_to_body(
            &StripNonVisual,
            "<body><p>a<span></span><b><i></i></b><u> </u></p></body>",
        );
        // `<u> </u>` still has a text child
        assert_eq!(out, "<p>a<u> </u></p>");
    }

    #[test]
    fn empty_non_inline_elements_are_kept() {
        let out = apply_to_body(&StripNonVisual, "<body><div></div><p></p></body>");
        assert_eq!(out, "<div></div><p></p>");
    }

    #[test]
    fn is_idempotent() {
        assert_idempotent(
            &StripNonVisual,
            "<body><div hidden><p hidden>x</p><p>y</p></div><b><span></span></b><i>t</i></body>",
        );
    }
}
