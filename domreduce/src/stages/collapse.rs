//! collapse-nesting: unwrap chains of attribute-less single-child wrappers
//!
//! `<div><div><section><p>x</p></section></div></div>` becomes `<p>x</p>`.

use crate::dom::{text, Document, NodeData, NodeId};
use crate::stage::Stage;
use tracing::debug;

/// Purely structural containers eligible for unwrapping
pub const COLLAPSIBLE_TAGS: &[&str] = &["div", "section", "article", "span"];

#[derive(Debug, Clone, Copy, Default)]
pub struct CollapseNesting;

/// The only element child of `id`, if `id` is a bare wrapper around it.
///
/// Non-whitespace text next to the child blocks the collapse.
fn sole_child(doc: &Document, id: NodeId) -> Option<NodeId> {
    let el = doc.element(id)?;
    if !el.is_any(COLLAPSIBLE_TAGS) || !el.attrs.is_empty() {
        return None;
    }
    let mut only = None;
    for child in doc.children(id) {
        match doc.data(*child) {
            NodeData::Element(_) => {
                if only.is_some() {
                    return None;
                }
                only = Some(*child);
            }
            NodeData::Text(t) if !text::is_blank(t) => return None,
            _ => {}
        }
    }
    only
}

impl Stage for CollapseNesting {
    fn name(&self) -> &str {
        "collapse-nesting"
    }

    fn description(&self) -> &str {
        "Unwrap attribute-less div/section/article/span wrappers around a single element"
    }

    fn aliases(&self) -> &[&str] {
        &["collapse_deeply_nested_container_with_one_child"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut collapsed = 0;
        for id in doc.elements() {
            if !doc.is_attached(id) {
                continue;
            }
            let mut current = id;
            while let Some(child) = sole_child(doc, current) {
                doc.unwrap(current);
                collapsed += 1;
                current = child;
            }
        }
        debug!(collapsed, "collapsed single-child wrappers");
    }
}
