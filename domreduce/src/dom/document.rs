//! Document - arena-based mutable tree
//!
//! Every node is stored in a single `Vec` owned by the [`Document`] and addressed by
//! [`NodeId`]. Detaching a node only unlinks it from its parent: the subtree stays in
//! the arena as an orphan, which keeps ids taken before a mutation valid.
//!
//! Traversal helpers return materialized `Vec<NodeId>` snapshots so stages can walk
//! the tree and prune it in the same pass.

use super::node::{Attribute, Element, Node, NodeData, NodeId};
use super::text::collapse_whitespace;

/// An HTML document held entirely in memory
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Recovery messages reported by the parser (non-fatal)
    warnings: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the root node
    pub fn new() -> Self {
        Document {
            nodes: vec![Node::new(NodeData::Document)],
            warnings: Vec::new(),
        }
    }

    /// The document root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the arena, orphans included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub(crate) fn push_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    // --- construction ------------------------------------------------------

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    /// Create a detached node
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        self.alloc(data)
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str, attrs: Vec<(&str, &str)>) -> NodeId {
        let attrs = attrs
            .into_iter()
            .map(|(name, value)| Attribute::new(name, value))
            .collect();
        self.alloc(NodeData::Element(Element::new(name, attrs)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Text(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it first if needed
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    // --- access ------------------------------------------------------------

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.node(id).data
    }

    pub fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.node_mut(id).data
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.data(id).as_element()
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.data_mut(id).as_element_mut()
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.data(id).is_element()
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.name.as_str())
    }

    /// Whether `id` is an element with one of the given tags
    pub fn has_tag(&self, id: NodeId, tags: &[&str]) -> bool {
        self.element(id).is_some_and(|el| el.is_any(tags))
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id).and_then(|el| el.remove_attr(name))
    }

    // --- navigation --------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Direct children that are elements
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.is_element(*child))
    }

    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.element_children(id).next()
    }

    fn sibling_offset(&self, id: NodeId, offset: isize) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|s| *s == id)?;
        let target = pos.checked_add_signed(offset)?;
        siblings.get(target).copied()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.sibling_offset(id, 1)
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.sibling_offset(id, -1)
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Whether the node is still reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root() || self.ancestors(id).any(|a| a == self.root())
    }

    /// Closest ancestor element with one of the given tags
    pub fn closest_ancestor(&self, id: NodeId, tags: &[&str]) -> Option<NodeId> {
        self.ancestors(id).find(|a| self.has_tag(*a, tags))
    }

    /// All descendants of `id` in document (pre-)order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Every attached element in document order
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.is_element(*id))
            .collect()
    }

    /// Attached elements whose tag is one of `tags`, in document order
    pub fn elements_by_tag(&self, tags: &[&str]) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.has_tag(*id, tags))
            .collect()
    }

    /// Descendant elements of `id` with one of the given tags, in document order
    pub fn descendants_by_tag(&self, id: NodeId, tags: &[&str]) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|d| self.has_tag(*d, tags))
            .collect()
    }

    // --- mutation ----------------------------------------------------------

    /// Unlink a node (and its subtree) from its parent
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
    }

    /// Put `replacement` at the position of `old`, detaching `old`
    pub fn replace(&mut self, old: NodeId, replacement: NodeId) {
        let Some(parent) = self.parent(old) else {
            return;
        };
        self.detach(replacement);
        let Some(pos) = self.children(parent).iter().position(|c| *c == old) else {
            return;
        };
        self.node_mut(parent).children[pos] = replacement;
        self.node_mut(replacement).parent = Some(parent);
        self.node_mut(old).parent = None;
    }

    /// Replace an element by its children, in place
    pub fn unwrap(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let Some(pos) = self.children(parent).iter().position(|c| *c == id) else {
            return;
        };
        let children = std::mem::take(&mut self.node_mut(id).children);
        for child in &children {
            self.node_mut(*child).parent = Some(parent);
        }
        self.node_mut(parent).children.splice(pos..=pos, children);
        self.node_mut(id).parent = None;
    }

    /// Merge runs of adjacent text siblings into their first node, returning how many were absorbed
    pub fn merge_adjacent_text(&mut self) -> usize {
        let mut parents = vec![self.root()];
        parents.extend(self.descendants(self.root()));

        let mut merged = 0;
        for parent in parents {
            let children = self.children(parent).to_vec();
            let mut run_head: Option<NodeId> = None;
            for child in children {
                let Some(text) = self.data(child).as_text().map(str::to_string) else {
                    run_head = None;
                    continue;
                };
                match run_head {
                    Some(head) => {
                        if let NodeData::Text(existing) = self.data_mut(head) {
                            existing.push_str(&text);
                        }
                        self.detach(child);
                        merged += 1;
                    }
                    None => run_head = Some(child),
                }
            }
        }
        merged
    }

    // --- text --------------------------------------------------------------

    /// Concatenation of every descendant text node
    pub fn text_content(&self, id: NodeId) -> String {
        self.text_pieces(id).concat()
    }

    /// Descendant text pieces, each trimmed, empty pieces dropped, joined by `separator`
    pub fn stripped_text(&self, id: NodeId, separator: &str) -> String {
        self.text_pieces(id)
            .into_iter()
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Stripped text with internal whitespace collapsed to single spaces
    pub fn normalized_text(&self, id: NodeId) -> String {
        collapse_whitespace(&self.stripped_text(id, ""))
    }

    /// Text of the direct text children only
    pub fn direct_text(&self, id: NodeId) -> String {
        self.children(id)
            .iter()
            .filter_map(|child| self.data(*child).as_text())
            .collect()
    }

    fn text_pieces(&self, id: NodeId) -> Vec<&str> {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.data(d).as_text())
            .collect()
    }
}
