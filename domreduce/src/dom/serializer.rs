//! HTML serialization (Document → markup)
//!
//! Pipeline: arena [`Document`] → RcDom → html5ever serializer → HTML string
//!
//! The output is deterministic for a given tree state, which the metrics rely on.

use super::document::Document;
use super::node::{Element, NodeData, NodeId};
use crate::error::ReduceError;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::{ns, Attribute, LocalName, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData as RcNodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

impl Document {
    /// Render the current tree state as HTML
    pub fn to_html(&self) -> Result<String, ReduceError> {
        serialize_document(self)
    }
}

/// Serialize the whole document
pub fn serialize_document(doc: &Document) -> Result<String, ReduceError> {
    let handle = build_rc_tree(doc, doc.root());
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    render(&handle, opts)
}

/// Serialize a single node including itself
pub fn serialize_node(doc: &Document, id: NodeId) -> Result<String, ReduceError> {
    let handle = build_rc_tree(doc, id);
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    render(&handle, opts)
}

fn render(handle: &Handle, opts: SerializeOpts) -> Result<String, ReduceError> {
    let mut output = Vec::new();
    let serializable = SerializableHandle::from(handle.clone());
    serialize(&mut output, &serializable, opts).map_err(|e| {
        ReduceError::SerializationError(format!("HTML serialization failed: {e}"))
    })?;
    String::from_utf8(output)
        .map_err(|e| ReduceError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Mirror the arena subtree rooted at `id` as RcDom nodes
fn build_rc_tree(doc: &Document, id: NodeId) -> Handle {
    let top = create_node(doc.data(id));
    let mut stack: Vec<(NodeId, Handle)> = vec![(id, top.clone())];
    while let Some((current, handle)) = stack.pop() {
        for child in doc.children(current) {
            let child_handle = create_node(doc.data(*child));
            handle.children.borrow_mut().push(child_handle.clone());
            stack.push((*child, child_handle));
        }
    }
    top
}

fn create_node(data: &NodeData) -> Handle {
    let data = match data {
        NodeData::Document => RcNodeData::Document,
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => RcNodeData::Doctype {
            name: name.as_str().into(),
            public_id: public_id.as_str().into(),
            system_id: system_id.as_str().into(),
        },
        NodeData::Element(element) => return create_element(element),
        NodeData::Text(text) => RcNodeData::Text {
            contents: RefCell::new(text.as_str().into()),
        },
        NodeData::Comment(text) => RcNodeData::Comment {
            contents: text.as_str().into(),
        },
    };
    wrap(data)
}

/// Create an HTML element with attributes
fn create_element(element: &Element) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(element.name.as_str()));
    let attributes = element
        .attrs
        .iter()
        .map(|attr| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(attr.name.as_str())),
            value: attr.value.as_str().into(),
        })
        .collect();

    wrap(RcNodeData::Element {
        name: qual_name,
        attrs: RefCell::new(attributes),
        template_contents: Default::default(),
        mathml_annotation_xml_integration_point: false,
    })
}

fn wrap(data: RcNodeData) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data,
    })
}
