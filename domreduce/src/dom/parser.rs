//! HTML parsing (markup → Document)
//!
//! Pipeline: HTML string → html5ever → RcDom → arena [`Document`]
//!
//! html5ever never fails on malformed markup: it recovers the way browsers do and
//! reports what it fixed. Those reports are kept on the document as warnings.

use super::document::Document;
use super::node::{Attribute, Element, NodeData, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use tracing::debug;

/// Parse raw markup into a document, recovering from malformed input
pub fn parse_html(source: &str) -> Document {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);

    let mut doc = Document::new();
    let root = doc.root();

    let mut stack: Vec<(Handle, NodeId)> = dom
        .document
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (child.clone(), root))
        .collect();

    // Children are pushed in reverse so they are appended in document order.
    while let Some((handle, parent)) = stack.pop() {
        let Some(data) = convert_node(&handle) else {
            continue;
        };
        let id = doc.create_node(data);
        doc.append_child(parent, id);

        let mut children: Vec<Handle> = handle.children.borrow().iter().cloned().collect();
        if let RcNodeData::Element {
            template_contents, ..
        } = &handle.data
        {
            if let Some(contents) = template_contents.borrow().as_ref() {
                children.extend(contents.children.borrow().iter().cloned());
            }
        }
        stack.extend(children.into_iter().rev().map(|child| (child, id)));
    }

    for error in dom.errors.borrow().iter() {
        doc.push_warning(error.to_string());
    }
    if !doc.warnings().is_empty() {
        debug!(
            warnings = doc.warnings().len(),
            "parser recovered from malformed markup"
        );
    }

    doc
}

fn convert_node(handle: &Handle) -> Option<NodeData> {
    match &handle.data {
        RcNodeData::Document => None,
        RcNodeData::Doctype {
            name,
            public_id,
            system_id,
        } => Some(NodeData::Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }),
        RcNodeData::Text { contents } => Some(NodeData::Text(contents.borrow().to_string())),
        RcNodeData::Comment { contents } => Some(NodeData::Comment(contents.to_string())),
        RcNodeData::Element { name, attrs, .. } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| {
                    let local = attr.name.local.to_string();
                    let name = match &attr.name.prefix {
                        Some(prefix) => format!("{prefix}:{local}"),
                        None => local,
                    };
                    Attribute::new(name, attr.value.to_string())
                })
                .collect();
            Some(NodeData::Element(Element::new(
                name.local.to_string(),
                attrs,
            )))
        }
        RcNodeData::ProcessingInstruction { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let doc = parse_html("<!DOCTYPE html><html><head><title>T</title></head><body><p id='x'>Hi</p></body></html>");
        let p = doc.elements_by_tag(&["p"]);
        assert_eq!(p.len(), 1);
        assert_eq!(doc.attr(p[0], "id"), Some("x"));
        assert_eq!(doc.text_content(p[0]), "Hi");
        let first = doc.children(doc.root())[0];
        assert!(matches!(doc.data(first), NodeData::Doctype { .. }));
    }

    #[test]
    fn tag_names_are_lower_cased() {
        let doc = parse_html("<DIV><SPAN>x</SPAN></DIV>");
        assert_eq!(doc.elements_by_tag(&["div"]).len(), 1);
        assert_eq!(doc.tag_name(doc.elements_by_tag(&["span"])[0]), Some("span"));
    }

    #[test]
    fn malformed_markup_is_recovered() {
        let doc = parse_html("<div><p>unclosed <b>bold</div></i>");
        assert_eq!(doc.elements_by_tag(&["body"]).len(), 1);
        assert!(doc.text_content(doc.root()).contains("bold"));
        assert!(!doc.warnings().is_empty());
    }

    #[test]
    fn comments_are_kept_as_nodes() {
        let doc = parse_html("<body><!-- note --><p>x</p></body>");
        let body = doc.elements_by_tag(&["body"])[0];
        assert!(doc.data(doc.children(body)[0]).is_comment());
    }

    #[test]
    fn template_contents_become_children() {
        let doc = parse_html("<body><template><p>inside</p></template></body>");
        let template = doc.elements_by_tag(&["template"])[0];
        assert_eq!(doc.descendants_by_tag(template, &["p"]).len(), 1);
    }
}
