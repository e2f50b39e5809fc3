//! In-memory HTML document model
//!
//!     The reducer never works on the html5ever tree directly. Markup is parsed with html5ever
//!     into an RcDom and immediately converted into an arena [`Document`], which stages mutate
//!     freely. Serialization goes the other way: the arena is mirrored into RcDom nodes and
//!     rendered by the html5ever serializer.
//!
//!     .
//!     ├── node.rs         # NodeId, Element, NodeData
//!     ├── document.rs     # arena tree, navigation and mutation
//!     ├── parser.rs       # markup → Document
//!     ├── serializer.rs   # Document → markup
//!     ├── style.rs        # inline `style` declarations
//!     └── text.rs         # whitespace helpers

pub mod document;
pub mod node;
pub mod parser;
pub mod serializer;
pub mod style;
pub mod text;

pub use document::Document;
pub use node::{Attribute, Element, NodeData, NodeId};
pub use parser::parse_html;
pub use serializer::{serialize_document, serialize_node};
