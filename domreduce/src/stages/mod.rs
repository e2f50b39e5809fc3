//! Built-in reduction stages
//!
//!     Each stage is a unit struct (or a small options struct) implementing [`Stage`](crate::stage::Stage).
//!     Stages never fail: a tree with nothing to transform is left untouched.
//!
//!     Every stage that removes or replaces nodes walks a snapshot of candidate ids taken
//!     before mutating, and re-checks [`Document::is_attached`] for each candidate, since
//!     an earlier removal in the same pass may already have taken it out of the tree.
//!
//!     Stage                       Module
//!     strip-clutter               clutter.rs
//!     strip-non-visual            visibility.rs
//!     simplify-attributes         attributes.rs
//!     strip-utility-classes       attributes.rs
//!     collapse-nesting            collapse.rs
//!     prune-duplicate-nav         navigation.rs
//!     tables-to-text              tables.rs
//!     css-tables-to-text          tables.rs
//!     drop-large-table-row-ids    tables.rs
//!     lists-to-text               lists.rs
//!     definition-lists-to-text    definitions.rs
//!     figures-to-text             figures.rs
//!     media-placeholders          media.rs
//!     minify-whitespace           whitespace.rs

pub mod attributes;
pub mod clutter;
pub mod collapse;
pub mod definitions;
pub mod figures;
pub mod lists;
pub mod media;
pub mod navigation;
pub mod tables;
pub mod visibility;
pub mod whitespace;

pub use attributes::{SimplifyAttributes, StripUtilityClasses};
pub use clutter::StripClutter;
pub use collapse::CollapseNesting;
pub use definitions::DefinitionListsToText;
pub use figures::FiguresToText;
pub use lists::ListsToText;
pub use media::MediaPlaceholders;
pub use navigation::PruneDuplicateNav;
pub use tables::{CssTablesToText, DropLargeTableRowIds, TablesToText};
pub use visibility::StripNonVisual;
pub use whitespace::MinifyWhitespace;

use crate::dom::{Document, NodeId};

/// Replace `target` with `<pre {marker}="1">text</pre>` at the same position
pub(crate) fn replace_with_text_block(
    doc: &mut Document,
    target: NodeId,
    marker: &str,
    text: &str,
) -> NodeId {
    let pre = doc.create_element("pre", vec![(marker, "1")]);
    let content = doc.create_text(text);
    doc.append_child(pre, content);
    doc.replace(target, pre);
    pre
}
