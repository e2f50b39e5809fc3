//! Stage trait definition
//!
//! A stage is one named, self-contained tree transformation. Stages take exclusive
//! mutable access to the document for the duration of [`Stage::apply`] and keep no
//! reference to it afterwards.

use crate::dom::Document;

/// Trait for reduction stages
///
/// Stages must be total: any tree, including an empty or degenerate one, is valid
/// input. Nothing to do is an early return, never an error.
///
/// # Examples
///
/// ```ignore
/// struct DropComments;
///
/// impl Stage for DropComments {
///     fn name(&self) -> &str {
///         "drop-comments"
///     }
///
///     fn apply(&self, doc: &mut Document) {
///         for id in doc.descendants(doc.root()) {
///             if doc.data(id).is_comment() {
///                 doc.detach(id);
///             }
///         }
///     }
/// }
/// ```
pub trait Stage: Send + Sync {
    /// Canonical identifier (e.g., "strip-clutter")
    fn name(&self) -> &str;

    /// One-line summary shown by `--list-stages`
    fn description(&self) -> &str {
        ""
    }

    /// Alternative identifiers accepted in pipeline configurations
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Transform the document in place
    fn apply(&self, doc: &mut Document);
}
