//! prune-duplicate-nav: keep the first of every repeated menu

use crate::dom::{Document, NodeId};
use crate::stage::Stage;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::debug;

/// Navigation-like containers compared by fingerprint
pub const NAV_TAGS: &[&str] = &["nav", "ul", "ol"];

#[derive(Debug, Clone, Copy, Default)]
pub struct PruneDuplicateNav;

/// Hash of the lower-cased, whitespace-normalized text of a subtree
pub fn fingerprint(doc: &Document, id: NodeId) -> String {
    let normalized = doc.normalized_text(id).to_lowercase();
    format!("{:x}", Sha256::digest(normalized.as_bytes()))
}

impl PruneDuplicateNav {
    fn prune_once(doc: &mut Document) -> usize {
        let mut owners: HashMap<String, NodeId> = HashMap::new();
        let mut removed = 0;
        for id in doc.elements_by_tag(NAV_TAGS) {
            if !doc.is_attached(id) {
                continue;
            }
            let key = fingerprint(doc, id);
            match owners.get(&key) {
                // A list nested in the menu that owns the fingerprint is part of it
                Some(owner) if doc.is_ancestor(*owner, id) => {}
                Some(_) => {
                    doc.detach(id);
                    removed += 1;
                }
                None => {
                    owners.insert(key, id);
                }
            }
        }
        removed
    }
}

impl Stage for PruneDuplicateNav {
    fn name(&self) -> &str {
        "prune-duplicate-nav"
    }

    fn description(&self) -> &str {
        "Remove nav/ul/ol containers whose text repeats an earlier one"
    }

    fn aliases(&self) -> &[&str] {
        &["prune_repetitive_and_boilerplate_navigation_items"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut removed = 0;
        loop {
            let pass = Self::prune_once(doc);
            if pass == 0 {
                break;
            }
            removed += pass;
        }
        debug!(removed, "pruned duplicate navigation");
    }
}
