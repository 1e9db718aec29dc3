// File: src/core/store.rs
use crate::core::boundary::BoundaryChecker;
use crate::core::grammar::is_valid_stroke;
use crate::core::trie::PrefixTree;
use crate::core::types::{sorted_keys, Dictionary, STROKE_SEPARATOR};
use log::debug;
use std::collections::BTreeMap;

/// Owns both dictionaries and the prefix index for one run. The original
/// dictionary and the index never change after construction; the
/// additional dictionary only grows until `prune_conflicts`.
pub struct EntryStore {
    original: Dictionary,
    additional: Dictionary,
    prefixes: PrefixTree,
}

impl EntryStore {
    pub fn new(original: Dictionary) -> Self {
        let prefixes = PrefixTree::from_keys(original.keys());
        debug!("Prefix index built with {} nodes", prefixes.node_count());
        Self { original, additional: Dictionary::new(), prefixes }
    }

    pub fn original(&self) -> &Dictionary {
        &self.original
    }

    pub fn additional(&self) -> &Dictionary {
        &self.additional
    }

    pub fn contains(&self, key: &str) -> bool {
        self.original.contains_key(key) || self.additional.contains_key(key)
    }

    pub fn checker(&self) -> BoundaryChecker<'_> {
        BoundaryChecker::new(&self.original, &self.additional, &self.prefixes)
    }

    /// The single write path. Inserts only when the key is new to both
    /// dictionaries, every stroke is well formed and no split of the
    /// outline is ambiguous.
    pub fn add_if_absent_and_valid(&mut self, key: &str, translation: &str) -> bool {
        if self.contains(key) {
            return false;
        }
        let strokes: Vec<&str> = key.split(STROKE_SEPARATOR).collect();
        if !strokes.iter().all(|stroke| is_valid_stroke(stroke)) {
            return false;
        }
        if !self.checker().valid_boundaries(&strokes) {
            return false;
        }
        self.additional.insert(key.to_string(), translation.to_string());
        true
    }

    /// Re-checks every generated entry against the current state, in
    /// processing order, dropping the ones that became ambiguous after
    /// they were added. Returns the removed keys.
    pub fn prune_conflicts(&mut self) -> Vec<String> {
        let mut removed = Vec::new();
        for key in sorted_keys(&self.additional) {
            let strokes: Vec<&str> = key.split(STROKE_SEPARATOR).collect();
            if strokes.len() < 2 || self.checker().valid_boundaries(&strokes) {
                continue;
            }
            debug!("Removing {} due to conflicting word boundaries", key);
            self.additional.remove(&key);
            removed.push(key);
        }
        removed
    }

    /// The generated entries, key-ordered for stable serialization.
    pub fn into_additional(self) -> BTreeMap<String, String> {
        self.additional.into_iter().collect()
    }
}
