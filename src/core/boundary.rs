// src/core/boundary.rs
use crate::core::trie::PrefixTree;
use crate::core::types::{has_glue_left, has_glue_right, join_strokes, Dictionary};

/// Read-only view over both dictionaries and the prefix index, answering
/// "would this outline be ambiguous with what is already defined".
#[derive(Clone, Copy)]
pub struct BoundaryChecker<'a> {
    original: &'a Dictionary,
    additional: &'a Dictionary,
    prefixes: &'a PrefixTree,
}

impl<'a> BoundaryChecker<'a> {
    pub fn new(original: &'a Dictionary, additional: &'a Dictionary, prefixes: &'a PrefixTree) -> Self {
        Self { original, additional, prefixes }
    }

    /// Rejects an outline when some split into `prefix | suffix` lands on an
    /// existing entry followed by an existing entry (or the start of a longer
    /// original one), unless a glue marker on either side makes the join
    /// unambiguous. Every split point is examined, so the result does not
    /// depend on scan direction.
    pub fn valid_boundaries<S: AsRef<str>>(&self, strokes: &[S]) -> bool {
        (1..strokes.len()).all(|split| self.split_is_unambiguous(&strokes[..split], &strokes[split..]))
    }

    fn split_is_unambiguous<S: AsRef<str>>(&self, prefix_strokes: &[S], suffix_strokes: &[S]) -> bool {
        let prefix = join_strokes(prefix_strokes);
        let Some(prefix_translation) = self.translation(&prefix) else {
            return true;
        };
        let suffix = join_strokes(suffix_strokes);
        let suffix_translation = self.translation(&suffix);
        if suffix_translation.is_none() && !self.prefixes.has_prefix(suffix_strokes) {
            return true;
        }
        has_glue_right(prefix_translation) || suffix_translation.is_some_and(has_glue_left)
    }

    /// Original entries shadow generated ones.
    pub fn translation(&self, key: &str) -> Option<&'a str> {
        self.original.get(key).or_else(|| self.additional.get(key)).map(String::as_str)
    }
}
