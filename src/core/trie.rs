// --- File: src/core/trie.rs
use std::collections::HashMap;

// --- PrefixTree: a static index over the original dictionary's stroke lists ---

#[derive(Clone, Debug)]
struct PrefixNode {
    children: HashMap<String, usize>,
    is_end: bool,
}

impl PrefixNode {
    fn new() -> Self {
        Self { children: HashMap::new(), is_end: false }
    }
}

/// An arena-backed trie keyed by whole strokes rather than characters.
/// Node 0 is the root; nodes are only ever appended.
#[derive(Clone, Debug)]
pub struct PrefixTree {
    nodes: Vec<PrefixNode>,
}

impl Default for PrefixTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTree {
    pub fn new() -> Self {
        Self { nodes: vec![PrefixNode::new()] }
    }

    /// Builds the index from outline keys, splitting each on the stroke separator.
    pub fn from_keys<'a, I: IntoIterator<Item = &'a String>>(keys: I) -> Self {
        let mut tree = Self::new();
        for key in keys {
            let strokes: Vec<&str> = key.split(crate::core::types::STROKE_SEPARATOR).collect();
            tree.insert(&strokes);
        }
        tree
    }

    /// Inserts a stroke sequence.
    /// O(k) complexity where k is the number of strokes.
    pub fn insert<S: AsRef<str>>(&mut self, strokes: &[S]) {
        let mut node_idx = 0;
        for stroke in strokes {
            let stroke = stroke.as_ref();
            node_idx = match self.nodes[node_idx].children.get(stroke) {
                Some(&id) => id,
                None => {
                    let new_node_id = self.nodes.len();
                    self.nodes.push(PrefixNode::new());
                    self.nodes[node_idx].children.insert(stroke.to_string(), new_node_id);
                    new_node_id
                }
            };
        }
        self.nodes[node_idx].is_end = true;
    }

    /// True when some inserted sequence starts with (or equals) `strokes`.
    pub fn has_prefix<S: AsRef<str>>(&self, strokes: &[S]) -> bool {
        self.walk(strokes).is_some()
    }

    /// True only for sequences inserted exactly.
    #[cfg(test)]
    fn contains<S: AsRef<str>>(&self, strokes: &[S]) -> bool {
        self.walk(strokes).is_some_and(|idx| self.nodes[idx].is_end)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn walk<S: AsRef<str>>(&self, strokes: &[S]) -> Option<usize> {
        let mut node_idx = 0;
        for stroke in strokes {
            node_idx = *self.nodes[node_idx].children.get(stroke.as_ref())?;
        }
        Some(node_idx)
    }
}
