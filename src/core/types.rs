// src/core/types.rs
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Joins strokes into the canonical outline text.
pub const STROKE_SEPARATOR: char = '/';

/// Marks a right-hand-only stroke, e.g. `-S`.
pub const BOUNDARY_MARKER: char = '-';

/// The asterisk modifier in the vowel bank.
pub const STAR: char = '*';

/// Left-bank chord used to attach a vowel-initial syllable without a sound of its own.
pub const SILENT_LINKER: &str = "KWR";

/// A translation ending in this may join the following word.
pub const GLUE_RIGHT: &str = "^}";

/// A translation starting with this may join the preceding word.
pub const GLUE_LEFT: &str = "{^";

/// Outline text -> translation. Both the original and the additional
/// dictionary use this shape.
pub type Dictionary = HashMap<String, String>;

/// An ordered, non-empty sequence of strokes.
/// Equality is equality of the canonical `/`-joined text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Outline {
    strokes: Vec<String>,
}

impl Outline {
    /// Splits outline text on the stroke separator. Empty strokes are kept
    /// so the grammar validator can reject them.
    pub fn parse(key: &str) -> Self {
        Self { strokes: key.split(STROKE_SEPARATOR).map(str::to_string).collect() }
    }

    pub fn strokes(&self) -> &[String] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Canonical text form.
    pub fn key(&self) -> String {
        join_strokes(&self.strokes)
    }
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

pub fn join_strokes<S: AsRef<str>>(strokes: &[S]) -> String {
    let mut key = String::new();
    for (i, stroke) in strokes.iter().enumerate() {
        if i > 0 {
            key.push(STROKE_SEPARATOR);
        }
        key.push_str(stroke.as_ref());
    }
    key
}

/// Shorter keys first, then plain byte order. Short outlines tend to be the
/// common words, so they get first claim on any contested outline.
pub fn length_then_lexical(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Snapshot of a dictionary's keys in processing order.
pub fn sorted_keys(dictionary: &Dictionary) -> Vec<String> {
    let mut keys: Vec<String> = dictionary.keys().cloned().collect();
    keys.sort_by(|a, b| length_then_lexical(a, b));
    keys
}

pub fn has_glue_right(translation: &str) -> bool {
    translation.ends_with(GLUE_RIGHT)
}

pub fn has_glue_left(translation: &str) -> bool {
    translation.starts_with(GLUE_LEFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_round_trips_canonical_text() {
        let outline = Outline::parse("SEU/KWROEF/KWRA");
        assert_eq!(outline.len(), 3);
        assert_eq!(outline.strokes().last().map(String::as_str), Some("KWRA"));
        assert_eq!(outline.to_string(), "SEU/KWROEF/KWRA");
        assert_eq!(outline.strokes().to_vec(), vec!["SEU", "KWROEF", "KWRA"]);
    }

    #[test]
    fn keys_sort_by_length_then_bytes() {
        let dictionary: Dictionary = [("KAT/-S", "cats"), ("TKOG", "dog"), ("KAT", "cat"), ("A", "a")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(sorted_keys(&dictionary), vec!["A", "KAT", "TKOG", "KAT/-S"]);
    }

    #[test]
    fn glue_markers() {
        assert!(has_glue_right("{un^}"));
        assert!(!has_glue_right("un"));
        assert!(has_glue_left("{^ing}"));
        assert!(!has_glue_left("ing"));
    }
}
