// src/core/resplit.rs
use crate::core::boundary::BoundaryChecker;
use crate::core::grammar::{consonant_run_end, consonant_run_start, is_valid_stroke, is_vowel, StrokeParts};
use crate::core::types::{join_strokes, BOUNDARY_MARKER, SILENT_LINKER, STAR};
use std::collections::BTreeMap;

/// Left-bank chords that stand for a single sound and must move as a whole.
const PROTECTED_LEFT: &[&str] = &[
    "KWR", "PW", "KH", "TK", "TP", "TH", "TKPW", "EU", "SKWR", "HR", "PH", "TPH", "KW", "SR", "KP", "STKPW", "SH",
    "THR",
];

/// Right-bank chords that stand for a single sound and must move as a whole.
const PROTECTED_RIGHT: &[&str] = &[
    "FT", "PL", "BG", "BGT", "PBGT", "LG", "PB", "PBLG", "FRB", "PBG", "FP", "RB", "FRPB", "GS", "BGS", "PBT", "PLT",
    "LT", "BL", "PBS",
];

/// A left-bank group pulled back onto the end of the previous stroke, and
/// how that sound is written on the right bank. A leading star means the
/// star joins the previous stroke's vowels.
const LEFT_TO_RIGHT: &[(&str, &str)] = &[
    ("PW", "B"),
    ("TK", "D"),
    ("TP", "F"),
    ("TKPW", "G"),
    ("SKWR", "PBLG"),
    ("K", "BG"),
    ("HR", "L"),
    ("PH", "PL"),
    ("TPH", "PB"),
    ("SR", "F"),
    ("TH", "*T"),
    ("KH", "FP"),
    ("SH", "RB"),
    ("STKPW", "Z"),
];

/// A right-bank group pushed onto the start of the next stroke, and how
/// that sound is written on the left bank.
const RIGHT_TO_LEFT: &[(&str, &str)] = &[
    ("PL", "PH"),
    ("PB", "TPH"),
    ("F", "TP"),
    ("BG", "K"),
    ("BGT", "-BGT"),
    ("PBLG", "SKWR"),
    ("FP", "KH"),
    ("RB", "SH"),
];

fn lookup(table: &[(&str, &'static str)], group: &str) -> Option<&'static str> {
    table.iter().find(|(from, _)| *from == group).map(|(_, to)| *to)
}

/// Generates alternate syllable splits: consonants at each stroke boundary
/// are shifted to the neighbouring stroke, rewritten for the bank they land in.
pub struct SyllableResplitter;

impl Default for SyllableResplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyllableResplitter {
    pub fn new() -> Self {
        Self
    }

    /// Every valid, unambiguous resplit of `strokes`, excluding `strokes`
    /// itself, sorted by canonical text.
    pub fn generate_splits(&self, strokes: &[String], checker: &BoundaryChecker<'_>) -> Vec<Vec<String>> {
        if strokes.len() < 2 {
            return vec![];
        }
        let intervals: Vec<(isize, isize)> = strokes
            .windows(2)
            .map(|pair| (-(consonant_run_end(&pair[0]) as isize), consonant_run_start(&pair[1]) as isize))
            .collect();

        let source = join_strokes(strokes);
        let mut found: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for offsets in OffsetCombinations::new(&intervals) {
            let Some(candidate) = self.apply_offsets(strokes, &offsets) else {
                continue;
            };
            let candidate: Vec<String> = candidate.into_iter().filter(|s| !s.is_empty()).collect();
            if candidate.is_empty() || !candidate.iter().all(|s| is_valid_stroke(s)) {
                continue;
            }
            let key = join_strokes(&candidate);
            if key == source || found.contains_key(&key) {
                continue;
            }
            if checker.valid_boundaries(&candidate) {
                found.insert(key, candidate);
            }
        }
        found.into_values().collect()
    }

    /// Applies one offset per boundary, left to right. Negative offsets push
    /// the end of the left stroke right, positive ones pull the start of the
    /// right stroke left. `None` when a protected chord would be cut or the
    /// right stroke is a glider.
    fn apply_offsets(&self, strokes: &[String], offsets: &[isize]) -> Option<Vec<String>> {
        let mut current = strokes.to_vec();
        for (index, &offset) in offsets.iter().enumerate() {
            if offset == 0 {
                continue;
            }
            if is_glider(&current[index + 1]) || cuts_protected_chord(&current[index], &current[index + 1], offset) {
                return None;
            }
            if offset < 0 {
                if current[index].contains(STAR) {
                    continue;
                }
                let count = offset.unsigned_abs().min(current[index].len());
                let split_at = current[index].len() - count;
                let moved = current[index].split_off(split_at);
                current[index + 1] = move_onto_next_stroke(&current[index + 1], &moved);
            } else {
                let count = offset.unsigned_abs().min(current[index + 1].len());
                let rest = current[index + 1].split_off(count);
                let taken = std::mem::replace(&mut current[index + 1], rest);
                let moved = match taken.strip_prefix(BOUNDARY_MARKER) {
                    Some(letters) if !letters.is_empty() => letters,
                    _ => taken.as_str(),
                };
                current[index] = move_onto_previous_stroke(&current[index], moved)?;
            }
        }
        Some(current)
    }
}

/// A linker followed directly by a vowel, e.g. `KWRA`.
fn is_glider(stroke: &str) -> bool {
    stroke
        .strip_prefix(SILENT_LINKER)
        .and_then(|rest| rest.chars().next())
        .is_some_and(is_vowel)
}

fn cuts_protected_chord(left: &str, right: &str, offset: isize) -> bool {
    let magnitude = offset.unsigned_abs();
    if offset < 0 {
        return PROTECTED_RIGHT.iter().any(|chord| magnitude < chord.len() && left.ends_with(chord));
    }
    if PROTECTED_LEFT.iter().any(|chord| magnitude < chord.len() && right.starts_with(chord)) {
        return true;
    }
    match right.strip_prefix(BOUNDARY_MARKER) {
        Some(letters) => PROTECTED_RIGHT
            .iter()
            .any(|chord| magnitude < chord.len() + 1 && letters.starts_with(chord)),
        None => false,
    }
}

/// `moved` came off the end of the previous stroke. A right-hand-only
/// stroke loses its marker once it gains leading letters.
fn move_onto_next_stroke(next: &str, moved: &str) -> String {
    let rest = next.strip_prefix(BOUNDARY_MARKER).unwrap_or(next);
    let prefix = lookup(RIGHT_TO_LEFT, moved).unwrap_or(moved);
    format!("{prefix}{rest}")
}

/// `moved` came off the start of the next stroke.
fn move_onto_previous_stroke(previous: &str, moved: &str) -> Option<String> {
    match lookup(LEFT_TO_RIGHT, moved) {
        Some(substitute) => match substitute.strip_prefix(STAR) {
            Some(right) => {
                let parts = StrokeParts::split(previous)?;
                let vowels: String = ['A', 'O', STAR, 'E', 'U']
                    .into_iter()
                    .filter(|&c| c == STAR || parts.vowels.contains(c))
                    .collect();
                Some(format!("{}{}{}{}", parts.left, vowels, parts.right, right))
            }
            None => Some(format!("{previous}{substitute}")),
        },
        None => Some(format!("{previous}{moved}")),
    }
}

/// Odometer over the cartesian product of inclusive offset intervals.
struct OffsetCombinations<'a> {
    intervals: &'a [(isize, isize)],
    next: Option<Vec<isize>>,
}

impl<'a> OffsetCombinations<'a> {
    fn new(intervals: &'a [(isize, isize)]) -> Self {
        let start = intervals.iter().map(|&(low, _)| low).collect();
        Self { intervals, next: Some(start) }
    }
}

impl Iterator for OffsetCombinations<'_> {
    type Item = Vec<isize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut advanced = current.clone();
        for position in (0..advanced.len()).rev() {
            let (low, high) = self.intervals[position];
            if advanced[position] < high {
                advanced[position] += 1;
                self.next = Some(advanced);
                break;
            }
            advanced[position] = low;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::trie::PrefixTree;
    use crate::core::types::Dictionary;

    fn strokes(key: &str) -> Vec<String> {
        key.split('/').map(str::to_string).collect()
    }

    fn splits(key: &str, original: &Dictionary) -> Vec<String> {
        let additional = Dictionary::new();
        let tree = PrefixTree::from_keys(original.keys());
        let checker = BoundaryChecker::new(original, &additional, &tree);
        SyllableResplitter::new()
            .generate_splits(&strokes(key), &checker)
            .iter()
            .map(|s| join_strokes(s))
            .collect()
    }

    #[test]
    fn moves_a_single_consonant_across_the_boundary() {
        assert_eq!(splits("KAS/TOE", &Dictionary::new()), vec!["KA/STOE"]);
        assert_eq!(splits("KA/TOE", &Dictionary::new()), vec!["KAT/OE"]);
    }

    #[test]
    fn substitutes_the_chord_for_the_new_bank() {
        assert_eq!(splits("KA/PHAOE", &Dictionary::new()), vec!["KAPL/AOE"]);
        assert_eq!(splits("KAPL/AOE", &Dictionary::new()), vec!["KA/PHAOE"]);
    }

    #[test]
    fn th_pulled_left_becomes_star_t() {
        assert_eq!(splits("KA/THAOE", &Dictionary::new()), vec!["KA*T/AOE"]);
    }

    #[test]
    fn starred_strokes_keep_their_right_bank() {
        assert!(splits("KA*T/OE", &Dictionary::new()).is_empty());
    }

    #[test]
    fn gliders_are_left_alone() {
        assert!(splits("KAT/KWRA", &Dictionary::new()).is_empty());
    }

    #[test]
    fn right_hand_stroke_folds_into_the_previous_one() {
        assert_eq!(splits("KAT/-S", &Dictionary::new()), vec!["KATS"]);
    }

    #[test]
    fn right_hand_stroke_drops_its_marker_when_it_gains_letters() {
        assert_eq!(splits("KAS/-T", &Dictionary::new()), vec!["KA/ST"]);
    }

    #[test]
    fn ambiguous_splits_are_dropped() {
        let original: Dictionary = [("KA", "ka"), ("STOE", "stow")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert!(splits("KAS/TOE", &original).is_empty());
    }

    #[test]
    fn protected_chords_move_whole() {
        assert!(cuts_protected_chord("KA", "TKPWAOE", 2));
        assert!(!cuts_protected_chord("KA", "TKPWAOE", 4));
        assert!(cuts_protected_chord("KAPBLG", "AOE", -2));
        assert!(!cuts_protected_chord("KAPBLG", "AOE", -4));
        assert!(cuts_protected_chord("KA", "-PLT", 2));
        assert!(!cuts_protected_chord("KA", "-PLT", 4));
    }

    #[test]
    fn offset_combinations_cover_the_product() {
        let intervals = [(-1, 1), (0, 1)];
        let all: Vec<Vec<isize>> = OffsetCombinations::new(&intervals).collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all.first(), Some(&vec![-1, 0]));
        assert_eq!(all.last(), Some(&vec![1, 1]));
    }
}
