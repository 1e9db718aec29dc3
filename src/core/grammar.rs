// src/core/grammar.rs
use crate::core::types::BOUNDARY_MARKER;

pub const LEFT_BANK: &str = "ZSTKPWHRV";
pub const VOWEL_BANK: &str = "AO*EU";
pub const RIGHT_BANK: &str = "FRPBLGTSDZ";

/// Letters that count toward a consonant run at a stroke edge.
const CONSONANTS: &str = "BCDFGHJKLMNPQRSTVWXZ";

/// A stroke split into its three banks. Produced by a forward-only scan,
/// so a letter shared by two banks lands in the earliest one still open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrokeParts {
    pub left: String,
    pub vowels: String,
    pub right: String,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bank {
    Left,
    Vowel,
    Right,
}

impl Bank {
    fn letters(self) -> &'static str {
        match self {
            Bank::Left => LEFT_BANK,
            Bank::Vowel => VOWEL_BANK,
            Bank::Right => RIGHT_BANK,
        }
    }
}

impl StrokeParts {
    /// Returns `None` when a character fits neither the current bank nor a later one.
    pub fn split(stroke: &str) -> Option<Self> {
        let mut parts = StrokeParts::default();
        let mut bank = Bank::Left;
        for c in stroke.chars() {
            let next = [Bank::Left, Bank::Vowel, Bank::Right]
                .into_iter()
                .filter(|&b| b >= bank)
                .find(|b| b.letters().contains(c))?;
            bank = next;
            match bank {
                Bank::Left => parts.left.push(c),
                Bank::Vowel => parts.vowels.push(c),
                Bank::Right => parts.right.push(c),
            }
        }
        Some(parts)
    }
}

/// Decides whether a single chord is well formed.
pub fn is_valid_stroke(stroke: &str) -> bool {
    if stroke.is_empty() || has_consecutive_repeat(stroke) {
        return false;
    }
    if let Some(right_only) = stroke.strip_prefix(BOUNDARY_MARKER) {
        return !right_only.is_empty() && is_in_bank_order(right_only, RIGHT_BANK);
    }
    match StrokeParts::split(stroke) {
        Some(parts) => {
            is_in_bank_order(&parts.left, LEFT_BANK)
                && is_in_bank_order(&parts.vowels, VOWEL_BANK)
                && is_in_bank_order(&parts.right, RIGHT_BANK)
        }
        None => false,
    }
}

/// Every letter is in `order` and their positions strictly increase.
pub fn is_in_bank_order(letters: &str, order: &str) -> bool {
    let mut last: Option<usize> = None;
    for c in letters.chars() {
        match order.find(c) {
            Some(index) if last.map_or(true, |l| index > l) => last = Some(index),
            _ => return false,
        }
    }
    true
}

fn has_consecutive_repeat(stroke: &str) -> bool {
    stroke.as_bytes().windows(2).any(|pair| pair[0] == pair[1])
}

pub fn is_consonant(c: char) -> bool {
    CONSONANTS.contains(c)
}

pub fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'O' | 'U')
}

/// Length of the consonant run ending the stroke.
pub fn consonant_run_end(stroke: &str) -> usize {
    stroke.chars().rev().take_while(|&c| is_consonant(c)).count()
}

/// Length of the consonant run starting the stroke; a leading boundary
/// marker belongs to the run.
pub fn consonant_run_start(stroke: &str) -> usize {
    stroke.chars().take_while(|&c| is_consonant(c) || c == BOUNDARY_MARKER).count()
}

/// What follows the last vowel, star or boundary marker, or the whole
/// stroke when there is none.
pub fn part_after_vowels(stroke: &str) -> &str {
    match stroke.rfind(|c: char| is_vowel(c) || c == '*' || c == BOUNDARY_MARKER) {
        Some(index) => &stroke[index + 1..],
        None => stroke,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_ordered_strokes() {
        for stroke in ["KAT", "STKPWAOEUPBLGTSDZ", "-S", "-BGT", "KA*T", "AOE", "ZAOEU", "VAOE", "SKWRAEU", "PH"] {
            assert!(is_valid_stroke(stroke), "{stroke} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_strokes() {
        for stroke in ["", "-", "KAST", "TS", "KATT", "KAT-", "-SF", "EA", "kat", "KA#T", "-A"] {
            assert!(!is_valid_stroke(stroke), "{stroke} should be invalid");
        }
    }

    #[test]
    fn shared_letters_go_to_the_earliest_open_bank() {
        let parts = StrokeParts::split("STAOPS").unwrap();
        assert_eq!(parts.left, "ST");
        assert_eq!(parts.vowels, "AO");
        assert_eq!(parts.right, "PS");
        assert_eq!(StrokeParts::split("KAOK"), None);
    }

    #[test]
    fn consonant_runs() {
        assert_eq!(consonant_run_end("KAPBLG"), 4);
        assert_eq!(consonant_run_end("KA*"), 0);
        assert_eq!(consonant_run_start("-PLT"), 4);
        assert_eq!(consonant_run_start("TPHOE"), 3);
        assert_eq!(consonant_run_start("AOE"), 0);
    }

    #[test]
    fn trailing_context_skips_vowels() {
        assert_eq!(part_after_vowels("KAT"), "T");
        assert_eq!(part_after_vowels("KA"), "");
        assert_eq!(part_after_vowels("-D"), "D");
        assert_eq!(part_after_vowels("TK"), "TK");
    }

    proptest! {
        #[test]
        fn validator_is_pure(stroke in "[-*A-Z]{0,10}") {
            prop_assert_eq!(is_valid_stroke(&stroke), is_valid_stroke(&stroke));
        }

        #[test]
        fn accepted_strokes_have_ordered_banks(stroke in "[-*AEOUSTKPWHRFBLGDZV]{1,8}") {
            if is_valid_stroke(&stroke) {
                match stroke.strip_prefix('-') {
                    Some(right) => prop_assert!(is_in_bank_order(right, RIGHT_BANK)),
                    None => {
                        let parts = StrokeParts::split(&stroke).unwrap();
                        prop_assert!(is_in_bank_order(&parts.left, LEFT_BANK));
                        prop_assert!(is_in_bank_order(&parts.vowels, VOWEL_BANK));
                        prop_assert!(is_in_bank_order(&parts.right, RIGHT_BANK));
                        prop_assert_eq!(parts.left.len() + parts.vowels.len() + parts.right.len(), stroke.len());
                    }
                }
            }
        }
    }
}
