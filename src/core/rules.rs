// src/core/rules.rs
//! Hand-authored rewrites. Every function here only proposes candidate
//! outline keys; the entry store decides whether they are kept.

use crate::core::grammar::{is_vowel, part_after_vowels};
use crate::core::types::{join_strokes, length_then_lexical, Dictionary, BOUNDARY_MARKER, SILENT_LINKER};
use log::warn;

/// Left chords whose `EU` ending also reads as `AOE` and `AE`.
const EU_ENDING_CHORDS: &[&str] = &[
    "H", "HR", "K", "KH", "KR", "KW", "P", "PH", "PW", "R", "S", "SR", "SKWR", "T", "TH", "THR", "TK", "TKPW", "TPH",
    "TP", "TR", "W",
];

const SUFFIX_RULES: &[(&str, &[&str])] = &[
    ("/-B/KWREU", &["/PWEU"]),
    ("/-BL/KWREU", &["/PWHREU"]),
    ("/-FL/KWREU", &["/TPHREU"]),
    ("/-L/KWREU", &["/HREU"]),
    ("/-P/KWREU", &["/PEU"]),
    ("/-PL/KWREU", &["/PHREU"]),
    ("R/KWREU", &["/REU"]),
    ("PB/KWREU", &["/TPHEU"]),
    ("PL/KWREU", &["/PHEU"]),
    ("F/KWREU", &["/TPEU"]),
    ("BG/KWREU", &["/KEU"]),
    ("S", &["Z"]),
];

const SUBSTRING_RULES: &[(&str, &[&str])] = &[
    ("/-B/KWR", &["/PW"]),
    ("/-BL/KWR", &["/PWHR"]),
    ("/-FL/KWR", &["/TPHR"]),
    ("/-L/KWR", &["/HR"]),
    ("/-P/KWR", &["/P"]),
    ("/-PL/KWR", &["/PHR"]),
    ("D/KWR", &["/TK"]),
    ("G/KWR", &["/TPKW"]),
    ("PBLG/KWR", &["/PBLG"]),
    ("BG/KWR", &["/K"]),
    ("L/KWR", &["/PBLG"]),
    ("PL/KWR", &["/PH"]),
    ("PB/KWR", &["/TPH"]),
    ("P/KWR", &["/P"]),
    ("R/KWR", &["/R"]),
    ("S/KWR", &["/S"]),
    ("T/KWR", &["/T"]),
    ("Z/KWR", &["/STKPW"]),
    ("STKPW", &["Z"]),
    ("SR", &["V"]),
];

/// A literal pattern and the texts it may be replaced by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    pub pattern: String,
    pub replacements: Vec<String>,
}

impl ReplacementRule {
    pub fn new(pattern: &str, replacements: &[&str]) -> Self {
        Self { pattern: pattern.to_string(), replacements: replacements.iter().map(|r| r.to_string()).collect() }
    }
}

/// Suffix and substring tables, each held shortest pattern first, ties in
/// byte order. The order decides which suffix rule wins.
#[derive(Debug, Clone)]
pub struct RuleTables {
    suffixes: Vec<ReplacementRule>,
    substrings: Vec<ReplacementRule>,
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::lapwing()
    }
}

impl RuleTables {
    pub fn new(mut suffixes: Vec<ReplacementRule>, mut substrings: Vec<ReplacementRule>) -> Self {
        suffixes.sort_by(|a, b| length_then_lexical(&a.pattern, &b.pattern));
        substrings.sort_by(|a, b| length_then_lexical(&a.pattern, &b.pattern));
        Self { suffixes, substrings }
    }

    /// The tables for the Lapwing theory.
    pub fn lapwing() -> Self {
        let mut suffixes: Vec<ReplacementRule> = EU_ENDING_CHORDS
            .iter()
            .map(|chord| ReplacementRule {
                pattern: format!("/{chord}EU"),
                replacements: vec![format!("/{chord}AOE"), format!("/{chord}AE")],
            })
            .collect();
        suffixes.extend(SUFFIX_RULES.iter().map(|(pattern, with)| ReplacementRule::new(pattern, with)));
        let substrings = SUBSTRING_RULES.iter().map(|(pattern, with)| ReplacementRule::new(pattern, with)).collect();
        Self::new(suffixes, substrings)
    }

    #[cfg(test)]
    fn suffixes(&self) -> &[ReplacementRule] {
        &self.suffixes
    }

    #[cfg(test)]
    fn substrings(&self) -> &[ReplacementRule] {
        &self.substrings
    }

    /// Rewrites of the first suffix rule that matches `key`.
    pub fn suffix_candidates(&self, key: &str) -> Vec<String> {
        let Some(rule) = self.suffixes.iter().find(|rule| key.ends_with(&rule.pattern)) else {
            return vec![];
        };
        let head = &key[..key.len() - rule.pattern.len()];
        rule.replacements.iter().map(|replacement| collapse_separators(format!("{head}{replacement}"))).collect()
    }

    /// Rewrites for every substring rule that matches `key`, each applied
    /// to the untouched key.
    pub fn substring_candidates(&self, key: &str) -> Vec<String> {
        self.substrings
            .iter()
            .filter(|rule| key.contains(&rule.pattern))
            .flat_map(|rule| {
                rule.replacements
                    .iter()
                    .map(move |replacement| collapse_separators(key.replace(&rule.pattern, replacement)))
            })
            .collect()
    }
}

fn collapse_separators(key: String) -> String {
    if key.contains("//") {
        key.replace("//", "/")
    } else {
        key
    }
}

/// Drops the silent linker from every non-empty subset of the strokes
/// (after the first) that start with it. A subset is refused when the
/// strokes before any stripped position already spell an original entry.
pub fn linker_removals(strokes: &[String], original: &Dictionary) -> Vec<String> {
    let positions: Vec<usize> = strokes
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, stroke)| stroke.starts_with(SILENT_LINKER) && stroke.len() > SILENT_LINKER.len())
        .map(|(i, _)| i)
        .collect();

    let Some(subsets) = u32::try_from(positions.len()).ok().and_then(|n| 1usize.checked_shl(n)) else {
        warn!("Outline {} has too many linker strokes to enumerate", join_strokes(strokes));
        return vec![];
    };
    let mut variations = Vec::new();
    // mask 0 would reproduce the source outline
    for mask in 1..subsets {
        let chosen: Vec<usize> = positions
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, &position)| position)
            .collect();
        let mut candidate = strokes.to_vec();
        for &position in &chosen {
            candidate[position].replace_range(..SILENT_LINKER.len(), "");
        }
        let collides = chosen.iter().any(|&position| original.contains_key(&join_strokes(&candidate[..position])));
        if !collides {
            variations.push(join_strokes(&candidate));
        }
    }
    variations.sort();
    variations
}

/// Prepends the silent linker to every vowel-initial stroke after the first.
pub fn linker_insertion(strokes: &[String]) -> Option<String> {
    let mut changed = false;
    let linked: Vec<String> = strokes
        .iter()
        .enumerate()
        .map(|(i, stroke)| {
            if i > 0 && stroke.starts_with(is_vowel) {
                changed = true;
                format!("{SILENT_LINKER}{stroke}")
            } else {
                stroke.clone()
            }
        })
        .collect();
    changed.then(|| join_strokes(&linked))
}

/// Folds a final `-S` or `-Z` stroke into the stroke before it, as both
/// `Z` and `S`. Skipped when the previous stroke's trailing consonants
/// already end in that letter, or (for `-S`) hold a `D` or `Z`.
pub fn sz_folds(strokes: &[String]) -> Vec<String> {
    let [head @ .., previous, last] = strokes else {
        return vec![];
    };
    let context = part_after_vowels(previous);
    let blocked = match last.as_str() {
        "-S" => context.ends_with('S') || context.contains(|c: char| matches!(c, 'D' | 'Z')),
        "-Z" => context.ends_with('Z'),
        _ => return vec![],
    };
    if blocked {
        return vec![];
    }
    let mut joined = join_strokes(head);
    if !joined.is_empty() {
        joined.push('/');
    }
    joined.push_str(previous);
    vec![format!("{joined}Z"), format!("{joined}S")]
}

/// Merges a final right-hand-only stroke such as `-D` or `-G` into the
/// previous stroke by dropping its marker.
pub fn trailing_marker_fold(strokes: &[String]) -> Option<Vec<String>> {
    let [head @ .., previous, last] = strokes else {
        return None;
    };
    let letters = last.strip_prefix(BOUNDARY_MARKER).filter(|letters| !letters.is_empty())?;
    let first = letters.chars().next()?;
    if previous.ends_with(first) {
        return None;
    }
    let mut folded = head.to_vec();
    folded.push(format!("{previous}{letters}"));
    Some(folded)
}

/// A final stroke that is the silent linker and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("outline {key} ends in a bare linker stroke")]
pub struct BareLinker {
    pub key: String,
}

/// A final linker+`EU` ("-y") stroke also written with `AOE` and `AE`.
/// Compound rhyming words that repeat the ending mid-outline are left alone.
pub fn linker_vowel_variants(strokes: &[String], translation: &str) -> Result<Vec<String>, BareLinker> {
    let [head @ .., last] = strokes else {
        return Ok(vec![]);
    };
    if head.is_empty() {
        return Ok(vec![]);
    }
    let Some(vowels) = last.strip_prefix(SILENT_LINKER) else {
        return Ok(vec![]);
    };
    if vowels.is_empty() {
        return Err(BareLinker { key: join_strokes(strokes) });
    }
    if vowels != "EU" {
        return Ok(vec![]);
    }
    let medial_y = head[1..].iter().any(|stroke| stroke == last);
    if medial_y && (translation.contains("y-") || translation.contains("y ")) {
        return Ok(vec![]);
    }
    let head = join_strokes(head);
    Ok(vec![format!("{head}/{SILENT_LINKER}AOE"), format!("{head}/{SILENT_LINKER}AE")])
}
