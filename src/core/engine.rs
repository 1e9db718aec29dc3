use crate::core::resplit::SyllableResplitter;
use crate::core::rules::{self, RuleTables};
use crate::core::store::EntryStore;
use crate::core::types::{join_strokes, sorted_keys, Dictionary, Outline};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outlines longer than this whose translation is capitalized are taken
/// to be proper names and not expanded.
pub const PROPER_NAME_STROKE_LIMIT: usize = 8;
const ORIGINAL_PROGRESS_INTERVAL: usize = 10_000;
const ADDITIONAL_PROGRESS_INTERVAL: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub proper_name_stroke_limit: usize,
    /// Log progress every this many original entries; 0 disables it.
    pub original_progress_interval: usize,
    /// Same, for the passes over generated entries.
    pub additional_progress_interval: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            proper_name_stroke_limit: PROPER_NAME_STROKE_LIMIT,
            original_progress_interval: ORIGINAL_PROGRESS_INTERVAL,
            additional_progress_interval: ADDITIONAL_PROGRESS_INTERVAL,
        }
    }
}

/// What one pass did: how many source entries it walked and how many
/// entries it added (or, for the sweep, removed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub name: &'static str,
    pub visited: usize,
    pub changed: usize,
}

/// Totals for a whole run, written out with `--report_target`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AugmentReport {
    pub passes: Vec<PassReport>,
    pub skipped_proper_names: usize,
    pub output_size: usize,
}

// The engine is composed of the entry store and the generators that feed it.
pub struct AugmentEngine {
    store: EntryStore,
    rules: RuleTables,
    resplitter: SyllableResplitter,
    settings: EngineSettings,
}

impl AugmentEngine {
    pub fn new(original: Dictionary) -> Self {
        Self::with_settings(original, EngineSettings::default())
    }

    pub fn with_settings(original: Dictionary, settings: EngineSettings) -> Self {
        Self {
            store: EntryStore::new(original),
            rules: RuleTables::lapwing(),
            resplitter: SyllableResplitter::new(),
            settings,
        }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Runs every pass in order. Keys are always visited in
    /// length-then-lexical order over a snapshot, so the result does not
    /// depend on hash map iteration order.
    pub fn run(&mut self) -> AugmentReport {
        let mut report = AugmentReport::default();

        // 1. Everything applies to the original entries.
        let (pass, skipped) = self.expand_original_entries();
        report.skipped_proper_names = skipped;
        report.passes.push(pass);

        // 2. Second-order rewrites of what pass 1 produced.
        let pass = self.over_additional("linker removal and rule tables", |engine, strokes, key, translation| {
            let mut added = engine.add_all(rules::linker_removals(strokes, engine.store.original()), translation);
            added += engine.add_all(engine.rules.suffix_candidates(key), translation);
            added + engine.add_all(engine.rules.substring_candidates(key), translation)
        });
        report.passes.push(pass);

        // 3. Resplits of the second-order entries.
        let pass = self.over_additional("alternate splits", |engine, strokes, _, translation| {
            engine.add_resplits(strokes, translation)
        });
        report.passes.push(pass);

        // 4. Explicit-link forms of generated entries.
        let pass = self.over_additional("linker insertion", |engine, strokes, _, translation| {
            engine.add_all(rules::linker_insertion(strokes), translation)
        });
        report.passes.push(pass);

        // 5. Entries added late can make earlier ones ambiguous.
        let visited = self.store.additional().len();
        let removed = self.store.prune_conflicts();
        info!("Removed {} entries with conflicting word boundaries", removed.len());
        report.passes.push(PassReport { name: "boundary sweep", visited, changed: removed.len() });

        report.output_size = self.store.additional().len();
        info!("Added {} additional entries overall after checking for conflicting word boundaries", report.output_size);
        report
    }

    /// The generated dictionary, key-ordered.
    pub fn into_output(self) -> BTreeMap<String, String> {
        self.store.into_additional()
    }

    fn expand_original_entries(&mut self) -> (PassReport, usize) {
        let keys = sorted_keys(self.store.original());
        let total = keys.len();
        let mut added = 0;
        let mut skipped = 0;
        for (index, key) in keys.iter().enumerate() {
            log_progress(index, total, self.settings.original_progress_interval, "entries");
            let Some(translation) = self.store.original().get(key).cloned() else {
                continue;
            };
            let outline = Outline::parse(key);
            if self.looks_like_proper_name(&outline, &translation) {
                debug!(
                    "Skipping key {} value = {} since it looks to be a proper name with > {} strokes",
                    key, translation, self.settings.proper_name_stroke_limit
                );
                skipped += 1;
                continue;
            }
            added += self.expand_original(&outline, key, &translation);
        }
        info!("Generated {} entries from {} original entries ({} skipped)", added, total, skipped);
        (PassReport { name: "original entries", visited: total, changed: added }, skipped)
    }

    fn looks_like_proper_name(&self, outline: &Outline, translation: &str) -> bool {
        outline.len() > self.settings.proper_name_stroke_limit && translation.starts_with(|c: char| c.is_ascii_uppercase())
    }

    fn expand_original(&mut self, outline: &Outline, key: &str, translation: &str) -> usize {
        let strokes = outline.strokes();
        let mut added = self.add_resplits(strokes, translation);
        added += self.add_all(rules::linker_removals(strokes, self.store.original()), translation);
        added += self.add_folds(strokes, translation);
        added += self.add_all(self.rules.suffix_candidates(key), translation);
        added += self.add_all(self.rules.substring_candidates(key), translation);
        match rules::linker_vowel_variants(strokes, translation) {
            Ok(variants) => added += self.add_all(variants, translation),
            Err(anomaly) => warn!("{} (value {:?}); skipping", anomaly, translation),
        }
        added
    }

    /// Walks a snapshot of the additional dictionary; `step` may add
    /// entries, which later passes see but this one does not.
    fn over_additional<F>(&mut self, name: &'static str, mut step: F) -> PassReport
    where
        F: FnMut(&mut Self, &[String], &str, &str) -> usize,
    {
        let keys = sorted_keys(self.store.additional());
        let total = keys.len();
        let mut added = 0;
        for (index, key) in keys.iter().enumerate() {
            log_progress(index, total, self.settings.additional_progress_interval, name);
            let Some(translation) = self.store.additional().get(key).cloned() else {
                continue;
            };
            let outline = Outline::parse(key);
            added += step(self, outline.strokes(), key, &translation);
        }
        info!("Pass '{}' added {} entries from {} additional entries", name, added, total);
        PassReport { name, visited: total, changed: added }
    }

    /// S/Z fold of the outline, then the trailing-marker fold with the S/Z
    /// fold run again on its result.
    fn add_folds(&mut self, strokes: &[String], translation: &str) -> usize {
        let mut added = self.add_all(rules::sz_folds(strokes), translation);
        if let Some(folded) = rules::trailing_marker_fold(strokes) {
            added += self.add(&join_strokes(&folded), translation) as usize;
            added += self.add_all(rules::sz_folds(&folded), translation);
        }
        added
    }

    fn add_resplits(&mut self, strokes: &[String], translation: &str) -> usize {
        let splits = self.resplitter.generate_splits(strokes, &self.store.checker());
        self.add_all(splits.iter().map(|split| join_strokes(split)), translation)
    }

    fn add_all<I: IntoIterator<Item = String>>(&mut self, keys: I, translation: &str) -> usize {
        keys.into_iter().filter(|key| self.add(key, translation)).count()
    }

    fn add(&mut self, key: &str, translation: &str) -> bool {
        self.store.add_if_absent_and_valid(key, translation)
    }
}

fn log_progress(index: usize, total: usize, interval: usize, what: &str) {
    if interval > 0 && (index + 1) % interval == 0 {
        info!("Processed {} / {} {}", index + 1, total, what);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(entries: &[(&str, &str)]) -> Dictionary {
        entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn augment(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        let mut engine = AugmentEngine::new(dictionary(entries));
        engine.run();
        engine.into_output()
    }

    #[test]
    fn folds_plural_stroke() {
        let output = augment(&[("KAT/-S", "cats")]);
        assert_eq!(output.get("KATS").map(String::as_str), Some("cats"));
        assert_eq!(output.get("KATZ").map(String::as_str), Some("cats"));
        assert_eq!(output.get("KAT/-Z").map(String::as_str), Some("cats"));
        assert!(!output.contains_key("KAT/-S"));
    }

    #[test]
    fn trailing_marker_merges_into_previous_stroke() {
        let mut engine = AugmentEngine::new(dictionary(&[("HRAOEUBG/-D", "liked")]));
        let source = Outline::parse("HRAOEUBG/-D");
        // the merged single stroke has nothing left for the S/Z fold
        assert_eq!(engine.add_folds(source.strokes(), "liked"), 1);
        assert_eq!(engine.store().additional().get("HRAOEUBGD").map(String::as_str), Some("liked"));

        assert_eq!(augment(&[("HRAOEUBG/-D", "liked")]).get("HRAOEUBGD").map(String::as_str), Some("liked"));
    }

    #[test]
    fn folds_skip_keys_already_added() {
        let mut engine = AugmentEngine::new(dictionary(&[("KAT/-S", "cats")]));
        let source = Outline::parse("KAT/-S");
        // KATZ and KATS from the S/Z fold; the trailing fold's KATS is a repeat
        assert_eq!(engine.add_folds(source.strokes(), "cats"), 2);
        assert_eq!(engine.add_folds(source.strokes(), "cats"), 0);
        assert_eq!(engine.store().additional().len(), 2);
    }

    #[test]
    fn y_ending_variants_are_generated() {
        let output = augment(&[("HAP/KWREU", "happy")]);
        assert_eq!(output.get("HAP/KWRAOE").map(String::as_str), Some("happy"));
        assert_eq!(output.get("HAP/KWRAE").map(String::as_str), Some("happy"));
    }

    #[test]
    fn bare_linker_is_reported_not_fatal() {
        let output = augment(&[("HAP/KWR", "hap"), ("KAT/-S", "cats")]);
        assert!(output.contains_key("KATS"));
    }

    #[test]
    fn long_capitalized_outlines_are_skipped() {
        let key = "KA/KA/KA/KA/KA/KA/KA/KA/-S";
        let mut engine = AugmentEngine::new(dictionary(&[(key, "Kas")]));
        let report = engine.run();
        assert_eq!(report.skipped_proper_names, 1);
        assert!(engine.into_output().is_empty());

        assert!(!augment(&[(key, "kas")]).is_empty());
    }

    #[test]
    fn reports_every_pass() {
        let mut engine = AugmentEngine::new(dictionary(&[("KAT/-S", "cats")]));
        let report = engine.run();
        let names: Vec<&str> = report.passes.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["original entries", "linker removal and rule tables", "alternate splits", "linker insertion", "boundary sweep"]
        );
        assert_eq!(report.output_size, engine.store().additional().len());
    }

    #[test]
    fn report_serializes_pass_names() {
        let mut engine = AugmentEngine::new(dictionary(&[("KAT/-S", "cats")]));
        let json = serde_json::to_value(engine.run()).unwrap();
        assert_eq!(json["passes"][0]["name"], "original entries");
        assert_eq!(json["skipped_proper_names"], 0);
    }
}
