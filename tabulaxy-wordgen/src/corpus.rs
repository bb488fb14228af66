//! In-memory corpus aggregate
//!
//! Holds the entries in append order together with the set of known
//! normalized targets. Entries are only ever appended; `add_if_absent` is
//! the single mutation path, so the known set and the entry list can not
//! drift apart.

use crate::candidate::Candidate;
use serde_json::Value;
use std::collections::HashSet;
use tabulaxy_common::models::normalize_target;
use tabulaxy_common::WordEntry;
use tracing::debug;

/// Result of merging one batch of candidates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Targets appended, in order
    pub added: Vec<String>,
    /// Candidates whose target was already known
    pub duplicates: usize,
    /// Candidates that failed normalization or structural checks
    pub invalid: usize,
}

impl MergeReport {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<WordEntry>,
    known: HashSet<String>,
}

impl Corpus {
    /// Build from loaded entries
    ///
    /// Duplicate targets already present in the file are kept as they
    /// are; they only collapse in the known set.
    pub fn from_entries(entries: Vec<WordEntry>) -> Self {
        let known = entries.iter().map(WordEntry::target_key).collect();
        Self { entries, known }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Whether a target is known, compared in normalized form
    pub fn contains(&self, target: &str) -> bool {
        self.known.contains(&normalize_target(target))
    }

    /// Append `entry` unless its target is already known
    pub fn add_if_absent(&mut self, entry: WordEntry) -> bool {
        if !self.known.insert(entry.target_key()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// The last `n` targets in append order
    pub fn known_sample(&self, n: usize) -> Vec<String> {
        let start = self.entries.len().saturating_sub(n);
        self.entries[start..]
            .iter()
            .map(|e| e.target.clone())
            .collect()
    }

    /// Validate and append a batch of raw candidates
    pub fn merge(&mut self, candidates: Vec<Value>) -> MergeReport {
        let mut report = MergeReport::default();

        for value in candidates {
            let entry = match Candidate::from_value(value).and_then(Candidate::into_entry) {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping candidate: {}", e);
                    report.invalid += 1;
                    continue;
                }
            };

            let target = entry.target.clone();
            if self.add_if_absent(entry) {
                report.added.push(target);
            } else {
                debug!(target_word = %target, "Skipping known target");
                report.duplicates += 1;
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tabulaxy_common::{Category, Difficulty, ModeFlags};

    fn entry(target: &str) -> WordEntry {
        WordEntry {
            target: target.to_string(),
            forbidden: vec!["A".into(), "B".into(), "C".into(), "D".into(), "E".into()],
            category: Category::Culture,
            difficulty: Difficulty::Medium,
            mode_flags: ModeFlags::ALL,
        }
    }

    fn raw(target: &str) -> Value {
        json!({"t": target, "f": ["a", "b", "c", "d", "e"], "c": 4, "d": 2})
    }

    fn targets(corpus: &Corpus) -> Vec<&str> {
        corpus.entries().iter().map(|e| e.target.as_str()).collect()
    }

    #[test]
    fn test_merge_skips_known_and_adds_new() {
        let mut corpus = Corpus::from_entries(vec![entry("A"), entry("B")]);

        let report = corpus.merge(vec![raw("A"), raw("C")]);

        assert_eq!(report.added, vec!["C"]);
        assert_eq!(report.duplicates, 1);
        assert_eq!(targets(&corpus), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_within_batch_duplicates_added_once() {
        let mut corpus = Corpus::default();

        let report = corpus.merge(vec![raw("kedi"), raw("KEDI"), raw(" kedi ")]);

        assert_eq!(report.added, vec!["KEDI"]);
        assert_eq!(report.duplicates, 2);
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_invalid_candidates_are_counted_not_added() {
        let mut corpus = Corpus::default();

        let report = corpus.merge(vec![
            raw("ELMA"),
            json!({"t": "ARMUT", "f": ["a"], "c": 3, "d": 1}),
            json!(42),
        ]);

        assert_eq!(report.added_count(), 1);
        assert_eq!(report.invalid, 2);
        assert!(!corpus.contains("ARMUT"));
    }

    #[test]
    fn test_contains_normalizes() {
        let corpus = Corpus::from_entries(vec![entry("ELMA")]);
        assert!(corpus.contains(" elma"));
        assert!(!corpus.contains("ARMUT"));
    }

    #[test]
    fn test_known_sample_takes_most_recent() {
        let corpus = Corpus::from_entries(vec![entry("A"), entry("B"), entry("C")]);
        assert_eq!(corpus.known_sample(2), vec!["B", "C"]);
        assert_eq!(corpus.known_sample(10), vec!["A", "B", "C"]);
        assert!(corpus.known_sample(0).is_empty());
    }

    #[test]
    fn test_loaded_duplicates_are_kept() {
        let corpus = Corpus::from_entries(vec![entry("A"), entry("a")]);
        assert_eq!(corpus.len(), 2);
        assert!(corpus.contains("A"));
    }
}
