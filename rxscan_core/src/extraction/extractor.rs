//! Candidate extraction from recognized text.
//!
//! The extractor walks the text line by line, applies every rule to each line
//! in order, cleans and filters the matches, and keeps the first occurrence of
//! each candidate until the cap is reached.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, error};

use crate::extraction::exclusion::{DEFAULT_EXCLUDED_WORDS, ExclusionSet};
use crate::extraction::rules::{BuildError, PatternRule, RuleDef, default_rules};

/// Maximum number of candidates returned by a single extraction.
pub const DEFAULT_MAX_CANDIDATES: usize = 20;

/// Candidates of this many characters or fewer are rejected.
pub const DEFAULT_MIN_LENGTH: usize = 2;

/// Candidates of this many characters or more are rejected.
pub const DEFAULT_MAX_LENGTH: usize = 30;

static DEFAULT_EXTRACTOR: Lazy<Result<CandidateExtractor, BuildError>> =
    Lazy::new(CandidateExtractor::with_defaults);

/// Configuration for the candidate extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Rules applied to each line, in order.
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleDef>,

    /// Words never accepted as candidates (case-insensitive).
    #[serde(default = "ExtractorConfig::default_excluded_words")]
    pub excluded_words: Vec<String>,

    /// Cap on the number of candidates returned.
    #[serde(default = "ExtractorConfig::default_max_candidates")]
    pub max_candidates: usize,

    /// Exclusive lower bound on candidate length, in characters.
    #[serde(default = "ExtractorConfig::default_min_length")]
    pub min_length: usize,

    /// Exclusive upper bound on candidate length, in characters.
    #[serde(default = "ExtractorConfig::default_max_length")]
    pub max_length: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            excluded_words: Self::default_excluded_words(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl ExtractorConfig {
    fn default_excluded_words() -> Vec<String> {
        DEFAULT_EXCLUDED_WORDS
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    const fn default_max_candidates() -> usize {
        DEFAULT_MAX_CANDIDATES
    }

    const fn default_min_length() -> usize {
        DEFAULT_MIN_LENGTH
    }

    const fn default_max_length() -> usize {
        DEFAULT_MAX_LENGTH
    }
}

/// Extracts medicine name candidates from OCR text.
#[derive(Debug, Clone)]
pub struct CandidateExtractor {
    rules: Vec<PatternRule>,
    exclusions: ExclusionSet,
    max_candidates: usize,
    min_length: usize,
    max_length: usize,
}

impl CandidateExtractor {
    /// Create an extractor from configuration.
    ///
    /// # Errors
    /// Returns an error if a rule fails to compile or two rules share an id.
    pub fn new(config: &ExtractorConfig) -> Result<Self, BuildError> {
        let mut seen = HashSet::new();
        for def in &config.rules {
            if !seen.insert(def.id.as_str()) {
                return Err(BuildError::DuplicateId(def.id.clone()));
            }
        }

        let rules = config
            .rules
            .iter()
            .map(RuleDef::build)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            exclusions: ExclusionSet::new(&config.excluded_words),
            max_candidates: config.max_candidates,
            min_length: config.min_length,
            max_length: config.max_length,
        })
    }

    /// Create an extractor with the default rules and exclusions.
    ///
    /// # Errors
    /// Returns an error if the default rules fail to compile.
    pub fn with_defaults() -> Result<Self, BuildError> {
        Self::new(&ExtractorConfig::default())
    }

    /// Extract candidates from `text`.
    ///
    /// Never fails: text without matches yields an empty list.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();
        if self.max_candidates == 0 {
            return candidates;
        }

        // Later matches are discarded once the cap is hit, so stop scanning.
        'lines: for line in text.split('\n') {
            for rule in &self.rules {
                for candidate in rule.matches(line) {
                    if !self.accepts(&candidate) {
                        debug!(rule = %rule.id, %candidate, "Rejected candidate");
                        continue;
                    }
                    if !candidates.contains(&candidate) {
                        candidates.push(candidate);
                        if candidates.len() == self.max_candidates {
                            break 'lines;
                        }
                    }
                }
            }
        }

        candidates
    }

    /// Whether a cleaned candidate passes the exclusion and length filters.
    #[must_use]
    pub fn accepts(&self, candidate: &str) -> bool {
        let len = candidate.chars().count();
        len > self.min_length && len < self.max_length && !self.exclusions.excludes(candidate)
    }

    #[must_use]
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    #[must_use]
    pub const fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    #[must_use]
    pub const fn max_candidates(&self) -> usize {
        self.max_candidates
    }
}

/// Extract candidates with the default rules, exclusions and cap of 20.
#[must_use]
pub fn extract_candidates(text: &str) -> Vec<String> {
    match DEFAULT_EXTRACTOR.as_ref() {
        Ok(extractor) => extractor.extract(text),
        Err(e) => {
            error!("Default extraction rules failed to compile: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::rules::Cleanup;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn extractor() -> CandidateExtractor {
        CandidateExtractor::with_defaults().expect("default extractor should build")
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("\n\n\n").is_empty());
    }

    #[test]
    fn dosage_prefix_is_stripped() {
        let found = extractor().extract("Tab Amoxicillin 500mg\nCap Omeprazole");
        assert_eq!(found, ["Amoxicillin", "Omeprazole"]);
    }

    #[test]
    fn one_line_feeds_several_rules() {
        let found = extractor().extract("Syrup Cetirizine and CROCIN 650mg");
        assert_eq!(found, ["Cetirizine and", "CROCIN 650mg"]);
    }

    #[test]
    fn overlapping_rule_matches_are_all_kept() {
        let found = extractor().extract("Tab Atorvastatin Daily");
        assert_eq!(found, ["Atorvastatin", "Atorvastatin Daily"]);
    }

    #[test]
    fn uppercase_dosage_form_is_not_a_separate_candidate() {
        assert_eq!(extractor().extract("TAB CROCIN"), ["CROCIN"]);
        assert_eq!(
            extractor().extract("TABLET PARACETAMOL 500mg"),
            ["PARACETAMOL", "PARACETAMOL 500mg"]
        );
    }

    #[test]
    fn non_ascii_noise_does_not_hide_names() {
        assert_eq!(extractor().extract("Amoxicillinä"), ["Amoxicillin"]);
        assert_eq!(extractor().extract("éTab Foovar"), ["Foovar"]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn stops_at_cap_and_zero_cap_is_empty() {
        let letter = |n: u32| char::from(b'A' + u8::try_from(n % 26).unwrap_or(0));
        let text: String = (0..5_000_u32)
            .map(|i| format!("DRUG{}{}{}\n", letter(i / 676), letter(i / 26), letter(i)))
            .collect();

        let found = extractor().extract(&text);
        assert_eq!(found.len(), DEFAULT_MAX_CANDIDATES);
        assert_eq!(found[0], "DRUGAAA");
        assert_eq!(found[19], "DRUGAAT");

        let config = ExtractorConfig {
            max_candidates: 0,
            ..ExtractorConfig::default()
        };
        let e = CandidateExtractor::new(&config).expect("config should build");
        assert!(e.extract("Azithromycin").is_empty());
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let found = extractor().extract("Tab amoxicillin\nAmoxicillin");
        assert_eq!(found, ["amoxicillin", "Amoxicillin"]);
    }

    #[test]
    fn length_bounds_are_exclusive() {
        let e = extractor();
        assert!(!e.accepts("A"));
        assert!(!e.accepts("AB"));
        assert!(e.accepts("ABC"));
        assert!(e.accepts(&"A".repeat(29)));
        assert!(!e.accepts(&"A".repeat(30)));
        assert!(!e.accepts(&"A".repeat(31)));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(extractor().accepts("Ämo"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn custom_config_is_respected() {
        let config = ExtractorConfig {
            rules: vec![RuleDef {
                id: "word".to_string(),
                name: "word".to_string(),
                pattern: r"\b[a-z]+\b".to_string(),
                cleanup: Cleanup::None,
            }],
            excluded_words: vec!["skip".to_string()],
            max_candidates: 2,
            min_length: 0,
            max_length: 100,
        };
        let e = CandidateExtractor::new(&config).expect("config should build");

        assert_eq!(e.extract("one skip two three"), ["one", "two"]);
    }

    #[test]
    fn duplicate_rule_ids_are_rejected() {
        let mut config = ExtractorConfig::default();
        config.rules.push(config.rules[0].clone());

        let err = CandidateExtractor::new(&config).err();
        assert!(matches!(err, Some(BuildError::DuplicateId(ref id)) if id == "suffix"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn config_fills_missing_fields() {
        let config: ExtractorConfig =
            serde_json::from_str(r#"{ "max_candidates": 5 }"#).expect("partial config should parse");
        assert_eq!(config.max_candidates, 5);
        assert_eq!(config.rules.len(), 3);
        assert_eq!(config.excluded_words.len(), DEFAULT_EXCLUDED_WORDS.len());
        assert_eq!(config.max_length, DEFAULT_MAX_LENGTH);
    }

    #[test]
    fn free_function_uses_defaults() {
        assert_eq!(extract_candidates("Azithromycin"), ["Azithromycin"]);
    }
}
