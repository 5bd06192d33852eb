//! Configurable extraction rules for medicine candidates.
//!
//! Rules are defined as plain data (`RuleDef`) so they can be loaded from
//! configuration, then compiled into `PatternRule`s by the extractor.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Leading dosage-form word plus the whitespace after it.
///
/// `(?i-u)` keeps the case folding ASCII-only, so `ſ` never matches `s`.
static DOSAGE_FORM_PREFIX: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^(?i-u:Tab|Tablet|Cap|Capsule|Syrup|Inj|Injection)\s+").ok()
});

/// Error type for rule building.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The regex pattern is invalid.
    #[error("invalid regex in rule '{rule}': {source}")]
    Regex {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// A rule with the same id appears twice.
    #[error("duplicate rule id: {0}")]
    DuplicateId(String),
}

/// Post-match transform applied to every match of a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cleanup {
    /// Only trim surrounding whitespace.
    #[default]
    None,
    /// Strip a leading dosage-form word ("Tab", "Capsule", ...) then trim.
    StripDosageForm,
}

impl Cleanup {
    /// Apply the transform to a raw match.
    #[must_use]
    pub fn apply(self, raw: &str) -> String {
        match self {
            Self::None => raw.trim().to_string(),
            Self::StripDosageForm => DOSAGE_FORM_PREFIX
                .as_ref()
                .map_or(raw, |re| re.find(raw).map_or(raw, |m| &raw[m.end()..]))
                .trim()
                .to_string(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::StripDosageForm => "strip_dosage_form",
        }
    }
}

/// Definition of a single extraction rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDef {
    /// Unique identifier for this rule.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Regex applied to each line; every non-overlapping match is a raw candidate.
    pub pattern: String,

    /// Transform applied to each match before filtering.
    #[serde(default)]
    pub cleanup: Cleanup,
}

impl RuleDef {
    /// Compile into a `PatternRule`.
    ///
    /// # Errors
    /// Returns an error if the regex pattern is invalid.
    pub fn build(&self) -> Result<PatternRule, BuildError> {
        let regex = Regex::new(&self.pattern).map_err(|source| BuildError::Regex {
            rule: self.id.clone(),
            source,
        })?;

        Ok(PatternRule {
            id: self.id.clone(),
            name: self.name.clone(),
            regex,
            cleanup: self.cleanup,
        })
    }
}

/// A compiled extraction rule.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub id: String,
    pub name: String,
    pub regex: Regex,
    pub cleanup: Cleanup,
}

impl PatternRule {
    /// Cleaned matches of this rule within a single line, in match order.
    pub fn matches<'a>(&'a self, line: &'a str) -> impl Iterator<Item = String> + 'a {
        self.regex
            .find_iter(line)
            .map(|m| self.cleanup.apply(m.as_str()))
    }
}

/// The default rule set, in the order it must be applied.
///
/// Order matters: dedup keeps the first variant seen, so reordering these
/// changes which spelling of a name survives. Every rule strips a leading
/// dosage-form word, so "TAB CROCIN" from the all-caps rule collapses onto
/// the dosage-form match. Word boundaries are ASCII-only so accented OCR
/// noise next to a name does not hide it.
#[must_use]
pub fn default_rules() -> Vec<RuleDef> {
    vec![
        RuleDef {
            id: "suffix".to_string(),
            name: "pharmacological_suffix".to_string(),
            pattern: r"(?-u:\b)[A-Z][a-z]+(?:zole|cillin|mycin|floxacin|pril|olol|azole|pine|stat|tin|fen|dine)(?-u:\b)"
                .to_string(),
            cleanup: Cleanup::StripDosageForm,
        },
        RuleDef {
            id: "dosage_form".to_string(),
            name: "dosage_form_prefix".to_string(),
            pattern: r"(?-u:\b)(?i-u:Tab|Tablet|Cap|Capsule|Syrup|Inj|Injection)\s+[A-Za-z][A-Za-z]+(?:\s+[A-Za-z][A-Za-z]+)?"
                .to_string(),
            cleanup: Cleanup::StripDosageForm,
        },
        RuleDef {
            id: "all_caps".to_string(),
            name: "all_caps_brand".to_string(),
            pattern: r"(?-u:\b)[A-Z]{2,}(?:\s+[A-Z]+)?(?:\s+[0-9]+(?:mg|mcg|ml|g))?".to_string(),
            cleanup: Cleanup::StripDosageForm,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_dosage_form_removes_prefix() {
        assert_eq!(
            Cleanup::StripDosageForm.apply("Tab Amoxicillin"),
            "Amoxicillin"
        );
        assert_eq!(Cleanup::StripDosageForm.apply("TABLET Foo Bar"), "Foo Bar");
        assert_eq!(
            Cleanup::StripDosageForm.apply("injection  Insulin "),
            "Insulin"
        );
    }

    #[test]
    fn strip_dosage_form_leaves_other_text() {
        assert_eq!(Cleanup::StripDosageForm.apply("Tablets"), "Tablets");
        assert_eq!(Cleanup::StripDosageForm.apply(" Paracetamol "), "Paracetamol");
    }

    #[test]
    fn cleanup_none_only_trims() {
        assert_eq!(Cleanup::None.apply("  Tab Foo  "), "Tab Foo");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn default_rules_compile_in_order() {
        let rules = default_rules()
            .iter()
            .map(RuleDef::build)
            .collect::<Result<Vec<_>, _>>()
            .expect("default rules should compile");

        let ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["suffix", "dosage_form", "all_caps"]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn dosage_form_rule_is_case_insensitive() {
        let rule = default_rules()[1].build().expect("rule should compile");
        let found: Vec<String> = rule.matches("take tablet paracetamol daily").collect();
        assert_eq!(found, ["paracetamol daily"]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn all_caps_rule_takes_dosage() {
        let rule = default_rules()[2].build().expect("rule should compile");
        let found: Vec<String> = rule.matches("CROCIN 500mg twice").collect();
        assert_eq!(found, ["CROCIN 500mg"]);
    }

    #[test]
    fn every_default_rule_strips_dosage_forms() {
        assert!(
            default_rules()
                .iter()
                .all(|r| r.cleanup == Cleanup::StripDosageForm)
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn all_caps_rule_drops_uppercase_dosage_form() {
        let rule = default_rules()[2].build().expect("rule should compile");
        let found: Vec<String> = rule.matches("TABLET PARACETAMOL 500mg").collect();
        assert_eq!(found, ["PARACETAMOL 500mg"]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn word_boundaries_ignore_non_ascii_neighbours() {
        let suffix = default_rules()[0].build().expect("rule should compile");
        let found: Vec<String> = suffix.matches("Amoxicillinä").collect();
        assert_eq!(found, ["Amoxicillin"]);

        let dosage = default_rules()[1].build().expect("rule should compile");
        let found: Vec<String> = dosage.matches("éTab Foovar").collect();
        assert_eq!(found, ["Foovar"]);
    }

    #[test]
    fn invalid_regex_is_reported() {
        let def = RuleDef {
            id: "broken".to_string(),
            name: "broken".to_string(),
            pattern: r"[A-Z".to_string(),
            cleanup: Cleanup::None,
        };

        let err = def.build().err();
        assert!(matches!(err, Some(BuildError::Regex { ref rule, .. }) if rule == "broken"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn rule_def_serialization() {
        let def = default_rules().remove(1);
        let json = serde_json::to_string(&def).expect("rule should serialize");
        assert!(json.contains("\"strip_dosage_form\""));

        let back: RuleDef = serde_json::from_str(&json).expect("valid JSON should deserialize");
        assert_eq!(back, def);
    }
}
