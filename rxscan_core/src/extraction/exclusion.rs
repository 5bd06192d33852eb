//! Words that are never valid medicine candidates.

use std::collections::HashSet;

/// Form labels commonly printed on prescriptions.
pub const DEFAULT_EXCLUDED_WORDS: &[&str] = &[
    "PATIENT",
    "NAME",
    "AGE",
    "DATE",
    "DOCTOR",
    "SIGNATURE",
    "ADDRESS",
    "PHONE",
];

/// Case-insensitive set of excluded words.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    words: HashSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_uppercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_EXCLUDED_WORDS)
    }

    /// Whether `candidate` is excluded.
    ///
    /// A candidate is excluded when its uppercase form is in the set, or when
    /// it is made of several words that are all in the set ("PATIENT NAME").
    #[must_use]
    pub fn excludes(&self, candidate: &str) -> bool {
        if self.words.is_empty() {
            return false;
        }

        let upper = candidate.to_uppercase();
        if self.words.contains(&upper) {
            return true;
        }

        let mut parts = upper.split_whitespace().peekable();
        parts.peek().is_some() && parts.all(|w| self.words.contains(w))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Excluded words in sorted order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}
