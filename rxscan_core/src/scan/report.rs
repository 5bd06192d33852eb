use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::links::{SearchLink, link_candidates};

/// Shown when a scan finds no candidates.
pub const NO_MEDICINES_MESSAGE: &str =
    "No medicines detected. Please ensure the prescription is clear and try again.";

/// Outcome of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub id: Uuid,
    pub scanned_at: DateTime<Utc>,
    /// SHA-256 of the scanned image; `None` when the input was plain text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_digest: Option<String>,
    pub medicines: Vec<SearchLink>,
}

impl ScanReport {
    #[must_use]
    pub fn new(image_digest: Option<String>, candidates: Vec<String>, base_url: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            scanned_at: Utc::now(),
            image_digest,
            medicines: link_candidates(base_url, candidates),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.medicines.iter().map(|m| m.name.as_str()).collect()
    }

    /// One-line description for logs and terminal output.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.medicines.len() {
            0 => NO_MEDICINES_MESSAGE.to_string(),
            1 => "Found 1 medicine".to_string(),
            n => format!("Found {n} medicines"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::DEFAULT_MARKETPLACE_URL;

    #[test]
    fn empty_report_uses_no_medicines_message() {
        let report = ScanReport::new(None, Vec::new(), DEFAULT_MARKETPLACE_URL);
        assert!(report.is_empty());
        assert_eq!(report.summary(), NO_MEDICINES_MESSAGE);
    }

    #[test]
    fn summary_counts_medicines() {
        let one = ScanReport::new(None, vec!["Omeprazole".into()], DEFAULT_MARKETPLACE_URL);
        assert_eq!(one.summary(), "Found 1 medicine");

        let two = ScanReport::new(
            None,
            vec!["Omeprazole".into(), "Amoxicillin".into()],
            DEFAULT_MARKETPLACE_URL,
        );
        assert_eq!(two.summary(), "Found 2 medicines");
        assert_eq!(two.names(), ["Omeprazole", "Amoxicillin"]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn text_reports_omit_digest_in_json() {
        let report = ScanReport::new(None, vec!["Omeprazole".into()], DEFAULT_MARKETPLACE_URL);
        let json = serde_json::to_value(&report).expect("report should serialize");
        assert!(json.get("image_digest").is_none());
        assert_eq!(json["medicines"][0]["name"], "Omeprazole");
    }
}
