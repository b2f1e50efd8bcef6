//! Discount code records as returned by the backend.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Description shown when the backend returned no description for a code.
pub const FALLBACK_DESCRIPTION: &str = "Use this code to save money on your order";

/// One discount code candidate.
///
/// The `has_*` flags tell "field absent" apart from "field empty"; the
/// backend always sends the string fields, but only the flags say whether
/// they carry anything worth showing. Order is significant and content is
/// not guaranteed unique, so there is no identity beyond position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRecord {
    pub code: String,
    pub description: String,
    pub conditions: String,
    pub has_description: bool,
    pub has_conditions: bool,
}

impl CodeRecord {
    /// Description text for display, falling back to a generic line.
    #[must_use]
    pub fn display_description(&self) -> &str {
        if self.has_description {
            &self.description
        } else {
            FALLBACK_DESCRIPTION
        }
    }

    /// Conditions text for display, if the backend supplied any.
    #[must_use]
    pub fn display_conditions(&self) -> Option<&str> {
        self.has_conditions.then_some(self.conditions.as_str())
    }

    /// Synthesizes a list key from the record's position and content.
    ///
    /// Two identical records at different positions get different keys;
    /// the same record at the same position always gets the same key.
    #[must_use]
    pub fn row_id(&self, index: usize) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.code.as_bytes());
        hasher.update([0]);
        hasher.update(self.description.as_bytes());
        hasher.update([0]);
        hasher.update(self.conditions.as_bytes());
        let digest = hasher.finalize();
        let short: String = digest[..6].iter().map(|b| format!("{b:02x}")).collect();
        format!("{index}-{short}")
    }
}

/// Outcome of one fetch attempt. Produced exactly once per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Success(Vec<CodeRecord>),
    Failure(String),
}

impl FetchResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, has_description: bool, has_conditions: bool) -> CodeRecord {
        CodeRecord {
            code: code.to_owned(),
            description: "20% off sitewide".to_owned(),
            conditions: "Orders over $50".to_owned(),
            has_description,
            has_conditions,
        }
    }

    #[test]
    fn display_description_falls_back_when_absent() {
        let r = record("SAVE20", false, false);
        assert_eq!(r.display_description(), FALLBACK_DESCRIPTION);
        assert_eq!(r.display_conditions(), None);
    }

    #[test]
    fn display_fields_used_when_present() {
        let r = record("SAVE20", true, true);
        assert_eq!(r.display_description(), "20% off sitewide");
        assert_eq!(r.display_conditions(), Some("Orders over $50"));
    }

    #[test]
    fn row_id_distinguishes_duplicate_records_by_position() {
        let r = record("SAVE20", true, true);
        assert_ne!(r.row_id(0), r.row_id(1));
        assert_eq!(r.row_id(3), r.row_id(3));
        assert!(r.row_id(0).starts_with("0-"));
    }

    #[test]
    fn row_id_changes_with_content() {
        let a = record("SAVE20", true, true);
        let b = record("SAVE25", true, true);
        assert_ne!(a.row_id(0), b.row_id(0));
    }

    #[test]
    fn deserializes_backend_shape() {
        let json = r#"{"code":"WELCOME10","description":"","conditions":"","has_description":false,"has_conditions":false}"#;
        let r: CodeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.code, "WELCOME10");
        assert!(!r.has_description);
    }
}
