//! Domain normalization for discount code lookups.

use serde::{Deserialize, Serialize};

/// Reduces a host to its last two dot-separated labels.
///
/// `"checkout.nike.com"` and `"shop.nike.com"` both become `"nike.com"`.
/// Hosts with fewer than two labels pass through unchanged.
#[must_use]
pub fn extract_main_domain(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return host.to_owned();
    }
    labels[labels.len() - 2..].join(".")
}

/// A normalized domain ready to be issued to the fetch pipeline.
///
/// Built from user input, a deep link, or a shared URL's host. The value is
/// trimmed of whitespace, has any trailing root dot removed, and is reduced
/// with [`extract_main_domain`]. It cannot change once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainQuery(String);

impl DomainQuery {
    /// Normalizes `raw` into a query, or returns `None` when nothing is left
    /// after trimming or the host has an empty label (`"nike..com"`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let host = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if host.is_empty() || host.split('.').any(str::is_empty) {
            return None;
        }
        Some(Self(extract_main_domain(host)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The natural-language prompt sent to the backend for this domain.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("Find current discount codes for {}", self.0)
    }
}

impl std::fmt::Display for DomainQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
