//! `disco://showcodes?domain=<d>` deep links and the share flow that
//! produces them.

use disco_core::DomainQuery;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;

use crate::error::LinkError;

pub const DEEP_LINK_SCHEME: &str = "disco";
pub const DEEP_LINK_HOST: &str = "showcodes";

/// Characters left unescaped in the `domain` query value.
const DOMAIN_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'-').remove(b'_');

/// Parses an inbound deep link into a normalized domain query.
///
/// # Errors
///
/// - [`LinkError::InvalidUrl`] if `input` is not a URL.
/// - [`LinkError::Unsupported`] for any scheme or host other than
///   `disco://showcodes`.
/// - [`LinkError::MissingDomain`] if the `domain` parameter is absent or blank.
pub fn parse_deep_link(input: &str) -> Result<DomainQuery, LinkError> {
    let url = Url::parse(input.trim()).map_err(|e| LinkError::InvalidUrl {
        input: input.to_owned(),
        reason: e.to_string(),
    })?;

    if url.scheme() != DEEP_LINK_SCHEME || url.host_str() != Some(DEEP_LINK_HOST) {
        return Err(LinkError::Unsupported(input.to_owned()));
    }

    let raw = url
        .query_pairs()
        .find(|(k, _)| k == "domain")
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| LinkError::MissingDomain(input.to_owned()))?;

    let query = DomainQuery::parse(&raw).ok_or_else(|| LinkError::MissingDomain(input.to_owned()))?;
    tracing::info!(from = %raw, domain = %query, "deep link resolved");
    Ok(query)
}

/// Builds the deep link that opens the app on `domain`'s codes.
#[must_use]
pub fn build_deep_link(domain: &str) -> String {
    format!(
        "{DEEP_LINK_SCHEME}://{DEEP_LINK_HOST}?domain={}",
        utf8_percent_encode(domain, DOMAIN_VALUE)
    )
}

/// Extracts the host from a URL shared into the app.
///
/// Input without a scheme (`"nike.com/sale"`) is read as `https`.
///
/// # Errors
///
/// - [`LinkError::InvalidUrl`] if `input` cannot be parsed.
/// - [`LinkError::MissingHost`] if the URL has no host.
pub fn host_from_shared_url(input: &str) -> Result<String, LinkError> {
    let trimmed = input.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&candidate).map_err(|e| LinkError::InvalidUrl {
        input: input.to_owned(),
        reason: e.to_string(),
    })?;

    url.host_str()
        .filter(|h| !h.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| LinkError::MissingHost(input.to_owned()))
}
