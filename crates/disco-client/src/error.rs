use thiserror::Error;

/// Failures of a single code lookup.
///
/// The `Display` text of each variant is what the user sees, so it stays
/// short. Raw response bodies never appear here; they are only logged.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint or request could not be constructed.
    #[error("Invalid URL: {0}")]
    InvalidRequest(String),

    /// Transport failure: timeout, no connectivity, TLS.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with something other than HTTP 200.
    #[error("Invalid response from server (HTTP {status})")]
    InvalidResponse { status: u16 },

    /// HTTP 200, but the body is not the expected JSON shape.
    #[error("Failed to decode response")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from parsing deep links and shared URLs.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid URL \"{input}\": {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("unsupported link \"{0}\": expected disco://showcodes")]
    Unsupported(String),

    #[error("link \"{0}\" has no domain parameter")]
    MissingDomain(String),

    #[error("shared URL \"{0}\" has no host")]
    MissingHost(String),
}
