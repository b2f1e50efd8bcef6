//! HTTP client for the discount code backend.

use std::time::Duration;

use async_trait::async_trait;
use disco_core::{AppConfig, CodeRecord, DomainQuery, FetchResult};
use reqwest::{Client, StatusCode, Url};

use crate::error::FetchError;
use crate::types::{CodesResponse, PromptRequest};

/// Longest slice of an undecodable body that is written to the log.
const LOGGED_BODY_CHARS: usize = 512;

/// Anything that can look up discount codes for a domain.
///
/// The loading coordinator only sees this trait, so tests can swap in a
/// scripted fetcher and never touch the network.
#[async_trait]
pub trait CodeFetcher: Send + Sync {
    /// Runs one lookup. Never retries.
    async fn fetch(&self, domain: &DomainQuery) -> FetchResult;
}

/// Client for the discount code backend.
///
/// Use [`DiscountCodeClient::from_config`] in the app or
/// [`DiscountCodeClient::new`] with a wiremock URL in tests.
pub struct DiscountCodeClient {
    client: Client,
    endpoint: Url,
}

impl DiscountCodeClient {
    /// Creates a client that posts to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] if `endpoint` is not a valid
    /// absolute URL or the underlying `reqwest::Client` cannot be built.
    pub fn new(endpoint: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint.trim())
            .map_err(|e| FetchError::InvalidRequest(format!("'{endpoint}': {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::InvalidRequest(format!("could not build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// Creates a client from the app's configured endpoint, timeout, and UA.
    ///
    /// # Errors
    ///
    /// See [`DiscountCodeClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts the lookup prompt for `domain` and decodes the returned codes.
    ///
    /// The codes keep the order the backend sent them in.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] on transport failure.
    /// - [`FetchError::InvalidResponse`] on any status other than 200.
    /// - [`FetchError::Decode`] if the body does not match the expected shape.
    pub async fn fetch_codes(&self, domain: &DomainQuery) -> Result<Vec<CodeRecord>, FetchError> {
        let request = PromptRequest {
            prompt: domain.prompt(),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::InvalidResponse {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        match serde_json::from_str::<CodesResponse>(&body) {
            Ok(decoded) => Ok(decoded.codes),
            Err(e) => {
                let excerpt: String = body.chars().take(LOGGED_BODY_CHARS).collect();
                tracing::warn!(
                    domain = %domain,
                    error = %e,
                    body = %excerpt,
                    "codes response did not match expected shape"
                );
                Err(FetchError::Decode { source: e })
            }
        }
    }
}

#[async_trait]
impl CodeFetcher for DiscountCodeClient {
    async fn fetch(&self, domain: &DomainQuery) -> FetchResult {
        match self.fetch_codes(domain).await {
            Ok(codes) => {
                tracing::info!(domain = %domain, count = codes.len(), "fetched discount codes");
                FetchResult::Success(codes)
            }
            Err(e) => {
                tracing::error!(domain = %domain, error = %e, "failed to fetch discount codes");
                FetchResult::Failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_relative_endpoint() {
        let result = DiscountCodeClient::new("codes-detailed", 5, "disco-test/0.1");
        assert!(
            matches!(result, Err(FetchError::InvalidRequest(_))),
            "expected InvalidRequest"
        );
    }

    #[test]
    fn new_keeps_endpoint_path() {
        let client = DiscountCodeClient::new(
            "https://disco-backend.vercel.app/codes-detailed-chatgpt",
            5,
            "disco-test/0.1",
        )
        .expect("client construction should not fail");
        assert_eq!(client.endpoint().path(), "/codes-detailed-chatgpt");
    }

    #[test]
    fn invalid_request_message_is_short() {
        let err = FetchError::InvalidRequest("'x': relative URL without a base".to_owned());
        assert!(err.to_string().starts_with("Invalid URL"));
    }

    #[test]
    fn invalid_response_message_names_status() {
        let err = FetchError::InvalidResponse { status: 503 };
        assert_eq!(err.to_string(), "Invalid response from server (HTTP 503)");
    }
}
