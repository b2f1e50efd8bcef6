//! Remote discount code fetcher and app link handling.
//!
//! [`DiscountCodeClient`] posts a prompt for one domain and decodes the
//! backend's list of codes. It makes a single attempt per call; retrying is
//! left to the user, who starts a fresh lookup.

pub mod client;
pub mod error;
pub mod links;
pub mod types;

pub use client::{CodeFetcher, DiscountCodeClient};
pub use error::{FetchError, LinkError};
pub use links::{build_deep_link, host_from_shared_url, parse_deep_link};
pub use types::{CodesResponse, PromptRequest};
