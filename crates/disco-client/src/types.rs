//! Wire types for the discount code backend.
//!
//! Request: `{"prompt": "Find current discount codes for <domain>"}`.
//! Response: `{"codes": [{"code", "description", "conditions",
//! "has_description", "has_conditions"}, ...]}`. Every field of a code is
//! required; a missing one makes the whole body undecodable.

use disco_core::CodeRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Top-level response body. An empty `codes` array is a valid answer.
#[derive(Debug, Deserialize)]
pub struct CodesResponse {
    pub codes: Vec<CodeRecord>,
}
