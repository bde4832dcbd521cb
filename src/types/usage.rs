use serde::{Deserialize, Serialize};

/// Token accounting reported by the endpoint.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt.
    #[serde(default)]
    pub prompt_tokens: u64,

    /// Tokens generated in the completion.
    #[serde(default)]
    pub completion_tokens: u64,

    /// Total tokens for the request.
    #[serde(default)]
    pub total_tokens: u64,
}
