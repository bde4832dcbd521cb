use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{MessageParam, Model};

/// Parameters for a chat completion request.
///
/// Serializes to the OpenAI-compatible `/chat/completions` request body used
/// by the SambaNova Cloud API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionCreateParams {
    /// The model to generate the completion with.
    pub model: Model,

    /// Ordered conversation history, system message first when present.
    pub messages: Vec<MessageParam>,

    /// Sampling temperature, expected in [0.0, 1.0].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling value, expected in [0.0, 1.0].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Maximum tokens to generate, if limited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Whether the response should be streamed as SSE deltas.
    #[serde(default)]
    pub stream: bool,
}

impl CompletionCreateParams {
    /// Creates request parameters for the given model and history.
    pub fn new(model: Model, messages: Vec<MessageParam>) -> Self {
        Self {
            model,
            messages,
            temperature: None,
            top_p: None,
            max_tokens: None,
            stream: false,
        }
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the top-p value.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets the maximum tokens per response.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Checks the sampling parameters against their expected ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(temperature) = self.temperature
            && !(0.0..=1.0).contains(&temperature)
        {
            return Err(Error::validation(
                format!("temperature must be in [0.0, 1.0], got {temperature}"),
                Some("temperature".to_string()),
            ));
        }
        if let Some(top_p) = self.top_p
            && !(0.0..=1.0).contains(&top_p)
        {
            return Err(Error::validation(
                format!("top_p must be in [0.0, 1.0], got {top_p}"),
                Some("top_p".to_string()),
            ));
        }
        Ok(())
    }
}
