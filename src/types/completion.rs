use serde::{Deserialize, Serialize};

use crate::types::{MessageParam, Usage};

/// A non-streaming chat completion response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Completion {
    /// Identifier assigned by the endpoint.
    #[serde(default)]
    pub id: String,

    /// The generated choices. The API returns exactly one for chat use.
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Model that produced the response, as reported by the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Token accounting for the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// One generated alternative within a completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    /// Position of this choice in the response.
    #[serde(default)]
    pub index: usize,

    /// The full generated message.
    pub message: MessageParam,

    /// Why generation stopped, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl Completion {
    /// Returns the content of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.message.content.as_str())
    }
}
