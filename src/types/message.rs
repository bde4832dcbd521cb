use serde::{Deserialize, Serialize};

/// Role of a conversation message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System role. At most one per conversation, always first.
    System,

    /// User role.
    User,

    /// Assistant role.
    Assistant,
}

/// A message stored in conversation history.
///
/// Immutable once appended; the in-progress assistant message is not
/// represented here because partial turns are never committed to history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// The role of the message.
    pub role: Role,

    /// The visible text. For assistant messages this is the extracted answer
    /// only, never the reasoning segment.
    pub content: String,

    /// The reasoning segment, present only on assistant messages where one
    /// was detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            reasoning: None,
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            reasoning: None,
        }
    }

    /// Creates an assistant message with no reasoning segment.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            reasoning: None,
        }
    }

    /// Creates an assistant message with an optional reasoning segment.
    pub fn assistant_with_reasoning(
        content: impl Into<String>,
        reasoning: Option<String>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            reasoning,
        }
    }
}

/// The exact `{role, content}` payload sent to the model endpoint.
///
/// Reasoning segments are local display state and are stripped when history
/// is serialized for a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageParam {
    /// The role of the message.
    pub role: Role,

    /// The content of the message.
    pub content: String,
}

impl From<&Message> for MessageParam {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}
