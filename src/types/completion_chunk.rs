use serde::{Deserialize, Serialize};

use crate::types::{Role, Usage};

/// One incremental event from a streaming chat completion.
///
/// Chunks arrive in order and are never reordered; each carries at most one
/// text delta for the in-flight assistant turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompletionChunk {
    /// Identifier assigned by the endpoint, shared by all chunks of a stream.
    #[serde(default)]
    pub id: String,

    /// The delta-bearing choices. Empty for keep-alive or usage-only chunks.
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,

    /// Token accounting, present only on the final chunk when the endpoint
    /// reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// One choice within a streamed chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChunkChoice {
    /// Position of this choice in the response.
    #[serde(default)]
    pub index: usize,

    /// The incremental payload.
    #[serde(default)]
    pub delta: ChunkDelta,

    /// Why generation stopped, set on the last content-bearing chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// The incremental payload of a chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChunkDelta {
    /// Role, sent once on the first chunk of a stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// The text fragment, absent on role-only and finish chunks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl CompletionChunk {
    /// Returns the text delta of the first choice, if this chunk carries one.
    ///
    /// Chunks without content (role announcements, finish markers, usage
    /// reports) return `None` and are skipped by the session.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
    }
}
