// Public modules
pub mod completion;
pub mod completion_chunk;
pub mod completion_request;
pub mod message;
pub mod model;
pub mod usage;

// Re-exports
pub use completion::{Choice, Completion};
pub use completion_chunk::{ChunkChoice, ChunkDelta, CompletionChunk};
pub use completion_request::CompletionCreateParams;
pub use message::{Message, MessageParam, Role};
pub use model::{KnownModel, Model};
pub use usage::Usage;
