// Public modules
pub mod chat;
pub mod client;
pub mod error;
pub mod observability;
pub mod render;
pub mod segment;
pub mod sse;
pub mod types;

// Re-exports
pub use client::{API_KEY_ENV, SambaNova};
pub use error::{Error, Result};
pub use render::{PlainTextRenderer, Renderer};
pub use segment::{Segments, THINK_CLOSE, THINK_OPEN, segment};
pub use types::*;
