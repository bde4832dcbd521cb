//! Interactive chat support.
//!
//! This module hosts everything the chat binary needs beyond the client
//! itself: configuration, slash command parsing, and the session that owns
//! conversation history and drives streamed turns.

mod commands;
mod config;
mod session;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::{ChatSession, DEFAULT_SYSTEM_PROMPT, SessionStats, TurnOutcome};
