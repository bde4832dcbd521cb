//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use arrrg_derive::CommandLine;

use crate::types::{KnownModel, Model};

/// Default sampling temperature: near-deterministic for reasoning models.
const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default nucleus sampling value.
const DEFAULT_TOP_P: f32 = 0.1;

/// Command-line arguments for the cogito-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: DeepSeek-R1)", "MODEL")]
    pub model: Option<String>,

    /// System prompt to set context for the conversation.
    #[arrrg(optional, "System prompt for the conversation", "PROMPT")]
    pub system: Option<String>,

    /// Sampling temperature.
    #[arrrg(optional, "Sampling temperature 0.0-1.0 (default: 0.1)", "TEMP")]
    pub temperature: Option<f32>,

    /// Nucleus sampling value.
    #[arrrg(optional, "Top-p nucleus sampling 0.0-1.0 (default: 0.1)", "TOPP")]
    pub top_p: Option<f32>,

    /// Maximum tokens per response.
    #[arrrg(optional, "Max tokens per response (default: unlimited)", "TOKENS")]
    pub max_tokens: Option<u32>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

// The `CommandLine` trait requires `Eq`, which cannot be derived because of
// the `f32` fields.
impl Eq for ChatArgs {}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: Model,

    /// Optional system prompt to start the session with.
    pub system_prompt: Option<String>,

    /// Sampling temperature, sent on every request.
    pub temperature: f32,

    /// Nucleus sampling value, sent on every request.
    pub top_p: f32,

    /// Maximum tokens per response, if limited.
    pub max_tokens: Option<u32>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: DeepSeek-R1
    /// - Temperature: 0.1
    /// - Top-p: 0.1
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: Model::Known(KnownModel::DeepSeekR1),
            system_prompt: None,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_tokens: None,
            use_color: true,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = Some(prompt);
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the top-p value.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Sets the maximum tokens per response.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let model = args
            .model
            .map(|s| Model::from_name(&s))
            .unwrap_or(Model::Known(KnownModel::DeepSeekR1));

        ChatConfig {
            model,
            system_prompt: args.system,
            temperature: args.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: args.top_p.unwrap_or(DEFAULT_TOP_P),
            max_tokens: args.max_tokens,
            use_color: !args.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.model, Model::Known(KnownModel::DeepSeekR1));
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.top_p, 0.1);
        assert!(config.use_color);
        assert!(config.system_prompt.is_none());
        assert!(config.max_tokens.is_none());
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::DeepSeekR1));
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.top_p, 0.1);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            model: Some("Qwen3-32B".to_string()),
            system: Some("You are helpful.".to_string()),
            temperature: Some(0.7),
            top_p: Some(0.9),
            max_tokens: Some(4096),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::Qwen332B));
        assert_eq!(config.system_prompt, Some("You are helpful.".to_string()));
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_p, 0.9);
        assert_eq!(config.max_tokens, Some(4096));
        assert!(!config.use_color);
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_model(Model::from_name("DeepSeek-V3-0324"))
            .with_system_prompt("Test prompt".to_string())
            .with_temperature(0.6)
            .with_top_p(0.9)
            .with_max_tokens(2048)
            .without_color();

        assert_eq!(config.model, Model::Known(KnownModel::DeepSeekV30324));
        assert_eq!(config.system_prompt, Some("Test prompt".to_string()));
        assert_eq!(config.temperature, 0.6);
        assert_eq!(config.top_p, 0.9);
        assert_eq!(config.max_tokens, Some(2048));
        assert!(!config.use_color);
    }
}
