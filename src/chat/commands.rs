//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the model.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Start (or restart) the session with a system prompt.
    Start(String),

    /// Clear the conversation history and return to the unstarted state.
    Clear,

    /// Show the current system prompt.
    System,

    /// Change the model.
    Model(String),

    /// Set the sampling temperature.
    Temperature(f32),

    /// Set the top-p value.
    TopP(f32),

    /// Display session statistics (message count, current model, etc.).
    Stats,

    /// Show the current configuration.
    ShowConfig,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use cogito::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/start You are a pirate").is_some());
/// assert!(parse_command("Hello!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "start" => match argument {
            Some(prompt) => ChatCommand::Start(prompt.to_string()),
            None => ChatCommand::Invalid("/start requires a system prompt".to_string()),
        },
        "clear" => ChatCommand::Clear,
        "system" => ChatCommand::System,
        "model" => match argument {
            Some(model) => ChatCommand::Model(model.to_string()),
            None => ChatCommand::Invalid("/model requires a model name".to_string()),
        },
        "temperature" | "temp" => parse_sampling_value(argument, "temperature")
            .map(ChatCommand::Temperature)
            .unwrap_or_else(ChatCommand::Invalid),
        "top_p" | "topp" => parse_sampling_value(argument, "top_p")
            .map(ChatCommand::TopP)
            .unwrap_or_else(ChatCommand::Invalid),
        "stats" => ChatCommand::Stats,
        "config" => ChatCommand::ShowConfig,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{command}")),
    };

    Some(result)
}

/// Parses a sampling parameter argument and checks its range.
fn parse_sampling_value(
    argument: Option<&str>,
    name: &str,
) -> std::result::Result<f32, String> {
    let Some(raw) = argument else {
        return Err(format!("/{name} requires a value between 0.0 and 1.0"));
    };
    match raw.parse::<f32>() {
        Ok(value) if (0.0..=1.0).contains(&value) => Ok(value),
        Ok(value) => Err(format!("/{name} must be between 0.0 and 1.0, got {value}")),
        Err(_) => Err(format!("/{name}: '{raw}' is not a number")),
    }
}

/// Returns the help text listing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /start <prompt>        Start a new conversation with the given system prompt
  /clear                 Clear conversation history and return to setup
  /system                Show the current system prompt
  /model <name>          Change the model (e.g., /model DeepSeek-R1)
  /temperature <v>       Set temperature 0.0-1.0
  /top_p <v>             Set top-p 0.0-1.0
  /stats                 Show session statistics
  /config                Show current configuration
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_clear() {
        assert_eq!(parse_command("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse_command("/CLEAR"), Some(ChatCommand::Clear));
    }

    #[test]
    fn parse_start() {
        assert_eq!(
            parse_command("/start You are a helpful assistant"),
            Some(ChatCommand::Start("You are a helpful assistant".to_string()))
        );
        assert!(matches!(
            parse_command("/start"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_system_takes_no_argument() {
        assert_eq!(parse_command("/system"), Some(ChatCommand::System));
    }

    #[test]
    fn parse_model() {
        assert_eq!(
            parse_command("/model DeepSeek-R1"),
            Some(ChatCommand::Model("DeepSeek-R1".to_string()))
        );
        assert!(matches!(
            parse_command("/model"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_temperature() {
        assert_eq!(
            parse_command("/temperature 0.5"),
            Some(ChatCommand::Temperature(0.5))
        );
        assert_eq!(
            parse_command("/temp 1.0"),
            Some(ChatCommand::Temperature(1.0))
        );
        assert!(matches!(
            parse_command("/temperature 1.5"),
            Some(ChatCommand::Invalid(_))
        ));
        assert!(matches!(
            parse_command("/temperature abc"),
            Some(ChatCommand::Invalid(_))
        ));
        assert!(matches!(
            parse_command("/temperature"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_top_p() {
        assert_eq!(parse_command("/top_p 0.25"), Some(ChatCommand::TopP(0.25)));
        assert_eq!(parse_command("/topp 0.25"), Some(ChatCommand::TopP(0.25)));
        assert!(matches!(
            parse_command("/top_p -1"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_help_and_stats() {
        assert_eq!(parse_command("/help"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/?"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/stats"), Some(ChatCommand::Stats));
        assert_eq!(parse_command("/config"), Some(ChatCommand::ShowConfig));
    }

    #[test]
    fn unknown_command_is_invalid() {
        assert!(matches!(
            parse_command("/frobnicate"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn regular_messages_are_not_commands() {
        assert_eq!(parse_command("Hello!"), None);
        assert_eq!(parse_command("What is 2/2?"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(!help.is_empty());
        assert!(help.contains("/quit"));
        assert!(help.contains("/clear"));
        assert!(help.contains("/start"));
        assert!(help.contains("/temperature"));
    }
}
