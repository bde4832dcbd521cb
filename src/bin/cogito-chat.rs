//! Interactive chat application for conversing with reasoning models.
//!
//! This binary provides a streaming REPL interface for chatting with models
//! on SambaNova Cloud. Responses stream in as they are generated, with the
//! model's `<think>` reasoning shown dimmed and separated from the answer.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! cogito-chat
//!
//! # Specify a model
//! cogito-chat --model DeepSeek-R1
//!
//! # Set a system prompt up front
//! cogito-chat --system "You are a helpful coding assistant"
//!
//! # Disable colors (useful for piping output)
//! cogito-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/start <prompt>` - Restart with a new system prompt
//! - `/clear` - Clear conversation history
//! - `/model <name>` - Change the model
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use cogito::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, DEFAULT_SYSTEM_PROMPT, help_text,
    parse_command,
};
use cogito::{API_KEY_ENV, Model, PlainTextRenderer, Renderer, SambaNova};

/// Main entry point for the cogito-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("cogito-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    // A missing key is fatal before any conversation begins.
    let client = match SambaNova::new(None) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("Set {API_KEY_ENV} or pass an API key to continue.");
            std::process::exit(1);
        }
    };

    let initial_prompt = config.system_prompt.clone();
    let mut session = ChatSession::new(client, config);
    let mut rl = DefaultEditor::new()?;

    // Flag for interrupt handling during streaming
    let interrupted = Arc::new(AtomicBool::new(false));
    let mut renderer = PlainTextRenderer::with_color(use_color).with_interrupt(interrupted.clone());

    // Set up Ctrl+C handler
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Cogito Chat (model: {})", session.config().model);
    println!("Type /help for commands, /quit to exit\n");

    if let Some(prompt) = initial_prompt {
        session.start(&prompt);
    }

    loop {
        // Reset interrupt flag before each input
        interrupted.store(false, Ordering::Relaxed);

        // An unstarted session needs a system prompt before the first turn.
        if !session.is_started() {
            match prompt_for_system(&mut rl) {
                Ok(Some(prompt)) => session.start(&prompt),
                Ok(None) => {
                    println!("\nGoodbye!");
                    break;
                }
                Err(err) => {
                    renderer.print_error(&format!("Input error: {err}"));
                    break;
                }
            }
        }

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Start(prompt) => {
                            session.start(&prompt);
                            renderer.print_info("Conversation restarted.");
                        }
                        ChatCommand::Clear => {
                            session.clear();
                            renderer.print_info("Conversation cleared.");
                        }
                        ChatCommand::System => match session.system_prompt() {
                            Some(prompt) => {
                                renderer.print_info(&format!("System prompt: {prompt}"))
                            }
                            None => renderer.print_info("System prompt: (none)"),
                        },
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Model(model_name) => {
                            session.config_mut().model = Model::from_name(&model_name);
                            renderer.print_info(&format!("Model changed to: {}", model_name));
                        }
                        ChatCommand::Temperature(value) => {
                            session.config_mut().temperature = value;
                            renderer.print_info(&format!("temperature set to {:.2}", value));
                        }
                        ChatCommand::TopP(value) => {
                            session.config_mut().top_p = value;
                            renderer.print_info(&format!("top_p set to {:.2}", value));
                        }
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::ShowConfig => {
                            print_config(&session);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to API
                println!("Assistant:");
                if let Err(e) = session.send_streaming(line, &mut renderer).await {
                    renderer.print_error(&e.to_string());
                    if e.looks_like_credential_error() {
                        renderer.print_info(&format!(
                            "Hint: check that {API_KEY_ENV} holds a valid API key."
                        ));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

/// Ask for a system prompt; an empty line accepts the default, Ctrl+D quits.
fn prompt_for_system(rl: &mut DefaultEditor) -> Result<Option<String>, ReadlineError> {
    loop {
        match rl.readline(&format!("System prompt [{DEFAULT_SYSTEM_PROMPT}]: ")) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    return Ok(Some(DEFAULT_SYSTEM_PROMPT.to_string()));
                }
                return Ok(Some(line.to_string()));
            }
            Err(ReadlineError::Interrupted) => {
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err),
        }
    }
}

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Model: {}", session.config().model);
    println!("      Messages: {}", stats.total_messages);
    println!("      User turns: {}", stats.user_messages);
    println!("      Assistant turns: {}", stats.assistant_messages);
    println!(
        "      Turns with reasoning: {}",
        stats.reasoning_messages
    );
    match session.system_prompt() {
        Some(prompt) => println!("      System prompt: {}", prompt),
        None => println!("      System prompt: (none)"),
    }
}

fn print_config(session: &ChatSession) {
    let config = session.config();
    println!("    Configuration:");
    println!("      Model: {}", config.model);
    println!("      Temperature: {:.2}", config.temperature);
    println!("      Top-p: {:.2}", config.top_p);
    match config.max_tokens {
        Some(tokens) => println!("      Max tokens: {}", tokens),
        None => println!("      Max tokens: (unlimited)"),
    }
    println!(
        "      Colors: {}",
        if config.use_color { "on" } else { "off" }
    );
}
