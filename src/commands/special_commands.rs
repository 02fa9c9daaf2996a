//! Special commands parser for interactive chat mode
//!
//! Lines typed during a chat session that start with `/` are handled
//! locally instead of being sent to the model. Commands are
//! case-insensitive; bare `exit` and `quit` are accepted as well. A line
//! starting with `//` is sent to the model with one slash removed.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands, or start the line with '//' to send it as a message")]
    UnknownCommand(String),

    /// Command does not take an argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Save the current conversation to the history file
    Save,

    /// Finish the current conversation and start a fresh one
    New,

    /// Clear the terminal and redraw the banner
    Clear,

    /// Show the active conversation and its metadata
    Status,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send the input to the model
    None,

    /// Escaped input; send the contained text to the model
    Literal(String),
}

const COMMANDS: &[&str] = &["/save", "/new", "/clear", "/status", "/help", "/exit", "/quit"];

/// Parse user input into a special command
///
/// # Examples
///
/// ```
/// use lhammai::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/save").unwrap(), SpecialCommand::Save);
/// assert_eq!(parse_special_command("hello").unwrap(), SpecialCommand::None);
/// ```
///
/// # Errors
///
/// Returns `CommandError` for unknown `/` commands or arguments given to
/// commands that take none
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    if let Some(escaped) = trimmed.strip_prefix("//") {
        return Ok(SpecialCommand::Literal(format!("/{}", escaped)));
    }

    let (command, arg) = match lower.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (lower.as_str(), ""),
    };

    if !arg.is_empty() && COMMANDS.contains(&command) {
        return Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        });
    }

    match command {
        "/save" => Ok(SpecialCommand::Save),
        "/new" => Ok(SpecialCommand::New),
        "/clear" => Ok(SpecialCommand::Clear),
        "/status" => Ok(SpecialCommand::Status),
        "/help" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" | "exit" | "quit" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help for the interactive chat commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

CONVERSATION:
  /save           - Save the conversation to the history file
  /new            - Start a new conversation
  /status         - Show the conversation ID, model and message count

SESSION:
  /clear          - Clear the screen
  /help           - Show this help message
  /exit, /quit    - Leave interactive mode

Any other input is sent to the model. Start a line with '//' to send a
message that begins with '/', e.g. '//usr/lib is empty, why?'.
"#
    );
}
