/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `ask`     : Send one prompt and print the reply
- `chat`    : Interactive chat mode
- `history` : List, show, delete and clear saved conversations

Both `ask` and `chat` record each exchange in a `ConversationStore` and
save it according to the history settings.
*/

use crate::error::Result;
use crate::history::{ConversationStore, Role};
use crate::providers::Provider;

// Saved conversation management
pub mod history;

// Special commands parser for interactive mode
pub mod special_commands;

/// Send `prompt` with the active conversation as context
///
/// The user message is recorded before the request. The reply is recorded
/// only when the provider succeeds, so a failed request leaves the prompt
/// in the transcript without an answer.
///
/// # Errors
///
/// Returns the provider error, or a history error if no conversation is
/// active
pub async fn exchange(
    store: &ConversationStore,
    provider: &dyn Provider,
    prompt: &str,
) -> Result<String> {
    store.add_message(Role::User, prompt)?;
    let conversation = store.get_current_conversation()?;

    tracing::debug!(
        "Sending {} messages to {}",
        conversation.messages.len(),
        provider.name()
    );
    let reply = provider.complete(&conversation.messages).await?;

    store.add_message(Role::Assistant, reply.as_str())?;
    Ok(reply)
}

// One-shot prompt handler
pub mod ask {
    //! One-shot prompt handler.
    //!
    //! Starts a fresh conversation, sends a single prompt and prints the
    //! reply in a panel.

    use super::*;
    use crate::config::Config;
    use crate::providers::create_provider;
    use crate::ui::{draw_panel, PanelKind};

    /// Run a single prompt
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `prompt` - Text to send
    /// * `model` - Optional `provider:model` override
    /// * `api_base` - Optional endpoint override
    /// * `no_save` - Skip writing the exchange to the history file
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid, the provider fails or
    /// the history file cannot be written
    pub async fn run_ask(
        config: Config,
        prompt: String,
        model: Option<String>,
        api_base: Option<String>,
        no_save: bool,
    ) -> Result<()> {
        let config = config.with_provider_overrides(model, api_base);
        config.validate()?;

        let provider = create_provider(&config.provider)?;
        let store = ConversationStore::start_new(
            config.history.resolve_file()?,
            &config.provider.model,
            &config.provider.api_base,
        );

        let reply = exchange(&store, provider.as_ref(), &prompt).await?;
        println!("{}", draw_panel(&reply, PanelKind::Assistant));

        if config.history.auto_save && !no_save {
            store.save_to_disk()?;
            if let Some(id) = store.get_current_identifier() {
                tracing::info!(
                    "Saved conversation {} to {}",
                    id,
                    store.history_file().display()
                );
            }
        }

        Ok(())
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Runs a readline loop that sends each line to the provider and keeps
    //! the whole exchange in one conversation. Lines starting with `/` are
    //! special commands (see [`super::special_commands`]).

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::config::Config;
    use crate::providers::create_provider;
    use crate::ui::{draw_panel, render_transcript, welcome_banner, PanelKind};
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `model` - Optional `provider:model` override
    /// * `api_base` - Optional endpoint override
    /// * `resume` - Optional ID of a saved conversation to continue
    /// * `no_save` - Never write the session to the history file
    ///
    /// When resuming, the saved conversation's model and endpoint are used
    /// unless overridden on the command line.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid, the conversation to
    /// resume cannot be loaded, or the line editor fails to start
    pub async fn run_chat(
        config: Config,
        model: Option<String>,
        api_base: Option<String>,
        resume: Option<String>,
        no_save: bool,
    ) -> Result<()> {
        let store = ConversationStore::open(config.history.resolve_file()?);

        let (model, api_base) = match &resume {
            Some(id) => {
                store.resume(id.as_str())?;
                let saved = store.get_current_conversation()?.metadata;
                (model.or(Some(saved.model)), api_base.or(Some(saved.api_base)))
            }
            None => (model, api_base),
        };

        let config = config.with_provider_overrides(model, api_base);
        config.validate()?;
        let provider = create_provider(&config.provider)?;

        if resume.is_none() {
            store.begin(&config.provider.model, &config.provider.api_base)?;
        }

        let auto_save = config.history.auto_save && !no_save;
        if !auto_save {
            tracing::debug!("Auto-save disabled for this session");
        }

        let mut rl = DefaultEditor::new()?;

        println!(
            "{}",
            welcome_banner(&config.provider.model, &config.provider.api_base)
        );
        if resume.is_some() {
            if let Some(id) = store.get_current_identifier() {
                print!("{}", render_transcript(&id, &store.get_current_conversation()?));
            }
        }

        let prompt = format!("{} ", "🌟 You:".bold().yellow());

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::Help) => print_help(),
                        Ok(SpecialCommand::Clear) => {
                            print!("\x1B[2J\x1B[1;1H");
                            println!(
                                "{}",
                                welcome_banner(&config.provider.model, &config.provider.api_base)
                            );
                        }
                        Ok(SpecialCommand::Status) => match format_status(&store, auto_save) {
                            Ok(status) => println!("{}", draw_panel(&status, PanelKind::Info)),
                            Err(e) => println!("{}", draw_panel(&e.to_string(), PanelKind::Error)),
                        },
                        Ok(SpecialCommand::Save) => match store.save_to_disk() {
                            Ok(()) => println!(
                                "{}",
                                draw_panel(
                                    &format!(
                                        "Conversation saved to {}",
                                        store.history_file().display()
                                    ),
                                    PanelKind::Success
                                )
                            ),
                            Err(e) => println!("{}", draw_panel(&e.to_string(), PanelKind::Error)),
                        },
                        Ok(SpecialCommand::New) => {
                            let id =
                                store.begin(&config.provider.model, &config.provider.api_base)?;
                            println!(
                                "{}",
                                draw_panel(
                                    &format!("Started new conversation {}", id),
                                    PanelKind::Info
                                )
                            );
                        }
                        Ok(SpecialCommand::None) => {
                            send_turn(&store, provider.as_ref(), trimmed, auto_save).await
                        }
                        Ok(SpecialCommand::Literal(text)) => {
                            send_turn(&store, provider.as_ref(), &text, auto_save).await
                        }
                        Err(e) => println!("{}", draw_panel(&e.to_string(), PanelKind::Error)),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Send one chat line and print the reply or the error
    pub(crate) async fn send_turn(
        store: &ConversationStore,
        provider: &dyn Provider,
        text: &str,
        auto_save: bool,
    ) {
        match exchange(store, provider, text).await {
            Ok(reply) => {
                println!("{}", draw_panel(&reply, PanelKind::Assistant));
                if auto_save {
                    if let Err(e) = store.save_to_disk() {
                        tracing::warn!("Auto-save failed: {}", e);
                        println!("{}", draw_panel(&e.to_string(), PanelKind::Error));
                    }
                }
            }
            Err(e) => {
                tracing::error!("Request failed: {:#}", e);
                println!("{}", draw_panel(&e.to_string(), PanelKind::Error));
            }
        }
    }

    /// Describe the active conversation for `/status`
    pub(crate) fn format_status(store: &ConversationStore, auto_save: bool) -> Result<String> {
        let id = store
            .get_current_identifier()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let metadata = store.get_current_metadata()?;
        let field = |key: &str| match metadata.get(key) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "-".to_string(),
        };

        Ok(format!(
            "Conversation: {}\nModel: {}\nAPI base: {}\nStarted: {}\nMessages: {}\nAuto-save: {}\nHistory file: {}",
            id,
            field("model"),
            field("api_base"),
            field("start_time"),
            field("message_count"),
            if auto_save { "on" } else { "off" },
            store.history_file().display()
        ))
    }
}
