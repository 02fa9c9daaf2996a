use crate::cli::HistoryCommand;
use crate::error::Result;
use crate::history::{Archive, ConversationId, ConversationStore, Role};
use crate::ui::{draw_panel, render_transcript, PanelKind};
use colored::Colorize;
use prettytable::{format, Table};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Handle history commands
pub fn handle_history(command: HistoryCommand, history_file: &Path) -> Result<()> {
    let store = ConversationStore::open(history_file);
    tracing::debug!("Using history file {}", history_file.display());

    match command {
        HistoryCommand::List => {
            let archive = store.load_history_from_disk()?;

            if archive.is_empty() {
                println!("{}", "No conversation history found.".yellow());
                return Ok(());
            }

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

            table.add_row(prettytable::row![
                "ID".bold(),
                "Title".bold(),
                "Model".bold(),
                "Messages".bold(),
                "Started".bold()
            ]);

            for (id, title, model, count, started) in summarize(&archive) {
                table.add_row(prettytable::row![id.cyan(), title, model, count, started]);
            }

            println!("\nConversation History:");
            table.printstd();
            println!();
            println!(
                "Use {} to resume a conversation.",
                "lhammai chat --resume <ID>".cyan()
            );
            println!();
        }
        HistoryCommand::Show { id } => {
            let id = ConversationId::parse(&id)?;
            let conversation = store.load_from_disk(&id)?;
            print!("{}", render_transcript(&id, &conversation));
        }
        HistoryCommand::Delete { id } => {
            store.delete_conversation(id.as_str())?;
            println!(
                "{}",
                draw_panel(
                    &format!("Deleted conversation {}", id),
                    PanelKind::Success
                )
            );
        }
        HistoryCommand::Clear { yes } => {
            if !yes && !confirm("Delete every saved conversation? [y/N] ")? {
                println!("{}", "Aborted.".yellow());
                return Ok(());
            }
            store.clear_all_history()?;
            println!(
                "{}",
                draw_panel("Conversation history cleared", PanelKind::Success)
            );
        }
    }

    Ok(())
}

/// One table row per conversation, most recent first
fn summarize(archive: &Archive) -> Vec<(String, String, String, usize, String)> {
    let mut entries: Vec<_> = archive.iter().collect();
    entries.sort_by(|a, b| b.1.metadata.start_time.cmp(&a.1.metadata.start_time));

    entries
        .into_iter()
        .map(|(id, conversation)| {
            let first_prompt = conversation
                .messages
                .iter()
                .find(|m| m.role == Role::User)
                .map(|m| m.content.replace('\n', " "))
                .unwrap_or_else(|| "-".to_string());
            let title = if first_prompt.chars().count() > 40 {
                format!("{}...", first_prompt.chars().take(37).collect::<String>())
            } else {
                first_prompt
            };
            (
                id.clone(),
                title,
                conversation.metadata.model.clone(),
                conversation.metadata.message_count,
                conversation
                    .metadata
                    .start_time
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
            )
        })
        .collect()
}

fn confirm(question: &str) -> Result<bool> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
