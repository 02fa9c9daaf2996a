//! Terminal rendering helpers
//!
//! Plain-text panels, banners and transcripts. Nothing here reads from or
//! writes to the conversation store.

use crate::history::{Conversation, ConversationId, Role};
use colored::{ColoredString, Colorize};

/// Kind of panel, which decides title and border colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// Neutral information
    Info,
    /// Something went wrong
    Error,
    /// An operation completed
    Success,
    /// A reply from the model
    Assistant,
}

impl PanelKind {
    fn title(&self) -> &'static str {
        match self {
            Self::Info => "💡 Info",
            Self::Error => "❌ Error",
            Self::Success => "✅ Success",
            Self::Assistant => "🤖 Assistant",
        }
    }

    fn paint(&self, s: &str) -> ColoredString {
        match self {
            Self::Error => s.red(),
            _ => s.green(),
        }
    }
}

/// Draw `content` inside a titled box
///
/// # Examples
///
/// ```
/// use lhammai::ui::{draw_panel, PanelKind};
///
/// colored::control::set_override(false);
/// let panel = draw_panel("Hello", PanelKind::Info);
/// assert!(panel.contains("Info"));
/// assert!(panel.contains("│ Hello"));
/// ```
pub fn draw_panel(content: &str, kind: PanelKind) -> String {
    let title = kind.title();
    let lines: Vec<&str> = if content.is_empty() {
        vec![""]
    } else {
        content.lines().collect()
    };
    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.chars().count() + 2);

    let mut out = String::new();
    let top_fill = "─".repeat(inner - title.chars().count() - 1);
    out.push_str(&kind.paint(&format!("╭─ {} {}╮", title, top_fill)).to_string());
    out.push('\n');
    for line in lines {
        let pad = " ".repeat(inner - line.chars().count());
        out.push_str(&format!(
            "{} {}{} {}\n",
            kind.paint("│"),
            line,
            pad,
            kind.paint("│")
        ));
    }
    out.push_str(&kind.paint(&format!("╰{}╯", "─".repeat(inner + 2))).to_string());
    out
}

/// Welcome banner shown when an interactive session starts
pub fn welcome_banner(model: &str, api_base: &str) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("🚀 Lhammai v{} - interact with any LLM from your terminal", version).cyan()
    ));
    out.push_str(&format!(
        "💡 {} mode activated. Type {} to end the session, {} for commands.\n",
        "Interactive".cyan(),
        "'/exit'".cyan(),
        "'/help'".cyan()
    ));
    out.push_str(&format!(
        "✨ You are chatting with {} at {}.\n",
        format!("'{}'", model).cyan(),
        format!("'{}'", api_base).cyan()
    ));
    out
}

/// Render a saved conversation as a readable transcript
pub fn render_transcript(id: &ConversationId, conversation: &Conversation) -> String {
    let meta = &conversation.metadata;
    let mut out = format!(
        "{} {}\n{} {} at {}\n{} {}  ({} messages)\n\n",
        "Conversation".bold(),
        id.to_string().cyan(),
        "Model:".bold(),
        meta.model,
        meta.api_base,
        "Started:".bold(),
        meta.start_time.format("%Y-%m-%d %H:%M:%S UTC"),
        meta.message_count
    );

    for message in &conversation.messages {
        let label = match message.role {
            Role::User => "🌟 You".bold().yellow(),
            Role::Assistant => "🤖 Assistant".bold().green(),
            Role::System => "⚙ System".bold().blue(),
        };
        out.push_str(&format!("{}\n{}\n\n", label, message.content));
    }
    out
}
