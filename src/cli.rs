//! Command-line interface definition for Lhammai
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for one-shot prompts, interactive chat, and
//! conversation history management.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lhammai - Interact with any LLM from your terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "lhammai")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the conversation history file
    #[arg(long, env = "LHAMMAI_HISTORY_FILE")]
    pub history_file: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Lhammai
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Send a single prompt and print the reply
    Ask {
        /// The prompt to send to the LLM
        prompt: String,

        /// LLM model to use, as provider:model or provider/model
        #[arg(short, long)]
        model: Option<String>,

        /// Provider API base URL
        #[arg(long)]
        api_base: Option<String>,

        /// Do not write the exchange to the history file
        #[arg(long)]
        no_save: bool,
    },

    /// Start an interactive chat session
    Chat {
        /// LLM model to use, as provider:model or provider/model
        #[arg(short, long)]
        model: Option<String>,

        /// Provider API base URL
        #[arg(long)]
        api_base: Option<String>,

        /// Resume a saved conversation by ID
        #[arg(short, long)]
        resume: Option<String>,

        /// Do not write the session to the history file
        #[arg(long)]
        no_save: bool,
    },

    /// Manage saved conversations
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List saved conversations
    List,

    /// Print a saved conversation
    Show {
        /// Conversation ID
        id: String,
    },

    /// Delete a saved conversation
    Delete {
        /// Conversation ID
        id: String,
    },

    /// Delete every saved conversation
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
