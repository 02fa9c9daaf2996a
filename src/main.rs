//! Lhammai - Interact with any LLM from your terminal
//!
#![doc = "Lhammai - Interact with any LLM from your terminal"]
#![doc = "Main entry point for the Lhammai application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lhammai::cli::{Cli, Commands};
use lhammai::commands;
use lhammai::config::Config;
use lhammai::ui::{draw_panel, PanelKind};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("{}", draw_panel(&e.to_string(), PanelKind::Error));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Execute command
    match cli.command {
        Commands::Ask {
            prompt,
            model,
            api_base,
            no_save,
        } => {
            tracing::info!("Sending one-shot prompt");
            if let Some(m) = &model {
                tracing::debug!("Using model override: {}", m);
            }
            if let Some(a) = &api_base {
                tracing::debug!("Using API base override: {}", a);
            }

            commands::ask::run_ask(config, prompt, model, api_base, no_save).await
        }
        Commands::Chat {
            model,
            api_base,
            resume,
            no_save,
        } => {
            tracing::info!("Starting interactive chat mode");
            if let Some(m) = &model {
                tracing::debug!("Using model override: {}", m);
            }
            if let Some(r) = &resume {
                tracing::debug!("Resuming conversation: {}", r);
            }

            commands::chat::run_chat(config, model, api_base, resume, no_save).await
        }
        Commands::History { command } => {
            tracing::info!("Managing conversation history");
            let history_file = config.history.resolve_file()?;
            commands::history::handle_history(command, &history_file)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "lhammai=debug" } else { "lhammai=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
