use anyhow::Result;
use colored::Colorize;
use tracing::{info, warn};

use crate::{
    app::{load_config, load_config_file, AppState, Config},
    cli::{handle_command, Cli},
    tui::{run_ui, App},
};

/// Resolve configuration from `--config` or the layered sources, then apply
/// command-line overrides
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        load_config_file(config_path)?
    } else {
        match load_config() {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("⚠️  Failed to load config: {}. Using defaults.", e);
                warn!("falling back to default configuration: {:#}", e);
                Config::default()
            }
        }
    };

    if let Some(url) = &cli.url {
        config.gateway.base_url = url.clone();
    }

    Ok(config)
}

/// Main runtime orchestrator for interactive mode
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let config = resolve_config(&cli)?;
        Ok(Self { cli, config })
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        // Handle subcommands
        if let Some(command) = &self.cli.command {
            if handle_command(command, &self.config).await? {
                return Ok(()); // Command handled, exit
            }
            // Continue to chat for Commands::Chat
        }

        println!(
            "Starting kgchat against {}",
            self.config.gateway.base_url.green()
        );
        info!("query service at {}", self.config.gateway.base_url);

        let state = AppState::new(self.config)?;
        let app = App::new(state);

        run_ui(app).await
    }
}
