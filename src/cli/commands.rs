use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::{
    app::{get_config_dir, init_config, Config},
    constants::CONFIG_FILE_NAME,
    gateway::{HttpGateway, QueryGateway},
};

use super::Commands;

/// Handle CLI subcommands. Returns `true` when the command was handled and
/// the process should exit.
pub async fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing kgchat configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(true)
        }
        Commands::Status => {
            show_status(config).await?;
            Ok(true)
        }
        Commands::Upload { file } => {
            upload_document(config, file).await?;
            Ok(true)
        }
        Commands::Graph => {
            show_graph(config).await?;
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Chat => Ok(false), // Continue to chat interface
    }
}

/// Show version information
pub fn show_version() {
    println!("kgchat v{}", env!("CARGO_PKG_VERSION"));
    println!("   A terminal chat client for knowledge-graph query services");
}

/// Show status of the query service and configuration
async fn show_status(config: &Config) -> Result<()> {
    println!("kgchat Status:");
    println!();

    let gateway = HttpGateway::new(&config.gateway)?;
    match gateway.health().await {
        Ok(true) => println!(
            "  {} Query service: healthy at {}",
            "[OK]".green(),
            gateway.base_url()
        ),
        Ok(false) => println!(
            "  {} Query service: responding but not healthy at {}",
            "[WARNING]".yellow(),
            gateway.base_url()
        ),
        Err(e) => println!(
            "  {} Query service: unreachable at {} ({})",
            "[ERROR]".red(),
            gateway.base_url(),
            e
        ),
    }
    println!("      Query endpoint: POST {}", config.gateway.query_path);

    let config_path = get_config_dir()?.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!("  {} Configuration: {}", "[OK]".green(), config_path.display());
    } else {
        println!(
            "  {} Configuration: Not found (using defaults)",
            "[WARNING]".yellow()
        );
    }

    match &config.user {
        Some(user) => println!("  {} User: {} <{}> ({})", "[OK]".green(), user.name, user.email, user.id),
        None => println!("  {} User: none (sessions are created without owner)", "[INFO]".cyan()),
    }

    println!();
    Ok(())
}

/// Upload a document for ingestion
async fn upload_document(config: &Config, file: &Path) -> Result<()> {
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Not a file path: {}", file.display()))?;
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let gateway = HttpGateway::new(&config.gateway)?;
    println!("Uploading {} ({} bytes)...", file_name, bytes.len());
    let document_id = gateway
        .upload_document(file_name, bytes)
        .await
        .with_context(|| format!("Upload to {} failed", gateway.base_url()))?;

    println!("  {} Document added: {}", "[OK]".green(), document_id);
    Ok(())
}

/// Print node and edge counts of the knowledge graph
async fn show_graph(config: &Config) -> Result<()> {
    let gateway = HttpGateway::new(&config.gateway)?;
    let summary = gateway
        .graph()
        .await
        .with_context(|| format!("Could not fetch the graph from {}", gateway.base_url()))?;

    println!("Knowledge graph at {}:", gateway.base_url());
    println!("  Nodes: {}", summary.nodes);
    for (kind, count) in &summary.node_types {
        println!("    {:<12} {}", kind, count);
    }
    println!("  Edges: {}", summary.edges);
    Ok(())
}
