use anyhow::Result;
use clap::Parser;

use kgchat::{
    app::{get_data_dir, AppState},
    cli::Cli,
    constants::LOG_FILE_NAME,
    runtime::{resolve_config, NonInteractiveRunner, Orchestrator},
    utils::{init_logger, LogTarget},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging if verbose; the TUI owns the terminal, so log to a file there
    if cli.verbose {
        let target = if cli.runs_tui() {
            LogTarget::File(get_data_dir()?.join(LOG_FILE_NAME))
        } else {
            LogTarget::Stderr
        };
        init_logger(target)?;
    }

    // Check if running in non-interactive mode
    if let Some(prompt) = cli.prompt.clone() {
        run_non_interactive(cli, prompt).await
    } else {
        let orchestrator = Orchestrator::new(cli)?;
        orchestrator.run().await
    }
}

/// Run in non-interactive mode
async fn run_non_interactive(cli: Cli, prompt: String) -> Result<()> {
    let config = resolve_config(&cli)?;
    let state = AppState::new(config)?;
    let runner = NonInteractiveRunner::new(state.controller.clone());

    let result = runner.execute(prompt).await?;
    println!("{}", runner.format_result(&result, cli.output_format));

    // Exit with appropriate code
    if !result.errors.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
