use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kgchat")]
#[command(version)]
#[command(about = "Chat with a knowledge-graph query service from the terminal", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the query service (overrides configuration)
    #[arg(short, long, env = "KGCHAT_URL")]
    pub url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Non-interactive prompt to execute
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Output format for non-interactive mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, requires = "prompt")]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether this invocation ends up in the interactive terminal UI
    pub fn runs_tui(&self) -> bool {
        self.prompt.is_none() && matches!(self.command, None | Some(Commands::Chat))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Start a chat session (default)
    Chat,
    /// Check that the query service is reachable
    Status,
    /// Upload a document into the knowledge graph
    Upload {
        /// Document to upload (pdf, docx, xlsx, csv, images)
        file: PathBuf,
    },
    /// Summarize the service's knowledge graph
    Graph,
    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
    /// Markdown formatted output
    Markdown,
}
