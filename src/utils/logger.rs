use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log output goes
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// Standard error, for one-shot runs
    Stderr,
    /// Append to a file, so the TUI stays intact
    File(PathBuf),
}

/// Initialize the logging system
pub fn init_logger(target: LogTarget) -> io::Result<()> {
    // Use RUST_LOG environment variable, default to info level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false) // Don't show module paths
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact(); // Use compact format

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer.with_writer(io::stderr))
                .init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer.with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
    }

    Ok(())
}
