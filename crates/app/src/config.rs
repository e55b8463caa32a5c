use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Log filter used when `RUST_LOG` is unset. Keeps the interactive screen
/// free of log lines.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub deck_path: PathBuf,
    pub seed: Option<u64>,
}

impl AppConfig {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            deck_path: cli.deck.clone(),
            seed: cli.seed,
        }
    }
}

/// Install the global `tracing` subscriber, writing to stderr.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
