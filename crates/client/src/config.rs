//! Client configuration

use std::time::Duration;

use clap::Args;

use crate::suggest::DEFAULT_DEBOUNCE_MS;

/// Settings shared by every client subcommand.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Base URL of the catalog API, including the `/api` prefix
    #[arg(
        long,
        env = "TRIZEN_API_URL",
        default_value = "http://localhost:5000/api"
    )]
    pub api_url: String,

    /// Quiet period after the last keystroke before a suggestion query is sent
    #[arg(long, env = "SUGGEST_DEBOUNCE_MS", default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl ClientConfig {
    /// The suggestion debounce period.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
