//! Database Config

use clap::Args;

/// Catalog store settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(
        long,
        env = "DATABASE_URL",
        hide_env_values = true,
        default_value = "postgres://localhost:5432/trizen"
    )]
    pub database_url: String,
}
