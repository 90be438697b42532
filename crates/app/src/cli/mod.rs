use clap::{Args, Parser, Subcommand};

mod catalog;
mod db;

#[derive(Debug, Parser)]
#[command(name = "trizen-app", about = "Trizen catalog operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect or reseed the product catalog
    Catalog(catalog::CatalogCommand),

    /// Database maintenance
    Db(db::DbCommand),
}

/// Connection settings shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(
        long,
        env = "DATABASE_URL",
        hide_env_values = true,
        default_value = "postgres://localhost:5432/trizen"
    )]
    pub(crate) database_url: String,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Catalog(command) => catalog::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
