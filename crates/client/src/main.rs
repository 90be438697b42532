//! Trizen storefront terminal client

use std::{io, process};

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::error;
use tracing_subscriber::EnvFilter;

use trizen_client::{
    api::{CatalogApi as _, CatalogApiError, HttpCatalogApi},
    config::ClientConfig,
    render,
    storefront::Storefront,
    suggest::SuggestController,
};

#[derive(Debug, Parser)]
#[command(name = "trizen-client", about = "Trizen storefront client", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the product grid
    Products {
        /// Only show products in this category
        #[arg(long, default_value = trizen_client::filters::ALL_CATEGORIES)]
        category: String,
    },

    /// List the category filter options
    Categories,

    /// Run a single search
    Search {
        /// Text to look for in product names
        query: String,
    },

    /// Replace the catalog with the sample products
    Seed,

    /// Interactive search-as-you-type; each input line replaces the search
    /// text. Commands: `:select <n>`, `:dismiss`, `:focus`, `:quit`
    Suggest,
}

#[derive(Debug, thiserror::Error)]
enum ClientError {
    #[error(transparent)]
    Api(#[from] CatalogApiError),

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

#[tokio::main]
pub async fn main() {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(client_error) = run(cli).await {
        eprintln!("{client_error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let api = HttpCatalogApi::new(&cli.config.api_url)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Products { category } => {
            let mut storefront = Storefront::new();

            storefront.load(&api).await;
            storefront.select_category(category);

            render::write_products(&mut out, &storefront.visible())?;
        }
        Commands::Categories => {
            let mut storefront = Storefront::new();

            storefront.load(&api).await;

            render::write_categories(
                &mut out,
                &storefront.categories(),
                storefront.selected_category(),
            )?;
        }
        Commands::Search { query } => {
            let products = api.search_products(&query).await?;

            render::write_products(&mut out, &products.iter().collect::<Vec<_>>())?;
        }
        Commands::Seed => {
            let summary = api.seed_catalog().await?;

            render::write_seed_summary(&mut out, &summary)?;
        }
        Commands::Suggest => {
            drop(out);

            suggest(SuggestController::new(api, cli.config.debounce())).await?;
        }
    }

    Ok(())
}

/// One stdin line per edit; snapshots are printed as they are published.
async fn suggest(controller: SuggestController<HttpCatalogApi>) -> Result<(), ClientError> {
    let mut snapshots = controller.subscribe();

    let printer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();

            if let Err(write_error) = render::write_snapshot(&mut io::stdout().lock(), &snapshot) {
                error!("failed to render suggestions: {write_error}");

                break;
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" => break,
            ":dismiss" => controller.dismiss().await,
            ":focus" => controller.focus().await,
            command if command.starts_with(":select") => {
                let picked = command
                    .trim_start_matches(":select")
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|number| number.checked_sub(1));

                if let Some(index) = picked
                    && controller.select(index).await.is_none()
                {
                    eprintln!("no suggestion {}", index + 1);
                }
            }
            _ => controller.edit(line.as_str()).await,
        }
    }

    drop(controller);
    printer.abort();

    Ok(())
}
