use clap::{Args, Subcommand};
use trizen_app::context::AppContext;

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Replace all products with the sample catalog
    Seed(DatabaseArgs),

    /// Print every product
    List(DatabaseArgs),
}

pub(crate) async fn run(command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::Seed(args) => seed(args).await,
        CatalogSubcommand::List(args) => list(args).await,
    }
}

async fn context(args: &DatabaseArgs) -> Result<AppContext, String> {
    AppContext::from_database_url(&args.database_url)
        .await
        .map_err(|error| format!("failed to initialise app context: {error}"))
}

async fn seed(args: DatabaseArgs) -> Result<(), String> {
    let count = context(&args)
        .await?
        .products
        .reseed_catalog()
        .await
        .map_err(|error| format!("failed to seed catalog: {error}"))?;

    println!("seeded {count} products");

    Ok(())
}

async fn list(args: DatabaseArgs) -> Result<(), String> {
    let products = context(&args)
        .await?
        .products
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    for product in products {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            product.uuid, product.name, product.category, product.price, product.rating
        );
    }

    Ok(())
}
