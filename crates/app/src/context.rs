//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    domain::products::{PgProductsService, ProductsService},
};

/// Failure while building an [`AppContext`].
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The database could not be reached.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    /// A pending migration failed.
    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

/// Services shared by every entry point.
#[derive(Clone)]
pub struct AppContext {
    /// Catalog operations
    pub products: Arc<dyn ProductsService>,
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Pending migrations are applied before the context is returned.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        info!("database connected and migrated");

        Ok(Self::from_db(Db::new(pool)))
    }

    /// Wire services over an already migrated database.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db)),
        }
    }
}
