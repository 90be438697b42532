//! Products Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row, postgres::PgRow, query, query_as};

use crate::domain::products::models::{NewProduct, Product, ProductUuid};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const DELETE_ALL_PRODUCTS_SQL: &str = include_str!("sql/delete_all_products.sql");
const INSERT_PRODUCTS_SQL: &str = "INSERT INTO products (uuid, name, category, price, rating, image) ";

/// Storage operations over the product collection.
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// All products in insertion order.
    async fn list_products(&self) -> Result<Vec<Product>, sqlx::Error>;

    /// Products whose name matches `pattern` (an escaped `ILIKE` pattern).
    async fn search_products(&self, pattern: &str, limit: i64)
    -> Result<Vec<Product>, sqlx::Error>;

    /// Remove every product, returning the number of rows deleted.
    async fn delete_all_products(&self) -> Result<u64, sqlx::Error>;

    /// Insert products in order, returning the number of rows inserted.
    async fn insert_products(&self, products: &[NewProduct]) -> Result<u64, sqlx::Error>;
}

/// [`ProductsRepository`] backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    /// Repository using `pool` for every query.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn list_products(&self) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    async fn search_products(
        &self,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(SEARCH_PRODUCTS_SQL)
            .bind(pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    async fn delete_all_products(&self) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ALL_PRODUCTS_SQL)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn insert_products(&self, products: &[NewProduct]) -> Result<u64, sqlx::Error> {
        if products.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<Postgres>::new(INSERT_PRODUCTS_SQL);

        builder.push_values(products, |mut row, product| {
            row.push_bind(ProductUuid::new())
                .push_bind(product.name.clone())
                .push_bind(product.category.clone())
                .push_bind(product.price)
                .push_bind(product.rating)
                .push_bind(product.image.clone());
        });

        let rows_affected = builder
            .build()
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            price: row.try_get("price")?,
            rating: row.try_get("rating")?,
            image: row.try_get("image")?,
        })
    }
}
