//! Products Data
//!
//! The fixed sample catalog written by the reseed operation.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::products::{errors::ProductsServiceError, models::NewProduct};

const SAMPLE_CATALOG_YAML: &str = include_str!("../../../../../fixtures/products/catalog.yml");

/// Wrapper for the catalog in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
struct ProductFixture {
    name: String,
    category: String,
    price: Decimal,
    rating: Decimal,
    image: String,
}

impl From<ProductFixture> for NewProduct {
    fn from(fixture: ProductFixture) -> Self {
        NewProduct {
            name: fixture.name,
            category: fixture.category,
            price: fixture.price,
            rating: fixture.rating,
            image: fixture.image,
        }
    }
}

/// Parse and validate the embedded sample catalog, in insertion order.
///
/// # Errors
///
/// Returns an error if the fixture cannot be parsed or any entry violates the
/// product field constraints.
pub fn sample_catalog() -> Result<Vec<NewProduct>, ProductsServiceError> {
    parse_catalog(SAMPLE_CATALOG_YAML)
}

fn parse_catalog(yaml: &str) -> Result<Vec<NewProduct>, ProductsServiceError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

    let products: Vec<NewProduct> = fixture.products.into_iter().map(Into::into).collect();

    for product in &products {
        product.validate()?;
    }

    Ok(products)
}
