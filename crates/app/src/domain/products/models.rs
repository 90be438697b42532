//! Product Models

use rust_decimal::Decimal;

use crate::{domain::products::errors::ProductsServiceError, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Upper bound of the rating scale.
pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier assigned by the store
    pub uuid: ProductUuid,

    /// Display name, matched by search
    pub name: String,

    /// Category label
    pub category: String,

    /// Price in rupees
    pub price: Decimal,

    /// Average rating, 0 to 5
    pub rating: Decimal,

    /// Image URL
    pub image: String,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Display name
    pub name: String,

    /// Category label
    pub category: String,

    /// Price in rupees, never negative
    pub price: Decimal,

    /// Average rating, 0 to 5
    pub rating: Decimal,

    /// Image URL
    pub image: String,
}

impl NewProduct {
    /// Check the field constraints every persisted product must satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidData`] naming the first field that
    /// fails its constraint.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        if self.name.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData("name must not be empty"));
        }

        if self.category.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData(
                "category must not be empty",
            ));
        }

        if self.price < Decimal::ZERO {
            return Err(ProductsServiceError::InvalidData(
                "price must not be negative",
            ));
        }

        if self.rating < Decimal::ZERO || self.rating > MAX_RATING {
            return Err(ProductsServiceError::InvalidData(
                "rating must be between 0 and 5",
            ));
        }

        if self.image.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData("image must not be empty"));
        }

        Ok(())
    }
}
