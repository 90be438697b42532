//! Product Models

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trizen_app::domain::products::models::Product;

/// A catalog product as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Store-assigned identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Category label used for filtering
    pub category: String,

    /// Price in rupees
    #[serde(with = "json_number")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    /// Average rating between 0 and 5
    #[serde(with = "json_number")]
    #[salvo(schema(value_type = f64))]
    pub rating: Decimal,

    /// Product image URL
    pub image: String,
}

/// Decimals as JSON numbers, whole values without a fractional part.
mod json_number {
    use rust_decimal::{Decimal, prelude::ToPrimitive};
    use serde::{Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let normalized = value.normalize();

        match normalized.to_i64() {
            Some(whole) if normalized.scale() == 0 => serializer.serialize_i64(whole),
            _ => rust_decimal::serde::float::serialize(value, serializer),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer)
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.uuid.into_uuid(),
            name: product.name,
            category: product.category,
            price: product.price,
            rating: product.rating,
            image: product.image,
        }
    }
}
