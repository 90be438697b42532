//! Catalog products as seen by the storefront.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of stars on the rating scale.
pub const RATING_STARS: u32 = 5;

const CURRENCY_SYMBOL: char = '₹';
const FULL_STAR: char = '★';
const HALF_STAR: char = '½';
const EMPTY_STAR: char = '☆';

/// A product returned by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: Uuid,

    /// Display name, also used as the suggestion text.
    pub name: String,

    /// Category label.
    pub category: String,

    /// Price in rupees.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Average rating between 0 and 5.
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,

    /// Image URL.
    pub image: String,
}

/// Confirmation returned by the seed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    /// Human-readable confirmation.
    pub message: String,

    /// Number of products inserted.
    pub count: u64,
}

/// Format a price as rupees with thousands separators, e.g. `₹29,999`.
///
/// Whole amounts print without decimals; fractional amounts keep up to two.
pub fn format_price(price: Decimal) -> String {
    let price = price.round_dp(2).normalize();
    let magnitude = price.abs();
    let whole = magnitude.trunc();
    let fraction = magnitude - whole;

    let mut formatted = String::new();

    if price.is_sign_negative() && !price.is_zero() {
        formatted.push('-');
    }

    formatted.push(CURRENCY_SYMBOL);
    formatted.push_str(&group_thousands(&whole.to_string()));

    if !fraction.is_zero() {
        formatted.push_str(fraction.normalize().to_string().trim_start_matches('0'));
    }

    formatted
}

fn group_thousands(digits: &str) -> String {
    let len = digits.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(digit);
    }

    grouped
}

/// Render a rating as five stars: full stars for the whole part, one half
/// star for any remainder, then empty stars.
pub fn render_stars(rating: Decimal) -> String {
    let max = Decimal::from(RATING_STARS);
    let rating = rating.clamp(Decimal::ZERO, max);

    let full = rating.floor().to_u32().unwrap_or_default();
    let half = u32::from(!rating.fract().is_zero());
    let empty = RATING_STARS.saturating_sub(full + half);

    let mut stars = String::new();

    stars.extend((0..full).map(|_| FULL_STAR));
    stars.extend((0..half).map(|_| HALF_STAR));
    stars.extend((0..empty).map(|_| EMPTY_STAR));

    stars
}
