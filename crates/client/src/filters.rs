//! Category filter

use crate::products::Product;

/// Synthetic category that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Filter options for `products`: [`ALL_CATEGORIES`] first, then each distinct
/// category in the order it first appears.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];

    for product in products {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }

    categories
}

/// Products whose category exactly matches `selected`, or all of them for
/// [`ALL_CATEGORIES`].
pub fn filter_by_category<'a>(products: &'a [Product], selected: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| selected == ALL_CATEGORIES || product.category == selected)
        .collect()
}

/// "Showing 1 product", "Showing 7 products".
pub fn showing_label(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };

    format!("Showing {count} product{suffix}")
}
