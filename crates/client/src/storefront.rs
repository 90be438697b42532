//! Product grid state.

use tracing::error;

use crate::{
    api::CatalogApi,
    filters::{self, ALL_CATEGORIES},
    products::Product,
};

/// The storefront grid: the loaded catalog plus the selected category.
#[derive(Debug, Clone)]
pub struct Storefront {
    loading: bool,
    products: Vec<Product>,
    selected_category: String,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}

impl Storefront {
    /// A grid that has not loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loading: true,
            products: Vec::new(),
            selected_category: ALL_CATEGORIES.to_string(),
        }
    }

    /// Fetch the catalog. A failed fetch is logged and leaves the grid empty.
    pub async fn load<A: CatalogApi + ?Sized>(&mut self, api: &A) {
        self.loading = true;

        self.products = match api.list_products().await {
            Ok(products) => products,
            Err(fetch_error) => {
                error!("failed to fetch products: {fetch_error}");

                Vec::new()
            }
        };

        self.loading = false;
    }

    /// A fetch is under way.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Every loaded product, unfiltered.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    /// Change the filter. Unknown categories simply match nothing.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }

    /// Filter options for the loaded catalog.
    pub fn categories(&self) -> Vec<String> {
        filters::categories(&self.products)
    }

    /// Products that pass the current filter.
    pub fn visible(&self) -> Vec<&Product> {
        filters::filter_by_category(&self.products, &self.selected_category)
    }

    /// Count label for the filtered grid.
    pub fn showing_label(&self) -> String {
        filters::showing_label(self.visible().len())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::api::{CatalogApiError, MockCatalogApi};

    use super::*;

    fn product(name: &str, category: &str) -> Product {
        Product {
            id: Uuid::now_v7(),
            name: name.to_string(),
            category: category.to_string(),
            price: Decimal::from(2_499),
            rating: Decimal::new(43, 1),
            image: "https://images.example.com/product.jpg".to_string(),
        }
    }

    #[test]
    fn starts_loading_with_all_selected() {
        let storefront = Storefront::new();

        assert!(storefront.is_loading());
        assert_eq!(storefront.selected_category(), ALL_CATEGORIES);
        assert!(storefront.visible().is_empty());
    }

    #[tokio::test]
    async fn load_then_filter_by_category() {
        let mut api = MockCatalogApi::new();

        api.expect_list_products().once().return_once(|| {
            Ok(vec![
                product("Running Shoes", "Sports"),
                product("Desk Lamp LED", "Home"),
                product("Yoga Mat Comfort", "Sports"),
            ])
        });

        api.expect_search_products().never();
        api.expect_seed_catalog().never();

        let mut storefront = Storefront::new();

        storefront.load(&api).await;
        storefront.select_category("Sports");

        assert!(!storefront.is_loading());
        assert_eq!(storefront.categories(), vec!["All", "Sports", "Home"]);
        assert_eq!(storefront.visible().len(), 2);
        assert_eq!(storefront.showing_label(), "Showing 2 products");
    }

    #[tokio::test]
    async fn failed_load_leaves_empty_grid() {
        let mut api = MockCatalogApi::new();

        api.expect_list_products().once().return_once(|| {
            Err(CatalogApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Server error".to_string(),
            })
        });

        api.expect_search_products().never();
        api.expect_seed_catalog().never();

        let mut storefront = Storefront::new();

        storefront.load(&api).await;

        assert!(!storefront.is_loading());
        assert!(storefront.products().is_empty());
        assert_eq!(storefront.showing_label(), "Showing 0 products");
    }
}
