//! Test helpers.

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use trizen_app::{
    context::AppContext,
    domain::products::{
        MockProductsService,
        models::{Product, ProductUuid},
    },
};

use crate::state::State;

/// A service mock that fails the test on any call not explicitly expected.
pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_search_products().never();
    products.expect_reseed_catalog().never();

    products
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
    })
}

pub(crate) fn products_router(products: MockProductsService, route: Router) -> Router {
    Router::new()
        .hoop(inject(state_with_products(products)))
        .push(route)
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(products_router(products, route))
}

pub(crate) fn make_product(name: &str, category: &str, price: i64) -> Product {
    Product {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        category: category.to_string(),
        price: Decimal::from(price),
        rating: Decimal::new(45, 1),
        image: format!("https://images.example.com/{}.jpg", name.to_lowercase()),
    }
}
