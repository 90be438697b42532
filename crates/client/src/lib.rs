//! Trizen storefront client
//!
//! A typed client for the catalog API plus the state behind a storefront:
//! the product grid with its category filter, and the search-as-you-type
//! suggestion box.

pub mod api;
pub mod config;
pub mod filters;
pub mod products;
pub mod render;
pub mod storefront;
pub mod suggest;
