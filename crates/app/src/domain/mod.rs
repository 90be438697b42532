//! Trizen Domain Concerns

pub mod products;
