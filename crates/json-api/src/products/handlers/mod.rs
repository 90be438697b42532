//! Product Handlers

pub(crate) mod index;
pub(crate) mod search;
pub(crate) mod seed;
