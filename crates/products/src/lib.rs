//! Products domain module.
//!
//! Marketplace listings and the query engine that filters them. Everything here
//! is deterministic domain logic (no IO, no storage).

pub mod product;
pub mod query;

pub use product::{Category, NewProduct, Product, Quality, SellerType};
pub use query::{
    filter, FilterCriteria, PriceRange, ALL, CATEGORY_OPTIONS, LOCATION_OPTIONS,
    PRICE_RANGE_OPTIONS,
};
