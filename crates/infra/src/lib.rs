//! Infrastructure layer: catalog storage and catalog sources.

pub mod catalog_source;
pub mod read_model;

pub use catalog_source::{
    parse_catalog_json, CatalogSource, CatalogSourceError, JsonFileSource, StaticSource,
};
pub use read_model::{CatalogStore, InMemoryCatalog};
