//! Catalog sources: where the initial listing sequence comes from.

use std::path::{Path, PathBuf};

use thiserror::Error;

use agrimarket_core::DomainError;
use agrimarket_products::Product;

use crate::read_model::InMemoryCatalog;

/// Seed listings shipped with the crate (JSON array in listing shape).
const SEED_CATALOG: &str = include_str!("../fixtures/seed_catalog.json");

#[derive(Debug, Error)]
pub enum CatalogSourceError {
    #[error("failed to read catalog '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode catalog '{origin}': {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Supplies the initial ordered product sequence.
///
/// A remote fetch-then-cache source would implement this same boundary.
pub trait CatalogSource {
    /// Human-readable origin, for logs.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Vec<Product>, CatalogSourceError>;

    /// Load and validate into an in-memory catalog.
    fn load_catalog(&self) -> Result<InMemoryCatalog, CatalogSourceError> {
        let products = self.load()?;
        tracing::info!(source = %self.describe(), "loading catalog");
        Ok(InMemoryCatalog::load(products)?)
    }
}

/// Decode a JSON array of listings. Each entry is shape-validated.
pub fn parse_catalog_json(origin: &str, json: &str) -> Result<Vec<Product>, CatalogSourceError> {
    serde_json::from_str(json).map_err(|source| CatalogSourceError::Decode {
        origin: origin.to_string(),
        source,
    })
}

/// Listings held in memory (tests, embedded fixture).
#[derive(Debug, Clone, Default)]
pub enum StaticSource {
    /// The marketplace seed data bundled with this crate.
    #[default]
    Seed,
    Products(Vec<Product>),
}

impl StaticSource {
    pub fn seed() -> Self {
        StaticSource::Seed
    }

    pub fn products(products: Vec<Product>) -> Self {
        StaticSource::Products(products)
    }
}

impl CatalogSource for StaticSource {
    fn describe(&self) -> String {
        match self {
            StaticSource::Seed => "seed fixture".to_string(),
            StaticSource::Products(products) => format!("static ({} products)", products.len()),
        }
    }

    fn load(&self) -> Result<Vec<Product>, CatalogSourceError> {
        match self {
            StaticSource::Seed => parse_catalog_json("seed fixture", SEED_CATALOG),
            StaticSource::Products(products) => Ok(products.clone()),
        }
    }
}

/// Listings read once from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<Product>, CatalogSourceError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| CatalogSourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_catalog_json(&self.describe(), &json)
    }
}
