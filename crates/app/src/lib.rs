//! `agrimarket-app` — wires catalog, query engine, session and dashboard.

pub mod app;
pub mod config;

pub use app::MarketApp;
pub use config::{AppConfig, ListingQuery};
