//! Environment-driven configuration.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use agrimarket_auth::Credentials;
use agrimarket_market::DEFAULT_TOP_N;
use agrimarket_observability::LogFormat;
use agrimarket_products::{FilterCriteria, ALL};

pub const ENV_CATALOG: &str = "AGRIMARKET_CATALOG";
pub const ENV_TOP_N: &str = "AGRIMARKET_TOP_N";
pub const ENV_SEARCH: &str = "AGRIMARKET_SEARCH";
pub const ENV_CATEGORY: &str = "AGRIMARKET_CATEGORY";
pub const ENV_LOCATION: &str = "AGRIMARKET_LOCATION";
pub const ENV_PRICE_RANGE: &str = "AGRIMARKET_PRICE_RANGE";
pub const ENV_HIDE_EXPIRED: &str = "AGRIMARKET_HIDE_EXPIRED";
pub const ENV_LOGIN_EMAIL: &str = "AGRIMARKET_LOGIN_EMAIL";
pub const ENV_LOGIN_PASSWORD: &str = "AGRIMARKET_LOGIN_PASSWORD";
pub const ENV_LOG_FORMAT: &str = "AGRIMARKET_LOG_FORMAT";

/// Raw listing selections, exactly as a filter form would submit them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    pub search: String,
    pub category: String,
    pub location: String,
    pub price_range: String,
    /// Hide listings whose availability has lapsed.
    pub hide_expired: bool,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL.to_string(),
            location: ALL.to_string(),
            price_range: ALL.to_string(),
            hide_expired: false,
        }
    }
}

impl ListingQuery {
    pub fn criteria(&self, today: NaiveDate) -> FilterCriteria {
        let criteria =
            FilterCriteria::from_raw(&self.search, &self.category, &self.location, &self.price_range);
        if self.hide_expired {
            criteria.available_on(today)
        } else {
            criteria
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON catalog to load; the bundled seed fixture when unset.
    pub catalog_path: Option<PathBuf>,
    pub top_n: usize,
    pub listing: ListingQuery,
    /// Mock sign-in performed at startup, for the dashboard greeting.
    pub login: Option<Credentials>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            top_n: DEFAULT_TOP_N,
            listing: ListingQuery::default(),
            login: None,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Log format alone, read without logging so it can pick the subscriber.
    /// Unknown values are reported later by [`AppConfig::from_env`].
    pub fn log_format_from_env() -> LogFormat {
        std::env::var(ENV_LOG_FORMAT)
            .ok()
            .and_then(|raw| LogFormat::parse(&raw))
            .unwrap_or_default()
    }

    /// Build configuration from any key lookup. Invalid values fall back to
    /// defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let top_n = match get(ENV_TOP_N) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "{ENV_TOP_N} is not a number; using {DEFAULT_TOP_N}");
                defaults.top_n
            }),
            None => defaults.top_n,
        };

        let log_format = match get(ENV_LOG_FORMAT) {
            Some(raw) => LogFormat::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown {ENV_LOG_FORMAT}; using json");
                defaults.log_format
            }),
            None => defaults.log_format,
        };

        let hide_expired = get(ENV_HIDE_EXPIRED)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let listing = ListingQuery {
            search: lookup(ENV_SEARCH).unwrap_or_default(),
            category: get(ENV_CATEGORY).unwrap_or(defaults.listing.category),
            location: get(ENV_LOCATION).unwrap_or(defaults.listing.location),
            price_range: get(ENV_PRICE_RANGE).unwrap_or(defaults.listing.price_range),
            hide_expired,
        };

        let login = match (get(ENV_LOGIN_EMAIL), lookup(ENV_LOGIN_PASSWORD)) {
            (Some(email), Some(password)) => Some(Credentials::new(email, password)),
            (Some(_), None) => {
                tracing::warn!("{ENV_LOGIN_EMAIL} set without {ENV_LOGIN_PASSWORD}; staying signed out");
                None
            }
            _ => None,
        };

        Self {
            catalog_path: get(ENV_CATALOG).map(PathBuf::from),
            top_n,
            listing,
            login,
            log_format,
        }
    }
}
