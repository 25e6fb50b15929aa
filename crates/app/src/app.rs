use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Days, NaiveDate, Utc};

use agrimarket_auth::{AuthError, AuthProvider, Credentials, MockAuthProvider, Registration, Session};
use agrimarket_infra::{CatalogSource, CatalogStore, JsonFileSource, StaticSource};
use agrimarket_market::{Activity, ActivityFeed, DashboardSummary, MarketStats, DEFAULT_TOP_N};
use agrimarket_products::{filter, FilterCriteria, Product};

use crate::config::AppConfig;

/// Feed entries shown on the dashboard.
pub const RECENT_ACTIVITY: usize = 4;

/// Look-back used for deltas when no baseline was snapshotted.
pub const BASELINE_WINDOW_DAYS: u64 = 7;

/// Application shell: one catalog, one session, one dashboard.
///
/// Everything is synchronous; the catalog is read-only after construction.
pub struct MarketApp {
    catalog: Arc<dyn CatalogStore>,
    auth: Arc<dyn AuthProvider>,
    session: Session,
    activity: ActivityFeed,
    baseline: Option<MarketStats>,
    top_n: usize,
}

impl MarketApp {
    pub fn new(catalog: Arc<dyn CatalogStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            catalog,
            auth,
            session: Session::new(),
            activity: ActivityFeed::default(),
            baseline: None,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Load the configured catalog and pair it with the mock auth provider.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => JsonFileSource::new(path)
                .load_catalog()
                .with_context(|| format!("loading catalog from {}", path.display()))?,
            None => StaticSource::seed()
                .load_catalog()
                .context("loading seed catalog")?,
        };

        let mut app =
            Self::new(Arc::new(catalog), Arc::new(MockAuthProvider::new())).with_top_n(config.top_n);
        app.record_listing_activity(Utc::now());
        Ok(app)
    }

    /// One `NewProduct` entry per listing, plus a price update for each
    /// listing priced above the government rate.
    fn record_listing_activity(&mut self, at: DateTime<Utc>) {
        let catalog = self.catalog.all_products();
        for product in catalog.iter() {
            self.activity.record(Activity::new_listing(product, at));
            if product.is_above_government_rate() {
                self.activity.record(Activity::price_update(product, at));
            }
        }
        tracing::debug!(entries = self.activity.len(), "recorded listing activity");
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn catalog(&self) -> Arc<[Product]> {
        self.catalog.all_products()
    }

    /// Listing view: the catalog filtered by `criteria`, in catalog order.
    pub fn list_products(&self, criteria: &FilterCriteria) -> Vec<Product> {
        filter(&self.catalog.all_products(), criteria)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Sign in; on failure the current session is left untouched.
    pub fn login(&mut self, credentials: &Credentials) -> Result<&Session, AuthError> {
        self.session = self.auth.authenticate(credentials)?;
        Ok(&self.session)
    }

    pub fn register(&mut self, registration: Registration) -> Result<&Session, AuthError> {
        self.session = self.auth.register(registration)?;
        Ok(&self.session)
    }

    pub fn logout(&mut self) {
        self.session.clear();
    }

    pub fn record_activity(&mut self, activity: Activity) {
        self.activity.record(activity);
    }

    /// Remember today's statistics so later dashboards report deltas.
    pub fn snapshot_baseline(&mut self, as_of: NaiveDate) {
        self.baseline = Some(MarketStats::compute(&self.catalog.all_products(), as_of));
    }

    /// Dashboard as of `as_of`. Deltas compare against the snapshotted
    /// baseline, or the same catalog [`BASELINE_WINDOW_DAYS`] earlier.
    pub fn dashboard(&self, as_of: NaiveDate) -> DashboardSummary {
        let catalog = self.catalog.all_products();
        let baseline = match &self.baseline {
            Some(baseline) => baseline.clone(),
            None => {
                let earlier = as_of
                    .checked_sub_days(Days::new(BASELINE_WINDOW_DAYS))
                    .unwrap_or(as_of);
                MarketStats::compute(&catalog, earlier)
            }
        };

        let mut summary = DashboardSummary::build(&catalog, as_of, self.top_n)
            .with_activity(&self.activity, RECENT_ACTIVITY)
            .with_baseline(&baseline);
        if let Some(user) = self.session.current_user() {
            summary = summary.with_greeting(user.name.clone());
        }
        summary
    }
}
