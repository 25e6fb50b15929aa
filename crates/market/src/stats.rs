//! Market statistics computed from the catalog.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use agrimarket_core::Price;
use agrimarket_products::Product;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStats {
    pub as_of: NaiveDate,
    /// Mean retail price; `None` for an empty catalog.
    pub average_price: Option<Price>,
    /// Listings still available on `as_of`.
    pub active_products: usize,
    /// Distinct sellers with at least one listing.
    pub participants: usize,
    /// Listings whose retail price exceeds the government rate.
    pub price_alerts: usize,
}

impl MarketStats {
    pub fn compute(catalog: &[Product], as_of: NaiveDate) -> Self {
        let sellers: HashSet<_> = catalog.iter().map(|p| p.seller_id()).collect();

        Self {
            as_of,
            average_price: Price::mean(catalog.iter().map(|p| p.price())),
            active_products: catalog.iter().filter(|p| p.is_available_on(as_of)).count(),
            participants: sellers.len(),
            price_alerts: catalog.iter().filter(|p| p.is_above_government_rate()).count(),
        }
    }

    /// Change of each statistic since `baseline`.
    pub fn delta_from(&self, baseline: &MarketStats) -> StatDeltas {
        StatDeltas {
            average_price: StatDelta::between(
                baseline.average_price.map_or(0, Price::minor),
                self.average_price.map_or(0, Price::minor),
            ),
            active_products: StatDelta::between(baseline.active_products as u64, self.active_products as u64),
            participants: StatDelta::between(baseline.participants as u64, self.participants as u64),
            price_alerts: StatDelta::between(baseline.price_alerts as u64, self.price_alerts as u64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// Signed change of one statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    /// Absolute change (minor units for prices, counts otherwise).
    pub change: i64,
    /// Relative change in basis points; `None` when the baseline is zero.
    pub change_bps: Option<i64>,
    pub trend: Trend,
}

impl StatDelta {
    pub fn between(before: u64, after: u64) -> Self {
        let change = (after as i128 - before as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        let change_bps = (before > 0).then(|| {
            let bps = change as i128 * 10_000 / before as i128;
            bps.clamp(i64::MIN as i128, i64::MAX as i128) as i64
        });
        let trend = match change.signum() {
            1 => Trend::Up,
            -1 => Trend::Down,
            _ => Trend::Flat,
        };
        Self {
            change,
            change_bps,
            trend,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDeltas {
    pub average_price: StatDelta,
    pub active_products: StatDelta,
    pub participants: StatDelta,
    pub price_alerts: StatDelta,
}
