//! Recent market activity feed.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrimarket_products::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    PriceUpdate,
    NewProduct,
    BulkOrder,
    Complaint,
}

/// One feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub subject: String,
    pub location: String,
    /// Short status text, e.g. a price or "Resolved".
    pub detail: String,
    pub at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        kind: ActivityKind,
        subject: impl Into<String>,
        location: impl Into<String>,
        detail: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            subject: subject.into(),
            location: location.into(),
            detail: detail.into(),
            at,
        }
    }

    fn for_product(kind: ActivityKind, product: &Product, at: DateTime<Utc>) -> Self {
        Self::new(
            kind,
            product.name(),
            product.location(),
            format!("{}/{}", product.price(), product.unit()),
            at,
        )
    }

    pub fn price_update(product: &Product, at: DateTime<Utc>) -> Self {
        Self::for_product(ActivityKind::PriceUpdate, product, at)
    }

    pub fn new_listing(product: &Product, at: DateTime<Utc>) -> Self {
        Self::for_product(ActivityKind::NewProduct, product, at)
    }

    pub fn bulk_order(product: &Product, at: DateTime<Utc>) -> Self {
        Self::for_product(ActivityKind::BulkOrder, product, at)
    }
}

/// Bounded activity log; the oldest entries drop off once full.
#[derive(Debug, Clone)]
pub struct ActivityFeed {
    entries: VecDeque<Activity>,
    capacity: usize,
}

impl ActivityFeed {
    pub const DEFAULT_CAPACITY: usize = 50;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, activity: Activity) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(activity);
    }

    /// Up to `limit` entries, newest first by timestamp (ties keep
    /// insertion order, later first).
    pub fn recent(&self, limit: usize) -> Vec<Activity> {
        let mut result: Vec<_> = self.entries.iter().rev().cloned().collect();
        result.sort_by(|a, b| b.at.cmp(&a.at));
        result.truncate(limit);
        result
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hours: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap() + Duration::hours(hours)
    }

    fn entry(subject: &str, hours: i64) -> Activity {
        Activity::new(ActivityKind::PriceUpdate, subject, "Punjab", "₹45/kg", at(hours))
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let mut feed = ActivityFeed::default();
        feed.record(entry("Onions", 2));
        feed.record(entry("Tomatoes", 8));
        feed.record(entry("Carrots", 4));

        let subjects: Vec<_> = feed.recent(2).into_iter().map(|a| a.subject).collect();
        assert_eq!(subjects, vec!["Tomatoes", "Carrots"]);
    }

    #[test]
    fn full_feed_drops_oldest_entry() {
        let mut feed = ActivityFeed::with_capacity(2);
        feed.record(entry("a", 1));
        feed.record(entry("b", 2));
        feed.record(entry("c", 3));

        assert_eq!(feed.len(), 2);
        let subjects: Vec<_> = feed.recent(10).into_iter().map(|a| a.subject).collect();
        assert_eq!(subjects, vec!["c", "b"]);
    }

    #[test]
    fn zero_capacity_feed_stays_empty() {
        let mut feed = ActivityFeed::with_capacity(0);
        feed.record(entry("a", 1));
        assert!(feed.is_empty());
    }

    #[test]
    fn product_entries_carry_price_per_unit() {
        let product = crate::dashboard::tests::listing(
            "1",
            "Tomatoes",
            "s1",
            45,
            40,
            chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        );
        let activity = Activity::new_listing(&product, at(0));
        assert_eq!(activity.kind, ActivityKind::NewProduct);
        assert_eq!(activity.detail, "₹45/kg");
        assert_eq!(activity.location, "Punjab");
    }
}
