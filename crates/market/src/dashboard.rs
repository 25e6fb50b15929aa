//! Dashboard summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use agrimarket_products::Product;

use crate::activity::{Activity, ActivityFeed};
use crate::comparison::{price_comparisons, PriceComparison};
use crate::stats::{MarketStats, StatDeltas};

/// Listings shown in the "current market prices" panel.
pub const DEFAULT_TOP_N: usize = 5;

/// The first `n` listings in catalog order.
pub fn top_n(catalog: &[Product], n: usize) -> Vec<Product> {
    catalog.iter().take(n).cloned().collect()
}

/// Everything the market dashboard renders, in one serializable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Display name of the signed-in user, if any.
    pub greeting: Option<String>,
    pub stats: MarketStats,
    /// Change since the baseline snapshot, when one was supplied.
    pub deltas: Option<StatDeltas>,
    pub top_products: Vec<PriceComparison>,
    pub recent_activity: Vec<Activity>,
}

impl DashboardSummary {
    pub fn build(catalog: &[Product], as_of: NaiveDate, top: usize) -> Self {
        let stats = MarketStats::compute(catalog, as_of);
        let top_products = price_comparisons(&top_n(catalog, top));

        tracing::debug!(
            catalog = catalog.len(),
            top = top_products.len(),
            active = stats.active_products,
            "built dashboard summary"
        );

        Self {
            greeting: None,
            stats,
            deltas: None,
            top_products,
            recent_activity: Vec::new(),
        }
    }

    pub fn with_greeting(mut self, name: impl Into<String>) -> Self {
        self.greeting = Some(name.into());
        self
    }

    pub fn with_baseline(mut self, baseline: &MarketStats) -> Self {
        self.deltas = Some(self.stats.delta_from(baseline));
        self
    }

    pub fn with_activity(mut self, feed: &ActivityFeed, limit: usize) -> Self {
        self.recent_activity = feed.recent(limit);
        self
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use agrimarket_core::{Entity, Price, ProductId, SellerId};
    use agrimarket_products::{Category, NewProduct, Quality, SellerType};
    use chrono::Utc;
    use proptest::prelude::*;

    /// Punjab vegetable listing with the given retail and government rates.
    pub(crate) fn listing(
        id: &str,
        name: &str,
        seller: &str,
        rupees: u64,
        government_rupees: u64,
        available_until: NaiveDate,
    ) -> Product {
        Product::new(NewProduct {
            id: ProductId::new(id).unwrap(),
            name: name.to_string(),
            category: Category::Vegetables,
            quantity: 100,
            unit: "kg".to_string(),
            price: Price::from_rupees(rupees),
            wholesale_price: Price::from_rupees(rupees.saturating_sub(5)),
            government_price: Price::from_rupees(government_rupees),
            seller_id: SellerId::new(seller).unwrap(),
            seller_name: seller.to_string(),
            seller_type: SellerType::Farmer,
            location: "Punjab".to_string(),
            quality: Quality::Standard,
            available_until,
            image: String::new(),
        })
        .unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn catalog(size: usize) -> Vec<Product> {
        (0..size)
            .map(|i| listing(&i.to_string(), &format!("Item {i}"), "s1", 10 + i as u64, 10, day()))
            .collect()
    }

    #[test]
    fn top_n_takes_leading_entries_in_order() {
        let products = catalog(8);
        let top = top_n(&products, DEFAULT_TOP_N);
        let ids: Vec<_> = top.iter().map(|p| p.id().as_str().to_string()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn top_n_of_short_catalog_returns_everything() {
        assert_eq!(top_n(&catalog(3), DEFAULT_TOP_N).len(), 3);
        assert!(top_n(&[], DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn build_assembles_all_panels() {
        let products = catalog(7);
        let baseline = MarketStats::compute(&products[..2], day());
        let mut feed = ActivityFeed::default();
        feed.record(Activity::new_listing(&products[6], Utc::now()));

        let summary = DashboardSummary::build(&products, day(), DEFAULT_TOP_N)
            .with_greeting("John Doe")
            .with_baseline(&baseline)
            .with_activity(&feed, 4);

        assert_eq!(summary.greeting.as_deref(), Some("John Doe"));
        assert_eq!(summary.top_products.len(), 5);
        assert_eq!(summary.top_products[0].product_name, "Item 0");
        assert_eq!(summary.stats.active_products, 7);
        assert_eq!(summary.deltas.unwrap().active_products.change, 5);
        assert_eq!(summary.recent_activity.len(), 1);
    }

    #[test]
    fn summary_serializes_for_presentation() {
        let summary = DashboardSummary::build(&catalog(1), day(), DEFAULT_TOP_N);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["stats"]["participants"], 1);
        assert!(json["greeting"].is_null());
    }

    proptest! {
        /// Property: top_n is a prefix of the catalog of length min(n, len).
        #[test]
        fn top_n_is_a_prefix(size in 0usize..20, n in 0usize..25) {
            let products = catalog(size);
            let top = top_n(&products, n);
            prop_assert_eq!(top.len(), n.min(size));
            prop_assert_eq!(&top[..], &products[..top.len()]);
        }
    }
}
