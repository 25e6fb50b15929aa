//! Catalog query engine.
//!
//! `filter` is total: malformed or unknown criteria never fail a query, they
//! either relax a predicate (malformed price range) or match nothing (unknown
//! category/location).

use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use agrimarket_core::{DomainError, Price, ValueObject};

use crate::product::{Category, Product};

/// Sentinel meaning "no constraint" for the string-typed criteria.
pub const ALL: &str = "all";

/// Category choices offered by the listing view.
pub const CATEGORY_OPTIONS: [&str; 4] = [ALL, "vegetables", "fruits", "grains"];

/// Location choices offered by the listing view.
pub const LOCATION_OPTIONS: [&str; 5] = [ALL, "Punjab", "Maharashtra", "Uttar Pradesh", "Kashmir"];

/// Price brackets (whole rupees) offered by the listing view.
pub const PRICE_RANGE_OPTIONS: [&str; 5] = [ALL, "0-25", "25-50", "50-100", "100+"];

fn is_sentinel(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case(ALL)
}

/// Price bracket over the retail price.
///
/// Bounds are inclusive; `max: None` leaves the bracket open at the top.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    #[default]
    Any,
    Between { min: Price, max: Option<Price> },
}

impl ValueObject for PriceRange {}

impl PriceRange {
    /// Closed bracket `[min, max]` in whole rupees.
    pub fn between(min_rupees: u64, max_rupees: u64) -> Self {
        PriceRange::Between {
            min: Price::from_rupees(min_rupees),
            max: Some(Price::from_rupees(max_rupees)),
        }
    }

    /// Open-ended bracket `[min, ∞)` in whole rupees.
    pub fn at_least(min_rupees: u64) -> Self {
        PriceRange::Between {
            min: Price::from_rupees(min_rupees),
            max: None,
        }
    }

    /// Parse a bracket token such as `"25-50"`, `"100+"` or `"all"`.
    ///
    /// Malformed tokens relax to [`PriceRange::Any`] instead of failing the query.
    pub fn parse(token: &str) -> Self {
        match token.parse::<PriceRange>() {
            Ok(range) => range,
            Err(err) => {
                tracing::warn!(token, error = %err, "ignoring malformed price range");
                PriceRange::Any
            }
        }
    }

    pub fn contains(&self, price: Price) -> bool {
        match *self {
            PriceRange::Any => true,
            PriceRange::Between { min, max } => {
                price >= min && max.is_none_or(|max| price <= max)
            }
        }
    }
}

impl FromStr for PriceRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_sentinel(s) {
            return Ok(PriceRange::Any);
        }

        let token = s.trim();
        let rupees = |raw: &str| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| DomainError::validation(format!("price range '{token}': {e}")))
        };

        if let Some(min) = token.strip_suffix('+') {
            return Ok(PriceRange::at_least(rupees(min)?));
        }

        let (min, max) = token.split_once('-').ok_or_else(|| {
            DomainError::validation(format!("price range '{token}': expected 'min-max' or 'min+'"))
        })?;
        let (min, max) = (rupees(min)?, rupees(max)?);
        if min > max {
            return Err(DomainError::validation(format!(
                "price range '{token}': lower bound exceeds upper bound"
            )));
        }
        Ok(PriceRange::between(min, max))
    }
}

/// User-selected constraints for one listing query.
///
/// `None` / [`PriceRange::Any`] / empty search mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub price_range: PriceRange,
    /// Hide listings whose `available_until` is before this date.
    pub available_on: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Criteria that match every product.
    pub fn any() -> Self {
        Self::default()
    }

    /// Build criteria from raw select/input values, where `"all"` (or an empty
    /// value) deactivates the corresponding predicate.
    pub fn from_raw(search: &str, category: &str, location: &str, price_range: &str) -> Self {
        Self {
            search: search.to_string(),
            category: (!is_sentinel(category)).then(|| Category::parse(category)),
            location: (!is_sentinel(location)).then(|| location.trim().to_string()),
            price_range: PriceRange::parse(price_range),
            available_on: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    pub fn available_on(mut self, date: NaiveDate) -> Self {
        self.available_on = Some(date);
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty()
            && self.category.is_none()
            && self.location.is_none()
            && self.price_range == PriceRange::Any
            && self.available_on.is_none()
    }

    /// Whether a single product satisfies every active predicate.
    pub fn matches(&self, product: &Product) -> bool {
        Matcher::new(self).matches(product)
    }
}

/// Criteria with the search needle lowercased once per query.
struct Matcher<'a> {
    criteria: &'a FilterCriteria,
    needle: String,
}

impl<'a> Matcher<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            criteria,
            needle: criteria.search.to_lowercase(),
        }
    }

    fn matches(&self, product: &Product) -> bool {
        let c = self.criteria;

        let search = self.needle.is_empty() || product.name().to_lowercase().contains(&self.needle);
        let category = c.category.as_ref().is_none_or(|cat| product.category() == cat);
        let location = c.location.as_deref().is_none_or(|loc| product.location() == loc);
        let price = c.price_range.contains(product.price());
        let available = c.available_on.is_none_or(|date| product.is_available_on(date));

        search && category && location && price && available
    }
}

/// Products matching `criteria`, in catalog order.
pub fn filter(catalog: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let matcher = Matcher::new(criteria);
    let matched: Vec<Product> = catalog
        .iter()
        .filter(|p| matcher.matches(p))
        .cloned()
        .collect();

    tracing::debug!(
        catalog = catalog.len(),
        matched = matched.len(),
        search = %criteria.search,
        "filtered catalog"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{NewProduct, Quality, SellerType};
    use agrimarket_core::{ProductId, SellerId};

    fn product(id: &str, name: &str, category: &str, location: &str, rupees: u64) -> Product {
        priced(id, name, category, location, Price::from_rupees(rupees))
    }

    fn priced(id: &str, name: &str, category: &str, location: &str, price: Price) -> Product {
        Product::new(NewProduct {
            id: ProductId::new(id).unwrap(),
            name: name.to_string(),
            category: Category::parse(category),
            quantity: 100,
            unit: "kg".to_string(),
            price,
            wholesale_price: Price::from_minor(price.minor().saturating_sub(500)),
            government_price: price,
            seller_id: SellerId::new(format!("seller-{id}")).unwrap(),
            seller_name: "Seller".to_string(),
            seller_type: SellerType::Farmer,
            location: location.to_string(),
            quality: Quality::Standard,
            available_until: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            image: String::new(),
        })
        .unwrap()
    }

    fn tomatoes_and_carrots() -> Vec<Product> {
        vec![
            product("1", "Tomatoes", "vegetables", "Punjab", 45),
            product("2", "Carrots", "vegetables", "Kashmir", 55),
        ]
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn price_range_parses_closed_and_open_brackets() {
        assert_eq!(PriceRange::parse("25-50"), PriceRange::between(25, 50));
        assert_eq!(PriceRange::parse("100+"), PriceRange::at_least(100));
        assert_eq!(PriceRange::parse("all"), PriceRange::Any);
        assert_eq!(PriceRange::parse("ALL"), PriceRange::Any);
    }

    #[test]
    fn malformed_price_range_relaxes_to_any() {
        for token in ["abc", "10-", "-5", "50-25", "1-2-3", "+"] {
            assert_eq!(PriceRange::parse(token), PriceRange::Any, "token {token}");
            assert!(token.parse::<PriceRange>().is_err(), "token {token}");
        }
    }

    #[test]
    fn raw_location_is_trimmed_but_keeps_its_case() {
        let padded = FilterCriteria::from_raw("", "all", " Punjab ", "all");
        assert_eq!(padded.location.as_deref(), Some("Punjab"));

        let lower = FilterCriteria::from_raw("", "all", "punjab", "all");
        assert_eq!(lower.location.as_deref(), Some("punjab"));
    }

    #[test]
    fn price_range_bounds_are_inclusive() {
        let range = PriceRange::between(25, 50);
        assert!(range.contains(Price::from_rupees(25)));
        assert!(range.contains(Price::from_rupees(50)));
        assert!(!range.contains(Price::from_minor(5001)));
        assert!(!range.contains(Price::from_minor(2499)));
        assert!(PriceRange::at_least(100).contains(Price::from_rupees(1_000_000)));
    }

    #[test]
    fn category_and_price_scenario_keeps_only_tomatoes() {
        let catalog = tomatoes_and_carrots();
        let criteria = FilterCriteria::from_raw("", "vegetables", "all", "25-50");
        assert_eq!(names(&filter(&catalog, &criteria)), vec!["Tomatoes"]);
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        let criteria = FilterCriteria::from_raw("tom", "fruits", "Punjab", "0-25");
        assert!(filter(&[], &criteria).is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = tomatoes_and_carrots();
        let criteria = FilterCriteria::any().with_search("OMAT");
        assert_eq!(names(&filter(&catalog, &criteria)), vec!["Tomatoes"]);
    }

    #[test]
    fn unconstrained_criteria_return_full_catalog() {
        let catalog = tomatoes_and_carrots();
        let criteria = FilterCriteria::from_raw("", "all", "all", "all");
        assert!(criteria.is_unconstrained());
        assert_eq!(filter(&catalog, &criteria), catalog);
    }

    #[test]
    fn unknown_category_or_location_matches_nothing() {
        let catalog = tomatoes_and_carrots();
        assert!(filter(&catalog, &FilterCriteria::from_raw("", "spices", "all", "all")).is_empty());
        assert!(filter(&catalog, &FilterCriteria::from_raw("", "all", "Atlantis", "all")).is_empty());
    }

    #[test]
    fn location_match_is_case_sensitive() {
        let catalog = tomatoes_and_carrots();
        assert!(filter(&catalog, &FilterCriteria::any().with_location("punjab")).is_empty());
        assert_eq!(
            names(&filter(&catalog, &FilterCriteria::any().with_location("Punjab"))),
            vec!["Tomatoes"]
        );
    }

    #[test]
    fn category_selector_ignores_case() {
        let catalog = tomatoes_and_carrots();
        let criteria = FilterCriteria::from_raw("", "Vegetables", "all", "all");
        assert_eq!(filter(&catalog, &criteria).len(), 2);
    }

    #[test]
    fn open_ended_bracket_has_no_upper_bound() {
        let catalog = vec![
            product("1", "Saffron", "other", "Kashmir", 400),
            product("2", "Onions", "vegetables", "Maharashtra", 35),
            product("3", "Apples", "fruits", "Kashmir", 100),
        ];
        let result = filter(&catalog, &FilterCriteria::any().with_price_range(PriceRange::parse("100+")));
        assert_eq!(names(&result), vec!["Saffron", "Apples"]);
    }

    #[test]
    fn expiry_filter_is_opt_in() {
        let catalog = tomatoes_and_carrots();
        let later = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(filter(&catalog, &FilterCriteria::any()).len(), 2);
        assert!(filter(&catalog, &FilterCriteria::any().available_on(later)).is_empty());
    }

    #[test]
    fn option_lists_start_with_the_sentinel() {
        assert_eq!(CATEGORY_OPTIONS[0], ALL);
        assert_eq!(LOCATION_OPTIONS[0], ALL);
        assert_eq!(PRICE_RANGE_OPTIONS[0], ALL);
        for token in PRICE_RANGE_OPTIONS {
            assert!(token.parse::<PriceRange>().is_ok());
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const LOCATIONS: [&str; 4] = ["Punjab", "Maharashtra", "Uttar Pradesh", "Kashmir"];
        const CATEGORIES: [&str; 4] = ["vegetables", "fruits", "grains", "pulses"];

        fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
            prop::collection::vec(
                (
                    "[A-Za-z][A-Za-z ]{0,15}",
                    prop::sample::select(CATEGORIES.to_vec()),
                    prop::sample::select(LOCATIONS.to_vec()),
                    0u64..20_000,
                ),
                0..30,
            )
            .prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (name, category, location, minor))| {
                        priced(&i.to_string(), &name, category, location, Price::from_minor(minor))
                    })
                    .collect()
            })
        }

        fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
            (
                "[a-zA-Z]{0,3}",
                prop::sample::select(vec!["all", "vegetables", "fruits", "grains", "spices"]),
                prop::sample::select(vec!["all", "Punjab", "Kashmir", "Goa"]),
                prop::sample::select(PRICE_RANGE_OPTIONS.to_vec()),
            )
                .prop_map(|(search, category, location, range)| {
                    FilterCriteria::from_raw(&search, category, location, range)
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: no active predicate returns the catalog unchanged.
            #[test]
            fn unconstrained_filter_is_identity(catalog in arb_catalog()) {
                prop_assert_eq!(filter(&catalog, &FilterCriteria::any()), catalog);
            }

            /// Property: filtering twice with the same criteria changes nothing.
            #[test]
            fn filter_is_idempotent(catalog in arb_catalog(), criteria in arb_criteria()) {
                let once = filter(&catalog, &criteria);
                let twice = filter(&once, &criteria);
                prop_assert_eq!(once, twice);
            }

            /// Property: every result satisfies each active predicate.
            #[test]
            fn results_satisfy_active_predicates(catalog in arb_catalog(), criteria in arb_criteria()) {
                let needle = criteria.search.to_lowercase();
                for p in filter(&catalog, &criteria) {
                    prop_assert!(p.name().to_lowercase().contains(&needle));
                    if let Some(category) = &criteria.category {
                        prop_assert_eq!(p.category(), category);
                    }
                    if let Some(location) = &criteria.location {
                        prop_assert_eq!(p.location(), location.as_str());
                    }
                    prop_assert!(criteria.price_range.contains(p.price()));
                }
            }

            /// Property: "25-50" keeps 25 <= price <= 50, "100+" keeps price >= 100.
            #[test]
            fn brackets_bound_result_prices(catalog in arb_catalog()) {
                for p in filter(&catalog, &FilterCriteria::from_raw("", "all", "all", "25-50")) {
                    prop_assert!(p.price() >= Price::from_rupees(25));
                    prop_assert!(p.price() <= Price::from_rupees(50));
                }
                for p in filter(&catalog, &FilterCriteria::from_raw("", "all", "all", "100+")) {
                    prop_assert!(p.price() >= Price::from_rupees(100));
                }
            }

            /// Property: the result is a subsequence of the catalog.
            #[test]
            fn filter_preserves_catalog_order(catalog in arb_catalog(), criteria in arb_criteria()) {
                let result = filter(&catalog, &criteria);
                let mut cursor = catalog.iter();
                for p in &result {
                    prop_assert!(cursor.any(|c| c == p));
                }
                let expected = catalog.iter().filter(|p| criteria.matches(p)).count();
                prop_assert_eq!(result.len(), expected);
            }
        }
    }
}
