//! Retail vs wholesale vs government price comparisons.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use agrimarket_core::Price;
use agrimarket_products::Product;

/// One listing's three price points side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub product_name: String,
    pub region: String,
    pub retail_price: Price,
    pub wholesale_price: Price,
    pub government_price: Price,
    /// Retail premium over the government rate in basis points (negative when
    /// retail is below it). `None` if the government rate is zero.
    pub premium_bps: Option<i64>,
}

impl PriceComparison {
    pub fn from_product(product: &Product) -> Self {
        let retail = product.price().minor() as i128;
        let government = product.government_price().minor() as i128;
        let premium_bps = (government > 0).then(|| {
            let bps = (retail - government) * 10_000 / government;
            bps.clamp(i64::MIN as i128, i64::MAX as i128) as i64
        });

        Self {
            product_name: product.name().to_string(),
            region: product.location().to_string(),
            retail_price: product.price(),
            wholesale_price: product.wholesale_price(),
            government_price: product.government_price(),
            premium_bps,
        }
    }

    pub fn premium_percent(&self) -> Option<f64> {
        self.premium_bps.map(|bps| bps as f64 / 100.0)
    }
}

/// Comparisons for every listing, in catalog order.
pub fn price_comparisons(catalog: &[Product]) -> Vec<PriceComparison> {
    catalog.iter().map(PriceComparison::from_product).collect()
}

/// Mean prices of one region's listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalAverage {
    pub listings: usize,
    pub retail_price: Price,
    pub wholesale_price: Price,
    pub government_price: Price,
}

/// Mean prices per region, keyed by location (sorted by name).
pub fn regional_averages(catalog: &[Product]) -> BTreeMap<String, RegionalAverage> {
    let mut by_region: BTreeMap<&str, Vec<&Product>> = BTreeMap::new();
    for product in catalog {
        by_region.entry(product.location()).or_default().push(product);
    }

    by_region
        .into_iter()
        .map(|(region, products)| {
            let mean = |f: fn(&Product) -> Price| {
                Price::mean(products.iter().map(|p| f(p))).unwrap_or(Price::ZERO)
            };
            let average = RegionalAverage {
                listings: products.len(),
                retail_price: mean(Product::price),
                wholesale_price: mean(Product::wholesale_price),
                government_price: mean(Product::government_price),
            };
            (region.to_string(), average)
        })
        .collect()
}
