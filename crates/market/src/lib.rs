//! Market dashboard aggregation.
//!
//! Read-only summaries derived from the catalog: a top-N slice, market
//! statistics, price comparisons and a recent-activity feed.

pub mod activity;
pub mod comparison;
pub mod dashboard;
pub mod stats;

pub use activity::{Activity, ActivityFeed, ActivityKind};
pub use comparison::{price_comparisons, regional_averages, PriceComparison, RegionalAverage};
pub use dashboard::{top_n, DashboardSummary, DEFAULT_TOP_N};
pub use stats::{MarketStats, StatDelta, StatDeltas, Trend};
