use chrono::Utc;

use agrimarket_app::{AppConfig, MarketApp};

fn main() -> anyhow::Result<()> {
    agrimarket_observability::init_with(AppConfig::log_format_from_env());
    let config = AppConfig::from_env();

    let mut app = MarketApp::from_config(&config)?;

    if let Some(credentials) = &config.login {
        if let Err(e) = app.login(credentials) {
            tracing::warn!(error = %e, "startup sign-in failed; continuing signed out");
        }
    }

    let today = Utc::now().date_naive();
    let criteria = config.listing.criteria(today);
    let listing = app.list_products(&criteria);
    tracing::info!(matched = listing.len(), "rendered listing");

    let output = serde_json::json!({
        "dashboard": app.dashboard(today),
        "listing": listing,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
