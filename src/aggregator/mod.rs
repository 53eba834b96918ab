pub mod charts;
pub mod prices;

use chrono::Utc;
use tracing::debug;

use crate::db::MarketStore;
use crate::error::Result;
use crate::filter::{freshness_cutoff, resolve_item_ids, resolve_locations};
use crate::types::{ChartSeries, PriceSummary};

pub use charts::chart_series;
pub use prices::price_summary;

/// Entry point for the read path. Takes plain strings, returns serializable
/// records; knows nothing about HTTP.
#[derive(Clone)]
pub struct PriceAggregator {
    store: MarketStore,
}

impl PriceAggregator {
    pub fn new(store: MarketStore) -> Self {
        Self { store }
    }

    pub async fn get_price_summaries(
        &self,
        item_patterns: &str,
        location_filter: &str,
        age_secs: i64,
    ) -> Result<Vec<PriceSummary>> {
        self.get_price_summaries_at(Utc::now().timestamp(), item_patterns, location_filter, age_secs)
            .await
    }

    /// Summaries for every resolved item × location, items outermost.
    /// Only a store connection failure is returned as an error.
    pub async fn get_price_summaries_at(
        &self,
        now: i64,
        item_patterns: &str,
        location_filter: &str,
        age_secs: i64,
    ) -> Result<Vec<PriceSummary>> {
        let mut conn = self.store.acquire().await?;
        let since = freshness_cutoff(now, age_secs);

        let locations = resolve_locations(location_filter);
        let item_ids = resolve_item_ids(&mut conn, item_patterns, since).await;

        let mut summaries = Vec::new();
        for item_id in &item_ids {
            for &location in &locations {
                if let Some(summary) = price_summary(&mut conn, item_id, location, since).await {
                    summaries.push(summary);
                }
            }
        }

        debug!(
            items = item_ids.len(),
            locations = locations.len(),
            results = summaries.len(),
            "Price summaries computed"
        );
        Ok(summaries)
    }

    pub async fn get_chart_series(
        &self,
        item_id: &str,
        location_filter: &str,
    ) -> Result<Vec<ChartSeries>> {
        let mut conn = self.store.acquire().await?;
        let locations = resolve_locations(location_filter);
        let series = chart_series(&mut conn, item_id, &locations).await;

        debug!(item_id, locations = locations.len(), results = series.len(), "Chart series computed");
        Ok(series)
    }
}
