use tracing::warn;

use crate::db::StoreConn;
use crate::types::{ChartData, ChartSeries, Location};

/// Price history for `item_id`, one series per location that has rollups.
/// Locations without rows, or whose lookup fails, are left out.
pub async fn chart_series(
    conn: &mut StoreConn,
    item_id: &str,
    locations: &[Location],
) -> Vec<ChartSeries> {
    let mut series = Vec::new();

    for &location in locations {
        let rows = match conn.stats_rows(item_id, location).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(item_id, location = %location, "Chart lookup failed: {e}");
                continue;
            }
        };
        if rows.is_empty() {
            continue;
        }

        let mut data = ChartData::default();
        for row in rows {
            // Chart clients want milliseconds.
            data.timestamps.push(row.timestamp.saturating_mul(1000));
            data.prices_min.push(row.price_min);
            data.prices_max.push(row.price_max);
            data.prices_avg.push(row.price_avg);
        }

        series.push(ChartSeries { location, data });
    }

    series
}
