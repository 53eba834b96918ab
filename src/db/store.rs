use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use tracing::info;

use crate::db::models::{MarketOrderRow, MarketStatsRow};
use crate::error::{AppError, Result};
use crate::types::{AuctionType, Extreme, Location};

// Orders are bucketed by minute first (most recent minute wins), then by price.
const LOWEST_ORDER_SQL: &str = r#"
    SELECT price, updated_at
    FROM market_orders
    WHERE location = ? AND item_id = ? AND auction_type = ? AND updated_at >= ?
    ORDER BY updated_at / 60 DESC, price ASC
    LIMIT 1
"#;

const HIGHEST_ORDER_SQL: &str = r#"
    SELECT price, updated_at
    FROM market_orders
    WHERE location = ? AND item_id = ? AND auction_type = ? AND updated_at >= ?
    ORDER BY updated_at / 60 DESC, price DESC
    LIMIT 1
"#;

/// Read-only handle over the market tables. Cheap to clone; wraps the pool.
#[derive(Clone)]
pub struct MarketStore {
    pool: SqlitePool,
}

impl MarketStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool against `uri`. Failing here is fatal at startup.
    pub async fn connect(uri: &str, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(uri)
            .await?;
        info!(max_connections, "Connected to market database");
        Ok(Self::new(pool))
    }

    /// Check out one connection for the duration of a request.
    pub async fn acquire(&self) -> Result<StoreConn> {
        let conn = self.pool.acquire().await.map_err(AppError::StoreUnavailable)?;
        Ok(StoreConn { conn })
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// A single pooled connection. All lookups for one request run on it.
pub struct StoreConn {
    conn: PoolConnection<Sqlite>,
}

impl StoreConn {
    /// Distinct item ids matching a SQL `LIKE` pattern with a fresh order.
    pub async fn item_ids_like(&mut self, pattern: &str, since: i64) -> Result<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT item_id
            FROM market_orders
            WHERE item_id LIKE ? AND updated_at >= ?
            GROUP BY item_id
            ORDER BY item_id
            "#,
        )
        .bind(pattern)
        .bind(since)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(ids)
    }

    /// The order picked by an extremal lookup, if any row is fresh enough.
    pub async fn extremal_order(
        &mut self,
        item_id: &str,
        location: Location,
        auction_type: AuctionType,
        extreme: Extreme,
        since: i64,
    ) -> Result<Option<MarketOrderRow>> {
        let sql = match extreme {
            Extreme::Min => LOWEST_ORDER_SQL,
            Extreme::Max => HIGHEST_ORDER_SQL,
        };

        let row = sqlx::query_as::<_, MarketOrderRow>(sql)
            .bind(location.id())
            .bind(item_id)
            .bind(auction_type.as_str())
            .bind(since)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row)
    }

    /// All rollup rows for an item at a location, oldest first.
    pub async fn stats_rows(&mut self, item_id: &str, location: Location) -> Result<Vec<MarketStatsRow>> {
        let rows = sqlx::query_as::<_, MarketStatsRow>(
            r#"
            SELECT timestamp, price_min, price_max, price_avg
            FROM market_stats
            WHERE item_id = ? AND location = ?
            ORDER BY timestamp ASC, id ASC
            "#,
        )
        .bind(item_id)
        .bind(location.id())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }
}
