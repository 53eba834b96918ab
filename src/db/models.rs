/// Row types for the tables written by the ingestion service. Only the
/// columns the read path consumes are selected.

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MarketOrderRow {
    pub price: i64,
    /// Unix seconds, UTC.
    pub updated_at: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MarketStatsRow {
    /// Unix seconds, UTC.
    pub timestamp: i64,
    pub price_min: i64,
    pub price_max: i64,
    pub price_avg: f64,
}
