use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// In-game trading hubs. Stored in the database by numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Thetford,
    SwampCross,
    Lymhurst,
    ForestCross,
    Bridgewatch,
    SteppeCross,
    HighlandCross,
    BlackMarket,
    Caerleon,
    Martlock,
    FortSterling,
    MountainCross,
}

impl Location {
    /// Canonical order used when no location filter is given.
    pub const ALL: [Location; 12] = [
        Location::Thetford,
        Location::SwampCross,
        Location::Lymhurst,
        Location::ForestCross,
        Location::Bridgewatch,
        Location::SteppeCross,
        Location::HighlandCross,
        Location::BlackMarket,
        Location::Caerleon,
        Location::Martlock,
        Location::FortSterling,
        Location::MountainCross,
    ];

    pub fn id(self) -> i64 {
        match self {
            Location::Thetford => 7,
            Location::SwampCross => 4,
            Location::Lymhurst => 1002,
            Location::ForestCross => 1006,
            Location::Bridgewatch => 2004,
            Location::SteppeCross => 2002,
            Location::HighlandCross => 3002,
            Location::BlackMarket => 3003,
            Location::Caerleon => 3005,
            Location::Martlock => 3008,
            Location::FortSterling => 4002,
            Location::MountainCross => 4006,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Location::Thetford => "Thetford",
            Location::SwampCross => "Swamp Cross",
            Location::Lymhurst => "Lymhurst",
            Location::ForestCross => "Forest Cross",
            Location::Bridgewatch => "Bridgewatch",
            Location::SteppeCross => "Steppe Cross",
            Location::HighlandCross => "Highland Cross",
            Location::BlackMarket => "Black Market",
            Location::Caerleon => "Caerleon",
            Location::Martlock => "Martlock",
            Location::FortSterling => "Fort Sterling",
            Location::MountainCross => "Mountain Cross",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Offers are sell orders, requests are buy orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionType {
    Offer,
    Request,
}

impl AuctionType {
    pub fn as_str(self) -> &'static str {
        match self {
            AuctionType::Offer => "offer",
            AuctionType::Request => "request",
        }
    }
}

impl std::fmt::Display for AuctionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which end of the price range an extremal lookup picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Min,
    Max,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Best prices for one item at one location. Unmatched lookups stay at
/// price 0 with no date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub item_id: String,
    #[serde(rename = "city")]
    pub location: Location,
    pub sell_price_min: i64,
    pub sell_price_min_date: Option<DateTime<Utc>>,
    pub sell_price_max: i64,
    pub sell_price_max_date: Option<DateTime<Utc>>,
    pub buy_price_min: i64,
    pub buy_price_min_date: Option<DateTime<Utc>>,
    pub buy_price_max: i64,
    pub buy_price_max_date: Option<DateTime<Utc>>,
}

impl PriceSummary {
    pub fn empty(item_id: &str, location: Location) -> Self {
        Self {
            item_id: item_id.to_string(),
            location,
            sell_price_min: 0,
            sell_price_min_date: None,
            sell_price_max: 0,
            sell_price_max_date: None,
            buy_price_min: 0,
            buy_price_min_date: None,
            buy_price_max: 0,
            buy_price_max_date: None,
        }
    }
}

/// Price history for one location, as parallel arrays for chart rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub location: Location,
    pub data: ChartData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    /// Milliseconds since the unix epoch.
    pub timestamps: Vec<i64>,
    pub prices_min: Vec<i64>,
    pub prices_max: Vec<i64>,
    pub prices_avg: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_ids_are_unique() {
        let mut ids: Vec<i64> = Location::ALL.iter().map(|l| l.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Location::ALL.len());
    }

    #[test]
    fn price_summary_uses_wire_names() {
        let summary = PriceSummary {
            sell_price_min: 42,
            sell_price_min_date: DateTime::from_timestamp(1_700_000_000, 0),
            ..PriceSummary::empty("T4_BAG", Location::FortSterling)
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["item_id"], "T4_BAG");
        assert_eq!(json["city"], "Fort Sterling");
        assert_eq!(json["sell_price_min"], 42);
        assert_eq!(json["sell_price_min_date"], "2023-11-14T22:13:20Z");
        assert_eq!(json["buy_price_max"], 0);
        assert!(json["buy_price_max_date"].is_null());
    }
}
