use chrono::{DateTime, Utc};
use tracing::warn;

use crate::db::StoreConn;
use crate::types::{AuctionType, Extreme, Location, PriceSummary};

/// The four extremal lookups that make up a summary.
#[derive(Debug, Clone, Copy)]
enum Slot {
    SellMin,
    SellMax,
    BuyMin,
    BuyMax,
}

impl Slot {
    const ALL: [Slot; 4] = [Slot::SellMin, Slot::SellMax, Slot::BuyMin, Slot::BuyMax];

    fn lookup(self) -> (AuctionType, Extreme) {
        match self {
            Slot::SellMin => (AuctionType::Offer, Extreme::Min),
            Slot::SellMax => (AuctionType::Offer, Extreme::Max),
            Slot::BuyMin => (AuctionType::Request, Extreme::Min),
            Slot::BuyMax => (AuctionType::Request, Extreme::Max),
        }
    }

    fn fill(self, summary: &mut PriceSummary, price: i64, at: DateTime<Utc>) {
        let (p, d) = match self {
            Slot::SellMin => (&mut summary.sell_price_min, &mut summary.sell_price_min_date),
            Slot::SellMax => (&mut summary.sell_price_max, &mut summary.sell_price_max_date),
            Slot::BuyMin => (&mut summary.buy_price_min, &mut summary.buy_price_min_date),
            Slot::BuyMax => (&mut summary.buy_price_max, &mut summary.buy_price_max_date),
        };
        *p = price;
        *d = Some(at);
    }
}

/// Best offer/request prices for one item at one location.
///
/// Returns None when none of the four lookups found a fresh order. A lookup
/// that errors, or whose timestamp is not a representable date, is logged
/// and counts as a miss.
pub async fn price_summary(
    conn: &mut StoreConn,
    item_id: &str,
    location: Location,
    since: i64,
) -> Option<PriceSummary> {
    let mut summary = PriceSummary::empty(item_id, location);
    let mut found = false;

    for slot in Slot::ALL {
        let (auction_type, extreme) = slot.lookup();
        match conn
            .extremal_order(item_id, location, auction_type, extreme, since)
            .await
        {
            Ok(Some(order)) => match DateTime::from_timestamp(order.updated_at, 0) {
                Some(at) => {
                    found = true;
                    slot.fill(&mut summary, order.price, at);
                }
                None => {
                    warn!(
                        item_id,
                        location = %location,
                        updated_at = order.updated_at,
                        "Order timestamp out of range, skipping"
                    );
                }
            },
            Ok(None) => {}
            Err(e) => {
                warn!(
                    item_id,
                    location = %location,
                    auction_type = %auction_type,
                    "Price lookup failed: {e}"
                );
            }
        }
    }

    found.then_some(summary)
}
