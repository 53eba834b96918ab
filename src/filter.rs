//! Turns raw request parameters into the concrete item ids and locations to
//! aggregate over.

use tracing::{debug, warn};

use crate::db::StoreConn;
use crate::types::Location;

/// Oldest `updated_at` (unix seconds) still considered fresh. Inclusive.
/// A negative age puts the cutoff in the future.
pub fn freshness_cutoff(now: i64, age_secs: i64) -> i64 {
    now.saturating_sub(age_secs)
}

/// Resolve a comma-separated list of location substrings.
///
/// An empty filter selects every location in canonical order. Each token picks
/// the first location whose name contains it (case-sensitive); unknown tokens
/// are dropped. Tokens that hit the same location yield repeated entries.
pub fn resolve_locations(raw: &str) -> Vec<Location> {
    if raw.is_empty() {
        return Location::ALL.to_vec();
    }

    raw.split(',')
        .filter_map(|token| {
            Location::ALL
                .into_iter()
                .find(|loc| loc.as_str().contains(token))
        })
        .collect()
}

/// A single token of the item parameter.
#[derive(Debug, PartialEq, Eq)]
enum ItemToken<'a> {
    /// Bare `*`: never expanded.
    MatchAll,
    /// Contains `*`; holds the equivalent SQL `LIKE` pattern.
    Pattern(String),
    Literal(&'a str),
}

fn classify(token: &str) -> ItemToken<'_> {
    if token == "*" {
        ItemToken::MatchAll
    } else if token.contains('*') {
        ItemToken::Pattern(token.replace('*', "%"))
    } else {
        ItemToken::Literal(token)
    }
}

/// Resolve a comma-separated list of item ids and wildcard patterns.
///
/// Patterns expand to the item ids with at least one order updated at or
/// after `since`. A failed expansion is logged and skipped. The result keeps
/// token order and may contain duplicates.
pub async fn resolve_item_ids(conn: &mut StoreConn, raw: &str, since: i64) -> Vec<String> {
    let mut item_ids = Vec::new();

    for token in raw.split(',') {
        match classify(token) {
            ItemToken::MatchAll => continue,
            ItemToken::Literal(id) => item_ids.push(id.to_string()),
            ItemToken::Pattern(pattern) => match conn.item_ids_like(&pattern, since).await {
                Ok(found) => {
                    debug!(pattern = %pattern, matches = found.len(), "Expanded item pattern");
                    item_ids.extend(found);
                }
                Err(e) => {
                    warn!(pattern = %pattern, "Item pattern lookup failed: {e}");
                }
            },
        }
    }

    item_ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{break_table, insert_order, memory_store};
    use crate::types::AuctionType;

    #[test]
    fn empty_location_filter_selects_all_in_order() {
        assert_eq!(resolve_locations(""), Location::ALL.to_vec());
    }

    #[test]
    fn location_tokens_match_by_substring() {
        assert_eq!(
            resolve_locations("Caer,Fort"),
            vec![Location::Caerleon, Location::FortSterling]
        );
    }

    #[test]
    fn location_matching_is_case_sensitive_and_drops_unknowns() {
        assert_eq!(resolve_locations("caerleon,Atlantis"), Vec::<Location>::new());
    }

    #[test]
    fn first_canonical_match_wins() {
        // "Cross" is in five names; Swamp Cross comes first.
        assert_eq!(resolve_locations("Cross"), vec![Location::SwampCross]);
    }

    #[test]
    fn repeated_location_tokens_are_kept() {
        assert_eq!(
            resolve_locations("Martlock,Mart"),
            vec![Location::Martlock, Location::Martlock]
        );
    }

    #[test]
    fn token_classification() {
        assert_eq!(classify("*"), ItemToken::MatchAll);
        assert_eq!(classify("T4_*_LEATHER*"), ItemToken::Pattern("T4_%_LEATHER%".to_string()));
        assert_eq!(classify("T4_BAG"), ItemToken::Literal("T4_BAG"));
    }

    #[test]
    fn cutoff_is_now_minus_age() {
        assert_eq!(freshness_cutoff(1_000, 300), 700);
        assert_eq!(freshness_cutoff(1_000, -5), 1_005);
        assert_eq!(freshness_cutoff(i64::MIN, i64::MAX), i64::MIN);
        assert_eq!(freshness_cutoff(i64::MAX, i64::MIN), i64::MAX);
    }

    #[tokio::test]
    async fn wildcard_expands_against_fresh_orders() {
        let store = memory_store().await;
        insert_order(&store, "T1_BAG_OFFHAND", Location::Caerleon, AuctionType::Offer, 10, 5_000).await;
        insert_order(&store, "T1_BAGPACK", Location::Lymhurst, AuctionType::Request, 20, 5_000).await;
        insert_order(&store, "T1_BAGPACK", Location::Caerleon, AuctionType::Offer, 25, 5_000).await;
        insert_order(&store, "T2_BAG", Location::Caerleon, AuctionType::Offer, 10, 5_000).await;

        let mut conn = store.acquire().await.unwrap();
        let ids = resolve_item_ids(&mut conn, "T1_BAG*", 4_000).await;
        assert_eq!(ids, vec!["T1_BAGPACK".to_string(), "T1_BAG_OFFHAND".to_string()]);
    }

    #[tokio::test]
    async fn bare_star_expands_to_nothing() {
        let store = memory_store().await;
        insert_order(&store, "T4_BAG", Location::Caerleon, AuctionType::Offer, 10, 5_000).await;

        let mut conn = store.acquire().await.unwrap();
        assert!(resolve_item_ids(&mut conn, "*", 0).await.is_empty());
    }

    #[tokio::test]
    async fn literals_pass_through_and_duplicates_are_kept() {
        let store = memory_store().await;
        insert_order(&store, "T4_BAG", Location::Caerleon, AuctionType::Offer, 10, 5_000).await;

        let mut conn = store.acquire().await.unwrap();
        let ids = resolve_item_ids(&mut conn, "T8_CAPE,T4_B*,*,T4_*AG", 0).await;
        assert_eq!(ids, vec!["T8_CAPE", "T4_BAG", "T4_BAG"]);
    }

    #[tokio::test]
    async fn stale_orders_do_not_expand() {
        let store = memory_store().await;
        insert_order(&store, "T4_BAG", Location::Caerleon, AuctionType::Offer, 10, 100).await;

        let mut conn = store.acquire().await.unwrap();
        assert!(resolve_item_ids(&mut conn, "T4_*", 101).await.is_empty());
    }

    #[tokio::test]
    async fn failed_pattern_is_skipped_and_literals_survive() {
        let store = memory_store().await;
        insert_order(&store, "T4_BAG", Location::Caerleon, AuctionType::Offer, 10, 5_000).await;
        break_table(&store, "market_orders").await;

        let mut conn = store.acquire().await.unwrap();
        let ids = resolve_item_ids(&mut conn, "T4_*,T8_CAPE", 0).await;
        assert_eq!(ids, vec!["T8_CAPE"]);
    }
}
