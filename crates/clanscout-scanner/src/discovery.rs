//! Discovery stage: one clan search per term.

use crate::state::SeenClanTags;
use clanscout_api::{ClanSearch, ClanSummary, GameApi};
use tracing::debug;

/// Shortest name the clan search endpoint accepts.
pub const MIN_TERM_LEN: usize = 3;

/// Search clans named like `term` and return the ones not seen before.
///
/// Every returned tag is claimed in `seen` before the caller filters it,
/// so a clan rejected by the language or league filter is never searched
/// up again in this state. A failed search yields nothing.
pub async fn discover(
    api: &dyn GameApi,
    term: String,
    seen: &SeenClanTags,
    min_members: u32,
    max_members: u32,
) -> Vec<ClanSummary> {
    if term.chars().count() < MIN_TERM_LEN {
        debug!("Skipping short search term {:?}", term);
        return Vec::new();
    }

    let query = ClanSearch::new(term).with_members(min_members, max_members);
    let found = api.search_clans(&query).await;
    let total = found.len();

    let fresh: Vec<ClanSummary> = found
        .into_iter()
        .filter(|clan| seen.claim(&clan.tag))
        .collect();

    debug!(
        "Term {:?}: {} clans returned, {} new",
        query.name,
        total,
        fresh.len()
    );
    fresh
}
