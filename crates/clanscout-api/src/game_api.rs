//! The seam between the scanner and the game API.

use crate::error::Result;
use crate::models::{ClanDetails, ClanMember, ClanSearch, ClanSummary, PlayerProfile};
use async_trait::async_trait;
use clanscout_core::Tag;

/// Read access to the game's public directory.
///
/// Lookups never fail: implementations downgrade rate limiting, bad
/// statuses and transport errors to an empty list or `None` so one failed
/// call cannot stop a scan. Implementations must be thread-safe
/// (Send + Sync) for use from concurrent futures.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Search clans by name. Empty on failure.
    async fn search_clans(&self, query: &ClanSearch) -> Vec<ClanSummary>;

    /// Clan detail including the roster. `None` on failure.
    async fn clan(&self, clan_tag: &Tag) -> Option<ClanDetails>;

    /// Roster of a clan. Empty on failure.
    async fn clan_members(&self, clan_tag: &Tag) -> Vec<ClanMember> {
        self.clan(clan_tag)
            .await
            .map(|clan| clan.member_list)
            .unwrap_or_default()
    }

    /// Full profile of a player. `None` on failure.
    async fn player(&self, player_tag: &Tag) -> Option<PlayerProfile>;

    /// Cheap connectivity probe. Returns the HTTP status of a stable
    /// low-cost endpoint.
    ///
    /// # Errors
    /// Returns error on transport failure.
    async fn probe(&self) -> Result<u16>;
}
