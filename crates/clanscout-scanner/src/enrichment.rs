//! Enrichment stage: roster, pre-filter, profiles, activity filter.

use crate::events::{ProgressEvent, ProgressSink};
use crate::filter::FilterCriteria;
use clanscout_api::{ClanSummary, GameApi, PlayerProfile};
use clanscout_core::Tag;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// What enriching one clan produced.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentOutcome {
    /// Clan that was enriched
    pub clan_tag: Option<Tag>,
    /// Players that passed every filter
    pub players: Vec<PlayerProfile>,
    /// Members listed on the roster
    pub roster_size: usize,
    /// Members left after the role and town hall pre-filter
    pub eligible_members: usize,
    /// Profiles that came back from the API
    pub profiles_fetched: usize,
}

/// Enrich one clan.
///
/// Roster and profile fetches each hold a permit from `permits`, which is
/// shared by every clan in the run. Failed fetches count as missing data.
pub async fn enrich_clan(
    api: &dyn GameApi,
    clan: ClanSummary,
    criteria: &FilterCriteria,
    permits: &Semaphore,
    sink: &ProgressSink,
) -> EnrichmentOutcome {
    sink.emit(ProgressEvent::ClanProcessing(clan.clone()));

    let mut outcome = EnrichmentOutcome {
        clan_tag: Some(clan.tag.clone()),
        ..EnrichmentOutcome::default()
    };

    let roster = {
        let Ok(_permit) = permits.acquire().await else {
            warn!("Worker pool closed before roster of {}", clan.tag);
            return outcome;
        };
        api.clan_members(&clan.tag).await
    };
    outcome.roster_size = roster.len();

    let eligible: Vec<Tag> = roster
        .into_iter()
        .filter(|member| criteria.member_eligible(member))
        .map(|member| member.tag)
        .collect();
    outcome.eligible_members = eligible.len();

    let mut profiles: FuturesUnordered<_> = eligible
        .iter()
        .map(|tag| async move {
            let _permit = permits.acquire().await.ok()?;
            api.player(tag).await
        })
        .collect();

    while let Some(profile) = profiles.next().await {
        let Some(player) = profile else { continue };
        outcome.profiles_fetched += 1;
        if criteria.player_passes(&player) {
            sink.emit(ProgressEvent::PlayerFound(player.clone()));
            outcome.players.push(player);
        }
    }

    debug!(
        "Clan {} ({}): {} members, {} eligible, {} profiles, {} active",
        clan.name,
        clan.tag,
        outcome.roster_size,
        outcome.eligible_members,
        outcome.profiles_fetched,
        outcome.players.len()
    );
    outcome
}
