//! Search orchestrator running discovery and enrichment side by side.
//!
//! A single loop owns two sets of in-flight futures: clan searches (bounded
//! by `FilterCriteria::discovery_workers`) and clan enrichments. Whichever
//! finishes first is handled first, so a clan found by an early search is
//! being enriched while later searches are still running. Roster and
//! profile calls across all clans share one semaphore of
//! `FilterCriteria::enrichment_workers` permits.

use crate::discovery::{discover, MIN_TERM_LEN};
use crate::enrichment::enrich_clan;
use crate::error::{Result, ScanError};
use crate::events::{ProgressEvent, ProgressSink};
use crate::filter::FilterCriteria;
use crate::state::{ContinuationState, SeenClanTags};
use crate::terms::{default_terms, terms_from_config};
use clanscout_api::{GameApi, PlayerProfile};
use clanscout_core::TermsConfig;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Semaphore;

/// Counters describing one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Clan searches issued
    pub terms_queried: usize,
    /// Clans returned by searches that had not been seen before
    pub clans_discovered: usize,
    /// Clans dropped by the language or league filter
    pub clans_filtered: usize,
    /// Clans whose enrichment finished
    pub clans_enriched: usize,
    /// Clans moved to the pending queue because the cap was reached
    pub clans_deferred: usize,
    /// Player profiles fetched successfully
    pub profiles_fetched: usize,
    /// Players that passed every filter
    pub players_matched: usize,
    /// Whether this run stopped at `max_clans`
    pub cap_reached: bool,
    /// Terms left for later runs
    pub terms_remaining: usize,
    /// Clans waiting for the next run
    pub clans_pending: usize,
}

/// Players found by one run plus its counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    /// Matches from this run only, in completion order
    pub players: Vec<PlayerProfile>,
    /// Run counters
    pub report: SearchReport,
}

/// Finds active players through a [`GameApi`].
pub struct ClanScanner {
    api: Arc<dyn GameApi>,
    terms: Vec<String>,
}

impl ClanScanner {
    /// Scanner over the built-in term universe.
    #[must_use]
    pub fn new(api: Arc<dyn GameApi>) -> Self {
        Self {
            api,
            terms: default_terms().into_iter().collect(),
        }
    }

    /// Replace the term universe. Order is kept; it decides query order.
    ///
    /// Terms shorter than [`MIN_TERM_LEN`] are dropped with a warning since
    /// the search endpoint rejects them.
    #[must_use]
    pub fn with_terms(mut self, terms: impl IntoIterator<Item = String>) -> Self {
        let (terms, rejected): (Vec<String>, Vec<String>) = terms
            .into_iter()
            .partition(|term| term.chars().count() >= MIN_TERM_LEN);
        if !rejected.is_empty() {
            tracing::warn!(
                "Ignoring {} search terms shorter than {} characters: {:?}",
                rejected.len(),
                MIN_TERM_LEN,
                rejected
            );
        }
        self.terms = terms;
        self
    }

    /// Use the word lists from the `[terms]` config section.
    #[must_use]
    pub fn with_terms_config(self, config: &TermsConfig) -> Self {
        self.with_terms(terms_from_config(config))
    }

    /// The term universe a fresh state starts from.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Run one search pass against `state`.
    ///
    /// Pending clans from a previous capped run are enriched first, then
    /// remaining terms are queried until they run out or `max_clans` clans
    /// have been handed to enrichment. Searches already in flight when the
    /// cap is hit still finish; their new clans go to the pending queue.
    /// Matches are returned and also appended to `state`'s results.
    ///
    /// Errors only on invalid criteria or an empty term universe, before
    /// any API call is made.
    pub async fn run_search(
        &self,
        criteria: &FilterCriteria,
        state: &mut ContinuationState,
        progress: Option<UnboundedSender<ProgressEvent>>,
    ) -> Result<SearchOutcome> {
        criteria.validate()?;
        if self.terms.is_empty() {
            return Err(ScanError::NoSearchTerms);
        }

        let api: &dyn GameApi = self.api.as_ref();
        let sink = ProgressSink::new(progress);
        let permits = Semaphore::new(criteria.enrichment_workers());
        let window = criteria.discovery_workers();

        let ContinuationState {
            seen,
            pending_clans,
            remaining_terms,
            results,
        } = state;
        let seen: &SeenClanTags = seen;
        let terms =
            remaining_terms.get_or_insert_with(|| self.terms.iter().cloned().collect::<VecDeque<_>>());

        tracing::info!(
            "Starting search: {} terms left, {} pending clans, {} seen, cap {}",
            terms.len(),
            pending_clans.len(),
            seen.len(),
            criteria.max_clans
        );

        let mut report = SearchReport::default();
        let mut players = Vec::new();
        let mut enrolled = 0usize;
        let mut discoveries = FuturesUnordered::new();
        let mut enrichments = FuturesUnordered::new();

        while enrolled < criteria.max_clans {
            let Some(clan) = pending_clans.pop_front() else {
                break;
            };
            if !criteria.matches_clan(&clan) {
                report.clans_filtered += 1;
                continue;
            }
            enrolled += 1;
            sink.emit(ProgressEvent::ClanFound(clan.clone()));
            enrichments.push(enrich_clan(api, clan, criteria, &permits, &sink));
        }

        loop {
            while enrolled < criteria.max_clans && discoveries.len() < window {
                let Some(term) = terms.pop_front() else {
                    break;
                };
                report.terms_queried += 1;
                discoveries.push(discover(
                    api,
                    term,
                    seen,
                    criteria.min_members,
                    criteria.max_members,
                ));
            }

            if discoveries.is_empty() && enrichments.is_empty() {
                break;
            }

            tokio::select! {
                Some(found) = discoveries.next(), if !discoveries.is_empty() => {
                    report.clans_discovered += found.len();
                    for clan in found {
                        // Over-cap clans are kept unfiltered; the next run
                        // filters them with its own criteria.
                        if enrolled >= criteria.max_clans {
                            report.clans_deferred += 1;
                            pending_clans.push_back(clan);
                            continue;
                        }
                        if !criteria.matches_clan(&clan) {
                            report.clans_filtered += 1;
                            continue;
                        }
                        enrolled += 1;
                        sink.emit(ProgressEvent::ClanFound(clan.clone()));
                        enrichments.push(enrich_clan(api, clan, criteria, &permits, &sink));
                    }
                }
                Some(outcome) = enrichments.next(), if !enrichments.is_empty() => {
                    report.clans_enriched += 1;
                    report.profiles_fetched += outcome.profiles_fetched;
                    players.extend(outcome.players);
                }
                else => break,
            }
        }

        report.players_matched = players.len();
        report.cap_reached = enrolled >= criteria.max_clans;
        report.terms_remaining = terms.len();
        report.clans_pending = pending_clans.len();
        results.extend(players.iter().cloned());

        tracing::info!(
            "Search finished: {} terms queried, {} clans enriched, {} players matched, {} pending",
            report.terms_queried,
            report.clans_enriched,
            report.players_matched,
            report.clans_pending
        );

        Ok(SearchOutcome { players, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clanscout_api::{ClanDetails, ClanSearch, ClanSummary};
    use clanscout_core::Tag;

    struct NoData;

    #[async_trait]
    impl GameApi for NoData {
        async fn search_clans(&self, _query: &ClanSearch) -> Vec<ClanSummary> {
            Vec::new()
        }

        async fn clan(&self, _clan_tag: &Tag) -> Option<ClanDetails> {
            None
        }

        async fn player(&self, _player_tag: &Tag) -> Option<PlayerProfile> {
            None
        }

        async fn probe(&self) -> clanscout_api::Result<u16> {
            Ok(200)
        }
    }

    #[test]
    fn test_default_terms_loaded() {
        let scanner = ClanScanner::new(Arc::new(NoData));
        assert_eq!(scanner.terms().len(), default_terms().len());
    }

    #[test]
    fn test_terms_config_replaces_universe() {
        let config = TermsConfig {
            prefixes: Some(vec!["Iron".to_string()]),
            suffixes: Some(vec!["Wolves".to_string()]),
        };
        let scanner = ClanScanner::new(Arc::new(NoData)).with_terms_config(&config);
        assert_eq!(scanner.terms(), ["Iron", "Iron Wolves", "Wolves"]);
    }

    #[test]
    fn test_short_terms_are_dropped() {
        let scanner = ClanScanner::new(Arc::new(NoData))
            .with_terms(["Ab", "", "Iron", "Ice"].map(String::from));
        assert_eq!(scanner.terms(), ["Iron", "Ice"]);
    }

    #[tokio::test]
    async fn test_empty_universe_is_rejected() {
        let scanner = ClanScanner::new(Arc::new(NoData)).with_terms(Vec::new());
        let mut state = ContinuationState::new();
        let err = scanner
            .run_search(&FilterCriteria::default(), &mut state, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::NoSearchTerms));
    }

    #[tokio::test]
    async fn test_sweep_consumes_all_terms() {
        let scanner = ClanScanner::new(Arc::new(NoData))
            .with_terms(["Alpha", "Bravo", "Charlie"].map(String::from));
        let mut state = ContinuationState::new();
        let outcome = scanner
            .run_search(&FilterCriteria::default(), &mut state, None)
            .await
            .unwrap();

        assert_eq!(outcome.report.terms_queried, 3);
        assert_eq!(outcome.report.terms_remaining, 0);
        assert!(!outcome.report.cap_reached);
        assert!(state.is_exhausted());
    }
}
