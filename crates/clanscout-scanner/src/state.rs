//! Continuation state shared between pipeline runs.

use clanscout_api::{ClanSummary, PlayerProfile};
use clanscout_core::Tag;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// Clan tags already claimed by some run.
///
/// `claim` is an atomic check-and-insert, so two searches returning the same
/// clan at the same time hand it to enrichment exactly once. The lock is
/// never held across an await point.
#[derive(Debug, Default)]
pub struct SeenClanTags {
    tags: Mutex<HashSet<Tag>>,
}

impl SeenClanTags {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the set, e.g. from a previous session.
    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        Self {
            tags: Mutex::new(tags.into_iter().collect()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<Tag>> {
        self.tags
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Insert `tag`, returning `true` only for the first caller.
    pub fn claim(&self, tag: &Tag) -> bool {
        self.lock().insert(tag.clone())
    }

    /// Whether `tag` has been claimed.
    pub fn contains(&self, tag: &Tag) -> bool {
        self.lock().contains(tag)
    }

    /// Number of claimed tags.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing has been claimed.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sorted copy of the claimed tags.
    pub fn snapshot(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self.lock().iter().cloned().collect();
        tags.sort();
        tags
    }
}

/// Everything a caller keeps between runs to continue a search.
///
/// A fresh state starts with the scanner's full term universe. Terms are
/// consumed as they are queried; once they run out, `reset_terms` starts
/// another sweep while `seen` keeps already-processed clans out.
#[derive(Debug, Default)]
pub struct ContinuationState {
    pub(crate) seen: SeenClanTags,
    /// Clans claimed after the cap was reached, enriched first next run
    pub(crate) pending_clans: VecDeque<ClanSummary>,
    /// `None` until the first run fills it from the scanner's terms
    pub(crate) remaining_terms: Option<VecDeque<String>>,
    pub(crate) results: Vec<PlayerProfile>,
}

impl ContinuationState {
    /// Fresh state with nothing seen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with clan tags processed elsewhere.
    #[must_use]
    pub fn with_seen(tags: impl IntoIterator<Item = Tag>) -> Self {
        Self {
            seen: SeenClanTags::from_tags(tags),
            ..Self::default()
        }
    }

    /// Clan tags claimed so far.
    #[must_use]
    pub fn seen(&self) -> &SeenClanTags {
        &self.seen
    }

    /// Players accumulated over all runs on this state.
    #[must_use]
    pub fn results(&self) -> &[PlayerProfile] {
        &self.results
    }

    /// Drain the accumulated players.
    pub fn take_results(&mut self) -> Vec<PlayerProfile> {
        std::mem::take(&mut self.results)
    }

    /// Clans waiting for the next run.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending_clans.len()
    }

    /// Terms not yet queried, or `None` before the first run.
    #[must_use]
    pub fn remaining_terms_len(&self) -> Option<usize> {
        self.remaining_terms.as_ref().map(VecDeque::len)
    }

    /// Start a new sweep over the whole term universe on the next run.
    pub fn reset_terms(&mut self) {
        self.remaining_terms = None;
    }

    /// No terms and no pending clans left; another run would do nothing.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pending_clans.is_empty()
            && self
                .remaining_terms
                .as_ref()
                .is_some_and(VecDeque::is_empty)
    }
}
