//! Progress events streamed while a search runs.

use clanscout_api::{ClanSummary, PlayerProfile};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// A step of the pipeline, in causal order per clan:
/// `ClanFound`, then `ClanProcessing`, then any `PlayerFound`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A clan passed the filters and was queued for enrichment
    ClanFound(ClanSummary),
    /// Enrichment of a clan started
    ClanProcessing(ClanSummary),
    /// A player passed the activity filter
    PlayerFound(PlayerProfile),
}

/// Optional event channel. Sending never blocks and a dropped receiver
/// is ignored.
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    tx: Option<UnboundedSender<ProgressEvent>>,
}

impl ProgressSink {
    /// Wrap a caller-supplied sender.
    #[must_use]
    pub fn new(tx: Option<UnboundedSender<ProgressEvent>>) -> Self {
        Self { tx }
    }

    /// A sink that drops every event.
    #[must_use]
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Send `event` if a receiver was supplied.
    pub fn emit(&self, event: ProgressEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}
