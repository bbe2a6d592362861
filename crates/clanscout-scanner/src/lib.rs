//! Clanscout Scanner - Clan discovery and player enrichment pipeline.
//!
//! This crate finds active players by searching clans with generated name
//! terms, fetching each new clan's roster and filtering member profiles
//! against activity thresholds. Discovery and enrichment run concurrently:
//! every newly found clan is handed to enrichment as soon as its search
//! returns.
//!
//! # Features
//!
//! - Deterministic search-term universe from prefix/suffix word lists
//! - Bounded concurrency for both stages
//! - Clan-tag deduplication shared across runs (continuation)
//! - Streaming progress events over a channel
//! - Maximum-clans cap with deferred clans kept for the next run
//!
//! # Example
//!
//! ```rust,ignore
//! use clanscout_scanner::{ClanScanner, ContinuationState, FilterCriteria};
//! use std::sync::Arc;
//!
//! let scanner = ClanScanner::new(Arc::new(api_client));
//! let mut state = ContinuationState::new();
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!
//! let outcome = scanner
//!     .run_search(&FilterCriteria::default(), &mut state, Some(tx))
//!     .await?;
//! println!("{} players", outcome.players.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod discovery;
pub mod enrichment;
pub mod error;
pub mod events;
pub mod filter;
pub mod orchestrator;
pub mod state;
pub mod terms;

// Re-export commonly used types
pub use discovery::discover;
pub use enrichment::{enrich_clan, EnrichmentOutcome};
pub use error::{Result, ScanError};
pub use events::{ProgressEvent, ProgressSink};
pub use filter::FilterCriteria;
pub use orchestrator::{ClanScanner, SearchOutcome, SearchReport};
pub use state::{ContinuationState, SeenClanTags};
pub use terms::{default_terms, generate_terms, terms_from_config, PREFIXES, SUFFIXES};
