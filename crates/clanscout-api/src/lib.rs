//! Clanscout API - Client for the Clash of Clans REST API.
//!
//! This crate wraps the game's public directory endpoints behind a small
//! trait so the scanner can be driven by the real HTTP client or by a test
//! double.
//!
//! # Features
//!
//! - Bearer-token authentication against a configurable base URL
//! - Bounded retry with backoff on HTTP 429
//! - Per-call failures downgraded to "no data" in the typed wrappers
//! - Optional diagnostic call log
//! - Connectivity diagnostics for validating a configured client
//!
//! # Example
//!
//! ```rust,no_run
//! use clanscout_api::{ApiClient, ClanSearch, GameApi};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("https://cocproxy.royaleapi.dev/v1", "token")?;
//! let clans = client.search_clans(&ClanSearch::new("Iron Legion")).await;
//! println!("found {} clans", clans.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod call_log;
pub mod client;
pub mod diagnostics;
pub mod error;
pub mod game_api;
#[allow(missing_docs)]
pub mod models;

// Re-export commonly used types
pub use call_log::{ApiCallLog, ApiCallRecord};
pub use client::ApiClient;
pub use diagnostics::{check_connectivity, CheckResult, ConnectivityReport};
pub use error::{ApiError, Result};
pub use game_api::GameApi;
pub use models::{
    ChatLanguage, ClanDetails, ClanMember, ClanSearch, ClanSummary, Hero, League, PlayerClan,
    PlayerProfile,
};
