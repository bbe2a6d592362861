//! Clanscout Core - Foundation crate for the Clanscout player finder.
//!
//! This crate provides the shared types, error handling and configuration
//! management that the API client, the scanner and the CLI depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Shared newtypes and enums (`Tag`, `ClanRole`)
//!
//! # Example
//!
//! ```rust
//! use clanscout_core::{AppConfig, Tag};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.search.max_clans, 100);
//!
//! let tag = Tag::new("#2PP")?;
//! assert_eq!(tag.encoded(), "%232PP");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, AppConfig, SearchConfig, TermsConfig};
pub use error::{ClanscoutError, ConfigError, ConfigResult, Result};
pub use types::{ClanRole, Tag};
