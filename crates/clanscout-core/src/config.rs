//! Configuration management for Clanscout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult, Result};
use crate::types::ClanRole;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/clanscout/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Game API connection settings
    pub api: ApiConfig,
    /// Default search criteria
    pub search: SearchConfig,
    /// Search term word lists
    pub terms: TermsConfig,
}

impl AppConfig {
    /// Load configuration from the default path, falling back to defaults if
    /// not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration, apply environment overrides and validate.
    ///
    /// Reads `path` when given (it must exist), otherwise the default
    /// location. Supports the following environment variables:
    /// - `CLANSCOUT_API_TOKEN`: API bearer token
    /// - `CLANSCOUT_BASE_URL`: API base URL
    /// - `CLANSCOUT_CONCURRENCY`: worker count for searches
    /// - `CLANSCOUT_MAX_CLANS`: maximum clans examined per search
    pub fn load_with_env(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to an already loaded config.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("CLANSCOUT_API_TOKEN") {
            if !token.is_empty() {
                self.api.token = Some(token);
                tracing::debug!("Override api.token from env");
            }
        }

        if let Ok(url) = std::env::var("CLANSCOUT_BASE_URL") {
            if !url.is_empty() {
                tracing::debug!("Override api.base_url from env: {}", url);
                self.api.base_url = url;
            }
        }

        if let Ok(val) = std::env::var("CLANSCOUT_CONCURRENCY") {
            if let Ok(concurrency) = val.parse() {
                self.search.concurrency = concurrency;
                tracing::debug!("Override search.concurrency from env: {}", concurrency);
            }
        }

        if let Ok(val) = std::env::var("CLANSCOUT_MAX_CLANS") {
            if let Ok(max_clans) = val.parse() {
                self.search.max_clans = max_clans;
                tracing::debug!("Override search.max_clans from env: {}", max_clans);
            }
        }
    }

    /// Check values that would otherwise fail later at request time.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(invalid("api.base_url", "must not be empty"));
        }
        if self.api.max_attempts == 0 {
            return Err(invalid("api.max_attempts", "must be at least 1"));
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be at least 1"));
        }
        if self.search.min_members > self.search.max_members {
            return Err(invalid(
                "search.min_members",
                "must not exceed search.max_members",
            ));
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/clanscout/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "clanscout", "clanscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Game API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the version segment, without trailing slash
    pub base_url: String,
    /// Bearer token (read from config or env, never written back)
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Timeout for the connectivity probe in seconds
    pub probe_timeout_secs: u64,
    /// Total attempts per call when rate limited (first try included)
    pub max_attempts: u32,
    /// Base backoff between attempts in milliseconds
    pub retry_backoff_ms: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cocproxy.royaleapi.dev/v1".to_string(),
            token: None,
            timeout_secs: 30,
            probe_timeout_secs: 10,
            max_attempts: 3,
            retry_backoff_ms: 1000,
            user_agent: format!("clanscout/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Default search criteria.
///
/// Mirrors the scanner's `FilterCriteria`; CLI flags override individual
/// fields per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum town hall level on the roster entry
    pub min_townhall: u32,
    /// Minimum multiplayer attack wins
    pub min_attack_wins: u32,
    /// Minimum war stars
    pub min_war_stars: u32,
    /// Minimum trophies
    pub min_trophies: u32,
    /// Chat language code, e.g. `en` (`None` disables the filter)
    pub language: Option<String>,
    /// War league name fragment, e.g. `Crystal` (`None` disables the filter)
    pub league: Option<String>,
    /// Member roles never fetched
    pub exclude_roles: Vec<ClanRole>,
    /// Minimum clan size passed to clan search
    pub min_members: u32,
    /// Maximum clan size passed to clan search
    pub max_members: u32,
    /// Maximum clans handed to enrichment per run
    pub max_clans: usize,
    /// Worker count
    pub concurrency: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_townhall: 16,
            min_attack_wins: 40,
            min_war_stars: 500,
            min_trophies: 4500,
            language: Some("en".to_string()),
            league: Some("Crystal".to_string()),
            exclude_roles: vec![ClanRole::Leader],
            min_members: 10,
            max_members: 200,
            max_clans: 100,
            concurrency: 20,
        }
    }
}

/// Search term word lists. `None` selects the built-in lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TermsConfig {
    /// Clan name prefixes
    pub prefixes: Option<Vec<String>>,
    /// Clan name suffixes
    pub suffixes: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClanscoutError;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://cocproxy.royaleapi.dev/v1");
        assert_eq!(config.api.max_attempts, 3);
        assert_eq!(config.api.retry_backoff_ms, 1000);
        assert_eq!(config.search.min_townhall, 16);
        assert_eq!(config.search.concurrency, 20);
        assert_eq!(config.search.exclude_roles, vec![ClanRole::Leader]);
        assert!(config.terms.prefixes.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization_skips_token() {
        let mut config = AppConfig::default();
        config.api.token = Some("secret-token".to_string());

        let toml_str = toml::to_string_pretty(&config).expect("serialize config");
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[search]"));
        assert!(!toml_str.contains("secret-token"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.search.max_clans, config.search.max_clans);
        assert!(parsed.api.token.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let contents = r#"
[api]
token = "abc"
retry_backoff_ms = 250

[search]
league = "Master"
exclude_roles = ["leader", "coLeader"]

[terms]
prefixes = ["Iron"]
"#;
        fs::write(&config_path, contents).expect("write config file");

        let config = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(config.api.token.as_deref(), Some("abc"));
        assert_eq!(config.api.retry_backoff_ms, 250);
        assert_eq!(config.search.league.as_deref(), Some("Master"));
        assert_eq!(
            config.search.exclude_roles,
            vec![ClanRole::Leader, ClanRole::CoLeader]
        );
        assert_eq!(config.terms.prefixes, Some(vec!["Iron".to_string()]));
        assert!(config.terms.suffixes.is_none());
        // untouched defaults
        assert_eq!(config.api.max_attempts, 3);
        assert_eq!(config.search.min_trophies, 4500);
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let result = AppConfig::load_from(&tmp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("CLANSCOUT_API_TOKEN", "env-token");
        std::env::set_var("CLANSCOUT_CONCURRENCY", "7");
        std::env::set_var("CLANSCOUT_MAX_CLANS", "not-a-number");

        let mut config = AppConfig::default();
        config.apply_env();
        assert_eq!(config.api.token.as_deref(), Some("env-token"));
        assert_eq!(config.search.concurrency, 7);
        assert_eq!(config.search.max_clans, 100);

        std::env::remove_var("CLANSCOUT_API_TOKEN");
        std::env::remove_var("CLANSCOUT_CONCURRENCY");
        std::env::remove_var("CLANSCOUT_MAX_CLANS");
    }

    #[test]
    fn test_load_with_env_validates() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        fs::write(&config_path, "[search]\nmin_trophies = 5000\n").expect("write config file");
        let config = AppConfig::load_with_env(Some(&config_path)).expect("load config");
        assert_eq!(config.search.min_trophies, 5000);

        fs::write(&config_path, "[api]\nmax_attempts = 0\n").expect("write config file");
        let err = AppConfig::load_with_env(Some(&config_path)).unwrap_err();
        assert!(matches!(
            err,
            ClanscoutError::Config(ConfigError::InvalidValue { ref field, .. }) if field == "api.max_attempts"
        ));

        let err = AppConfig::load_with_env(Some(&tmp.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ClanscoutError::Config(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.api.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "api.max_attempts"
        ));

        let mut config = AppConfig::default();
        config.search.min_members = 50;
        config.search.max_members = 10;
        assert!(config.validate().is_err());
    }
}
