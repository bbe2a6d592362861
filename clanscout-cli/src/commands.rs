//! Subcommand handlers.

use crate::cli::SearchArgs;
use anyhow::Context;
use clanscout_api::{check_connectivity, ApiCallLog, ApiClient};
use clanscout_core::AppConfig;
use clanscout_scanner::{ClanScanner, ContinuationState, FilterCriteria, ProgressEvent};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Load config from `path` or the per-user location, with environment and
/// token overrides applied.
pub fn load_config(path: Option<&Path>, token: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load_with_env(path).context("failed to load config")?;

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        config.api.token = Some(token.to_string());
    }
    Ok(config)
}

/// `clanscout check`
pub async fn check(config: &AppConfig) -> anyhow::Result<()> {
    let client = ApiClient::from_config(&config.api)?;
    let report = check_connectivity(&client).await;

    for recommendation in &report.recommendations {
        warn!("{}", recommendation);
    }
    print_json(&report, true)?;

    if report.success {
        Ok(())
    } else {
        anyhow::bail!("connectivity check failed")
    }
}

/// `clanscout search`
pub async fn search(mut config: AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    args.apply(&mut config.search);
    let criteria = FilterCriteria::from(&config.search);
    criteria.validate()?;

    let call_log = Arc::new(ApiCallLog::default());
    let client = ApiClient::from_config(&config.api)?.with_call_log(Arc::clone(&call_log));
    let scanner = ClanScanner::new(Arc::new(client)).with_terms_config(&config.terms);

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let progress = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                ProgressEvent::ClanFound(clan) => {
                    debug!("Found clan {} ({})", clan.name, clan.tag);
                }
                ProgressEvent::ClanProcessing(clan) => {
                    debug!("Processing clan {} ({} members)", clan.tag, clan.members);
                }
                ProgressEvent::PlayerFound(player) => info!(
                    "Active player {} ({}): TH{} {} trophies, {} war stars",
                    player.name,
                    player.tag,
                    player.town_hall_level,
                    player.trophies,
                    player.war_stars
                ),
            }
        }
    });

    let mut state = ContinuationState::new();
    for run in 1..=args.runs.max(1) {
        if state.is_exhausted() {
            info!("All terms searched, starting a new sweep");
            state.reset_terms();
        }

        let outcome = scanner
            .run_search(&criteria, &mut state, Some(tx.clone()))
            .await?;
        info!(
            "Run {}: {} players, {} clans enriched, {} pending",
            run,
            outcome.players.len(),
            outcome.report.clans_enriched,
            outcome.report.clans_pending
        );
    }
    drop(tx);
    let _ = progress.await;

    let failures = call_log.failures();
    if !failures.is_empty() {
        warn!(
            "{} of the last {} API calls failed",
            failures.len(),
            call_log.len()
        );
    }

    print_json(&SearchOutput::new(&state, state.results()), args.pretty)
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    clans_seen: usize,
    players: &'a [clanscout_api::PlayerProfile],
}

impl<'a> SearchOutput<'a> {
    fn new(state: &ContinuationState, players: &'a [clanscout_api::PlayerProfile]) -> Self {
        Self {
            clans_seen: state.seen().len(),
            players,
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_explicit_config_with_token_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://localhost:9/v1\"\n\n[search]\nmax_clans = 3"
        )
        .unwrap();

        let config = load_config(Some(file.path()), Some("abcdefghijklmnopqrstuvwxyz")).unwrap();
        assert_eq!(config.search.max_clans, 3);
        assert_eq!(
            config.api.token.as_deref(),
            Some("abcdefghijklmnopqrstuvwxyz")
        );
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml")), None).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
