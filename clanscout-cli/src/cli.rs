//! Command line arguments.

use clanscout_core::{ClanRole, SearchConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Find active Clash of Clans players by sweeping clan searches
#[derive(Parser, Debug)]
#[command(name = "clanscout", version, about)]
pub struct Cli {
    /// Explicit config file instead of the per-user one
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// API bearer token
    #[arg(long, global = true, env = "CLANSCOUT_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check token, proxy reachability and clan search
    Check,
    /// Search for active players and print them as JSON
    Search(SearchArgs),
}

/// Overrides for the `[search]` config section.
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[arg(long)]
    pub min_townhall: Option<u32>,
    #[arg(long)]
    pub min_attack_wins: Option<u32>,
    #[arg(long)]
    pub min_war_stars: Option<u32>,
    #[arg(long)]
    pub min_trophies: Option<u32>,

    /// Clan chat language code; empty disables the filter
    #[arg(long)]
    pub language: Option<String>,

    /// War league name fragment; empty disables the filter
    #[arg(long)]
    pub league: Option<String>,

    /// Roles to skip, e.g. `--exclude-role leader --exclude-role coLeader`
    #[arg(long = "exclude-role", value_name = "ROLE")]
    pub exclude_roles: Vec<ClanRole>,

    /// Fetch every role, clearing the configured exclusions
    #[arg(long, conflicts_with = "exclude_roles")]
    pub no_exclude_roles: bool,

    #[arg(long)]
    pub min_members: Option<u32>,
    #[arg(long)]
    pub max_members: Option<u32>,

    /// Clans enriched per run
    #[arg(long)]
    pub max_clans: Option<usize>,

    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Consecutive runs on the same continuation state
    #[arg(long, default_value_t = 1)]
    pub runs: usize,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl SearchArgs {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut SearchConfig) {
        fn set<T: Clone>(target: &mut T, value: Option<&T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut config.min_townhall, self.min_townhall.as_ref());
        set(&mut config.min_attack_wins, self.min_attack_wins.as_ref());
        set(&mut config.min_war_stars, self.min_war_stars.as_ref());
        set(&mut config.min_trophies, self.min_trophies.as_ref());
        set(&mut config.min_members, self.min_members.as_ref());
        set(&mut config.max_members, self.max_members.as_ref());
        set(&mut config.max_clans, self.max_clans.as_ref());
        set(&mut config.concurrency, self.concurrency.as_ref());

        if let Some(language) = &self.language {
            config.language = Some(language.clone()).filter(|l| !l.is_empty());
        }
        if let Some(league) = &self.league {
            config.league = Some(league.clone()).filter(|l| !l.is_empty());
        }
        if self.no_exclude_roles {
            config.exclude_roles.clear();
        } else if !self.exclude_roles.is_empty() {
            config.exclude_roles.clone_from(&self.exclude_roles);
        }
    }
}
