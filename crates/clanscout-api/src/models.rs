//! Game API data model.
//!
//! Field names follow the API's camelCase JSON. Numeric fields the API
//! omits for some players (new accounts, banned accounts) default to zero.

use clanscout_core::{ClanRole, Tag};
use serde::{Deserialize, Serialize};

/// Search results are capped at this many clans per term.
pub const SEARCH_LIMIT: u32 = 200;

/// Query for the clan-search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClanSearch {
    /// Name fragment to search for
    pub name: String,
    /// Minimum clan size
    pub min_members: u32,
    /// Maximum clan size
    pub max_members: u32,
    /// Maximum results returned
    pub limit: u32,
}

impl ClanSearch {
    /// Search for `name` with the default size bounds (10..=200).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_members: 10,
            max_members: 200,
            limit: SEARCH_LIMIT,
        }
    }

    /// Restrict results to clans with this many members.
    #[must_use]
    pub fn with_members(mut self, min: u32, max: u32) -> Self {
        self.min_members = min;
        self.max_members = max;
        self
    }

    /// Override the result limit.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Query string pairs in the API's spelling.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("minMembers", self.min_members.to_string()),
            ("maxMembers", self.max_members.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// League reference (`warLeague`, player `league`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

/// Clan chat language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatLanguage {
    #[serde(default)]
    pub name: String,
    pub language_code: String,
}

/// A clan as returned by the clan-search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanSummary {
    pub tag: Tag,
    pub name: String,
    #[serde(default)]
    pub clan_level: u32,
    /// Current member count
    #[serde(default)]
    pub members: u32,
    #[serde(default)]
    pub war_league: Option<League>,
    #[serde(default)]
    pub chat_language: Option<ChatLanguage>,
}

impl ClanSummary {
    /// War league name, if the clan has one.
    #[must_use]
    pub fn war_league_name(&self) -> Option<&str> {
        self.war_league.as_ref().map(|l| l.name.as_str())
    }

    /// Chat language code, if the clan set one.
    #[must_use]
    pub fn language_code(&self) -> Option<&str> {
        self.chat_language.as_ref().map(|l| l.language_code.as_str())
    }
}

/// Roster entry from the clan detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanMember {
    pub tag: Tag,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: ClanRole,
    #[serde(default)]
    pub town_hall_level: u32,
}

/// Clan detail including the roster (`GET /clans/{tag}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanDetails {
    pub tag: Tag,
    pub name: String,
    #[serde(default)]
    pub clan_level: u32,
    #[serde(default)]
    pub members: u32,
    #[serde(default)]
    pub war_league: Option<League>,
    #[serde(default)]
    pub chat_language: Option<ChatLanguage>,
    #[serde(default)]
    pub member_list: Vec<ClanMember>,
}

/// Clan reference embedded in a player profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerClan {
    pub tag: Tag,
    pub name: String,
    #[serde(default)]
    pub clan_level: u32,
}

/// Hero level entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub name: String,
    pub level: u32,
    #[serde(default)]
    pub max_level: u32,
    #[serde(default)]
    pub village: String,
}

/// Full player profile (`GET /players/{tag}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub tag: Tag,
    pub name: String,
    #[serde(default)]
    pub exp_level: u32,
    #[serde(default)]
    pub town_hall_level: u32,
    #[serde(default)]
    pub trophies: u32,
    #[serde(default)]
    pub best_trophies: u32,
    #[serde(default)]
    pub war_stars: u32,
    #[serde(default)]
    pub attack_wins: u32,
    #[serde(default)]
    pub defense_wins: u32,
    #[serde(default)]
    pub donations: u32,
    #[serde(default)]
    pub donations_received: u32,
    #[serde(default)]
    pub role: Option<ClanRole>,
    #[serde(default)]
    pub clan: Option<PlayerClan>,
    #[serde(default)]
    pub league: Option<League>,
    #[serde(default)]
    pub heroes: Vec<Hero>,
}
