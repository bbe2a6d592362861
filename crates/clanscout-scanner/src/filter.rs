//! Search criteria and the predicates derived from them.

use crate::error::{Result, ScanError};
use clanscout_api::{ClanMember, ClanSummary, PlayerProfile};
use clanscout_core::{ClanRole, SearchConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Immutable criteria for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Minimum town hall level, checked on the roster
    pub min_townhall: u32,
    /// Minimum multiplayer attack wins
    pub min_attack_wins: u32,
    /// Minimum lifetime war stars
    pub min_war_stars: u32,
    /// Minimum current trophies
    pub min_trophies: u32,
    /// Chat language code, compared case-insensitively
    pub language: Option<String>,
    /// War league name fragment, compared case-insensitively
    pub league: Option<String>,
    /// Roles skipped before any profile fetch
    pub excluded_roles: BTreeSet<ClanRole>,
    /// Smallest clan size searched
    pub min_members: u32,
    /// Largest clan size searched
    pub max_members: u32,
    /// Clans handed to enrichment per run
    pub max_clans: usize,
    /// Worker count; discovery gets a quarter of it
    pub concurrency: usize,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for FilterCriteria {
    fn from(config: &SearchConfig) -> Self {
        Self {
            min_townhall: config.min_townhall,
            min_attack_wins: config.min_attack_wins,
            min_war_stars: config.min_war_stars,
            min_trophies: config.min_trophies,
            language: non_empty(config.language.clone()),
            league: non_empty(config.league.clone()),
            excluded_roles: config.exclude_roles.iter().copied().collect(),
            min_members: config.min_members,
            max_members: config.max_members,
            max_clans: config.max_clans,
            concurrency: config.concurrency,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl FilterCriteria {
    /// Reject criteria that would make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.max_clans == 0 {
            return Err(ScanError::InvalidCriteria {
                field: "max_clans",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.concurrency == 0 {
            return Err(ScanError::InvalidCriteria {
                field: "concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.min_members > self.max_members {
            return Err(ScanError::InvalidCriteria {
                field: "min_members",
                reason: format!(
                    "{} exceeds max_members {}",
                    self.min_members, self.max_members
                ),
            });
        }
        Ok(())
    }

    /// Set the player activity thresholds.
    #[must_use]
    pub fn with_thresholds(
        mut self,
        min_townhall: u32,
        min_attack_wins: u32,
        min_war_stars: u32,
        min_trophies: u32,
    ) -> Self {
        self.min_townhall = min_townhall;
        self.min_attack_wins = min_attack_wins;
        self.min_war_stars = min_war_stars;
        self.min_trophies = min_trophies;
        self
    }

    /// Set or clear the clan language filter.
    #[must_use]
    pub fn with_language(mut self, language: Option<&str>) -> Self {
        self.language = non_empty(language.map(str::to_string));
        self
    }

    /// Set or clear the war league filter.
    #[must_use]
    pub fn with_league(mut self, league: Option<&str>) -> Self {
        self.league = non_empty(league.map(str::to_string));
        self
    }

    /// Replace the excluded roles.
    #[must_use]
    pub fn with_excluded_roles(mut self, roles: impl IntoIterator<Item = ClanRole>) -> Self {
        self.excluded_roles = roles.into_iter().collect();
        self
    }

    /// Set the clan size bounds passed to clan search.
    #[must_use]
    pub fn with_members(mut self, min: u32, max: u32) -> Self {
        self.min_members = min;
        self.max_members = max;
        self
    }

    /// Set the per-run clan cap.
    #[must_use]
    pub fn with_max_clans(mut self, max_clans: usize) -> Self {
        self.max_clans = max_clans;
        self
    }

    /// Set the worker count.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Concurrent clan searches.
    #[must_use]
    pub fn discovery_workers(&self) -> usize {
        (self.concurrency / 4).max(1)
    }

    /// Concurrent roster and profile fetches across all clans.
    #[must_use]
    pub fn enrichment_workers(&self) -> usize {
        self.concurrency.max(1)
    }

    /// Language and league post-filters. A clan without the metadata fails
    /// an active filter.
    #[must_use]
    pub fn matches_clan(&self, clan: &ClanSummary) -> bool {
        if let Some(language) = &self.language {
            let matches = clan
                .language_code()
                .is_some_and(|code| code.eq_ignore_ascii_case(language));
            if !matches {
                return false;
            }
        }

        if let Some(league) = &self.league {
            let wanted = league.to_lowercase();
            let matches = clan
                .war_league_name()
                .is_some_and(|name| name.to_lowercase().contains(&wanted));
            if !matches {
                return false;
            }
        }

        true
    }

    /// Roster pre-filter, decided without fetching the profile.
    #[must_use]
    pub fn member_eligible(&self, member: &ClanMember) -> bool {
        member.town_hall_level >= self.min_townhall && !self.excluded_roles.contains(&member.role)
    }

    /// Activity thresholds; all three must hold, boundaries inclusive.
    #[must_use]
    pub fn player_passes(&self, player: &PlayerProfile) -> bool {
        player.attack_wins >= self.min_attack_wins
            && player.war_stars >= self.min_war_stars
            && player.trophies >= self.min_trophies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clanscout_api::{ChatLanguage, League};
    use clanscout_core::Tag;

    fn clan(language: Option<&str>, league: Option<&str>) -> ClanSummary {
        ClanSummary {
            tag: Tag::new("#C1").expect("valid tag"),
            name: "Test".to_string(),
            clan_level: 10,
            members: 30,
            war_league: league.map(|name| League {
                id: 1,
                name: name.to_string(),
            }),
            chat_language: language.map(|code| ChatLanguage {
                name: String::new(),
                language_code: code.to_string(),
            }),
        }
    }

    fn player(attack_wins: u32, war_stars: u32, trophies: u32) -> PlayerProfile {
        PlayerProfile {
            tag: Tag::new("#P1").expect("valid tag"),
            name: "p".to_string(),
            exp_level: 200,
            town_hall_level: 16,
            trophies,
            best_trophies: trophies,
            war_stars,
            attack_wins,
            defense_wins: 0,
            donations: 0,
            donations_received: 0,
            role: Some(ClanRole::Member),
            clan: None,
            league: None,
            heroes: Vec::new(),
        }
    }

    fn member(role: ClanRole, town_hall_level: u32) -> ClanMember {
        ClanMember {
            tag: Tag::new("#P1").expect("valid tag"),
            name: "m".to_string(),
            role,
            town_hall_level,
        }
    }

    fn criteria() -> FilterCriteria {
        FilterCriteria::default().with_thresholds(16, 40, 500, 4500)
    }

    #[test]
    fn test_defaults_follow_search_config() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.min_townhall, 16);
        assert_eq!(criteria.language.as_deref(), Some("en"));
        assert_eq!(criteria.league.as_deref(), Some("Crystal"));
        assert!(criteria.excluded_roles.contains(&ClanRole::Leader));
        assert_eq!(criteria.concurrency, 20);
        assert_eq!(criteria.discovery_workers(), 5);
        assert_eq!(criteria.enrichment_workers(), 20);
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_activity_filter_boundaries() {
        let criteria = criteria();
        assert!(criteria.player_passes(&player(40, 500, 4500)));
        assert!(!criteria.player_passes(&player(39, 5000, 9000)));
        assert!(!criteria.player_passes(&player(400, 499, 9000)));
        assert!(!criteria.player_passes(&player(400, 5000, 4499)));
    }

    #[test]
    fn test_member_prefilter() {
        let criteria = criteria();
        assert!(criteria.member_eligible(&member(ClanRole::Member, 16)));
        assert!(!criteria.member_eligible(&member(ClanRole::Member, 15)));
        assert!(!criteria.member_eligible(&member(ClanRole::Leader, 17)));

        let criteria = criteria.with_excluded_roles([]);
        assert!(criteria.member_eligible(&member(ClanRole::Leader, 17)));
    }

    #[test]
    fn test_language_filter_is_case_insensitive_exact() {
        let criteria = criteria().with_league(None);
        assert!(criteria.matches_clan(&clan(Some("EN"), None)));
        assert!(!criteria.matches_clan(&clan(Some("ENG"), None)));
        assert!(!criteria.matches_clan(&clan(Some("FR"), None)));
        assert!(!criteria.matches_clan(&clan(None, None)));
    }

    #[test]
    fn test_league_filter_is_case_insensitive_substring() {
        let criteria = criteria().with_language(None).with_league(Some("crystal"));
        assert!(criteria.matches_clan(&clan(None, Some("Crystal League II"))));
        assert!(!criteria.matches_clan(&clan(None, Some("Master League I"))));
        assert!(!criteria.matches_clan(&clan(None, None)));
    }

    #[test]
    fn test_empty_filters_are_disabled() {
        let criteria = criteria().with_language(Some("")).with_league(Some("  "));
        assert!(criteria.language.is_none());
        assert!(criteria.league.is_none());
        assert!(criteria.matches_clan(&clan(None, None)));
    }

    #[test]
    fn test_validate_rejects_misuse() {
        let err = criteria().with_max_clans(0).validate().unwrap_err();
        assert!(matches!(
            err,
            ScanError::InvalidCriteria {
                field: "max_clans",
                ..
            }
        ));

        assert!(criteria().with_concurrency(0).validate().is_err());
        assert!(criteria().with_members(50, 10).validate().is_err());
    }

    #[test]
    fn test_small_concurrency_keeps_one_discovery_worker() {
        let criteria = criteria().with_concurrency(2);
        assert_eq!(criteria.discovery_workers(), 1);
        assert_eq!(criteria.enrichment_workers(), 2);
    }
}
