//! Shared types used across Clanscout.
//!
//! Tags identify both clans and players in the game API. Roles describe a
//! member's rank inside a clan and drive the role-exclusion filter.

use crate::error::{ClanscoutError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Newtype for clan and player tags.
///
/// Tags are `#` followed by one or more ASCII alphanumerics. Values decoded
/// from API responses are trusted and bypass validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Create a new `Tag` from a string.
    ///
    /// # Errors
    /// Returns error if the tag is not `#` followed by alphanumerics.
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        Self::validate(&tag)?;
        Ok(Self(tag))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form for use as a URL path segment (`#` becomes `%23`).
    #[must_use]
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }

    /// Tag text without the leading `#`.
    #[must_use]
    pub fn without_hash(&self) -> &str {
        self.0.trim_start_matches('#')
    }

    fn validate(tag: &str) -> Result<()> {
        static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = TAG_REGEX.get_or_init(|| Regex::new(r"^#[0-9A-Za-z]+$").expect("valid regex"));

        if regex.is_match(tag) {
            Ok(())
        } else {
            Err(ClanscoutError::Validation(format!(
                "invalid tag: must be '#' followed by alphanumerics, got '{tag}'"
            )))
        }
    }
}

impl FromStr for Tag {
    type Err = ClanscoutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rank of a member inside a clan.
///
/// Serialized with the game API's spelling (`coLeader`, `admin`). The API
/// calls elders `admin`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ClanRole {
    /// Clan leader
    Leader,
    /// Co-leader
    CoLeader,
    /// Elder
    Admin,
    /// Regular member
    Member,
    /// Role missing or not recognized by this version
    #[default]
    #[serde(other)]
    Unknown,
}

impl ClanRole {
    /// The API spelling of this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::CoLeader => "coLeader",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for ClanRole {
    type Err = ClanscoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "leader" => Ok(Self::Leader),
            "coleader" => Ok(Self::CoLeader),
            "admin" | "elder" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(ClanscoutError::Validation(format!(
                "invalid clan role '{s}': expected leader, coLeader, admin or member"
            ))),
        }
    }
}

impl fmt::Display for ClanRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
