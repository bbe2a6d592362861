//! Search-term universe.
//!
//! Clan search only matches by name, so the scanner sweeps the directory
//! with common clan-name words and every `prefix suffix` pair.

use clanscout_core::TermsConfig;
use std::collections::BTreeSet;

/// Built-in clan name prefixes.
pub const PREFIXES: &[&str] = &[
    "The", "Clan", "War", "King", "Queen", "Legend", "Elite", "Dark", "Shadow", "Dragon", "Knight",
    "Empire", "Reign", "Wolf", "Tiger", "Hunter", "Phoenix", "Iron", "Steel", "Lion", "Storm",
    "Flame", "Gold", "Night", "Epic", "Royal", "Blaze", "Rune", "Bastion", "Legion", "Vortex",
    "Strike", "Arcane", "Ace", "Ark", "Bar", "Fox", "Ice", "Jet", "Lux", "Neo", "Pax", "Rex",
    "Tor", "Vox", "Zip", "Brave", "Silent", "Strong", "Wise", "Bear", "Hawk", "Raven", "Eagle",
    "Thunder", "Glory", "Chaos", "Valor", "Fury", "Savage", "Mystic", "Crimson", "Rogue", "Omega",
    "Vengeance", "Titan", "Rebel", "Phantom", "Celestial", "Nova", "Infinity", "Gladiator",
    "Merciless", "Rampage", "Outlaw", "Warlock", "Cursed", "Divine", "Clash", "Spy", "Noble",
    "Diamond", "Sapphire", "Viper", "Chrome", "Mercury", "Neon", "Argon", "Xenon",
];

/// Built-in clan name suffixes.
pub const SUFFIXES: &[&str] = &[
    "Legion", "Empire", "Knights", "Reign", "Warriors", "Clan", "Force", "Guardians", "Hunters",
    "Flames", "Wolves", "Eagles", "Dragons", "Phoenix", "Titans", "Lions", "Blaze", "Inferno",
    "Storm", "Vortex", "Strike", "Fury", "Riders", "Rangers", "Slayers", "Crusaders", "Vikings",
    "Marauders", "Assassins", "Soldiers", "Brothers", "King", "Spy", "Clash", "Noble", "Crystal",
    "Quartz", "Steel", "Mercury", "Copper", "Bronze", "Platinum",
];

/// All prefixes, all suffixes and every `"{prefix} {suffix}"` pair,
/// deduplicated.
pub fn generate_terms<P, S>(prefixes: &[P], suffixes: &[S]) -> BTreeSet<String>
where
    P: AsRef<str>,
    S: AsRef<str>,
{
    let mut terms: BTreeSet<String> = prefixes
        .iter()
        .map(|p| p.as_ref().to_string())
        .chain(suffixes.iter().map(|s| s.as_ref().to_string()))
        .collect();

    for prefix in prefixes {
        for suffix in suffixes {
            terms.insert(format!("{} {}", prefix.as_ref(), suffix.as_ref()));
        }
    }

    terms
}

/// Term universe from the built-in word lists.
#[must_use]
pub fn default_terms() -> BTreeSet<String> {
    generate_terms(PREFIXES, SUFFIXES)
}

/// Term universe from configuration, falling back to the built-in list for
/// any side left unset.
#[must_use]
pub fn terms_from_config(config: &TermsConfig) -> BTreeSet<String> {
    let builtin = |words: &[&str]| words.iter().map(|w| (*w).to_string()).collect::<Vec<_>>();
    let prefixes = config.prefixes.clone().unwrap_or_else(|| builtin(PREFIXES));
    let suffixes = config.suffixes.clone().unwrap_or_else(|| builtin(SUFFIXES));
    generate_terms(&prefixes, &suffixes)
}
