//! Name keys: the join between the stats document and the roster document.
//!
//! The two sources spell names independently ("Luka Dončić" vs "Luka Doncic",
//! "Jaren Jackson Jr." vs "Jaren Jackson"), so both sides are reduced to a
//! canonical key before comparing. Keys are not unique; collisions and
//! substring hits are accepted as fallbacks.

use crate::{HeadshotSize, PLACEHOLDER_HEADSHOT, PlayerStats, RosterEntry};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

static SUFFIXES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(jr|sr|ii|iii|iv)\b").expect("suffix pattern is valid"));

/// Canonical lookup key for a player name.
///
/// Lower-cases, strips diacritics, drops generational suffixes as whole
/// words, keeps only `[a-z]`, whitespace and hyphens, then removes all
/// separators: `"LeBron James Jr."` → `"lebronjames"`.
pub fn name_key(name: &str) -> String {
    let folded: String = name
        .to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();

    let without_suffixes = SUFFIXES.replace_all(&folded, "");

    let cleaned: String = without_suffixes
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace() || *c == '-')
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();

    // Collapsing, trimming and then deleting whitespace all end in the same
    // place: the remaining words glued together.
    cleaned.split_whitespace().collect()
}

/// Resolve a display name against the stats document.
///
/// Tiers, first hit wins within each and in document order:
/// exact key, a key containing the target, a key contained in the target.
pub fn find_player<'a>(players: &'a [PlayerStats], name: &str) -> Option<&'a PlayerStats> {
    let target = name_key(name);
    if target.is_empty() {
        return None;
    }

    let keyed: Vec<(String, &PlayerStats)> = players.iter().map(|p| (name_key(&p.name), p)).collect();

    keyed
        .iter()
        .find(|(key, _)| *key == target)
        .or_else(|| {
            keyed
                .iter()
                .find(|(key, _)| !key.is_empty() && key.contains(target.as_str()))
        })
        .or_else(|| {
            keyed
                .iter()
                .find(|(key, _)| !key.is_empty() && target.contains(key.as_str()))
        })
        .map(|(_, player)| *player)
}

/// Resolve a display name against the roster: exact key, then a roster key
/// containing the target.
pub fn find_roster_entry<'a>(roster: &'a [RosterEntry], name: &str) -> Option<&'a RosterEntry> {
    let target = name_key(name);
    if target.is_empty() {
        return None;
    }

    let keyed: Vec<(String, &RosterEntry)> = roster.iter().map(|r| (name_key(&r.full_name()), r)).collect();

    keyed
        .iter()
        .find(|(key, _)| *key == target)
        .or_else(|| keyed.iter().find(|(key, _)| key.contains(target.as_str())))
        .map(|(_, entry)| *entry)
}

/// Exact-key index of thumbnail headshots, used by the player table.
#[derive(Debug, Clone, Default)]
pub struct HeadshotIndex {
    by_key: HashMap<String, String>,
}

impl HeadshotIndex {
    /// Later roster records overwrite earlier ones that share a key.
    pub fn from_roster(roster: &[RosterEntry]) -> Self {
        let mut by_key = HashMap::with_capacity(roster.len());
        for entry in roster {
            if let Some(url) = entry.headshot(HeadshotSize::Thumb) {
                by_key.insert(name_key(&entry.full_name()), url);
            }
        }
        Self { by_key }
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.by_key.get(&name_key(name)).map(String::as_str)
    }

    pub fn url_or_placeholder(&self, name: &str) -> &str {
        self.lookup(name).unwrap_or(PLACEHOLDER_HEADSHOT)
    }
}
