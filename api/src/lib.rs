pub mod client;
pub mod leaders;
pub mod names;
pub mod query;
pub mod teams;
pub mod wire;

use chrono::{DateTime, Local, TimeZone};
use std::collections::HashSet;
use std::fmt;

/// Avatar shown wherever a player's headshot cannot be resolved.
pub const PLACEHOLDER_HEADSHOT: &str =
    "https://upload.wikimedia.org/wikipedia/commons/7/7c/Profile_avatar_placeholder_large.png";

const HEADSHOT_CDN: &str = "https://cdn.nba.com/headshots/nba/latest";

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the JSON wire format
// ---------------------------------------------------------------------------

/// The stats document: one record per player, never mutated after load.
#[derive(Debug, Clone, Default)]
pub struct StatsSheet {
    pub players: Vec<PlayerStats>,
}

impl StatsSheet {
    pub fn new(players: Vec<PlayerStats>) -> Self {
        Self { players }
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// The update timestamp is shared across the collection, so the first
    /// record speaks for all of them.
    pub fn last_updated(&self) -> Option<&str> {
        self.players
            .first()
            .map(|p| p.updated_at.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn formatted_update(&self) -> Option<String> {
        self.last_updated().map(|raw| format_timestamp(raw, &Local))
    }

    /// Distinct non-empty positions in first-appearance order.
    pub fn unique_positions(&self) -> Vec<String> {
        unique_in_order(self.players.iter().map(|p| p.position.as_str()))
    }

    /// Distinct non-empty team abbreviations in first-appearance order.
    pub fn unique_teams(&self) -> Vec<String> {
        unique_in_order(self.players.iter().map(|p| p.team.as_str()))
    }
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .map(ToString::to_string)
        .collect()
}

/// Render an RFC 3339 timestamp as `dd/mm/YYYY HH:MM` in `tz`.
/// Anything that does not parse is shown as-is.
pub fn format_timestamp<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(tz).format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStats {
    pub name: String,
    pub team: String,     // "LAL", "TOT" for multi-team seasons
    pub position: String, // "PG", "SF-PF", ...
    pub points: Option<f64>,
    pub rebounds: Option<f64>,
    pub assists: Option<f64>,
    pub steals: Option<f64>,
    pub blocks: Option<f64>,
    pub turnovers: Option<f64>,
    pub minutes: Option<f64>,
    pub games_played: Option<f64>,
    pub updated_at: String,
}

impl PlayerStats {
    pub fn stat(&self, key: StatKey) -> Option<f64> {
        match key {
            StatKey::Pts => self.points,
            StatKey::Reb => self.rebounds,
            StatKey::Ast => self.assists,
            StatKey::Stl => self.steals,
            StatKey::Blk => self.blocks,
            StatKey::To => self.turnovers,
            StatKey::Min => self.minutes,
            StatKey::Gp => self.games_played,
        }
    }

    /// Display form of a stat: integers without decimals, "-" when missing.
    pub fn stat_text(&self, key: StatKey) -> String {
        match self.stat(key) {
            Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
            Some(v) => format!("{v:.1}"),
            None => "-".to_string(),
        }
    }
}

/// A per-game stat column of the stats document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatKey {
    #[default]
    Pts,
    Reb,
    Ast,
    Stl,
    Blk,
    To,
    Min,
    Gp,
}

impl StatKey {
    /// Sortable columns of the player table, in display order.
    pub const TABLE_COLUMNS: [StatKey; 7] = [
        StatKey::Pts,
        StatKey::Reb,
        StatKey::Ast,
        StatKey::Stl,
        StatKey::Blk,
        StatKey::To,
        StatKey::Min,
    ];

    /// Stats charted on the player page and ranked on the leaders page.
    pub const CHART_STATS: [StatKey; 6] = [
        StatKey::Pts,
        StatKey::Reb,
        StatKey::Ast,
        StatKey::Stl,
        StatKey::Blk,
        StatKey::To,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            StatKey::Pts => "PTS",
            StatKey::Reb => "REB",
            StatKey::Ast => "AST",
            StatKey::Stl => "STL",
            StatKey::Blk => "BLK",
            StatKey::To => "TO",
            StatKey::Min => "MIN",
            StatKey::Gp => "GP",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatKey::Pts => "Points (per game)",
            StatKey::Reb => "Rebounds (per game)",
            StatKey::Ast => "Assists (per game)",
            StatKey::Stl => "Steals (per game)",
            StatKey::Blk => "Blocks (per game)",
            StatKey::To => "Turnovers (per game)",
            StatKey::Min => "Minutes (per game)",
            StatKey::Gp => "Games played",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "PTS" => Some(StatKey::Pts),
            "REB" => Some(StatKey::Reb),
            "AST" => Some(StatKey::Ast),
            "STL" => Some(StatKey::Stl),
            "BLK" => Some(StatKey::Blk),
            "TO" => Some(StatKey::To),
            "MIN" => Some(StatKey::Min),
            "GP" => Some(StatKey::Gp),
            _ => None,
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One record of the roster document, used to find a player's headshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterEntry {
    pub first_name: String,
    pub last_name: String,
    pub player_id: Option<String>,
    pub headshot_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadshotSize {
    /// Table rows.
    Thumb,
    /// Player page.
    Large,
}

impl HeadshotSize {
    fn dimensions(&self) -> &'static str {
        match self {
            HeadshotSize::Thumb => "260x190",
            HeadshotSize::Large => "1040x760",
        }
    }
}

impl RosterEntry {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// An explicit headshot URL wins; otherwise build the CDN URL from the id.
    pub fn headshot(&self, size: HeadshotSize) -> Option<String> {
        if let Some(url) = self.headshot_url.as_deref().filter(|u| !u.is_empty()) {
            return Some(url.to_string());
        }
        let id = self.player_id.as_deref().filter(|id| !id.is_empty())?;
        Some(format!("{HEADSHOT_CDN}/{}/{id}.png", size.dimensions()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn player(name: &str, team: &str, pos: &str) -> PlayerStats {
        PlayerStats {
            name: name.into(),
            team: team.into(),
            position: pos.into(),
            updated_at: "2025-11-02T14:05:00+00:00".into(),
            ..Default::default()
        }
    }

    #[test]
    fn last_updated_comes_from_first_record() {
        let mut second = player("B", "BOS", "C");
        second.updated_at = "something else".into();
        let sheet = StatsSheet::new(vec![player("A", "LAL", "SF"), second]);
        assert_eq!(sheet.last_updated(), Some("2025-11-02T14:05:00+00:00"));
        assert_eq!(StatsSheet::default().last_updated(), None);
    }

    #[test]
    fn timestamp_formats_in_given_zone() {
        assert_eq!(
            format_timestamp("2025-11-02T14:05:00.123456+00:00", &Utc),
            "02/11/2025 14:05"
        );
    }

    #[test]
    fn unparseable_timestamp_is_shown_raw() {
        assert_eq!(format_timestamp("yesterday", &Utc), "yesterday");
    }

    #[test]
    fn unique_values_keep_first_appearance_order() {
        let sheet = StatsSheet::new(vec![
            player("A", "LAL", "SF"),
            player("B", "BOS", ""),
            player("C", "LAL", "PG"),
            player("D", "", "SF"),
        ]);
        assert_eq!(sheet.unique_positions(), vec!["SF", "PG"]);
        assert_eq!(sheet.unique_teams(), vec!["LAL", "BOS"]);
    }

    #[test]
    fn stat_key_codes_parse_back() {
        for key in StatKey::TABLE_COLUMNS {
            assert_eq!(StatKey::parse(key.code()), Some(key));
        }
        assert_eq!(StatKey::parse("reb"), Some(StatKey::Reb));
        assert_eq!(StatKey::parse("FG%"), None);
    }

    #[test]
    fn stat_text_drops_trailing_zero_decimals() {
        let mut p = player("A", "LAL", "SF");
        p.points = Some(27.34);
        p.games_played = Some(12.0);
        assert_eq!(p.stat_text(StatKey::Pts), "27.3");
        assert_eq!(p.stat_text(StatKey::Gp), "12");
        assert_eq!(p.stat_text(StatKey::Blk), "-");
    }

    #[test]
    fn stat_text_rounds_to_one_decimal() {
        let mut p = player("A", "LAL", "SF");
        p.steals = Some(0.05);
        p.blocks = Some(0.04);
        p.turnovers = Some(2.96);
        assert_eq!(p.stat_text(StatKey::Stl), "0.1");
        assert_eq!(p.stat_text(StatKey::Blk), "0.0");
        assert_eq!(p.stat_text(StatKey::To), "3.0");
    }

    #[test]
    fn headshot_prefers_explicit_url() {
        let entry = RosterEntry {
            first_name: "LeBron".into(),
            last_name: "James".into(),
            player_id: Some("2544".into()),
            headshot_url: Some("https://img.example/lebron.png".into()),
        };
        assert_eq!(
            entry.headshot(HeadshotSize::Large).as_deref(),
            Some("https://img.example/lebron.png")
        );
    }

    #[test]
    fn headshot_built_from_id_per_size() {
        let entry = RosterEntry {
            first_name: "LeBron".into(),
            last_name: "James".into(),
            player_id: Some("2544".into()),
            headshot_url: None,
        };
        assert_eq!(
            entry.headshot(HeadshotSize::Thumb).as_deref(),
            Some("https://cdn.nba.com/headshots/nba/latest/260x190/2544.png")
        );
        assert_eq!(
            entry.headshot(HeadshotSize::Large).as_deref(),
            Some("https://cdn.nba.com/headshots/nba/latest/1040x760/2544.png")
        );
        assert_eq!(RosterEntry::default().headshot(HeadshotSize::Thumb), None);
    }
}
