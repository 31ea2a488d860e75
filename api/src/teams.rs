//! Franchise names and logos keyed by the abbreviations the stats document uses.

const LOGO_CDN: &str = "https://cdn.nba.com/logos/nba";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamInfo {
    pub abbrev: String,
    pub name: String,
    pub logo: Option<String>,
}

/// (abbreviation, full name, NBA team id)
const FRANCHISES: [(&str, &str, u32); 30] = [
    ("ATL", "Atlanta Hawks", 1610612737),
    ("BOS", "Boston Celtics", 1610612738),
    ("BKN", "Brooklyn Nets", 1610612751),
    ("CHA", "Charlotte Hornets", 1610612766),
    ("CHI", "Chicago Bulls", 1610612741),
    ("CLE", "Cleveland Cavaliers", 1610612739),
    ("DAL", "Dallas Mavericks", 1610612742),
    ("DEN", "Denver Nuggets", 1610612743),
    ("DET", "Detroit Pistons", 1610612765),
    ("GSW", "Golden State Warriors", 1610612744),
    ("HOU", "Houston Rockets", 1610612745),
    ("IND", "Indiana Pacers", 1610612754),
    ("LAC", "LA Clippers", 1610612746),
    ("LAL", "Los Angeles Lakers", 1610612747),
    ("MEM", "Memphis Grizzlies", 1610612763),
    ("MIA", "Miami Heat", 1610612748),
    ("MIL", "Milwaukee Bucks", 1610612749),
    ("MIN", "Minnesota Timberwolves", 1610612750),
    ("NOP", "New Orleans Pelicans", 1610612740),
    ("NYK", "New York Knicks", 1610612752),
    ("OKC", "Oklahoma City Thunder", 1610612760),
    ("ORL", "Orlando Magic", 1610612753),
    ("PHI", "Philadelphia 76ers", 1610612755),
    ("PHX", "Phoenix Suns", 1610612756),
    ("POR", "Portland Trail Blazers", 1610612757),
    ("SAC", "Sacramento Kings", 1610612758),
    ("SAS", "San Antonio Spurs", 1610612759),
    ("TOR", "Toronto Raptors", 1610612761),
    ("UTA", "Utah Jazz", 1610612762),
    ("WAS", "Washington Wizards", 1610612764),
];

/// Season totals for players traded mid-season are listed under "TOT".
const MULTI_TEAM: &str = "TOT";

pub fn team_info(abbrev: &str) -> TeamInfo {
    if abbrev == MULTI_TEAM {
        return TeamInfo {
            abbrev: abbrev.to_string(),
            name: "Multiple Teams".to_string(),
            logo: Some(format!("{LOGO_CDN}/nba/primary/L/nba-logoman-word-white.svg")),
        };
    }

    match FRANCHISES.iter().find(|(code, _, _)| *code == abbrev) {
        Some((code, name, id)) => TeamInfo {
            abbrev: code.to_string(),
            name: name.to_string(),
            logo: Some(format!("{LOGO_CDN}/{id}/primary/L/logo.svg")),
        },
        None => TeamInfo {
            abbrev: abbrev.to_string(),
            name: abbrev.to_string(),
            logo: None,
        },
    }
}
