use clap::Parser;
use log::LevelFilter;
use nba_api::client::{DEFAULT_ROSTER_SOURCE, DEFAULT_STATS_SOURCE};
use nba_api::query::TableQuery;
use std::str::FromStr;

pub const STATS_ENV: &str = "NBATUI_STATS";
pub const ROSTER_ENV: &str = "NBATUI_ROSTER";
pub const LOG_ENV: &str = "NBATUI_LOG";

/// NBA player stats in the terminal.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "nbatui", version, about, long_about = None)]
pub struct CliArgs {
    /// Stats document: path or http(s) URL
    #[arg(long, env = STATS_ENV, default_value = DEFAULT_STATS_SOURCE)]
    pub stats: String,

    /// Roster document with player ids: path or http(s) URL
    #[arg(long, env = ROSTER_ENV, default_value = DEFAULT_ROSTER_SOURCE)]
    pub roster: String,

    /// Restore the table, e.g. "page=2&team=LAL&sort=AST&order=asc"
    #[arg(long)]
    pub view: Option<String>,

    /// Open a player page on startup
    #[arg(long)]
    pub player: Option<String>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, env = LOG_ENV)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Path or http(s) URL of the stats document.
    pub stats_source: String,
    /// Path or http(s) URL of the roster document.
    pub roster_source: String,
    /// Table state to start from, e.g. restored from `--view`.
    pub initial_query: TableQuery,
    /// Player page to open on startup.
    pub initial_player: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            stats_source: DEFAULT_STATS_SOURCE.to_string(),
            roster_source: DEFAULT_ROSTER_SOURCE.to_string(),
            initial_query: TableQuery::default(),
            initial_player: None,
        }
    }
}

impl AppSettings {
    /// Flags, then environment, then defaults. Exits on `--help`,
    /// `--version` and bad arguments.
    pub fn load() -> Self {
        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(args: CliArgs) -> Self {
        let mut settings = Self::default();
        if !args.stats.trim().is_empty() {
            settings.stats_source = args.stats.trim().to_string();
        }
        if !args.roster.trim().is_empty() {
            settings.roster_source = args.roster.trim().to_string();
        }
        // An unknown level keeps the default rather than refusing to start.
        settings.log_level = args
            .log_level
            .as_deref()
            .and_then(|level| LevelFilter::from_str(level.trim()).ok());
        if let Some(view) = args.view {
            settings.initial_query = TableQuery::from_query_string(&view);
        }
        settings.initial_player = args.player.filter(|p| !p.trim().is_empty());
        settings
    }
}
