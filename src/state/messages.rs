use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nba_api::{RosterEntry, StatsSheet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Stats,
    Roster,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Stats => f.write_str("stats"),
            Document::Roster => f.write_str("roster"),
        }
    }
}

/// The two loads are independent; neither waits on the other.
#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadStats,
    LoadRoster,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    StatsLoaded { sheet: StatsSheet },
    RosterLoaded { roster: Vec<RosterEntry> },
    Error { document: Document, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
