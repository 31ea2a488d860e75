use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, LoadStatus};
use crate::state::messages::Document;
use log::warn;
use nba_api::names::{HeadshotIndex, find_player, find_roster_entry};
use nba_api::query;
use nba_api::{HeadshotSize, PlayerStats, RosterEntry, StatsSheet};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Players,
    Leaders,
    Player,
    Help,
}

/// What the player page can show right now.
#[derive(Debug, PartialEq)]
pub enum PlayerPage<'a> {
    /// Nothing opened yet.
    NoSelection,
    /// Stats are still on their way.
    Loading,
    /// No match, or the stats never arrived.
    NotFound { name: String },
    Found {
        player: &'a PlayerStats,
        /// Large headshot, None when the roster has no match.
        headshot: Option<String>,
    },
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        if let Some(level) = settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        let mut state = AppState::new(settings.initial_query.clone());
        if let Some(name) = settings.initial_player.clone() {
            state.detail.target = Some(name);
            state.active_tab = MenuItem::Player;
        }
        Self { settings, state }
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_stats_loaded(&mut self, sheet: StatsSheet) {
        self.state.last_error = None;
        self.state.data.stats = sheet;
        self.state.data.stats_status = LoadStatus::Loaded;
        if let Some(name) = self.state.detail.target.clone() {
            self.warn_if_unresolved(&name);
        }
    }

    pub fn on_roster_loaded(&mut self, roster: Vec<RosterEntry>) {
        self.state.data.headshots = HeadshotIndex::from_roster(&roster);
        self.state.data.roster = roster;
        self.state.data.roster_status = LoadStatus::Loaded;
    }

    /// Failures only degrade the views that depend on the document.
    pub fn on_load_failed(&mut self, document: Document, message: String) {
        match document {
            Document::Stats => self.state.data.stats_status = LoadStatus::Failed(message.clone()),
            Document::Roster => self.state.data.roster_status = LoadStatus::Failed(message.clone()),
        }
        self.state.last_error = Some(message);
    }

    pub fn on_reload_requested(&mut self) {
        self.state.data.stats_status = LoadStatus::Loading;
        self.state.data.roster_status = LoadStatus::Loading;
        self.state.last_error = None;
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    /// Esc: back to wherever we came from.
    pub fn go_back(&mut self) {
        let previous = self.state.previous_tab;
        if previous != self.state.active_tab {
            self.update_tab(previous);
        } else {
            self.update_tab(MenuItem::Players);
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Player table — delegated to TableView
    // -----------------------------------------------------------------------

    fn filtered_len(&self) -> usize {
        self.state.table.rows(&self.state.data.stats).len()
    }

    fn rows_on_page(&self) -> usize {
        let rows = self.state.table.rows(&self.state.data.stats);
        query::paginate(&rows, self.state.table.query.page).len()
    }

    pub fn table_row_down(&mut self) {
        let on_page = self.rows_on_page();
        self.state.table.row_down(on_page);
    }

    pub fn table_row_up(&mut self) {
        self.state.table.row_up();
    }

    pub fn table_column_left(&mut self) {
        self.state.table.column_left();
    }

    pub fn table_column_right(&mut self) {
        self.state.table.column_right();
    }

    pub fn table_sort(&mut self) {
        self.state.table.sort_by_highlighted();
    }

    pub fn table_toggle_order(&mut self) {
        self.state.table.toggle_order();
    }

    pub fn table_next_page(&mut self) {
        let len = self.filtered_len();
        self.state.table.next_page(len);
    }

    pub fn table_prev_page(&mut self) {
        let len = self.filtered_len();
        self.state.table.prev_page(len);
    }

    pub fn table_cycle_position(&mut self) {
        let positions = self.state.data.stats.unique_positions();
        self.state.table.cycle_position(&positions);
    }

    pub fn table_cycle_team(&mut self) {
        let teams = self.state.data.stats.unique_teams();
        self.state.table.cycle_team(&teams);
    }

    pub fn table_clear_filters(&mut self) {
        self.state.table.clear_filters();
    }

    pub fn begin_search(&mut self) {
        self.state.table.searching = true;
    }

    pub fn end_search(&mut self) {
        self.state.table.searching = false;
    }

    pub fn search_push(&mut self, c: char) {
        self.state.table.push_search_char(c);
    }

    pub fn search_pop(&mut self) {
        self.state.table.pop_search_char();
    }

    // -----------------------------------------------------------------------
    // Player page
    // -----------------------------------------------------------------------

    /// Enter on a table row.
    pub fn open_selected_player(&mut self) {
        let Some(name) = self
            .state
            .table
            .selected_player(&self.state.data.stats)
            .map(|p| p.name.clone())
        else {
            return;
        };
        self.open_player(name);
    }

    pub fn open_player(&mut self, name: String) {
        if self.state.data.stats_ready() {
            self.warn_if_unresolved(&name);
        }
        self.state.detail.target = Some(name);
        self.update_tab(MenuItem::Player);
    }

    fn warn_if_unresolved(&self, name: &str) {
        if find_player(&self.state.data.stats.players, name).is_none() {
            warn!("player not found: {name}");
        }
    }

    pub fn player_page(&self) -> PlayerPage<'_> {
        let Some(name) = self.state.detail.target.as_deref() else {
            return PlayerPage::NoSelection;
        };
        let data = &self.state.data;

        match &data.stats_status {
            LoadStatus::Loading => PlayerPage::Loading,
            LoadStatus::Failed(_) => PlayerPage::NotFound { name: name.to_string() },
            LoadStatus::Loaded => match find_player(&data.stats.players, name) {
                None => PlayerPage::NotFound { name: name.to_string() },
                Some(player) => PlayerPage::Found {
                    player,
                    headshot: find_roster_entry(&data.roster, &player.name)
                        .and_then(|entry| entry.headshot(HeadshotSize::Large)),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> StatsSheet {
        StatsSheet::new(vec![
            PlayerStats {
                name: "Nikola Jokić".into(),
                team: "DEN".into(),
                position: "C".into(),
                points: Some(29.6),
                ..Default::default()
            },
            PlayerStats {
                name: "Jaren Jackson Jr.".into(),
                team: "MEM".into(),
                position: "PF".into(),
                points: Some(22.2),
                ..Default::default()
            },
        ])
    }

    fn roster() -> Vec<RosterEntry> {
        vec![RosterEntry {
            first_name: "Nikola".into(),
            last_name: "Jokic".into(),
            player_id: Some("203999".into()),
            headshot_url: None,
        }]
    }

    fn app() -> App {
        App::new(AppSettings::default())
    }

    #[test]
    fn player_page_waits_for_stats() {
        let mut app = app();
        assert_eq!(app.player_page(), PlayerPage::NoSelection);
        app.open_player("Nikola Jokic".into());
        assert_eq!(app.state.active_tab, MenuItem::Player);
        assert_eq!(app.player_page(), PlayerPage::Loading);
    }

    #[test]
    fn player_page_resolves_by_name_key_and_headshot() {
        let mut app = app();
        app.on_stats_loaded(stats());
        app.on_roster_loaded(roster());
        app.open_player("nikola jokic".into());
        match app.player_page() {
            PlayerPage::Found { player, headshot } => {
                assert_eq!(player.name, "Nikola Jokić");
                assert_eq!(
                    headshot.as_deref(),
                    Some("https://cdn.nba.com/headshots/nba/latest/1040x760/203999.png")
                );
            }
            other => panic!("unexpected page: {other:?}"),
        }
    }

    #[test]
    fn player_without_roster_match_has_no_headshot() {
        let mut app = app();
        app.on_stats_loaded(stats());
        app.on_load_failed(Document::Roster, "roster down".into());
        app.open_player("Jaren Jackson".into());
        match app.player_page() {
            PlayerPage::Found { player, headshot } => {
                assert_eq!(player.name, "Jaren Jackson Jr.");
                assert_eq!(headshot, None);
            }
            other => panic!("unexpected page: {other:?}"),
        }
    }

    #[test]
    fn failed_stats_mean_not_found() {
        let mut app = app();
        app.open_player("Nikola Jokic".into());
        app.on_load_failed(Document::Stats, "boom".into());
        assert_eq!(
            app.player_page(),
            PlayerPage::NotFound { name: "Nikola Jokic".into() }
        );
        assert_eq!(app.state.last_error.as_deref(), Some("boom"));
    }

    #[test]
    fn unknown_player_is_not_found() {
        let mut app = app();
        app.on_stats_loaded(stats());
        app.open_player("Michael Jordan".into());
        assert!(matches!(app.player_page(), PlayerPage::NotFound { .. }));
    }

    #[test]
    fn enter_on_table_opens_selected_row() {
        let mut app = app();
        app.on_stats_loaded(stats());
        app.table_row_down();
        app.open_selected_player();
        assert_eq!(app.state.detail.target.as_deref(), Some("Jaren Jackson Jr."));
        app.go_back();
        assert_eq!(app.state.active_tab, MenuItem::Players);
    }

    #[test]
    fn initial_player_opens_detail_tab() {
        let settings = AppSettings {
            initial_player: Some("Jokic".into()),
            ..Default::default()
        };
        let mut app = App::new(settings);
        assert_eq!(app.state.active_tab, MenuItem::Player);
        app.on_stats_loaded(stats());
        assert!(matches!(app.player_page(), PlayerPage::Found { .. }));
    }

    #[test]
    fn reload_resets_both_documents() {
        let mut app = app();
        app.on_stats_loaded(stats());
        app.on_load_failed(Document::Roster, "roster down".into());
        app.on_reload_requested();
        assert_eq!(app.state.data.stats_status, LoadStatus::Loading);
        assert_eq!(app.state.data.roster_status, LoadStatus::Loading);
        assert_eq!(app.state.last_error, None);
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app();
        app.update_tab(MenuItem::Leaders);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Leaders);
    }

    #[test]
    fn roster_builds_thumbnail_index() {
        let mut app = app();
        app.on_roster_loaded(roster());
        assert_eq!(
            app.state.data.headshots.lookup("Nikola Jokić"),
            Some("https://cdn.nba.com/headshots/nba/latest/260x190/203999.png")
        );
    }
}
