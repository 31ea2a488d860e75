use crate::app::MenuItem;
use nba_api::names::HeadshotIndex;
use nba_api::query::{self, TableQuery};
use nba_api::{PlayerStats, RosterEntry, StatKey, StatsSheet};

// ---------------------------------------------------------------------------
// Loaded documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct DataState {
    pub stats: StatsSheet,
    pub stats_status: LoadStatus,
    pub roster: Vec<RosterEntry>,
    pub roster_status: LoadStatus,
    /// Exact-key thumbnails for the table, rebuilt whenever the roster lands.
    pub headshots: HeadshotIndex,
}

impl DataState {
    pub fn stats_ready(&self) -> bool {
        self.stats_status == LoadStatus::Loaded
    }
}

// ---------------------------------------------------------------------------
// Player table
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TableView {
    pub query: TableQuery,
    /// Selected row within the current page.
    pub selected_row: usize,
    /// Highlighted sortable column, index into `StatKey::TABLE_COLUMNS`.
    pub column: usize,
    /// True while the search box has focus.
    pub searching: bool,
}

impl TableView {
    pub fn new(query: TableQuery) -> Self {
        let column = StatKey::TABLE_COLUMNS
            .iter()
            .position(|k| *k == query.sort_key)
            .unwrap_or(0);
        Self { query, column, ..Default::default() }
    }

    pub fn rows<'a>(&self, sheet: &'a StatsSheet) -> Vec<&'a PlayerStats> {
        query::filter_and_sort(&sheet.players, &self.query)
    }

    /// The page actually shown, after clamping the requested page.
    pub fn current_page(&self, total_rows: usize) -> usize {
        query::clamp_page(self.query.page, total_rows)
    }

    pub fn selected_player<'a>(&self, sheet: &'a StatsSheet) -> Option<&'a PlayerStats> {
        let rows = self.rows(sheet);
        let page = query::paginate(&rows, self.query.page);
        page.get(self.selected_row.min(page.len().saturating_sub(1))).copied()
    }

    pub fn highlighted_column(&self) -> StatKey {
        StatKey::TABLE_COLUMNS[self.column.min(StatKey::TABLE_COLUMNS.len() - 1)]
    }

    pub fn row_down(&mut self, rows_on_page: usize) {
        if self.selected_row + 1 < rows_on_page {
            self.selected_row += 1;
        }
    }

    pub fn row_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn column_right(&mut self) {
        self.column = (self.column + 1) % StatKey::TABLE_COLUMNS.len();
    }

    pub fn column_left(&mut self) {
        let len = StatKey::TABLE_COLUMNS.len();
        self.column = (self.column + len - 1) % len;
    }

    pub fn sort_by_highlighted(&mut self) {
        self.query.handle_sort(self.highlighted_column());
        self.selected_row = 0;
    }

    pub fn toggle_order(&mut self) {
        self.query.handle_sort(self.query.sort_key);
        self.selected_row = 0;
    }

    pub fn next_page(&mut self, total_rows: usize) {
        let current = self.current_page(total_rows);
        self.query.page = current;
        if self.query.go_to_page(current + 1, query::total_pages(total_rows)) {
            self.selected_row = 0;
        }
    }

    pub fn prev_page(&mut self, total_rows: usize) {
        let current = self.current_page(total_rows);
        self.query.page = current;
        if self.query.go_to_page(current.saturating_sub(1), query::total_pages(total_rows)) {
            self.selected_row = 0;
        }
    }

    /// Step through "all positions" followed by every known position.
    pub fn cycle_position(&mut self, positions: &[String]) {
        let next = next_option(self.query.position.as_deref(), positions);
        self.query.set_position(next);
        self.selected_row = 0;
    }

    pub fn cycle_team(&mut self, teams: &[String]) {
        let next = next_option(self.query.team.as_deref(), teams);
        self.query.set_team(next);
        self.selected_row = 0;
    }

    pub fn clear_filters(&mut self) {
        self.query.clear_filters();
        self.selected_row = 0;
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut search = self.query.search.clone();
        search.push(c);
        self.query.set_search(search);
        self.selected_row = 0;
    }

    pub fn pop_search_char(&mut self) {
        let mut search = self.query.search.clone();
        search.pop();
        self.query.set_search(search);
        self.selected_row = 0;
    }
}

/// None → first → ... → last → None.
fn next_option(current: Option<&str>, options: &[String]) -> Option<String> {
    match current {
        None => options.first().cloned(),
        Some(value) => options
            .iter()
            .position(|o| o == value)
            .and_then(|i| options.get(i + 1))
            .cloned(),
    }
}

// ---------------------------------------------------------------------------
// Player page
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DetailState {
    /// Name the page was opened with; resolved against the stats on draw.
    pub target: Option<String>,
}

// ---------------------------------------------------------------------------
// Root state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub data: DataState,
    pub table: TableView,
    pub detail: DetailState,
    pub last_error: Option<String>,
    pub show_logs: bool,
}

impl AppState {
    pub fn new(query: TableQuery) -> Self {
        Self {
            table: TableView::new(query),
            ..Default::default()
        }
    }
}
