//! The player table pipeline: filter → sort → paginate, driven by a
//! [`TableQuery`] that round-trips through a URL-style query string.

use crate::{PlayerStats, StatKey};
use std::cmp::Ordering;
use std::fmt;

pub const PAGE_SIZE: usize = 40;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Everything the table view needs to reproduce itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    /// 1-based.
    pub page: usize,
    pub search: String,
    pub position: Option<String>,
    pub team: Option<String>,
    pub sort_key: StatKey,
    pub sort_order: SortOrder,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            position: None,
            team: None,
            sort_key: StatKey::Pts,
            sort_order: SortOrder::Desc,
        }
    }
}

impl TableQuery {
    /// Clicking a column: same column flips the order, a new column starts
    /// descending. Always back to page 1.
    pub fn handle_sort(&mut self, key: StatKey) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.toggle();
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::Desc;
        }
        self.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_position(&mut self, position: Option<String>) {
        self.position = position.filter(|p| !p.is_empty());
        self.page = 1;
    }

    pub fn set_team(&mut self, team: Option<String>) {
        self.team = team.filter(|t| !t.is_empty());
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.position = None;
        self.team = None;
        self.page = 1;
    }

    /// Only pages inside `1..=total_pages` are accepted.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page >= 1 && page <= total_pages && page != self.page {
            self.page = page;
            true
        } else {
            false
        }
    }

    /// Encode as `page=2&search=...&pos=...&team=...&sort=PTS&order=desc`,
    /// leaving out values that match the defaults.
    pub fn to_query_string(&self) -> String {
        let defaults = TableQuery::default();
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if self.page != defaults.page {
            pairs.push(("page", self.page.to_string()));
        }
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if let Some(pos) = &self.position {
            pairs.push(("pos", pos.clone()));
        }
        if let Some(team) = &self.team {
            pairs.push(("team", team.clone()));
        }
        if self.sort_key != defaults.sort_key {
            pairs.push(("sort", self.sort_key.code().to_string()));
        }
        if self.sort_order != defaults.sort_order {
            pairs.push(("order", self.sort_order.as_str().to_string()));
        }
        pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Lenient parse: a leading `?` is fine, unknown keys and bad values are
    /// skipped and leave the default in place.
    pub fn from_query_string(input: &str) -> Self {
        let mut query = TableQuery::default();
        let input = input.trim().trim_start_matches('?');

        for pair in input.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(raw_value);
            match raw_key {
                "page" => {
                    if let Ok(page) = value.trim().parse::<usize>()
                        && page >= 1
                    {
                        query.page = page;
                    }
                }
                "search" => query.search = value,
                "pos" => query.position = Some(value).filter(|v| !v.is_empty()),
                "team" => query.team = Some(value).filter(|v| !v.is_empty()),
                "sort" => {
                    // Only table columns can carry the sort arrow.
                    if let Some(key) = StatKey::parse(&value)
                        .filter(|key| StatKey::TABLE_COLUMNS.contains(key))
                    {
                        query.sort_key = key;
                    }
                }
                "order" => {
                    if let Some(order) = SortOrder::parse(&value) {
                        query.sort_order = order;
                    }
                }
                _ => {}
            }
        }
        query
    }
}

impl fmt::Display for TableQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.to_query_string())
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Apply search and filters, then sort. Missing stats sort as 0 and ties
/// keep document order.
pub fn filter_and_sort<'a>(players: &'a [PlayerStats], query: &TableQuery) -> Vec<&'a PlayerStats> {
    let needle = query.search.to_lowercase();
    let team = query.team.as_deref().map(str::to_lowercase);

    let mut rows: Vec<&PlayerStats> = players
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.team.to_lowercase().contains(&needle)
        })
        .filter(|p| query.position.as_deref().is_none_or(|pos| p.position == pos))
        .filter(|p| team.as_deref().is_none_or(|t| p.team.to_lowercase() == t))
        .collect();

    rows.sort_by(|a, b| compare_stat(a, b, query.sort_key, query.sort_order));
    rows
}

fn compare_stat(a: &PlayerStats, b: &PlayerStats, key: StatKey, order: SortOrder) -> Ordering {
    let a_val = a.stat(key).unwrap_or(0.0);
    let b_val = b.stat(key).unwrap_or(0.0);
    match order {
        SortOrder::Asc => a_val.total_cmp(&b_val),
        SortOrder::Desc => b_val.total_cmp(&a_val),
    }
}

pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// The 1-based `page` of `rows`, with `page` clamped into range.
pub fn paginate<T>(rows: &[T], page: usize) -> &[T] {
    let page = clamp_page(page, rows.len());
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(rows.len());
    &rows[start.min(rows.len())..end]
}

pub fn clamp_page(page: usize, len: usize) -> usize {
    page.clamp(1, total_pages(len))
}
