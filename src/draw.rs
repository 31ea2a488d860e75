use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Tabs};
use tui::{Frame, Terminal};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, MenuItem, PlayerPage};
use crate::components::stat_chart::StatChart;
use crate::state::app_state::LoadStatus;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use nba_api::leaders::{Leaderboard, leaderboard};
use nba_api::query::{self, PAGE_SIZE};
use nba_api::teams::team_info;
use nba_api::{PLACEHOLDER_HEADSHOT, PlayerStats, StatKey};

static TABS: &[&str; 3] = &["Players", "Leaders", "Player"];

const DETAIL_COLUMNS: [StatKey; 8] = [
    StatKey::Gp,
    StatKey::Min,
    StatKey::Pts,
    StatKey::Reb,
    StatKey::Ast,
    StatKey::Stl,
    StatKey::Blk,
    StatKey::To,
];

const ACCENT: Color = Color::Rgb(0xf5, 0x9e, 0x0b);

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Players => draw_players(f, layout.main, app),
            MenuItem::Leaders => draw_leaders(f, layout.main, app),
            MenuItem::Player => draw_player(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        log::error!("failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Players => 0,
        MenuItem::Leaders => 1,
        MenuItem::Player => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let (status, status_style) = match app.state.last_error {
        Some(_) => ("Error! \"=logs ", style.fg(Color::Red)),
        None => ("Help: ? ", style),
    };
    let help = Paragraph::new(status)
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(status_style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_message(f: &mut Frame, area: Rect, msg: impl Into<String>) {
    f.render_widget(
        Paragraph::new(msg.into())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

// ---------------------------------------------------------------------------
// Players table
// ---------------------------------------------------------------------------

fn draw_players(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" NBA Player Stats ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let data = &app.state.data;
    match &data.stats_status {
        LoadStatus::Loading => return draw_message(f, inner, "Loading players..."),
        LoadStatus::Failed(err) => {
            return draw_message(f, inner, format!("Stats load failed:\n{err}"));
        }
        LoadStatus::Loaded => {}
    }

    let [filters, table_area, footer] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(4)])
            .areas(inner);

    draw_filter_bar(f, filters, app);

    let view = &app.state.table;
    let rows = view.rows(&data.stats);
    let page = view.current_page(rows.len());
    let on_page = query::paginate(&rows, page);

    if on_page.is_empty() {
        draw_message(f, table_area, "No players found.");
    } else {
        draw_player_table(f, table_area, app, on_page, page);
    }

    let selected = view.selected_player(&data.stats);
    let updated = if data.stats.is_empty() {
        "loading...".to_string()
    } else {
        data.stats.formatted_update().unwrap_or_else(|| "-".to_string())
    };
    let thumbnail = selected.map_or(PLACEHOLDER_HEADSHOT, |p| data.headshots.url_or_placeholder(&p.name));
    let dim = Style::default().fg(Color::DarkGray);

    let lines = vec![
        Line::from(format!(
            "Page {} of {} • Showing {} of {} players",
            page,
            query::total_pages(rows.len()),
            on_page.len(),
            rows.len()
        )),
        Line::from(vec![Span::styled("Last update: ", dim), Span::raw(updated)]),
        Line::from(vec![Span::styled("View: ", dim), Span::raw(view.query.to_string())]),
        Line::from(vec![Span::styled("Headshot: ", dim), Span::raw(thumbnail)]),
    ];
    f.render_widget(Paragraph::new(lines), footer);
}

fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.state.table;
    let dim = Style::default().fg(Color::DarkGray);
    let search_style = if view.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if view.searching { "_" } else { "" };

    let line = Line::from(vec![
        Span::styled("Search: ", dim),
        Span::styled(format!("{}{cursor}", view.query.search), search_style),
        Span::styled("  Position: ", dim),
        Span::raw(view.query.position.as_deref().unwrap_or("All")),
        Span::styled("  Team: ", dim),
        Span::raw(view.query.team.as_deref().unwrap_or("All")),
        Span::styled("  Sort: ", dim),
        Span::raw(format!("{} {}", view.query.sort_key, view.query.sort_order.arrow())),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_player_table(f: &mut Frame, area: Rect, app: &App, on_page: &[&PlayerStats], page: usize) {
    let view = &app.state.table;
    let highlighted = view.highlighted_column();

    let mut header: Vec<Cell> = ["#", "Player", "Team", "Pos"].into_iter().map(Cell::from).collect();
    header.extend(StatKey::TABLE_COLUMNS.iter().map(|&key| {
        let mut title = key.code().to_string();
        if key == view.query.sort_key {
            title.push(' ');
            title.push_str(view.query.sort_order.arrow());
        }
        let style = if key == highlighted {
            Style::default().fg(Color::Black).bg(ACCENT)
        } else {
            Style::default()
        };
        Cell::from(title).style(style)
    }));

    let first_rank = (page - 1) * PAGE_SIZE + 1;
    let rows: Vec<Row> = on_page
        .iter()
        .enumerate()
        .map(|(i, player)| {
            let mut cells = vec![
                Cell::from((first_rank + i).to_string()),
                Cell::from(player.name.as_str()),
                Cell::from(player.team.as_str()),
                Cell::from(player.position.as_str()),
            ];
            cells.extend(StatKey::TABLE_COLUMNS.iter().map(|&key| {
                let style = if key == view.query.sort_key {
                    Style::default().fg(ACCENT)
                } else {
                    Style::default()
                };
                Cell::from(player.stat_text(key)).style(style)
            }));
            let base = if i % 2 == 1 {
                Style::default().bg(Color::Rgb(0x1f, 0x29, 0x37))
            } else {
                Style::default()
            };
            Row::new(cells).style(base)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Length(5),
        Constraint::Length(6),
    ];
    widths.extend(StatKey::TABLE_COLUMNS.iter().map(|_| Constraint::Length(7)));

    let table = Table::new(rows, widths)
        .header(
            Row::new(header)
                .style(Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let selected = view.selected_row.min(on_page.len().saturating_sub(1));
    let mut state = TableState::default().with_selected(Some(selected));
    f.render_stateful_widget(table, area, &mut state);
}

// ---------------------------------------------------------------------------
// Player detail
// ---------------------------------------------------------------------------

fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Player ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (player, headshot) = match app.player_page() {
        PlayerPage::NoSelection => {
            return draw_message(f, inner, "Pick a player in the Players tab and press Enter.");
        }
        PlayerPage::Loading => return draw_message(f, inner, "Loading player information..."),
        PlayerPage::NotFound { name } => {
            return draw_message(f, inner, format!("Player not found.\n{name}"));
        }
        PlayerPage::Found { player, headshot } => (player, headshot),
    };

    let [info, chart_area, table_area, updated] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    let team = team_info(&player.team);
    let dim = Style::default().fg(Color::DarkGray);
    let position = if player.position.is_empty() { "-" } else { player.position.as_str() };

    let lines = vec![
        Line::from(Span::styled(
            player.name.as_str(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Team: ", dim),
            Span::raw(format!("{} ({})", team.name, team.abbrev)),
            Span::styled("  Position: ", dim),
            Span::raw(position),
        ]),
        Line::from(vec![
            Span::styled("Logo: ", dim),
            Span::raw(team.logo.unwrap_or_else(|| "-".to_string())),
        ]),
        Line::from(vec![
            Span::styled("Headshot: ", dim),
            Span::raw(headshot.unwrap_or_else(|| match app.state.data.roster_status {
                LoadStatus::Loading => "loading...".to_string(),
                _ => PLACEHOLDER_HEADSHOT.to_string(),
            })),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), info);

    let chart_block = default_border(Color::DarkGray).title(" Per game ");
    let chart_inner = chart_block.inner(chart_area);
    f.render_widget(chart_block, chart_area);
    f.render_widget(StatChart::for_player(player), chart_inner);

    let header = Row::new(DETAIL_COLUMNS.iter().map(|k| Cell::from(k.code())))
        .style(Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD));
    let values = Row::new(DETAIL_COLUMNS.iter().map(|&k| Cell::from(player.stat_text(k))));
    let table = Table::new(vec![values], DETAIL_COLUMNS.iter().map(|_| Constraint::Length(7)))
        .header(header.bottom_margin(1))
        .column_spacing(1);
    f.render_widget(table, table_area);

    let updated_text = app
        .state
        .data
        .stats
        .formatted_update()
        .unwrap_or_else(|| "-".to_string());
    f.render_widget(
        Paragraph::new(Line::from(vec![Span::styled("Last update: ", dim), Span::raw(updated_text)]))
            .alignment(Alignment::Right),
        updated,
    );
}

// ---------------------------------------------------------------------------
// Leaders
// ---------------------------------------------------------------------------

fn draw_leaders(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Top Performers ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let data = &app.state.data;
    match &data.stats_status {
        LoadStatus::Loading => return draw_message(f, inner, "Loading statistics..."),
        LoadStatus::Failed(err) => {
            return draw_message(f, inner, format!("Statistics unavailable:\n{err}"));
        }
        LoadStatus::Loaded => {}
    }

    let boards = leaderboard(&data.stats.players);
    let [top, bottom] = Layout::vertical([Constraint::Fill(1); 2]).areas(inner);
    let top_panes: [Rect; 3] = Layout::horizontal([Constraint::Fill(1); 3]).areas(top);
    let bottom_panes: [Rect; 3] = Layout::horizontal([Constraint::Fill(1); 3]).areas(bottom);

    for (board, pane) in boards.iter().zip(top_panes.into_iter().chain(bottom_panes)) {
        draw_leader_pane(f, pane, board);
    }
}

fn draw_leader_pane(f: &mut Frame, area: Rect, board: &Leaderboard<'_>) {
    let block = default_border(Color::DarkGray).title(format!(" {} ", board.stat.label()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if board.leaders.is_empty() {
        return draw_message(f, inner, "No data");
    }

    let list_height = board.leaders.len() as u16;
    let [chart_area, list_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(list_height)]).areas(inner);

    f.render_widget(StatChart::for_leaderboard(board), chart_area);

    let lines: Vec<Line> = board
        .leaders
        .iter()
        .enumerate()
        .map(|(i, player)| {
            Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(player.name.as_str()),
                Span::styled(format!(" ({}) ", player.team), Style::default().fg(Color::DarkGray)),
                Span::styled(player.stat_text(board.stat), Style::default().fg(ACCENT)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), list_area);
}

// ---------------------------------------------------------------------------
// Help, logs, spinner
// ---------------------------------------------------------------------------

const HELP_LINES: &[(&str, &str)] = &[
    ("q / Ctrl-C", "quit"),
    ("1 2 3", "Players, Leaders, Player"),
    ("Esc", "back"),
    ("r", "reload data"),
    ("f", "toggle full screen"),
    ("\"", "toggle log pane"),
    ("", ""),
    ("j / k", "select row"),
    ("h / l", "highlight column"),
    ("s", "sort by highlighted column"),
    ("o", "flip sort order"),
    ("n / p", "next / previous page"),
    ("/", "search by name or team (Enter to finish)"),
    ("P", "cycle position filter"),
    ("t", "cycle team filter"),
    ("x", "clear filters"),
    ("Enter", "open player"),
];

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{keys:>12}  "), Style::default().fg(ACCENT)),
                Span::raw(*action),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray))
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(logger, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
