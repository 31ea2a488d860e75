use nba_api::leaders::Leaderboard;
use nba_api::{PlayerStats, StatKey};
use tui::buffer::Buffer;
use tui::layout::{Direction, Rect};
use tui::style::{Color, Style};
use tui::text::Line;
use tui::widgets::{Bar, BarChart, BarGroup, Widget};

/// One color per charted stat, in `StatKey::CHART_STATS` order.
pub const PALETTE: [Color; 6] = [
    Color::Rgb(0xf5, 0x9e, 0x0b),
    Color::Rgb(0x3b, 0x82, 0xf6),
    Color::Rgb(0xa8, 0x55, 0xf7),
    Color::Rgb(0x4a, 0xde, 0x80),
    Color::Rgb(0xf8, 0x71, 0x71),
    Color::Rgb(0xea, 0xb3, 0x08),
];

/// Longest label drawn next to a horizontal bar.
const MAX_LABEL_WIDTH: usize = 18;

/// Bars hold integers, so values are scaled to keep one decimal of resolution.
pub fn bar_value(value: f64) -> u64 {
    (value.max(0.0) * 10.0).round() as u64
}

pub fn stat_color(stat: StatKey) -> Color {
    StatKey::CHART_STATS
        .iter()
        .position(|s| *s == stat)
        .map_or(Color::Gray, |i| PALETTE[i])
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    pub label: String,
    pub value: f64,
    pub color: Color,
}

/// Bar chart of per-game numbers, either one player's line or a leaderboard.
#[derive(Debug, Clone)]
pub struct StatChart {
    pub entries: Vec<ChartEntry>,
    pub direction: Direction,
}

impl StatChart {
    /// PTS, REB, AST, STL, BLK, TO for one player. Missing stats chart as 0.
    pub fn for_player(player: &PlayerStats) -> Self {
        let entries = StatKey::CHART_STATS
            .iter()
            .map(|&stat| ChartEntry {
                label: stat.code().to_string(),
                value: player.stat(stat).unwrap_or_default(),
                color: stat_color(stat),
            })
            .collect();
        Self { entries, direction: Direction::Vertical }
    }

    pub fn for_leaderboard(board: &Leaderboard<'_>) -> Self {
        let color = stat_color(board.stat);
        let entries = board
            .entries()
            .map(|(name, value)| ChartEntry {
                label: truncate(name, MAX_LABEL_WIDTH),
                value,
                color,
            })
            .collect();
        Self { entries, direction: Direction::Horizontal }
    }

    fn bar_width(&self, area: Rect) -> u16 {
        match self.direction {
            Direction::Horizontal => 1,
            Direction::Vertical => {
                let count = self.entries.len().max(1) as u16;
                (area.width.saturating_sub(count) / count).clamp(3, 9)
            }
        }
    }
}

impl Widget for StatChart {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 || self.entries.is_empty() {
            return;
        }

        let bars: Vec<Bar> = self
            .entries
            .iter()
            .map(|entry| {
                Bar::default()
                    .value(bar_value(entry.value))
                    .text_value(format!("{:.1}", entry.value))
                    .label(Line::from(entry.label.clone()))
                    .style(Style::default().fg(entry.color))
                    .value_style(Style::default().fg(Color::Black).bg(entry.color))
            })
            .collect();

        let bar_width = self.bar_width(area);
        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .direction(self.direction)
            .bar_width(bar_width)
            .bar_gap(1)
            .render(area, buf);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use nba_api::leaders::leaderboard;

    fn jokic() -> PlayerStats {
        PlayerStats {
            name: "Nikola Jokić".into(),
            points: Some(27.5),
            rebounds: Some(13.8),
            assists: Some(11.2),
            steals: Some(1.5),
            blocks: None,
            turnovers: Some(3.3),
            ..Default::default()
        }
    }

    fn rendered(chart: StatChart, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn values_keep_one_decimal() {
        assert_eq!(bar_value(27.5), 275);
        assert_eq!(bar_value(0.04), 0);
        assert_eq!(bar_value(-1.0), 0);
    }

    #[test]
    fn player_chart_covers_charted_stats_in_order() {
        let chart = StatChart::for_player(&jokic());
        let labels: Vec<&str> = chart.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["PTS", "REB", "AST", "STL", "BLK", "TO"]);
        assert_eq!(chart.entries[4].value, 0.0);
        assert_eq!(chart.entries[0].color, PALETTE[0]);
        assert_eq!(chart.direction, Direction::Vertical);
    }

    #[test]
    fn leaderboard_chart_is_horizontal_and_single_colored() {
        let players = vec![
            jokic(),
            PlayerStats {
                name: "Giannis Antetokounmpo".into(),
                rebounds: Some(11.9),
                ..Default::default()
            },
        ];
        let boards = leaderboard(&players);
        let chart = StatChart::for_leaderboard(&boards[1]);
        assert_eq!(chart.direction, Direction::Horizontal);
        assert_eq!(chart.entries.len(), 2);
        assert_eq!(chart.entries[1].label, "Giannis Antetokou…");
        assert!(chart.entries.iter().all(|e| e.color == stat_color(StatKey::Reb)));
    }

    #[test]
    fn renders_stat_labels() {
        let text = rendered(StatChart::for_player(&jokic()), 48, 12);
        assert!(text.contains("PTS"));
        assert!(text.contains("REB"));
    }

    #[test]
    fn tiny_area_draws_nothing() {
        let text = rendered(StatChart::for_player(&jokic()), 3, 1);
        assert!(text.trim().is_empty());
    }

    #[test]
    fn unknown_stat_color_is_gray() {
        assert_eq!(stat_color(StatKey::Min), Color::Gray);
        assert_eq!(stat_color(StatKey::To), PALETTE[5]);
    }
}
