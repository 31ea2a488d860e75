use crate::{PlayerStats, StatKey};

/// Number of players shown per stat on the leaders page.
pub const LEADERS_PER_STAT: usize = 5;

#[derive(Debug, Clone)]
pub struct Leaderboard<'a> {
    pub stat: StatKey,
    pub leaders: Vec<&'a PlayerStats>,
}

impl Leaderboard<'_> {
    /// `(name, value)` pairs in rank order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.leaders
            .iter()
            .map(|p| (p.name.as_str(), p.stat(self.stat).unwrap_or_default()))
    }
}

/// Highest `n` values of `stat`. Players without the stat are left out;
/// ties keep document order.
pub fn top_players(players: &[PlayerStats], stat: StatKey, n: usize) -> Vec<&PlayerStats> {
    let mut ranked: Vec<&PlayerStats> = players.iter().filter(|p| p.stat(stat).is_some()).collect();
    ranked.sort_by(|a, b| {
        let a_val = a.stat(stat).unwrap_or_default();
        let b_val = b.stat(stat).unwrap_or_default();
        b_val.total_cmp(&a_val)
    });
    ranked.truncate(n);
    ranked
}

/// One board per charted stat.
pub fn leaderboard(players: &[PlayerStats]) -> Vec<Leaderboard<'_>> {
    StatKey::CHART_STATS
        .iter()
        .map(|&stat| Leaderboard {
            stat,
            leaders: top_players(players, stat, LEADERS_PER_STAT),
        })
        .collect()
}
