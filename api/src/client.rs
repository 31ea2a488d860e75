use crate::wire::{RawRosterRecord, RawStatRecord, RosterDocument};
use crate::{PlayerStats, RosterEntry, StatsSheet};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_STATS_SOURCE: &str = "data/stats.json";
pub const DEFAULT_ROSTER_SOURCE: &str = "data/nba_players.json";

/// Where a static document lives: served over HTTP or sitting on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            DataSource::Url(source.to_string())
        } else {
            DataSource::File(PathBuf::from(source))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loader for the stats and roster documents.
#[derive(Debug, Clone)]
pub struct StatsApi {
    client: Client,
    timeout: Duration,
    stats: DataSource,
    roster: DataSource,
}

impl Default for StatsApi {
    fn default() -> Self {
        Self::new(
            DataSource::parse(DEFAULT_STATS_SOURCE),
            DataSource::parse(DEFAULT_ROSTER_SOURCE),
        )
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Io(std::io::Error, String),
    Json(serde_json::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "Server error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Io(e, path) => write!(f, "Could not read {path}: {e}"),
            ApiError::Json(e, path) => write!(f, "Invalid JSON in {path}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl StatsApi {
    pub fn new(stats: DataSource, roster: DataSource) -> Self {
        Self {
            client: Client::builder()
                .user_agent("nbatui/0.1 (terminal stats viewer)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            stats,
            roster,
        }
    }

    pub fn stats_source(&self) -> &DataSource {
        &self.stats
    }

    pub fn roster_source(&self) -> &DataSource {
        &self.roster
    }

    /// Load the stats document. Any failure is returned as-is; nothing retries.
    pub async fn fetch_stats(&self) -> ApiResult<StatsSheet> {
        let raw: Vec<RawStatRecord> = self.load(&self.stats).await?;
        Ok(StatsSheet::new(raw.into_iter().map(map_stat_record).collect()))
    }

    /// Load the roster document, accepting both a bare array and an object
    /// wrapping it under `players`.
    pub async fn fetch_roster(&self) -> ApiResult<Vec<RosterEntry>> {
        let doc: RosterDocument = self.load(&self.roster).await?;
        Ok(doc.into_records().into_iter().map(map_roster_record).collect())
    }

    async fn load<T: DeserializeOwned>(&self, source: &DataSource) -> ApiResult<T> {
        match source {
            DataSource::Url(url) => self.get(url).await,
            DataSource::File(path) => {
                let shown = path.display().to_string();
                let content = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| ApiError::Io(e, shown.clone()))?;
                serde_json::from_str(&content).map_err(|e| ApiError::Json(e, shown))
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → domain types
// ---------------------------------------------------------------------------

fn map_stat_record(raw: RawStatRecord) -> PlayerStats {
    PlayerStats {
        name: raw.name.trim().to_string(),
        team: raw.team.trim().to_string(),
        position: raw.position.trim().to_string(),
        points: raw.points,
        rebounds: raw.rebounds,
        assists: raw.assists,
        steals: raw.steals,
        blocks: raw.blocks,
        turnovers: raw.turnovers,
        minutes: raw.minutes,
        games_played: raw.games_played,
        updated_at: raw.updated_at,
    }
}

fn map_roster_record(raw: RawRosterRecord) -> RosterEntry {
    RosterEntry {
        first_name: raw.first_name_camel.or(raw.first_name).unwrap_or_default(),
        last_name: raw.last_name_camel.or(raw.last_name).unwrap_or_default(),
        // Ids are already blank-filtered, so an empty `id` falls through to `player_id`.
        player_id: raw.id.or(raw.player_id),
        headshot_url: raw.headshot_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeadshotSize;
    use std::io::Write;

    const STATS_JSON: &str = r#"[
        {"NAME":"Shai Gilgeous-Alexander","POS":"PG","TEAM":"OKC","GP":7,"MIN":33.4,
         "PTS":32.7,"REB":5.1,"AST":6.4,"STL":1.6,"BLK":0.9,"TO":2.3,
         "UPDATED_AT":"2025-11-02T14:05:00.512341+00:00"},
        {"NAME":"Nikola Jokić","POS":"C","TEAM":"DEN","GP":6,"MIN":36.0,
         "PTS":27.5,"REB":13.8,"AST":11.2,"STL":1.5,"BLK":0.7,"TO":3.3,
         "UPDATED_AT":"2025-11-02T14:05:00.512341+00:00"}
    ]"#;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("nba-api-{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn data_source_detects_urls() {
        assert_eq!(
            DataSource::parse("https://example.com/data/stats.json"),
            DataSource::Url("https://example.com/data/stats.json".into())
        );
        assert_eq!(
            DataSource::parse(" data/stats.json "),
            DataSource::File(PathBuf::from("data/stats.json"))
        );
    }

    #[test]
    fn roster_record_prefers_camel_case_and_id() {
        let raw: RawRosterRecord = serde_json::from_str(
            r#"{"id":1628983,"player_id":"999","firstName":"Shai","first_name":"S.",
                "lastName":"Gilgeous-Alexander","headshot_url":""}"#,
        )
        .unwrap();
        let entry = map_roster_record(raw);
        assert_eq!(entry.full_name(), "Shai Gilgeous-Alexander");
        assert_eq!(entry.player_id.as_deref(), Some("1628983"));
        assert_eq!(entry.headshot_url, None);
    }

    #[test]
    fn empty_id_falls_back_to_player_id() {
        let raw: RawRosterRecord = serde_json::from_str(
            r#"{"id":"","player_id":2544.0,"first_name":"LeBron","last_name":"James"}"#,
        )
        .unwrap();
        let entry = map_roster_record(raw);
        assert_eq!(entry.player_id.as_deref(), Some("2544"));
        assert_eq!(
            entry.headshot(HeadshotSize::Thumb).as_deref(),
            Some("https://cdn.nba.com/headshots/nba/latest/260x190/2544.png")
        );
    }

    #[tokio::test]
    async fn roster_with_one_odd_id_keeps_the_rest() {
        let path = temp_file(
            "odd-roster.json",
            r#"[{"id":2544.0,"firstName":"LeBron","lastName":"James"},
                {"id":{"nba":1},"firstName":"Mystery","lastName":"Player"},
                {"id":203999,"firstName":"Nikola","lastName":"Jokic"}]"#,
        );
        let api = StatsApi::new(DataSource::File(path.clone()), DataSource::File(path.clone()));
        let roster = api.fetch_roster().await.expect("roster should load");
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].player_id.as_deref(), Some("2544"));
        assert_eq!(roster[1].player_id, None);
        assert_eq!(roster[2].player_id.as_deref(), Some("203999"));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn fetch_stats_from_file() {
        let path = temp_file("stats.json", STATS_JSON);
        let api = StatsApi::new(DataSource::File(path.clone()), DataSource::File(path.clone()));
        let sheet = api.fetch_stats().await.expect("stats should load");
        assert_eq!(sheet.players.len(), 2);
        assert_eq!(sheet.players[1].name, "Nikola Jokić");
        assert_eq!(sheet.players[1].rebounds, Some(13.8));
        assert_eq!(sheet.last_updated(), Some("2025-11-02T14:05:00.512341+00:00"));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let api = StatsApi::new(
            DataSource::File(PathBuf::from("/definitely/not/here/stats.json")),
            DataSource::File(PathBuf::from("/definitely/not/here/roster.json")),
        );
        let err = api.fetch_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Io(_, _)));
        assert!(err.to_string().contains("/definitely/not/here/stats.json"));
    }

    #[tokio::test]
    async fn malformed_file_is_json_error() {
        let path = temp_file("broken.json", "{ not json");
        let api = StatsApi::new(DataSource::File(path.clone()), DataSource::File(path.clone()));
        assert!(matches!(api.fetch_stats().await, Err(ApiError::Json(_, _))));
        assert!(matches!(api.fetch_roster().await, Err(ApiError::Json(_, _))));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn fetch_stats_over_http() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/data/stats.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(STATS_JSON)
            .create_async()
            .await;

        let api = StatsApi::new(
            DataSource::Url(format!("{}/data/stats.json", server.url())),
            DataSource::Url(format!("{}/data/nba_players.json", server.url())),
        );
        let sheet = api.fetch_stats().await.expect("stats should load");
        mock.assert_async().await;
        assert_eq!(sheet.players[0].team, "OKC");
        assert_eq!(sheet.unique_positions(), vec!["PG", "C"]);
    }

    #[tokio::test]
    async fn fetch_wrapped_roster_over_http() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data/nba_players.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"players":[
                    {"player_id":203999,"first_name":"Nikola","last_name":"Jokic"},
                    {"id":"1628983","firstName":"Shai","lastName":"Gilgeous-Alexander",
                     "headshot_url":"https://img.example/sga.png"}
                ]}"#,
            )
            .create_async()
            .await;

        let api = StatsApi::new(
            DataSource::Url(format!("{}/data/stats.json", server.url())),
            DataSource::Url(format!("{}/data/nba_players.json", server.url())),
        );
        let roster = api.fetch_roster().await.expect("roster should load");
        assert_eq!(roster.len(), 2);
        assert_eq!(
            roster[0].headshot(HeadshotSize::Large).as_deref(),
            Some("https://cdn.nba.com/headshots/nba/latest/1040x760/203999.png")
        );
        assert_eq!(
            roster[1].headshot(HeadshotSize::Thumb).as_deref(),
            Some("https://img.example/sga.png")
        );
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data/stats.json")
            .with_status(500)
            .create_async()
            .await;

        let api = StatsApi::new(
            DataSource::Url(format!("{}/data/stats.json", server.url())),
            DataSource::Url(format!("{}/data/nba_players.json", server.url())),
        );
        assert!(matches!(api.fetch_stats().await, Err(ApiError::Api(_, _))));
    }

    #[tokio::test]
    async fn not_found_is_api_error() {
        let server = mockito::Server::new_async().await;
        let api = StatsApi::new(
            DataSource::Url(format!("{}/missing.json", server.url())),
            DataSource::Url(format!("{}/missing.json", server.url())),
        );
        assert!(matches!(api.fetch_roster().await, Err(ApiError::Api(_, _))));
    }
}
