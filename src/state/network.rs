use crate::state::messages::{Document, NetworkRequest, NetworkResponse};
use log::{debug, error, info};
use nba_api::client::{ApiError, StatsApi};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: StatsApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: StatsApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let (document, result) = match request {
                NetworkRequest::LoadStats => (Document::Stats, self.handle_load_stats().await),
                NetworkRequest::LoadRoster => (Document::Roster, self.handle_load_roster().await),
            };

            debug!("{document} request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| {
                error!("failed to load {document}: {err}");
                NetworkResponse::Error { document, message: err.to_string() }
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_stats(&self) -> Result<NetworkResponse, ApiError> {
        debug!("loading stats from {}", self.client.stats_source());
        let sheet = self.client.fetch_stats().await?;
        info!("loaded {} player stat lines", sheet.players.len());
        Ok(NetworkResponse::StatsLoaded { sheet })
    }

    async fn handle_load_roster(&self) -> Result<NetworkResponse, ApiError> {
        debug!("loading roster from {}", self.client.roster_source());
        let roster = self.client.fetch_roster().await?;
        info!("loaded {} roster entries", roster.len());
        Ok(NetworkResponse::RosterLoaded { roster })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nba_api::client::DataSource;
    use std::path::PathBuf;

    async fn collect_until_payload(rx: &mut mpsc::Receiver<NetworkResponse>) -> NetworkResponse {
        loop {
            match rx.recv().await.expect("worker should answer") {
                NetworkResponse::LoadingStateChanged { .. } => continue,
                other => return other,
            }
        }
    }

    #[tokio::test]
    async fn failed_load_reports_which_document() {
        let api = StatsApi::new(
            DataSource::File(PathBuf::from("/nope/stats.json")),
            DataSource::File(PathBuf::from("/nope/roster.json")),
        );
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let worker = tokio::spawn(NetworkWorker::new(api, req_rx, resp_tx).run());

        req_tx.send(NetworkRequest::LoadRoster).await.unwrap();
        match collect_until_payload(&mut resp_rx).await {
            NetworkResponse::Error { document, message } => {
                assert_eq!(document, Document::Roster);
                assert!(message.contains("/nope/roster.json"), "{message}");
            }
            other => panic!("unexpected response: {other:?}"),
        }
        worker.abort();
    }

    #[tokio::test]
    async fn stats_load_yields_sheet() {
        let path = std::env::temp_dir().join(format!("nbatui-worker-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"NAME":"Jalen Brunson","TEAM":"NYK","POS":"PG","PTS":28.1}]"#).unwrap();
        let api = StatsApi::new(DataSource::File(path.clone()), DataSource::File(path.clone()));
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let worker = tokio::spawn(NetworkWorker::new(api, req_rx, resp_tx).run());

        req_tx.send(NetworkRequest::LoadStats).await.unwrap();
        match collect_until_payload(&mut resp_rx).await {
            NetworkResponse::StatsLoaded { sheet } => {
                assert_eq!(sheet.players.len(), 1);
                assert_eq!(sheet.players[0].points, Some(28.1));
            }
            other => panic!("unexpected response: {other:?}"),
        }
        worker.abort();
        let _ = std::fs::remove_file(path);
    }
}
