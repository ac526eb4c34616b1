use crate::state::messages::{NetworkRequest, NetworkResponse, Scope};
use log::{debug, error};
use shl_api::client::IndexApi;
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
    client: IndexApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: IndexApi,
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

            let response = self.handle(request).await;

            if let Some(message) = response.error() {
                error!("request failed: {message}");
            }
            self.stop_loading_animation(response.error().is_none()).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle(&self, request: NetworkRequest) -> NetworkResponse {
        match request {
            NetworkRequest::LoadTeams { scope: Scope { league, season }, generation } => {
                debug!("loading {league} teams");
                let teams = self.client.fetch_teams(league, season).await;
                NetworkResponse::TeamsLoaded { generation, teams: teams.map_err(|e| e.to_string()) }
            }
            NetworkRequest::LoadStandings { scope: Scope { league, season }, generation } => {
                debug!("loading {league} standings");
                let rows = self.client.fetch_standings(league, season).await;
                NetworkResponse::StandingsLoaded { generation, rows: rows.map_err(|e| e.to_string()) }
            }
            NetworkRequest::LoadSchedule { scope: Scope { league, season }, season_type, generation } => {
                debug!("loading {league} {} schedule", season_type.as_str());
                let games = self.client.fetch_schedule(league, season_type, season).await;
                NetworkResponse::ScheduleLoaded { generation, games: games.map_err(|e| e.to_string()) }
            }
            NetworkRequest::LoadPlayoffs { scope: Scope { league, season }, generation } => {
                debug!("loading {league} playoffs");
                let rounds = self.client.fetch_playoffs(league, season).await;
                NetworkResponse::PlayoffsLoaded { generation, rounds: rounds.map_err(|e| e.to_string()) }
            }
            NetworkRequest::LoadLeaders {
                scope: Scope { league, season },
                player_type,
                season_type,
                generation,
            } => {
                let stat = player_type.default_stat();
                debug!("loading {league} {} leaders by {}", player_type.as_str(), stat.id);
                let leaders = self
                    .client
                    .fetch_leaders(league, player_type, stat.id, season_type, season)
                    .await;
                NetworkResponse::LeadersLoaded { generation, leaders: leaders.map_err(|e| e.to_string()) }
            }
        }
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
