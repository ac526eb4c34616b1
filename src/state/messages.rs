use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use shl_api::{Game, League, Leader, PlayerType, PlayoffsRound, SeasonType, StandingsRow, Team};

/// League and season every request is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub league: League,
    pub season: Option<u32>,
}

/// Every load carries the generation of the slot it fills, see
/// [`crate::state::loadable::Slot`].
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkRequest {
    LoadTeams { scope: Scope, generation: u64 },
    LoadStandings { scope: Scope, generation: u64 },
    LoadSchedule { scope: Scope, season_type: SeasonType, generation: u64 },
    LoadPlayoffs { scope: Scope, generation: u64 },
    LoadLeaders { scope: Scope, player_type: PlayerType, season_type: SeasonType, generation: u64 },
}

/// Error text of a failed fetch, ready for display.
pub type Fetched<T> = Result<T, String>;

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    TeamsLoaded { generation: u64, teams: Fetched<Vec<Team>> },
    StandingsLoaded { generation: u64, rows: Fetched<Vec<StandingsRow>> },
    ScheduleLoaded { generation: u64, games: Fetched<Vec<Game>> },
    PlayoffsLoaded { generation: u64, rounds: Fetched<Vec<PlayoffsRound>> },
    LeadersLoaded { generation: u64, leaders: Fetched<Vec<Leader>> },
}

impl NetworkResponse {
    pub fn error(&self) -> Option<&str> {
        let err = match self {
            NetworkResponse::LoadingStateChanged { .. } => return None,
            NetworkResponse::TeamsLoaded { teams, .. } => teams.as_ref().err(),
            NetworkResponse::StandingsLoaded { rows, .. } => rows.as_ref().err(),
            NetworkResponse::ScheduleLoaded { games, .. } => games.as_ref().err(),
            NetworkResponse::PlayoffsLoaded { rounds, .. } => rounds.as_ref().err(),
            NetworkResponse::LeadersLoaded { leaders, .. } => leaders.as_ref().err(),
        };
        err.map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
