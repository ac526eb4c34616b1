use crate::config::Config;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::{Fetched, NetworkRequest};
use log::{debug, warn};
use shl_api::{Game, Leader, PlayoffsRound, StandingsRow, Team, TeamRegistry};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Standings,
    Schedule,
    Playoffs,
    Leaders,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let settings = AppSettings::load(config);
        log::set_max_level(settings.log_level);
        tui_logger::set_default_level(settings.log_level);

        Self {
            state: AppState::new(config.league, config.season, settings.days_per_page),
            settings,
        }
    }

    // -----------------------------------------------------------------------
    // Load requests
    // -----------------------------------------------------------------------

    /// Mark every view as loading and build the requests that refill them.
    pub fn reload_all(&mut self) -> Vec<NetworkRequest> {
        self.state.last_error = None;
        let scope = self.state.scope();
        vec![
            NetworkRequest::LoadTeams { scope, generation: self.state.teams.begin() },
            NetworkRequest::LoadStandings { scope, generation: self.state.standings.rows.begin() },
            self.reload_schedule(),
            NetworkRequest::LoadPlayoffs { scope, generation: self.state.playoffs.begin_load() },
            self.reload_leaders(),
        ]
    }

    pub fn cycle_league(&mut self) -> Vec<NetworkRequest> {
        self.state.league = self.state.league.next();
        self.state.schedule.team_filter = None;
        self.state.playoffs.selected_round = 0;
        self.state.playoffs.selected_series = 0;
        debug!("switched to {}", self.state.league.label());
        self.reload_all()
    }

    fn reload_schedule(&mut self) -> NetworkRequest {
        NetworkRequest::LoadSchedule {
            scope: self.state.scope(),
            season_type: self.state.schedule.season_type,
            generation: self.state.schedule.begin_load(),
        }
    }

    fn reload_leaders(&mut self) -> NetworkRequest {
        NetworkRequest::LoadLeaders {
            scope: self.state.scope(),
            player_type: self.state.leaders.player_type,
            season_type: self.state.leaders.season_type,
            generation: self.state.leaders.leaders.begin(),
        }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_teams_loaded(&mut self, generation: u64, teams: Fetched<Vec<Team>>) {
        let teams = self.note_error(teams).map(TeamRegistry::new);
        if self.state.teams.settle(generation, teams) {
            self.rebuild_playoffs();
        } else {
            debug!("dropped stale teams response {generation}");
        }
    }

    pub fn on_standings_loaded(&mut self, generation: u64, rows: Fetched<Vec<StandingsRow>>) {
        let rows = self.note_error(rows);
        if self.state.standings.rows.settle(generation, rows) {
            self.state.standings.scroll_offset = 0;
        }
    }

    pub fn on_schedule_loaded(&mut self, generation: u64, games: Fetched<Vec<Game>>) {
        let games = self.note_error(games);
        if !self.state.schedule.settle(generation, games) {
            debug!("dropped stale schedule response {generation}");
        }
    }

    pub fn on_playoffs_loaded(&mut self, generation: u64, rounds: Fetched<Vec<PlayoffsRound>>) {
        let rounds = self.note_error(rounds);
        if self.state.playoffs.rounds.settle(generation, rounds) {
            self.rebuild_playoffs();
        }
    }

    pub fn on_leaders_loaded(&mut self, generation: u64, leaders: Fetched<Vec<Leader>>) {
        let leaders = self.note_error(leaders);
        if self.state.leaders.leaders.settle(generation, leaders) {
            self.state.leaders.scroll_offset = 0;
        }
    }

    fn note_error<T>(&mut self, result: Fetched<T>) -> Fetched<T> {
        if let Err(message) = &result {
            warn!("load failed: {message}");
            self.state.last_error = Some(message.clone());
        }
        result
    }

    fn rebuild_playoffs(&mut self) {
        let league = self.state.league;
        self.state.playoffs.rebuild(league, self.state.teams.ready());
        if let Some(Err(e)) = self.state.playoffs.bracket() {
            self.state.last_error = Some(e.to_string());
        }
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

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Schedule
    // -----------------------------------------------------------------------

    pub fn schedule_cycle_season_type(&mut self) -> NetworkRequest {
        self.state.schedule.season_type = self.state.schedule.season_type.next();
        self.reload_schedule()
    }

    pub fn schedule_next_page(&mut self) {
        self.state.schedule.next_page();
    }

    pub fn schedule_prev_page(&mut self) {
        self.state.schedule.prev_page();
    }

    pub fn schedule_cycle_days(&mut self) {
        self.state.schedule.cycle_days_per_page();
        self.settings.days_per_page = self.state.schedule.days_per_page;
    }

    pub fn schedule_cycle_team(&mut self) {
        if let Some(teams) = self.state.teams.ready() {
            self.state.schedule.cycle_team_filter(teams);
        }
    }

    // -----------------------------------------------------------------------
    // Leaders
    // -----------------------------------------------------------------------

    pub fn leaders_toggle_player_type(&mut self) -> NetworkRequest {
        self.state.leaders.player_type = self.state.leaders.player_type.toggle();
        self.reload_leaders()
    }

    pub fn leaders_cycle_season_type(&mut self) -> NetworkRequest {
        self.state.leaders.season_type = self.state.leaders.season_type.next();
        self.reload_leaders()
    }

    pub fn leaders_scroll_down(&mut self) {
        let max = self
            .state
            .leaders
            .leaders
            .ready()
            .map_or(0, |l| l.len().saturating_sub(1)) as u16;
        self.state.leaders.scroll_offset = (self.state.leaders.scroll_offset + 1).min(max);
    }

    pub fn leaders_scroll_up(&mut self) {
        self.state.leaders.scroll_offset = self.state.leaders.scroll_offset.saturating_sub(1);
    }

    pub fn standings_scroll_down(&mut self) {
        let max = self
            .state
            .standings
            .rows
            .ready()
            .map_or(0, |r| r.len().saturating_sub(1)) as u16;
        self.state.standings.scroll_offset = (self.state.standings.scroll_offset + 1).min(max);
    }

    pub fn standings_scroll_up(&mut self) {
        self.state.standings.scroll_offset = self.state.standings.scroll_offset.saturating_sub(1);
    }
}
