use crate::app::MenuItem;
use crate::config::DAYS_PER_PAGE_OPTIONS;
use crate::state::loadable::Slot;
use crate::state::messages::Scope;
use shl_api::playoffs::{LeagueRules, ResolvedRound, ResolvedSeries, resolved_bracket};
use shl_api::schedule::{ScheduleWindow, filter_by_season_type, filter_by_team, sorted_grouped_paginated_schedule};
use shl_api::{
    Game, League, Leader, PlayerType, PlayoffsRound, SeasonType, StandingsRow, TeamRegistry,
    TransformError,
};

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct StandingsState {
    pub rows: Slot<Vec<StandingsRow>>,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ScheduleState {
    pub games: Slot<Vec<Game>>,
    pub season_type: SeasonType,
    pub days_per_page: usize,
    /// 1-based.
    pub page: usize,
    pub team_filter: Option<i32>,
    /// Rebuilt whenever one of the inputs above changes; `None` until games load.
    window: Option<Result<ScheduleWindow, TransformError>>,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self::new(DAYS_PER_PAGE_OPTIONS[0])
    }
}

impl ScheduleState {
    pub fn new(days_per_page: usize) -> Self {
        Self {
            games: Slot::default(),
            season_type: SeasonType::default(),
            days_per_page,
            page: 1,
            team_filter: None,
            window: None,
        }
    }

    pub fn window(&self) -> Option<&Result<ScheduleWindow, TransformError>> {
        self.window.as_ref()
    }

    /// Store a schedule response; stale responses are ignored.
    pub fn settle(&mut self, generation: u64, games: Result<Vec<Game>, String>) -> bool {
        if !self.games.settle(generation, games) {
            return false;
        }
        self.page = 1;
        self.rebuild();
        true
    }

    pub fn begin_load(&mut self) -> u64 {
        self.window = None;
        self.games.begin()
    }

    /// Last page reachable with `h`/`l`. A window shorter than one full page
    /// still shows its days on page 1.
    pub fn last_page(&self) -> usize {
        match &self.window {
            Some(Ok(window)) => window.total_pages.max(1),
            _ => 1,
        }
    }

    pub fn next_page(&mut self) {
        if self.page < self.last_page() {
            self.page += 1;
            self.rebuild();
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.rebuild();
        }
    }

    pub fn cycle_days_per_page(&mut self) {
        let idx = DAYS_PER_PAGE_OPTIONS
            .iter()
            .position(|&d| d == self.days_per_page)
            .map_or(0, |i| (i + 1) % DAYS_PER_PAGE_OPTIONS.len());
        self.days_per_page = DAYS_PER_PAGE_OPTIONS[idx];
        self.page = 1;
        self.rebuild();
    }

    /// Advance the team filter through `teams` in registry order, then back to
    /// all games.
    pub fn cycle_team_filter(&mut self, teams: &TeamRegistry) {
        let ids: Vec<i32> = teams.teams().iter().map(|t| t.id).collect();
        self.team_filter = match self.team_filter {
            None => ids.first().copied(),
            Some(current) => ids
                .iter()
                .position(|&id| id == current)
                .and_then(|i| ids.get(i + 1))
                .copied(),
        };
        self.page = 1;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let Some(games) = self.games.ready() else {
            self.window = None;
            return;
        };
        let mut visible = filter_by_season_type(games, self.season_type);
        if let Some(team_id) = self.team_filter {
            visible = filter_by_team(&visible, team_id);
        }
        self.window = Some(sorted_grouped_paginated_schedule(
            &visible,
            self.days_per_page,
            self.page,
        ));
    }
}

// ---------------------------------------------------------------------------
// Playoffs
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PlayoffsState {
    pub rounds: Slot<Vec<PlayoffsRound>>,
    pub rules: LeagueRules,
    bracket: Option<Result<Vec<ResolvedRound>, TransformError>>,
    pub selected_round: usize,
    pub selected_series: usize,
}

impl PlayoffsState {
    pub fn bracket(&self) -> Option<&Result<Vec<ResolvedRound>, TransformError>> {
        self.bracket.as_ref()
    }

    pub fn begin_load(&mut self) -> u64 {
        self.bracket = None;
        self.rounds.begin()
    }

    /// Resolve the bracket once both the rounds and the team registry are in.
    pub fn rebuild(&mut self, league: League, teams: Option<&TeamRegistry>) {
        self.bracket = match (self.rounds.ready(), teams) {
            (Some(rounds), Some(teams)) => {
                Some(resolved_bracket(rounds, league.key(), &self.rules, teams))
            }
            _ => None,
        };
        self.clamp_selection();
    }

    pub fn selected(&self) -> Option<&ResolvedSeries> {
        let rounds = self.bracket.as_ref()?.as_ref().ok()?;
        rounds.get(self.selected_round)?.series.get(self.selected_series)
    }

    pub fn next_round(&mut self) {
        if self.selected_round + 1 < self.round_count() {
            self.selected_round += 1;
            self.clamp_selection();
        }
    }

    pub fn prev_round(&mut self) {
        if self.selected_round > 0 {
            self.selected_round -= 1;
            self.clamp_selection();
        }
    }

    pub fn series_down(&mut self) {
        if self.selected_series + 1 < self.series_count() {
            self.selected_series += 1;
        }
    }

    pub fn series_up(&mut self) {
        self.selected_series = self.selected_series.saturating_sub(1);
    }

    fn resolved(&self) -> &[ResolvedRound] {
        match &self.bracket {
            Some(Ok(rounds)) => rounds,
            _ => &[],
        }
    }

    fn round_count(&self) -> usize {
        self.resolved().len()
    }

    fn series_count(&self) -> usize {
        self.resolved()
            .get(self.selected_round)
            .map_or(0, |r| r.series.len())
    }

    fn clamp_selection(&mut self) {
        self.selected_round = self.selected_round.min(self.round_count().saturating_sub(1));
        self.selected_series = self.selected_series.min(self.series_count().saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Leaders
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LeadersState {
    pub leaders: Slot<Vec<Leader>>,
    pub player_type: PlayerType,
    pub season_type: SeasonType,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub league: League,
    pub season: Option<u32>,
    pub teams: Slot<TeamRegistry>,
    pub standings: StandingsState,
    pub schedule: ScheduleState,
    pub playoffs: PlayoffsState,
    pub leaders: LeadersState,
}

impl AppState {
    pub fn new(league: League, season: Option<u32>, days_per_page: usize) -> Self {
        Self {
            league,
            season,
            schedule: ScheduleState::new(days_per_page),
            ..Self::default()
        }
    }

    pub fn scope(&self) -> Scope {
        Scope { league: self.league, season: self.season }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shl_api::{PlayoffsSeries, Team};

    fn game(date: &str, away: i32, home: i32) -> Game {
        Game {
            date: date.into(),
            away_team: away,
            home_team: home,
            season_type: "Regular Season".into(),
            ..Default::default()
        }
    }

    fn nine_days() -> Vec<Game> {
        (1..=9).map(|d| game(&format!("2022-01-0{d}"), 1, 2)).collect()
    }

    fn registry() -> TeamRegistry {
        TeamRegistry::new(vec![
            Team { id: 1, abbreviation: "TOR".into(), ..Default::default() },
            Team { id: 2, abbreviation: "BUF".into(), ..Default::default() },
        ])
    }

    fn loaded_schedule(games: Vec<Game>) -> ScheduleState {
        let mut schedule = ScheduleState::new(4);
        let generation = schedule.begin_load();
        assert!(schedule.settle(generation, Ok(games)));
        schedule
    }

    #[test]
    fn window_waits_for_games() {
        let mut schedule = ScheduleState::new(4);
        schedule.begin_load();
        assert!(schedule.window().is_none());
    }

    #[test]
    fn paging_is_bounded_by_total_pages() {
        let mut schedule = loaded_schedule(nine_days());
        assert_eq!(schedule.last_page(), 2);

        schedule.next_page();
        schedule.next_page();
        assert_eq!(schedule.page, 2);
        let window = schedule.window().and_then(|w| w.as_ref().ok()).expect("window");
        assert_eq!(window.dates.first().map(String::as_str), Some("2022-01-05"));

        schedule.prev_page();
        schedule.prev_page();
        assert_eq!(schedule.page, 1);
    }

    #[test]
    fn short_schedule_still_has_one_page() {
        let schedule = loaded_schedule(nine_days().into_iter().take(3).collect());
        assert_eq!(schedule.last_page(), 1);
        let window = schedule.window().and_then(|w| w.as_ref().ok()).expect("window");
        assert_eq!(window.dates.len(), 3);
    }

    #[test]
    fn days_per_page_cycles_and_resets_page() {
        let mut schedule = loaded_schedule(nine_days());
        schedule.next_page();
        schedule.cycle_days_per_page();
        assert_eq!((schedule.days_per_page, schedule.page), (8, 1));
        schedule.cycle_days_per_page();
        assert_eq!(schedule.days_per_page, 16);
        schedule.cycle_days_per_page();
        assert_eq!(schedule.days_per_page, 4);
    }

    #[test]
    fn team_filter_cycles_through_registry_then_all() {
        let mut games = nine_days();
        games.push(game("2022-02-01", 3, 4));
        let mut schedule = loaded_schedule(games);
        let teams = registry();

        schedule.cycle_team_filter(&teams);
        assert_eq!(schedule.team_filter, Some(1));
        let window = schedule.window().and_then(|w| w.as_ref().ok()).expect("window");
        assert!(window.game_days().all(|(_, games)| games.iter().all(|g| g.involves(1))));

        schedule.cycle_team_filter(&teams);
        assert_eq!(schedule.team_filter, Some(2));
        schedule.cycle_team_filter(&teams);
        assert_eq!(schedule.team_filter, None);
    }

    #[test]
    fn stale_schedule_response_keeps_newer_games() {
        let mut schedule = ScheduleState::new(4);
        let old = schedule.begin_load();
        let new = schedule.begin_load();
        assert!(schedule.settle(new, Ok(nine_days())));
        assert!(!schedule.settle(old, Ok(Vec::new())));
        assert_eq!(schedule.games.ready().map(Vec::len), Some(9));
    }

    fn two_round_bracket() -> Vec<PlayoffsRound> {
        let series = |a, b, wa, wb| PlayoffsSeries {
            team1: a,
            team2: b,
            team1_wins: Some(wa),
            team2_wins: Some(wb),
            ..Default::default()
        };
        vec![
            PlayoffsRound { series: vec![series(1, 2, 4, 1), series(3, 4, 2, 4)] },
            PlayoffsRound { series: vec![series(1, 4, 1, 1)] },
        ]
    }

    #[test]
    fn bracket_waits_for_teams() {
        let mut playoffs = PlayoffsState::default();
        let generation = playoffs.begin_load();
        playoffs.rounds.settle(generation, Ok(two_round_bracket()));

        playoffs.rebuild(League::Shl, None);
        assert!(playoffs.bracket().is_none());

        playoffs.rebuild(League::Shl, Some(&registry()));
        let rounds = playoffs.bracket().and_then(|b| b.as_ref().ok()).expect("bracket");
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[1].label, "Finals");
    }

    #[test]
    fn selection_stays_inside_bracket() {
        let mut playoffs = PlayoffsState::default();
        let generation = playoffs.begin_load();
        playoffs.rounds.settle(generation, Ok(two_round_bracket()));
        playoffs.rebuild(League::Shl, Some(&registry()));

        playoffs.series_down();
        playoffs.series_down();
        assert_eq!(playoffs.selected_series, 1);

        playoffs.next_round();
        assert_eq!((playoffs.selected_round, playoffs.selected_series), (1, 0));
        playoffs.next_round();
        assert_eq!(playoffs.selected_round, 1);

        let selected = playoffs.selected().expect("selected series");
        assert_eq!((selected.away.id, selected.home.id), (1, 4));
    }
}
