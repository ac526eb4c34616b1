pub mod client;
pub mod color;
pub mod playoffs;
pub mod schedule;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Failure of a display transformation. Missing team data is never an error;
/// only arguments the transformation cannot work with are rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the index API wire format
// ---------------------------------------------------------------------------

/// The leagues served by the index. The API addresses them by position in
/// [`League::ALL`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    #[default]
    Shl,
    Smjhl,
    Iihf,
    Wjc,
}

impl League {
    pub const ALL: [League; 4] = [League::Shl, League::Smjhl, League::Iihf, League::Wjc];

    /// Lowercase key used in routes and in [`playoffs::LeagueRules`].
    pub fn key(&self) -> &'static str {
        match self {
            League::Shl => "shl",
            League::Smjhl => "smjhl",
            League::Iihf => "iihf",
            League::Wjc => "wjc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            League::Shl => "SHL",
            League::Smjhl => "SMJHL",
            League::Iihf => "IIHF",
            League::Wjc => "WJC",
        }
    }

    pub fn api_id(&self) -> u8 {
        match self {
            League::Shl => 0,
            League::Smjhl => 1,
            League::Iihf => 2,
            League::Wjc => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            League::Shl => League::Smjhl,
            League::Smjhl => League::Iihf,
            League::Iihf => League::Wjc,
            League::Wjc => League::Shl,
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for League {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        League::ALL
            .into_iter()
            .find(|l| l.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TransformError::InvalidArgument(format!("unknown league `{s}`")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonType {
    PreSeason,
    #[default]
    RegularSeason,
    Playoffs,
}

impl SeasonType {
    /// The exact string the API uses in the `type` query parameter and field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonType::PreSeason => "Pre-Season",
            SeasonType::RegularSeason => "Regular Season",
            SeasonType::Playoffs => "Playoffs",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SeasonType::PreSeason => SeasonType::RegularSeason,
            SeasonType::RegularSeason => SeasonType::Playoffs,
            SeasonType::Playoffs => SeasonType::PreSeason,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub id: i32,
    pub name: String,         // "Toronto Stars"
    pub nickname: String,     // "Stars"
    pub abbreviation: String, // "TOR"
    pub location: String,
    pub primary_color: Option<String>, // hex color from the index
}

/// Team lookup by id. Built once per loaded team list and passed explicitly
/// into the transformations that need it.
#[derive(Debug, Clone, Default)]
pub struct TeamRegistry {
    teams: Vec<Team>,
    by_id: HashMap<i32, usize>,
}

impl TeamRegistry {
    pub fn new(teams: Vec<Team>) -> Self {
        let by_id = teams.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        Self { teams, by_id }
    }

    pub fn get(&self, id: i32) -> Option<&Team> {
        self.by_id.get(&id).map(|&i| &self.teams[i])
    }

    /// Teams in the order the API returned them.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub slug: Option<String>,
    pub season: Option<u32>,
    pub date: String,
    pub away_team: i32,
    pub home_team: i32,
    pub away_score: u32, // placeholder unless `played`
    pub home_score: u32,
    pub played: bool,
    pub overtime: bool,
    pub shootout: bool,
    pub season_type: String, // "Pre-Season" | "Regular Season" | "Playoffs"
}

impl Game {
    pub fn involves(&self, team_id: i32) -> bool {
        self.away_team == team_id || self.home_team == team_id
    }
}

/// Sentinel id for a bracket slot whose team is not decided yet.
pub const TBD_TEAM_ID: i32 = -1;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayoffsSeries {
    pub team1: i32, // away side; negative = TBD
    pub team2: i32, // home side; negative = TBD
    pub team1_wins: Option<u32>,
    pub team2_wins: Option<u32>,
    pub team1_abbr: Option<String>,
    pub team2_abbr: Option<String>,
    pub team1_name: Option<String>,
    pub team2_name: Option<String>,
    pub team1_nickname: Option<String>,
    pub team2_nickname: Option<String>,
}

impl Default for PlayoffsSeries {
    fn default() -> Self {
        Self {
            team1: TBD_TEAM_ID,
            team2: TBD_TEAM_ID,
            team1_wins: None,
            team2_wins: None,
            team1_abbr: None,
            team2_abbr: None,
            team1_name: None,
            team2_name: None,
            team1_nickname: None,
            team2_nickname: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayoffsRound {
    pub series: Vec<PlayoffsSeries>,
}

impl PlayoffsRound {
    pub fn is_final(&self) -> bool {
        self.series.len() == 1
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandingsRow {
    pub team_id: i32,
    pub name: String,
    pub abbreviation: String,
    pub position: Option<u32>,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub overtime_losses: u32,
    pub shootout_losses: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl StandingsRow {
    pub fn goal_differential(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlayerType {
    #[default]
    Skater,
    Goalie,
}

impl PlayerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerType::Skater => "skater",
            PlayerType::Goalie => "goalie",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            PlayerType::Skater => PlayerType::Goalie,
            PlayerType::Goalie => PlayerType::Skater,
        }
    }

    /// The leaderboard shown by default for this player type.
    pub fn default_stat(&self) -> LeaderStat {
        match self {
            PlayerType::Skater => LeaderStat { id: "points", label: "Points" },
            PlayerType::Goalie => LeaderStat { id: "wins", label: "Wins" },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderStat {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leader {
    pub player_id: i32,
    pub name: String,
    pub season: Option<u32>,
    pub team_id: Option<i32>,
    pub team_name: String,
    pub team_abbr: String,
    pub value: f64,
}

impl Leader {
    /// Counting stats render as integers, rate stats (GAA, SV%) keep decimals.
    pub fn value_label(&self) -> String {
        if self.value.fract() == 0.0 {
            format!("{}", self.value as i64)
        } else {
            format!("{:.3}", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn league_api_ids_follow_canonical_order() {
        let ids: Vec<u8> = League::ALL.iter().map(League::api_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn league_parses_case_insensitively() {
        assert_eq!("SMJHL".parse::<League>(), Ok(League::Smjhl));
        assert_eq!(" wjc ".parse::<League>(), Ok(League::Wjc));
    }

    #[test]
    fn unknown_league_is_invalid_argument() {
        assert!(matches!(
            "vhl".parse::<League>(),
            Err(TransformError::InvalidArgument(_))
        ));
    }

    #[test]
    fn league_cycle_wraps() {
        assert_eq!(League::Wjc.next(), League::Shl);
        assert_eq!(League::Shl.next(), League::Smjhl);
    }

    #[test]
    fn season_type_strings_match_api() {
        assert_eq!(SeasonType::PreSeason.as_str(), "Pre-Season");
        assert_eq!(SeasonType::default().as_str(), "Regular Season");
        assert_eq!(SeasonType::Playoffs.next(), SeasonType::PreSeason);
    }

    #[test]
    fn registry_lookup_by_id() {
        let registry = TeamRegistry::new(vec![
            Team { id: 5, abbreviation: "TOR".into(), ..Default::default() },
            Team { id: 9, abbreviation: "BUF".into(), ..Default::default() },
        ]);
        assert_eq!(registry.get(9).map(|t| t.abbreviation.as_str()), Some("BUF"));
        assert!(registry.get(1).is_none());
        assert_eq!(registry.teams().len(), 2);
    }

    #[test]
    fn leader_value_label_formats_rates_and_counts() {
        let mut leader = Leader { value: 87.0, ..Default::default() };
        assert_eq!(leader.value_label(), "87");
        leader.value = 2.4567;
        assert_eq!(leader.value_label(), "2.457");
    }

    #[test]
    fn default_series_slots_are_tbd() {
        let series = PlayoffsSeries::default();
        assert_eq!(series.team1, TBD_TEAM_ID);
        assert_eq!(series.team2, TBD_TEAM_ID);
    }
}
