/// Playoff bracket assembly: resolves each series against the team registry
/// and the league's win threshold into a display-ready bracket.
use crate::color;
use crate::{PlayoffsRound, PlayoffsSeries, TBD_TEAM_ID, TeamRegistry, TransformError};
use std::collections::HashMap;

pub const FALLBACK_ABBR: &str = "TEST";
pub const AWAY_FALLBACK_NAME: &str = "Away Team";
pub const HOME_FALLBACK_NAME: &str = "Home Team";
pub const AWAY_FALLBACK_COLOR: &str = "#DDD";
pub const HOME_FALLBACK_COLOR: &str = "#BBB";
pub const FINALS_LABEL: &str = "Finals";

// ---------------------------------------------------------------------------
// League rules
// ---------------------------------------------------------------------------

/// Which team name a league shows in the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingMode {
    /// Club leagues: "Toronto Stars".
    FullName,
    /// International leagues: "Canada" rather than the federation's full name.
    Nickname,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueRule {
    /// Wins needed to take a series (first to N).
    pub win_threshold: u32,
    pub naming: NamingMode,
}

/// Per-league series rules, keyed by league key (`"shl"`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueRules {
    rules: HashMap<String, LeagueRule>,
}

impl Default for LeagueRules {
    fn default() -> Self {
        let club = |win_threshold| LeagueRule { win_threshold, naming: NamingMode::FullName };
        let international = |win_threshold| LeagueRule { win_threshold, naming: NamingMode::Nickname };
        Self::empty()
            .with_rule("shl", club(4))
            .with_rule("smjhl", club(4))
            .with_rule("iihf", international(1))
            .with_rule("wjc", international(1))
    }
}

impl LeagueRules {
    pub fn empty() -> Self {
        Self { rules: HashMap::new() }
    }

    pub fn with_rule(mut self, league: impl Into<String>, rule: LeagueRule) -> Self {
        self.rules.insert(league.into(), rule);
        self
    }

    /// Unknown leagues have no threshold to fall back to.
    pub fn get(&self, league: &str) -> Result<&LeagueRule, TransformError> {
        self.rules
            .get(league)
            .ok_or_else(|| TransformError::InvalidArgument(format!("no playoff rules for league `{league}`")))
    }
}

// ---------------------------------------------------------------------------
// Resolved bracket
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamColor {
    pub background: String,
    /// Background is dark, so text on it should be light.
    pub is_dark: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSide {
    /// [`TBD_TEAM_ID`] while the slot is undecided.
    pub id: i32,
    pub abbr: String,
    pub name: String,
    pub wins: u32,
    pub color: TeamColor,
    pub won: bool,
    pub lost: bool,
}

impl SeriesSide {
    pub fn is_tbd(&self) -> bool {
        self.id == TBD_TEAM_ID
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSeries {
    pub away: SeriesSide,
    pub home: SeriesSide,
}

impl ResolvedSeries {
    pub fn winner(&self) -> Option<&SeriesSide> {
        [&self.away, &self.home].into_iter().find(|s| s.won)
    }

    pub fn is_decided(&self) -> bool {
        self.winner().is_some()
    }

    /// One-line state of the series: `"TOR wins 4-2"`, `"TOR leads 3-2"`, `"Tied 2-2"`.
    /// A feed where both sides reached the threshold reads as tied.
    pub fn summary(&self) -> String {
        if self.away.won && self.home.won {
            return format!("Tied {}-{}", self.away.wins, self.home.wins);
        }
        let (ahead, behind) = if self.home.won || (!self.away.won && self.home.wins > self.away.wins) {
            (&self.home, &self.away)
        } else {
            (&self.away, &self.home)
        };
        if ahead.won {
            format!("{} wins {}-{}", ahead.abbr, ahead.wins, behind.wins)
        } else if ahead.wins == behind.wins {
            format!("Tied {}-{}", ahead.wins, behind.wins)
        } else {
            format!("{} leads {}-{}", ahead.abbr, ahead.wins, behind.wins)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRound {
    pub label: String,
    pub series: Vec<ResolvedSeries>,
}

/// A labelled round before series resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketRound<'a> {
    /// 1-based among non-final rounds; `None` for the Finals.
    pub number: Option<usize>,
    pub series: &'a [PlayoffsSeries],
}

impl BracketRound<'_> {
    pub fn label(&self) -> String {
        match self.number {
            Some(n) => format!("Round {n}"),
            None => FINALS_LABEL.to_string(),
        }
    }
}

/// Label rounds in input order: a one-series round is the Finals, every other
/// round is numbered from 1 among the non-final rounds.
pub fn assemble_bracket(rounds: &[PlayoffsRound]) -> Vec<BracketRound<'_>> {
    let mut number = 0;
    rounds
        .iter()
        .map(|round| {
            if round.is_final() {
                BracketRound { number: None, series: &round.series }
            } else {
                number += 1;
                BracketRound { number: Some(number), series: &round.series }
            }
        })
        .collect()
}

/// Resolve one series for display.
///
/// A side has won when its wins equal the league threshold exactly. The other
/// side is then marked lost; a side that has itself won is never marked lost.
pub fn resolve_series(
    series: &PlayoffsSeries,
    league: &str,
    rules: &LeagueRules,
    teams: &TeamRegistry,
) -> Result<ResolvedSeries, TransformError> {
    let rule = rules.get(league)?;
    Ok(resolve_with_rule(series, rule, teams))
}

/// Resolve every round of a bracket. Fails only on an unknown league.
pub fn resolved_bracket(
    rounds: &[PlayoffsRound],
    league: &str,
    rules: &LeagueRules,
    teams: &TeamRegistry,
) -> Result<Vec<ResolvedRound>, TransformError> {
    let rule = rules.get(league)?;
    Ok(assemble_bracket(rounds)
        .into_iter()
        .map(|round| ResolvedRound {
            label: round.label(),
            series: round
                .series
                .iter()
                .map(|s| resolve_with_rule(s, rule, teams))
                .collect(),
        })
        .collect())
}

struct SideInput<'a> {
    id: i32,
    abbr: Option<&'a str>,
    name: Option<&'a str>,
    nickname: Option<&'a str>,
    wins: Option<u32>,
    fallback_name: &'static str,
    fallback_color: &'static str,
}

fn resolve_with_rule(series: &PlayoffsSeries, rule: &LeagueRule, teams: &TeamRegistry) -> ResolvedSeries {
    let mut away = resolve_side(
        SideInput {
            id: series.team1,
            abbr: series.team1_abbr.as_deref(),
            name: series.team1_name.as_deref(),
            nickname: series.team1_nickname.as_deref(),
            wins: series.team1_wins,
            fallback_name: AWAY_FALLBACK_NAME,
            fallback_color: AWAY_FALLBACK_COLOR,
        },
        rule,
        teams,
    );
    let mut home = resolve_side(
        SideInput {
            id: series.team2,
            abbr: series.team2_abbr.as_deref(),
            name: series.team2_name.as_deref(),
            nickname: series.team2_nickname.as_deref(),
            wins: series.team2_wins,
            fallback_name: HOME_FALLBACK_NAME,
            fallback_color: HOME_FALLBACK_COLOR,
        },
        rule,
        teams,
    );

    // Exact equality: a count past the threshold is not treated as a win.
    away.won = away.wins == rule.win_threshold;
    home.won = home.wins == rule.win_threshold;
    away.lost = home.won && !away.won;
    home.lost = away.won && !home.won;

    ResolvedSeries { away, home }
}

fn resolve_side(input: SideInput<'_>, rule: &LeagueRule, teams: &TeamRegistry) -> SeriesSide {
    let id = if input.id >= 0 { input.id } else { TBD_TEAM_ID };

    let name = match rule.naming {
        NamingMode::Nickname => non_empty(input.nickname),
        NamingMode::FullName => non_empty(input.name),
    }
    .unwrap_or(input.fallback_name);

    // Registry lookup uses the raw id so a TBD slot never picks up a team color.
    let background = teams
        .get(input.id)
        .filter(|_| input.id >= 0)
        .and_then(|t| t.primary_color.as_deref())
        .filter(|c| !c.is_empty())
        .unwrap_or(input.fallback_color);

    SeriesSide {
        id,
        abbr: non_empty(input.abbr).unwrap_or(FALLBACK_ABBR).to_string(),
        name: name.to_string(),
        wins: input.wins.unwrap_or(0),
        color: TeamColor {
            background: background.to_string(),
            is_dark: color::is_dark(background),
        },
        won: false,
        lost: false,
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Team;

    fn series(team1: i32, wins1: u32, team2: i32, wins2: u32) -> PlayoffsSeries {
        PlayoffsSeries {
            team1,
            team2,
            team1_wins: Some(wins1),
            team2_wins: Some(wins2),
            ..Default::default()
        }
    }

    fn registry() -> TeamRegistry {
        TeamRegistry::new(vec![
            Team {
                id: 5,
                name: "Toronto Stars".into(),
                abbreviation: "TOR".into(),
                primary_color: Some("#002D62".into()),
                ..Default::default()
            },
            Team {
                id: 9,
                name: "Buffalo Stampede".into(),
                abbreviation: "BUF".into(),
                primary_color: Some("#FFC72C".into()),
                ..Default::default()
            },
        ])
    }

    fn resolve(s: &PlayoffsSeries, league: &str) -> ResolvedSeries {
        resolve_series(s, league, &LeagueRules::default(), &registry()).unwrap()
    }

    #[test]
    fn shl_series_with_four_wins_is_decided() {
        let r = resolve(&series(5, 4, 9, 2), "shl");
        assert!(r.away.won);
        assert!(!r.away.lost);
        assert!(r.home.lost);
        assert!(!r.home.won);
    }

    #[test]
    fn iihf_single_win_decides_immediately() {
        let r = resolve(&series(5, 1, 9, 0), "iihf");
        assert!(r.away.won);
        assert!(r.home.lost);
    }

    #[test]
    fn undecided_series_marks_nobody_lost() {
        let r = resolve(&series(5, 3, 9, 3), "smjhl");
        assert!(!r.away.lost && !r.home.lost);
        assert!(!r.is_decided());
    }

    #[test]
    fn home_side_can_win() {
        let r = resolve(&series(5, 2, 9, 4), "shl");
        assert!(r.home.won);
        assert!(r.away.lost);
        assert_eq!(r.winner().map(|s| s.id), Some(9));
    }

    #[test]
    fn wins_past_threshold_do_not_count() {
        let r = resolve(&series(5, 5, 9, 1), "shl");
        assert!(!r.away.won);
        assert!(!r.home.lost);
    }

    #[test]
    fn both_sides_at_threshold_are_never_marked_lost() {
        let r = resolve(&series(5, 4, 9, 4), "shl");
        assert!(r.away.won && r.home.won);
        assert!(!r.away.lost && !r.home.lost);
        assert!(r.is_decided());
        assert_eq!(r.summary(), "Tied 4-4");
    }

    #[test]
    fn unknown_league_is_rejected() {
        let err = resolve_series(&series(5, 0, 9, 0), "vhl", &LeagueRules::default(), &registry());
        assert!(matches!(err, Err(TransformError::InvalidArgument(_))));
    }

    #[test]
    fn custom_rules_support_hypothetical_leagues() {
        let rules = LeagueRules::empty().with_rule(
            "bo3",
            LeagueRule { win_threshold: 2, naming: NamingMode::FullName },
        );
        let r = resolve_series(&series(5, 2, 9, 1), "bo3", &rules, &registry()).unwrap();
        assert!(r.away.won);
        assert!(resolve_series(&series(5, 2, 9, 1), "shl", &rules, &registry()).is_err());
    }

    #[test]
    fn missing_data_falls_back() {
        let r = resolve_series(
            &PlayoffsSeries { team1: -3, team2: 42, ..Default::default() },
            "shl",
            &LeagueRules::default(),
            &TeamRegistry::default(),
        )
        .unwrap();
        assert_eq!(r.away.id, TBD_TEAM_ID);
        assert!(r.away.is_tbd());
        assert_eq!(r.away.abbr, FALLBACK_ABBR);
        assert_eq!(r.away.name, AWAY_FALLBACK_NAME);
        assert_eq!(r.away.wins, 0);
        assert_eq!(r.away.color.background, AWAY_FALLBACK_COLOR);
        assert_eq!(r.home.id, 42);
        assert_eq!(r.home.name, HOME_FALLBACK_NAME);
        assert_eq!(r.home.color.background, HOME_FALLBACK_COLOR);
        assert!(!r.home.color.is_dark);
    }

    #[test]
    fn registry_colors_drive_contrast() {
        let r = resolve(&series(5, 0, 9, 0), "shl");
        assert_eq!(r.away.color.background, "#002D62");
        assert!(r.away.color.is_dark);
        assert_eq!(r.home.color.background, "#FFC72C");
        assert!(!r.home.color.is_dark);
    }

    #[test]
    fn naming_mode_follows_league() {
        let s = PlayoffsSeries {
            team1: 5,
            team2: 9,
            team1_name: Some("Team Canada".into()),
            team1_nickname: Some("Canada".into()),
            team2_name: Some("Team Sweden".into()),
            team2_nickname: None,
            ..Default::default()
        };
        let club = resolve(&s, "shl");
        assert_eq!(club.away.name, "Team Canada");
        let intl = resolve(&s, "wjc");
        assert_eq!(intl.away.name, "Canada");
        assert_eq!(intl.home.name, HOME_FALLBACK_NAME);
    }

    #[test]
    fn empty_strings_fall_back() {
        let s = PlayoffsSeries {
            team1: 5,
            team2: 9,
            team1_abbr: Some(String::new()),
            team1_name: Some(String::new()),
            ..Default::default()
        };
        let r = resolve(&s, "shl");
        assert_eq!(r.away.abbr, FALLBACK_ABBR);
        assert_eq!(r.away.name, AWAY_FALLBACK_NAME);
    }

    #[test]
    fn rounds_are_numbered_until_finals() {
        let rounds = vec![
            PlayoffsRound { series: vec![series(1, 0, 2, 0); 4] },
            PlayoffsRound { series: vec![series(1, 0, 2, 0); 2] },
            PlayoffsRound { series: vec![series(1, 0, 2, 0)] },
        ];
        let labels: Vec<String> = assemble_bracket(&rounds).iter().map(BracketRound::label).collect();
        assert_eq!(labels, vec!["Round 1", "Round 2", "Finals"]);
    }

    #[test]
    fn resolved_bracket_keeps_round_order() {
        let rounds = vec![
            PlayoffsRound { series: vec![series(5, 4, 9, 1), series(9, 2, 5, 3)] },
            PlayoffsRound { series: vec![series(5, 1, 9, 0)] },
        ];
        let bracket = resolved_bracket(&rounds, "shl", &LeagueRules::default(), &registry()).unwrap();
        assert_eq!(bracket.len(), 2);
        assert_eq!(bracket[0].label, "Round 1");
        assert_eq!(bracket[0].series.len(), 2);
        assert!(bracket[0].series[0].away.won);
        assert_eq!(bracket[1].label, FINALS_LABEL);
    }

    #[test]
    fn resolved_bracket_rejects_unknown_league_even_when_empty() {
        let err = resolved_bracket(&[], "ahl", &LeagueRules::default(), &registry());
        assert!(err.is_err());
    }

    #[test]
    fn summaries_describe_series_state() {
        let mut s = series(5, 3, 9, 2);
        s.team1_abbr = Some("TOR".into());
        s.team2_abbr = Some("BUF".into());
        assert_eq!(resolve(&s, "shl").summary(), "TOR leads 3-2");
        s.team2_wins = Some(4);
        assert_eq!(resolve(&s, "shl").summary(), "BUF wins 4-3");
        s.team2_wins = Some(3);
        assert_eq!(resolve(&s, "shl").summary(), "Tied 3-3");
    }
}
