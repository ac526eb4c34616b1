/// Game-day grouping and pagination for the schedule view.
///
/// The schedule is shown as a window of "game days": the distinct dates of the
/// loaded games in chronological order, `page_size` dates per page. Everything
/// here is a pure function of its inputs.
use crate::{Game, SeasonType, TeamRegistry, TransformError};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::{HashMap, HashSet};

/// Parse the calendar date of a game. Accepts `YYYY-MM-DD`, RFC 3339 and
/// `YYYY-MM-DD HH:MM:SS`.
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    date_sort_key(raw).map(|dt| dt.date())
}

fn date_sort_key(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok())
}

/// Stable ascending sort by parsed date. Games whose date does not parse go
/// last, keeping their relative order.
pub fn sort_by_date(games: &[Game]) -> Vec<Game> {
    let mut sorted = games.to_vec();
    sorted.sort_by_cached_key(|g| {
        let key = date_sort_key(&g.date);
        (key.is_none(), key)
    });
    sorted
}

/// Distinct date strings in first-seen order. Chronological when the input
/// came out of [`sort_by_date`].
pub fn collect_distinct_dates(ordered: &[Game]) -> Vec<String> {
    let mut seen = HashSet::new();
    ordered
        .iter()
        .filter(|g| seen.insert(g.date.as_str()))
        .map(|g| g.date.clone())
        .collect()
}

/// Number of selectable pages: `floor(count / page_size)`.
///
/// Dates past the last full page are not reachable through the page selector;
/// the first page still renders a partial window when there are fewer dates
/// than `page_size`.
pub fn total_pages(distinct_dates: usize, page_size: usize) -> Result<usize, TransformError> {
    check_page_size(page_size)?;
    Ok(distinct_dates / page_size)
}

/// The 1-indexed page `[(page-1)*page_size, page*page_size)`.
///
/// Only pages `1..=max(total_pages, 1)` have content: page 0 and pages past
/// [`total_pages`] are empty, and page 1 of a short list holds all of it.
pub fn paginate<T>(dates: &[T], page_size: usize, page: usize) -> Result<&[T], TransformError> {
    let last = total_pages(dates.len(), page_size)?.max(1);
    if page == 0 || page > last {
        return Ok(&[]);
    }
    let first = page - 1;
    let start = first.saturating_mul(page_size).min(dates.len());
    let end = page.saturating_mul(page_size).min(dates.len());
    Ok(&dates[start..end])
}

/// Games played on `date`, in input order.
pub fn group_by_date(games: &[Game], date: &str) -> Vec<Game> {
    games.iter().filter(|g| g.date == date).cloned().collect()
}

pub fn filter_by_team(games: &[Game], team_id: i32) -> Vec<Game> {
    games.iter().filter(|g| g.involves(team_id)).cloned().collect()
}

/// Games of one season type. Games with no type at all are kept, since the
/// schedule endpoint is already queried per type.
pub fn filter_by_season_type(games: &[Game], season_type: SeasonType) -> Vec<Game> {
    games
        .iter()
        .filter(|g| g.season_type.is_empty() || g.season_type == season_type.as_str())
        .cloned()
        .collect()
}

fn check_page_size(page_size: usize) -> Result<(), TransformError> {
    if page_size == 0 {
        return Err(TransformError::InvalidArgument(
            "page size must be positive".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Windowed view
// ---------------------------------------------------------------------------

/// One page of game days ready for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleWindow {
    /// Dates on this page, chronological.
    pub dates: Vec<String>,
    pub games_by_date: HashMap<String, Vec<Game>>,
    pub total_pages: usize,
}

impl ScheduleWindow {
    /// `(date, games)` pairs in page order.
    pub fn game_days(&self) -> impl Iterator<Item = (&str, &[Game])> {
        self.dates.iter().map(|d| {
            let games = self.games_by_date.get(d).map(Vec::as_slice).unwrap_or_default();
            (d.as_str(), games)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

pub fn sorted_grouped_paginated_schedule(
    games: &[Game],
    page_size: usize,
    page: usize,
) -> Result<ScheduleWindow, TransformError> {
    let sorted = sort_by_date(games);
    let distinct = collect_distinct_dates(&sorted);
    let total_pages = total_pages(distinct.len(), page_size)?;
    let dates = paginate(&distinct, page_size, page)?.to_vec();
    let games_by_date = dates
        .iter()
        .map(|d| (d.clone(), group_by_date(&sorted, d)))
        .collect();

    Ok(ScheduleWindow { dates, games_by_date, total_pages })
}

// ---------------------------------------------------------------------------
// Matchup display model
// ---------------------------------------------------------------------------

pub const AWAY_FALLBACK_ABBR: &str = "AYT";
pub const HOME_FALLBACK_ABBR: &str = "HET";
pub const AWAY_FALLBACK_NAME: &str = "Away Team";
pub const HOME_FALLBACK_NAME: &str = "Home Team";

#[derive(Debug, Clone, PartialEq)]
pub struct MatchupSide {
    pub team_id: i32,
    pub abbr: String,
    pub name: String,
    /// `None` until the game is played.
    pub score: Option<u32>,
    pub won: bool,
}

impl MatchupSide {
    /// Score cell for game-day cards: `*` until played.
    pub fn score_label(&self) -> String {
        self.score.map_or_else(|| "*".to_string(), |s| s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Matchup {
    pub away: MatchupSide,
    pub home: MatchupSide,
    pub played: bool,
    /// `(SO)` or `(OT)` for games not decided in regulation.
    pub win_note: Option<&'static str>,
}

impl Matchup {
    /// `"3 - 2 (OT)"`, or `TBD` for unplayed games.
    pub fn result_label(&self) -> String {
        let (Some(away), Some(home)) = (self.away.score, self.home.score) else {
            return "TBD".to_string();
        };
        match self.win_note {
            Some(note) => format!("{away} - {home} {note}"),
            None => format!("{away} - {home}"),
        }
    }

    pub fn winner(&self) -> Option<&MatchupSide> {
        [&self.away, &self.home].into_iter().find(|s| s.won)
    }
}

/// Resolve team names and the result of one game. An unplayed game never has
/// a winner; a played tie is credited to the home side.
pub fn resolve_matchup(game: &Game, teams: &TeamRegistry) -> Matchup {
    let away_won = game.played && game.away_score > game.home_score;
    let home_won = game.played && !away_won;
    let win_note = if !game.played {
        None
    } else if game.shootout {
        Some("(SO)")
    } else if game.overtime {
        Some("(OT)")
    } else {
        None
    };

    Matchup {
        away: matchup_side(
            game.away_team,
            teams,
            game.played.then_some(game.away_score),
            away_won,
            (AWAY_FALLBACK_ABBR, AWAY_FALLBACK_NAME),
        ),
        home: matchup_side(
            game.home_team,
            teams,
            game.played.then_some(game.home_score),
            home_won,
            (HOME_FALLBACK_ABBR, HOME_FALLBACK_NAME),
        ),
        played: game.played,
        win_note,
    }
}

fn matchup_side(
    team_id: i32,
    teams: &TeamRegistry,
    score: Option<u32>,
    won: bool,
    (fallback_abbr, fallback_name): (&str, &str),
) -> MatchupSide {
    let team = teams.get(team_id);
    let abbr = team
        .map(|t| t.abbreviation.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback_abbr);
    let name = team
        .map(|t| t.name.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback_name);
    MatchupSide {
        team_id,
        abbr: abbr.to_string(),
        name: name.to_string(),
        score,
        won,
    }
}
