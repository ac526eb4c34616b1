use crate::wire::{ApiGame, ApiLeader, ApiSeries, ApiStandingsRow, ApiTeam};
use crate::{
    Game, League, Leader, PlayerType, PlayoffsRound, PlayoffsSeries, SeasonType, StandingsRow,
    TBD_TEAM_ID, Team,
};
use log::debug;
use reqwest::Client;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_ENDPOINT: &str = "https://index.simulationhockey.com";

/// Client for the index's public `/api/v1` endpoints.
#[derive(Debug, Clone)]
pub struct IndexApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for IndexApi {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_ENDPOINT)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error for {1}: {0}")]
    Network(#[source] reqwest::Error, String),
    #[error("API error for {1}: {0}")]
    Api(#[source] reqwest::Error, String),
    #[error("Parse error for {1}: {0}")]
    Parsing(#[source] reqwest::Error, String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl IndexApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another deployment of the index (or a test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("shltui/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Team registry for a league: names, abbreviations and colors.
    pub async fn fetch_teams(&self, league: League, season: Option<u32>) -> ApiResult<Vec<Team>> {
        let url = self.url("/api/v1/teams", league, &[], season);
        let raw: Vec<ApiTeam> = self.get(&url).await?;
        Ok(raw.into_iter().map(map_team).collect())
    }

    pub async fn fetch_schedule(
        &self,
        league: League,
        season_type: SeasonType,
        season: Option<u32>,
    ) -> ApiResult<Vec<Game>> {
        let url = self.url("/api/v1/schedule", league, &[("type", season_type.as_str())], season);
        let raw: Vec<ApiGame> = self.get(&url).await?;
        Ok(raw.into_iter().map(map_game).collect())
    }

    /// Playoff rounds in bracket order, earliest round first.
    pub async fn fetch_playoffs(&self, league: League, season: Option<u32>) -> ApiResult<Vec<PlayoffsRound>> {
        let url = self.url("/api/v1/standings/playoffs", league, &[], season);
        let raw: Vec<Vec<ApiSeries>> = self.get(&url).await?;
        Ok(raw
            .into_iter()
            .map(|round| PlayoffsRound {
                series: round.into_iter().map(map_series).collect(),
            })
            .collect())
    }

    pub async fn fetch_standings(&self, league: League, season: Option<u32>) -> ApiResult<Vec<StandingsRow>> {
        let url = self.url("/api/v1/standings", league, &[], season);
        let raw: Vec<ApiStandingsRow> = self.get(&url).await?;
        Ok(raw.into_iter().map(map_standings_row).collect())
    }

    pub async fn fetch_leaders(
        &self,
        league: League,
        player_type: PlayerType,
        stat: &str,
        season_type: SeasonType,
        season: Option<u32>,
    ) -> ApiResult<Vec<Leader>> {
        if stat.is_empty() {
            return Err(ApiError::InvalidRequest(
                "leaderboard stat must not be empty".into(),
            ));
        }
        let path = format!(
            "/api/v1/leaders/{}/{}",
            player_type.as_str(),
            urlencoding::encode(stat)
        );
        let url = self.url(&path, league, &[("type", season_type.as_str())], season);
        let raw: Vec<ApiLeader> = self.get(&url).await?;
        Ok(raw.into_iter().map(map_leader).collect())
    }

    fn url(&self, path: &str, league: League, params: &[(&str, &str)], season: Option<u32>) -> String {
        let mut url = format!("{}{path}?league={}", self.base_url, league.api_id());
        for (key, value) in params {
            url.push_str(&format!("&{key}={}", urlencoding::encode(value)));
        }
        if let Some(season) = season {
            url.push_str(&format!("&season={season}"));
        }
        url
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                // The index answers 4xx for seasons/leagues it has no data for.
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    debug!("no data at {url}: {e}");
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: index wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_team(t: ApiTeam) -> Team {
    Team {
        id: t.id,
        name: t.name.unwrap_or_default(),
        nickname: t.nickname.unwrap_or_default(),
        abbreviation: t.abbreviation.unwrap_or_default(),
        location: t.location.unwrap_or_default(),
        primary_color: t.colors.and_then(|c| c.primary),
    }
}

fn map_game(g: ApiGame) -> Game {
    Game {
        slug: g.slug,
        season: g.season,
        date: g.date,
        away_team: g.away_team,
        home_team: g.home_team,
        away_score: g.away_score.unwrap_or_default(),
        home_score: g.home_score.unwrap_or_default(),
        played: g.played,
        overtime: g.overtime,
        shootout: g.shootout,
        season_type: g.game_type.unwrap_or_default(),
    }
}

fn map_series(s: ApiSeries) -> PlayoffsSeries {
    PlayoffsSeries {
        team1: s.team1.unwrap_or(TBD_TEAM_ID),
        team2: s.team2.unwrap_or(TBD_TEAM_ID),
        team1_wins: s.team1_wins,
        team2_wins: s.team2_wins,
        team1_abbr: s.team1_abbr,
        team2_abbr: s.team2_abbr,
        team1_name: s.team1_name,
        team2_name: s.team2_name,
        team1_nickname: s.team1_nickname,
        team2_nickname: s.team2_nickname,
    }
}

fn map_standings_row(r: ApiStandingsRow) -> StandingsRow {
    StandingsRow {
        team_id: r.id,
        name: r.name.unwrap_or_default(),
        abbreviation: r.abbreviation.unwrap_or_default(),
        position: r.position,
        games_played: r.gp,
        wins: r.wins,
        losses: r.losses,
        overtime_losses: r.otl,
        shootout_losses: r.sol,
        points: r.points,
        goals_for: r.goals_for,
        goals_against: r.goals_against,
    }
}

fn map_leader(l: ApiLeader) -> Leader {
    let team = l.team.unwrap_or_default();
    Leader {
        player_id: l.id,
        name: l.name.unwrap_or_default(),
        season: l.season,
        team_id: team.id,
        team_name: team.name.unwrap_or_default(),
        team_abbr: team.abbr.unwrap_or_default(),
        value: l.value,
    }
}
