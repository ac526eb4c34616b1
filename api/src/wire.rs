/// Index API raw wire types: serde shapes for deserializing `/api/v1` responses.
/// These map to the clean domain types via the `map_*` functions in client.rs.
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Teams  (/api/v1/teams)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiTeam {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub colors: Option<ApiTeamColors>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ApiTeamColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub text: Option<String>,
}

// ---------------------------------------------------------------------------
// Schedule  (/api/v1/schedule)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiGame {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub date: String,
    pub home_team: i32,
    pub away_team: i32,
    /// Null (or 0) until the game is played.
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    /// The index sends these as 0/1 on some endpoints and as booleans on others.
    #[serde(default, deserialize_with = "flag")]
    pub played: bool,
    #[serde(default, deserialize_with = "flag")]
    pub overtime: bool,
    #[serde(default, deserialize_with = "flag")]
    pub shootout: bool,
    #[serde(rename = "type", default)]
    pub game_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Playoffs  (/api/v1/standings/playoffs): array of rounds, each an array of series
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ApiSeries {
    /// Null or negative while the slot is undecided.
    #[serde(default)]
    pub team1: Option<i32>,
    #[serde(default)]
    pub team2: Option<i32>,
    #[serde(rename = "team1Wins", default)]
    pub team1_wins: Option<u32>,
    #[serde(rename = "team2Wins", default)]
    pub team2_wins: Option<u32>,
    #[serde(rename = "team1_Abbr", default)]
    pub team1_abbr: Option<String>,
    #[serde(rename = "team2_Abbr", default)]
    pub team2_abbr: Option<String>,
    #[serde(rename = "team1_Name", default)]
    pub team1_name: Option<String>,
    #[serde(rename = "team2_Name", default)]
    pub team2_name: Option<String>,
    #[serde(rename = "team1_Nickname", default)]
    pub team1_nickname: Option<String>,
    #[serde(rename = "team2_Nickname", default)]
    pub team2_nickname: Option<String>,
}

// ---------------------------------------------------------------------------
// Standings  (/api/v1/standings)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiStandingsRow {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub gp: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(rename = "OTL", default)]
    pub otl: u32,
    #[serde(rename = "SOL", default)]
    pub sol: u32,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub goals_for: u32,
    #[serde(default)]
    pub goals_against: u32,
}

// ---------------------------------------------------------------------------
// Leaders  (/api/v1/leaders/{skater|goalie}/{stat})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ApiLeader {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub team: Option<ApiLeaderTeam>,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ApiLeaderTeam {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub abbr: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Accepts `true`/`false`, `0`/`1`, `"0"`/`"1"` and `null`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<FlagRepr>::deserialize(deserializer)?;
    Ok(match repr {
        None => false,
        Some(FlagRepr::Bool(b)) => b,
        Some(FlagRepr::Int(n)) => n != 0,
        Some(FlagRepr::Text(s)) => matches!(s.trim(), "1" | "true" | "True" | "TRUE"),
    })
}
