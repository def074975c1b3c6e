/// Wire types for the BallDontLie NBA API (free tier, bearer-token auth).
/// Endpoint: https://api.balldontlie.io/nba/v1
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct BdlPlayersResponse {
    #[serde(default)]
    pub data: Vec<BdlPlayer>,
    pub meta: Option<BdlMeta>,
}

#[derive(Debug, Deserialize, Default)]
pub struct BdlPlayerResponse {
    pub data: Option<BdlPlayer>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BdlPlayer {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Sometimes an empty string rather than absent.
    pub position: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub jersey_number: Option<String>,
    pub college: Option<String>,
    pub country: Option<String>,
    pub draft_year: Option<u32>,
    pub draft_round: Option<u32>,
    pub draft_number: Option<u32>,
    pub team: Option<BdlTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BdlTeam {
    pub id: u64,
    pub full_name: Option<String>,
    pub abbreviation: Option<String>,
    pub city: Option<String>,
    pub conference: Option<String>,
    pub division: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BdlMeta {
    pub current_page: Option<u32>,
    pub next_page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_count: Option<u32>,
}
