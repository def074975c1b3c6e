/// Wire types for ESPN's public NBA endpoints.
///
/// site:   https://site.api.espn.com/apis/site/v2/sports/basketball/nba
/// search: https://site.web.api.espn.com/apis/common/v3/search
/// core:   https://sports.core.api.espn.com/v2/sports/basketball/leagues/nba
///
/// These map to our clean domain types via the functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnEvent {
    pub id: Option<String>,
    pub date: Option<String>, // ISO 8601
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    pub period: Option<u8>,
    pub display_clock: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnStatusType {
    pub state: Option<String>, // "pre" | "in" | "post"
    pub short_detail: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub venue: Option<EspnVenue>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnCompetitor {
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnTeam {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
    /// Scoreboard competitors embed one logo URL directly...
    pub logo: Option<String>,
    /// ...while the teams feed nests a list instead.
    pub logos: Option<Vec<EspnLogo>>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLogo {
    pub href: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnVenue {
    pub full_name: Option<String>,
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NewsResponse {
    pub articles: Option<Vec<EspnArticle>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnArticle {
    pub data_source_identifier: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<EspnImage>>,
    pub published: Option<String>, // ISO 8601
    pub links: Option<EspnArticleLinks>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnImage {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnArticleLinks {
    pub web: Option<EspnWebLink>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnWebLink {
    pub href: Option<String>,
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamsResponse {
    pub sports: Option<Vec<EspnSport>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnSport {
    pub leagues: Option<Vec<EspnLeague>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLeague {
    pub teams: Option<Vec<EspnTeamEntry>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeamEntry {
    pub team: Option<EspnTeam>,
}

// ---------------------------------------------------------------------------
// Player search (common v3)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SearchResponse {
    pub items: Option<Vec<EspnSearchItem>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnSearchItem {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Athlete statistics (core API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StatisticsResponse {
    pub splits: Option<EspnSplits>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnSplits {
    pub categories: Option<Vec<EspnCoreCategory>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCoreCategory {
    pub name: Option<String>,
    pub stats: Option<Vec<EspnCoreStat>>,
}

/// One stat triple. Depending on the category, a field is reachable by
/// `name` or `abbreviation` — the flattening in client.rs carries both.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCoreStat {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub value: Option<f64>,
}

// ---------------------------------------------------------------------------
// Game summary (box score)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryResponse {
    pub boxscore: Option<EspnBoxscore>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBoxscore {
    /// Carries the homeAway tag per team; the players list below does not.
    pub teams: Option<Vec<EspnBoxTeam>>,
    pub players: Option<Vec<EspnTeamPlayers>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnBoxTeam {
    pub team: Option<EspnTeam>,
    pub home_away: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeamPlayers {
    pub team: Option<EspnTeam>,
    pub statistics: Option<Vec<EspnStatGroup>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatGroup {
    /// Column labels, index-aligned with each athlete's `stats` array.
    pub labels: Option<Vec<String>>,
    pub athletes: Option<Vec<EspnAthleteStats>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnAthleteStats {
    pub athlete: Option<EspnAthlete>,
    pub starter: Option<bool>,
    pub did_not_play: Option<bool>,
    pub reason: Option<String>,
    pub stats: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnAthlete {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub short_name: Option<String>,
    pub jersey: Option<String>,
    pub position: Option<EspnPosition>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnPosition {
    pub abbreviation: Option<String>,
}
