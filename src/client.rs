use crate::bdl::{BdlMeta, BdlPlayer, BdlPlayerResponse, BdlPlayersResponse, BdlTeam};
use crate::espn::{
    EspnArticle, EspnAthleteStats, EspnCompetitor, EspnCoreCategory, EspnEvent, EspnTeam,
    EspnTeamPlayers, NewsResponse, ScoreboardResponse, SearchResponse, StatisticsResponse,
    SummaryResponse, TeamsResponse,
};
use crate::{
    BoxScore, Game, GameStatus, NewsArticle, Player, PlayerBoxLine, PlayerPage, PlayerTeam,
    ScoreboardGather, SearchMeta, SeasonStats, Team, TeamBoxScore, TeamSide,
};
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use log::warn;
use reqwest::{Client, Url};
use std::collections::HashMap;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_SITE: &str = "https://site.api.espn.com/apis/site/v2/sports/basketball/nba";
const ESPN_SEARCH: &str = "https://site.web.api.espn.com/apis/common/v3/search";
const ESPN_CORE: &str = "https://sports.core.api.espn.com/v2/sports/basketball/leagues/nba";
const BDL: &str = "https://api.balldontlie.io/nba/v1";
/// BallDontLie free-tier key bundled with the app; override with NBA_API_BDL_KEY.
const BDL_API_KEY: &str = "f099c5be-289f-4c17-87df-9fe9dbf0d93c";
const NEWS_SOURCE: &str = "ESPN";

/// NBA data client backed by ESPN's public endpoints and BallDontLie.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    timeout: Duration,
    espn_site: String,
    espn_search: String,
    espn_core: String,
    bdl: String,
    bdl_key: String,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("nba-api/0.1 (nba data client)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            espn_site: ESPN_SITE.to_owned(),
            espn_search: ESPN_SEARCH.to_owned(),
            espn_core: ESPN_CORE.to_owned(),
            bdl: BDL.to_owned(),
            bdl_key: std::env::var("NBA_API_BDL_KEY").unwrap_or_else(|_| BDL_API_KEY.to_owned()),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl NbaApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the scoreboard, optionally filtered to one local calendar date.
    /// An absent events collection normalizes to an empty list, not an error.
    pub async fn fetch_scoreboard(&self, date: Option<NaiveDate>) -> ApiResult<Vec<Game>> {
        let url = match date {
            // YYYYMMDD, local calendar date — avoids off-by-one around midnight.
            Some(d) => format!("{}/scoreboard?dates={}", self.espn_site, d.format("%Y%m%d")),
            None => format!("{}/scoreboard", self.espn_site),
        };
        let raw: ScoreboardResponse = self.get(&url).await?;
        let games = raw
            .events
            .unwrap_or_default()
            .iter()
            .map(map_event_to_game)
            .collect();
        Ok(games)
    }

    /// Gather finished games from the past `days_back` days. Each day is an
    /// independent fetch; days that fail are reported in the result instead
    /// of aborting the whole gather. Errors only if every day fails.
    pub async fn fetch_recent_games(&self, days_back: u32) -> ApiResult<ScoreboardGather> {
        let today = chrono::Local::now().date_naive();
        let dates: Vec<NaiveDate> = (1..=u64::from(days_back))
            .filter_map(|i| today.checked_sub_days(Days::new(i)))
            .collect();
        self.gather_scoreboards(&dates, GameStatus::Final).await
    }

    /// Gather scheduled games from today through `days_ahead` days out.
    pub async fn fetch_upcoming_games(&self, days_ahead: u32) -> ApiResult<ScoreboardGather> {
        let today = chrono::Local::now().date_naive();
        let dates: Vec<NaiveDate> = (0..=u64::from(days_ahead))
            .filter_map(|i| today.checked_add_days(Days::new(i)))
            .collect();
        self.gather_scoreboards(&dates, GameStatus::Scheduled).await
    }

    async fn gather_scoreboards(
        &self,
        dates: &[NaiveDate],
        keep: GameStatus,
    ) -> ApiResult<ScoreboardGather> {
        let mut gather = ScoreboardGather::default();
        let mut last_error = None;
        for &date in dates {
            match self.fetch_scoreboard(Some(date)).await {
                Ok(day) => gather.games.extend(day.into_iter().filter(|g| g.status == keep)),
                Err(e) => {
                    warn!("scoreboard fetch failed for {date}: {e}");
                    gather.failed_dates.push(date);
                    last_error = Some(e);
                }
            }
        }
        match last_error {
            Some(e) if gather.failed_dates.len() == dates.len() => Err(e),
            _ => Ok(gather),
        }
    }

    /// Fetch the news feed. Absent articles normalize to an empty list.
    pub async fn fetch_news(&self) -> ApiResult<Vec<NewsArticle>> {
        let url = format!("{}/news", self.espn_site);
        let raw: NewsResponse = self.get(&url).await?;
        Ok(raw.articles.unwrap_or_default().into_iter().map(map_article).collect())
    }

    /// Fetch the league's teams.
    pub async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        let url = format!("{}/teams", self.espn_site);
        let raw: TeamsResponse = self.get(&url).await?;
        let entries = raw
            .sports
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|sport| sport.leagues.unwrap_or_default().into_iter().next())
            .and_then(|league| league.teams)
            .unwrap_or_default();
        Ok(entries.into_iter().filter_map(|e| e.team).map(map_team).collect())
    }

    /// Search players by free-text query against the keyed player source.
    pub async fn search_players(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> ApiResult<PlayerPage> {
        let page = page.to_string();
        let per_page = per_page.to_string();
        let url = Url::parse_with_params(
            &format!("{}/players", self.bdl),
            &[
                ("search", query),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
            ],
        )
        .map_err(|e| ApiError::Other(format!("bad player search url: {e}")))?;
        let raw: BdlPlayersResponse = self.get_authed(url.as_str()).await?;
        Ok(PlayerPage {
            players: raw.data.into_iter().map(map_player).collect(),
            meta: raw.meta.map(map_meta).unwrap_or_default(),
        })
    }

    /// Fetch one player by identifier.
    pub async fn fetch_player(&self, player_id: u64) -> ApiResult<Player> {
        let url = format!("{}/players/{player_id}", self.bdl);
        let raw: BdlPlayerResponse = self.get_authed(&url).await?;
        raw.data
            .map(map_player)
            .ok_or_else(|| ApiError::NotFound(format!("player {player_id}")))
    }

    /// Resolve a player by name and fetch their current-season averages.
    ///
    /// Best-effort enrichment: any failure — no search match, transport
    /// error, unparseable document — logs and yields None so the caller can
    /// render an empty stats state.
    pub async fn fetch_season_stats(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Option<SeasonStats> {
        match self.try_fetch_season_stats(first_name, last_name).await {
            Ok(stats) => stats,
            Err(e) => {
                warn!("season stats unavailable for {first_name} {last_name}: {e}");
                None
            }
        }
    }

    async fn try_fetch_season_stats(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> ApiResult<Option<SeasonStats>> {
        let name = format!("{first_name} {last_name}");
        let url = Url::parse_with_params(
            &self.espn_search,
            &[
                ("query", name.as_str()),
                ("limit", "5"),
                ("type", "player"),
                ("sport", "basketball"),
                ("league", "nba"),
            ],
        )
        .map_err(|e| ApiError::Other(format!("bad search url: {e}")))?;
        let raw: SearchResponse = self.get(url.as_str()).await?;

        // First match wins; no match means "no stats available", not an error.
        let Some(player_id) = raw
            .items
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|item| item.id)
        else {
            return Ok(None);
        };

        let url = format!("{}/athletes/{player_id}/statistics", self.espn_core);
        let raw: StatisticsResponse = self.get(&url).await?;
        let categories = raw.splits.and_then(|s| s.categories).unwrap_or_default();
        Ok(map_season_stats(&categories, player_id))
    }

    /// Fetch the per-player box score for one game.
    ///
    /// Best-effort: any failure, including the common "not yet available"
    /// for games that haven't started, yields None.
    pub async fn fetch_box_score(&self, game_id: &str) -> Option<BoxScore> {
        match self.try_fetch_box_score(game_id).await {
            Ok(box_score) => box_score,
            Err(e) => {
                warn!("box score unavailable for game {game_id}: {e}");
                None
            }
        }
    }

    async fn try_fetch_box_score(&self, game_id: &str) -> ApiResult<Option<BoxScore>> {
        let url = format!("{}/summary?event={game_id}", self.espn_site);
        let raw: SummaryResponse = self.get(&url).await?;
        let Some(boxscore) = raw.boxscore else {
            return Ok(None);
        };
        let Some(team_players) = boxscore.players else {
            return Ok(None);
        };

        // homeAway lives in the teams list, not alongside the player groups,
        // so build a side lookup keyed by team id first.
        let sides: HashMap<String, String> = boxscore
            .teams
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| {
                let id = entry.team.and_then(|t| t.id)?;
                Some((id, entry.home_away?))
            })
            .collect();

        let mut result = BoxScore::default();
        for team_data in team_players {
            let team_id = team_data.team.as_ref().and_then(|t| t.id.clone());
            let is_home = team_id
                .as_deref()
                .and_then(|id| sides.get(id))
                .is_some_and(|side| side == "home");
            let box_team = map_team_box(team_data);
            if is_home {
                result.home_team = Some(box_team);
            } else {
                result.away_team = Some(box_team);
            }
        }
        Ok(Some(result))
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
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
                // ESPN answers some empty-data requests with a 4xx; treat
                // those as the shape's default rather than a hard failure.
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }

    /// GET with the bearer key. Unlike `get`, a 4xx here is a real failure
    /// (bad key, bad id) and propagates.
    async fn get_authed<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .header("Authorization", &self.bdl_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

/// ESPN CDN headshot URL for a resolved player identifier. May 404 for
/// players without a published headshot; callers should tolerate that.
pub fn headshot_url(espn_player_id: &str) -> String {
    format!(
        "https://a.espncdn.com/combiner/i?img=/i/headshots/nba/players/full/{espn_player_id}.png&w=350&h=254"
    )
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

/// Total mapping from the upstream three-valued state to the status
/// taxonomy. Case-insensitive; anything unrecognized is Unknown.
pub fn parse_game_status(state: &str) -> GameStatus {
    match state.to_ascii_lowercase().as_str() {
        "pre" => GameStatus::Scheduled,
        "in" => GameStatus::Live,
        "post" => GameStatus::Final,
        _ => GameStatus::Unknown,
    }
}

fn map_event_to_game(event: &EspnEvent) -> Game {
    // Only the first competition record carries the matchup.
    let competition = event.competitions.as_deref().unwrap_or_default().first();
    let competitors = competition
        .and_then(|c| c.competitors.as_deref())
        .unwrap_or_default();
    let home = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("home"));
    let away = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("away"));

    let status = event.status.as_ref();
    let status_type = status.and_then(|s| s.status_type.as_ref());

    Game {
        id: event.id.clone().unwrap_or_default(),
        date: event
            .date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|dt| dt.with_timezone(&Utc)),
        name: event.name.clone().unwrap_or_default(),
        short_name: event.short_name.clone().unwrap_or_default(),
        status: status_type
            .and_then(|t| t.state.as_deref())
            .map(parse_game_status)
            .unwrap_or_default(),
        status_detail: status_type
            .and_then(|t| t.short_detail.clone().or_else(|| t.description.clone()))
            .unwrap_or_default(),
        period: status.and_then(|s| s.period).unwrap_or(0),
        clock: status.and_then(|s| s.display_clock.clone()).unwrap_or_default(),
        venue: competition
            .and_then(|c| c.venue.as_ref())
            .and_then(|v| v.full_name.clone())
            .unwrap_or_default(),
        home: home.map(map_team_side).unwrap_or_default(),
        away: away.map(map_team_side).unwrap_or_default(),
    }
}

fn map_team_side(c: &EspnCompetitor) -> TeamSide {
    let team = c.team.as_ref();
    TeamSide {
        id: team.and_then(|t| t.id.clone()),
        name: team.and_then(|t| t.display_name.clone()),
        abbreviation: team.and_then(|t| t.abbreviation.clone()),
        logo: team.and_then(|t| t.logo.clone()),
        color: team.and_then(|t| t.color.clone()),
        // Missing or non-numeric scores normalize to 0.
        score: c
            .score
            .as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(0),
    }
}

fn map_article(article: EspnArticle) -> NewsArticle {
    let headline = article.headline.unwrap_or_default();
    let published_raw = article.published.clone().unwrap_or_default();
    let id = non_empty(article.data_source_identifier)
        .unwrap_or_else(|| synthesize_article_id(&headline, &published_raw));
    NewsArticle {
        id,
        headline,
        description: non_empty(article.description),
        image_url: article
            .images
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|img| img.url),
        published: article
            .published
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|dt| dt.with_timezone(&Utc)),
        url: article
            .links
            .and_then(|l| l.web)
            .and_then(|w| w.href)
            .unwrap_or_default(),
        source: NEWS_SOURCE.to_owned(),
    }
}

/// Stable local identifier for articles the upstream ships without one.
fn synthesize_article_id(headline: &str, published: &str) -> String {
    let mut hasher = DefaultHasher::new();
    headline.hash(&mut hasher);
    published.hash(&mut hasher);
    format!("local-{:016x}", hasher.finish())
}

fn map_team(t: EspnTeam) -> Team {
    Team {
        id: t.id.unwrap_or_default(),
        name: t.display_name.unwrap_or_default(),
        abbreviation: t.abbreviation.unwrap_or_default(),
        logo: t
            .logos
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|l| l.href)
            .or(t.logo),
        color: t.color,
    }
}

// ---------------------------------------------------------------------------
// Mapping: BallDontLie wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_player(p: BdlPlayer) -> Player {
    Player {
        id: p.id,
        full_name: format!("{} {}", p.first_name, p.last_name),
        first_name: p.first_name,
        last_name: p.last_name,
        position: non_empty(p.position).unwrap_or_else(|| "N/A".to_owned()),
        height: non_empty(p.height),
        weight: non_empty(p.weight),
        jersey_number: non_empty(p.jersey_number),
        college: non_empty(p.college),
        country: non_empty(p.country),
        draft_year: p.draft_year,
        draft_round: p.draft_round,
        draft_number: p.draft_number,
        team: p.team.map(map_player_team),
    }
}

fn map_player_team(t: BdlTeam) -> PlayerTeam {
    PlayerTeam {
        id: t.id,
        name: t.full_name.unwrap_or_default(),
        abbreviation: t.abbreviation.unwrap_or_default(),
        city: non_empty(t.city),
        conference: non_empty(t.conference),
        division: non_empty(t.division),
    }
}

fn map_meta(m: BdlMeta) -> SearchMeta {
    SearchMeta {
        current_page: m.current_page,
        next_page: m.next_page,
        per_page: m.per_page,
        total_pages: m.total_pages,
        total_count: m.total_count,
    }
}

// ---------------------------------------------------------------------------
// Mapping: core statistics document → SeasonStats
// ---------------------------------------------------------------------------

fn map_season_stats(categories: &[EspnCoreCategory], espn_player_id: String) -> Option<SeasonStats> {
    if categories.is_empty() {
        return None;
    }

    let flat = flatten_categories(categories);
    if flat.is_empty() {
        return None;
    }

    // The upstream supplies pre-averaged values; percentages arrive already
    // scaled 0–100 and must not be divided again. Each field enumerates the
    // keys it may appear under, since the document is inconsistent about
    // name vs abbreviation.
    let avg = |aliases: &[&str]| fmt1(lookup(&flat, aliases));

    Some(SeasonStats {
        season: Utc::now().year(),
        games_played: lookup(&flat, &["gamesPlayed", "GP"])
            .map(|v| v as u32)
            .unwrap_or(0),
        minutes: avg(&["avgMinutes"]),
        points: avg(&["avgPoints"]),
        assists: avg(&["avgAssists"]),
        rebounds: avg(&["avgRebounds"]),
        steals: avg(&["avgSteals"]),
        blocks: avg(&["avgBlocks"]),
        turnovers: avg(&["avgTurnovers"]),
        field_goal_pct: avg(&["fieldGoalPct", "FG%"]),
        three_point_pct: avg(&["threePointFieldGoalPct", "3P%"]),
        free_throw_pct: avg(&["freeThrowPct", "FT%"]),
        field_goals_made: avg(&["avgFieldGoalsMade"]),
        field_goals_attempted: avg(&["avgFieldGoalsAttempted"]),
        three_pointers_made: avg(&["avgThreePointFieldGoalsMade"]),
        three_pointers_attempted: avg(&["avgThreePointFieldGoalsAttempted"]),
        free_throws_made: avg(&["avgFreeThrowsMade"]),
        free_throws_attempted: avg(&["avgFreeThrowsAttempted"]),
        offensive_rebounds: avg(&["avgOffensiveRebounds"]),
        defensive_rebounds: avg(&["avgDefensiveRebounds"]),
        personal_fouls: avg(&["avgFouls"]),
        espn_player_id: Some(espn_player_id),
    })
}

/// Flatten every {name, abbreviation, value} triple from every category into
/// one lookup. Both keys point at the same value, tolerating the upstream's
/// inconsistent keying across categories.
fn flatten_categories(categories: &[EspnCoreCategory]) -> HashMap<String, f64> {
    let mut flat = HashMap::new();
    for category in categories {
        for stat in category.stats.as_deref().unwrap_or_default() {
            let Some(value) = stat.value else { continue };
            if let Some(name) = &stat.name {
                flat.insert(name.clone(), value);
            }
            if let Some(abbr) = &stat.abbreviation {
                flat.insert(abbr.clone(), value);
            }
        }
    }
    flat
}

fn lookup(flat: &HashMap<String, f64>, aliases: &[&str]) -> Option<f64> {
    aliases.iter().find_map(|key| flat.get(*key).copied())
}

/// One-decimal display convention shared by every averaged field. Missing
/// values format as "0.0" so no null ever reaches a formatted field.
fn fmt1(value: Option<f64>) -> String {
    format!("{:.1}", value.unwrap_or(0.0))
}

// ---------------------------------------------------------------------------
// Mapping: summary document → BoxScore
// ---------------------------------------------------------------------------

fn map_team_box(team_data: EspnTeamPlayers) -> TeamBoxScore {
    let team = team_data.team.map(map_team).unwrap_or_default();
    // One statistics group per team for a single game.
    let players = team_data
        .statistics
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|group| {
            let labels = group.labels.unwrap_or_default();
            group
                .athletes
                .unwrap_or_default()
                .into_iter()
                .map(|athlete| map_box_line(athlete, &labels))
                .collect()
        })
        .unwrap_or_default();
    TeamBoxScore { team, players }
}

fn map_box_line(entry: EspnAthleteStats, labels: &[String]) -> PlayerBoxLine {
    let values = entry.stats.unwrap_or_default();
    // Index-aligned zip; a short value array leaves trailing labels unmapped
    // instead of touching out-of-bounds indices.
    let stats: HashMap<String, String> = labels
        .iter()
        .zip(values.iter())
        .map(|(label, value)| (label.clone(), value.clone()))
        .collect();

    let athlete = entry.athlete.unwrap_or_default();
    PlayerBoxLine {
        id: athlete.id.unwrap_or_default(),
        name: athlete.display_name.unwrap_or_else(|| "Unknown".to_owned()),
        short_name: athlete.short_name.unwrap_or_default(),
        jersey: athlete.jersey.unwrap_or_default(),
        position: athlete
            .position
            .and_then(|p| p.abbreviation)
            .unwrap_or_default(),
        starter: entry.starter.unwrap_or(false),
        did_not_play: entry.did_not_play.unwrap_or(false),
        reason: non_empty(entry.reason),
        stats,
    }
}

/// Missing-text normalization used by every mapper: upstream empty strings
/// and absent fields both become None.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
