pub mod bdl;
pub mod client;
pub mod espn;
pub mod format;
pub mod reels;
pub mod youtube;

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of upstream wire formats
// ---------------------------------------------------------------------------

/// One scheduled, live, or finished game from the scoreboard feed.
#[derive(Debug, Clone, Default)]
pub struct Game {
    pub id: String,
    pub date: Option<DateTime<Utc>>,
    pub name: String,       // "Boston Celtics at Los Angeles Lakers"
    pub short_name: String, // "BOS @ LAL"
    pub status: GameStatus,
    pub status_detail: String, // "Final", "7:30 PM ET", "End of 3rd"
    pub period: u8,
    pub clock: String,
    pub venue: String,
    pub home: TeamSide,
    pub away: TeamSide,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::Live
    }
}

/// One side of a game. Every field except the score may be absent upstream;
/// the score itself is always a concrete integer (missing means 0).
#[derive(Debug, Clone, Default)]
pub struct TeamSide {
    pub id: Option<String>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub logo: Option<String>,
    pub color: Option<String>,
    pub score: u32,
}

/// Closed status taxonomy derived from the upstream free-text state.
/// Unrecognized states map to Unknown, never to an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Unknown,
    Scheduled,
    Live,
    Final,
}

impl GameStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "Scheduled",
            GameStatus::Live => "Live",
            GameStatus::Final => "Final",
            GameStatus::Unknown => "Unknown",
        }
    }
}

/// A headline from the news feed. `id` is never empty: when the upstream
/// omits its identifier, one is synthesized locally.
#[derive(Debug, Clone, Default)]
pub struct NewsArticle {
    pub id: String,
    pub headline: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub url: String,
    pub source: String,
}

#[derive(Debug, Clone, Default)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub logo: Option<String>,
    pub color: Option<String>,
}

/// A player from the search/detail endpoints.
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub position: String, // "N/A" when absent upstream
    pub height: Option<String>,
    pub weight: Option<String>,
    pub jersey_number: Option<String>,
    pub college: Option<String>,
    pub country: Option<String>,
    pub draft_year: Option<u32>,
    pub draft_round: Option<u32>,
    pub draft_number: Option<u32>,
    pub team: Option<PlayerTeam>,
}

/// Team summary embedded in a player record. Richer than [`Team`]: the
/// player source also carries city/conference/division.
#[derive(Debug, Clone, Default)]
pub struct PlayerTeam {
    pub id: u64,
    pub name: String,
    pub abbreviation: String,
    pub city: Option<String>,
    pub conference: Option<String>,
    pub division: Option<String>,
}

/// One page of player search results plus the upstream pagination info.
#[derive(Debug, Clone, Default)]
pub struct PlayerPage {
    pub players: Vec<Player>,
    pub meta: SearchMeta,
}

#[derive(Debug, Clone, Default)]
pub struct SearchMeta {
    pub current_page: Option<u32>,
    pub next_page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_count: Option<u32>,
}

/// Per-game season averages, stored as one-decimal display strings to match
/// the upstream convention. A missing average is "0.0", never an empty field.
#[derive(Debug, Clone, Default)]
pub struct SeasonStats {
    pub season: i32,
    pub games_played: u32,
    pub minutes: String,
    pub points: String,
    pub assists: String,
    pub rebounds: String,
    pub steals: String,
    pub blocks: String,
    pub turnovers: String,
    pub field_goal_pct: String,
    pub three_point_pct: String,
    pub free_throw_pct: String,
    pub field_goals_made: String,
    pub field_goals_attempted: String,
    pub three_pointers_made: String,
    pub three_pointers_attempted: String,
    pub free_throws_made: String,
    pub free_throws_attempted: String,
    pub offensive_rebounds: String,
    pub defensive_rebounds: String,
    pub personal_fouls: String,
    /// Cross-reference identifier used solely to build a headshot URL.
    pub espn_player_id: Option<String>,
}

/// Per-player box score for one game. A side the upstream omits stays None.
#[derive(Debug, Clone, Default)]
pub struct BoxScore {
    pub home_team: Option<TeamBoxScore>,
    pub away_team: Option<TeamBoxScore>,
}

#[derive(Debug, Clone, Default)]
pub struct TeamBoxScore {
    pub team: Team,
    pub players: Vec<PlayerBoxLine>,
}

/// One athlete's line. `stats` maps upstream column labels ("MIN", "PTS")
/// to string values; misaligned label/value arrays leave entries unmapped.
#[derive(Debug, Clone, Default)]
pub struct PlayerBoxLine {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub jersey: String,
    pub position: String,
    pub starter: bool,
    pub did_not_play: bool,
    pub reason: Option<String>,
    pub stats: HashMap<String, String>,
}

/// Result of a multi-day scoreboard gather. Days that failed are reported
/// alongside the games that did load; the caller decides whether to surface
/// the gaps.
#[derive(Debug, Clone, Default)]
pub struct ScoreboardGather {
    pub games: Vec<Game>,
    pub failed_dates: Vec<NaiveDate>,
}

impl ScoreboardGather {
    pub fn is_complete(&self) -> bool {
        self.failed_dates.is_empty()
    }
}

/// A short-form highlight video.
#[derive(Debug, Clone, Default)]
pub struct Reel {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub channel_title: String,
    pub published: Option<DateTime<Utc>>,
    pub duration_seconds: u64,
    pub view_count: u64,
    pub like_count: u64,
}

/// One page of the highlights feed with its continuation token.
#[derive(Debug, Clone, Default)]
pub struct ReelsPage {
    pub reels: Vec<Reel>,
    pub next_page_token: Option<String>,
    pub has_more: bool,
}
