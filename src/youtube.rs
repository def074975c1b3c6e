/// Wire types for the YouTube Data API v3.
/// Endpoints: /playlistItems and /videos under https://www.googleapis.com/youtube/v3
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct YtPlaylistResponse {
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub items: Vec<YtPlaylistItem>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct YtPlaylistItem {
    pub snippet: Option<YtSnippet>,
    pub content_details: Option<YtPlaylistContentDetails>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct YtPlaylistContentDetails {
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct YtSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<String>, // ISO 8601
    pub thumbnails: Option<YtThumbnails>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct YtThumbnails {
    pub maxres: Option<YtThumbnail>,
    pub high: Option<YtThumbnail>,
    pub medium: Option<YtThumbnail>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct YtThumbnail {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct YtVideosResponse {
    #[serde(default)]
    pub items: Vec<YtVideo>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct YtVideo {
    pub id: Option<String>,
    pub content_details: Option<YtVideoContentDetails>,
    pub statistics: Option<YtVideoStatistics>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct YtVideoContentDetails {
    /// ISO-8601 duration, e.g. "PT9M31S".
    pub duration: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct YtVideoStatistics {
    /// YouTube sends counts as strings.
    pub view_count: Option<String>,
    pub like_count: Option<String>,
}
