use crate::client::{ApiError, ApiResult};
use crate::format::parse_duration;
use crate::youtube::{YtPlaylistItem, YtPlaylistResponse, YtThumbnails, YtVideo, YtVideosResponse};
use crate::{Reel, ReelsPage};
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::{Client, Url};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

const YOUTUBE_API: &str = "https://www.googleapis.com/youtube/v3";
/// Supply your own YouTube Data API v3 key via NBA_API_YOUTUBE_KEY or
/// [`ReelsClient::with_api_key`]; the bundled value is a placeholder.
const YOUTUBE_API_KEY: &str = "AIzaSy-replace-with-your-own-key";
/// NBA official channel uploads playlist (channel id with UC swapped for UU).
const NBA_UPLOADS_PLAYLIST: &str = "UUWJ2lWNubArHWmf3FIHbfcQ";
const PAGE_SIZE: u32 = 20;
/// Highlights cutoff: anything this long or longer is not short-form.
const MAX_REEL_SECONDS: u64 = 300;
const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Highlights feed client backed by the YouTube Data API.
///
/// Holds the layer's only long-lived state: a one-entry cache of the first
/// page. The cache is a freshness optimization, not a correctness store;
/// concurrent first-page misses may both fetch and the later write wins.
pub struct ReelsClient {
    client: Client,
    timeout: Duration,
    base_url: String,
    api_key: String,
    playlist_id: String,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedPage>>,
}

struct CachedPage {
    page: ReelsPage,
    fetched_at: Instant,
}

impl Default for ReelsClient {
    fn default() -> Self {
        let key =
            std::env::var("NBA_API_YOUTUBE_KEY").unwrap_or_else(|_| YOUTUBE_API_KEY.to_owned());
        Self::with_api_key(key)
    }
}

impl ReelsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("nba-api/0.1 (nba data client)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            base_url: YOUTUBE_API.to_owned(),
            api_key: api_key.into(),
            playlist_id: NBA_UPLOADS_PLAYLIST.to_owned(),
            cache_ttl: CACHE_TTL,
            cache: Mutex::new(None),
        }
    }

    /// Fetch one page of short-form highlights.
    ///
    /// A first-page request (no token, no force) is served from the cache
    /// while it is fresh, making zero upstream calls. Everything else costs
    /// two calls: one playlist page (size 20) and one batched details fetch,
    /// joined by video id. Entries running 300 seconds or longer are
    /// dropped; relative order is preserved. Errors propagate — this feed is
    /// the screen's primary content, so the caller owns the retry.
    pub async fn fetch_highlights(
        &self,
        page_token: Option<&str>,
        force_refresh: bool,
    ) -> ApiResult<ReelsPage> {
        if page_token.is_none() && !force_refresh {
            if let Some(page) = self.cached_first_page() {
                debug!("serving highlights first page from cache");
                return Ok(page);
            }
        }

        let mut params = vec![
            ("key", self.api_key.clone()),
            ("part", "snippet,contentDetails".to_owned()),
            ("playlistId", self.playlist_id.clone()),
            ("maxResults", PAGE_SIZE.to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_owned()));
        }
        let url = Url::parse_with_params(&format!("{}/playlistItems", self.base_url), &params)
            .map_err(|e| ApiError::Other(format!("bad playlist url: {e}")))?;
        let playlist: YtPlaylistResponse = self.get(url.as_str()).await?;

        let video_ids: Vec<&str> = playlist
            .items
            .iter()
            .filter_map(|item| item.content_details.as_ref())
            .filter_map(|details| details.video_id.as_deref())
            .collect();

        let details: YtVideosResponse = if video_ids.is_empty() {
            YtVideosResponse::default()
        } else {
            let ids = video_ids.join(",");
            let url = Url::parse_with_params(
                &format!("{}/videos", self.base_url),
                &[
                    ("key", self.api_key.as_str()),
                    ("part", "contentDetails,statistics,snippet"),
                    ("id", ids.as_str()),
                ],
            )
            .map_err(|e| ApiError::Other(format!("bad videos url: {e}")))?;
            self.get(url.as_str()).await?
        };

        let reels: Vec<Reel> = join_reels(playlist.items, details.items)
            .into_iter()
            .filter(|reel| reel.duration_seconds < MAX_REEL_SECONDS)
            .collect();

        let has_more = playlist.next_page_token.is_some();
        let page = ReelsPage {
            reels,
            next_page_token: playlist.next_page_token,
            has_more,
        };

        if page_token.is_none() && !force_refresh {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            *cache = Some(CachedPage {
                page: page.clone(),
                fetched_at: Instant::now(),
            });
        }

        Ok(page)
    }

    fn cached_first_page(&self) -> Option<ReelsPage> {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.cache_ttl)
            .map(|entry| entry.page.clone())
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
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
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

/// Join playlist entries with their detail records by video id. An entry
/// whose details are missing from the batch keeps empty defaults rather
/// than being dropped.
fn join_reels(items: Vec<YtPlaylistItem>, details: Vec<YtVideo>) -> Vec<Reel> {
    let by_id: HashMap<String, YtVideo> = details
        .into_iter()
        .filter_map(|video| video.id.clone().map(|id| (id, video)))
        .collect();

    items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.content_details.and_then(|d| d.video_id)?;
            let snippet = item.snippet.unwrap_or_default();
            let detail = by_id.get(&video_id).cloned().unwrap_or_default();

            let duration_seconds = detail
                .content_details
                .and_then(|d| d.duration)
                .map(|d| parse_duration(&d))
                .unwrap_or(0);
            let stats = detail.statistics.unwrap_or_default();

            Some(Reel {
                id: video_id,
                title: snippet.title.unwrap_or_default(),
                description: snippet.description.unwrap_or_default(),
                thumbnail: best_thumbnail(snippet.thumbnails),
                channel_title: snippet.channel_title.unwrap_or_default(),
                published: snippet
                    .published_at
                    .as_deref()
                    .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                    .map(|dt| dt.with_timezone(&Utc)),
                duration_seconds,
                view_count: parse_count(stats.view_count),
                like_count: parse_count(stats.like_count),
            })
        })
        .collect()
}

/// Best available resolution tier wins; a tier present without a URL falls
/// through to the next.
fn best_thumbnail(thumbnails: Option<YtThumbnails>) -> Option<String> {
    let t = thumbnails?;
    [t.maxres, t.high, t.medium]
        .into_iter()
        .flatten()
        .find_map(|tier| tier.url)
}

fn parse_count(raw: Option<String>) -> u64 {
    raw.as_deref().and_then(|v| v.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::{YtPlaylistContentDetails, YtSnippet, YtThumbnail};

    fn test_client(server: &mockito::ServerGuard) -> ReelsClient {
        ReelsClient {
            client: Client::new(),
            timeout: Duration::from_secs(10),
            base_url: server.url(),
            api_key: "test-key".to_owned(),
            playlist_id: "PLTEST".to_owned(),
            cache_ttl: CACHE_TTL,
            cache: Mutex::new(None),
        }
    }

    fn playlist_entry(video_id: &str, title: &str) -> serde_json::Value {
        serde_json::json!({
            "snippet": {
                "title": title,
                "description": "",
                "channelTitle": "NBA",
                "publishedAt": "2026-03-14T18:00:00Z",
                "thumbnails": { "high": { "url": format!("https://i.ytimg.com/{video_id}/hq.jpg") } }
            },
            "contentDetails": { "videoId": video_id }
        })
    }

    fn video_detail(video_id: &str, duration: &str, views: &str) -> serde_json::Value {
        serde_json::json!({
            "id": video_id,
            "contentDetails": { "duration": duration },
            "statistics": { "viewCount": views, "likeCount": "100" }
        })
    }

    #[test]
    fn join_keeps_entries_without_a_details_match() {
        let items = vec![YtPlaylistItem {
            snippet: Some(YtSnippet {
                title: Some("Top plays".into()),
                ..Default::default()
            }),
            content_details: Some(YtPlaylistContentDetails {
                video_id: Some("abc".into()),
            }),
        }];
        let reels = join_reels(items, vec![]);
        assert_eq!(reels.len(), 1);
        assert_eq!(reels[0].id, "abc");
        assert_eq!(reels[0].duration_seconds, 0);
        assert_eq!(reels[0].view_count, 0);
    }

    #[test]
    fn thumbnail_prefers_highest_available_tier() {
        let thumbs = YtThumbnails {
            maxres: None,
            high: Some(YtThumbnail { url: Some("high.jpg".into()) }),
            medium: Some(YtThumbnail { url: Some("med.jpg".into()) }),
        };
        assert_eq!(best_thumbnail(Some(thumbs)).as_deref(), Some("high.jpg"));

        // A tier present without a URL falls through.
        let thumbs = YtThumbnails {
            maxres: Some(YtThumbnail { url: None }),
            high: None,
            medium: Some(YtThumbnail { url: Some("med.jpg".into()) }),
        };
        assert_eq!(best_thumbnail(Some(thumbs)).as_deref(), Some("med.jpg"));
        assert!(best_thumbnail(None).is_none());
    }

    #[tokio::test]
    async fn duration_filter_drops_long_videos_preserving_order() {
        let playlist = serde_json::json!({
            "nextPageToken": "CAUQAA",
            "items": [
                playlist_entry("a", "Short one"),
                playlist_entry("b", "Full game"),
                playlist_entry("c", "Another short")
            ]
        });
        let videos = serde_json::json!({
            "items": [
                video_detail("a", "PT1M30S", "1000"),
                video_detail("b", "PT6M40S", "2000"),
                video_detail("c", "PT4M10S", "3000")
            ]
        });
        let mut server = mockito::Server::new_async().await;
        let _playlist = server
            .mock("GET", "/playlistItems")
            .match_query(mockito::Matcher::Any)
            .with_body(playlist.to_string())
            .create_async()
            .await;
        let _videos = server
            .mock("GET", "/videos")
            .match_query(mockito::Matcher::Any)
            .with_body(videos.to_string())
            .create_async()
            .await;

        let page = test_client(&server).fetch_highlights(None, false).await.unwrap();
        let ids: Vec<&str> = page.reels.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(page.reels[0].duration_seconds, 90);
        assert_eq!(page.reels[1].duration_seconds, 250);
        assert!(page.has_more);
        assert_eq!(page.next_page_token.as_deref(), Some("CAUQAA"));
    }

    #[tokio::test]
    async fn first_page_is_cached_within_the_window() {
        let playlist = serde_json::json!({
            "items": [playlist_entry("a", "Short one")]
        });
        let videos = serde_json::json!({
            "items": [video_detail("a", "PT1M30S", "1000")]
        });
        let mut server = mockito::Server::new_async().await;
        let playlist_mock = server
            .mock("GET", "/playlistItems")
            .match_query(mockito::Matcher::Any)
            .with_body(playlist.to_string())
            .expect(1)
            .create_async()
            .await;
        let videos_mock = server
            .mock("GET", "/videos")
            .match_query(mockito::Matcher::Any)
            .with_body(videos.to_string())
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server);
        let first = client.fetch_highlights(None, false).await.unwrap();
        let second = client.fetch_highlights(None, false).await.unwrap();
        assert_eq!(first.reels.len(), second.reels.len());
        // Exactly one upstream round trip per endpoint for both requests.
        playlist_mock.assert_async().await;
        videos_mock.assert_async().await;

        // No next page token: the page reports no more content.
        assert!(!first.has_more);
    }

    #[tokio::test]
    async fn force_refresh_bypasses_a_fresh_cache() {
        let playlist = serde_json::json!({
            "items": [playlist_entry("a", "Short one")]
        });
        let videos = serde_json::json!({
            "items": [video_detail("a", "PT1M30S", "1000")]
        });
        let mut server = mockito::Server::new_async().await;
        let playlist_mock = server
            .mock("GET", "/playlistItems")
            .match_query(mockito::Matcher::Any)
            .with_body(playlist.to_string())
            .expect(2)
            .create_async()
            .await;
        let _videos = server
            .mock("GET", "/videos")
            .match_query(mockito::Matcher::Any)
            .with_body(videos.to_string())
            .expect(2)
            .create_async()
            .await;

        let client = test_client(&server);
        client.fetch_highlights(None, false).await.unwrap();
        client.fetch_highlights(None, true).await.unwrap();
        playlist_mock.assert_async().await;
    }

    #[tokio::test]
    async fn expired_cache_triggers_a_new_fetch() {
        let playlist = serde_json::json!({
            "items": [playlist_entry("a", "Short one")]
        });
        let videos = serde_json::json!({
            "items": [video_detail("a", "PT1M30S", "1000")]
        });
        let mut server = mockito::Server::new_async().await;
        let playlist_mock = server
            .mock("GET", "/playlistItems")
            .match_query(mockito::Matcher::Any)
            .with_body(playlist.to_string())
            .expect(2)
            .create_async()
            .await;
        let _videos = server
            .mock("GET", "/videos")
            .match_query(mockito::Matcher::Any)
            .with_body(videos.to_string())
            .expect(2)
            .create_async()
            .await;

        let mut client = test_client(&server);
        client.cache_ttl = Duration::ZERO;
        client.fetch_highlights(None, false).await.unwrap();
        client.fetch_highlights(None, false).await.unwrap();
        playlist_mock.assert_async().await;
    }

    #[tokio::test]
    async fn continuation_requests_skip_the_cache() {
        let playlist = serde_json::json!({
            "items": [playlist_entry("a", "Short one")]
        });
        let videos = serde_json::json!({
            "items": [video_detail("a", "PT1M30S", "1000")]
        });
        let mut server = mockito::Server::new_async().await;
        let page_two = server
            .mock("GET", "/playlistItems")
            .match_query(mockito::Matcher::UrlEncoded(
                "pageToken".into(),
                "CAUQAA".into(),
            ))
            .with_body(playlist.to_string())
            .expect(1)
            .create_async()
            .await;
        let _videos = server
            .mock("GET", "/videos")
            .match_query(mockito::Matcher::Any)
            .with_body(videos.to_string())
            .create_async()
            .await;

        test_client(&server)
            .fetch_highlights(Some("CAUQAA"), false)
            .await
            .unwrap();
        page_two.assert_async().await;
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/playlistItems")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;
        let result = test_client(&server).fetch_highlights(None, false).await;
        assert!(matches!(result, Err(ApiError::Api(_, _))));
    }
}
