//! YouTube Data API v3 client

use reqwest::Client;
use serde::Deserialize;

use crate::models::RawComment;
use crate::models::VideoDetails;
use crate::Result;
use crate::TubePulseError;

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Option<VideoSnippet>,
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    title: Option<String>,
    channel_id: Option<String>,
    channel_title: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadsResponse {
    #[serde(default)]
    items: Vec<CommentThread>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    snippet: Option<CommentThreadSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    top_level_comment: Option<TopLevelComment>,
    #[serde(default)]
    total_reply_count: i64,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: Option<CommentSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    text_display: Option<String>,
    published_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    like_count: i64,
    viewer_rating: Option<String>,
}

/// Client for video metadata and comment threads
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a new client against the configured endpoint
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self> {
        if api_key.is_empty() {
            return Err(TubePulseError::Config(
                "YouTube API key is missing".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create a new client from AppConfig
    pub fn from_config(config: &crate::AppConfig) -> Result<Self> {
        Self::new(config.youtube_endpoint(), config.youtube_api_key())
    }

    /// Fetch title, channel, thumbnail and statistics for one video,
    /// including the channel's subscriber count
    pub async fn video_details(&self, video_id: &str) -> Result<VideoDetails> {
        let url = format!(
            "{}/videos?part=snippet,statistics&id={}&key={}",
            self.base_url, video_id, self.api_key
        );
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(TubePulseError::YouTube(format!(
                "videos.list failed: HTTP {}",
                response.status()
            )));
        }

        let videos: VideoListResponse = response.json().await?;
        let Some(video) = videos.items.into_iter().next() else {
            return Err(TubePulseError::VideoNotFound(video_id.to_string()));
        };

        let snippet = video.snippet.unwrap_or(VideoSnippet {
            title: None,
            channel_id: None,
            channel_title: None,
            thumbnails: None,
        });

        let subscribers = match snippet.channel_id.as_deref() {
            Some(channel_id) => self.channel_subscribers(channel_id).await?,
            None => 0,
        };

        let thumbnail = snippet
            .thumbnails
            .and_then(|t| t.high.or(t.medium).or(t.default))
            .map(|t| t.url)
            .unwrap_or_default();

        let statistics = video.statistics;
        Ok(VideoDetails {
            title: snippet.title.unwrap_or_else(|| "Unknown Title".to_string()),
            channel: snippet
                .channel_title
                .unwrap_or_else(|| "Unknown Channel".to_string()),
            thumbnail,
            views: parse_count(statistics.as_ref().and_then(|s| s.view_count.as_deref())),
            likes: parse_count(statistics.as_ref().and_then(|s| s.like_count.as_deref())),
            subscribers,
        })
    }

    /// Fetch up to `max_comments` top-level comments, newest pages first,
    /// following pagination until the cap or the last page
    pub async fn comments(
        &self,
        video_id: &str,
        max_comments: usize,
        page_size: u32,
    ) -> Result<Vec<RawComment>> {
        let mut all_comments = Vec::new();
        let mut page_token: Option<String> = None;

        tracing::info!(
            "🔄 Fetching up to {} comments for video {}",
            max_comments,
            video_id
        );

        loop {
            let mut url = format!(
                "{}/commentThreads?part=snippet&videoId={}&maxResults={}&key={}",
                self.base_url, video_id, page_size, self.api_key
            );
            if let Some(token) = &page_token {
                url.push_str(&format!("&pageToken={token}"));
            }

            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(TubePulseError::YouTube(format!(
                    "commentThreads.list failed: HTTP {status} - {body}"
                )));
            }

            let page: CommentThreadsResponse = response.json().await?;
            if page.items.is_empty() {
                tracing::debug!("No more comments available for video {}", video_id);
                break;
            }

            let page_len = page.items.len();
            for thread in page.items {
                if let Some(raw) = map_thread(thread) {
                    all_comments.push(raw);
                }
            }
            tracing::debug!(
                "📊 Fetched page of {} comments, total: {}",
                page_len,
                all_comments.len()
            );

            if all_comments.len() >= max_comments {
                all_comments.truncate(max_comments);
                tracing::info!("✅ Reached limit of {} comments", max_comments);
                break;
            }

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        tracing::info!(
            "✅ Fetched {} comments for video {}",
            all_comments.len(),
            video_id
        );
        Ok(all_comments)
    }

    async fn channel_subscribers(&self, channel_id: &str) -> Result<u64> {
        let url = format!(
            "{}/channels?part=statistics&id={}&key={}",
            self.base_url, channel_id, self.api_key
        );
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(TubePulseError::YouTube(format!(
                "channels.list failed: HTTP {}",
                response.status()
            )));
        }

        let channels: ChannelListResponse = response.json().await?;
        Ok(channels
            .items
            .first()
            .and_then(|c| c.statistics.as_ref())
            .map_or(0, |s| parse_count(s.subscriber_count.as_deref())))
    }
}

/// Map one comment thread into a raw comment; threads with no snippet are
/// dropped
fn map_thread(thread: CommentThread) -> Option<RawComment> {
    let snippet = thread.snippet?;
    let reply_count = snippet.total_reply_count;
    let top = snippet.top_level_comment?.snippet?;

    Some(RawComment {
        text: top.text_display.unwrap_or_default(),
        published_at: top.published_at.unwrap_or_else(chrono::Utc::now),
        like_count: top.like_count,
        viewer_reaction: top.viewer_rating,
        reply_count,
    })
}

/// Statistics arrive as decimal strings; anything unparsable counts as zero
fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some("12345")), 12345);
        assert_eq!(parse_count(Some("not-a-number")), 0);
        assert_eq!(parse_count(None), 0);
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let result = YouTubeClient::new("https://www.googleapis.com/youtube/v3", "");
        assert!(matches!(result, Err(TubePulseError::Config(_))));
    }

    #[test]
    fn test_comment_page_deserialization() {
        let json = r#"{
            "items": [{
                "snippet": {
                    "totalReplyCount": 2,
                    "topLevelComment": {
                        "snippet": {
                            "textDisplay": "Great video!",
                            "publishedAt": "2024-03-05T14:15:00Z",
                            "likeCount": 5,
                            "viewerRating": "like"
                        }
                    }
                }
            }],
            "nextPageToken": "abc"
        }"#;

        let page: CommentThreadsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));

        let raw = map_thread(page.items.into_iter().next().unwrap()).unwrap();
        assert_eq!(raw.text, "Great video!");
        assert_eq!(raw.like_count, 5);
        assert_eq!(raw.reply_count, 2);
        assert!(raw.is_hearted());
    }
}
