//! Comment ingestion pipeline
//!
//! Fetches a video's comment threads from the platform, sanitizes the text,
//! labels each comment, and replaces the stored comment set. Labeling runs in
//! small batches with a fixed pause between them; the pause is purely a
//! rate-limit throttle for the gateway, not a correctness mechanism.

use std::sync::Arc;

use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use crate::config::IngestConfig;
use crate::database::Database;
use crate::llm::prompts::ReportPrompts;
use crate::llm::CompletionParams;
use crate::llm::LlmService;
use crate::models::Comment;
use crate::models::RawComment;
use crate::models::Sentiment;
use crate::sentiment::SentimentScorer;
use crate::youtube::YouTubeClient;
use crate::Result;
use crate::TubePulseError;

/// Replacement text for comments that are empty after sanitization
pub const TEXT_PLACEHOLDER: &str = "No text content";

/// Maximum stored comment length in characters
pub const MAX_TEXT_LENGTH: usize = 512;

/// Outcome of one ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub video_id: String,
    pub fetched: usize,
    pub stored: usize,
    /// Comments labeled by the lexical fallback because the gateway failed
    pub degraded_labels: usize,
    /// First few stored comments, for quick inspection
    pub sample: Vec<Comment>,
}

/// Fetch-label-store pipeline for one video's comments
pub struct IngestService {
    youtube: Arc<YouTubeClient>,
    llm: Arc<LlmService>,
    scorer: SentimentScorer,
    database: Arc<Database>,
    config: IngestConfig,
}

impl IngestService {
    #[must_use]
    pub fn new(
        youtube: Arc<YouTubeClient>,
        llm: Arc<LlmService>,
        scorer: SentimentScorer,
        database: Arc<Database>,
        config: IngestConfig,
    ) -> Self {
        Self {
            youtube,
            llm,
            scorer,
            database,
            config,
        }
    }

    /// Fetch, label and store the comment set for one video, replacing
    /// whatever was stored before.
    ///
    /// Two concurrent runs for the same video both complete; the last writer
    /// wins.
    pub async fn refresh_comments(&self, video_id: &str) -> Result<IngestOutcome> {
        if video_id.trim().is_empty() {
            return Err(TubePulseError::InvalidRequest(
                "video_id must not be empty".to_string(),
            ));
        }

        let raw_comments = self
            .youtube
            .comments(video_id, self.config.max_comments, self.config.page_size)
            .await?;
        let fetched = raw_comments.len();

        if raw_comments.is_empty() {
            tracing::info!("⚠️ No comments found for video {}", video_id);
            self.database.replace_comments(video_id, &[]).await?;
            return Ok(IngestOutcome {
                video_id: video_id.to_string(),
                fetched: 0,
                stored: 0,
                degraded_labels: 0,
                sample: Vec::new(),
            });
        }

        tracing::info!(
            "🧠 Labeling {} comments in batches of {}",
            fetched,
            self.config.label_batch_size
        );

        let mut comments = Vec::with_capacity(fetched);
        let mut degraded_labels = 0;
        let batch_size = self.config.label_batch_size.max(1);
        let batch_count = fetched.div_ceil(batch_size);

        for (batch_idx, batch) in raw_comments.chunks(batch_size).enumerate() {
            let labeled = futures::future::join_all(
                batch.iter().map(|raw| self.label_comment(video_id, raw)),
            )
            .await;

            for (comment, degraded) in labeled {
                if degraded {
                    degraded_labels += 1;
                }
                comments.push(comment);
            }

            tracing::debug!("✅ Processed batch {}/{}", batch_idx + 1, batch_count);

            // Throttle between batches to respect the gateway rate limit
            if batch_idx + 1 < batch_count {
                tokio::time::sleep(std::time::Duration::from_millis(
                    self.config.label_batch_delay_ms,
                ))
                .await;
            }
        }

        if degraded_labels > 0 {
            tracing::warn!(
                "⚠️ {} of {} comments labeled by the lexical fallback",
                degraded_labels,
                comments.len()
            );
        }

        let stored = self.database.replace_comments(video_id, &comments).await?;
        let sample = comments.iter().take(5).cloned().collect();

        Ok(IngestOutcome {
            video_id: video_id.to_string(),
            fetched,
            stored,
            degraded_labels,
            sample,
        })
    }

    /// Sanitize and label one raw comment.
    ///
    /// The gateway classifier labels the text; when it fails the lexical
    /// scorer's label is used instead and the comment is flagged as degraded.
    async fn label_comment(&self, video_id: &str, raw: &RawComment) -> (Comment, bool) {
        let text = sanitize_text(&raw.text);
        let analysis = self.scorer.analyze(&text);

        let (sentiment, degraded) = match self.classify(&text).await {
            Ok(sentiment) => (sentiment, false),
            Err(err) => {
                tracing::warn!(
                    "⚠️ Classifier failed ({}), using lexical label for comment",
                    err
                );
                (analysis.sentiment, true)
            }
        };

        let comment = Comment {
            id: Uuid::new_v4(),
            video_id: video_id.to_string(),
            text,
            votes: raw.like_count.max(0),
            hearted: raw.is_hearted(),
            replies: raw.reply_count.max(0),
            published_at: raw.published_at,
            sentiment,
            sentiment_score: Some(analysis.score),
            recorded_at: raw.published_at,
        };

        (comment, degraded)
    }

    /// Classify one comment through the gateway, no fallback chain
    async fn classify(&self, text: &str) -> Result<Sentiment> {
        let completion = self
            .llm
            .complete_with_model(
                &self.config.label_model,
                ReportPrompts::classifier_system(),
                &ReportPrompts::classify(text),
                CompletionParams {
                    temperature: 0.1,
                    max_tokens: 10,
                },
            )
            .await?;

        Ok(Sentiment::parse(&completion.text))
    }
}

/// Strip HTML tags, truncate, and guarantee non-empty text
#[must_use]
pub fn sanitize_text(text: &str) -> String {
    let stripped = strip_html(text);
    let truncated = truncate_text(&stripped, MAX_TEXT_LENGTH);
    if truncated.is_empty() {
        TEXT_PLACEHOLDER.to_string()
    } else {
        truncated
    }
}

/// Remove HTML tags from platform comment markup
#[must_use]
pub fn strip_html(text: &str) -> String {
    let tag_re = Regex::new("<[^>]+>").unwrap();
    tag_re.replace_all(text, "").trim().to_string()
}

/// Truncate to a maximum number of characters, on a character boundary
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("Great <b>video</b>!<br>Loved it"),
            "Great video!Loved it"
        );
        assert_eq!(strip_html("  plain text  "), "plain text");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_text("héllo", 2), "hé");
        assert_eq!(truncate_text("short", 512), "short");
    }

    #[test]
    fn test_sanitize_empty_gets_placeholder() {
        assert_eq!(sanitize_text(""), TEXT_PLACEHOLDER);
        assert_eq!(sanitize_text("<br><br>"), TEXT_PLACEHOLDER);
        assert_eq!(sanitize_text("   "), TEXT_PLACEHOLDER);
    }

    #[test]
    fn test_sanitize_truncates_long_text() {
        let long: String = "a".repeat(2000);
        assert_eq!(sanitize_text(&long).chars().count(), MAX_TEXT_LENGTH);
    }
}
