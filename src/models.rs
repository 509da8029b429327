use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentiment label attached to every stored comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parse a label, defaulting to `Neutral` for anything unrecognized
    #[must_use]
    pub fn parse(label: &str) -> Self {
        // Gateway classifiers answer in prose ("The sentiment is positive."),
        // so substring matching is deliberate here
        let label = label.to_lowercase();
        if label.contains("positive") {
            Self::Positive
        } else if label.contains("negative") {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audience comment on a video, as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub video_id: String,
    /// Never empty; ingestion replaces empty input with a placeholder
    pub text: String,
    pub votes: i64,
    pub hearted: bool,
    pub replies: i64,
    /// When the comment was published on the platform
    pub published_at: DateTime<Utc>,
    pub sentiment: Sentiment,
    pub sentiment_score: Option<f64>,
    /// When the record was written; aggregation prefers this, falling back
    /// to `published_at`
    pub recorded_at: DateTime<Utc>,
}

impl Comment {
    /// Hour of day (0-23) used for the commenting-time histogram
    #[must_use]
    pub fn activity_hour(&self) -> u32 {
        use chrono::Timelike;
        self.recorded_at.hour()
    }
}

/// A comment as returned by the video platform, before labeling and storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComment {
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub like_count: i64,
    pub viewer_reaction: Option<String>,
    pub reply_count: i64,
}

impl RawComment {
    /// Whether the comment author's viewer rating marks it as hearted
    #[must_use]
    pub fn is_hearted(&self) -> bool {
        self.viewer_reaction.as_deref() == Some("like")
    }
}

/// Video metadata from the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
    pub views: u64,
    pub likes: u64,
    pub subscribers: u64,
}

/// A cache row: opaque key, JSON payload, absolute expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub data: serde_json::Value,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_parse_exact_labels() {
        assert_eq!(Sentiment::parse("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::parse("negative"), Sentiment::Negative);
        assert_eq!(Sentiment::parse("neutral"), Sentiment::Neutral);
    }

    #[test]
    fn test_sentiment_parse_prose_answers() {
        assert_eq!(
            Sentiment::parse("The sentiment is Positive."),
            Sentiment::Positive
        );
        assert_eq!(Sentiment::parse("NEGATIVE"), Sentiment::Negative);
    }

    #[test]
    fn test_sentiment_parse_unknown_defaults_to_neutral() {
        assert_eq!(Sentiment::parse("mixed"), Sentiment::Neutral);
        assert_eq!(Sentiment::parse(""), Sentiment::Neutral);
    }

    #[test]
    fn test_sentiment_serde_lowercase() {
        let json = serde_json::to_string(&Sentiment::Positive).unwrap();
        assert_eq!(json, "\"positive\"");
        let back: Sentiment = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(back, Sentiment::Negative);
    }

    #[test]
    fn test_raw_comment_hearted() {
        let raw = RawComment {
            text: "nice".to_string(),
            published_at: Utc::now(),
            like_count: 0,
            viewer_reaction: Some("like".to_string()),
            reply_count: 0,
        };
        assert!(raw.is_hearted());

        let raw = RawComment {
            viewer_reaction: None,
            ..raw
        };
        assert!(!raw.is_hearted());
    }
}
