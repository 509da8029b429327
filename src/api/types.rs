//! API request and response types

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::sentiment::SentimentPercentages;
use crate::sentiment::VideoSummary;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Per-video summary response: the aggregate plus the percentage view the
/// dashboard charts use directly
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub video_id: String,
    pub summary: VideoSummary,
    pub sentiment: SentimentPercentages,
}

/// Cache lookup query
#[derive(Debug, Deserialize)]
pub struct CacheKeyQuery {
    pub key: String,
}

/// Cache lookup response
#[derive(Debug, Serialize)]
pub struct CacheGetResponse {
    pub found: bool,
    pub data: Option<serde_json::Value>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Cache store request
#[derive(Debug, Deserialize)]
pub struct CachePutRequest {
    pub key: String,
    pub data: serde_json::Value,
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: i64,
}

fn default_expiry_hours() -> i64 {
    24
}

/// Cache store response
#[derive(Debug, Serialize)]
pub struct CachePutResponse {
    pub success: bool,
    pub expires_at: DateTime<Utc>,
}
