//! Transcript retrieval client
//!
//! Thin adapter over the transcript service. Many videos have no captions,
//! so callers that can degrade should use `fetch_or_unavailable` and carry
//! the reason instead of failing the whole request.

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;

use crate::Result;
use crate::TubePulseError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranscriptRequest<'a> {
    video_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranscriptResponse {
    full_text: Option<String>,
    error: Option<String>,
}

/// Result of a graceful transcript fetch
#[derive(Debug, Clone)]
pub enum TranscriptOutcome {
    Available(String),
    /// No transcript, with the reason the service gave
    Unavailable(String),
}

impl TranscriptOutcome {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Available(text) => Some(text),
            Self::Unavailable(_) => None,
        }
    }
}

/// Client for the transcript service
pub struct TranscriptClient {
    client: Client,
    endpoint: String,
}

impl TranscriptClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &crate::AppConfig) -> Result<Self> {
        Self::new(config.transcript_endpoint(), config.transcript.timeout_secs)
    }

    /// Fetch the full transcript text for a video
    pub async fn fetch(&self, video_id: &str) -> Result<String> {
        tracing::info!("📜 Fetching transcript for video {}", video_id);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&TranscriptRequest { video_id })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body: TranscriptResponse = response.json().await.unwrap_or(TranscriptResponse {
                full_text: None,
                error: None,
            });
            let reason = body
                .error
                .unwrap_or_else(|| format!("transcript service returned HTTP {status}"));
            return Err(TubePulseError::TranscriptUnavailable(
                video_id.to_string(),
                reason,
            ));
        }

        let body: TranscriptResponse = response.json().await?;
        match body.full_text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(TubePulseError::TranscriptUnavailable(
                video_id.to_string(),
                body.error
                    .unwrap_or_else(|| "the video might not have captions".to_string()),
            )),
        }
    }

    /// Fetch a transcript, degrading to `Unavailable` with a reason instead
    /// of an error
    pub async fn fetch_or_unavailable(&self, video_id: &str) -> TranscriptOutcome {
        match self.fetch(video_id).await {
            Ok(text) => TranscriptOutcome::Available(text),
            Err(err) => {
                tracing::warn!("⚠️ No transcript for video {}: {}", video_id, err);
                TranscriptOutcome::Unavailable(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_text() {
        let available = TranscriptOutcome::Available("hello world".to_string());
        assert_eq!(available.text(), Some("hello world"));

        let unavailable = TranscriptOutcome::Unavailable("no captions".to_string());
        assert_eq!(unavailable.text(), None);
    }
}
