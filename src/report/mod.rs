//! Report assembly: aggregated metrics plus LLM narrative
//!
//! The assembler merges locally computed metrics (which never depend on the
//! gateway) with natural-language narrative from the LLM fallback chain. A
//! failed narrative never corrupts or discards the metrics - reports carry a
//! distinguishable error instead of fabricated prose.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tracing::info;
use tracing::warn;

use crate::config::CacheConfig;
use crate::database::Database;
use crate::llm::prompts::ReportPrompts;
use crate::llm::CompletionParams;
use crate::llm::LlmService;
use crate::models::Comment;
use crate::models::Sentiment;
use crate::sentiment::Aggregator;
use crate::sentiment::SentimentScorer;
use crate::sentiment::SentimentPercentages;
use crate::sentiment::TextAnalysis;
use crate::sentiment::VideoSummary;
use crate::youtube::TranscriptClient;
use crate::youtube::TranscriptOutcome;
use crate::youtube::YouTubeClient;
use crate::Result;
use crate::TubePulseError;

/// Transcript-level scoring details inside a health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSentiment {
    pub sentiment: Sentiment,
    pub score: f64,
    pub stress_level: f64,
    pub positive_patterns: Vec<String>,
    pub negative_patterns: Vec<String>,
    pub stress_signals: Vec<String>,
}

/// Audience-level scoring summary inside a health report
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CommentSentiment {
    pub average: f64,
    pub stress_level: f64,
    pub total_comments: usize,
}

/// Locally computed metrics of a health report; always present even when
/// narrative generation fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub transcript_sentiment: TranscriptSentiment,
    pub comment_sentiment: CommentSentiment,
    pub transcript_available: bool,
}

/// Creator wellbeing report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub video_id: String,
    pub metrics: HealthMetrics,
    pub narrative: Option<String>,
    /// Why narrative generation failed, when it did
    pub narrative_error: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub cached: bool,
}

/// LLM content analysis of one video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub video_id: String,
    pub analysis: String,
    pub model: String,
    pub comment_count: usize,
    pub transcript_available: bool,
    #[serde(default)]
    pub cached: bool,
}

/// Context for a creator chat question
#[derive(Debug, Clone, Deserialize)]
pub struct ChatContext {
    pub question: String,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub sentiment: Option<SentimentPercentages>,
    #[serde(default)]
    pub analysis: Option<String>,
}

/// Answer to a creator chat question
#[derive(Debug, Clone, Serialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub model: String,
}

/// Assembles per-video reports from stored comments, transcripts and the LLM
pub struct ReportService {
    database: Arc<Database>,
    youtube: Arc<YouTubeClient>,
    transcript: Arc<TranscriptClient>,
    llm: Arc<LlmService>,
    scorer: SentimentScorer,
    aggregator: Aggregator,
    cache: CacheConfig,
}

impl ReportService {
    #[must_use]
    pub fn new(
        database: Arc<Database>,
        youtube: Arc<YouTubeClient>,
        transcript: Arc<TranscriptClient>,
        llm: Arc<LlmService>,
        scorer: SentimentScorer,
        cache: CacheConfig,
    ) -> Self {
        let aggregator = Aggregator::new(scorer.clone());
        Self {
            database,
            youtube,
            transcript,
            llm,
            scorer,
            aggregator,
            cache,
        }
    }

    /// Aggregate stored comments into the per-video summary, no LLM involved
    pub async fn summary(&self, video_id: &str) -> Result<VideoSummary> {
        require_video_id(video_id)?;
        let comments = self.database.find_comments(video_id).await?;
        info!(
            "📚 Aggregating {} stored comments for video {}",
            comments.len(),
            video_id
        );
        Ok(self.aggregator.summarize(&comments))
    }

    /// Build the creator wellbeing report: lexical metrics plus narrative
    pub async fn health_report(&self, video_id: &str) -> Result<HealthReport> {
        require_video_id(video_id)?;
        let cache_key = format!("health_{video_id}");

        if let Some(entry) = self.database.get_cache(&cache_key).await? {
            if let Ok(mut report) = serde_json::from_value::<HealthReport>(entry.data) {
                info!("✅ Returning cached health report for video {}", video_id);
                report.cached = true;
                return Ok(report);
            }
            // A stale shape in the cache is treated as a miss
            warn!("Cached health report for {} has an unreadable shape", video_id);
        }

        let comments = self.database.find_comments(video_id).await?;
        info!(
            "🔍 Analyzing creator health for video {} ({} comments)",
            video_id,
            comments.len()
        );

        let transcript = self.transcript.fetch_or_unavailable(video_id).await;
        let transcript_text = transcript.text().unwrap_or_default().to_string();
        let transcript_analysis = self.scorer.analyze(&transcript_text);
        let audience = self.aggregator.summarize(&comments).patterns;

        let metrics = HealthMetrics {
            transcript_sentiment: TranscriptSentiment {
                sentiment: transcript_analysis.sentiment,
                score: transcript_analysis.score,
                stress_level: transcript_analysis.patterns.burnout_risk,
                positive_patterns: transcript_analysis.matches.positive_emotions.clone(),
                negative_patterns: transcript_analysis.matches.negative_emotions.clone(),
                stress_signals: transcript_analysis.matches.burnout.clone(),
            },
            comment_sentiment: CommentSentiment {
                average: audience.emotional_state,
                stress_level: audience.burnout_risk,
                total_comments: comments.len(),
            },
            transcript_available: matches!(transcript, TranscriptOutcome::Available(_)),
        };

        let prompt = health_prompt(&transcript, &transcript_analysis, &audience, &comments);
        let report = match self
            .llm
            .complete(
                ReportPrompts::health_system(),
                &prompt,
                CompletionParams {
                    temperature: 0.7,
                    max_tokens: 1500,
                },
            )
            .await
        {
            Ok(completion) => HealthReport {
                video_id: video_id.to_string(),
                metrics,
                narrative: Some(completion.text),
                narrative_error: None,
                model: Some(completion.model),
                cached: false,
            },
            Err(err) => {
                // Metrics still go out; the narrative failure stays visible
                warn!("⚠️ Narrative generation failed for {}: {}", video_id, err);
                HealthReport {
                    video_id: video_id.to_string(),
                    metrics,
                    narrative: None,
                    narrative_error: Some(err.to_string()),
                    model: None,
                    cached: false,
                }
            }
        };

        // Only successful narratives are worth caching; a failed report
        // should be retried on the next request
        if report.narrative.is_some() {
            let data = serde_json::to_value(&report)?;
            self.database
                .put_cache(&cache_key, &data, self.cache.health_report_ttl_hours)
                .await?;
        }

        Ok(report)
    }

    /// Generate the LLM content analysis for one video
    pub async fn content_analysis(&self, video_id: &str) -> Result<ContentAnalysis> {
        require_video_id(video_id)?;
        let cache_key = format!("analysis_{video_id}");

        if let Some(entry) = self.database.get_cache(&cache_key).await? {
            if let Ok(mut analysis) = serde_json::from_value::<ContentAnalysis>(entry.data) {
                info!("✅ Returning cached content analysis for video {}", video_id);
                analysis.cached = true;
                return Ok(analysis);
            }
            warn!(
                "Cached content analysis for {} has an unreadable shape",
                video_id
            );
        }

        let details = self.youtube.video_details(video_id).await?;
        let comments = self.database.find_comments(video_id).await?;
        let transcript = self.transcript.fetch_or_unavailable(video_id).await;

        let distribution = self.aggregator.summarize(&comments).sentiment_distribution;

        let mut values = HashMap::new();
        values.insert("title".to_string(), details.title);
        values.insert("channel".to_string(), details.channel);
        values.insert("views".to_string(), details.views.to_string());
        values.insert("likes".to_string(), details.likes.to_string());
        values.insert("subscribers".to_string(), details.subscribers.to_string());
        values.insert("comment_count".to_string(), comments.len().to_string());
        values.insert(
            "positive_count".to_string(),
            distribution.positive.to_string(),
        );
        values.insert("neutral_count".to_string(), distribution.neutral.to_string());
        values.insert(
            "negative_count".to_string(),
            distribution.negative.to_string(),
        );
        values.insert(
            "transcript".to_string(),
            match &transcript {
                // Keep the prompt inside token limits
                TranscriptOutcome::Available(text) => excerpt(text, 6000),
                TranscriptOutcome::Unavailable(reason) => {
                    format!("No transcript available. Reason: {reason}")
                }
            },
        );

        let prompt = ReportPrompts::content_analysis().render(&values);
        let completion = self
            .llm
            .complete(
                ReportPrompts::content_analysis_system(),
                &prompt,
                CompletionParams {
                    temperature: 0.5,
                    max_tokens: 1500,
                },
            )
            .await?;

        let analysis = ContentAnalysis {
            video_id: video_id.to_string(),
            analysis: completion.text,
            model: completion.model,
            comment_count: comments.len(),
            transcript_available: matches!(transcript, TranscriptOutcome::Available(_)),
            cached: false,
        };

        let data = serde_json::to_value(&analysis)?;
        self.database
            .put_cache(&cache_key, &data, self.cache.analysis_ttl_hours)
            .await?;

        Ok(analysis)
    }

    /// Answer a creator question against whatever context was provided
    pub async fn chat(&self, context: &ChatContext) -> Result<ChatAnswer> {
        if context.question.trim().is_empty() {
            return Err(TubePulseError::InvalidRequest(
                "question is required".to_string(),
            ));
        }

        let mut values = HashMap::new();
        values.insert(
            "transcript_status".to_string(),
            match &context.transcript {
                Some(text) if !text.trim().is_empty() => {
                    format!("Available ({} characters)", text.len())
                }
                _ => "No transcript available.".to_string(),
            },
        );
        values.insert(
            "sentiment_status".to_string(),
            context.sentiment.map_or_else(
                || "No sentiment data available.".to_string(),
                |s| {
                    format!(
                        "Sentiment analysis: {}% positive, {}% neutral, {}% negative.",
                        s.positive, s.neutral, s.negative
                    )
                },
            ),
        );
        values.insert(
            "analysis_status".to_string(),
            match &context.analysis {
                Some(text) if !text.trim().is_empty() => {
                    format!("Available ({} characters)", text.len())
                }
                _ => "No analysis available.".to_string(),
            },
        );

        let system = ReportPrompts::chat_system().render(&values);
        let completion = self
            .llm
            .complete(
                &system,
                &context.question,
                CompletionParams {
                    temperature: 0.7,
                    max_tokens: 800,
                },
            )
            .await?;

        Ok(ChatAnswer {
            answer: completion.text,
            model: completion.model,
        })
    }
}

/// Reject absent identifiers up front; nothing downstream retries these
fn require_video_id(video_id: &str) -> Result<()> {
    if video_id.trim().is_empty() {
        return Err(TubePulseError::InvalidRequest(
            "video_id must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Render the health-report user prompt from the local analysis
fn health_prompt(
    transcript: &TranscriptOutcome,
    transcript_analysis: &TextAnalysis,
    audience: &crate::sentiment::PatternAverages,
    comments: &[Comment],
) -> String {
    let mut values = HashMap::new();
    values.insert(
        "transcript_sentiment".to_string(),
        transcript_analysis.sentiment.to_string(),
    );
    values.insert(
        "emotional_state".to_string(),
        format!("{:.2}", transcript_analysis.patterns.emotional_state),
    );
    values.insert(
        "burnout_risk".to_string(),
        format!("{:.2}", transcript_analysis.patterns.burnout_risk),
    );
    values.insert(
        "work_life_balance".to_string(),
        format!("{:.2}", transcript_analysis.patterns.work_life_balance),
    );
    values.insert(
        "positive_emotions".to_string(),
        transcript_analysis.matches.positive_emotions.join(", "),
    );
    values.insert(
        "negative_emotions".to_string(),
        transcript_analysis.matches.negative_emotions.join(", "),
    );
    values.insert(
        "awareness_terms".to_string(),
        transcript_analysis.matches.mental_health_awareness.join(", "),
    );
    values.insert(
        "warning_terms".to_string(),
        transcript_analysis.matches.mental_health_warning.join(", "),
    );
    values.insert(
        "resilience_terms".to_string(),
        transcript_analysis.matches.resilience.join(", "),
    );
    values.insert("comment_count".to_string(), comments.len().to_string());
    values.insert(
        "community_support".to_string(),
        format!("{:.2}", audience.community_support),
    );
    values.insert(
        "audience_emotional_state".to_string(),
        format!("{:.2}", audience.emotional_state),
    );
    values.insert(
        "audience_awareness".to_string(),
        format!("{:.2}", audience.mental_health_awareness),
    );
    values.insert(
        "transcript_section".to_string(),
        match transcript {
            TranscriptOutcome::Available(text) => {
                format!("TRANSCRIPT EXCERPT:\n\"{}...\"", excerpt(text, 1000))
            }
            TranscriptOutcome::Unavailable(reason) => {
                format!("No transcript available. Reason: {reason}")
            }
        },
    );
    values.insert(
        "comments_section".to_string(),
        if comments.is_empty() {
            "No comments available".to_string()
        } else {
            let samples: Vec<String> = comments
                .iter()
                .take(10)
                .map(|c| format!("- \"{}\"", c.text))
                .collect();
            format!(
                "SAMPLE COMMENTS (from {} total):\n{}",
                comments.len(),
                samples.join("\n")
            )
        },
    );
    values.insert(
        "transcript_note".to_string(),
        match transcript {
            TranscriptOutcome::Available(_) => "Full transcript was analyzed.".to_string(),
            TranscriptOutcome::Unavailable(_) => {
                "No transcript was available for this video. The analysis is based \
                 primarily on audience comments."
                    .to_string()
            }
        },
    );

    ReportPrompts::health_report().render(&values)
}

/// First `max_chars` characters of a text, on a character boundary
fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::PatternAverages;
    use crate::sentiment::SentimentScorer;

    #[test]
    fn test_health_prompt_with_transcript() {
        let scorer = SentimentScorer::default();
        let transcript_text = "I am exhausted but grateful for this community";
        let analysis = scorer.analyze(transcript_text);
        let transcript = TranscriptOutcome::Available(transcript_text.to_string());

        let prompt = health_prompt(&transcript, &analysis, &PatternAverages::default(), &[]);
        assert!(prompt.contains("TRANSCRIPT EXCERPT"));
        assert!(prompt.contains("exhausted"));
        assert!(prompt.contains("No comments available"));
        assert!(prompt.contains("Full transcript was analyzed."));
    }

    #[test]
    fn test_health_prompt_without_transcript() {
        let scorer = SentimentScorer::default();
        let analysis = scorer.analyze("");
        let transcript = TranscriptOutcome::Unavailable("no captions".to_string());

        let prompt = health_prompt(&transcript, &analysis, &PatternAverages::default(), &[]);
        assert!(prompt.contains("No transcript available. Reason: no captions"));
        assert!(prompt.contains("primarily on audience comments"));
    }

    #[test]
    fn test_excerpt_bounds() {
        assert_eq!(excerpt("hello", 2), "he");
        assert_eq!(excerpt("hello", 100), "hello");
    }
}
