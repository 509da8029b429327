//! Per-video aggregation of comment-level results
//!
//! Everything here is a full recomputation over the stored comment set for
//! one video: deterministic, order-independent, and safe on empty input.

use std::collections::BTreeMap;
use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use super::normalize::tokenize;
use super::scorer::SentimentScorer;
use crate::models::Comment;
use crate::models::Sentiment;

/// Comment counts per sentiment label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentDistribution {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Whole-number percentage view, rounded half-up per bucket
    #[must_use]
    pub fn percentages(&self) -> SentimentPercentages {
        let total = self.total();
        let pct = |count: usize| {
            if total == 0 {
                0
            } else {
                (count as f64 / total as f64 * 100.0).round() as u32
            }
        };
        SentimentPercentages {
            positive: pct(self.positive),
            neutral: pct(self.neutral),
            negative: pct(self.negative),
        }
    }
}

/// Sentiment distribution expressed as rounded percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentPercentages {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

/// Engagement sums for one sentiment bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementBucket {
    pub votes: i64,
    pub hearted: i64,
    pub replies: i64,
}

/// Engagement sums across the three sentiment buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub positive: EngagementBucket,
    pub neutral: EngagementBucket,
    pub negative: EngagementBucket,
}

impl EngagementMetrics {
    fn bucket_mut(&mut self, sentiment: Sentiment) -> &mut EngagementBucket {
        match sentiment {
            Sentiment::Positive => &mut self.positive,
            Sentiment::Neutral => &mut self.neutral,
            Sentiment::Negative => &mut self.negative,
        }
    }
}

/// Comment counts per sentiment for one hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlySentiment {
    pub hour: u32,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl HourlySentiment {
    const fn empty(hour: u32) -> Self {
        Self {
            hour,
            positive: 0,
            neutral: 0,
            negative: 0,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Hour-of-day commenting histogram
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAnalysis {
    pub sentiment_over_time: Vec<HourlySentiment>,
    /// Hour with the most comments. Ties break toward the lowest hour: the
    /// histogram is scanned in ascending hour order and only a strictly
    /// larger total takes over.
    pub peak_commenting_hour: String,
}

/// One entry of a frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFrequency {
    pub term: String,
    pub count: usize,
}

/// Word, hashtag and emoji frequency tables for trend displays
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendTables {
    pub word_frequency: Vec<TermFrequency>,
    /// Top 50 words by count
    pub top_words: Vec<TermFrequency>,
    pub hashtag_frequency: Vec<TermFrequency>,
    pub emoji_frequency: Vec<TermFrequency>,
}

/// Mean pattern scores across a comment set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternAverages {
    pub total_comments: usize,
    pub emotional_state: f64,
    pub burnout_risk: f64,
    pub work_life_balance: f64,
    pub community_support: f64,
    pub mental_health_awareness: f64,
}

/// The full per-video aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSummary {
    pub sentiment_distribution: SentimentDistribution,
    pub engagement_metrics: EngagementMetrics,
    pub time_analysis: TimeAnalysis,
    pub trends: TrendTables,
    pub patterns: PatternAverages,
}

/// Aggregates per-comment analyses into per-video metrics
#[derive(Debug, Clone)]
pub struct Aggregator {
    scorer: SentimentScorer,
    hashtag_re: Regex,
    emoji_re: Regex,
}

impl Aggregator {
    /// Create an aggregator sharing the scorer's lexicon for stop words
    #[must_use]
    pub fn new(scorer: SentimentScorer) -> Self {
        Self {
            scorer,
            hashtag_re: Regex::new(r"#[^\s#]+").unwrap(),
            emoji_re: Regex::new(r"[\p{Emoji_Presentation}\p{Extended_Pictographic}]").unwrap(),
        }
    }

    /// Compute the full aggregate for one video's comment set
    #[must_use]
    pub fn summarize(&self, comments: &[Comment]) -> VideoSummary {
        let mut distribution = SentimentDistribution::default();
        let mut engagement = EngagementMetrics::default();
        let mut hours: BTreeMap<u32, HourlySentiment> = BTreeMap::new();
        let mut word_counts: HashMap<String, usize> = HashMap::new();
        let mut hashtag_counts: HashMap<String, usize> = HashMap::new();
        let mut emoji_counts: HashMap<String, usize> = HashMap::new();
        let mut pattern_sums = PatternAverages::default();

        for comment in comments {
            // Attribution uses the comment's own stored label
            let sentiment = comment.sentiment;
            match sentiment {
                Sentiment::Positive => distribution.positive += 1,
                Sentiment::Neutral => distribution.neutral += 1,
                Sentiment::Negative => distribution.negative += 1,
            }

            let bucket = engagement.bucket_mut(sentiment);
            bucket.votes += comment.votes;
            bucket.hearted += i64::from(comment.hearted);
            bucket.replies += comment.replies;

            let hour = comment.activity_hour();
            let slot = hours.entry(hour).or_insert_with(|| HourlySentiment::empty(hour));
            match sentiment {
                Sentiment::Positive => slot.positive += 1,
                Sentiment::Neutral => slot.neutral += 1,
                Sentiment::Negative => slot.negative += 1,
            }

            for word in tokenize(&comment.text) {
                if !self.scorer.lexicon().is_stop_word(&word) {
                    *word_counts.entry(word).or_insert(0) += 1;
                }
            }
            for hashtag in self.hashtag_re.find_iter(&comment.text) {
                *hashtag_counts.entry(hashtag.as_str().to_string()).or_insert(0) += 1;
            }
            for emoji in self.emoji_re.find_iter(&comment.text) {
                *emoji_counts.entry(emoji.as_str().to_string()).or_insert(0) += 1;
            }

            let analysis = self.scorer.analyze(&comment.text);
            pattern_sums.emotional_state += analysis.patterns.emotional_state;
            pattern_sums.burnout_risk += analysis.patterns.burnout_risk;
            pattern_sums.work_life_balance += analysis.patterns.work_life_balance;
            pattern_sums.community_support += analysis.patterns.community_support;
            pattern_sums.mental_health_awareness += analysis.patterns.mental_health_awareness;
        }

        let word_frequency = into_sorted_table(word_counts);
        let top_words: Vec<TermFrequency> = word_frequency.iter().take(50).cloned().collect();

        VideoSummary {
            sentiment_distribution: distribution,
            engagement_metrics: engagement,
            time_analysis: time_analysis(&hours),
            trends: TrendTables {
                word_frequency,
                top_words,
                hashtag_frequency: into_sorted_table(hashtag_counts),
                emoji_frequency: into_sorted_table(emoji_counts),
            },
            patterns: average_patterns(pattern_sums, comments.len()),
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(SentimentScorer::default())
    }
}

/// Build the histogram view and pick the peak hour
fn time_analysis(hours: &BTreeMap<u32, HourlySentiment>) -> TimeAnalysis {
    let mut peak_hour = 0u32;
    let mut peak_total = 0usize;
    // Ascending hour scan; strictly-greater keeps the lowest hour on ties
    for (hour, slot) in hours {
        if slot.total() > peak_total {
            peak_total = slot.total();
            peak_hour = *hour;
        }
    }

    TimeAnalysis {
        sentiment_over_time: hours.values().copied().collect(),
        peak_commenting_hour: peak_hour.to_string(),
    }
}

/// Sort a frequency map by descending count, then term, for stable output
fn into_sorted_table(counts: HashMap<String, usize>) -> Vec<TermFrequency> {
    let mut table: Vec<TermFrequency> = counts
        .into_iter()
        .map(|(term, count)| TermFrequency { term, count })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    table
}

fn average_patterns(sums: PatternAverages, count: usize) -> PatternAverages {
    if count == 0 {
        // Zero comments must produce zero averages, not a division by zero
        return PatternAverages::default();
    }
    let n = count as f64;
    PatternAverages {
        total_comments: count,
        emotional_state: sums.emotional_state / n,
        burnout_risk: sums.burnout_risk / n,
        work_life_balance: sums.work_life_balance / n,
        community_support: sums.community_support / n,
        mental_health_awareness: sums.mental_health_awareness / n,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn comment(text: &str, sentiment: Sentiment, hour: u32) -> Comment {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, hour, 15, 0).unwrap();
        Comment {
            id: Uuid::new_v4(),
            video_id: "vid123".to_string(),
            text: text.to_string(),
            votes: 0,
            hearted: false,
            replies: 0,
            published_at: at,
            sentiment,
            sentiment_score: None,
            recorded_at: at,
        }
    }

    #[test]
    fn test_distribution_partitions_comment_set() {
        let mut comments = Vec::new();
        for _ in 0..6 {
            comments.push(comment("great video", Sentiment::Positive, 10));
        }
        for _ in 0..3 {
            comments.push(comment("ok", Sentiment::Neutral, 10));
        }
        comments.push(comment("bad take", Sentiment::Negative, 10));

        let summary = Aggregator::default().summarize(&comments);
        let dist = summary.sentiment_distribution;
        assert_eq!(dist.positive, 6);
        assert_eq!(dist.neutral, 3);
        assert_eq!(dist.negative, 1);
        assert_eq!(dist.total(), comments.len());

        let pct = dist.percentages();
        assert_eq!(pct.positive, 60);
        assert_eq!(pct.neutral, 30);
        assert_eq!(pct.negative, 10);
    }

    #[test]
    fn test_engagement_attributed_to_own_bucket() {
        let mut positive = comment("love it", Sentiment::Positive, 12);
        positive.votes = 5;
        positive.hearted = true;
        positive.replies = 2;
        let neutral = comment("fine", Sentiment::Neutral, 12);

        let summary = Aggregator::default().summarize(&[positive, neutral]);
        let bucket = summary.engagement_metrics.positive;
        assert_eq!(bucket.votes, 5);
        assert_eq!(bucket.hearted, 1);
        assert_eq!(bucket.replies, 2);
        assert_eq!(summary.engagement_metrics.neutral, EngagementBucket::default());
        assert_eq!(summary.engagement_metrics.negative, EngagementBucket::default());
    }

    #[test]
    fn test_peak_commenting_hour() {
        let comments = vec![
            comment("a", Sentiment::Neutral, 14),
            comment("b", Sentiment::Neutral, 14),
            comment("c", Sentiment::Neutral, 9),
        ];
        let summary = Aggregator::default().summarize(&comments);
        assert_eq!(summary.time_analysis.peak_commenting_hour, "14");
        assert_eq!(summary.time_analysis.sentiment_over_time.len(), 2);
        // Histogram is reported in ascending hour order
        assert_eq!(summary.time_analysis.sentiment_over_time[0].hour, 9);
    }

    #[test]
    fn test_peak_hour_tie_breaks_to_lowest_hour() {
        let comments = vec![
            comment("a", Sentiment::Neutral, 21),
            comment("b", Sentiment::Neutral, 7),
        ];
        let summary = Aggregator::default().summarize(&comments);
        assert_eq!(summary.time_analysis.peak_commenting_hour, "7");
    }

    #[test]
    fn test_stop_words_never_counted() {
        let comments = vec![comment("the video was very good and the edit was good", Sentiment::Positive, 8)];
        let summary = Aggregator::default().summarize(&comments);
        for entry in &summary.trends.word_frequency {
            assert!(
                !["the", "was", "very", "and"].contains(&entry.term.as_str()),
                "stop word {} leaked into word frequency",
                entry.term
            );
        }
        let good = summary
            .trends
            .word_frequency
            .iter()
            .find(|e| e.term == "good")
            .expect("content word missing");
        assert_eq!(good.count, 2);
    }

    #[test]
    fn test_hashtags_and_emoji_extracted() {
        let comments = vec![
            comment("loving this #creatorlife 🔥🔥", Sentiment::Positive, 8),
            comment("#creatorlife forever 🔥", Sentiment::Positive, 9),
        ];
        let summary = Aggregator::default().summarize(&comments);
        assert_eq!(
            summary.trends.hashtag_frequency,
            vec![TermFrequency {
                term: "#creatorlife".to_string(),
                count: 2
            }]
        );
        assert_eq!(
            summary.trends.emoji_frequency,
            vec![TermFrequency {
                term: "🔥".to_string(),
                count: 3
            }]
        );
    }

    #[test]
    fn test_top_words_truncated_to_fifty() {
        let text: String = (0..80).map(|i| format!("word{i} ")).collect();
        let comments = vec![comment(&text, Sentiment::Neutral, 8)];
        let summary = Aggregator::default().summarize(&comments);
        assert_eq!(summary.trends.top_words.len(), 50);
        assert_eq!(summary.trends.word_frequency.len(), 80);
    }

    #[test]
    fn test_pattern_averages() {
        let comments = vec![
            comment("love this", Sentiment::Positive, 8),
            comment("", Sentiment::Neutral, 8),
        ];
        let summary = Aggregator::default().summarize(&comments);
        // First comment scores 1/2, second 0; mean is 1/4
        assert_eq!(summary.patterns.emotional_state, 0.25);
        assert_eq!(summary.patterns.total_comments, 2);
    }

    #[test]
    fn test_empty_comment_set_is_all_zero() {
        let summary = Aggregator::default().summarize(&[]);
        assert_eq!(summary.sentiment_distribution.total(), 0);
        assert_eq!(summary.sentiment_distribution.percentages(), SentimentPercentages::default());
        assert_eq!(summary.patterns, PatternAverages::default());
        assert_eq!(summary.time_analysis.peak_commenting_hour, "0");
        assert!(summary.trends.word_frequency.is_empty());
    }

    #[test]
    fn test_permutation_invariance() {
        let mut comments = vec![
            comment("love this #fire 🔥", Sentiment::Positive, 14),
            comment("tired of waiting", Sentiment::Negative, 9),
            comment("ok video", Sentiment::Neutral, 14),
            comment("amazing work, so proud", Sentiment::Positive, 3),
        ];
        let forward = Aggregator::default().summarize(&comments);
        comments.reverse();
        let backward = Aggregator::default().summarize(&comments);

        assert_eq!(forward.sentiment_distribution, backward.sentiment_distribution);
        assert_eq!(forward.engagement_metrics, backward.engagement_metrics);
        assert_eq!(forward.time_analysis, backward.time_analysis);
        assert_eq!(forward.trends, backward.trends);
        assert_eq!(forward.patterns, backward.patterns);
    }
}
