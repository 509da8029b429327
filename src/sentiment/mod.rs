//! Lexical sentiment and emotional-indicator scoring
//!
//! A deterministic, dictionary-driven text classifier. Free text is
//! normalized into word tokens and adjacent-word bigrams, matched against
//! static indicator dictionaries, and reduced to per-text pattern scores.
//! Per-video metrics are produced by aggregating many per-comment results.

mod aggregate;
mod lexicon;
mod normalize;
mod scorer;

pub use aggregate::Aggregator;
pub use aggregate::EngagementBucket;
pub use aggregate::EngagementMetrics;
pub use aggregate::HourlySentiment;
pub use aggregate::PatternAverages;
pub use aggregate::SentimentDistribution;
pub use aggregate::SentimentPercentages;
pub use aggregate::TermFrequency;
pub use aggregate::TimeAnalysis;
pub use aggregate::TrendTables;
pub use aggregate::VideoSummary;
pub use lexicon::Lexicon;
pub use normalize::bigrams;
pub use normalize::tokenize;
pub use scorer::IndicatorMatches;
pub use scorer::PatternScores;
pub use scorer::SentimentScorer;
pub use scorer::TextAnalysis;
