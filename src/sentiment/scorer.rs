//! Single-text scoring against the indicator dictionaries

use serde::Deserialize;
use serde::Serialize;

use super::lexicon::Lexicon;
use super::normalize::bigrams;
use super::normalize::tokenize;
use crate::models::Sentiment;

/// Normalized per-word pattern signals for one text
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternScores {
    pub emotional_state: f64,
    pub burnout_risk: f64,
    pub work_life_balance: f64,
    pub community_support: f64,
    pub mental_health_awareness: f64,
}

/// Matched indicator terms per category, deduplicated in first-seen order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorMatches {
    pub positive_emotions: Vec<String>,
    pub negative_emotions: Vec<String>,
    pub engagement: Vec<String>,
    pub burnout: Vec<String>,
    pub isolation: Vec<String>,
    pub resilience: Vec<String>,
    pub work_life_positive: Vec<String>,
    pub work_life_negative: Vec<String>,
    pub mental_health_awareness: Vec<String>,
    pub mental_health_warning: Vec<String>,
}

/// The result of scoring one text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub sentiment: Sentiment,
    /// Continuous polarity score in [-1, 1]
    pub score: f64,
    pub word_count: usize,
    pub patterns: PatternScores,
    pub matches: IndicatorMatches,
}

impl TextAnalysis {
    /// Neutral zero-signal result, used for empty input
    fn neutral() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            score: 0.0,
            word_count: 0,
            patterns: PatternScores::default(),
            matches: IndicatorMatches::default(),
        }
    }
}

#[derive(Debug, Default)]
struct CategoryCounts {
    positive_emotions: usize,
    negative_emotions: usize,
    engagement: usize,
    burnout: usize,
    isolation: usize,
    resilience: usize,
    work_life_positive: usize,
    work_life_negative: usize,
    mental_health_awareness: usize,
    mental_health_warning: usize,
}

/// Dictionary-driven sentiment scorer
///
/// Pure function of text and lexicon: the same input always produces the
/// same analysis, which is what makes caching of downstream aggregates sound.
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer {
    lexicon: Lexicon,
}

impl SentimentScorer {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score one text across every indicator category
    #[must_use]
    pub fn analyze(&self, text: &str) -> TextAnalysis {
        let words = tokenize(text);
        if words.is_empty() {
            return TextAnalysis::neutral();
        }
        let pairs = bigrams(&words);

        let mut counts = CategoryCounts::default();
        let mut matches = IndicatorMatches::default();

        for term in words.iter().chain(pairs.iter()) {
            if self.lexicon.positive_emotions.contains(term) {
                counts.positive_emotions += 1;
                record(&mut matches.positive_emotions, term);
            }
            if self.lexicon.negative_emotions.contains(term) {
                counts.negative_emotions += 1;
                record(&mut matches.negative_emotions, term);
            }
            if self.lexicon.engagement.contains(term) {
                counts.engagement += 1;
                record(&mut matches.engagement, term);
            }
            if self.lexicon.burnout.contains(term) {
                counts.burnout += 1;
                record(&mut matches.burnout, term);
            }
            if self.lexicon.isolation.contains(term) {
                counts.isolation += 1;
                record(&mut matches.isolation, term);
            }
            if self.lexicon.resilience.contains(term) {
                counts.resilience += 1;
                record(&mut matches.resilience, term);
            }
            if self.lexicon.work_life_positive.contains(term) {
                counts.work_life_positive += 1;
                record(&mut matches.work_life_positive, term);
            }
            if self.lexicon.work_life_negative.contains(term) {
                counts.work_life_negative += 1;
                record(&mut matches.work_life_negative, term);
            }
            if self.lexicon.mental_health_awareness.contains(term) {
                counts.mental_health_awareness += 1;
                record(&mut matches.mental_health_awareness, term);
            }
            if self.lexicon.mental_health_warning.contains(term) {
                counts.mental_health_warning += 1;
                record(&mut matches.mental_health_warning, term);
            }
        }

        let total = words.len() as f64;
        let patterns = PatternScores {
            emotional_state: (counts.positive_emotions as f64 - counts.negative_emotions as f64)
                / total,
            burnout_risk: (counts.burnout + counts.work_life_negative) as f64 / total,
            work_life_balance: (counts.work_life_positive as f64
                - counts.work_life_negative as f64)
                / total,
            community_support: (counts.engagement as f64 - counts.isolation as f64) / total,
            mental_health_awareness: counts.mental_health_awareness as f64 / total,
        };

        // Strict sign test, no deadband: exactly zero reads as neutral
        let sentiment = if patterns.emotional_state > 0.0 {
            Sentiment::Positive
        } else if patterns.emotional_state < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };

        TextAnalysis {
            sentiment,
            score: patterns.emotional_state.clamp(-1.0, 1.0),
            word_count: words.len(),
            patterns,
            matches,
        }
    }
}

/// Record a matched term once, keeping first-seen order
fn record(found: &mut Vec<String>, term: &str) {
    if !found.iter().any(|t| t == term) {
        found.push(term.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> SentimentScorer {
        SentimentScorer::default()
    }

    #[test]
    fn test_positive_text() {
        let analysis = scorer().analyze("I love this, it's amazing and wonderful!");
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert!(analysis.score > 0.0);
        assert!(analysis.matches.positive_emotions.len() >= 2);
        assert!(analysis
            .matches
            .positive_emotions
            .contains(&"love".to_string()));
    }

    #[test]
    fn test_empty_text_is_neutral_zero() {
        let analysis = scorer().analyze("");
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.score, 0.0);
        assert_eq!(analysis.word_count, 0);
        assert_eq!(analysis.patterns, PatternScores::default());
        assert!(analysis.matches.positive_emotions.is_empty());
        assert!(analysis.matches.burnout.is_empty());
    }

    #[test]
    fn test_whitespace_only_is_neutral_zero() {
        let analysis = scorer().analyze("   \n\t ");
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.score, 0.0);
    }

    #[test]
    fn test_negative_text() {
        let analysis = scorer().analyze("so tired and exhausted, everything is terrible");
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert!(analysis.score < 0.0);
        assert!(analysis.patterns.burnout_risk > 0.0);
        assert!(analysis.matches.burnout.contains(&"tired".to_string()));
        assert!(analysis.matches.burnout.contains(&"exhausted".to_string()));
    }

    #[test]
    fn test_mixed_text_with_zero_balance_is_neutral() {
        // One positive emotion, one negative emotion
        let analysis = scorer().analyze("happy but sad");
        assert_eq!(analysis.patterns.emotional_state, 0.0);
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_score_bounds() {
        for text in [
            "",
            "love love love love",
            "hate hate hate hate",
            "support help community together mental health self-care",
            "the quick brown fox",
        ] {
            let analysis = scorer().analyze(text);
            assert!(
                (-1.0..=1.0).contains(&analysis.score),
                "score {} out of bounds for {text:?}",
                analysis.score
            );
        }
    }

    #[test]
    fn test_bigram_phrase_match() {
        let analysis = scorer().analyze("talking about mental health openly");
        assert!(analysis
            .matches
            .mental_health_awareness
            .contains(&"mental health".to_string()));
        assert!(analysis.patterns.mental_health_awareness > 0.0);
    }

    #[test]
    fn test_hyphenated_phrase_match() {
        let analysis = scorer().analyze("remember self-care matters");
        assert!(analysis
            .matches
            .resilience
            .contains(&"self care".to_string()));
        assert!(analysis
            .matches
            .mental_health_awareness
            .contains(&"self care".to_string()));
    }

    #[test]
    fn test_burnout_risk_includes_work_life_negative() {
        // "exhausted" hits burnout, "nonstop" hits negative work-life
        let analysis = scorer().analyze("exhausted from working nonstop");
        assert_eq!(analysis.patterns.burnout_risk, 2.0 / 4.0);
    }

    #[test]
    fn test_community_support_subtracts_isolation() {
        let analysis = scorer().analyze("community support versus feeling alone");
        // engagement: community, support; isolation: alone; five words total
        assert_eq!(analysis.patterns.community_support, (2.0 - 1.0) / 5.0);
    }

    #[test]
    fn test_matched_terms_deduplicated() {
        let analysis = scorer().analyze("love love love");
        assert_eq!(analysis.matches.positive_emotions, vec!["love"]);
        // Counts still reflect every hit
        assert_eq!(analysis.patterns.emotional_state, 1.0);
    }

    #[test]
    fn test_determinism() {
        let text = "grateful for this amazing community but a bit tired";
        let a = scorer().analyze(text);
        let b = scorer().analyze(text);
        assert_eq!(a.score, b.score);
        assert_eq!(a.sentiment, b.sentiment);
        assert_eq!(a.patterns, b.patterns);
        assert_eq!(a.matches.positive_emotions, b.matches.positive_emotions);
    }
}
