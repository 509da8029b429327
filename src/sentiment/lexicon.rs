//! Static indicator dictionaries
//!
//! Each category is a fixed set of keywords and two-word phrases. Entries are
//! passed through the same normalizer as scored text when the `Lexicon` is
//! built, so hyphenated entries like `self-care` match the bigram the
//! tokenizer produces for them.

use std::collections::HashSet;

use super::normalize::tokenize;

/// Emotional and wellbeing indicator keywords, positive side
const POSITIVE_EMOTIONS: &[&str] = &[
    "happy",
    "great",
    "awesome",
    "excellent",
    "love",
    "amazing",
    "excited",
    "passionate",
    "energetic",
    "grateful",
    "joy",
    "wonderful",
    "fun",
    "positive",
    "inspired",
    "proud",
    "confident",
    "motivated",
    "enthusiastic",
    "peaceful",
    "satisfied",
    "accomplished",
];

const ENGAGEMENT: &[&str] = &[
    "connect",
    "share",
    "help",
    "support",
    "community",
    "together",
    "collaboration",
    "feedback",
    "interaction",
    "discussion",
    "conversation",
    "engagement",
];

const RESILIENCE: &[&str] = &[
    "overcome",
    "learn",
    "grow",
    "improve",
    "adapt",
    "progress",
    "develop",
    "balance",
    "mindful",
    "self-care",
    "rest",
    "recharge",
    "boundaries",
];

const NEGATIVE_EMOTIONS: &[&str] = &[
    "sad",
    "bad",
    "awful",
    "terrible",
    "hate",
    "angry",
    "frustrated",
    "depressed",
    "unhappy",
    "anxious",
    "worried",
    "scared",
    "lonely",
    "hopeless",
    "overwhelmed",
    "discouraged",
    "disappointed",
    "insecure",
    "inadequate",
    "worthless",
];

const BURNOUT: &[&str] = &[
    "exhausted",
    "drained",
    "tired",
    "burnt",
    "overworked",
    "stressed",
    "pressure",
    "deadline",
    "behind",
    "struggle",
    "failing",
    "quit",
];

const ISOLATION: &[&str] = &[
    "alone",
    "isolated",
    "disconnected",
    "ignored",
    "rejected",
    "misunderstood",
    "unsupported",
    "abandoned",
    "excluded",
    "distant",
];

const WORK_LIFE_POSITIVE: &[&str] = &[
    "break",
    "vacation",
    "rest",
    "relax",
    "family",
    "friends",
    "hobby",
    "exercise",
    "sleep",
    "meditation",
    "balance",
    "boundaries",
    "schedule",
    "routine",
];

const WORK_LIFE_NEGATIVE: &[&str] = &[
    "overwork",
    "nonstop",
    "always",
    "constant",
    "never",
    "sacrifice",
    "miss",
    "cancel",
    "postpone",
    "delay",
    "neglect",
    "ignore",
];

const MENTAL_HEALTH_AWARENESS: &[&str] = &[
    "therapy",
    "counseling",
    "mental health",
    "self-care",
    "wellbeing",
    "support",
    "help",
    "professional",
    "treatment",
    "recovery",
    "healing",
];

const MENTAL_HEALTH_WARNING: &[&str] = &[
    "anxiety",
    "depression",
    "panic",
    "crisis",
    "breakdown",
    "burnout",
    "trauma",
    "stress",
    "pressure",
    "overwhelming",
    "suicide",
    "self-harm",
];

/// Words excluded from the word-frequency trend tables
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "but", "or", "for", "nor", "on", "at", "to", "by", "is", "are", "am",
    "was", "were", "be", "been", "being", "in", "of", "that", "this", "these", "those", "it",
    "its", "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "yours", "he",
    "him", "his", "she", "her", "hers", "they", "them", "their", "theirs", "what", "which", "who",
    "whom", "whose", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "some", "such", "no", "not", "only", "own", "same", "so", "than", "too", "very",
    "can", "will", "just", "should", "now", "with", "as", "from", "have", "has", "had",
];

/// The indicator dictionaries the scorer matches against
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub positive_emotions: HashSet<String>,
    pub engagement: HashSet<String>,
    pub resilience: HashSet<String>,
    pub negative_emotions: HashSet<String>,
    pub burnout: HashSet<String>,
    pub isolation: HashSet<String>,
    pub work_life_positive: HashSet<String>,
    pub work_life_negative: HashSet<String>,
    pub mental_health_awareness: HashSet<String>,
    pub mental_health_warning: HashSet<String>,
    stop_words: HashSet<&'static str>,
}

impl Lexicon {
    /// Whether a token is on the fixed stop-word list
    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive_emotions: normalize_terms(POSITIVE_EMOTIONS),
            engagement: normalize_terms(ENGAGEMENT),
            resilience: normalize_terms(RESILIENCE),
            negative_emotions: normalize_terms(NEGATIVE_EMOTIONS),
            burnout: normalize_terms(BURNOUT),
            isolation: normalize_terms(ISOLATION),
            work_life_positive: normalize_terms(WORK_LIFE_POSITIVE),
            work_life_negative: normalize_terms(WORK_LIFE_NEGATIVE),
            mental_health_awareness: normalize_terms(MENTAL_HEALTH_AWARENESS),
            mental_health_warning: normalize_terms(MENTAL_HEALTH_WARNING),
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }
}

/// Run dictionary entries through the text tokenizer so both sides of a
/// membership test share one normal form
fn normalize_terms(terms: &[&str]) -> HashSet<String> {
    terms.iter().map(|term| tokenize(term).join(" ")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphenated_entries_normalize_to_bigrams() {
        let lexicon = Lexicon::default();
        assert!(lexicon.resilience.contains("self care"));
        assert!(lexicon.mental_health_warning.contains("self harm"));
        assert!(lexicon.mental_health_awareness.contains("mental health"));
    }

    #[test]
    fn test_single_word_entries_survive_normalization() {
        let lexicon = Lexicon::default();
        assert!(lexicon.positive_emotions.contains("love"));
        assert!(lexicon.burnout.contains("exhausted"));
        assert!(lexicon.work_life_negative.contains("overwork"));
    }

    #[test]
    fn test_category_sizes() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.positive_emotions.len(), 22);
        assert_eq!(lexicon.engagement.len(), 12);
        assert_eq!(lexicon.resilience.len(), 13);
        assert_eq!(lexicon.negative_emotions.len(), 20);
        assert_eq!(lexicon.burnout.len(), 12);
        assert_eq!(lexicon.isolation.len(), 10);
        assert_eq!(lexicon.work_life_positive.len(), 14);
        assert_eq!(lexicon.work_life_negative.len(), 12);
        assert_eq!(lexicon.mental_health_awareness.len(), 11);
        assert_eq!(lexicon.mental_health_warning.len(), 12);
    }

    #[test]
    fn test_stop_words() {
        let lexicon = Lexicon::default();
        assert!(lexicon.is_stop_word("the"));
        assert!(lexicon.is_stop_word("very"));
        assert!(!lexicon.is_stop_word("creator"));
    }
}
