//! Text normalization: lowercase word tokens and adjacent-word bigrams

/// Split text into lowercase word tokens.
///
/// A token is a non-empty run of Unicode alphanumeric characters; everything
/// else separates tokens. Empty or whitespace-only input yields an empty
/// vector, never an error.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join consecutive tokens into two-word phrases separated by one space.
#[must_use]
pub fn bigrams(tokens: &[String]) -> Vec<String> {
    tokens
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits_punctuation() {
        let tokens = tokenize("I love this, it's amazing and wonderful!");
        assert_eq!(
            tokens,
            vec!["i", "love", "this", "it", "s", "amazing", "and", "wonderful"]
        );
    }

    #[test]
    fn test_tokenize_empty_and_whitespace() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t  ").is_empty());
        assert!(tokenize("!!! ... ???").is_empty());
    }

    #[test]
    fn test_tokenize_unicode() {
        let tokens = tokenize("Schön großartig! 最高です");
        assert_eq!(tokens, vec!["schön", "großartig", "最高です"]);
    }

    #[test]
    fn test_bigrams_adjacent_pairs() {
        let tokens = tokenize("mental health matters");
        assert_eq!(bigrams(&tokens), vec!["mental health", "health matters"]);
    }

    #[test]
    fn test_bigrams_short_input() {
        assert!(bigrams(&[]).is_empty());
        assert!(bigrams(&["one".to_string()]).is_empty());
    }
}
