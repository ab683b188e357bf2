//! Text polarity scoring

use vader_sentiment::SentimentIntensityAnalyzer;

/// Continuous sentiment polarity estimate for one free-text string
///
/// Implementations return a value in `[-1.0, 1.0]`; 0.0 means neutral or
/// indeterminate, including empty text.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Lexicon-backed scorer using the VADER compound polarity
///
/// The analyzer borrows the crate's static lexicon, so constructing one is
/// cheap.
pub struct LexiconScorer {}

impl LexiconScorer {
    /// Create a scorer with the bundled lexicon
    pub fn new() -> Self {
        Self {}
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let analyzer = SentimentIntensityAnalyzer::new();
        analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_neutral() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score(""), 0.0);
    }

    #[test]
    fn test_polarity_direction() {
        let scorer = LexiconScorer::new();

        let positive = scorer.score("This stock is amazing, great earnings, I love it");
        let negative = scorer.score("Terrible results, awful guidance, huge losses");

        assert!(positive > 0.0);
        assert!(negative < 0.0);
        assert!((-1.0..=1.0).contains(&positive));
        assert!((-1.0..=1.0).contains(&negative));
    }
}
