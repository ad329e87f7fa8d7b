//! Sentiment Analysis
//!
//! Lexicon-based scoring over crypto news headlines. A text scores in
//! [-1, 1] from the balance of positive and negative vocabulary hits, then
//! classifies against configurable thresholds.

use crate::model::{NewsArticle, SentimentLabel};

const POSITIVE_WORDS: &[&str] = &[
    "surge", "surges", "rally", "rallies", "bullish", "gain", "gains", "soar",
    "soars", "record", "high", "breakout", "adoption", "approval", "approved",
    "institutional", "upgrade", "growth", "milestone", "recovery", "rebound",
    "optimism", "partnership", "launch", "boost", "wins", "success",
];

const NEGATIVE_WORDS: &[&str] = &[
    "crash", "crashes", "plunge", "plunges", "bearish", "drop", "drops", "fall",
    "falls", "hack", "hacked", "exploit", "scam", "fraud", "ban", "bans",
    "selloff", "sell-off", "fear", "loss", "losses", "lawsuit", "liquidation",
    "collapse", "bankruptcy", "warning", "crackdown", "decline", "dump",
];

/// Classification thresholds; scores between the two are neutral.
#[derive(Clone, Copy, Debug)]
pub struct SentimentThresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            positive: 0.2,
            negative: -0.2,
        }
    }
}

/// Lexicon sentiment scorer
#[derive(Clone, Copy, Debug, Default)]
pub struct SentimentAnalyzer {
    thresholds: SentimentThresholds,
}

impl SentimentAnalyzer {
    pub fn new(thresholds: SentimentThresholds) -> Self {
        Self { thresholds }
    }

    /// Score a text in [-1, 1]. Zero when no lexicon word appears.
    pub fn score(&self, text: &str) -> f64 {
        let text = text.to_lowercase();
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .filter(|w| !w.is_empty())
            .collect();

        let positives = words
            .iter()
            .filter(|w| POSITIVE_WORDS.contains(&w.trim_matches('-')))
            .count() as f64;
        let negatives = words
            .iter()
            .filter(|w| NEGATIVE_WORDS.contains(&w.trim_matches('-')))
            .count() as f64;

        let total = positives + negatives;
        if total == 0.0 {
            0.0
        } else {
            (positives - negatives) / total
        }
    }

    /// Classify a score into a label
    pub fn classify(&self, score: f64) -> SentimentLabel {
        if score > self.thresholds.positive {
            SentimentLabel::Positive
        } else if score < self.thresholds.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Move articles from the fetched stage to the analyzed stage.
    pub fn annotate(&self, articles: &mut [NewsArticle]) {
        for article in articles {
            let score = self.score(&article.title);
            article.sentiment_score = Some(score);
            article.sentiment_label = Some(self.classify(score));
        }
    }

    /// Average per-article scores and reclassify. `None` when no article
    /// carries a score yet.
    pub fn aggregate(&self, articles: &[NewsArticle]) -> Option<(f64, SentimentLabel)> {
        let scores: Vec<f64> = articles
            .iter()
            .filter_map(|a| a.sentiment_score)
            .collect();
        if scores.is_empty() {
            return None;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        Some((mean, self.classify(mean)))
    }
}
