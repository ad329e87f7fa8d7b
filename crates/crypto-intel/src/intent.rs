//! Intent Classification
//!
//! Maps free text to one of a closed set of intents with ordered,
//! case-insensitive keyword membership. The FIRST rule whose keyword set
//! has any member as a substring of the lowercased input wins, so the
//! table order below is the precedence policy: price lookups and listings
//! before strategy and comparison, help near the end, `General` as the
//! catch-all for anything unmatched.

use crate::model::Intent;

/// Ordered classification rules. Order is load-bearing.
const INTENT_RULES: &[(Intent, &[&str])] = &[
    (Intent::Price, &["price", "worth", "value", "cost", "how much"]),
    (Intent::Trending, &["trending", "popular", "hot", "buzz"]),
    (Intent::News, &["news", "headlines", "latest", "updates"]),
    (Intent::Sentiment, &["sentiment", "feeling", "mood", "opinion"]),
    (
        Intent::Strategy,
        &["strategy", "invest", "portfolio", "recommendation", "stake", "staking"],
    ),
    (
        Intent::Movers,
        &["gainer", "loser", "mover", "top", "bottom", "best", "worst"],
    ),
    (Intent::Compare, &["compare", "vs", "versus", "difference"]),
    (Intent::Help, &["help", "what can", "capabilities", "how to", "guide"]),
];

/// Classify a user message. Pure and deterministic.
pub fn classify(text: &str) -> Intent {
    let text = text.to_lowercase();

    for (intent, keywords) in INTENT_RULES {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return *intent;
        }
    }

    Intent::General
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_cases() {
        let cases = [
            ("What's the price of Bitcoin?", Intent::Price),
            ("Show trending tokens", Intent::Trending),
            ("top gainers today", Intent::Movers),
            ("Compare BTC and ETH", Intent::Compare),
            ("help", Intent::Help),
            ("asdkfj random text", Intent::General),
            ("Latest crypto news", Intent::News),
            ("What's the market sentiment?", Intent::Sentiment),
            ("Give me a low-risk investment strategy", Intent::Strategy),
        ];

        for (text, expected) in cases {
            assert_eq!(classify(text), expected, "misclassified: {text:?}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("BITCOIN PRICE"), Intent::Price);
        assert_eq!(classify("TOP GAINERS"), Intent::Movers);
    }

    #[test]
    fn test_mixed_topics_resolve_by_order() {
        // contains both "price" and "trending"; Price is checked first
        assert_eq!(classify("price of the trending coins"), Intent::Price);
        // "latest" (News) appears before the Movers rule in the table
        assert_eq!(classify("latest top gainers"), Intent::News);
    }

    #[test]
    fn test_empty_input_is_general() {
        assert_eq!(classify(""), Intent::General);
    }
}
