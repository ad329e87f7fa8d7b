//! Entity Extraction
//!
//! Pulls known token mentions and a risk-tolerance level out of free text.
//! Token aliases are matched as whole words; results are collected in
//! alias-table iteration order (not text order), deduplicated by canonical
//! id, and capped at three.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::RiskLevel;

/// Alias → canonical token id. Majors first; the iteration order of this
/// table is the output order of [`tokens`].
const TOKEN_ALIASES: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("bitcoin", "bitcoin"),
    ("eth", "ethereum"),
    ("ethereum", "ethereum"),
    ("sol", "solana"),
    ("solana", "solana"),
    ("ada", "cardano"),
    ("cardano", "cardano"),
    ("xrp", "ripple"),
    ("ripple", "ripple"),
    ("doge", "dogecoin"),
    ("dogecoin", "dogecoin"),
    ("dot", "polkadot"),
    ("polkadot", "polkadot"),
    ("matic", "matic-network"),
    ("polygon", "matic-network"),
    ("avax", "avalanche-2"),
    ("avalanche", "avalanche-2"),
    ("link", "chainlink"),
    ("chainlink", "chainlink"),
    ("uni", "uniswap"),
    ("uniswap", "uniswap"),
    ("atom", "cosmos"),
    ("cosmos", "cosmos"),
    ("ltc", "litecoin"),
    ("litecoin", "litecoin"),
    ("bnb", "binancecoin"),
    ("binance", "binancecoin"),
    ("near", "near"),
    ("algo", "algorand"),
    ("algorand", "algorand"),
    ("ftm", "fantom"),
    ("fantom", "fantom"),
    ("hbar", "hedera-hashgraph"),
    ("hedera", "hedera-hashgraph"),
];

/// Most tokens a single message contributes to a query
const MAX_TOKENS: usize = 3;

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[a-z0-9]+").expect("static pattern"))
}

/// Extract canonical token ids mentioned in a message.
pub fn tokens(text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    let words: Vec<&str> = word_pattern().find_iter(&text).map(|m| m.as_str()).collect();

    let mut found: Vec<String> = Vec::new();
    for (alias, id) in TOKEN_ALIASES {
        if words.iter().any(|w| w == alias) && !found.iter().any(|f| f.as_str() == *id) {
            found.push((*id).to_string());
            if found.len() == MAX_TOKENS {
                break;
            }
        }
    }

    found
}

/// Resolve a single alias to its canonical id. Unknown aliases pass
/// through lowercased — the upstream API is the authority on whether they
/// exist.
pub fn canonical_id(alias: &str) -> String {
    let alias = alias.trim().to_lowercase();
    TOKEN_ALIASES
        .iter()
        .find(|(a, _)| *a == alias)
        .map(|(_, id)| (*id).to_string())
        .unwrap_or(alias)
}

const LOW_RISK_PHRASES: &[&str] = &["low risk", "conservative", "safe", "stable"];
const HIGH_RISK_PHRASES: &[&str] = &["high risk", "aggressive", "risky", "volatile"];

/// Extract the risk tolerance expressed in a message; Medium when ambiguous.
pub fn risk_level(text: &str) -> RiskLevel {
    let text = text.to_lowercase();

    if LOW_RISK_PHRASES.iter().any(|p| text.contains(p)) {
        RiskLevel::Low
    } else if HIGH_RISK_PHRASES.iter().any(|p| text.contains(p)) {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_bitcoin_and_ethereum() {
        assert_eq!(
            tokens("Compare Bitcoin and Ethereum"),
            vec!["bitcoin".to_string(), "ethereum".to_string()]
        );
    }

    #[test]
    fn test_alias_and_full_name_map_to_same_id() {
        assert_eq!(tokens("btc"), vec!["bitcoin".to_string()]);
        assert_eq!(tokens("bitcoin"), vec!["bitcoin".to_string()]);
        // both mentioned: still one entry
        assert_eq!(tokens("btc aka bitcoin"), vec!["bitcoin".to_string()]);
    }

    #[test]
    fn test_unknown_words_yield_nothing() {
        assert!(tokens("tell me about frobnicoin").is_empty());
    }

    #[test]
    fn test_whole_word_matching() {
        // "solid" must not match "sol"
        assert!(tokens("a solid plan").is_empty());
        assert_eq!(tokens("is sol worth it"), vec!["solana".to_string()]);
    }

    #[test]
    fn test_capped_at_three() {
        let found = tokens("btc eth sol ada dot");
        assert_eq!(found.len(), 3);
        assert_eq!(found, vec!["bitcoin", "ethereum", "solana"]);
    }

    #[test]
    fn test_table_order_not_text_order() {
        // ethereum appears first in the text; bitcoin comes first in the table
        assert_eq!(
            tokens("Is ETH better than BTC?"),
            vec!["bitcoin".to_string(), "ethereum".to_string()]
        );
    }

    #[test]
    fn test_canonical_id_passthrough() {
        assert_eq!(canonical_id("MATIC"), "matic-network");
        assert_eq!(canonical_id("frobnicoin"), "frobnicoin");
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(risk_level("something safe please"), RiskLevel::Low);
        assert_eq!(risk_level("a conservative allocation"), RiskLevel::Low);
        assert_eq!(risk_level("high risk high reward"), RiskLevel::High);
        assert_eq!(risk_level("I like volatile plays"), RiskLevel::High);
        assert_eq!(risk_level("whatever works"), RiskLevel::Medium);
    }
}
