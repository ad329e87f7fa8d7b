//! Response Synthesis
//!
//! Pure formatting: every function here turns fetched data into the text
//! block a user sees. No I/O. Synthesis is total over the [`Fetched`]
//! tags — unavailable data renders an explicit line instead of silently
//! dropping a section.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::Fetched;
use crate::model::{MoverEntry, NewsArticle, RiskLevel, TokenQuote, TrendingEntry};
use crate::sentiment::SentimentAnalyzer;
use crate::strategy::{self, DISCLAIMER, INVESTMENT_TIPS};

// ============================================================================
// Number formatting
// ============================================================================

const THOUSAND: Decimal = dec!(1_000);
const MILLION: Decimal = dec!(1_000_000);
const BILLION: Decimal = dec!(1_000_000_000);
const TRILLION: Decimal = dec!(1_000_000_000_000);

/// Scale a large number with K/M/B/T suffixes, two decimal places,
/// threshold at 1,000.
pub fn scaled(value: Decimal) -> String {
    let abs = value.abs();
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };

    if abs >= TRILLION {
        format!("{sign}{:.2}T", abs / TRILLION)
    } else if abs >= BILLION {
        format!("{sign}{:.2}B", abs / BILLION)
    } else if abs >= MILLION {
        format!("{sign}{:.2}M", abs / MILLION)
    } else if abs >= THOUSAND {
        format!("{sign}{:.2}K", abs / THOUSAND)
    } else {
        format!("{sign}{abs:.2}")
    }
}

/// Format a per-unit price. Sub-cent values keep six decimals so micro-cap
/// tokens do not render as $0.00.
pub fn price(value: Decimal) -> String {
    if value > Decimal::ZERO && value < dec!(0.01) {
        format!("${value:.6}")
    } else {
        format!("${value:.2}")
    }
}

/// Format a percentage: sign-prefixed, two decimals, directional indicator.
pub fn percentage(value: Decimal) -> String {
    let indicator = if value >= Decimal::ZERO { "↑" } else { "↓" };
    let sign = if value >= Decimal::ZERO { "+" } else { "" };
    format!("{sign}{value:.2}% {indicator}")
}

// ============================================================================
// Per-intent responses
// ============================================================================

/// Price block for each requested token; unavailable tokens get an
/// explicit line rather than a silent omission.
pub fn price_response(entries: &[(String, Fetched<TokenQuote>)]) -> String {
    let mut out = String::from("CRYPTOCURRENCY PRICES\n\n");

    for (requested, outcome) in entries {
        match outcome {
            Fetched::Ok(quote) => {
                out.push_str(&format!("{} ({})\n", quote.name, quote.symbol));
                out.push_str(&format!("Price: {}\n", price(quote.price)));
                out.push_str(&format!("24h Change: {}\n", percentage(quote.change_24h)));
                out.push_str(&format!("24h High: {}\n", price(quote.high_24h)));
                out.push_str(&format!("24h Low: {}\n", price(quote.low_24h)));
                out.push_str(&format!("Market Cap: ${}\n", scaled(quote.market_cap)));
                out.push_str(&format!("Volume: ${}\n\n", scaled(quote.volume_24h)));
            }
            Fetched::NotFound => {
                out.push_str(&format!("Couldn't find a token matching '{requested}'\n\n"));
            }
            Fetched::Unavailable => {
                out.push_str(&format!("Could not fetch data for {requested}\n\n"));
            }
        }
    }

    out.push_str("Data from CoinGecko | Cached for 2 minutes");
    out
}

pub fn trending_response(outcome: &Fetched<Vec<TrendingEntry>>) -> String {
    let entries = match outcome {
        Fetched::Ok(entries) if !entries.is_empty() => entries,
        _ => return "Unable to fetch trending data at this time. Please try again later.".into(),
    };

    let mut out = String::from("TRENDING CRYPTOCURRENCIES\n\n");
    for entry in entries {
        out.push_str(&format!("{}. {} ({})\n", entry.rank, entry.name, entry.symbol));
        out.push_str(&format!(
            "   Price: {} | 24h: {}\n",
            price(entry.price),
            percentage(entry.change_24h)
        ));
        if let Some(cap) = entry.market_cap {
            out.push_str(&format!("   Market Cap: ${}\n", scaled(cap)));
        }
        out.push('\n');
    }

    out.push_str("Most searched tokens on CoinGecko in the last 24h");
    out
}

pub fn movers_response(
    gainers: &Fetched<Vec<MoverEntry>>,
    losers: &Fetched<Vec<MoverEntry>>,
) -> String {
    if !gainers.is_ok() && !losers.is_ok() {
        return "Unable to fetch market movers at this time.".into();
    }

    let mut out = String::from("TOP MARKET MOVERS (24H)\n\n");

    out.push_str("TOP GAINERS:\n");
    match gainers {
        Fetched::Ok(entries) => {
            for entry in entries {
                out.push_str(&format!(
                    "  {} ({}): {} | {}\n",
                    entry.name,
                    entry.symbol,
                    percentage(entry.change_24h),
                    price(entry.price)
                ));
            }
        }
        _ => out.push_str("  Could not fetch data for gainers\n"),
    }

    out.push_str("\nTOP LOSERS:\n");
    match losers {
        Fetched::Ok(entries) => {
            for entry in entries {
                out.push_str(&format!(
                    "  {} ({}): {} | {}\n",
                    entry.name,
                    entry.symbol,
                    percentage(entry.change_24h),
                    price(entry.price)
                ));
            }
        }
        _ => out.push_str("  Could not fetch data for losers\n"),
    }

    out.push_str("\nData from top 100 cryptocurrencies by market cap");
    out
}

pub fn news_response(outcome: &Fetched<Vec<NewsArticle>>) -> String {
    let articles = match outcome {
        Fetched::Ok(articles) if !articles.is_empty() => articles,
        _ => {
            return "Unable to fetch news at this time. RSS feeds may be temporarily unavailable."
                .into();
        }
    };

    let mut out = String::from("LATEST CRYPTOCURRENCY NEWS\n\n");

    for (i, article) in articles.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, article.title));
        match article.sentiment_label {
            Some(label) => out.push_str(&format!(
                "   Source: {} | Sentiment: {}\n",
                article.source, label
            )),
            None => out.push_str(&format!("   Source: {}\n", article.source)),
        }
        if !article.url.is_empty() {
            out.push_str(&format!("   Link: {}\n", article.url));
        }
        out.push('\n');
    }

    if let Some((score, label)) = SentimentAnalyzer::default().aggregate(articles) {
        out.push_str("OVERALL MARKET SENTIMENT:\n");
        out.push_str(&format!("{label} (score: {score:+.2})\n"));
    }

    out
}

pub fn strategy_response(risk: RiskLevel) -> String {
    let book = strategy::playbook(risk);

    let mut out = format!(
        "{}-RISK INVESTMENT STRATEGY\n\n",
        risk.to_string().to_uppercase()
    );
    out.push_str(&format!("Risk Level: {risk}\n"));
    out.push_str(&format!("Time Horizon: {}\n\n", book.time_horizon));

    out.push_str("RECOMMENDED ALLOCATION:\n");
    for (asset, percent) in book.allocation {
        out.push_str(&format!("  {percent}% {asset}\n"));
    }

    out.push_str(&format!("\nAPPROACH:\n{}\n\n", book.approach));

    out.push_str("RECOMMENDED PLATFORMS:\n");
    for platform in book.platforms {
        out.push_str(&format!("  - {platform}\n"));
    }

    out.push_str("\nKEY RISK FACTORS:\n");
    for factor in book.risk_factors {
        out.push_str(&format!("  - {factor}\n"));
    }

    out.push_str(&format!("\nExpected Return: {}\n\n", book.expected_return));

    out.push_str("INVESTMENT TIPS:\n");
    for tip in INVESTMENT_TIPS {
        out.push_str(&format!("  - {tip}\n"));
    }

    out.push('\n');
    out.push_str(DISCLAIMER);
    out
}

pub fn help_response(llm_enabled: bool, knowledge_enabled: bool) -> String {
    let mut out = String::from(
        "CRYPTO INTELLIGENCE AGENT\n\
         Real-time market data, news aggregation, sentiment analysis, and \
         investment strategies.\n\n\
         EXAMPLE QUERIES:\n\n\
         Price Information:\n\
         \x20 - What's the price of Bitcoin?\n\
         \x20 - Show me BTC and ETH prices\n\n\
         Market Analysis:\n\
         \x20 - Show trending tokens\n\
         \x20 - Top gainers today\n\
         \x20 - Biggest losers in 24h\n\n\
         News & Sentiment:\n\
         \x20 - Latest crypto news\n\
         \x20 - What's the market sentiment?\n\n\
         Investment Strategy:\n\
         \x20 - Low-risk investment strategy\n\
         \x20 - High-risk recommendations\n\n\
         Comparison:\n\
         \x20 - Compare Bitcoin and Ethereum\n\n\
         POWERED BY:\n\
         \x20 - CoinGecko API (price data)\n\
         \x20 - Multi-source RSS feeds (news)\n\
         \x20 - Lexicon sentiment analysis\n",
    );

    if llm_enabled {
        out.push_str("  - LLM-enhanced responses\n");
    }
    if knowledge_enabled {
        out.push_str("  - Knowledge graph context\n");
    }

    out
}

pub fn general_response() -> String {
    "I'm not sure what you're asking. Here's what I can help with:\n\n\
     Price checks: \"Bitcoin price\"\n\
     Trending tokens: \"Show trending\"\n\
     News: \"Latest crypto news\"\n\
     Market movers: \"Top gainers\"\n\
     Strategies: \"Low-risk strategy\"\n\
     Help: \"What can you do?\"\n\n\
     Try asking me something!"
        .into()
}

/// Price intent with no recognizable token
pub fn price_prompt() -> String {
    "Please specify a cryptocurrency (e.g., 'Bitcoin price' or 'BTC ETH SOL prices')".into()
}

/// Compare intent with fewer than two recognizable tokens
pub fn compare_prompt() -> String {
    "Please specify two cryptocurrencies to compare (e.g., 'Compare Bitcoin and Ethereum')".into()
}

/// Catch-all for unexpected failures; the turn never surfaces an error
pub fn error_response() -> String {
    "An error occurred while processing your request. Please try again or rephrase your query."
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn quote() -> TokenQuote {
        TokenQuote {
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            price: dec!(97500),
            change_24h: dec!(2.5),
            high_24h: dec!(98200),
            low_24h: dec!(95800),
            market_cap: dec!(1_930_000_000_000),
            volume_24h: dec!(28_500_000_000),
            as_of: Utc::now(),
        }
    }

    #[test]
    fn test_scaled_suffixes() {
        assert_eq!(scaled(dec!(1_500_000_000)), "1.50B");
        assert_eq!(scaled(dec!(999)), "999.00");
        assert_eq!(scaled(dec!(1_000)), "1.00K");
        assert_eq!(scaled(dec!(2_500_000)), "2.50M");
        assert_eq!(scaled(dec!(3_500_000_000_000)), "3.50T");
        assert_eq!(scaled(dec!(-1_500_000)), "-1.50M");
    }

    #[test]
    fn test_percentage_direction() {
        let down = percentage(dec!(-2.45));
        assert!(down.contains("-2.45"));
        assert!(down.contains('↓'));

        let up = percentage(dec!(5.0));
        assert!(up.contains('+'));
        assert!(up.contains('↑'));
    }

    #[test]
    fn test_price_precision() {
        assert_eq!(price(dec!(97500)), "$97500.00");
        assert_eq!(price(dec!(0.000022)), "$0.000022");
    }

    #[test]
    fn test_price_response_renders_quote() {
        let out = price_response(&[("bitcoin".into(), Fetched::Ok(quote()))]);
        assert!(out.contains("Bitcoin (BTC)"));
        assert!(out.contains("Market Cap: $1.93T"));
        assert!(out.contains("+2.50% ↑"));
    }

    #[test]
    fn test_price_response_unavailable_line() {
        let out = price_response(&[("bitcoin".into(), Fetched::Unavailable)]);
        assert!(out.contains("Could not fetch data for bitcoin"));
    }

    #[test]
    fn test_price_response_not_found_line() {
        let out = price_response(&[("frobnicoin".into(), Fetched::NotFound)]);
        assert!(out.contains("Couldn't find a token matching 'frobnicoin'"));
    }

    #[test]
    fn test_movers_response_total_over_tags() {
        let gainers = Fetched::Ok(vec![MoverEntry {
            rank: 1,
            symbol: "SOL".into(),
            name: "Solana".into(),
            price: dec!(195),
            change_24h: dec!(12.4),
        }]);
        let out = movers_response(&gainers, &Fetched::Unavailable);
        assert!(out.contains("Solana (SOL)"));
        assert!(out.contains("Could not fetch data for losers"));

        let all_down = movers_response(&Fetched::Unavailable, &Fetched::Unavailable);
        assert!(all_down.contains("Unable to fetch market movers"));
    }

    #[test]
    fn test_news_response_includes_aggregate() {
        let mut articles = vec![
            NewsArticle::new("Bitcoin rally gains steam", "https://e.com/1", "CoinDesk"),
            NewsArticle::new("ETF approval milestone", "https://e.com/2", "Decrypt"),
        ];
        SentimentAnalyzer::default().annotate(&mut articles);

        let out = news_response(&Fetched::Ok(articles));
        assert!(out.contains("1. Bitcoin rally gains steam"));
        assert!(out.contains("OVERALL MARKET SENTIMENT"));
        assert!(out.contains("Bullish"));
    }

    #[test]
    fn test_strategy_response_sections() {
        let out = strategy_response(RiskLevel::Low);
        assert!(out.contains("LOW-RISK INVESTMENT STRATEGY"));
        assert!(out.contains("40% Bitcoin"));
        assert!(out.contains("RECOMMENDED PLATFORMS"));
        assert!(out.contains(DISCLAIMER));
    }
}
