//! Investment Strategy Playbooks
//!
//! Risk-stratified recommendation sheets. Purely configuration-driven
//! text: no live market computation feeds these tables.

use crate::model::RiskLevel;

/// A complete strategy sheet for one risk tier
#[derive(Clone, Copy, Debug)]
pub struct Playbook {
    /// (asset bucket, percent) — percents sum to 100
    pub allocation: &'static [(&'static str, u8)],
    pub approach: &'static str,
    pub platforms: &'static [&'static str],
    pub risk_factors: &'static [&'static str],
    pub expected_return: &'static str,
    pub time_horizon: &'static str,
}

const LOW_RISK: Playbook = Playbook {
    allocation: &[
        ("Bitcoin", 40),
        ("Ethereum", 30),
        ("Stablecoins (USDC/USDT)", 20),
        ("Blue-chip Layer 1s (SOL/ADA)", 10),
    ],
    approach: "Focus on established cryptocurrencies with strong fundamentals, \
proven track records, and institutional adoption. Maintain a significant \
stablecoin position for liquidity and risk management.",
    platforms: &["Coinbase", "Kraken", "Binance", "Gemini"],
    risk_factors: &["Regulatory changes", "Market corrections", "Exchange security"],
    expected_return: "8-15% APY (moderate volatility)",
    time_horizon: "6-24 months",
};

const MEDIUM_RISK: Playbook = Playbook {
    allocation: &[
        ("Bitcoin", 30),
        ("Ethereum", 25),
        ("Top 10 Altcoins", 25),
        ("DeFi Tokens", 15),
        ("Stablecoins", 5),
    ],
    approach: "Balanced approach combining established assets with \
growth-oriented altcoins. Include exposure to DeFi protocols for yield \
generation. Regular rebalancing recommended.",
    platforms: &["Binance", "Kraken", "KuCoin", "Uniswap", "Aave"],
    risk_factors: &[
        "Smart contract risk",
        "Impermanent loss",
        "Protocol exploits",
        "Market volatility",
    ],
    expected_return: "15-30% APY (moderate-high volatility)",
    time_horizon: "3-12 months",
};

const HIGH_RISK: Playbook = Playbook {
    allocation: &[
        ("New Layer 1s", 30),
        ("Low-cap altcoins", 25),
        ("DeFi/GameFi", 20),
        ("NFT projects", 15),
        ("Micro-cap gems", 10),
    ],
    approach: "Aggressive growth strategy targeting emerging projects with \
high upside potential. Requires active monitoring, quick decision-making, \
and willingness to accept significant losses. Only invest disposable income.",
    platforms: &["DEXs (Uniswap, PancakeSwap)", "Gate.io", "MEXC", "Bybit"],
    risk_factors: &[
        "Rug pulls",
        "Extreme volatility",
        "Liquidity issues",
        "Smart contract exploits",
        "Total loss potential",
    ],
    expected_return: "30-100%+ APY (extreme volatility)",
    time_horizon: "1-6 months",
};

/// Advice appended to every strategy sheet
pub const INVESTMENT_TIPS: &[&str] = &[
    "Use dollar-cost averaging (DCA) to reduce timing risk",
    "Never invest more than you can afford to lose",
    "Use hardware wallets for significant holdings",
    "Diversify across platforms to reduce custodial risk",
    "Stay informed through multiple news sources",
];

pub const DISCLAIMER: &str =
    "Disclaimer: Educational content only, not financial advice. DYOR and consult professionals.";

/// Look up the playbook for a risk tier
pub fn playbook(risk: RiskLevel) -> &'static Playbook {
    match risk {
        RiskLevel::Low => &LOW_RISK,
        RiskLevel::Medium => &MEDIUM_RISK,
        RiskLevel::High => &HIGH_RISK,
    }
}
