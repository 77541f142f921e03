//! Token identity, provider endpoints and retry policy.

use serde::Deserialize;

use crate::domain::TokenAddress;

/// The tracked token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// Ticker written into snapshots.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Solana mint address.
    #[serde(default = "default_address")]
    pub address: TokenAddress,
    /// CoinGecko coin id.
    #[serde(default = "default_coingecko_id")]
    pub coingecko_id: String,
}

fn default_symbol() -> String {
    "TRUMP".into()
}

fn default_address() -> TokenAddress {
    TokenAddress::new("6p6xgHyF7AeE6TZkSmFsko444wqoP15icUSqi2jfGiPN")
}

fn default_coingecko_id() -> String {
    "official-trump".into()
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            address: default_address(),
            coingecko_id: default_coingecko_id(),
        }
    }
}

/// Base URLs of every upstream and request-level settings.
///
/// Endpoints are injected rather than hardcoded so tests can point adapters
/// at scripted responses.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_coingecko_public_url")]
    pub coingecko_public_url: String,
    #[serde(default = "default_coingecko_pro_url")]
    pub coingecko_pro_url: String,
    #[serde(default = "default_dexscreener_url")]
    pub dexscreener_url: String,
    #[serde(default = "default_solscan_url")]
    pub solscan_url: String,
    #[serde(default = "default_birdeye_url")]
    pub birdeye_url: String,
    #[serde(default = "default_moralis_url")]
    pub moralis_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_coingecko_public_url() -> String {
    "https://api.coingecko.com/api/v3".into()
}

fn default_coingecko_pro_url() -> String {
    "https://pro-api.coingecko.com/api/v3".into()
}

fn default_dexscreener_url() -> String {
    "https://api.dexscreener.com/latest/dex".into()
}

fn default_solscan_url() -> String {
    "https://pro-api.solscan.io/v2.0".into()
}

fn default_birdeye_url() -> String {
    "https://public-api.birdeye.so".into()
}

fn default_moralis_url() -> String {
    "https://solana-gateway.moralis.io".into()
}

const fn default_timeout_secs() -> u64 {
    25
}

fn default_user_agent() -> String {
    concat!("thesis-lab/", env!("CARGO_PKG_VERSION")).into()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            coingecko_public_url: default_coingecko_public_url(),
            coingecko_pro_url: default_coingecko_pro_url(),
            dexscreener_url: default_dexscreener_url(),
            solscan_url: default_solscan_url(),
            birdeye_url: default_birdeye_url(),
            moralis_url: default_moralis_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Retry policy of the JSON fetcher.
///
/// The delay before retry `n` (zero-based) is `2^n` seconds plus a jitter
/// drawn uniformly from `[jitter_min_ms, jitter_max_ms]`.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per URL, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Base of the exponential delay in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_jitter_min_ms")]
    pub jitter_min_ms: u64,
    #[serde(default = "default_jitter_max_ms")]
    pub jitter_max_ms: u64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_base_delay_ms() -> u64 {
    1000
}

const fn default_jitter_min_ms() -> u64 {
    50
}

const fn default_jitter_max_ms() -> u64 {
    350
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            jitter_min_ms: default_jitter_min_ms(),
            jitter_max_ms: default_jitter_max_ms(),
        }
    }
}
