//! DexScreener pool statistics for the token's first listed pair.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::adapter::outbound::json;
use crate::domain::{PoolStats, TokenAddress};
use crate::error::FetchError;
use crate::port::{JsonFetcher, PoolSource};

pub struct DexScreenerSource {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    address: TokenAddress,
}

impl DexScreenerSource {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, base_url: impl Into<String>, address: TokenAddress) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            address,
        }
    }
}

/// Stats of the first pair; all fields absent when no pair is listed.
#[must_use]
pub fn parse_pool(doc: &Value) -> PoolStats {
    let Some(pair) = json::array_at(doc, &["pairs"]).first() else {
        return PoolStats::default();
    };
    PoolStats {
        liquidity_usd: json::number_at(pair, &["liquidity", "usd"]),
        fdv_usd: json::number_at(pair, &["fdv"]),
        buys_24h: json::number_at(pair, &["txns", "h24", "buys"]),
        sells_24h: json::number_at(pair, &["txns", "h24", "sells"]),
        price_change_24h_pct: json::number_at(pair, &["priceChange", "h24"]),
    }
}

#[async_trait]
impl PoolSource for DexScreenerSource {
    fn name(&self) -> &'static str {
        "dexscreener"
    }

    async fn pool_stats(&self) -> Result<PoolStats, FetchError> {
        let url = format!(
            "{}/tokens/{}",
            self.base_url.trim_end_matches('/'),
            self.address
        );
        let doc = self.fetcher.get_json(&url, &[]).await?;
        Ok(parse_pool(&doc))
    }
}
