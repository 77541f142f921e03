//! Moralis holder statistics (trend proxy tier).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::adapter::outbound::json;
use crate::domain::{enhanced_proxy, heuristic_proxy, SourceId, TokenAddress};
use crate::port::{ConcentrationProvider, JsonFetcher, ResolveInput, Skip};

/// Aggregate holder figures; Moralis publishes no holder list here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolderStats {
    pub total_holders: f64,
    pub change_pct_24h: Option<f64>,
}

impl HolderStats {
    /// Parse a holder-stats document; absent without `totalHolders`.
    #[must_use]
    pub fn parse(doc: &Value) -> Option<Self> {
        Some(Self {
            total_holders: json::number_at(doc, &["totalHolders"])?,
            change_pct_24h: json::number_at(doc, &["holderChange", "24h", "changePercent"]),
        })
    }
}

/// Heuristic proxy adjusted by holder dispersion and the 24h holder trend.
pub struct MoralisProvider {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    address: TokenAddress,
    api_key: Option<String>,
}

impl MoralisProvider {
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        base_url: impl Into<String>,
        address: TokenAddress,
        api_key: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            address,
            api_key,
        }
    }

    fn stats_url(&self) -> String {
        format!(
            "{}/token/mainnet/holders/{}",
            self.base_url.trim_end_matches('/'),
            self.address
        )
    }
}

#[async_trait]
impl ConcentrationProvider for MoralisProvider {
    fn source(&self) -> SourceId {
        SourceId::MoralisEnhancedProxy
    }

    async fn top10_pct(&self, input: &ResolveInput) -> Result<f64, Skip> {
        let key = self.api_key.as_deref().ok_or(Skip::MissingCredential)?;

        let doc = self
            .fetcher
            .get_json(&self.stats_url(), &[("X-API-Key", key)])
            .await?;
        let stats = HolderStats::parse(&doc).ok_or(Skip::NoData)?;
        debug!(?stats, "Moralis holder stats received");

        let base = heuristic_proxy(input.liquidity_usd, input.fdv_usd).ok_or(Skip::NoData)?;
        Ok(enhanced_proxy(base, stats.total_holders, stats.change_pct_24h))
    }
}
