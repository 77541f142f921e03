//! Birdeye holder list (authoritative tier).
//!
//! The token overview reports supply in UI units, so it is scaled back to
//! raw units before the shared computation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::extract::{first_computable, holder_items, AMOUNT_THEN_BALANCE};
use crate::adapter::outbound::json;
use crate::domain::{SourceId, SupplyMeta, TokenAddress, TOP_HOLDER_COUNT};
use crate::port::{ConcentrationProvider, JsonFetcher, ResolveInput, Skip};

pub struct BirdeyeProvider {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    address: TokenAddress,
    api_key: Option<String>,
}

impl BirdeyeProvider {
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

    fn holders_url(&self) -> String {
        format!(
            "{}/defi/v3/token/holder?address={}&offset=0&limit={TOP_HOLDER_COUNT}",
            self.base_url.trim_end_matches('/'),
            self.address
        )
    }

    fn overview_url(&self) -> String {
        format!(
            "{}/defi/token_overview?address={}",
            self.base_url.trim_end_matches('/'),
            self.address
        )
    }
}

/// Supply metadata from a token overview, with supply converted to raw units.
#[must_use]
pub fn overview_supply(overview: &Value) -> SupplyMeta {
    let decimals = json::u32_at(overview, &["data", "decimals"]);
    let ui_supply = json::number_at(overview, &["data", "supply"]);
    let raw_supply = match (ui_supply, decimals) {
        (Some(supply), Some(decimals)) => i32::try_from(decimals)
            .ok()
            .map(|d| supply * 10f64.powi(d)),
        _ => None,
    };
    SupplyMeta::new(decimals, raw_supply)
}

#[async_trait]
impl ConcentrationProvider for BirdeyeProvider {
    fn source(&self) -> SourceId {
        SourceId::Birdeye
    }

    async fn top10_pct(&self, _input: &ResolveInput) -> Result<f64, Skip> {
        let key = self.api_key.as_deref().ok_or(Skip::MissingCredential)?;
        let headers = [("X-API-KEY", key), ("x-chain", "solana")];

        let holders = self.fetcher.get_json(&self.holders_url(), &headers).await?;
        let overview = self.fetcher.get_json(&self.overview_url(), &headers).await?;

        let supply = overview_supply(&overview);
        let items = holder_items(&holders);
        debug!(holders = items.len(), ?supply, "Birdeye responses received");

        first_computable(items, &supply, AMOUNT_THEN_BALANCE).ok_or(Skip::NoData)
    }
}
