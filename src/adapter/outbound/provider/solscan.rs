//! Solscan Pro holder list (authoritative tier).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::extract::{first_computable, holder_items, AMOUNT_THEN_BALANCE};
use crate::adapter::outbound::json;
use crate::domain::{SourceId, SupplyMeta, TokenAddress, TOP_HOLDER_COUNT};
use crate::port::{ConcentrationProvider, JsonFetcher, ResolveInput, Skip};

/// Exact concentration from Solscan's holder and token-meta endpoints.
pub struct SolscanProvider {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    address: TokenAddress,
    api_key: Option<String>,
}

impl SolscanProvider {
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
            "{}/token/holders?address={}&page=1&page_size={TOP_HOLDER_COUNT}",
            self.base_url.trim_end_matches('/'),
            self.address
        )
    }

    fn meta_url(&self) -> String {
        format!(
            "{}/token/meta?address={}",
            self.base_url.trim_end_matches('/'),
            self.address
        )
    }
}

#[async_trait]
impl ConcentrationProvider for SolscanProvider {
    fn source(&self) -> SourceId {
        SourceId::SolscanPro
    }

    async fn top10_pct(&self, _input: &ResolveInput) -> Result<f64, Skip> {
        let key = self.api_key.as_deref().ok_or(Skip::MissingCredential)?;
        let headers = [("token", key)];

        let holders = self.fetcher.get_json(&self.holders_url(), &headers).await?;
        let meta = self.fetcher.get_json(&self.meta_url(), &headers).await?;

        let supply = SupplyMeta::new(
            json::u32_at(&meta, &["data", "decimals"]),
            json::number_at(&meta, &["data", "supply"]),
        );
        let items = holder_items(&holders);
        debug!(holders = items.len(), ?supply, "Solscan responses received");

        first_computable(items, &supply, AMOUNT_THEN_BALANCE).ok_or(Skip::NoData)
    }
}
