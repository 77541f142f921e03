//! CoinGecko simple-price quote.
//!
//! With an API key the pro endpoint is tried first; any failure there falls
//! back to the public endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::adapter::outbound::json;
use crate::domain::PriceQuote;
use crate::error::FetchError;
use crate::port::{JsonFetcher, PriceSource};

pub struct CoinGeckoSource {
    fetcher: Arc<dyn JsonFetcher>,
    public_url: String,
    pro_url: String,
    coin_id: String,
    api_key: Option<String>,
}

impl CoinGeckoSource {
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        public_url: impl Into<String>,
        pro_url: impl Into<String>,
        coin_id: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            public_url: public_url.into(),
            pro_url: pro_url.into(),
            coin_id: coin_id.into(),
            api_key,
        }
    }

    fn price_url(&self, base: &str) -> String {
        format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_market_cap=true&include_24hr_vol=true",
            base.trim_end_matches('/'),
            self.coin_id
        )
    }
}

/// Quote for `coin_id` from a simple-price document.
#[must_use]
pub fn parse_quote(doc: &Value, coin_id: &str) -> PriceQuote {
    PriceQuote {
        price_usd: json::number_at(doc, &[coin_id, "usd"]),
        mcap_usd: json::number_at(doc, &[coin_id, "usd_market_cap"]),
        volume_24h_usd: json::number_at(doc, &[coin_id, "usd_24h_vol"]),
    }
}

#[async_trait]
impl PriceSource for CoinGeckoSource {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    async fn quote(&self) -> Result<PriceQuote, FetchError> {
        if let Some(key) = self.api_key.as_deref() {
            let url = self.price_url(&self.pro_url);
            match self
                .fetcher
                .get_json(&url, &[("x-cg-pro-api-key", key)])
                .await
            {
                Ok(doc) => return Ok(parse_quote(&doc, &self.coin_id)),
                Err(err) => warn!(error = %err, "CoinGecko pro endpoint failed, using public"),
            }
        }

        let doc = self
            .fetcher
            .get_json(&self.price_url(&self.public_url), &[])
            .await?;
        Ok(parse_quote(&doc, &self.coin_id))
    }
}
