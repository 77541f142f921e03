//! Market-data source factory.

use std::sync::Arc;

use crate::adapter::outbound::market::{CoinGeckoSource, DexScreenerSource};
use crate::infrastructure::config::settings::Config;
use crate::port::{JsonFetcher, PoolSource, PriceSource};

/// CoinGecko quote source for the configured coin.
pub fn build_price_source(config: &Config, fetcher: Arc<dyn JsonFetcher>) -> Arc<dyn PriceSource> {
    Arc::new(CoinGeckoSource::new(
        fetcher,
        config.network.coingecko_public_url.clone(),
        config.network.coingecko_pro_url.clone(),
        config.token.coingecko_id.clone(),
        config.credentials.coingecko.clone(),
    ))
}

/// DexScreener pool source for the configured token.
pub fn build_pool_source(config: &Config, fetcher: Arc<dyn JsonFetcher>) -> Arc<dyn PoolSource> {
    Arc::new(DexScreenerSource::new(
        fetcher,
        config.network.dexscreener_url.clone(),
        config.token.address.clone(),
    ))
}
