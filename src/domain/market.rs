//! Market snapshot assembled from the price and liquidity collaborators.

use serde::{Deserialize, Serialize};

use super::numeric::{pct_change, round_to};

/// Buy/sell ratio reported when a day saw buys but no sells.
pub const NO_SELLS_RATIO: f64 = 9.99;

/// Price, market cap and volume from the price aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceQuote {
    pub price_usd: Option<f64>,
    pub mcap_usd: Option<f64>,
    pub volume_24h_usd: Option<f64>,
}

/// Pool-level statistics from the DEX aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoolStats {
    pub liquidity_usd: Option<f64>,
    pub fdv_usd: Option<f64>,
    pub buys_24h: Option<f64>,
    pub sells_24h: Option<f64>,
    pub price_change_24h_pct: Option<f64>,
}

/// Immutable market state for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub price_usd: Option<f64>,
    pub mcap_usd: Option<f64>,
    pub volume_24h_usd: Option<f64>,
    pub liquidity_usd: Option<f64>,
    pub fdv_usd: Option<f64>,
    pub buys_24h: Option<f64>,
    pub sells_24h: Option<f64>,
    pub buy_sell_txn_ratio_24h: Option<f64>,
}

impl MarketSnapshot {
    /// Combine both collaborators' readings and derive the buy/sell ratio.
    #[must_use]
    pub fn from_parts(quote: PriceQuote, pool: PoolStats) -> Self {
        Self {
            price_usd: quote.price_usd,
            mcap_usd: quote.mcap_usd,
            volume_24h_usd: quote.volume_24h_usd,
            liquidity_usd: pool.liquidity_usd,
            fdv_usd: pool.fdv_usd,
            buys_24h: pool.buys_24h,
            sells_24h: pool.sells_24h,
            buy_sell_txn_ratio_24h: buy_sell_ratio(pool.buys_24h, pool.sells_24h)
                .map(|r| round_to(r, 4)),
        }
    }

    /// Liquidity over fully-diluted valuation, absent without a positive FDV.
    #[must_use]
    pub fn liq_fdv_ratio(&self) -> Option<f64> {
        match (self.liquidity_usd, self.fdv_usd) {
            (Some(liq), Some(fdv)) if fdv != 0.0 => Some(liq / fdv),
            _ => None,
        }
    }
}

/// Buys divided by sells; [`NO_SELLS_RATIO`] when nothing was sold.
#[must_use]
pub fn buy_sell_ratio(buys: Option<f64>, sells: Option<f64>) -> Option<f64> {
    let (buys, sells) = (buys?, sells?);
    if sells == 0.0 {
        Some(NO_SELLS_RATIO)
    } else {
        Some(buys / sells)
    }
}

/// Fields derived from the market snapshot and the previous period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub liq_fdv_ratio: Option<f64>,
    pub liquidity_change_24h: Option<f64>,
    pub price_change_24h_pct: Option<f64>,
}

impl DerivedMetrics {
    #[must_use]
    pub fn compute(
        market: &MarketSnapshot,
        price_change_24h_pct: Option<f64>,
        previous_liquidity_usd: Option<f64>,
    ) -> Self {
        Self {
            liq_fdv_ratio: market.liq_fdv_ratio().map(|r| round_to(r, 6)),
            liquidity_change_24h: pct_change(market.liquidity_usd, previous_liquidity_usd)
                .map(|c| round_to(c, 6)),
            price_change_24h_pct: price_change_24h_pct.map(|p| round_to(p, 4)),
        }
    }
}
