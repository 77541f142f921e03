//! Market-data adapters.

pub mod coingecko;
pub mod dexscreener;

pub use coingecko::CoinGeckoSource;
pub use dexscreener::DexScreenerSource;
