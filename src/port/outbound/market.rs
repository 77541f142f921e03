//! Market-data collaborator ports.

use async_trait::async_trait;

use crate::domain::{PoolStats, PriceQuote};
use crate::error::FetchError;

/// Price, market cap and 24h volume.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Identifier recorded in the snapshot's source list.
    fn name(&self) -> &'static str;

    async fn quote(&self) -> Result<PriceQuote, FetchError>;
}

/// Liquidity, FDV and transaction counts of the primary trading pool.
#[async_trait]
pub trait PoolSource: Send + Sync {
    /// Identifier recorded in the snapshot's source list.
    fn name(&self) -> &'static str;

    async fn pool_stats(&self) -> Result<PoolStats, FetchError>;
}
