//! Stub providers and market sources with fixed outcomes.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{PoolStats, PriceQuote, SourceId};
use crate::error::FetchError;
use crate::port::{ConcentrationProvider, PoolSource, PriceSource, ResolveInput, Skip};

/// Concentration provider returning a fixed outcome after an optional delay.
pub struct StubProvider {
    source: SourceId,
    outcome: Result<f64, Skip>,
    delay: Duration,
    calls: AtomicU32,
}

impl StubProvider {
    pub fn ok(source: SourceId, pct: f64) -> Self {
        Self::with_outcome(source, Ok(pct))
    }

    pub fn skip(source: SourceId, skip: Skip) -> Self {
        Self::with_outcome(source, Err(skip))
    }

    pub fn with_outcome(source: SourceId, outcome: Result<f64, Skip>) -> Self {
        Self {
            source,
            outcome,
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConcentrationProvider for StubProvider {
    fn source(&self) -> SourceId {
        self.source
    }

    async fn top10_pct(&self, _input: &ResolveInput) -> Result<f64, Skip> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }
}

/// Price source with a fixed outcome.
pub struct StubPriceSource(pub Result<PriceQuote, FetchError>);

#[async_trait]
impl PriceSource for StubPriceSource {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    async fn quote(&self) -> Result<PriceQuote, FetchError> {
        self.0.clone()
    }
}

/// Pool source with a fixed outcome.
pub struct StubPoolSource(pub Result<PoolStats, FetchError>);

#[async_trait]
impl PoolSource for StubPoolSource {
    fn name(&self) -> &'static str {
        "dexscreener"
    }

    async fn pool_stats(&self) -> Result<PoolStats, FetchError> {
        self.0.clone()
    }
}
