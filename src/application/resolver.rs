//! Concentration resolver: the tiered fallback chain.
//!
//! Providers are walked in ascending [`Tier`](crate::domain::Tier) order and
//! the first usable percentage wins. Every skipped provider may leave a
//! degradation flag behind. When no provider answers, the closed-form
//! liquidity/FDV heuristic decides, so resolution always yields a result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::domain::numeric::round_to;
use crate::domain::{heuristic_proxy, ConcentrationResult, SourceId};
use crate::port::{ConcentrationProvider, ResolveInput, Skip};

/// Flag recorded when the network tiers ran out of time.
pub const DEADLINE_FLAG: &str = "resolution_deadline_exceeded";

/// Runs the concentration fallback chain.
pub struct ConcentrationResolver {
    providers: Vec<Arc<dyn ConcentrationProvider>>,
    concurrent: bool,
    deadline: Option<Duration>,
}

impl ConcentrationResolver {
    /// Create a resolver over `providers`.
    ///
    /// Providers are ordered by tier; within a tier the given order is kept.
    #[must_use]
    pub fn new(mut providers: Vec<Arc<dyn ConcentrationProvider>>) -> Self {
        providers.sort_by_key(|p| p.source().tier());
        Self {
            providers,
            concurrent: false,
            deadline: None,
        }
    }

    /// Poll every provider at once; selection still follows tier order.
    ///
    /// Under a deadline, providers that answered in time are still used.
    #[must_use]
    pub const fn concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// Bound the time spent on network tiers.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sources in the order they are consulted, heuristic excluded.
    pub fn sources(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.providers.iter().map(|p| p.source())
    }

    /// Resolve the top-10 holder concentration. Never fails.
    pub async fn resolve(&self, input: &ResolveInput) -> ConcentrationResult {
        let mut flags = Vec::new();
        let deadline = self.deadline.map(|limit| Instant::now() + limit);

        let chosen = if self.concurrent {
            self.poll_all(input, deadline, &mut flags).await
        } else {
            self.walk(input, deadline, &mut flags).await
        };

        if let Some((source, pct)) = chosen {
            if let Some(flag) = source.proxy_flag() {
                push_flag(&mut flags, flag.to_string());
            }
            info!(tier = %source.tier(), source = %source, pct, "Concentration resolved");
            return ConcentrationResult::new(source, Some(pct), flags);
        }

        let pct = heuristic_proxy(input.liquidity_usd, input.fdv_usd);
        if let Some(flag) = SourceId::HeuristicProxy.proxy_flag() {
            push_flag(&mut flags, flag.to_string());
        }
        info!(source = %SourceId::HeuristicProxy, ?pct, "Concentration fell back to heuristic");
        ConcentrationResult::new(SourceId::HeuristicProxy, pct, flags)
    }

    /// One provider at a time; the deadline stops the walk where it is.
    async fn walk(
        &self,
        input: &ResolveInput,
        deadline: Option<Instant>,
        flags: &mut Vec<String>,
    ) -> Option<(SourceId, f64)> {
        for provider in &self.providers {
            let Some(outcome) = bounded(deadline, provider.top10_pct(input)).await else {
                self.expired(flags);
                return None;
            };
            if let Some(pct) = accept(provider.source(), outcome, flags) {
                return Some((provider.source(), pct));
            }
        }
        None
    }

    /// Every provider at once. Outcomes that beat the deadline are still
    /// selected in tier order; late ones count as skipped.
    async fn poll_all(
        &self,
        input: &ResolveInput,
        deadline: Option<Instant>,
        flags: &mut Vec<String>,
    ) -> Option<(SourceId, f64)> {
        let polls = self
            .providers
            .iter()
            .map(|p| bounded(deadline, p.top10_pct(input)));
        let outcomes = join_all(polls).await;

        for (provider, outcome) in self.providers.iter().zip(outcomes) {
            let Some(outcome) = outcome else {
                debug!(source = %provider.source(), "Tier missed the deadline");
                self.expired(flags);
                continue;
            };
            if let Some(pct) = accept(provider.source(), outcome, flags) {
                return Some((provider.source(), pct));
            }
        }
        None
    }

    fn expired(&self, flags: &mut Vec<String>) {
        if flags.iter().any(|f| f == DEADLINE_FLAG) {
            return;
        }
        warn!(
            deadline_secs = self.deadline.map(|d| d.as_secs_f64()),
            "Concentration deadline exceeded"
        );
        flags.push(DEADLINE_FLAG.to_string());
    }
}

/// Await `poll` until `deadline`; `None` when it ran out of time.
async fn bounded<T>(deadline: Option<Instant>, poll: impl Future<Output = T>) -> Option<T> {
    match deadline {
        None => Some(poll.await),
        Some(at) => timeout_at(at, poll).await.ok(),
    }
}

/// Turn one provider outcome into a usable percentage or a recorded skip.
fn accept(source: SourceId, outcome: Result<f64, Skip>, flags: &mut Vec<String>) -> Option<f64> {
    let skip = match outcome {
        Ok(pct) if pct.is_finite() && (0.0..=100.0).contains(&pct) => {
            return Some(round_to(pct, 4));
        }
        Ok(pct) => {
            debug!(source = %source, pct, "Discarding out-of-range percentage");
            Skip::NoData
        }
        Err(skip) => skip,
    };

    match &skip {
        Skip::Fetch(err) => warn!(tier = %source.tier(), source = %source, error = %err, "Tier skipped"),
        Skip::Tool(err) => warn!(tier = %source.tier(), source = %source, error = %err, "Tier skipped"),
        other => debug!(tier = %source.tier(), source = %source, reason = ?other, "Tier skipped"),
    }
    if let Some(flag) = skip.flag(source) {
        push_flag(flags, flag);
    }
    None
}

fn push_flag(flags: &mut Vec<String>, flag: String) {
    if !flags.contains(&flag) {
        flags.push(flag);
    }
}
