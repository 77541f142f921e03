//! The once-per-period snapshot run.
//!
//! Collects market data, resolves concentration, scores scenarios, discloses
//! degraded inputs as risk flags, and persists the result. Upstream failures
//! never abort the run; only local I/O does.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::resolver::ConcentrationResolver;
use super::scorer::ScenarioScorer;
use crate::domain::{
    ConcentrationResult, DerivedMetrics, MarketSnapshot, ModelInfo, OnchainMetrics, PoolStats,
    PriceQuote, RiskFlag, RiskFlags, ScoreBreakdown, Severity, Snapshot, SourceId, MODEL_NAME,
};
use crate::error::Result;
use crate::port::{PoolSource, PriceSource, ResolveInput, SnapshotStore};

/// Evidence attached to the heuristic-proxy flag.
pub const HEURISTIC_FORMULA_EVIDENCE: &str = "formula:top10=100-((liq/fdv)*100*1.5)";

/// Timestamp format of `as_of_utc`.
pub const AS_OF_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute everything but write nothing.
    pub dry_run: bool,
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub snapshot: Snapshot,
    pub breakdown: ScoreBreakdown,
    pub snapshot_path: Option<PathBuf>,
    pub timeseries_path: Option<PathBuf>,
}

/// Assembles and persists daily snapshots.
pub struct SnapshotService {
    price: Arc<dyn PriceSource>,
    pool: Arc<dyn PoolSource>,
    resolver: ConcentrationResolver,
    scorer: ScenarioScorer,
    store: Arc<dyn SnapshotStore>,
    asset: String,
    rules_source: String,
}

impl SnapshotService {
    pub fn new(
        price: Arc<dyn PriceSource>,
        pool: Arc<dyn PoolSource>,
        resolver: ConcentrationResolver,
        scorer: ScenarioScorer,
        store: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            price,
            pool,
            resolver,
            scorer,
            store,
            asset: "TRUMP".into(),
            rules_source: "config/scenario_rules.json".into(),
        }
    }

    /// Ticker written into the snapshot.
    #[must_use]
    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = asset.into();
        self
    }

    /// Rules location recorded in the model metadata.
    #[must_use]
    pub fn with_rules_source(mut self, source: impl Into<String>) -> Self {
        self.rules_source = source.into();
        self
    }

    /// Run once for the period containing `now`.
    ///
    /// # Errors
    ///
    /// Returns an error only when reading history or writing output fails.
    pub async fn run(&self, now: DateTime<Utc>, options: RunOptions) -> Result<RunReport> {
        let mut market_flags = RiskFlags::new();
        let (quote, pool) = tokio::join!(self.price.quote(), self.pool.pool_stats());

        let quote = quote.unwrap_or_else(|err| {
            warn!(source = self.price.name(), error = %err, "Price source unavailable");
            market_flags.push(unavailable(self.price.name()));
            PriceQuote::default()
        });
        let pool = pool.unwrap_or_else(|err| {
            warn!(source = self.pool.name(), error = %err, "Pool source unavailable");
            market_flags.push(unavailable(self.pool.name()));
            PoolStats::default()
        });

        let market = MarketSnapshot::from_parts(quote, pool);
        let today = now.date_naive();
        let previous_liquidity = self.store.previous_liquidity(today)?;
        let derived = DerivedMetrics::compute(&market, pool.price_change_24h_pct, previous_liquidity);

        let concentration = self
            .resolver
            .resolve(&ResolveInput {
                liquidity_usd: market.liquidity_usd,
                fdv_usd: market.fdv_usd,
            })
            .await;

        let mut flags = concentration_flags(&concentration);
        for flag in market_flags.iter() {
            flags.push(flag.clone());
        }

        let rules = self.scorer.rules();
        let mut snapshot = Snapshot {
            as_of_utc: now.format(AS_OF_FORMAT).to_string(),
            asset: self.asset.clone(),
            market,
            onchain: OnchainMetrics::from(&concentration),
            derived,
            scenario_probabilities: Default::default(),
            risk_flags: flags.into_vec(),
            sources: vec![
                self.price.name().to_string(),
                self.pool.name().to_string(),
                concentration.source().to_string(),
            ],
            model: ModelInfo {
                name: MODEL_NAME.into(),
                rules_source: rules.source_label(&self.rules_source).to_string(),
                weights: rules.weights.to_map(),
            },
        };

        let breakdown = self.scorer.breakdown(&snapshot.scenario_inputs());
        snapshot.scenario_probabilities = breakdown.probabilities;
        info!(
            bull = breakdown.probabilities.bull,
            base = breakdown.probabilities.base,
            stress = breakdown.probabilities.stress,
            flags = snapshot.risk_flags.len(),
            "Scenario probabilities computed"
        );

        if options.dry_run {
            info!("Dry run, nothing written");
            return Ok(RunReport {
                snapshot,
                breakdown,
                snapshot_path: None,
                timeseries_path: None,
            });
        }

        let snapshot_path = self.store.write_snapshot(today, &snapshot)?;
        let timeseries_path = self.store.append_timeseries(&snapshot.timeseries_row())?;
        info!(
            snapshot = %snapshot_path.display(),
            timeseries = %timeseries_path.display(),
            "Snapshot persisted"
        );

        Ok(RunReport {
            snapshot,
            breakdown,
            snapshot_path: Some(snapshot_path),
            timeseries_path: Some(timeseries_path),
        })
    }
}

fn unavailable(source: &str) -> RiskFlag {
    RiskFlag::triggered(
        format!("{source}_unavailable"),
        Severity::Low,
        vec![format!("source:{source}")],
    )
}

/// Risk flags disclosing how the concentration figure was obtained.
///
/// Resolver flags come first, in order, with evidence naming the final
/// source. The heuristic flag is re-added last with the formula as evidence;
/// a non-heuristic source without a value yields `onchain_top10_unavailable`.
#[must_use]
pub fn concentration_flags(result: &ConcentrationResult) -> RiskFlags {
    let source = result.source();
    let heuristic_flag = SourceId::HeuristicProxy.proxy_flag();
    let mut flags = RiskFlags::new();

    for id in result.flags() {
        if Some(id.as_str()) == heuristic_flag {
            continue;
        }
        let severity = if id.contains("unauthorized") {
            Severity::Medium
        } else {
            Severity::Low
        };
        flags.push(RiskFlag::triggered(
            id.clone(),
            severity,
            vec![format!("source:{source}")],
        ));
    }

    if source == SourceId::HeuristicProxy {
        flags.push(RiskFlag::triggered(
            "using_heuristic_proxy",
            Severity::Medium,
            vec![
                format!("source:{source}"),
                HEURISTIC_FORMULA_EVIDENCE.to_string(),
            ],
        ));
    } else if result.top10_pct().is_none() {
        flags.push(RiskFlag::triggered(
            "onchain_top10_unavailable",
            Severity::Low,
            vec![format!("source:{source}")],
        ));
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_flag_moves_to_end_with_formula() {
        let result = ConcentrationResult::new(
            SourceId::HeuristicProxy,
            Some(92.5),
            vec![
                "solscan_pro_unauthorized".into(),
                "using_heuristic_proxy".into(),
                "moralis_stats_unavailable".into(),
            ],
        );
        let flags = concentration_flags(&result).into_vec();
        let ids: Vec<&str> = flags.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "solscan_pro_unauthorized",
                "moralis_stats_unavailable",
                "using_heuristic_proxy"
            ]
        );
        assert_eq!(flags[0].severity, Severity::Medium);
        assert_eq!(flags[1].severity, Severity::Low);
        assert_eq!(flags[0].evidence, vec!["source:heuristic-proxy".to_string()]);
        assert_eq!(flags[2].evidence[1], HEURISTIC_FORMULA_EVIDENCE);
    }

    #[test]
    fn exact_source_adds_no_proxy_flag() {
        let result = ConcentrationResult::new(
            SourceId::SolscanPro,
            Some(81.2),
            vec!["bitget_wallet_unavailable".into()],
        );
        let flags = concentration_flags(&result);
        assert_eq!(flags.len(), 1);
        assert!(flags.contains("bitget_wallet_unavailable"));
    }

    #[test]
    fn moralis_proxy_keeps_its_own_flag() {
        let result = ConcentrationResult::new(
            SourceId::MoralisEnhancedProxy,
            Some(93.0),
            vec!["using_moralis_enhanced_proxy".into()],
        );
        let flags = concentration_flags(&result);
        assert!(flags.contains("using_moralis_enhanced_proxy"));
        assert!(!flags.contains("using_heuristic_proxy"));
    }
}
