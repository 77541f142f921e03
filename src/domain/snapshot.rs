//! The persisted daily snapshot document and its timeseries projection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::concentration::{ConcentrationResult, SourceId};
use super::flag::RiskFlag;
use super::market::{DerivedMetrics, MarketSnapshot};
use super::scenario::{ScenarioInputs, ScenarioProbabilities};

/// Name of the scoring model written into every snapshot.
pub const MODEL_NAME: &str = "scenario_prob_v1";

/// On-chain section of a snapshot.
///
/// Depth and exchange-flow fields have no collector yet. They are always
/// written, as `null`, so the document schema stays stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnchainMetrics {
    pub top10_holder_pct: Option<f64>,
    pub top10_holder_source: SourceId,
    #[serde(default)]
    pub top10_holder_is_proxy: bool,
    #[serde(default)]
    pub dex_depth_2pct_usd: Option<f64>,
    #[serde(default)]
    pub exchange_inflow_usd_24h: Option<f64>,
    #[serde(default)]
    pub exchange_outflow_usd_24h: Option<f64>,
}

impl From<&ConcentrationResult> for OnchainMetrics {
    fn from(result: &ConcentrationResult) -> Self {
        Self {
            top10_holder_pct: result.top10_pct(),
            top10_holder_source: result.source(),
            top10_holder_is_proxy: result.is_proxy(),
            dex_depth_2pct_usd: None,
            exchange_inflow_usd_24h: None,
            exchange_outflow_usd_24h: None,
        }
    }
}

/// Scoring model provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub rules_source: String,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

/// One period's complete snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub as_of_utc: String,
    pub asset: String,
    pub market: MarketSnapshot,
    pub onchain: OnchainMetrics,
    pub derived: DerivedMetrics,
    #[serde(default)]
    pub scenario_probabilities: ScenarioProbabilities,
    #[serde(default)]
    pub risk_flags: Vec<RiskFlag>,
    #[serde(default)]
    pub sources: Vec<String>,
    pub model: ModelInfo,
}

impl Snapshot {
    /// Signals the scorer reads from this snapshot.
    #[must_use]
    pub fn scenario_inputs(&self) -> ScenarioInputs {
        ScenarioInputs {
            liq_fdv_ratio: self.derived.liq_fdv_ratio,
            liquidity_change_24h: self.derived.liquidity_change_24h,
            buy_sell_ratio_24h: self.market.buy_sell_txn_ratio_24h,
            top10_holder_pct: self.onchain.top10_holder_pct,
            price_change_24h_pct: self.derived.price_change_24h_pct,
        }
    }

    /// Compact row appended to the timeseries file.
    #[must_use]
    pub fn timeseries_row(&self) -> TimeseriesRow {
        TimeseriesRow {
            as_of_utc: self.as_of_utc.clone(),
            price_usd: self.market.price_usd,
            mcap_usd: self.market.mcap_usd,
            liquidity_usd: self.market.liquidity_usd,
            buy_sell_txn_ratio_24h: self.market.buy_sell_txn_ratio_24h,
            top10_holder_pct: self.onchain.top10_holder_pct,
            scenario_probabilities: self.scenario_probabilities,
            risk_flags: self.risk_flags.iter().map(|f| f.id.clone()).collect(),
        }
    }
}

/// One line of the append-only timeseries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesRow {
    pub as_of_utc: String,
    pub price_usd: Option<f64>,
    pub mcap_usd: Option<f64>,
    pub liquidity_usd: Option<f64>,
    pub buy_sell_txn_ratio_24h: Option<f64>,
    pub top10_holder_pct: Option<f64>,
    pub scenario_probabilities: ScenarioProbabilities,
    pub risk_flags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flag::Severity;

    fn snapshot() -> Snapshot {
        Snapshot {
            as_of_utc: "2026-10-16T00:00:00Z".into(),
            asset: "TRUMP".into(),
            market: MarketSnapshot {
                price_usd: Some(8.5),
                liquidity_usd: Some(500_000.0),
                buy_sell_txn_ratio_24h: Some(1.1),
                ..MarketSnapshot::default()
            },
            onchain: OnchainMetrics {
                top10_holder_pct: Some(92.5),
                top10_holder_source: SourceId::HeuristicProxy,
                top10_holder_is_proxy: true,
                dex_depth_2pct_usd: None,
                exchange_inflow_usd_24h: None,
                exchange_outflow_usd_24h: None,
            },
            derived: DerivedMetrics {
                liq_fdv_ratio: Some(0.05),
                liquidity_change_24h: Some(-0.1),
                price_change_24h_pct: Some(2.0),
            },
            scenario_probabilities: ScenarioProbabilities::new(0.3, 0.4, 0.3),
            risk_flags: vec![RiskFlag::triggered(
                "using_heuristic_proxy",
                Severity::Medium,
                vec![],
            )],
            sources: vec!["coingecko".into()],
            model: ModelInfo {
                name: MODEL_NAME.into(),
                rules_source: "config/scenario_rules.json".into(),
                weights: BTreeMap::new(),
            },
        }
    }

    #[test]
    fn scenario_inputs_read_market_and_derived_sections() {
        let inputs = snapshot().scenario_inputs();
        assert_eq!(inputs.liq_fdv_ratio, Some(0.05));
        assert_eq!(inputs.liquidity_change_24h, Some(-0.1));
        assert_eq!(inputs.buy_sell_ratio_24h, Some(1.1));
        assert_eq!(inputs.top10_holder_pct, Some(92.5));
        assert_eq!(inputs.price_change_24h_pct, Some(2.0));
    }

    #[test]
    fn timeseries_row_keeps_flag_ids_only() {
        let row = snapshot().timeseries_row();
        assert_eq!(row.risk_flags, vec!["using_heuristic_proxy".to_string()]);
        assert_eq!(row.top10_holder_pct, Some(92.5));
    }

    #[test]
    fn uncollected_onchain_metrics_are_written_as_null() {
        let result = ConcentrationResult::new(SourceId::SolscanPro, Some(81.2), vec![]);
        let doc = serde_json::to_value(OnchainMetrics::from(&result)).unwrap();

        assert_eq!(doc["top10_holder_pct"], 81.2);
        for key in [
            "dex_depth_2pct_usd",
            "exchange_inflow_usd_24h",
            "exchange_outflow_usd_24h",
        ] {
            assert!(doc.get(key).is_some_and(serde_json::Value::is_null), "{key}");
        }
    }

    #[test]
    fn older_snapshots_without_flow_fields_still_parse() {
        let doc = r#"{"top10_holder_pct":null,"top10_holder_source":"heuristic-proxy"}"#;
        let onchain: OnchainMetrics = serde_json::from_str(doc).unwrap();
        assert_eq!(onchain.dex_depth_2pct_usd, None);
        assert!(!onchain.top10_holder_is_proxy);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let original = snapshot();
        let json = serde_json::to_string_pretty(&original).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
