//! Rules operator implementation.

use crate::application::ScenarioScorer;
use crate::domain::Snapshot;
use crate::error::Result;
use crate::port::inbound::operator::rules::{
    RulesDocument, RulesOperator, RulesSummary, ScoreReport,
};

use super::{entry::Operator, shared};

impl RulesOperator for Operator {
    fn validate_rules(&self, document: &RulesDocument) -> Result<RulesSummary> {
        let rules = shared::rules(document)?;
        Ok(RulesSummary {
            rules_source: rules.source_label(&document.location).to_string(),
            weights: rules.weights.to_map(),
            normalization: rules.normalization,
        })
    }

    fn rescore(&self, document: &RulesDocument, snapshot_json: &str) -> Result<ScoreReport> {
        let rules = shared::rules(document)?;
        let snapshot: Snapshot = serde_json::from_str(snapshot_json)?;

        let breakdown = ScenarioScorer::new(rules).breakdown(&snapshot.scenario_inputs());
        let matches_recorded = breakdown.probabilities == snapshot.scenario_probabilities;
        Ok(ScoreReport {
            snapshot,
            breakdown,
            matches_recorded,
        })
    }
}
