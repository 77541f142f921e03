//! Scenario rules use-cases for operator-facing adapters.

use std::collections::BTreeMap;

use crate::domain::rules::NormalizationRules;
use crate::domain::{ScoreBreakdown, Snapshot};
use crate::error::Result;

/// A rules document as handed over by the adapter.
#[derive(Debug, Clone)]
pub struct RulesDocument {
    /// Where the document was read from; recorded when the rules do not
    /// declare their own source.
    pub location: String,
    pub contents: String,
}

/// Summary output for `rules validate`.
#[derive(Debug, Clone)]
pub struct RulesSummary {
    pub rules_source: String,
    pub weights: BTreeMap<String, f64>,
    pub normalization: NormalizationRules,
}

/// Output of re-scoring a persisted snapshot.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    pub snapshot: Snapshot,
    pub breakdown: ScoreBreakdown,
    pub matches_recorded: bool,
}

/// Rules use-cases for operator-facing adapters.
pub trait RulesOperator: Send + Sync {
    /// Parse and validate a rules document.
    fn validate_rules(&self, document: &RulesDocument) -> Result<RulesSummary>;

    /// Score a persisted snapshot document against `document`.
    fn rescore(&self, document: &RulesDocument, snapshot_json: &str) -> Result<ScoreReport>;
}
