//! Snapshot and concentration use-cases for operator-facing adapters.

use async_trait::async_trait;

use super::rules::RulesDocument;
use crate::domain::{ConcentrationResult, RiskFlag, ScoreBreakdown, Snapshot};
use crate::error::Result;

/// Input of one snapshot run.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotRequest<'a> {
    pub config_toml: Option<&'a str>,
    pub rules: &'a RulesDocument,
    pub dry_run: bool,
}

/// Output of one snapshot run. Locations are absent on a dry run.
#[derive(Debug, Clone)]
pub struct SnapshotReport {
    pub snapshot: Snapshot,
    pub breakdown: ScoreBreakdown,
    pub snapshot_location: Option<String>,
    pub timeseries_location: Option<String>,
}

/// Output of resolving concentration alone.
#[derive(Debug, Clone)]
pub struct ConcentrationReport {
    pub token_address: String,
    /// Sources in consultation order, heuristic excluded.
    pub chain: Vec<String>,
    pub result: ConcentrationResult,
    pub risk_flags: Vec<RiskFlag>,
}

/// Snapshot use-cases for operator-facing adapters.
#[async_trait]
pub trait SnapshotOperator: Send + Sync {
    /// Collect, resolve, score and persist one snapshot.
    async fn take_snapshot(&self, request: SnapshotRequest<'_>) -> Result<SnapshotReport>;

    /// Resolve top-10 holder concentration without scoring or persisting.
    async fn resolve_concentration(&self, config_toml: Option<&str>)
        -> Result<ConcentrationReport>;
}
