//! Unified operator capability surface for inbound adapters.

use super::configuration::ConfigurationOperator;
use super::rules::RulesOperator;
use super::snapshot::SnapshotOperator;

/// Unified operator capability surface consumed by inbound adapters.
pub trait OperatorPort: ConfigurationOperator + RulesOperator + SnapshotOperator {}

impl<T> OperatorPort for T where T: ConfigurationOperator + RulesOperator + SnapshotOperator {}
