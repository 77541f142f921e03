//! Exchange-agnostic domain types and closed-form math.
//!
//! Nothing here performs I/O. Adapters translate provider payloads into these
//! types; the application layer composes them into a run.

pub mod concentration;
pub mod flag;
pub mod holder;
pub mod id;
pub mod market;
pub mod numeric;
pub mod rules;
pub mod scenario;
pub mod snapshot;

pub use concentration::{
    enhanced_proxy, heuristic_proxy, normalize_privileged_pct, ConcentrationResult, SourceId, Tier,
};
pub use flag::{RiskFlag, RiskFlags, Severity};
pub use holder::{compute_top10_pct, HolderRecord, SupplyMeta, TOP_HOLDER_COUNT};
pub use id::TokenAddress;
pub use market::{DerivedMetrics, MarketSnapshot, PoolStats, PriceQuote};
pub use rules::ScenarioRules;
pub use scenario::{
    Allocation, Contribution, Dimension, Scenario, ScenarioInputs, ScenarioProbabilities,
    ScoreBreakdown,
};
pub use snapshot::{ModelInfo, OnchainMetrics, Snapshot, TimeseriesRow, MODEL_NAME};
