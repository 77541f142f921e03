//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod resolver;
pub mod scorer;
pub mod snapshot;

pub use resolver::ConcentrationResolver;
pub use scorer::ScenarioScorer;
pub use snapshot::{RunOptions, RunReport, SnapshotService};
