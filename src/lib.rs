//! thesis-lab - daily token snapshot with resilient holder-concentration
//! resolution and rule-driven scenario scoring.
//!
//! One run collects market data for a single token, resolves the share of
//! supply held by its ten largest holders through a tiered fallback chain,
//! classifies the state into Bull / Base / Stress probabilities and persists
//! a snapshot document plus a timeseries row.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Pure types and closed-form math: market snapshot, holder
//!   records, concentration provenance, proxy formulas, risk flags, scenario
//!   probabilities and the persisted snapshot document.
//! - **`port`** - Traits at the seams: JSON fetching, the external tool,
//!   concentration providers, market sources and snapshot storage.
//! - **`adapter`** - reqwest fetcher with bounded retry, provider and market
//!   adapters, the filesystem store, and the clap CLI.
//! - **`application`** - `ConcentrationResolver`, `ScenarioScorer` and the
//!   once-per-period `SnapshotService`.
//! - **`infrastructure`** - TOML settings, logging, scenario rules and the
//!   factories that wire adapters from settings.
//!
//! # Features
//!
//! - `testkit` - Scripted fetcher, tool runner, providers and in-memory store
//!   for integration tests.
//!
//! # Example
//!
//! ```no_run
//! use thesis_lab::application::ScenarioScorer;
//! use thesis_lab::domain::ScenarioInputs;
//! use thesis_lab::infrastructure::config::rules::ScenarioRules;
//!
//! let rules = ScenarioRules::load("config/scenario_rules.json")?;
//! let probabilities = ScenarioScorer::new(rules).score(&ScenarioInputs::default());
//! assert!((probabilities.sum() - 1.0).abs() < 1e-9);
//! # Ok::<(), thesis_lab::error::RulesError>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
