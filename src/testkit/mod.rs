//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`fetch`] - [`ScriptedFetcher`](fetch::ScriptedFetcher), canned JSON
//!   responses keyed by URL fragment.
//! - [`tool`] - [`ScriptedTool`](tool::ScriptedTool) for the external CLI.
//! - [`provider`] - [`StubProvider`](provider::StubProvider) and stub market
//!   sources with fixed outcomes and optional latency.
//! - [`store`] - [`MemoryStore`](store::MemoryStore), an in-memory snapshot store.
//! - [`domain`] - Payload and input builders.
//! - [`config`] - Canonical test configurations and the bundled rules.

pub mod config;
pub mod domain;
pub mod fetch;
pub mod provider;
pub mod store;
pub mod tool;
