//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the upstream data providers, the external tool
//! process, and snapshot persistence.

pub mod fetch;
pub mod market;
pub mod provider;
pub mod store;
pub mod tool;
