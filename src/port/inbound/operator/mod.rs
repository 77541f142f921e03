//! Operator-facing inbound ports consumed by CLI adapters.

pub mod configuration;
pub mod port;
pub mod rules;
pub mod snapshot;
