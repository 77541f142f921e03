//! Operator implementations for inbound adapters.

pub mod configuration;
pub mod entry;
pub mod rules;
pub mod snapshot;

mod shared;
