//! Inbound ports (driving side): use-cases consumed by inbound adapters.

pub mod operator;
