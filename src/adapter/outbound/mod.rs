//! Outbound adapters: HTTP, external tools, providers and persistence.

pub mod http;
pub mod json;
pub mod market;
pub mod provider;
pub mod store;
pub mod tool;
