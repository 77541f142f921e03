//! Adapters connecting the application to the outside world.
//!
//! - `inbound` drives the application (the command line).
//! - `outbound` is driven by it (HTTP providers, tools, files).

pub mod inbound;
pub mod outbound;
