//! Factory modules for building infrastructure components.
//!
//! Provides factory functions that construct fully-configured components
//! from application configuration. These factories handle dependency
//! injection and wiring.
//!
//! # Submodules
//!
//! - [`market`] - Price and pool source construction
//! - [`persistence`] - Snapshot store construction
//! - [`provider`] - Concentration providers and resolver construction
//! - [`service`] - Snapshot service composition root

pub mod market;
pub mod persistence;
pub mod provider;
pub mod service;

#[cfg(test)]
mod tests;
