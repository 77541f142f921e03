//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration, rules loading and component wiring.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`factory`] - Component factory functions
//! - [`operator`] - Use-cases behind the inbound operator ports

pub mod config;
pub mod factory;
pub mod operator;
