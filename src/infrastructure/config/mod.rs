//! Infrastructure configuration modules.

pub mod logging;
pub mod network;
pub mod provider;
pub mod rules;
pub mod settings;
