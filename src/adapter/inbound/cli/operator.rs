//! Inbound operator accessor for CLI handlers.

use std::path::Path;
use std::sync::OnceLock;

use crate::error::{ConfigError, Result, RulesError};
use crate::port::inbound::operator::port::OperatorPort;
use crate::port::inbound::operator::rules::RulesDocument;

static OPERATOR: OnceLock<Box<dyn OperatorPort>> = OnceLock::new();

/// Installs the operator implementation used by CLI handlers.
pub fn install(operator: Box<dyn OperatorPort>) -> std::result::Result<(), Box<dyn OperatorPort>> {
    OPERATOR.set(operator)
}

/// Returns the configured operator capability surface for CLI handlers.
#[must_use]
pub fn operator() -> &'static dyn OperatorPort {
    OPERATOR
        .get()
        .expect("CLI operator not installed; call cli::operator::install from main")
        .as_ref()
}

/// Load settings TOML from disk for operator-facing use-cases.
pub fn read_config_toml(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?)
}

/// Load a scenario rules document from disk.
pub fn read_rules(path: &Path) -> Result<RulesDocument> {
    let location = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| RulesError::ReadFile {
        path: location.clone(),
        source,
    })?;
    Ok(RulesDocument { location, contents })
}
