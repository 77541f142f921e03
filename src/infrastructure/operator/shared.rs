//! Shared helper routines for operator implementations.

use crate::error::Result;
use crate::infrastructure::config::rules::ScenarioRules;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::rules::RulesDocument;

/// Settings from `config_toml`, or defaults plus environment credentials.
pub(super) fn settings(config_toml: Option<&str>) -> Result<Config> {
    Config::parse_toml(config_toml.unwrap_or_default())
}

pub(super) fn rules(document: &RulesDocument) -> Result<ScenarioRules> {
    Ok(ScenarioRules::from_json_str(&document.contents)?)
}
