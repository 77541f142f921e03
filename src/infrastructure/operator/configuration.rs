//! Configuration operator implementation.

use crate::error::Result;
use crate::port::inbound::operator::configuration::{ConfigurationOperator, SettingsView};

use super::{entry::Operator, shared};

impl ConfigurationOperator for Operator {
    fn load_settings(
        &self,
        config_toml: Option<&str>,
        quiet: bool,
        verbose: u8,
    ) -> Result<SettingsView> {
        let config = shared::settings(config_toml)?;
        config
            .logging
            .clone()
            .with_verbosity(quiet, verbose)
            .init();

        Ok(SettingsView {
            token_symbol: config.token.symbol,
            token_address: config.token.address.to_string(),
            rules_location: config.paths.rules.display().to_string(),
        })
    }
}
