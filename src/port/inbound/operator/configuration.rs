//! Settings projection for operator-facing adapters.

use crate::error::Result;

/// What an inbound adapter needs to know about the loaded settings.
#[derive(Debug, Clone)]
pub struct SettingsView {
    pub token_symbol: String,
    pub token_address: String,
    /// Rules document snapshot runs use unless the operator names another.
    pub rules_location: String,
}

/// Settings use-cases for operator-facing adapters.
pub trait ConfigurationOperator: Send + Sync {
    /// Parse and validate settings, then start logging at the requested
    /// verbosity. Defaults apply when `config_toml` is `None`.
    fn load_settings(
        &self,
        config_toml: Option<&str>,
        quiet: bool,
        verbose: u8,
    ) -> Result<SettingsView>;
}
