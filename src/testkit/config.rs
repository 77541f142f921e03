//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::network::RetryConfig;
use crate::infrastructure::config::rules::ScenarioRules;
use crate::infrastructure::config::settings::{Config, Credentials};

/// The rules document shipped in `config/scenario_rules.json`.
pub const BUNDLED_RULES: &str = include_str!("../../config/scenario_rules.json");

/// Parsed and validated bundled rules.
///
/// # Panics
///
/// Panics if the bundled document is invalid.
pub fn rules() -> ScenarioRules {
    ScenarioRules::from_json_str(BUNDLED_RULES).expect("bundled rules are valid")
}

/// Bundled rules as a mutable JSON document, for building variants.
pub fn rules_json() -> serde_json::Value {
    serde_json::from_str(BUNDLED_RULES).expect("bundled rules are JSON")
}

/// Retry policy with no waiting.
pub fn instant_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        base_delay_ms: 0,
        jitter_min_ms: 0,
        jitter_max_ms: 0,
    }
}

/// Every credential set to a recognizable placeholder.
pub fn all_credentials() -> Credentials {
    Credentials {
        solscan: Some("solscan-key".into()),
        birdeye: Some("birdeye-key".into()),
        moralis: Some("moralis-key".into()),
        coingecko: None,
    }
}

/// Default configuration with the external tool disabled and the given
/// credentials, independent of the process environment.
pub fn config_with(credentials: Credentials) -> Config {
    let mut config = Config::default();
    config.bitget.enabled = false;
    config.retry = instant_retry();
    config.credentials = credentials;
    config
}
