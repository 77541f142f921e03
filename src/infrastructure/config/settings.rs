//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; API credentials come only from
//! the environment (`SOLSCAN_API_KEY`, `BIRDEYE_API_KEY`, `MORALIS_API_KEY`,
//! `COINGECKO_API_KEY`).
//!
//! # Example
//!
//! ```no_run
//! use thesis_lab::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("thesis-lab.toml")?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::network::{NetworkConfig, RetryConfig, TokenConfig};
use super::provider::{BitgetConfig, ResolverConfig};
use crate::error::{ConfigError, Result};

/// Where snapshots, the timeseries and the scenario rules live.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
    #[serde(default = "default_timeseries")]
    pub timeseries: PathBuf,
    #[serde(default = "default_rules")]
    pub rules: PathBuf,
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("data/snapshots")
}

fn default_timeseries() -> PathBuf {
    PathBuf::from("data/timeseries.jsonl")
}

fn default_rules() -> PathBuf {
    PathBuf::from("config/scenario_rules.json")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
            timeseries: default_timeseries(),
            rules: default_rules(),
        }
    }
}

/// Provider API keys. Never read from the config file.
#[derive(Clone, Default)]
pub struct Credentials {
    pub solscan: Option<String>,
    pub birdeye: Option<String>,
    pub moralis: Option<String>,
    pub coingecko: Option<String>,
}

impl Credentials {
    /// Read every key from the environment; blank values count as absent.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            solscan: env_secret("SOLSCAN_API_KEY"),
            birdeye: env_secret("BIRDEYE_API_KEY"),
            moralis: env_secret("MORALIS_API_KEY"),
            coingecko: env_secret("COINGECKO_API_KEY"),
        }
    }
}

fn env_secret(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("solscan", &mask(self.solscan.as_deref()))
            .field("birdeye", &mask(self.birdeye.as_deref()))
            .field("moralis", &mask(self.moralis.as_deref()))
            .field("coingecko", &mask(self.coingecko.as_deref()))
            .finish()
    }
}

/// Render a secret safely for logs and diagnostics.
#[must_use]
pub fn mask(secret: Option<&str>) -> String {
    match secret {
        None => "<missing>".into(),
        Some(s) if s.chars().count() <= 8 => "****".into(),
        Some(s) => {
            let chars: Vec<char> = s.chars().collect();
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}***{tail}")
        }
    }
}

/// Main application configuration.
///
/// Every section has defaults, so an empty file (or no file) yields a
/// working configuration for the default token.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// The tracked token.
    #[serde(default)]
    pub token: TokenConfig,

    /// Upstream endpoints and request timeout.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Fetcher retry policy.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Privileged-tier external tool.
    #[serde(default)]
    pub bitget: BitgetConfig,

    /// Fallback chain selection and deadline.
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Data and rules locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Provider credentials, loaded from the environment.
    #[serde(skip)]
    pub credentials: Credentials,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.credentials = Credentials::from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` when given, otherwise use defaults plus environment
    /// credentials.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when a path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::parse_toml(""),
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.token.address.is_empty() {
            return Err(ConfigError::MissingField {
                field: "token.address",
            }
            .into());
        }
        if self.token.coingecko_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "token.coingecko_id",
            }
            .into());
        }

        let urls = [
            ("coingecko_public_url", &self.network.coingecko_public_url),
            ("coingecko_pro_url", &self.network.coingecko_pro_url),
            ("dexscreener_url", &self.network.dexscreener_url),
            ("solscan_url", &self.network.solscan_url),
            ("birdeye_url", &self.network.birdeye_url),
            ("moralis_url", &self.network.moralis_url),
        ];
        for (field, value) in urls {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
            if let Err(e) = url::Url::parse(value) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: e.to_string(),
                }
                .into());
            }
        }

        if self.network.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.retry.jitter_min_ms > self.retry.jitter_max_ms {
            return Err(ConfigError::InvalidValue {
                field: "jitter_min_ms",
                reason: "must be <= jitter_max_ms".to_string(),
            }
            .into());
        }
        if self.bitget.enabled && self.bitget.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "bitget.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.resolver.deadline_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "deadline_secs",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::provider::AuthoritativeProvider;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.token.symbol, "TRUMP");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.network.timeout_secs, 25);
        assert_eq!(
            config.resolver.authoritative,
            vec![AuthoritativeProvider::Solscan, AuthoritativeProvider::Birdeye]
        );
        assert_eq!(config.paths.rules, PathBuf::from("config/scenario_rules.json"));
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
[token]
symbol = "BONK"
address = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"
coingecko_id = "bonk"

[retry]
max_attempts = 5

[resolver]
authoritative = ["birdeye"]
concurrent = true
deadline_secs = 60
"#,
        )
        .unwrap();

        assert_eq!(config.token.symbol, "BONK");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.resolver.authoritative, vec![AuthoritativeProvider::Birdeye]);
        assert!(config.resolver.concurrent);
        assert_eq!(config.resolver.deadline_secs, Some(60));
    }

    #[test]
    fn rejects_zero_attempts() {
        let result = Config::parse_toml("[retry]\nmax_attempts = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "max_attempts",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_inverted_jitter_range() {
        let result = Config::parse_toml("[retry]\njitter_min_ms = 500\njitter_max_ms = 100\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "jitter_min_ms",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_empty_provider_url() {
        let result = Config::parse_toml("[network]\nsolscan_url = \"\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField {
                field: "solscan_url"
            }))
        ));
    }

    #[test]
    fn mask_hides_secret_body() {
        assert_eq!(mask(None), "<missing>");
        assert_eq!(mask(Some("short")), "****");
        assert_eq!(mask(Some("abcd1234efgh5678")), "abcd***5678");
    }
}
