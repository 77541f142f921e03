//! Concentration provider selection and the external tool.

use std::path::PathBuf;

use serde::Deserialize;

/// Holder-list APIs that can serve the authoritative tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthoritativeProvider {
    Solscan,
    Birdeye,
}

/// Fallback chain settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Authoritative providers in the order they are tried.
    #[serde(default = "default_authoritative")]
    pub authoritative: Vec<AuthoritativeProvider>,
    /// Whether the holder-statistics trend tier is consulted.
    #[serde(default = "default_true")]
    pub trend_proxy: bool,
    /// Poll all providers at once, still selecting by priority.
    #[serde(default)]
    pub concurrent: bool,
    /// Wall-clock budget for the network tiers, in seconds.
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

fn default_authoritative() -> Vec<AuthoritativeProvider> {
    vec![AuthoritativeProvider::Solscan, AuthoritativeProvider::Birdeye]
}

const fn default_true() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            authoritative: default_authoritative(),
            trend_proxy: true,
            concurrent: false,
            deadline_secs: None,
        }
    }
}

/// Bitget Wallet command-line integration (privileged tier).
#[derive(Debug, Clone, Deserialize)]
pub struct BitgetConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interpreter or executable to launch.
    #[serde(default = "default_program")]
    pub program: String,
    /// Script passed as the first argument; the tier is skipped when it
    /// does not exist.
    #[serde(default = "default_script")]
    pub script: Option<PathBuf>,
    /// Chain identifier understood by the tool.
    #[serde(default = "default_chain")]
    pub chain: String,
    #[serde(default = "default_tool_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_program() -> String {
    "python3".into()
}

fn default_script() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".openclaw/workspace/skills/bitget-wallet/scripts/bitget_api.py")
    })
}

fn default_chain() -> String {
    "sol".into()
}

const fn default_tool_timeout_secs() -> u64 {
    30
}

impl Default for BitgetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: default_program(),
            script: default_script(),
            chain: default_chain(),
            timeout_secs: default_tool_timeout_secs(),
        }
    }
}
