//! Tests for factory functions.
//!
//! Verifies that factory functions build the provider chain the
//! configuration asks for.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::SourceId;
use crate::error::{FetchError, ToolError};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::provider::build_providers;
use crate::port::{JsonFetcher, ToolOutput, ToolRunner};

struct NoFetch;

#[async_trait]
impl JsonFetcher for NoFetch {
    async fn get_json(&self, url: &str, _headers: &[(&str, &str)]) -> Result<Value, FetchError> {
        Err(FetchError::NotFound { url: url.into() })
    }
}

struct NoTool;

#[async_trait]
impl ToolRunner for NoTool {
    async fn run(
        &self,
        program: &str,
        _args: &[String],
        _timeout: std::time::Duration,
    ) -> Result<ToolOutput, ToolError> {
        Err(ToolError::NotFound {
            program: program.into(),
        })
    }
}

fn sources(toml: &str) -> Vec<SourceId> {
    let config = Config::parse_toml(toml).expect("config should parse");
    build_providers(&config, Arc::new(NoFetch), Arc::new(NoTool))
        .iter()
        .map(|p| p.source())
        .collect()
}

#[test]
fn default_chain_covers_every_network_tier() {
    assert_eq!(
        sources(""),
        vec![
            SourceId::BitgetWallet,
            SourceId::SolscanPro,
            SourceId::Birdeye,
            SourceId::MoralisEnhancedProxy,
        ]
    );
}

#[test]
fn authoritative_order_follows_config() {
    let toml = r#"
        [bitget]
        enabled = false

        [resolver]
        authoritative = ["birdeye", "solscan"]
        trend_proxy = false
    "#;
    assert_eq!(sources(toml), vec![SourceId::Birdeye, SourceId::SolscanPro]);
}
