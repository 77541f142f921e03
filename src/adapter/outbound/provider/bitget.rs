//! Bitget Wallet command-line tool (privileged tier).
//!
//! The tool prints `{"status": 0, "data": {"top10_holder_percent": x}}`.
//! Depending on the token it reports a fraction or a percentage, see
//! [`normalize_privileged_pct`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::adapter::outbound::json;
use crate::domain::{normalize_privileged_pct, SourceId, TokenAddress};
use crate::error::ToolError;
use crate::infrastructure::config::provider::BitgetConfig;
use crate::port::{ConcentrationProvider, ResolveInput, Skip, ToolRunner};

pub struct BitgetProvider {
    runner: Arc<dyn ToolRunner>,
    program: String,
    script: Option<PathBuf>,
    chain: String,
    address: TokenAddress,
    timeout: Duration,
}

impl BitgetProvider {
    pub fn new(runner: Arc<dyn ToolRunner>, config: &BitgetConfig, address: TokenAddress) -> Self {
        Self {
            runner,
            program: config.program.clone(),
            script: config.script.clone(),
            chain: config.chain.clone(),
            address,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn args(&self, script: &std::path::Path) -> Vec<String> {
        vec![
            script.display().to_string(),
            "token-info".into(),
            "--chain".into(),
            self.chain.clone(),
            "--contract".into(),
            self.address.to_string(),
        ]
    }

    fn failed(&self, reason: impl Into<String>) -> Skip {
        Skip::Tool(ToolError::Failed {
            program: self.program.clone(),
            reason: reason.into(),
        })
    }
}

/// Read the raw top-10 figure from tool output.
///
/// `Ok(None)` means the tool answered but had no figure for the token.
///
/// # Errors
///
/// Returns a description when the output is not the expected envelope.
pub fn parse_token_info(stdout: &str) -> Result<Option<f64>, String> {
    let doc: Value =
        serde_json::from_str(stdout.trim()).map_err(|err| format!("invalid JSON: {err}"))?;
    match doc.get("status").and_then(Value::as_i64) {
        Some(0) => {}
        other => return Err(format!("unexpected status {other:?}")),
    }
    let data = doc.get("data").ok_or("missing data")?;
    Ok(json::number_at(data, &["top10_holder_percent"]))
}

#[async_trait]
impl ConcentrationProvider for BitgetProvider {
    fn source(&self) -> SourceId {
        SourceId::BitgetWallet
    }

    async fn top10_pct(&self, _input: &ResolveInput) -> Result<f64, Skip> {
        let script = match &self.script {
            Some(script) if script.exists() => script,
            _ => return Err(Skip::ToolAbsent),
        };

        let output = self
            .runner
            .run(&self.program, &self.args(script), self.timeout)
            .await?;
        if !output.success {
            return Err(self.failed(format!("exited unsuccessfully: {}", output.stderr.trim())));
        }

        let raw = parse_token_info(&output.stdout)
            .map_err(|reason| self.failed(reason))?
            .ok_or(Skip::NoData)?;
        debug!(raw, "Bitget token info received");

        let pct = normalize_privileged_pct(raw);
        if !(0.0..=100.0).contains(&pct) {
            return Err(Skip::NoData);
        }
        Ok(pct)
    }
}
