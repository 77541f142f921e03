//! Handler for the `concentration` command: the resolver alone.

use serde_json::json;

use super::command::ConfigArg;
use super::dispatch::load_settings;
use super::operator::operator;
use super::{output, render};
use crate::error::Result;

/// Execute `concentration`.
pub async fn execute(arg: &ConfigArg) -> Result<()> {
    let settings = load_settings(arg.config.as_deref())?;

    let pb = output::spinner("Resolving top-10 holder concentration");
    let report = match operator()
        .resolve_concentration(settings.config_toml.as_deref())
        .await
    {
        Ok(report) => {
            output::spinner_success(&pb, "Concentration resolved");
            report
        }
        Err(err) => {
            output::spinner_fail(&pb, "Concentration failed");
            return Err(err);
        }
    };
    let result = &report.result;

    if output::is_json() {
        output::json_output(json!({
            "command": "concentration",
            "chain": report.chain,
            "result": result,
            "risk_flags": report.risk_flags,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Token", &report.token_address);
    output::field("Chain", report.chain.join(" → "));
    output::section("Result");
    output::field("Top-10", output::opt(result.top10_pct()));
    output::field("Source", output::highlight(result.source()));
    output::field("Tier", result.source().tier());
    output::field("Proxy", result.is_proxy());

    output::section("Risk flags");
    render::flags(&report.risk_flags);
    Ok(())
}
