//! Handler for the `snapshot` command.

use std::path::PathBuf;

use serde_json::json;

use super::command::SnapshotArgs;
use super::dispatch::load_settings;
use super::operator::operator;
use super::{output, render, rules};
use crate::error::Result;
use crate::port::inbound::operator::snapshot::{SnapshotReport, SnapshotRequest};

/// Execute `snapshot`.
///
/// Rules are loaded and validated before any upstream request.
pub async fn execute(args: &SnapshotArgs) -> Result<()> {
    let settings = load_settings(args.config.as_deref())?;
    let rules_path = args
        .rules
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.view.rules_location));
    let (document, _) = rules::load(&rules_path)?;

    let pb = output::spinner(&format!("Snapshotting {}", settings.view.token_symbol));
    let request = SnapshotRequest {
        config_toml: settings.config_toml.as_deref(),
        rules: &document,
        dry_run: args.dry_run,
    };
    let report = match operator().take_snapshot(request).await {
        Ok(report) => {
            output::spinner_success(&pb, "Snapshot computed");
            report
        }
        Err(err) => {
            output::spinner_fail(&pb, "Snapshot failed");
            return Err(err);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "snapshot",
            "dry_run": args.dry_run,
            "snapshot": report.snapshot,
            "snapshot_path": report.snapshot_location,
            "timeseries_path": report.timeseries_location,
        }));
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &SnapshotReport) {
    let snapshot = &report.snapshot;
    let market = &snapshot.market;
    let onchain = &snapshot.onchain;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("As of", &snapshot.as_of_utc);
    output::field("Asset", &snapshot.asset);

    output::section("Market");
    output::field("Price", output::opt(market.price_usd));
    output::field("Market cap", output::opt(market.mcap_usd));
    output::field("Liquidity", output::opt(market.liquidity_usd));
    output::field("FDV", output::opt(market.fdv_usd));
    output::field("Buy/sell", output::opt(market.buy_sell_txn_ratio_24h));
    output::field("Liq/FDV", output::opt(snapshot.derived.liq_fdv_ratio));
    output::field("Liq change", output::opt(snapshot.derived.liquidity_change_24h));

    output::section("Concentration");
    output::field("Top-10", output::opt(onchain.top10_holder_pct));
    let source = onchain.top10_holder_source.to_string();
    output::field(
        "Source",
        if onchain.top10_holder_is_proxy {
            format!("{} {}", output::negative(&source), output::muted("(proxy)"))
        } else {
            output::positive(&source)
        },
    );

    output::section("Scenario breakdown");
    render::breakdown(&report.breakdown);
    render::dominant(&snapshot.scenario_probabilities);

    output::section("Risk flags");
    render::flags(&snapshot.risk_flags);

    output::section("Output");
    match (&report.snapshot_location, &report.timeseries_location) {
        (Some(snapshot_location), Some(timeseries_location)) => {
            output::field("Snapshot", snapshot_location);
            output::field("Timeseries", timeseries_location);
        }
        _ => output::note("Dry run: nothing written"),
    }
}
