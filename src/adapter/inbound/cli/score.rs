//! Handler for the `score` command.
//!
//! Re-scores a persisted snapshot. With the rules that produced it the
//! result is bit-identical to the recorded probabilities.

use std::fs;

use serde_json::json;

use super::command::ScoreArgs;
use super::operator::operator;
use super::{output, render, rules};
use crate::error::Result;

/// Execute `score <file>`.
pub fn execute(args: &ScoreArgs) -> Result<()> {
    let (document, _) = rules::load(&args.rules)?;
    let content = fs::read_to_string(&args.file)?;
    let report = operator().rescore(&document, &content)?;
    let snapshot = &report.snapshot;
    let breakdown = &report.breakdown;

    if output::is_json() {
        output::json_output(json!({
            "command": "score",
            "file": args.file.display().to_string(),
            "as_of_utc": snapshot.as_of_utc,
            "scenario_probabilities": breakdown.probabilities,
            "recorded": snapshot.scenario_probabilities,
            "matches_recorded": report.matches_recorded,
            "contributions": breakdown.contributions,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("File", args.file.display());
    output::field("As of", &snapshot.as_of_utc);
    output::field("Asset", &snapshot.asset);

    output::section("Scenario breakdown");
    render::breakdown(breakdown);
    render::dominant(&breakdown.probabilities);

    if report.matches_recorded {
        output::success("Matches the recorded probabilities");
    } else {
        let r = snapshot.scenario_probabilities;
        output::warning(&format!(
            "Recorded probabilities differ: Bull {} Base {} Stress {}",
            r.bull, r.base, r.stress
        ));
        output::hint("the snapshot was probably scored with a different rules document");
    }
    Ok(())
}
