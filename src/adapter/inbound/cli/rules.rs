//! Handler for the `rules` command group.

use std::path::Path;

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::diagnostic::RulesDiagnostic;
use super::operator::{operator, read_rules};
use super::output;
use crate::error::{Error, Result};
use crate::port::inbound::operator::rules::{RulesDocument, RulesSummary};

#[derive(Tabled)]
struct WeightRow {
    #[tabled(rename = "Dimension")]
    name: String,
    #[tabled(rename = "Weight")]
    weight: f64,
}

/// Read and validate a rules document.
///
/// Failures are rendered as a diagnostic pointing into the document before
/// the error is returned.
pub fn load(path: &Path) -> Result<(RulesDocument, RulesSummary)> {
    let document = read_rules(path).map_err(|err| report(err, ""))?;
    let summary = operator()
        .validate_rules(&document)
        .map_err(|err| report(err, &document.contents))?;
    Ok((document, summary))
}

fn report(err: Error, src: &str) -> Error {
    if let Error::Rules(rules_err) = &err {
        if !output::is_json() {
            let report = miette::Report::new(RulesDiagnostic::from_error(rules_err, src));
            eprintln!("{report:?}");
        }
    }
    err
}

/// Execute `rules validate`.
pub fn validate(path: &Path) -> Result<()> {
    let (document, summary) = load(path)?;
    let norm = summary.normalization;

    if output::is_json() {
        output::json_output(json!({
            "command": "rules.validate",
            "valid": true,
            "path": document.location,
            "rules_source": summary.rules_source,
            "weights": summary.weights,
            "normalization": {
                "cap_total_probability": norm.cap_total_probability,
                "round_digits": norm.round_digits,
                "correction_target": norm.correction_target,
            },
        }));
        return Ok(());
    }

    output::section("Rules Validation");
    output::field("Path", &document.location);
    output::success("Rules are valid");
    output::field("Source", &summary.rules_source);
    output::field("Target sum", norm.cap_total_probability);
    output::field("Round digits", norm.round_digits);
    output::field("Correction", norm.correction_target);

    let rows: Vec<WeightRow> = summary
        .weights
        .into_iter()
        .map(|(name, weight)| WeightRow { name, weight })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output::section("Weights");
    output::lines(&table.to_string());
    Ok(())
}
