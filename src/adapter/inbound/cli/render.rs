//! Tables shared by the snapshot, score and concentration commands.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::{RiskFlag, ScenarioProbabilities, ScoreBreakdown, Severity};

#[derive(Tabled)]
struct ContributionRow {
    #[tabled(rename = "Dimension")]
    dimension: &'static str,
    #[tabled(rename = "Band")]
    band: &'static str,
    #[tabled(rename = "Bull")]
    bull: String,
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "Stress")]
    stress: String,
}

#[derive(Tabled)]
struct FlagRow {
    #[tabled(rename = "Flag")]
    id: String,
    #[tabled(rename = "Severity")]
    severity: &'static str,
    #[tabled(rename = "Evidence")]
    evidence: String,
}

fn cell(value: f64) -> String {
    format!("{value:.4}")
}

/// Print per-dimension contributions, the raw sum and the normalized result.
pub fn breakdown(breakdown: &ScoreBreakdown) {
    let mut rows: Vec<ContributionRow> = breakdown
        .contributions
        .iter()
        .map(|c| ContributionRow {
            dimension: c.dimension.as_str(),
            band: c.band,
            bull: cell(c.allocation.bull),
            base: cell(c.allocation.base),
            stress: cell(c.allocation.stress),
        })
        .collect();
    rows.push(ContributionRow {
        dimension: "raw",
        band: "",
        bull: cell(breakdown.raw.bull),
        base: cell(breakdown.raw.base),
        stress: cell(breakdown.raw.stress),
    });
    let p = breakdown.probabilities;
    rows.push(ContributionRow {
        dimension: "normalized",
        band: "",
        bull: p.bull.to_string(),
        base: p.base.to_string(),
        stress: p.stress.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output::lines(&table.to_string());
}

/// One line naming the dominant scenario.
pub fn dominant(probabilities: &ScenarioProbabilities) {
    let scenario = probabilities.dominant();
    output::field(
        "Dominant",
        output::highlight(format!("{scenario} ({})", probabilities.get(scenario))),
    );
}

/// Print risk flags, or a note when there are none.
pub fn flags(flags: &[RiskFlag]) {
    if flags.is_empty() {
        output::success("No risk flags");
        return;
    }
    let rows: Vec<FlagRow> = flags
        .iter()
        .map(|f| FlagRow {
            id: f.id.clone(),
            severity: match f.severity {
                Severity::Low => "low",
                Severity::Medium => "medium",
            },
            evidence: f.evidence.join(", "),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output::lines(&table.to_string());
}
