//! Miette-based diagnostics for rules and settings failures.
//!
//! The struct fields are read by miette's derive macros when the report is
//! rendered with code snippets and annotations.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::RulesError;

/// Scenario rules error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(thesis_lab::rules))]
pub struct RulesDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// The rules document.
    #[source_code]
    pub src: String,

    /// Problematic region, when it can be located.
    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

impl RulesDiagnostic {
    /// Build a diagnostic for `err` raised while reading `src`.
    #[must_use]
    pub fn from_error(err: &RulesError, src: impl Into<String>) -> Self {
        let src = src.into();
        let (span, help) = match err {
            RulesError::Parse(parse) => (
                line_column_offset(&src, parse.line(), parse.column()).map(|at| (at, 1)),
                "the rules document must be valid JSON with every section present",
            ),
            RulesError::WeightsSum { .. } => (
                locate_path(&src, "weights"),
                "adjust the four weights so they add up to exactly 1.0",
            ),
            RulesError::InvalidValue { field, .. } => (
                locate_path(&src, field),
                "allocations must stay non-negative across every trend strength and neutral-zone shift; band bounds must be ordered",
            ),
            RulesError::ReadFile { .. } => (None, "check the --rules path"),
        };
        Self {
            message: err.to_string(),
            src,
            span: span.map(Into::into),
            help: Some(help.to_string()),
        }
    }
}

/// Settings error with help text.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(thesis_lab::config),
    help("every section is optional; remove the offending key to use its default")
)]
pub struct SettingsDiagnostic {
    pub message: String,
}

impl SettingsDiagnostic {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Byte offset of a 1-based line and column.
fn line_column_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (index, text) in src.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let within = column.saturating_sub(1).min(text.len());
            return Some(offset + within);
        }
        offset += text.len();
    }
    Some(src.len().saturating_sub(1))
}

/// Span of the last key of a dotted path, searching each key after the
/// previous one.
fn locate_path(src: &str, path: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    let mut found = None;
    for key in path.split('.') {
        let quoted = format!("\"{key}\"");
        match src[from..].find(&quoted) {
            Some(at) => {
                let start = from + at;
                found = Some((start, quoted.len()));
                from = start + quoted.len();
            }
            None => break,
        }
    }
    found
}
