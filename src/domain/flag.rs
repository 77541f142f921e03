//! Risk flags disclosing degraded data in an emitted snapshot.

use serde::{Deserialize, Serialize};

/// Flag severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
}

/// A triggered data-quality condition with supporting evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub id: String,
    pub triggered: bool,
    pub severity: Severity,
    pub evidence: Vec<String>,
}

impl RiskFlag {
    /// Create a triggered flag.
    pub fn triggered(id: impl Into<String>, severity: Severity, evidence: Vec<String>) -> Self {
        Self {
            id: id.into(),
            triggered: true,
            severity,
            evidence,
        }
    }
}

/// Append-only list of flags; a flag id is recorded at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskFlags(Vec<RiskFlag>);

impl RiskFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, flag: RiskFlag) {
        if !self.contains(&flag.id) {
            self.0.push(flag);
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|f| f.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RiskFlag> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<RiskFlag> {
        self.0
    }
}
