//! Scripted [`ToolRunner`].

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ToolError;
use crate::port::{ToolOutput, ToolRunner};

/// Returns one fixed outcome for every invocation.
pub struct ScriptedTool {
    outcome: Result<ToolOutput, ToolError>,
    runs: AtomicU32,
}

impl ScriptedTool {
    /// Tool that exits successfully printing `stdout`.
    pub fn prints(stdout: impl Into<String>) -> Self {
        Self::with_outcome(Ok(ToolOutput {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }))
    }

    /// Tool that exits unsuccessfully.
    pub fn exits_with_error(stderr: impl Into<String>) -> Self {
        Self::with_outcome(Ok(ToolOutput {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }))
    }

    /// Program not installed.
    pub fn missing() -> Self {
        Self::with_outcome(Err(ToolError::NotFound {
            program: "python3".into(),
        }))
    }

    pub fn with_outcome(outcome: Result<ToolOutput, ToolError>) -> Self {
        Self {
            outcome,
            runs: AtomicU32::new(0),
        }
    }

    pub fn runs(&self) -> u32 {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolRunner for ScriptedTool {
    async fn run(
        &self,
        _program: &str,
        _args: &[String],
        _timeout: Duration,
    ) -> Result<ToolOutput, ToolError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
