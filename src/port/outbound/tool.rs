//! External command-line collaborator port.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ToolError;

/// Captured result of a finished tool process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs an external program and captures its output.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run `program` with `args`, killing it after `timeout`.
    ///
    /// # Errors
    ///
    /// [`ToolError::NotFound`] when the program is not installed, otherwise
    /// a timeout or spawn failure.
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ToolOutput, ToolError>;
}
