//! External process runner on tokio.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::ToolError;
use crate::port::{ToolOutput, ToolRunner};

/// Runs tools as child processes, killing them on timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessToolRunner;

#[async_trait]
impl ToolRunner for ProcessToolRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ToolOutput, ToolError> {
        debug!(program, ?args, "Launching tool");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => ToolError::NotFound {
                    program: program.to_string(),
                },
                _ => ToolError::Failed {
                    program: program.to_string(),
                    reason: err.to_string(),
                },
            })?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| ToolError::Timeout {
                program: program.to_string(),
                secs: timeout.as_secs(),
            })?
            .map_err(|err| ToolError::Failed {
                program: program.to_string(),
                reason: err.to_string(),
            })?;

        Ok(ToolOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_not_found() {
        let result = ProcessToolRunner
            .run(
                "thesis-lab-no-such-program",
                &[],
                Duration::from_secs(5),
            )
            .await;
        assert!(matches!(result, Err(ToolError::NotFound { .. })));
    }
}
