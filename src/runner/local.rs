// file: src/runner/local.rs
// version: 2.0.0
// guid: 37c18bf9-3e31-4c3e-8427-26490114559e

//! Local command execution through tokio::process

use super::{CommandRunner, CommandSpec};
use crate::error::WorkbenchError;
use crate::Result;
use std::process::Stdio;
use tracing::{debug, error, info};

/// Runs commands on this machine
#[derive(Debug, Clone, Default)]
pub struct LocalRunner {
    dry_run: bool,
}

impl LocalRunner {
    /// Create a new local runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner that prints mutating commands instead of running them
    ///
    /// Captured-output queries still execute; they only read state.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}

fn spawn_error(spec: &CommandSpec, e: std::io::Error) -> WorkbenchError {
    WorkbenchError::ProcessError {
        command: spec.to_string(),
        exit_code: None,
        stderr: format!("Failed to execute command: {}", e),
    }
}

#[async_trait::async_trait]
impl CommandRunner for LocalRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<()> {
        if self.dry_run {
            info!("DRY RUN: would execute: {}", spec);
            return Ok(());
        }

        debug!("Executing local command: {}", spec);

        let status = spec
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| spawn_error(spec, e))?;

        if !status.success() {
            let exit_code = status.code();
            error!("Command failed with exit code {:?}: {}", exit_code, spec);
            return Err(WorkbenchError::ProcessError {
                command: spec.to_string(),
                exit_code,
                stderr: "see command output above".to_string(),
            });
        }

        debug!("Command executed successfully");
        Ok(())
    }

    async fn output(&self, spec: &CommandSpec) -> Result<String> {
        debug!("Executing local command with output: {}", spec);

        let output = spec
            .to_command()
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| spawn_error(spec, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            let exit_code = output.status.code();
            error!("Command failed with exit code {:?}: {}", exit_code, spec);
            if !stderr.trim().is_empty() {
                error!("STDERR: {}", stderr.trim());
            }

            return Err(WorkbenchError::ProcessError {
                command: spec.to_string(),
                exit_code,
                stderr: if stderr.trim().is_empty() {
                    stdout
                } else {
                    stderr.trim().to_string()
                },
            });
        }

        debug!("Command produced {} bytes of output", stdout.len());
        Ok(stdout)
    }
}
