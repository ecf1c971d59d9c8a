// file: src/error.rs
// version: 3.0.0
// guid: 6a397bfb-ea17-44b3-b8c4-480efb61c749

//! Error types shared by every applet

use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, WorkbenchError>;

/// Errors raised while preparing or running an applet
#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Command '{command}' failed (exit code {exit_code:?}): {stderr}")]
    ProcessError {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("QEMU error: {0}")]
    QemuError(String),

    #[error("Git error: {0}")]
    GitError(String),

    #[error("Toolbox error: {0}")]
    ToolboxError(String),

    #[error("GPIO error: {0}")]
    GpioError(String),

    #[error("Link error: {0}")]
    LinkError(String),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl WorkbenchError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Exit code of the external command, if this error came from one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ProcessError { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}
