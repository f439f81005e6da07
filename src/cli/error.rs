//! CLI error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to load model: {0}")]
    LoadError(String),

    #[error("Failed to render report: {0}")]
    OutputError(String),

    #[error("Model is invalid: {0} error(s)")]
    ValidationError(usize),
}
