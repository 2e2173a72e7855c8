//! Error types for patchgen.
//!
//! Library crates use [`PatchgenError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all patchgen operations.
#[derive(Debug, thiserror::Error)]
pub enum PatchgenError {
    /// The transcript source (file or stdin) could not be read.
    #[error("failed to read transcript from {source_name}: {source}")]
    InputRead {
        source_name: String,
        source: std::io::Error,
    },

    /// The delegated producer was asked to run without a command.
    #[error("pipeline command not provided")]
    PipelineNotConfigured,

    /// The external pipeline failed to start, exited abnormally, or its
    /// output could not be drained.
    #[error("pipeline execution failed: {0}")]
    PipelineExecution(String),

    /// Serializing a payload or synthesized patch failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PatchgenError>;

impl PatchgenError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a pipeline execution error from any displayable message.
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::PipelineExecution(msg.into())
    }

    /// Wrap a `std::io::Error` raised while reading the transcript source.
    pub fn input(source_name: impl Into<String>, source: std::io::Error) -> Self {
        Self::InputRead {
            source_name: source_name.into(),
            source,
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for PatchgenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}
