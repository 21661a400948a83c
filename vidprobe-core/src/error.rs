// ============================================================================
// vidprobe-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the core library
//
// Probe outcomes (timeout, missing output, launch failure) are NOT errors:
// they are reported through `ProbeOutcome`. `CoreError` covers the things that
// stop a probe from being attempted at all, plus the lower-level failures the
// process runner hands back to the invoker for classification.

use std::io;
use thiserror::Error;

/// Custom error types for vidprobe-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("Dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for vidprobe-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a `CommandStart` error for the named program.
pub fn command_start_error(program: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(program.into(), err)
}

/// Builds a `CommandWait` error for the named program.
pub fn command_wait_error(program: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(program.into(), err)
}
