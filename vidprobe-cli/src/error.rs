// ============================================================================
// vidprobe-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses vidprobe-core's error type and only adds a way to prefix
// errors with what the CLI was doing when they happened.

// ---- Internal crate imports ----
use vidprobe_core::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fmt;

/// Process exit status for configuration and usage errors.
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Extension trait for adding context to errors in the CLI.
pub trait CliErrorContext<T> {
    /// Add context to an error.
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", context, core_error))
        })
    }
}
