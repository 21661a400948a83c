//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command. Commands
//! return the process exit status; `Err` is reserved for configuration and
//! setup problems.

/// Module containing the implementation of the `run` command.
pub mod run;

/// Module containing the implementation of the `check` command.
pub mod check;
