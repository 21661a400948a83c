// vidprobe-cli/src/lib.rs
//
// Library portion of the vidprobe CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{CheckArgs, Cli, Commands, RunArgs};
pub use commands::check::run_check;
pub use commands::run::run_probe_command;
pub use error::{CliResult, EXIT_CONFIG_ERROR};
