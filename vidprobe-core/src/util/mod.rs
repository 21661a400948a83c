//! Utility modules for the vidprobe-core library.

pub mod command;

pub use command::{CapturedOutput, ProcessCompletion, run_command_with_timeout};
