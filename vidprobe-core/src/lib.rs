//! Core library for smoke-testing a media transcoder.
//!
//! A probe runs the transcoder once on a sample file with a text-overlay
//! filter, waits a bounded amount of time, and reports whether the expected
//! output file appeared. The artifact is removed afterwards.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidprobe_core::config::ProbeConfigBuilder;
//! use vidprobe_core::{ProbeOutcome, run_probe};
//!
//! let config = ProbeConfigBuilder::new()
//!     .input_path("assets/sample.mp4")
//!     .caption("Test")
//!     .timeout_secs(30.0)
//!     .build();
//!
//! let report = run_probe(&config).unwrap();
//! match &report.outcome {
//!     ProbeOutcome::Success => println!("output created"),
//!     ProbeOutcome::NoOutput => println!("no output file created"),
//!     ProbeOutcome::Timeout => println!("transcoder timed out"),
//!     ProbeOutcome::LaunchError { message } => println!("error running transcoder: {message}"),
//! }
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod probe;
pub mod util;
pub mod utils;

// Re-exports for public API
pub use config::{ProbeConfig, ProbeConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use external::{DrawTextFilter, TranscodeCommand, check_dependency, transcoder_version};
pub use probe::{ProbeOutcome, ProbeReport, run_probe};
pub use utils::{format_elapsed, truncate_chars};
