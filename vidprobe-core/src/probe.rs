// ============================================================================
// vidprobe-core/src/probe.rs
// ============================================================================
//
// PROBE: Run the transcoder once and classify what happened
//
// A probe builds the transcoder command from a ProbeConfig, runs it under the
// configured timeout, checks whether the artifact appeared, removes it, and
// returns a ProbeReport. Every way the run can go wrong after validation is
// expressed as a ProbeOutcome variant rather than an error.
//
// KEY COMPONENTS:
// - ProbeOutcome: success / no-output / timeout / launch-error
// - ProbeReport: everything observed during the run, serializable to JSON
// - run_probe: the single entry point

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::ProbeConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::TranscodeCommand;
use crate::util::command::{CapturedOutput, ProcessCompletion, run_command_with_timeout};
use crate::utils::{decode_lossy, truncate_chars};

/// Process exit status for a successful probe.
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit status when the transcoder produced no artifact.
pub const EXIT_NO_OUTPUT: i32 = 1;

/// Process exit status when the transcoder had to be killed.
pub const EXIT_TIMEOUT: i32 = 124;

/// Process exit status when the transcoder could not be run at all.
pub const EXIT_LAUNCH_ERROR: i32 = 127;

/// How a probe ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ProbeOutcome {
    /// The transcoder finished and the artifact exists.
    Success,
    /// The transcoder finished but left no artifact, whatever its exit code.
    NoOutput,
    /// The transcoder exceeded the timeout and was killed.
    Timeout,
    /// The transcoder could not be started or waited on.
    LaunchError { message: String },
}

impl ProbeOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success)
    }

    /// Short machine-friendly name, matching the JSON `kind` tag.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ProbeOutcome::Success => "success",
            ProbeOutcome::NoOutput => "no-output",
            ProbeOutcome::Timeout => "timeout",
            ProbeOutcome::LaunchError { .. } => "launch-error",
        }
    }

    /// Exit status a command-line caller should terminate with.
    #[must_use]
    pub fn exit_status(&self) -> i32 {
        match self {
            ProbeOutcome::Success => EXIT_SUCCESS,
            ProbeOutcome::NoOutput => EXIT_NO_OUTPUT,
            ProbeOutcome::Timeout => EXIT_TIMEOUT,
            ProbeOutcome::LaunchError { .. } => EXIT_LAUNCH_ERROR,
        }
    }
}

/// Everything observed during one probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Rendered command line, for display only
    pub command: String,
    /// Exit code; absent on timeout, launch error, or death by signal
    pub exit_code: Option<i32>,
    /// Leading excerpt of the captured standard output
    pub stdout: String,
    /// Leading excerpt of the captured standard error
    pub stderr: String,
    pub stdout_truncated: bool,
    pub stderr_truncated: bool,
    /// Where the artifact was expected
    pub output_path: PathBuf,
    /// Whether the artifact existed once the transcoder exited
    pub output_created: bool,
    pub outcome: ProbeOutcome,
    /// Wall-clock time from spawn to classification
    pub elapsed_secs: f64,
    /// Set when the artifact existed but could not be removed
    pub cleanup_error: Option<String>,
}

/// Runs the probe described by `config`.
///
/// The configuration is validated first; that is the only source of `Err`.
/// Launch failures, timeouts and missing artifacts are reported through
/// [`ProbeReport::outcome`].
///
/// # Examples
///
/// ```rust,no_run
/// use vidprobe_core::{ProbeConfig, run_probe};
///
/// let config = ProbeConfig::new("sample.mp4");
/// let report = run_probe(&config).unwrap();
/// println!("{}: exit code {:?}", report.outcome.label(), report.exit_code);
/// std::process::exit(report.outcome.exit_status());
/// ```
pub fn run_probe(config: &ProbeConfig) -> CoreResult<ProbeReport> {
    config.validate()?;

    let command = TranscodeCommand::from_config(config);
    info!("Running probe: {}", command);

    let started = Instant::now();
    let completion = run_command_with_timeout(&mut command.to_command(), config.timeout());

    let mut report = ProbeReport {
        command: command.to_string(),
        exit_code: None,
        stdout: String::new(),
        stderr: String::new(),
        stdout_truncated: false,
        stderr_truncated: false,
        output_path: config.output_path.clone(),
        output_created: false,
        outcome: ProbeOutcome::NoOutput,
        elapsed_secs: 0.0,
        cleanup_error: None,
    };

    match completion {
        Ok(ProcessCompletion::Exited { status, output }) => {
            report.exit_code = status.code();
            info!("Transcoder exit code: {:?}", report.exit_code);
            attach_output(&mut report, &output, config.excerpt_limit);

            report.output_created = config.output_path.exists();
            if report.output_created {
                info!("Output file created: {}", config.output_path.display());
                report.outcome = ProbeOutcome::Success;
                if !config.keep_output {
                    report.cleanup_error = remove_artifact(&config.output_path);
                }
            } else {
                warn!("No output file created at {}", config.output_path.display());
                report.outcome = ProbeOutcome::NoOutput;
            }
        }
        Ok(ProcessCompletion::TimedOut { output }) => {
            warn!(
                "Transcoder timed out after {:.1} seconds",
                config.timeout().as_secs_f64()
            );
            attach_output(&mut report, &output, config.excerpt_limit);
            report.outcome = ProbeOutcome::Timeout;
            if !config.keep_output && config.output_path.exists() {
                debug!("Removing partial output {}", config.output_path.display());
                report.cleanup_error = remove_artifact(&config.output_path);
            }
        }
        Err(err) => {
            error!("Error running transcoder: {}", err);
            report.outcome = ProbeOutcome::LaunchError {
                message: launch_error_message(&err),
            };
        }
    }

    report.elapsed_secs = started.elapsed().as_secs_f64();
    Ok(report)
}

fn attach_output(report: &mut ProbeReport, output: &CapturedOutput, limit: usize) {
    debug!(
        "Captured {} bytes of stdout, {} bytes of stderr",
        output.stdout.len(),
        output.stderr.len()
    );
    (report.stdout, report.stdout_truncated) = truncate_chars(&decode_lossy(&output.stdout), limit);
    (report.stderr, report.stderr_truncated) = truncate_chars(&decode_lossy(&output.stderr), limit);
}

/// Deletes the artifact, returning a description of the failure if any.
fn remove_artifact(path: &Path) -> Option<String> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed {}", path.display());
            None
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!("Failed to remove output file {}: {}", path.display(), e);
            Some(format!("failed to remove {}: {}", path.display(), e))
        }
    }
}

fn launch_error_message(err: &CoreError) -> String {
    match err {
        CoreError::CommandStart(program, source) => {
            format!("failed to start '{}': {}", program, source)
        }
        CoreError::CommandWait(program, source) => {
            format!("failed waiting for '{}': {}", program, source)
        }
        other => other.to_string(),
    }
}
