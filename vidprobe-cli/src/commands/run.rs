// vidprobe-cli/src/commands/run.rs
//
// `vidprobe run`: builds the probe configuration, runs the probe, prints the
// report and decides the exit status.

use log::{debug, info};
use vidprobe_core::{ProbeReport, run_probe};

use crate::cli::RunArgs;
use crate::config::build_probe_config;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal::render_report;

/// Runs one probe and returns the exit status for the process.
pub fn run_probe_command(args: RunArgs) -> CliResult<i32> {
    let config = build_probe_config(&args)?;
    debug!("Probe configuration: {:?}", config);

    let report = run_probe(&config)?;
    info!(
        "Probe finished: {} in {:.2}s",
        report.outcome.label(),
        report.elapsed_secs
    );

    if args.json {
        println!("{}", report_json(&report)?);
    } else {
        print!("{}", render_report(&report, config.timeout_secs));
    }

    Ok(exit_status(&report, args.report_only))
}

fn report_json(report: &ProbeReport) -> CliResult<String> {
    serde_json::to_string_pretty(report).cli_context("serializing report")
}

/// Exit status for a finished probe; `report_only` restores the always-zero behaviour.
pub fn exit_status(report: &ProbeReport, report_only: bool) -> i32 {
    if report_only { 0 } else { report.outcome.exit_status() }
}
