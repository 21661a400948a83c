// ============================================================================
// vidprobe-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and optional file logging
//
// Logs always go to stderr so that stdout carries only the report (and stays
// valid JSON with --json).
//
// USAGE:
// - no flag: RUST_LOG if set, otherwise warnings and errors only
// - -v: info
// - -vv: debug and above
// - --log-file PATH: same level, duplicated into PATH via fern

use std::path::{Path, PathBuf};

use log::LevelFilter;

use crate::error::{CliErrorContext, CliResult};
use vidprobe_core::CoreError;

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Maps the `-v` count to a level filter. `None` means "let RUST_LOG decide".
pub fn level_for_verbosity(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        _ => Some(LevelFilter::Debug),
    }
}

/// Level used when no `-v` was given: a bare level in RUST_LOG, otherwise warn.
///
/// Module directives (`vidprobe_core=debug`) are only understood by the
/// env_logger path; here they fall back to warn.
pub fn level_from_env(rust_log: Option<&str>) -> LevelFilter {
    rust_log
        .and_then(|value| value.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Resolves `--log-file`: a directory gets a timestamped file name inside it.
pub fn resolve_log_file(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(format!("vidprobe_run_{}.log", get_timestamp()))
    } else {
        path.to_path_buf()
    }
}

/// Installs the global logger.
pub fn init(verbose: u8, log_file: Option<&Path>) -> CliResult<()> {
    let level = level_for_verbosity(verbose);

    let Some(log_file) = log_file else {
        let mut builder = match level {
            Some(level) => {
                let mut builder = env_logger::Builder::new();
                builder.filter_level(level);
                builder
            }
            None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")),
        };
        builder
            .try_init()
            .map_err(|e| CoreError::OperationFailed(format!("failed to initialize logging: {e}")))?;
        return Ok(());
    };

    let log_path = resolve_log_file(log_file);
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).cli_context("creating log directory")?;
    }
    let file = fern::log_file(&log_path)
        .cli_context(format!("opening log file {}", log_path.display()))?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level.unwrap_or_else(|| level_from_env(std::env::var("RUST_LOG").ok().as_deref())))
        .chain(std::io::stderr())
        .chain(file)
        .apply()
        .map_err(|e| CoreError::OperationFailed(format!("failed to initialize logging: {e}")))?;

    log::debug!("Logging to {}", log_path.display());
    Ok(())
}
