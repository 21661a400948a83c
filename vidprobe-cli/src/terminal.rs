// ============================================================================
// vidprobe-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Human-readable rendering of probe reports
//
// Rendering builds a String so it can be tested without a terminal; color is
// a process-wide switch set once from main.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use owo_colors::{OwoColorize, Style};
use vidprobe_core::{ProbeOutcome, ProbeReport, format_elapsed};

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const ERROR_SYMBOL: &str = "✗";
    pub const WARNING_SYMBOL: &str = "!";
    pub const PROCESSING_SYMBOL: &str = "»";

    pub const STATUS_INDENT: &str = "  ";

    /// Appended to an excerpt that was cut short
    pub const TRUNCATION_MARKER: &str = "...";
}

// Global color setting
static USE_COLOR: AtomicBool = AtomicBool::new(true);

/// Set whether to use color in terminal output
pub fn set_color(enable: bool) {
    USE_COLOR.store(enable, Ordering::Relaxed);
}

/// Check if color should be used
fn should_use_color() -> bool {
    USE_COLOR.load(Ordering::Relaxed)
}

/// Whether stdout is a terminal that understands color.
pub fn stdout_supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

fn paint(text: &str, style: Style) -> String {
    if should_use_color() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

fn status_line(symbol: &str, style: Style, message: &str) -> String {
    format!("{} {}\n", paint(symbol, style), message)
}

fn excerpt_line(label: &str, excerpt: &str, truncated: bool) -> String {
    let marker = if truncated { styling::TRUNCATION_MARKER } else { "" };
    format!(
        "{}{}: {}{}\n",
        styling::STATUS_INDENT,
        paint(label, Style::new().cyan()),
        excerpt,
        marker
    )
}

/// Renders a report the way it is printed to the terminal.
pub fn render_report(report: &ProbeReport, timeout_secs: f64) -> String {
    let ok = Style::new().green().bold();
    let bad = Style::new().red().bold();
    let warn = Style::new().yellow().bold();

    let mut out = String::new();
    out.push_str(&status_line(
        styling::PROCESSING_SYMBOL,
        Style::new().blue(),
        &format!("Command: {}", report.command),
    ));

    if let Some(code) = report.exit_code {
        let (symbol, style) = if code == 0 {
            (styling::SUCCESS_SYMBOL, ok)
        } else {
            (styling::WARNING_SYMBOL, warn)
        };
        out.push_str(&status_line(
            symbol,
            style,
            &format!("Transcoder exit code: {code}"),
        ));
    }
    if !report.stderr.is_empty() {
        out.push_str(&excerpt_line("stderr", &report.stderr, report.stderr_truncated));
    }
    if !report.stdout.is_empty() {
        out.push_str(&excerpt_line("stdout", &report.stdout, report.stdout_truncated));
    }

    let output = report.output_path.display();
    match &report.outcome {
        ProbeOutcome::Success => {
            out.push_str(&status_line(
                styling::SUCCESS_SYMBOL,
                ok,
                &format!("Output file created: {output}"),
            ));
        }
        ProbeOutcome::NoOutput => {
            out.push_str(&status_line(styling::ERROR_SYMBOL, bad, "No output file created"));
        }
        ProbeOutcome::Timeout => {
            out.push_str(&status_line(
                styling::ERROR_SYMBOL,
                bad,
                &format!("Transcoder timed out after {timeout_secs} seconds"),
            ));
        }
        ProbeOutcome::LaunchError { message } => {
            out.push_str(&status_line(
                styling::ERROR_SYMBOL,
                bad,
                &format!("Error running transcoder: {message}"),
            ));
        }
    }

    if let Some(cleanup_error) = &report.cleanup_error {
        out.push_str(&status_line(
            styling::WARNING_SYMBOL,
            warn,
            &format!("Cleanup failed: {cleanup_error}"),
        ));
    }

    out.push_str(&format!(
        "{}Elapsed: {}\n",
        styling::STATUS_INDENT,
        format_elapsed(Duration::try_from_secs_f64(report.elapsed_secs).unwrap_or_default())
    ));
    out
}
