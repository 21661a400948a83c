//! Utility functions for formatting captured output.
//!
//! This module provides general-purpose helpers used by the probe and by the
//! CLI when rendering a report.

use std::time::Duration;

/// Decodes captured bytes as text. Invalid UTF-8 becomes U+FFFD, never an error.
#[must_use]
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Keeps the first `limit` characters of `text`.
///
/// Returns the excerpt and whether anything was cut. Counts `char`s, so a
/// multi-byte character is never split.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> (String, bool) {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => (text[..byte_index].to_string(), true),
        None => (text.to_string(), false),
    }
}

/// Formats a duration as seconds with millisecond precision (e.g. "1.250s").
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.3}s", elapsed.as_secs_f64())
}
