//! Configuration structures and constants for the vidprobe-core library.
//!
//! A probe is fully described by a [`ProbeConfig`]: which transcoder to run,
//! on which input, with which filter, and how long to wait for it. Every field
//! has a default matching the classic smoke test (five seconds of `libx264`
//! with a white "Test" caption), so callers usually only set the paths.

mod builder;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub use builder::ProbeConfigBuilder;

// Default constants

/// Program executed when no transcoder path is configured.
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Filter expression applied when neither a filter nor caption text is given.
pub const DEFAULT_FILTER: &str = r#"drawtext=text="Test":x=100:y=100:fontsize=50:fontcolor=white"#;

/// Video codec used for the re-encode.
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";

/// Audio codec; `copy` passes the audio stream through untouched.
pub const DEFAULT_AUDIO_CODEC: &str = "copy";

/// Seconds of output the transcoder is asked to produce.
pub const DEFAULT_DURATION_SECS: u32 = 5;

/// Wall-clock budget for the whole transcoder run, in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

/// Destination of the throwaway artifact.
pub const DEFAULT_OUTPUT_PATH: &str = "test_output.mp4";

/// Maximum number of characters kept from each captured stream.
pub const DEFAULT_EXCERPT_LIMIT: usize = 500;

/// Complete description of one probe run.
///
/// Built with [`ProbeConfigBuilder`], loaded from JSON with
/// [`ProbeConfig::from_json_file`], or constructed directly. Call
/// [`ProbeConfig::validate`] before handing it to
/// [`run_probe`](crate::probe::run_probe).
///
/// # Examples
///
/// ```rust
/// use vidprobe_core::config::ProbeConfigBuilder;
///
/// let config = ProbeConfigBuilder::new()
///     .input_path("clips/sample.mp4")
///     .output_path("/tmp/probe.mp4")
///     .duration_secs(2)
///     .timeout_secs(10.0)
///     .build();
///
/// assert_eq!(config.duration_secs, 2);
/// assert_eq!(config.video_codec, "libx264");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Transcoder executable (name looked up on PATH, or a path)
    pub ffmpeg_path: PathBuf,

    /// Source media file; must exist
    pub input_path: PathBuf,

    /// Filter expression passed with `-vf`
    pub filter: String,

    /// Video codec passed with `-c:v`
    pub video_codec: String,

    /// Audio codec passed with `-c:a`
    pub audio_codec: String,

    /// Output duration passed with `-t`
    pub duration_secs: u32,

    /// Wall-clock limit for the transcoder process
    pub timeout_secs: f64,

    /// Artifact written by the transcoder
    pub output_path: PathBuf,

    /// Characters of stdout/stderr kept in the report
    pub excerpt_limit: usize,

    /// Leave the artifact on disk instead of deleting it
    pub keep_output: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_PATH),
            input_path: PathBuf::new(),
            filter: DEFAULT_FILTER.to_string(),
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            duration_secs: DEFAULT_DURATION_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            excerpt_limit: DEFAULT_EXCERPT_LIMIT,
            keep_output: false,
        }
    }
}

impl ProbeConfig {
    /// Creates a configuration for `input_path` with every other field defaulted.
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&contents)?;
        log::debug!("Loaded probe configuration from {}", path.display());
        Ok(config)
    }

    /// The timeout as a `Duration`.
    ///
    /// Values that cannot be represented fall back to the default timeout;
    /// `validate` rejects them anyway.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS))
    }

    /// Checks the configuration before anything is spawned.
    pub fn validate(&self) -> CoreResult<()> {
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(CoreError::Config("transcoder path is empty".to_string()));
        }

        if !self.input_path.is_file() {
            return Err(CoreError::InputNotFound(
                self.input_path.display().to_string(),
            ));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(CoreError::Config("output path is empty".to_string()));
        }

        if self.filter.trim().is_empty() {
            return Err(CoreError::Config("filter expression is empty".to_string()));
        }

        if self.video_codec.trim().is_empty() || self.audio_codec.trim().is_empty() {
            return Err(CoreError::Config("codec names must not be empty".to_string()));
        }

        if self.duration_secs == 0 {
            return Err(CoreError::Config(
                "duration must be at least one second".to_string(),
            ));
        }

        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "timeout must be a positive number of seconds, got {}",
                self.timeout_secs
            )));
        }

        if Duration::try_from_secs_f64(self.timeout_secs).is_err() {
            return Err(CoreError::Config(format!(
                "timeout of {} seconds is too large",
                self.timeout_secs
            )));
        }

        Ok(())
    }
}
