// ============================================================================
// vidprobe-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for ProbeConfig
//
// Fluent construction of ProbeConfig. Fields not set on the builder keep the
// defaults from the parent module. The builder does not validate; call
// `ProbeConfig::validate` on the result.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::ProbeConfig;
use crate::external::ffmpeg_builder::DrawTextFilter;

/// Builder for creating ProbeConfig instances.
///
/// # Examples
///
/// ```rust
/// use vidprobe_core::config::ProbeConfigBuilder;
///
/// let config = ProbeConfigBuilder::new()
///     .ffmpeg_path("/usr/local/bin/ffmpeg")
///     .input_path("sample.mp4")
///     .caption("Hello, world")
///     .keep_output(true)
///     .build();
///
/// assert_eq!(
///     config.filter,
///     r#"drawtext=text="Hello\, world":x=100:y=100:fontsize=50:fontcolor=white"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProbeConfigBuilder {
    config: ProbeConfig,
}

impl ProbeConfigBuilder {
    /// Creates a new ProbeConfigBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration, e.g. one loaded from a file.
    pub fn from_config(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Sets the transcoder executable.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffmpeg_path = path.into();
        self
    }

    /// Sets the input media file.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input_path = path.into();
        self
    }

    /// Sets the artifact path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Sets a raw filter expression.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.config.filter = filter.into();
        self
    }

    /// Replaces the filter with a default-styled drawtext caption.
    ///
    /// Text that is empty after cleaning leaves the current filter untouched.
    pub fn caption(mut self, text: &str) -> Self {
        if let Some(filter) = DrawTextFilter::new(text).build() {
            self.config.filter = filter;
        }
        self
    }

    /// Sets the video codec.
    pub fn video_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.video_codec = codec.into();
        self
    }

    /// Sets the audio codec.
    pub fn audio_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.audio_codec = codec.into();
        self
    }

    /// Sets the requested output duration in seconds.
    pub fn duration_secs(mut self, secs: u32) -> Self {
        self.config.duration_secs = secs;
        self
    }

    /// Sets the process timeout in seconds.
    pub fn timeout_secs(mut self, secs: f64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Sets how many characters of each stream the report keeps.
    pub fn excerpt_limit(mut self, limit: usize) -> Self {
        self.config.excerpt_limit = limit;
        self
    }

    /// Keeps the artifact on disk after a successful run.
    pub fn keep_output(mut self, keep: bool) -> Self {
        self.config.keep_output = keep;
        self
    }

    /// Builds the ProbeConfig.
    pub fn build(self) -> ProbeConfig {
        self.config
    }
}
