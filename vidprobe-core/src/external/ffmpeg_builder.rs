//! Transcoder command builder utilities
//!
//! This module builds the argument list handed to the transcoder and the
//! filter expressions that go into it. Arguments are kept as `OsString` so
//! that file names reach the child process exactly as the filesystem
//! reported them, non-ASCII characters included.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::ProbeConfig;

/// A fully built transcoder invocation: program plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl TranscodeCommand {
    /// Builds the probe invocation described by `config`.
    ///
    /// The shape is always
    /// `-i <input> -vf <filter> -c:v <codec> -c:a <codec> -t <secs> -y <output>`.
    #[must_use]
    pub fn from_config(config: &ProbeConfig) -> Self {
        TranscodeCommandBuilder::new(&config.ffmpeg_path)
            .input(&config.input_path)
            .video_filter(&config.filter)
            .video_codec(&config.video_codec)
            .audio_codec(&config.audio_codec)
            .duration_secs(config.duration_secs)
            .overwrite()
            .output(&config.output_path)
            .build()
    }

    /// The executable to run.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The arguments, in order.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Creates a `std::process::Command` with program and arguments set.
    /// Stdio configuration is left to the caller.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for TranscodeCommand {
    /// POSIX shell rendering for logs and reports. Lossy for non-UTF-8 names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

/// Single-quotes `word` unless every character is shell-safe.
fn shell_quote(word: &str) -> Cow<'_, str> {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_alphanumeric() || "-_./:=,+@%".contains(c));
    if safe {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}

/// Builder for transcoder command lines. Arguments appear in call order.
#[derive(Debug, Clone)]
pub struct TranscodeCommandBuilder {
    program: PathBuf,
    args: Vec<OsString>,
}

impl TranscodeCommandBuilder {
    /// Starts a command line for `program`.
    #[must_use]
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Adds a raw argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Adds `-i <path>`.
    #[must_use]
    pub fn input(self, path: impl AsRef<Path>) -> Self {
        self.arg("-i").arg(path.as_ref())
    }

    /// Adds `-vf <filter>`.
    #[must_use]
    pub fn video_filter(self, filter: &str) -> Self {
        self.arg("-vf").arg(filter)
    }

    /// Adds `-c:v <codec>`.
    #[must_use]
    pub fn video_codec(self, codec: &str) -> Self {
        self.arg("-c:v").arg(codec)
    }

    /// Adds `-c:a <codec>`.
    #[must_use]
    pub fn audio_codec(self, codec: &str) -> Self {
        self.arg("-c:a").arg(codec)
    }

    /// Adds `-t <secs>`.
    #[must_use]
    pub fn duration_secs(self, secs: u32) -> Self {
        self.arg("-t").arg(secs.to_string())
    }

    /// Adds `-y`.
    #[must_use]
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Adds the output path as a positional argument.
    #[must_use]
    pub fn output(self, path: impl AsRef<Path>) -> Self {
        self.arg(path.as_ref())
    }

    /// Finishes the command line.
    #[must_use]
    pub fn build(self) -> TranscodeCommand {
        TranscodeCommand {
            program: self.program,
            args: self.args,
        }
    }
}

/// Builder for constructing video filter chains
#[derive(Default)]
pub struct VideoFilterChain {
    filters: Vec<String>,
}

impl VideoFilterChain {
    /// Creates a new empty filter chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom filter to the chain
    #[must_use]
    pub fn add_filter(mut self, filter: String) -> Self {
        if !filter.is_empty() {
            self.filters.push(filter);
        }
        self
    }

    /// Adds a drawtext filter, skipping it when its text is blank
    #[must_use]
    pub fn add_drawtext(self, drawtext: &DrawTextFilter) -> Self {
        match drawtext.build() {
            Some(filter) => self.add_filter(filter),
            None => self,
        }
    }

    /// Builds the filter chain into a single filter string
    #[must_use]
    pub fn build(self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(","))
        }
    }
}

/// Escapes caption text for use inside a double-quoted drawtext `text=` value.
///
/// NUL bytes are dropped and surrounding whitespace trimmed before escaping.
#[must_use]
pub fn escape_drawtext_text(text: &str) -> String {
    let cleaned = text.replace('\0', "");
    let cleaned = cleaned.trim();

    let mut escaped = String::with_capacity(cleaned.len());
    for c in cleaned.chars() {
        if matches!(c, '\\' | '"' | '[' | ']' | '%' | ';' | ',') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A single `drawtext` text overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawTextFilter {
    text: String,
    x: String,
    y: String,
    font_size: u32,
    font_color: String,
    font_file: Option<PathBuf>,
    border: Option<(u32, String)>,
}

impl DrawTextFilter {
    /// Creates an overlay of `text` at (100, 100), 50px, white.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            x: "100".to_string(),
            y: "100".to_string(),
            font_size: 50,
            font_color: "white".to_string(),
            font_file: None,
            border: None,
        }
    }

    /// Sets the position. Either value may be a drawtext expression such as `(w-text_w)/2`.
    #[must_use]
    pub fn position(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x = x.into();
        self.y = y.into();
        self
    }

    #[must_use]
    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn font_color(mut self, color: impl Into<String>) -> Self {
        self.font_color = color.into();
        self
    }

    #[must_use]
    pub fn font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_file = Some(path.into());
        self
    }

    /// Draws an outline of `width` pixels around the glyphs.
    #[must_use]
    pub fn border(mut self, width: u32, color: impl Into<String>) -> Self {
        self.border = Some((width, color.into()));
        self
    }

    /// Renders the filter expression, or `None` if the text is blank after cleaning.
    #[must_use]
    pub fn build(&self) -> Option<String> {
        let text = escape_drawtext_text(&self.text);
        if text.is_empty() {
            return None;
        }

        let mut filter = format!("drawtext=text=\"{}\":x={}:y={}", text, self.x, self.y);
        if let Some(font_file) = &self.font_file {
            filter.push_str(&format!(":fontfile='{}'", font_file.display()));
        }
        filter.push_str(&format!(
            ":fontsize={}:fontcolor={}",
            self.font_size, self.font_color
        ));
        if let Some((width, color)) = &self.border {
            filter.push_str(&format!(":borderw={width}:bordercolor={color}"));
        }
        Some(filter)
    }
}
