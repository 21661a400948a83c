// vidprobe-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidprobe: transcoder smoke test",
    long_about = "Runs ffmpeg once on a sample file with a text overlay and reports whether it produced output."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v for info, -vv for debug). RUST_LOG is used otherwise.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output.
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,

    /// Also write logs to this file (or to a timestamped file inside this directory).
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs the transcoder on an input file and checks that output was produced
    Run(RunArgs),
    /// Checks that the transcoder can be found and prints its version
    Check(CheckArgs),
}

#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Input media file
    #[arg(short = 'i', long = "input", value_name = "INPUT_PATH")]
    pub input_path: Option<PathBuf>,

    /// Where the transcoder writes its output (default: test_output.mp4)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_PATH")]
    pub output_path: Option<PathBuf>,

    /// Caption drawn on the video with a default-styled drawtext filter
    #[arg(long, value_name = "TEXT", conflicts_with = "filter")]
    pub text: Option<String>,

    /// Raw video filter expression passed with -vf
    #[arg(long, value_name = "FILTER")]
    pub filter: Option<String>,

    /// Video codec (default: libx264)
    #[arg(long, value_name = "CODEC")]
    pub video_codec: Option<String>,

    /// Audio codec (default: copy)
    #[arg(long, value_name = "CODEC")]
    pub audio_codec: Option<String>,

    /// Seconds of output to produce (default: 5)
    #[arg(short = 't', long, value_name = "SECONDS", value_parser = clap::value_parser!(u32).range(1..))]
    pub duration: Option<u32>,

    /// Seconds to wait for the transcoder before killing it (default: 30)
    #[arg(long, value_name = "SECONDS", env = "VIDPROBE_TIMEOUT")]
    pub timeout: Option<f64>,

    /// Transcoder executable (default: ffmpeg on PATH)
    #[arg(long, value_name = "PATH", env = "VIDPROBE_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Characters of stdout/stderr shown in the report (default: 500)
    #[arg(long, value_name = "CHARS")]
    pub excerpt_limit: Option<usize>,

    /// Leave the output file on disk
    #[arg(long, default_value_t = false)]
    pub keep_output: bool,

    /// JSON file with probe settings; command-line flags take precedence
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Always exit 0 once the probe ran, whatever the outcome
    #[arg(long, default_value_t = false)]
    pub report_only: bool,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Transcoder executable
    #[arg(long, value_name = "PATH", env = "VIDPROBE_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,
}
