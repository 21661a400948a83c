// vidprobe-cli/src/config.rs
//
// Turns `run` arguments into a ProbeConfig: defaults, then the optional JSON
// config file, then command-line flags (which win).

use vidprobe_core::config::ProbeConfigBuilder;
use vidprobe_core::{CoreError, ProbeConfig};

use crate::cli::RunArgs;
use crate::error::{CliErrorContext, CliResult};

/// Builds the probe configuration for `args` without validating it.
pub fn build_probe_config(args: &RunArgs) -> CliResult<ProbeConfig> {
    let base = match &args.config_file {
        Some(path) => ProbeConfig::from_json_file(path)
            .cli_context(format!("loading config file {}", path.display()))?,
        None => ProbeConfig::default(),
    };

    let mut builder = ProbeConfigBuilder::from_config(base);

    if let Some(ffmpeg) = &args.ffmpeg {
        builder = builder.ffmpeg_path(ffmpeg);
    }
    if let Some(input) = &args.input_path {
        builder = builder.input_path(input);
    }
    if let Some(output) = &args.output_path {
        builder = builder.output_path(output);
    }
    if let Some(filter) = &args.filter {
        builder = builder.filter(filter.as_str());
    }
    if let Some(text) = &args.text {
        builder = builder.caption(text);
    }
    if let Some(codec) = &args.video_codec {
        builder = builder.video_codec(codec.as_str());
    }
    if let Some(codec) = &args.audio_codec {
        builder = builder.audio_codec(codec.as_str());
    }
    if let Some(duration) = args.duration {
        builder = builder.duration_secs(duration);
    }
    if let Some(timeout) = args.timeout {
        builder = builder.timeout_secs(timeout);
    }
    if let Some(limit) = args.excerpt_limit {
        builder = builder.excerpt_limit(limit);
    }
    if args.keep_output {
        builder = builder.keep_output(true);
    }

    let config = builder.build();
    if config.input_path.as_os_str().is_empty() {
        return Err(CoreError::Config(
            "no input file given; pass --input or set input_path in the config file".to_string(),
        ));
    }
    Ok(config)
}
