//! Runs a single probe against a file given on the command line.
//!
//! ```sh
//! cargo run -p vidprobe-core --example probe_sample -- path/to/clip.mp4 "Caption"
//! ```

use std::env;
use std::process;

use vidprobe_core::config::ProbeConfigBuilder;
use vidprobe_core::run_probe;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let Some(input) = args.next() else {
        eprintln!("usage: probe_sample <input> [caption]");
        process::exit(2);
    };
    let caption = args.next().unwrap_or_else(|| "Test".to_string());

    let config = ProbeConfigBuilder::new()
        .input_path(input)
        .caption(&caption)
        .build();

    match run_probe(&config) {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
            process::exit(report.outcome.exit_status());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}
