// vidprobe-cli/src/commands/check.rs
//
// `vidprobe check`: confirms the transcoder can be executed.

use log::info;
use vidprobe_core::probe::EXIT_LAUNCH_ERROR;
use vidprobe_core::{CoreError, transcoder_version};

use crate::cli::CheckArgs;
use crate::error::CliResult;
use crate::terminal::styling;

/// Prints the transcoder version. A binary that cannot be started exits with 127.
pub fn run_check(args: CheckArgs) -> CliResult<i32> {
    info!("Checking transcoder at {}", args.ffmpeg.display());
    match transcoder_version(&args.ffmpeg) {
        Ok(version) => {
            println!(
                "{} {} version {}",
                styling::SUCCESS_SYMBOL,
                args.ffmpeg.display(),
                version
            );
            Ok(0)
        }
        Err(CoreError::DependencyNotFound(name)) => {
            println!("{} Transcoder not found: {}", styling::ERROR_SYMBOL, name);
            info!("Install ffmpeg, pass --ffmpeg, or set VIDPROBE_FFMPEG");
            Ok(EXIT_LAUNCH_ERROR)
        }
        Err(e @ CoreError::CommandStart(..)) => {
            println!("{} {}", styling::ERROR_SYMBOL, e);
            Ok(EXIT_LAUNCH_ERROR)
        }
        Err(e) => Err(e),
    }
}
