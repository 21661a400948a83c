// ============================================================================
// vidprobe-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the transcoder binary
//
// This module encapsulates everything that knows about the transcoder's
// command-line surface: building the probe invocation and asking the binary
// for its version.
//
// KEY COMPONENTS:
// - TranscodeCommand / TranscodeCommandBuilder: ordered argument construction
// - DrawTextFilter / VideoFilterChain: filter expression construction
// - check_dependency: can the transcoder be executed at all
// - transcoder_version: version query through ffmpeg-sidecar

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_start_error};

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains transcoder argument and filter building logic
pub mod ffmpeg_builder;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_builder::{
    DrawTextFilter, TranscodeCommand, TranscodeCommandBuilder, VideoFilterChain,
    escape_drawtext_text,
};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that `cmd_path` can be executed by running it with `-version`.
///
/// # Returns
///
/// * `Ok(())` - The program started (its exit status is not inspected)
/// * `Err(CoreError::DependencyNotFound)` - If the program is not found
/// * `Err(CoreError::CommandStart)` - If it exists but fails to start
pub fn check_dependency(cmd_path: &Path) -> CoreResult<()> {
    let result = Command::new(cmd_path)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_path.display());
            Err(CoreError::DependencyNotFound(cmd_path.display().to_string()))
        }
        Err(e) => {
            log::error!(
                "Failed to start dependency check command '{}': {}",
                cmd_path.display(),
                e
            );
            Err(command_start_error(cmd_path.display().to_string(), e))
        }
    }
}

/// Asks the transcoder at `ffmpeg_path` for its version string.
///
/// # Returns
///
/// * `Ok(String)` - The version reported by `-version`, e.g. `"6.1.1"`
/// * `Err(CoreError::DependencyNotFound)` - If the program does not exist
/// * `Err(CoreError::CommandStart)` - If it exists but cannot be started
/// * `Err(CoreError::OperationFailed)` - If it ran but the version could not be read
pub fn transcoder_version(ffmpeg_path: &Path) -> CoreResult<String> {
    check_dependency(ffmpeg_path)?;

    match ffmpeg_sidecar::version::ffmpeg_version_with_path(ffmpeg_path) {
        Ok(version) => {
            log::debug!("Found {} version {}", ffmpeg_path.display(), version);
            Ok(version)
        }
        Err(err) => {
            if is_not_found(&err) {
                log::warn!("Dependency '{}' not found.", ffmpeg_path.display());
                Err(CoreError::DependencyNotFound(
                    ffmpeg_path.display().to_string(),
                ))
            } else {
                log::error!(
                    "Failed to query version of '{}': {:#}",
                    ffmpeg_path.display(),
                    err
                );
                Err(CoreError::OperationFailed(format!(
                    "could not determine version of {}: {:#}",
                    ffmpeg_path.display(),
                    err
                )))
            }
        }
    }
}

/// Whether any cause in the chain is an `io::ErrorKind::NotFound`.
fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
    })
}
