// vidprobe-cli/tests/cli_integration.rs
//
// Runs the compiled `vidprobe` binary against fake transcoders and checks
// what it prints and which exit status it chooses.

use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::{TempDir, tempdir};

// Serializes script creation and spawning; see probe_tests.rs in vidprobe-core.
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

fn spawn_lock() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// Helper function to get the path to the compiled binary
fn vidprobe_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vidprobe").expect("Failed to find vidprobe binary");
    cmd.env_remove("RUST_LOG")
        .env_remove("VIDPROBE_FFMPEG")
        .env_remove("VIDPROBE_TIMEOUT");
    cmd
}

fn dummy_input(dir: &TempDir) -> Result<PathBuf, Box<dyn Error>> {
    let input = dir.path().join("sample.mp4");
    fs::write(&input, "dummy content")?;
    Ok(input)
}

#[cfg(unix)]
fn fake_transcoder(dir: &Path, body: &str) -> Result<PathBuf, Box<dyn Error>> {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-ffmpeg");
    fs::write(&path, format!("#!/bin/sh\nfor last; do :; done\n{body}\n"))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

#[cfg(unix)]
#[test]
fn test_run_success_exits_zero() -> Result<(), Box<dyn Error>> {
    let _guard = spawn_lock();
    let dir = tempdir()?;
    let input = dummy_input(&dir)?;
    let output = dir.path().join("out.mp4");
    let ffmpeg = fake_transcoder(dir.path(), ": > \"$last\"")?;

    vidprobe_cmd()
        .arg("--no-color")
        .arg("run")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .assert()
        .success()
        .stdout(contains("Transcoder exit code: 0"))
        .stdout(contains("Output file created"));

    assert!(!output.exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_run_no_output_exits_one() -> Result<(), Box<dyn Error>> {
    let _guard = spawn_lock();
    let dir = tempdir()?;
    let input = dummy_input(&dir)?;
    let ffmpeg = fake_transcoder(dir.path(), "echo 'Conversion failed!' >&2\nexit 1")?;

    vidprobe_cmd()
        .args(["--no-color", "run", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.mp4"))
        .env("VIDPROBE_FFMPEG", &ffmpeg)
        .assert()
        .code(1)
        .stdout(contains("No output file created"))
        .stdout(contains("stderr: Conversion failed!"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_report_only_exits_zero_on_failure() -> Result<(), Box<dyn Error>> {
    let _guard = spawn_lock();
    let dir = tempdir()?;
    let input = dummy_input(&dir)?;
    let ffmpeg = fake_transcoder(dir.path(), "exit 0")?;

    vidprobe_cmd()
        .args(["run", "--report-only", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.mp4"))
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .assert()
        .success()
        .stdout(contains("No output file created"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_run_timeout_exits_124() -> Result<(), Box<dyn Error>> {
    let _guard = spawn_lock();
    let dir = tempdir()?;
    let input = dummy_input(&dir)?;
    let ffmpeg = fake_transcoder(dir.path(), "exec sleep 30")?;

    vidprobe_cmd()
        .args(["--no-color", "run", "--timeout", "0.5", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.mp4"))
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .code(124)
        .stdout(contains("timed out after 0.5 seconds"));

    Ok(())
}

#[test]
fn test_run_missing_transcoder_exits_127() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dummy_input(&dir)?;

    vidprobe_cmd()
        .args(["--no-color", "run", "--ffmpeg", "vidprobe-no-such-transcoder", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.mp4"))
        .assert()
        .code(127)
        .stdout(contains("Error running transcoder"))
        .stdout(contains("vidprobe-no-such-transcoder"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_run_json_report() -> Result<(), Box<dyn Error>> {
    let _guard = spawn_lock();
    let dir = tempdir()?;
    let input = dummy_input(&dir)?;
    let ffmpeg = fake_transcoder(dir.path(), "printf 'hello'\n: > \"$last\"")?;

    let assert = vidprobe_cmd()
        .args(["run", "--json", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.mp4"))
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["outcome"]["kind"], "success");
    assert_eq!(report["exit_code"], 0);
    assert_eq!(report["stdout"], "hello");
    assert_eq!(report["output_created"], true);

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_run_with_config_file() -> Result<(), Box<dyn Error>> {
    let _guard = spawn_lock();
    let dir = tempdir()?;
    let input = dummy_input(&dir)?;
    let args_file = dir.path().join("args.txt");
    let ffmpeg = fake_transcoder(
        dir.path(),
        &format!("for a; do printf '%s\\n' \"$a\"; done > '{}'", args_file.display()),
    )?;
    let config_file = dir.path().join("probe.json");
    let config = serde_json::json!({
        "ffmpeg_path": ffmpeg,
        "input_path": input,
        "output_path": dir.path().join("out.mp4"),
        "video_codec": "libx265",
        "duration_secs": 2,
    });
    fs::write(&config_file, config.to_string())?;

    vidprobe_cmd()
        .args(["run", "--text", "Olá, mundo", "--config"])
        .arg(&config_file)
        .assert()
        .code(1);

    let recorded = fs::read_to_string(&args_file)?;
    let args: Vec<&str> = recorded.lines().collect();
    assert_eq!(args[3], r#"drawtext=text="Olá\, mundo":x=100:y=100:fontsize=50:fontcolor=white"#);
    assert_eq!(args[5], "libx265");
    assert_eq!(args[9], "2");

    Ok(())
}

#[test]
fn test_run_missing_input_is_config_error() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    vidprobe_cmd()
        .args(["run", "--input"])
        .arg(dir.path().join("missing.mp4"))
        .assert()
        .code(2)
        .stderr(contains("Input file not found"));

    Ok(())
}

#[test]
fn test_run_without_input_is_config_error() {
    vidprobe_cmd()
        .arg("run")
        .assert()
        .code(2)
        .stderr(contains("no input file given"));
}

#[test]
fn test_text_and_filter_are_exclusive() {
    vidprobe_cmd()
        .args(["run", "--input", "in.mp4", "--text", "a", "--filter", "null"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}

#[test]
fn test_check_missing_transcoder_exits_127() {
    vidprobe_cmd()
        .args(["--no-color", "check", "--ffmpeg", "vidprobe-no-such-transcoder"])
        .assert()
        .code(127)
        .stdout(contains("Transcoder not found"));
}

#[cfg(unix)]
#[test]
fn test_log_file_receives_log_lines() -> Result<(), Box<dyn Error>> {
    let _guard = spawn_lock();
    let dir = tempdir()?;
    let input = dummy_input(&dir)?;
    let ffmpeg = fake_transcoder(dir.path(), "exit 0")?;
    let log_file = dir.path().join("logs").join("probe.log");

    vidprobe_cmd()
        .arg("-v")
        .arg("--log-file")
        .arg(&log_file)
        .args(["run", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.mp4"))
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .assert()
        .code(1);

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("Running probe"), "{contents}");
    assert!(contents.contains("No output file created"), "{contents}");

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_log_file_without_verbose_keeps_console_at_warn() -> Result<(), Box<dyn Error>> {
    let _guard = spawn_lock();
    let dir = tempdir()?;
    let input = dummy_input(&dir)?;
    let ffmpeg = fake_transcoder(dir.path(), "exit 0")?;
    let log_file = dir.path().join("quiet.log");

    let assert = vidprobe_cmd()
        .arg("--log-file")
        .arg(&log_file)
        .args(["run", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.mp4"))
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .assert()
        .code(1);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(!stderr.contains("[INFO]"), "{stderr}");
    assert!(!stderr.contains("[DEBUG]"), "{stderr}");
    let contents = fs::read_to_string(&log_file)?;
    assert!(!contents.contains("[INFO]"), "{contents}");

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_log_file_honours_rust_log() -> Result<(), Box<dyn Error>> {
    let _guard = spawn_lock();
    let dir = tempdir()?;
    let input = dummy_input(&dir)?;
    let ffmpeg = fake_transcoder(dir.path(), "exit 0")?;
    let log_file = dir.path().join("debug.log");

    vidprobe_cmd()
        .env("RUST_LOG", "debug")
        .arg("--log-file")
        .arg(&log_file)
        .args(["run", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.mp4"))
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .assert()
        .code(1);

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("[DEBUG]"), "{contents}");

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_timeout_from_environment() -> Result<(), Box<dyn Error>> {
    let _guard = spawn_lock();
    let dir = tempdir()?;
    let input = dummy_input(&dir)?;
    let ffmpeg = fake_transcoder(dir.path(), "exec sleep 30")?;

    vidprobe_cmd()
        .env("VIDPROBE_TIMEOUT", "0.5")
        .args(["--no-color", "run", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.mp4"))
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .code(124)
        .stdout(contains("timed out after 0.5 seconds"));

    Ok(())
}
