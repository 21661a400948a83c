use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, warn};

use crate::error::{CoreResult, command_start_error, command_wait_error};

/// How often the child is polled while waiting for it to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to wait for the stream readers after a normal exit.
const EXIT_DRAIN_GRACE: Duration = Duration::from_secs(5);

/// How long to wait for the stream readers after the child was killed.
///
/// Only the direct child is killed. A wrapper script that forks instead of
/// `exec`ing leaves its own children running; they keep the pipes open, so the
/// readers are detached once this grace period expires and the call returns.
const KILL_DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Raw bytes captured from the child's standard streams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// How a bounded command run ended.
#[derive(Debug)]
pub enum ProcessCompletion {
    /// The child exited on its own before the deadline.
    Exited {
        status: ExitStatus,
        output: CapturedOutput,
    },
    /// The deadline passed; the child was killed and reaped.
    TimedOut { output: CapturedOutput },
}

struct StreamReader {
    handle: JoinHandle<()>,
    sink: Arc<Mutex<Vec<u8>>>,
}

/// Runs `cmd` with piped stdout/stderr, waiting at most `timeout`.
///
/// Both streams are drained on background threads so the child cannot stall
/// on a full pipe. When the deadline passes the child is killed and waited
/// for, so it never outlives this call.
///
/// Returns `Err` only when the process cannot be started or waited on.
pub fn run_command_with_timeout(cmd: &mut Command, timeout: Duration) -> CoreResult<ProcessCompletion> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    debug!("Spawning command: {:?}", cmd);

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            error!("Failed to spawn command '{}': {}", program, e);
            command_start_error(&program, e)
        })?;

    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Some(status),
            Ok(None) => {
                let now = Instant::now();
                if now >= deadline {
                    break None;
                }
                thread::sleep(POLL_INTERVAL.min(deadline - now));
            }
            Err(e) => {
                error!("Error waiting for '{}': {}", program, e);
                kill_and_reap(&mut child, &program);
                return Err(command_wait_error(&program, e));
            }
        }
    };

    match status {
        Some(status) => {
            debug!("'{}' exited with {}", program, status);
            let output = CapturedOutput {
                stdout: collect(stdout_reader, EXIT_DRAIN_GRACE),
                stderr: collect(stderr_reader, EXIT_DRAIN_GRACE),
            };
            Ok(ProcessCompletion::Exited { status, output })
        }
        None => {
            warn!(
                "'{}' still running after {:.1}s, killing it",
                program,
                timeout.as_secs_f64()
            );
            kill_and_reap(&mut child, &program);
            let output = CapturedOutput {
                stdout: collect(stdout_reader, KILL_DRAIN_GRACE),
                stderr: collect(stderr_reader, KILL_DRAIN_GRACE),
            };
            Ok(ProcessCompletion::TimedOut { output })
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> StreamReader {
    let sink = Arc::new(Mutex::new(Vec::new()));
    let thread_sink = Arc::clone(&sink);
    let handle = thread::spawn(move || {
        let mut chunk = [0u8; 8192];
        loop {
            match pipe.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    if let Ok(mut buf) = thread_sink.lock() {
                        buf.extend_from_slice(&chunk[..n]);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!("Stream reader stopped: {}", e);
                    break;
                }
            }
        }
    });
    StreamReader { handle, sink }
}

/// Takes whatever a reader has collected, waiting up to `grace` for it to hit EOF.
///
/// A reader that is still blocked after the grace period (a grandchild holding
/// the pipe open) is detached rather than joined.
fn collect(reader: Option<StreamReader>, grace: Duration) -> Vec<u8> {
    let Some(reader) = reader else {
        return Vec::new();
    };

    let deadline = Instant::now() + grace;
    while !reader.handle.is_finished() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    if reader.handle.is_finished() {
        let _ = reader.handle.join();
    } else {
        debug!("Stream reader did not finish within {:?}; using partial output", grace);
    }

    reader
        .sink
        .lock()
        .map(|mut buf| std::mem::take(&mut *buf))
        .unwrap_or_default()
}

fn kill_and_reap(child: &mut Child, program: &str) {
    if let Err(e) = child.kill() {
        // InvalidInput means it already exited
        debug!("Kill of '{}' (pid {}) failed: {}", program, child.id(), e);
    }
    if let Err(e) = child.wait() {
        warn!("Failed to reap '{}' (pid {}): {}", program, child.id(), e);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn test_captures_both_streams() {
        let completion =
            run_command_with_timeout(&mut sh("printf out; printf err >&2"), Duration::from_secs(10)).unwrap();
        match completion {
            ProcessCompletion::Exited { status, output } => {
                assert!(status.success());
                assert_eq!(output.stdout, b"out");
                assert_eq!(output.stderr, b"err");
            }
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[test]
    fn test_reports_non_zero_exit() {
        let completion = run_command_with_timeout(&mut sh("exit 3"), Duration::from_secs(10)).unwrap();
        match completion {
            ProcessCompletion::Exited { status, .. } => assert_eq!(status.code(), Some(3)),
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[test]
    fn test_times_out_and_keeps_partial_output() {
        let start = Instant::now();
        let completion = run_command_with_timeout(
            &mut sh("printf started >&2; exec sleep 30"),
            Duration::from_millis(300),
        )
        .unwrap();
        assert!(start.elapsed() < Duration::from_secs(5));
        match completion {
            ProcessCompletion::TimedOut { output } => assert_eq!(output.stderr, b"started"),
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[test]
    fn test_timeout_returns_when_grandchild_holds_pipes() {
        let start = Instant::now();
        let completion = run_command_with_timeout(
            &mut sh("printf wrapper >&2; sleep 3; echo unreachable"),
            Duration::from_millis(300),
        )
        .unwrap();
        assert!(start.elapsed() < Duration::from_secs(4), "took {:?}", start.elapsed());
        match completion {
            ProcessCompletion::TimedOut { output } => {
                assert_eq!(output.stderr, b"wrapper");
                assert!(output.stdout.is_empty());
            }
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[test]
    fn test_large_output_does_not_deadlock() {
        let completion = run_command_with_timeout(
            &mut sh("head -c 200000 /dev/zero | tr '\\0' x >&2"),
            Duration::from_secs(10),
        )
        .unwrap();
        match completion {
            ProcessCompletion::Exited { output, .. } => assert_eq!(output.stderr.len(), 200_000),
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[test]
    fn test_missing_program_is_start_error() {
        let mut cmd = Command::new("vidprobe-definitely-missing-program");
        let err = run_command_with_timeout(&mut cmd, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, crate::CoreError::CommandStart(_, _)));
    }
}
