//! Script subprocess executor.
//!
//! Runs a lock/unlock script with captured output, a sanitized environment and
//! an optional deadline.

use super::types::ScriptOutput;
use crate::error::{Result, WifiLockError};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Library search path variable cleared for script subprocesses.
pub const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How to launch a script.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecOptions {
    /// Override the library search path with an empty value.
    pub clear_library_path: bool,
    /// Kill the script if it runs longer than this.
    pub timeout: Option<Duration>,
}

/// Execute `script` with `args`, capturing stdout and stderr.
///
/// A non-zero exit is not an error here; callers interpret [`ScriptOutput`].
/// Only failing to spawn or wait on the process is.
pub fn run_script(script: &Path, args: &[&str], opts: ExecOptions) -> Result<ScriptOutput> {
    let mut command = Command::new(script);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if opts.clear_library_path {
        command.env(LIBRARY_PATH_VAR, "");
    }

    log::debug!("Running {} {:?}", script.display(), args);

    let mut child = command.spawn().map_err(|e| {
        WifiLockError::ScriptError(format!(
            "failed to execute '{}': {}",
            script.display(),
            e
        ))
    })?;

    let stdout_reader = child.stdout.take().map(drain);
    let stderr_reader = child.stderr.take().map(drain);

    let (exit_code, timed_out) = match opts.timeout {
        Some(timeout) => wait_with_timeout(&mut child, timeout)?,
        None => {
            let status = child.wait().map_err(|e| {
                WifiLockError::ScriptError(format!(
                    "failed to wait for '{}': {}",
                    script.display(),
                    e
                ))
            })?;
            (status.code(), false)
        }
    };

    // A killed script may have left children holding the pipes open; don't
    // block on them.
    let (stdout, stderr) = if timed_out {
        (String::new(), String::new())
    } else {
        (collect(stdout_reader), collect(stderr_reader))
    };

    Ok(ScriptOutput {
        exit_code,
        stdout,
        stderr,
        timed_out,
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn collect(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<(Option<i32>, bool)> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((status.code(), false)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok((None, true));
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(WifiLockError::ScriptError(format!(
                    "failed to check process status: {}",
                    e
                )));
            }
        }
    }
}
