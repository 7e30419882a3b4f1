//! External command execution with a deadline.
//!
//! The build is strictly sequential, so a converter process that never
//! exits would hang everything. [`exec_with_timeout`] polls the child and
//! kills it once the deadline passes.

use crate::log;
use regex::Regex;
use std::{
    ffi::OsString,
    io::Read,
    path::PathBuf,
    process::{Child, Command, ExitStatus, Stdio},
    sync::LazyLock,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use thiserror::Error;

/// Interval between `try_wait` polls.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Why an external command did not produce output.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("empty command")]
    EmptyCommand,

    #[error("`{0}` not found in PATH")]
    NotFound(String, #[source] which::Error),

    #[error("failed to spawn `{0}`")]
    Spawn(String, #[source] std::io::Error),

    #[error("`{name}` failed with {status}\n{stderr}")]
    Failed {
        name: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{name}` did not finish within {timeout:?} and was killed")]
    Timeout { name: String, timeout: Duration },

    #[error("failed to wait for `{0}`")]
    Wait(String, #[source] std::io::Error),
}

/// Run `cmd` followed by `args`, returning captured stdout.
///
/// The first element of `cmd` is resolved through `PATH`. Stderr is
/// logged on success (pandoc prints warnings there) and embedded in the
/// error otherwise.
pub fn exec_with_timeout(
    cmd: &[String],
    args: &[OsString],
    timeout: Duration,
) -> Result<Vec<u8>, ExecError> {
    let (name, program) = resolve(cmd)?;

    let mut child = Command::new(program)
        .args(&cmd[1..])
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ExecError::Spawn(name.clone(), e))?;

    // Drain both pipes on their own threads so a chatty child can't block
    // on a full pipe while we wait for it.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    // On timeout or wait failure the drain threads are left detached: a
    // grandchild may still hold the pipes open.
    let status = match wait_deadline(&mut child, timeout) {
        Ok(Some(status)) => status,
        Ok(None) => return Err(ExecError::Timeout { name, timeout }),
        Err(e) => return Err(ExecError::Wait(name, e)),
    };
    let stdout = join(stdout);
    let stderr = String::from_utf8_lossy(&join(stderr)).into_owned();

    if !status.success() {
        return Err(ExecError::Failed {
            name,
            status,
            stderr: strip_ansi(stderr.trim()).into_owned(),
        });
    }
    log_stderr(&name, &stderr);
    Ok(stdout)
}

/// Split off the program name and look it up in `PATH`.
fn resolve(cmd: &[String]) -> Result<(String, PathBuf), ExecError> {
    let name = cmd.first().ok_or(ExecError::EmptyCommand)?.clone();
    let program = which::which(&name).map_err(|e| ExecError::NotFound(name.clone(), e))?;
    Ok((name, program))
}

/// Wait for `child` until `timeout` elapses. Returns `Ok(None)` after
/// killing it.
fn wait_deadline(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) if Instant::now() < deadline => thread::sleep(POLL_INTERVAL),
            Ok(None) => {
                child.kill().ok();
                child.wait().ok();
                return Ok(None);
            }
            Err(e) => {
                child.kill().ok();
                return Err(e);
            }
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).ok();
            buf
        })
    })
}

fn join(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

fn log_stderr(name: &str, stderr: &str) {
    let lines: Vec<_> = stderr
        .lines()
        .map(|line| strip_ansi(line).trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect();
    if !lines.is_empty() {
        log!(name; "{}", lines.join("\n"));
    }
}

fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());
    RE.replace_all(s, "")
}
