//! Subprocess execution with a wall-clock budget.
//!
//! `std::process` has no timeout, so each run gets a watchdog: stdout and
//! stderr are drained on helper threads that report back over a crossbeam
//! channel, while the caller polls the child until it exits or the deadline
//! passes, in which case the child is killed.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use log::debug;

use super::error::RemoteError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured output of a finished command.
#[derive(Debug)]
pub struct CommandOutput {
    /// Exit status
    pub status: ExitStatus,
    /// Captured standard output, lossily decoded
    pub stdout: String,
    /// Captured standard error, lossily decoded
    pub stderr: String,
}

/// Spawn `cmd` with piped output, mapping a missing binary to `ToolMissing`.
pub fn spawn_piped(cmd: &mut Command) -> Result<Child, RemoteError> {
    let program = program_name(cmd);
    debug!("Spawning {:?}", cmd);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => RemoteError::ToolMissing(program),
            _ => RemoteError::IoError(err),
        })
}

/// Run `cmd` to completion, killing it after `timeout`.
pub fn run_with_timeout(
    cmd: &mut Command,
    timeout: Duration,
    operation: &str,
) -> Result<CommandOutput, RemoteError> {
    let mut child = spawn_piped(cmd)?;
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = wait_with_deadline(&mut child, timeout, operation)?;

    Ok(CommandOutput {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    })
}

/// Run `consume` over the child's stdout on a helper thread, returning its
/// result together with the child's exit status and stderr. The child is
/// killed if the whole exchange exceeds `timeout`.
pub fn stream_with_timeout<T, F>(
    mut child: Child,
    timeout: Duration,
    operation: &str,
    consume: F,
) -> Result<(T, ExitStatus, String), RemoteError>
where
    T: Send + 'static,
    F: FnOnce(Box<dyn Read + Send>) -> io::Result<T> + Send + 'static,
{
    let started = Instant::now();
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "child stdout not captured"))?;
    let stderr = drain(child.stderr.take());

    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let _ = tx.send(consume(Box::new(stdout)));
    });

    let value = match rx.recv_timeout(timeout) {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            kill(&mut child);
            return Err(RemoteError::IoError(err));
        }
        Err(RecvTimeoutError::Timeout) => {
            kill(&mut child);
            return Err(RemoteError::Timeout {
                operation: operation.to_string(),
                after: timeout,
            });
        }
        Err(RecvTimeoutError::Disconnected) => {
            kill(&mut child);
            return Err(RemoteError::IoError(io::Error::new(
                io::ErrorKind::Other,
                "stream reader thread exited without a result",
            )));
        }
    };

    let remaining = timeout.saturating_sub(started.elapsed());
    let status = wait_with_deadline(&mut child, remaining, operation)?;
    Ok((value, status, collect(stderr)))
}

fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
    operation: &str,
) -> Result<ExitStatus, RemoteError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            kill(child);
            return Err(RemoteError::Timeout {
                operation: operation.to_string(),
                after: timeout,
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn kill(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = bounded(1);
    if let Some(mut pipe) = pipe {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            let _ = tx.send(buf);
        });
    }
    rx
}

fn collect(rx: Receiver<Vec<u8>>) -> String {
    // The pipe closes when the child exits; a killed grandchild holding it
    // open must not hang the caller.
    rx.recv_timeout(Duration::from_secs(5))
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

fn program_name(cmd: &Command) -> String {
    cmd.get_program().to_string_lossy().into_owned()
}
