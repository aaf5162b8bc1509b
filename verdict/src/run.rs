//! Process result capture.
//!
//! Two ways to obtain a [`Status`]:
//! - [`EntryPoint`] runs an in-process callable against in-memory streams
//! - [`Process`] runs an external program with a timeout
//!
//! All buffering is local to the call; concurrent test workers never share
//! capture state.

use std::fmt::Display;
use std::io::{Cursor, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Settings;
use crate::errors::RunError;

/// Exit code reported when a process is killed after its timeout.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Exit code recorded when an entry point returns an error.
pub const ERROR_EXIT_CODE: i32 = 1;

/// How long pipes are drained after the child has exited past its deadline.
const PIPE_GRACE: Duration = Duration::from_millis(200);

/// Captured result of running a process or entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub args: Vec<String>,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    /// Error returned by an entry point, or a failure feeding a process its stdin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration: Duration,
    pub timed_out: bool,
}

impl Status {
    /// Check if the run succeeded (exit code 0, no error)
    pub fn success(&self) -> bool {
        self.exit_code == 0 && self.error.is_none()
    }

    /// Get combined output (stdout + stderr)
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Standard streams handed to an entry point.
pub struct Streams<'a> {
    pub stdin: &'a mut dyn Read,
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

/// An in-process "main" function run against in-memory streams.
///
/// ```ignore
/// let status = EntryPoint::new(|streams: &mut Streams<'_>, args: &[String]| {
///     writeln!(streams.stdout, "hello {}", args.join(" "))?;
///     Ok::<_, std::io::Error>(0)
/// })
/// .arg("world")
/// .run();
/// assert_eq!(status.stdout, "hello world\n");
/// ```
pub struct EntryPoint<F> {
    callable: F,
    args: Vec<String>,
    stdin: Vec<u8>,
}

impl<F> EntryPoint<F> {
    pub fn new(callable: F) -> Self {
        Self {
            callable,
            args: Vec::new(),
            stdin: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Bytes readable from the entry point's stdin.
    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = input.into();
        self
    }

    /// Call the entry point. An `Err` is recorded in [`Status::error`] with
    /// exit code [`ERROR_EXIT_CODE`]; it is never raised.
    pub fn run<E>(self) -> Status
    where
        F: FnOnce(&mut Streams<'_>, &[String]) -> Result<i32, E>,
        E: Display,
    {
        let start = Instant::now();
        let mut stdin = Cursor::new(self.stdin);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let outcome = {
            let mut streams = Streams {
                stdin: &mut stdin,
                stdout: &mut stdout,
                stderr: &mut stderr,
            };
            (self.callable)(&mut streams, &self.args)
        };

        let (exit_code, error) = match outcome {
            Ok(code) => (code, None),
            Err(err) => {
                debug!(error = %err, "Entry point returned an error");
                (ERROR_EXIT_CODE, Some(err.to_string()))
            }
        };

        Status {
            args: self.args,
            exit_code,
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            error,
            duration: start.elapsed(),
            timed_out: false,
        }
    }
}

/// An external program to run and capture.
#[derive(Debug, Clone)]
pub struct Process {
    program: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
    current_dir: Option<PathBuf>,
    stdin: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl Process {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
            stdin: None,
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Override the configured run timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run the program to completion or until the timeout elapses.
    ///
    /// On timeout the child is killed, the exit code is
    /// [`TIMEOUT_EXIT_CODE`] and a note is appended to stderr. Output still
    /// held open by the child's descendants is abandoned at the deadline.
    /// A failure writing stdin is recorded in [`Status::error`] alongside the
    /// captured output.
    pub fn run(self) -> Result<Status, RunError> {
        let timeout = self
            .timeout
            .unwrap_or_else(|| Settings::from_env().run_timeout);

        debug!(
            program = %self.program,
            args = ?self.args,
            timeout_ms = timeout.as_millis() as u64,
            "Executing"
        );

        let start = Instant::now();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| RunError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stdin_rx = match (child.stdin.take(), self.stdin) {
            (Some(mut pipe), Some(input)) => Some(spawn_pipe(move || pipe.write_all(&input))),
            _ => None,
        };
        let stdout_rx = child
            .stdout
            .take()
            .map(|mut stdout| spawn_pipe(move || read_to_string(&mut stdout, "stdout")));
        let stderr_rx = child
            .stderr
            .take()
            .map(|mut stderr| spawn_pipe(move || read_to_string(&mut stderr, "stderr")));

        let mut timed_out = false;
        let exit_status = loop {
            let polled = match child.try_wait() {
                Ok(polled) => polled,
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RunError::Wait {
                        program: self.program,
                        elapsed: start.elapsed(),
                        source,
                    });
                }
            };
            if let Some(status) = polled {
                break Some(status);
            }

            if start.elapsed() >= timeout {
                timed_out = true;
                let _ = child.kill();
                break child.wait().ok();
            }

            thread::sleep(Duration::from_millis(10));
        };

        // Descendants may still hold the pipes open; wait for them only
        // until the deadline, or a short grace period once it has passed.
        let grace_end = Instant::now() + PIPE_GRACE;
        let deadline = start
            .checked_add(timeout)
            .map_or(grace_end, |end| end.max(grace_end));

        let stdin_error = stdin_rx
            .and_then(|rx| collect(&rx, deadline))
            .and_then(Result::err)
            .filter(|err| err.kind() != std::io::ErrorKind::BrokenPipe)
            .map(|err| {
                warn!(program = %self.program, error = %err, "Failed to feed stdin");
                format!("failed to write stdin: {err}")
            });

        let duration = start.elapsed();
        let stdout = stdout_rx
            .and_then(|rx| collect(&rx, deadline))
            .unwrap_or_default();
        let mut stderr = stderr_rx
            .and_then(|rx| collect(&rx, deadline))
            .unwrap_or_default();
        if timed_out {
            if !stderr.is_empty() {
                stderr.push('\n');
            }
            stderr.push_str(&format!(
                "Process timed out after {}.",
                humantime::format_duration(timeout)
            ));
        }

        let exit_code = exit_status
            .and_then(|status| status.code())
            .unwrap_or(if timed_out { TIMEOUT_EXIT_CODE } else { -1 });

        if timed_out {
            warn!(program = %self.program, ?timeout, "Process killed after timeout");
        }
        debug!(
            program = %self.program,
            exit_code,
            duration_ms = duration.as_millis() as u64,
            timed_out,
            "Command completed"
        );

        Ok(Status {
            args: self.args,
            exit_code,
            stdout,
            stderr,
            error: stdin_error,
            duration,
            timed_out,
        })
    }
}

fn read_to_string<R: Read>(reader: &mut R, stream: &'static str) -> String {
    let mut buffer = Vec::new();
    if let Err(err) = reader.read_to_end(&mut buffer) {
        warn!(stream, error = %err, "Failed to read process output");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Run a pipe worker on its own thread and hand back its result channel.
fn spawn_pipe<T, F>(work: F) -> mpsc::Receiver<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(work());
    });
    rx
}

/// Receive a pipe worker's result, abandoning it after `deadline`.
fn collect<T>(rx: &mpsc::Receiver<T>, deadline: Instant) -> Option<T> {
    let wait = deadline.saturating_duration_since(Instant::now());
    match rx.recv_timeout(wait) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(error = %err, "Abandoning pipe still held open");
            None
        }
    }
}
