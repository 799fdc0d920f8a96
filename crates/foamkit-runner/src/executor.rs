//! Process seam between the runner and the `docker` CLI.

use std::ffi::OsString;
use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use foamkit_telemetry::LineBuffer;

/// Captured result of a finished `docker` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    /// Standard output; for streamed calls, every forwarded line.
    pub stdout: String,
    /// Standard error; empty for streamed calls.
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with status zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.status, Some(0))
    }
}

/// Runs `docker` subcommands.
pub trait CommandExecutor {
    /// Run to completion and capture output.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the process cannot be spawned.
    fn output(&self, args: &[String]) -> io::Result<ProcessOutput>;

    /// Run to completion, handing each stdout/stderr line to `on_line` as it arrives.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the process cannot be spawned or awaited.
    fn stream(&self, args: &[String], on_line: &mut dyn FnMut(&str)) -> io::Result<ProcessOutput>;
}

/// Executor that shells out to the `docker` binary.
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: OsString,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self {
            program: OsString::from("docker"),
        }
    }
}

impl DockerCli {
    /// Executor using a specific `docker`-compatible binary (e.g. `podman`).
    #[must_use]
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CommandExecutor for DockerCli {
    fn output(&self, args: &[String]) -> io::Result<ProcessOutput> {
        let output = Command::new(&self.program).args(args).output()?;
        Ok(ProcessOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn stream(&self, args: &[String], on_line: &mut dyn FnMut(&str)) -> io::Result<ProcessOutput> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let (sender, receiver) = mpsc::channel();
        let readers = [
            child
                .stdout
                .take()
                .map(|pipe| forward_lines(pipe, sender.clone())),
            child
                .stderr
                .take()
                .map(|pipe| forward_lines(pipe, sender.clone())),
        ];
        drop(sender);

        let mut collected = String::new();
        for line in receiver {
            on_line(&line);
            collected.push_str(&line);
            collected.push('\n');
        }
        for reader in readers.into_iter().flatten() {
            let _ = reader.join();
        }

        let status = child.wait()?;
        Ok(ProcessOutput {
            status: status.code(),
            stdout: collected,
            stderr: String::new(),
        })
    }
}

fn forward_lines<R>(mut pipe: R, sender: Sender<String>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = LineBuffer::default();
        let mut chunk = [0u8; 4096];
        loop {
            match pipe.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(read) => {
                    for line in buffer.push(&chunk[..read]) {
                        if sender.send(line).is_err() {
                            return;
                        }
                    }
                }
            }
        }
        if let Some(line) = buffer.finish() {
            let _ = sender.send(line);
        }
    })
}
