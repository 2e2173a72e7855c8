//! Delegated producer: hand the serialized payload to an external pipeline
//! process and return whatever it prints on stdout.
//!
//! The child's stdin is written in full and closed before stdout is read.
//! No timeout is applied; a child that never exits blocks the caller.

use std::io::{self, Read, Write};
use std::process::{Child, ChildStderr, Command, Stdio};
use std::sync::Mutex;

use tracing::{debug, info, instrument, warn};

use patchgen_shared::{PatchgenError, Result};

/// Where the child's stderr goes.
pub enum StderrSink {
    /// Share this process's stderr with the child.
    Inherit,
    /// Pipe the child's stderr and forward it, as it arrives, into a writer.
    Writer(Mutex<Box<dyn Write + Send>>),
}

impl std::fmt::Debug for StderrSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inherit => f.write_str("Inherit"),
            Self::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// Runs `<executable> [arg]*` with the payload on stdin.
#[derive(Debug)]
pub struct DelegatedProducer {
    command: String,
    stderr: StderrSink,
}

impl DelegatedProducer {
    /// Arguments are split on whitespace; quoting is not supported.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            stderr: StderrSink::Inherit,
        }
    }

    /// Forward the child's stderr into `sink` instead of inheriting it.
    pub fn with_stderr(mut self, sink: impl Write + Send + 'static) -> Self {
        self.stderr = StderrSink::Writer(Mutex::new(Box::new(sink)));
        self
    }

    #[cfg(test)]
    pub(crate) fn command(&self) -> &str {
        &self.command
    }

    /// Launch the pipeline, feed it `payload`, and return its complete stdout.
    ///
    /// Either the whole output is returned or an error; a child that exits
    /// non-zero yields no output even if it printed some.
    #[instrument(skip_all, fields(cmd = %self.command, payload_bytes = payload.len()))]
    pub fn run(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let mut segments = self.command.split_whitespace();
        let executable = segments.next().ok_or(PatchgenError::PipelineNotConfigured)?;
        let args: Vec<&str> = segments.collect();

        let stderr = match self.stderr {
            StderrSink::Inherit => Stdio::inherit(),
            StderrSink::Writer(_) => Stdio::piped(),
        };

        info!(executable, ?args, "spawning pipeline");

        let mut child = Command::new(executable)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(stderr)
            .spawn()
            .map_err(|e| PatchgenError::pipeline(format!("failed to start `{executable}`: {e}")))?;

        let stderr_pipe = child.stderr.take();

        std::thread::scope(|scope| {
            let forwarder = match (&self.stderr, stderr_pipe) {
                (StderrSink::Writer(sink), Some(pipe)) => {
                    Some(scope.spawn(move || forward_stderr(pipe, sink)))
                }
                _ => None,
            };

            let result = self.exchange(&mut child, payload);
            if result.is_err() {
                abort(&mut child);
            }

            if let Some(handle) = forwarder {
                match handle.join() {
                    Ok(Ok(bytes)) => debug!(bytes, "forwarded pipeline stderr"),
                    Ok(Err(e)) => warn!("failed to forward pipeline stderr: {e}"),
                    Err(_) => warn!("pipeline stderr forwarder panicked"),
                }
            }

            result
        })
    }

    fn exchange(&self, child: &mut Child, payload: &[u8]) -> Result<Vec<u8>> {
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| PatchgenError::pipeline("failed to capture pipeline stdin"))?;

        match stdin.write_all(payload) {
            Ok(()) => {}
            // The child may legitimately exit without reading its input;
            // its exit status decides the outcome.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!("pipeline closed stdin before consuming the payload");
            }
            Err(e) => {
                return Err(PatchgenError::pipeline(format!(
                    "failed to write payload to pipeline stdin: {e}"
                )));
            }
        }
        drop(stdin);

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| PatchgenError::pipeline("failed to capture pipeline stdout"))?;

        let mut output = Vec::new();
        stdout
            .read_to_end(&mut output)
            .map_err(|e| PatchgenError::pipeline(format!("failed to read pipeline stdout: {e}")))?;

        let status = child
            .wait()
            .map_err(|e| PatchgenError::pipeline(format!("failed to wait for pipeline: {e}")))?;

        if !status.success() {
            return Err(PatchgenError::pipeline(format!(
                "`{}` exited with {status}",
                self.command
            )));
        }

        info!(output_bytes = output.len(), "pipeline finished");
        Ok(output)
    }
}

/// Copy the child's stderr into the sink chunk by chunk until it closes.
fn forward_stderr(mut pipe: ChildStderr, sink: &Mutex<Box<dyn Write + Send>>) -> io::Result<u64> {
    let mut guard = sink
        .lock()
        .map_err(|_| io::Error::other("stderr sink lock poisoned"))?;
    let mut buf = [0u8; 4096];
    let mut total = 0u64;
    loop {
        let n = pipe.read(&mut buf)?;
        if n == 0 {
            break;
        }
        guard.write_all(&buf[..n])?;
        guard.flush()?;
        total += n as u64;
    }
    Ok(total)
}

fn abort(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("pipeline kill: {e}");
    }
    if let Err(e) = child.wait() {
        warn!("pipeline wait error: {e}");
    }
}
