use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{ChildStderr, ChildStdout, Command, Stdio};
use std::thread;

use crate::error::UtilError;
use crate::Result;

/// Captured output of a finished child process.
#[derive(Debug)]
pub struct CaptureOutput {
    /// Everything the child wrote to stdout.
    pub stdout: Vec<u8>,
    /// Everything the child wrote to stderr.
    pub stderr: Vec<u8>,
    /// Exit code, if the child terminated normally.
    pub status: Option<i32>,
    /// Signal number, if the child was killed by a signal.
    pub signal: Option<i32>,
}

impl CaptureOutput {
    /// True when the child terminated normally with exactly this exit code.
    pub fn exited_with(&self, code: i32) -> bool {
        self.status == Some(code)
    }
}

/// Builder for running a child process to completion while capturing both
/// of its output streams.
///
/// stdout and stderr are piped and drained concurrently, one reader thread
/// per stream, so a child that fills one pipe's buffer while the other is
/// being read cannot deadlock the capture. Nothing is written to the
/// child's stdin. There is no timeout: a hung child hangs the caller.
pub struct Capture {
    program: OsString,
    args: Vec<OsString>,
    working_dir: Option<PathBuf>,
}

impl Capture {
    /// Create a new capture for the given program.
    ///
    /// The program is resolved through the environment's search path, like
    /// any shell command.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> Self {
        for arg in args {
            self.args.push(arg.as_ref().to_os_string());
        }
        self
    }

    /// Run the child from the given directory.
    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Get the command string for error messages.
    fn command_string(&self) -> String {
        let mut s = self.program.to_string_lossy().to_string();
        for arg in &self.args {
            s.push(' ');
            s.push_str(&arg.to_string_lossy());
        }
        s
    }

    /// Spawn the child, drain both streams to end-of-stream, then reap it.
    ///
    /// The only failure callers should ever see is a spawn failure (program
    /// missing, not executable); they are expected to treat it the same as
    /// an uninformative run, never as a fatal condition.
    pub fn run(self) -> Result<CaptureOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| UtilError::Spawn {
            command: self.command_string(),
            source: e,
        })?;

        // Both pipes exist because both streams were requested piped above.
        let out_pipe: Option<ChildStdout> = child.stdout.take();
        let err_pipe: Option<ChildStderr> = child.stderr.take();
        let out_reader = thread::spawn(move || drain(out_pipe));
        let err_reader = thread::spawn(move || drain(err_pipe));

        let stdout = out_reader.join().unwrap_or_default();
        let stderr = err_reader.join().unwrap_or_default();

        let wait_status = child.wait()?;
        let (status, signal) = split_status(wait_status);

        Ok(CaptureOutput {
            stdout,
            stderr,
            status,
            signal,
        })
    }
}

/// Read a pipe to end-of-stream into an owned buffer.
fn drain(pipe: Option<impl Read>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        // read_to_end grows the buffer geometrically until EOF; a read
        // error mid-stream leaves whatever was collected so far.
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}

#[cfg(unix)]
fn split_status(status: std::process::ExitStatus) -> (Option<i32>, Option<i32>) {
    use std::os::unix::process::ExitStatusExt;
    (status.code(), status.signal())
}

#[cfg(not(unix))]
fn split_status(status: std::process::ExitStatus) -> (Option<i32>, Option<i32>) {
    (status.code(), None)
}
