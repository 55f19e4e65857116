//! Subprocess execution seam for the sourcing command
//!
//! The resolver drives a one-shot subprocess: spawn, consume the output
//! stream, done. That contract is captured by [`CommandRunner`] so the
//! engine can be replaced (scripted runners in tests, a different executor
//! in embedding tools). [`ShellRunner`] is the default implementation backed
//! by `std::process`.

use resultspace_core::Environment;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use tracing::debug;

/// Fully constructed argv for one sourcing invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCommand {
    /// Shell executable to invoke
    pub program: PathBuf,
    /// Arguments: the no-rc flag, `-c`, and the sourcing subcommand
    pub args: Vec<String>,
}

/// Lazy sequence of decoded output chunks from a running command
pub type OutputChunks = Box<dyn Iterator<Item = io::Result<String>>>;

/// Collaborator that spawns the sourcing command and streams its output
pub trait CommandRunner {
    /// Spawn `command` in `cwd` with exactly `env` as the subprocess
    /// environment, returning its output as a stream of text chunks.
    ///
    /// An `Err` return means the process could not be spawned; an `Err`
    /// chunk means the stream broke mid-capture. Either way the caller
    /// decides what to do with the output gathered so far.
    fn run(&self, command: &SourceCommand, cwd: &Path, env: &Environment)
    -> io::Result<OutputChunks>;
}

/// Default runner backed by `std::process`
///
/// Stdout is piped and yielded line by line with lossy UTF-8 decoding.
/// Stderr is not captured: the parser contract is stdout text. The child is
/// reaped at end of stream; its exit status is not consulted, since an
/// unusable dump already surfaces as an empty parsed environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(
        &self,
        command: &SourceCommand,
        cwd: &Path,
        env: &Environment,
    ) -> io::Result<OutputChunks> {
        debug!(
            program = %command.program.display(),
            args = ?command.args,
            "spawning sourcing shell"
        );

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .env_clear()
            .envs(env.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child process has no captured stdout"))?;

        Ok(Box::new(LineChunks {
            reader: BufReader::new(stdout),
            child,
            done: false,
        }))
    }
}

struct LineChunks {
    reader: BufReader<ChildStdout>,
    child: Child,
    done: bool,
}

impl Iterator for LineChunks {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.done = true;
                let _ = self.child.wait();
                None
            }
            Ok(_) => Some(Ok(String::from_utf8_lossy(&buf).into_owned())),
            Err(err) => {
                self.done = true;
                let _ = self.child.wait();
                Some(Err(err))
            }
        }
    }
}
