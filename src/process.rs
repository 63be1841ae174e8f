//! Synchronous subprocess execution.
//!
//! Stages never touch [`std::process::Command`] directly. They build a
//! [`CommandLine`] and hand it to a [`ProcessRunner`], which spawns the child
//! and blocks until it exits. No timeout is applied: a child that never exits
//! blocks the pipeline indefinitely.

use camino::Utf8PathBuf;
use std::ffi::OsString;
use std::fmt;
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info};

/// A program together with its ordered argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: Utf8PathBuf,
    args: Vec<String>,
}

impl CommandLine {
    /// Start a command line for `program` with no arguments.
    #[must_use]
    pub fn new(program: impl Into<Utf8PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append every argument from `args`, preserving order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program that will be executed.
    #[must_use]
    pub const fn program(&self) -> &Utf8PathBuf {
        &self.program
    }

    /// Arguments in the order they are passed to the program.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(self.program.as_std_path());
        cmd.args(self.args.iter().map(OsString::from));
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
        cmd
    }
}

/// Renders the command the way it is traced: program and arguments joined by
/// single spaces, without quoting.
///
/// # Examples
///
/// ```
/// use graphrun::process::CommandLine;
///
/// let cmd = CommandLine::new("node").arg("build/main.js").arg("out");
/// assert_eq!(cmd.to_string(), "node build/main.js out");
/// ```
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program.as_str())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    code: Option<i32>,
    signal: Option<i32>,
}

impl ProcessExit {
    /// An exit with the given status code.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    /// A termination by signal `signal`.
    ///
    /// The reported code follows the shell convention of `128 + signal`.
    #[must_use]
    pub const fn from_signal(signal: i32) -> Self {
        Self {
            code: Some(128 + signal),
            signal: Some(signal),
        }
    }

    /// Return `true` when the child exited with status zero.
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self.code, Some(0)) && self.signal.is_none()
    }

    /// Exit code to propagate, if one is known.
    #[must_use]
    pub const fn code(self) -> Option<i32> {
        self.code
    }
}

impl From<ExitStatus> for ProcessExit {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::from_signal(signal);
            }
        }
        Self {
            code: status.code(),
            signal: None,
        }
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.signal, self.code) {
            (Some(signal), _) => write!(f, "was terminated by signal {signal}"),
            (None, Some(code)) => write!(f, "exited with code {code}"),
            (None, None) => f.write_str("exited without a status code"),
        }
    }
}

/// Spawn a command and wait for it to finish.
///
/// Implementations must block until the child has exited. Standard streams
/// and the working directory are inherited from the orchestrator.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner {
    /// Run `command` to completion and report how it ended.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when the child cannot be spawned or waited on.
    fn run(&self, command: &CommandLine) -> io::Result<ProcessExit>;
}

/// [`ProcessRunner`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandLine) -> io::Result<ProcessExit> {
        info!("Running command: {command}");
        let mut child = command.to_command().spawn()?;
        debug!(pid = child.id(), "spawned child process");
        let status = child.wait()?;
        let exit = ProcessExit::from(status);
        debug!(program = %command.program(), %exit, "child process finished");
        Ok(exit)
    }
}

/// Resolve the executable for an external tool.
///
/// `read_env` is consulted for `key`; a UTF-8 value replaces `default`, while
/// an unset or non-UTF-8 value leaves `default` in place.
///
/// # Examples
///
/// ```
/// use graphrun::process::resolve_program_with;
/// use std::ffi::OsString;
///
/// let program = resolve_program_with("GRAPHRUN_TSC", "tsc", |_| Some(OsString::from("/opt/tsc")));
/// assert_eq!(program, "/opt/tsc");
/// let fallback = resolve_program_with("GRAPHRUN_TSC", "tsc", |_| None);
/// assert_eq!(fallback, "tsc");
/// ```
#[must_use]
pub fn resolve_program_with<F>(key: &str, default: &str, read_env: F) -> Utf8PathBuf
where
    F: FnOnce(&str) -> Option<OsString>,
{
    read_env(key)
        .and_then(|value| value.into_string().ok())
        .filter(|value| !value.is_empty())
        .map_or_else(|| Utf8PathBuf::from(default), Utf8PathBuf::from)
}

/// Resolve the executable for an external tool from the process environment.
#[must_use]
pub fn resolve_program(key: &str, default: &str) -> Utf8PathBuf {
    resolve_program_with(key, default, |name| std::env::var_os(name))
}
