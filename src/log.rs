//! User-facing console output.
//!
//! [`Log`] renders the three kinds of line the orchestrator prints: `INFO:`
//! lines, `>>` command traces, and bold red `ERROR:` lines. It only formats
//! and writes; deciding whether to stop after an error is left to the caller.
//!
//! Diagnostics meant for developers go through `tracing` instead and end up
//! on stderr.

use std::cell::RefCell;
use std::env;
use std::io::{self, Write};

const INFO_PREFIX: &str = "INFO: ";
const ERROR_PREFIX: &str = "ERROR: ";
const COMMAND_PREFIX: &str = ">>";
const RESET: &str = "\x1b[0m";

/// ANSI text attributes understood by [`Log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Bright green foreground.
    Green,
    /// Bright yellow foreground.
    Yellow,
    /// Bright red foreground.
    Red,
    /// Bold weight.
    Bold,
}

impl Format {
    /// Escape sequence that switches the attribute on.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Green => "\x1b[92m",
            Self::Yellow => "\x1b[93m",
            Self::Red => "\x1b[91m",
            Self::Bold => "\x1b[1m",
        }
    }
}

/// Whether ANSI escape sequences are written at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourMode {
    /// Emit escape sequences for formatted lines.
    Ansi,
    /// Emit text only.
    Plain,
}

impl ColourMode {
    /// Resolve the mode from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve_with(|key| env::var(key).ok())
    }

    /// Resolve the mode using `read_env` for lookups.
    ///
    /// `NO_COLOR` with any value, including empty, or `TERM=dumb` selects
    /// [`Plain`](ColourMode::Plain). Everything else is
    /// [`Ansi`](ColourMode::Ansi).
    ///
    /// # Examples
    ///
    /// ```
    /// use graphrun::log::ColourMode;
    ///
    /// let mode = ColourMode::resolve_with(|key| (key == "NO_COLOR").then(String::new));
    /// assert_eq!(mode, ColourMode::Plain);
    /// assert_eq!(ColourMode::resolve_with(|_| None), ColourMode::Ansi);
    /// ```
    #[must_use]
    pub fn resolve_with<F>(read_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if read_env("NO_COLOR").is_some() || read_env("TERM").as_deref() == Some("dumb") {
            Self::Plain
        } else {
            Self::Ansi
        }
    }
}

/// Layout options for [`Log::info_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoOptions<'a> {
    /// Terminate the line with `\n`.
    pub newline: bool,
    /// Prepend `INFO: `.
    pub prefix: bool,
    /// Attributes wrapped around the whole line.
    pub format: &'a [Format],
}

impl Default for InfoOptions<'_> {
    fn default() -> Self {
        Self {
            newline: true,
            prefix: true,
            format: &[],
        }
    }
}

impl<'a> InfoOptions<'a> {
    /// Default layout with `format` applied.
    #[must_use]
    pub fn formatted(format: &'a [Format]) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }
}

/// Console logger writing to `W`, standard output by default.
///
/// Write failures are discarded: console output must never abort a stage.
#[derive(Debug)]
pub struct Log<W: Write = io::Stdout> {
    out: RefCell<W>,
    colour: ColourMode,
}

impl Log<io::Stdout> {
    /// Logger on standard output with colour resolved from the environment.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), ColourMode::from_env())
    }
}

impl<W: Write> Log<W> {
    /// Logger writing to `out`.
    pub const fn new(out: W, colour: ColourMode) -> Self {
        Self {
            out: RefCell::new(out),
            colour,
        }
    }

    /// Consume the logger and return its sink.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    /// Write an `INFO:` line with default layout.
    pub fn info(&self, message: &str) {
        self.info_with(message, InfoOptions::default());
    }

    /// Write an informational message using `options`.
    pub fn info_with(&self, message: &str, options: InfoOptions<'_>) {
        let line = if options.prefix {
            format!("{INFO_PREFIX}{message}")
        } else {
            message.to_owned()
        };
        let mut rendered = self.apply(options.format, &line);
        if options.newline {
            rendered.push('\n');
        }
        self.emit(&rendered);
    }

    /// Write a bold red `ERROR:` line.
    pub fn error(&self, message: &str) {
        let line = format!("{ERROR_PREFIX}{message}");
        let mut rendered = self.apply(&[Format::Red, Format::Bold], &line);
        rendered.push('\n');
        self.emit(&rendered);
    }

    /// Write an `INFO:` line followed by a `>>` trace of `command`.
    pub fn command(&self, message: &str, command: &str) {
        self.info(message);
        self.emit(&format!("{COMMAND_PREFIX} {command}\n"));
    }

    fn apply(&self, format: &[Format], text: &str) -> String {
        if format.is_empty() || self.colour == ColourMode::Plain {
            return text.to_owned();
        }
        let codes: String = format.iter().map(|f| f.code()).collect();
        format!("{codes}{text}{RESET}")
    }

    fn emit(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        drop(out.write_all(text.as_bytes()));
        drop(out.flush());
    }
}
