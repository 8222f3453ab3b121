//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! hhrun prints nothing of its own on success; the child process owns the
//! terminal. Debug lines and errors go to stderr so they never mix with the
//! child's stdout.

use std::fmt::Display;

use crate::engine::Invocation;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(debug: bool) -> Self {
        if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Debug lines describing an invocation: the command line, then one line
/// per overlay variable.
pub fn describe_invocation(invocation: &Invocation) -> Vec<String> {
    let mut lines = vec![format!("exec: {}", invocation.command_line())];
    if let Some(dir) = &invocation.dir {
        lines.push(format!("  cwd: {}", dir.display()));
    }
    lines.extend(
        invocation
            .env
            .iter()
            .map(|(key, value)| format!("  env: {}={}", key, value)),
    );
    lines
}
