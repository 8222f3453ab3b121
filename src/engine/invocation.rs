//! engine::invocation
//!
//! A fully assembled command line plus the environment overlay it runs with.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Variables added to the child's environment for one invocation.
///
/// Ordered so rendered command lines are stable.
pub type EnvOverlay = BTreeMap<String, String>;

/// One external process to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Environment overlay. Extends the inherited environment.
    pub env: EnvOverlay,
    /// Working directory; inherited when `None`.
    pub dir: Option<PathBuf>,
}

impl Invocation {
    /// Start an invocation of `program` with no args and an empty overlay.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set one overlay variable. Later calls win.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set an overlay variable only when `value` is present.
    pub fn env_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.env(key, v),
            None => self,
        }
    }

    /// Add overlay variables that are not already set.
    pub fn env_defaults<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            self.env.entry(key).or_insert(value);
        }
        self
    }

    /// Run in `dir` instead of the inherited working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// The command line without the overlay.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    /// Shell-style rendering: `KEY=value ... program args`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{}={} ", key, value)?;
        }
        write!(f, "{}", self.command_line())
    }
}
