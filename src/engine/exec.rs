//! engine::exec
//!
//! The executor: runs one [`Invocation`] as a child process.
//!
//! # Contract
//!
//! - The child inherits stdin, stdout and stderr
//! - The child's environment is the parent's, extended by the overlay
//! - The parent's own environment is never modified
//! - Success means the child exited with status zero; anything else is an
//!   [`ExecError`]
//!
//! # Runners
//!
//! The [`Runner`] trait is the seam between the dispatcher and process
//! spawning. [`ProcessRunner`] is the real implementation.
//! [`RecordingRunner`] records invocations without running them, for tests.
//!
//! # Example
//!
//! ```no_run
//! use hardhat_run::engine::exec::{ProcessRunner, Runner};
//! use hardhat_run::engine::invocation::Invocation;
//!
//! let invocation = Invocation::new("hardhat")
//!     .args(["--network", "mainnet", "deploy"])
//!     .env("HARDHAT_DEPLOY_LOG", "true");
//!
//! ProcessRunner.run(&invocation).unwrap();
//! ```

use std::process::{Command, ExitStatus, Stdio};
use std::sync::Mutex;

use thiserror::Error;

use super::invocation::Invocation;

/// Errors from running a child process.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The program could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("'{program}' exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

impl ExecError {
    /// Exit code the tool should report for this failure.
    ///
    /// The child's own code when it has one, otherwise 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecError::Failed { status, .. } => status.code().unwrap_or(1),
            ExecError::Spawn { .. } => 1,
        }
    }
}

/// Something that can run an invocation to completion.
pub trait Runner {
    /// Run `invocation` and wait for it.
    fn run(&self, invocation: &Invocation) -> Result<(), ExecError>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), ExecError> {
        let mut command = Command::new(&invocation.program);
        if let Some(dir) = &invocation.dir {
            command.current_dir(dir);
        }

        let status = command
            .args(&invocation.args)
            .envs(&invocation.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ExecError::Spawn {
                program: invocation.program.clone(),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Failed {
                program: invocation.program.clone(),
                status,
            })
        }
    }
}

/// Records invocations instead of running them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Invocations seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Runner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), ExecError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }
        Ok(())
    }
}
