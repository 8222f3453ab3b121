//! cli
//!
//! Command-line interface layer for hhrun.
//!
//! # Responsibilities
//!
//! - Parse global flags and pick the task
//! - Delegate to command handlers
//! - Map failures to the process exit code
//!
//! # Architecture
//!
//! The CLI layer is thin. clap handles global flags and task names; task
//! arguments are handed raw to the [`crate::engine`], which parses them with
//! the task's own schema.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell, TaskArgs};

use crate::engine::{self, EngineError};
use crate::ui::output;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        dry_run: cli.dry_run,
        env_file: !cli.no_env_file,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Report `err` on stderr and return the exit code for it.
pub fn report_error(err: &anyhow::Error) -> i32 {
    output::error(format!("{:#}", err));
    err.downcast_ref::<EngineError>()
        .map(EngineError::exit_code)
        .unwrap_or(1)
}
