//! cli::commands
//!
//! Command dispatch.
//!
//! # Architecture
//!
//! Task commands all go through [`run_task`]:
//! 1. Ask the engine to prepare the invocation (parse + build)
//! 2. Report it in debug mode, or print it for `--dry-run`
//! 3. Hand it to the runner
//!
//! Usage errors surface from step 1, so nothing is spawned for them.

mod completion;

pub use completion::{completion, completion_to};

use crate::cli::args::Command;
use crate::engine::{self, Context, ProcessRunner, Runner, Task};
use crate::ui::output::{self, Verbosity};
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    dispatch_with(command, ctx, &ProcessRunner)
}

/// Dispatch with an explicit runner.
pub fn dispatch_with(command: Command, ctx: &Context, runner: &dyn Runner) -> Result<()> {
    if let Command::Completion { shell } = command {
        return completion::completion(shell);
    }

    match command.task() {
        Some((task, raw)) => run_task(task, raw, ctx, runner),
        None => Ok(()),
    }
}

/// Prepare and run one task.
pub fn run_task(task: Task, raw: &[String], ctx: &Context, runner: &dyn Runner) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.debug);

    let invocation = engine::prepare(task, raw, ctx)?;

    output::debug(format!("task: {}", task), verbosity);
    for line in output::describe_invocation(&invocation) {
        output::debug(line, verbosity);
    }

    if ctx.dry_run {
        println!("{}", invocation);
        return Ok(());
    }

    engine::execute(&invocation, runner)?;
    Ok(())
}
