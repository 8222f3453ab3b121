//! engine
//!
//! Turns a task name and its raw arguments into a finished child process.
//!
//! # Lifecycle
//!
//! Every task follows the same pipeline:
//!
//! ```text
//! Resolve project -> Load config -> Parse -> Build -> Execute
//! ```
//!
//! 1. **Resolve**: find the project root from the working directory
//! 2. **Load config**: global and project `hhrun` settings
//! 3. **Parse**: split raw args with the task's schema ([`crate::core::parse`])
//! 4. **Build**: assemble the [`Invocation`] and its environment overlay
//! 5. **Execute**: hand the invocation to a [`Runner`]
//!
//! # Invariants
//!
//! - Usage errors are reported before any process is started
//! - At most one child process per run; no retries
//! - The parent's environment is never modified; all variables go through
//!   the invocation's overlay
//!
//! # Example
//!
//! ```no_run
//! use hardhat_run::engine::{self, Context};
//! use hardhat_run::engine::exec::ProcessRunner;
//! use hardhat_run::engine::task::Task;
//!
//! let ctx = Context::default();
//! let raw = vec!["mainnet".to_string()];
//! let invocation = engine::prepare(Task::Deploy, &raw, &ctx).unwrap();
//! engine::execute(&invocation, &ProcessRunner).unwrap();
//! ```

pub mod environment;
pub mod exec;
pub mod invocation;
pub mod task;

pub use exec::{ExecError, ProcessRunner, RecordingRunner, Runner};
pub use invocation::{EnvOverlay, Invocation};
pub use task::{BuildContext, Task, UsageError};

use std::path::PathBuf;

use crate::core::config::{Config, ConfigError};
use crate::core::paths::ProjectPaths;
use crate::ui::output::{self, Verbosity};

/// Execution context for tasks.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Print the invocation instead of running it.
    pub dry_run: bool,
    /// Load the project's env file into the overlay.
    pub env_file: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            dry_run: false,
            env_file: true,
        }
    }
}

/// Errors from engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Bad task arguments.
    #[error("{0}")]
    Usage(#[from] UsageError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Child process failed.
    #[error("{0}")]
    Exec(#[from] ExecError),

    /// Working directory could not be determined.
    #[error("failed to determine working directory: {0}")]
    Cwd(std::io::Error),
}

impl EngineError {
    /// Exit code the process should end with.
    ///
    /// - usage errors: 2
    /// - child failures: the child's own code
    /// - everything else: 1
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::Usage(_) => 2,
            EngineError::Exec(e) => e.exit_code(),
            _ => 1,
        }
    }
}

/// Build the invocation for `task` without running it.
///
/// Resolves the project from `ctx.cwd` (or the process working directory),
/// loads configuration, parses `raw`, and layers the env file and
/// `node_modules/.bin` under the task's own overlay. The child runs in the
/// project root.
pub fn prepare(task: Task, raw: &[String], ctx: &Context) -> Result<Invocation, EngineError> {
    let cwd = match &ctx.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(EngineError::Cwd)?,
    };
    let paths = ProjectPaths::discover(&cwd);
    let config = Config::load(Some(&paths))?;

    let build_ctx = BuildContext {
        config: &config,
        dir_name: config.project_dir_name().or_else(|| paths.dir_name()),
    };
    let mut invocation = task.prepare(raw, build_ctx)?.current_dir(paths.root());

    if ctx.env_file {
        let verbosity = Verbosity::from_flags(ctx.debug);
        match environment::load_env_file(&paths.env_file(config.env_file())) {
            Ok(file) => {
                for line in &file.skipped {
                    output::debug(format!("skipping env file line: {}", line), verbosity);
                }
                invocation = invocation.env_defaults(file.vars);
            }
            Err(e) => output::debug(format!("{}; continuing without it", e), verbosity),
        }
    }

    if config.node_bin() {
        if let Some(path) = environment::path_with_bin_dir(&paths.node_bin_dir()) {
            invocation = invocation.env_defaults([("PATH".to_string(), path)]);
        }
    }

    Ok(invocation)
}

/// Run a prepared invocation to completion.
pub fn execute(invocation: &Invocation, runner: &dyn Runner) -> Result<(), EngineError> {
    runner.run(invocation)?;
    Ok(())
}
