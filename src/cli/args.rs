//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags go before the task name:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Print the resolved command line and environment
//! - `--dry-run`: Print the command line instead of running it
//! - `--no-env-file`: Do not load the project's env file
//!
//! # Task Arguments
//!
//! clap only sees the global flags and the task name. Everything after the
//! task name is split off before clap runs and handed, exactly as typed, to
//! [`crate::core::parse`] with the task's own schema. That includes `--`,
//! `-h` and `--help`, which clap would otherwise claim for itself. Use
//! `hhrun help <task>` for a task's help page.

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::engine::Task;

/// hhrun - Short commands for hardhat deploy workflows
#[derive(Parser, Debug)]
#[command(name = "hhrun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if hhrun was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Print the command line and environment before running
    #[arg(long)]
    pub debug: bool,

    /// Print the command line instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Do not load the project's env file
    #[arg(long)]
    pub no_env_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments, exiting on error.
    pub fn parse_args() -> Self {
        let argv = std::env::args_os()
            .map(OsString::into_string)
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|arg| {
                clap::Error::raw(
                    ErrorKind::InvalidUtf8,
                    format!("invalid UTF-8 in argument {:?}\n", arg),
                )
                .exit()
            });

        Self::try_parse_argv(&argv).unwrap_or_else(|e| e.exit())
    }

    /// Parse `argv` (program name first).
    ///
    /// Tokens after a task name bypass clap and become the task's raw args.
    pub fn try_parse_argv(argv: &[String]) -> Result<Self, clap::Error> {
        let (head, tail) = split_task_tokens(argv);
        let mut cli = Cli::try_parse_from(head)?;
        if let Some(task_args) = cli.command.task_args_mut() {
            task_args.args = tail.to_vec();
        }
        Ok(cli)
    }
}

/// Split `argv` just after the task name.
///
/// The task name is the first token that is neither a global flag nor the
/// value of `--cwd`. If that token is not a task (`completion`, `help`, a
/// typo), clap gets the whole line and the tail is empty.
fn split_task_tokens(argv: &[String]) -> (&[String], &[String]) {
    let mut i = 1;
    while i < argv.len() {
        let token = argv[i].as_str();
        if token == "--cwd" {
            i += 2;
        } else if token.starts_with('-') {
            i += 1;
        } else {
            if Task::from_name(token).is_some() {
                return argv.split_at(i + 1);
            }
            break;
        }
    }
    (argv, &[])
}

/// Raw tokens following a task name.
#[derive(Args, Debug, Clone, Default)]
pub struct TaskArgs {
    /// Positional args, task options, and pass-through args
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ARGS"
    )]
    pub args: Vec<String>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a script against a network
    #[command(
        name = "run",
        long_about = "Run a TypeScript script with ts-node against a network.\n\n\
            Sets HARDHAT_NETWORK to the given network and enables deploy logging. \
            A script path that starts with the project directory's own name is \
            rewritten to be relative to the project root.",
        after_help = "\
USAGE:
    hhrun run <NETWORK> <SCRIPT> [PASS-THROUGH...]

EXAMPLES:
    hhrun run rinkeby scripts/fund.ts
    hhrun run mainnet contracts/scripts/seed.ts --amount 10"
    )]
    Run(TaskArgs),

    /// Deploy to a network
    #[command(
        name = "deploy",
        after_help = "\
USAGE:
    hhrun deploy <NETWORK> [PASS-THROUGH...]

EXAMPLES:
    hhrun deploy rinkeby
    hhrun deploy mainnet --tags Token"
    )]
    Deploy(TaskArgs),

    /// Verify deployed sources on the block explorer
    #[command(
        name = "verify",
        after_help = "\
USAGE:
    hhrun verify <NETWORK> [PASS-THROUGH...]

EXAMPLES:
    hhrun verify mainnet
    hhrun verify rinkeby --license MIT"
    )]
    Verify(TaskArgs),

    /// Export deployment info for a network
    #[command(
        name = "export",
        after_help = "\
USAGE:
    hhrun export <NETWORK> <OUTPUT> [PASS-THROUGH...]

EXAMPLES:
    hhrun export mainnet deployments/mainnet.json"
    )]
    Export(TaskArgs),

    /// Run a script against a local fork of a network
    #[command(
        name = "fork:run",
        long_about = "Run a TypeScript script against a local fork of a network.\n\n\
            Options must come before the first pass-through argument; after it \
            every token is forwarded to the script unchanged.",
        after_help = "\
USAGE:
    hhrun fork:run <NETWORK> <SCRIPT> [--deploy] [--blockNumber <N>] [--no-impersonation] [PASS-THROUGH...]

OPTIONS:
    --deploy               Run deploy scripts first (HARDHAT_DEPLOY_FIXTURE)
    --blockNumber <N>      Fork at this block (HARDHAT_FORK_NUMBER)
    --no-impersonation     Disable account impersonation

EXAMPLES:
    hhrun fork:run mainnet scripts/audit.ts --blockNumber 12000000"
    )]
    ForkRun(TaskArgs),

    /// Deploy to a local fork of a network
    #[command(
        name = "fork:deploy",
        after_help = "\
USAGE:
    hhrun fork:deploy <NETWORK> [--blockNumber <N>] [--no-impersonation] [PASS-THROUGH...]

EXAMPLES:
    hhrun fork:deploy mainnet --blockNumber 12000000"
    )]
    ForkDeploy(TaskArgs),

    /// Start a node forking a network
    #[command(
        name = "fork:node",
        after_help = "\
USAGE:
    hhrun fork:node <NETWORK> [--blockNumber <N>] [--no-impersonation] [PASS-THROUGH...]"
    )]
    ForkNode(TaskArgs),

    /// Start a forking node that redeploys on change
    #[command(
        name = "fork:dev",
        after_help = "\
USAGE:
    hhrun fork:dev <NETWORK> [--blockNumber <N>] [--no-impersonation] [PASS-THROUGH...]"
    )]
    ForkDev(TaskArgs),

    /// Run the test suite against a fork
    #[command(
        name = "fork:test",
        after_help = "\
USAGE:
    hhrun fork:test <NETWORK> [--blockNumber <N>] [--no-impersonation] [PASS-THROUGH...]

EXAMPLES:
    hhrun fork:test mainnet --grep Token"
    )]
    ForkTest(TaskArgs),

    /// Push deployments to Tenderly
    #[command(
        name = "tenderly:push",
        after_help = "\
USAGE:
    hhrun tenderly:push <NETWORK>"
    )]
    TenderlyPush(TaskArgs),

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    hhrun completion bash > ~/.local/share/bash-completion/completions/hhrun
    hhrun completion zsh > ~/.zfunc/_hhrun"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Command {
    /// The task and its raw arguments, for task commands.
    pub fn task(&self) -> Option<(Task, &[String])> {
        let (task, args) = match self {
            Command::Run(a) => (Task::Run, a),
            Command::Deploy(a) => (Task::Deploy, a),
            Command::Verify(a) => (Task::Verify, a),
            Command::Export(a) => (Task::Export, a),
            Command::ForkRun(a) => (Task::ForkRun, a),
            Command::ForkDeploy(a) => (Task::ForkDeploy, a),
            Command::ForkNode(a) => (Task::ForkNode, a),
            Command::ForkDev(a) => (Task::ForkDev, a),
            Command::ForkTest(a) => (Task::ForkTest, a),
            Command::TenderlyPush(a) => (Task::TenderlyPush, a),
            Command::Completion { .. } => return None,
        };
        Some((task, args.args.as_slice()))
    }

    fn task_args_mut(&mut self) -> Option<&mut TaskArgs> {
        match self {
            Command::Run(a)
            | Command::Deploy(a)
            | Command::Verify(a)
            | Command::Export(a)
            | Command::ForkRun(a)
            | Command::ForkDeploy(a)
            | Command::ForkNode(a)
            | Command::ForkDev(a)
            | Command::ForkTest(a)
            | Command::TenderlyPush(a) => Some(a),
            Command::Completion { .. } => None,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
