//! engine::task
//!
//! The closed table of tasks hhrun knows how to run.
//!
//! # Design
//!
//! Each [`Task`] variant carries three things:
//! - how many fixed (positional) args it takes
//! - which `--options` it recognizes, and their kinds
//! - how to turn a [`ParseResult`] into an [`Invocation`]
//!
//! Building is pure: it reads the parse result and configuration and never
//! touches the process environment. Options that were not given contribute
//! nothing to the overlay. Extra tokens always go last, verbatim.
//!
//! # Fork tasks
//!
//! The `fork:*` tasks run against a local simulation of a live network.
//! They share an option schema and these overlay variables:
//!
//! | option | variable |
//! |---|---|
//! | (network) | `HARDHAT_FORK` |
//! | `--blockNumber <n>` | `HARDHAT_FORK_NUMBER` |
//! | `--no-impersonation` | `HARDHAT_DEPLOY_NO_IMPERSONATION=true` |

use std::fmt;

use thiserror::Error;

use crate::core::config::Config;
use crate::core::parse::{parse, OptionKind, OptionSpec, ParseError, ParseResult};
use crate::core::paths::strip_project_prefix;
use crate::engine::invocation::Invocation;

const BLOCK_NUMBER: &str = "blockNumber";
const NO_IMPERSONATION: &str = "no-impersonation";
const DEPLOY: &str = "deploy";

const FORK_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new(BLOCK_NUMBER, OptionKind::String),
    OptionSpec::new(NO_IMPERSONATION, OptionKind::Boolean),
];

const FORK_RUN_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new(DEPLOY, OptionKind::Boolean),
    OptionSpec::new(BLOCK_NUMBER, OptionKind::String),
    OptionSpec::new(NO_IMPERSONATION, OptionKind::Boolean),
];

/// Errors detected before any process is started.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("need to specify the network as first argument")]
    MissingNetwork,

    #[error("'{task}' expects {expected} fixed args, got only {got}")]
    MissingFixedArgs {
        task: Task,
        expected: usize,
        got: usize,
    },
}

/// Inputs to [`Task::build`] besides the parse result.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Tool names and node settings.
    pub config: &'a Config,
    /// Prefix stripped from script paths, if any.
    pub dir_name: Option<&'a str>,
}

/// A named task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Run a script against a network.
    Run,
    /// Deploy to a network.
    Deploy,
    /// Verify deployed sources on a block explorer.
    Verify,
    /// Export deployment info for a network.
    Export,
    /// Run a script against a fork.
    ForkRun,
    /// Deploy to a fork.
    ForkDeploy,
    /// Start a forked node.
    ForkNode,
    /// Start a forked node that redeploys on change.
    ForkDev,
    /// Run the test suite against a fork.
    ForkTest,
    /// Push deployments to Tenderly.
    TenderlyPush,
}

impl Task {
    /// Every task, in help order.
    pub const ALL: [Task; 10] = [
        Task::Run,
        Task::Deploy,
        Task::Verify,
        Task::Export,
        Task::ForkRun,
        Task::ForkDeploy,
        Task::ForkNode,
        Task::ForkDev,
        Task::ForkTest,
        Task::TenderlyPush,
    ];

    /// Name as typed on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Task::Run => "run",
            Task::Deploy => "deploy",
            Task::Verify => "verify",
            Task::Export => "export",
            Task::ForkRun => "fork:run",
            Task::ForkDeploy => "fork:deploy",
            Task::ForkNode => "fork:node",
            Task::ForkDev => "fork:dev",
            Task::ForkTest => "fork:test",
            Task::TenderlyPush => "tenderly:push",
        }
    }

    /// Exact-match lookup.
    pub fn from_name(name: &str) -> Option<Task> {
        Task::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Number of fixed args.
    pub fn num_fixed(self) -> usize {
        match self {
            Task::Run | Task::Export | Task::ForkRun => 2,
            _ => 1,
        }
    }

    /// Recognized options.
    pub fn options(self) -> &'static [OptionSpec] {
        match self {
            Task::ForkRun => FORK_RUN_OPTIONS,
            Task::ForkDeploy | Task::ForkNode | Task::ForkDev | Task::ForkTest => FORK_OPTIONS,
            _ => &[],
        }
    }

    /// Parse `raw` with this task's schema and build the invocation.
    pub fn prepare(self, raw: &[String], ctx: BuildContext<'_>) -> Result<Invocation, UsageError> {
        let parsed = parse(raw, self.num_fixed(), self.options())?;
        self.build(&parsed, ctx)
    }

    /// Build the invocation for an already parsed argument list.
    ///
    /// # Errors
    ///
    /// - [`UsageError::MissingNetwork`] for `verify` with an absent or empty network
    /// - [`UsageError::MissingFixedArgs`] if fewer fixed args than required were given
    pub fn build(self, parsed: &ParseResult, ctx: BuildContext<'_>) -> Result<Invocation, UsageError> {
        if self == Task::Verify && parsed.fixed(0).map_or(true, str::is_empty) {
            return Err(UsageError::MissingNetwork);
        }
        if parsed.fixed_args.len() < self.num_fixed() {
            return Err(UsageError::MissingFixedArgs {
                task: self,
                expected: self.num_fixed(),
                got: parsed.fixed_args.len(),
            });
        }

        let network = parsed.fixed_args[0].as_str();
        let config = ctx.config;

        let invocation = match self {
            Task::Run => Invocation::new(config.ts_node())
                .args(["--files", script_path(parsed, ctx)])
                .env("HARDHAT_DEPLOY_LOG", "true")
                .env("HARDHAT_NETWORK", network),
            Task::Deploy => hardhat_on(config, network).args(["deploy", "--report-gas"]),
            Task::Verify => hardhat_on(config, network).arg("etherscan-verify"),
            Task::Export => hardhat_on(config, network).args([
                "export",
                "--export",
                parsed.fixed_args[1].as_str(),
            ]),
            Task::ForkRun => fork_env(Invocation::new(config.ts_node()), parsed)
                .args(["--files", script_path(parsed, ctx)])
                .env("HARDHAT_DEPLOY_LOG", "true")
                .env_opt("HARDHAT_DEPLOY_FIXTURE", parsed.flag(DEPLOY).then_some("true")),
            Task::ForkDeploy => {
                fork_env(Invocation::new(config.hardhat()), parsed).args(["deploy", "--report-gas"])
            }
            Task::ForkNode => fork_env(Invocation::new(config.hardhat()), parsed)
                .args(["node", "--hostname", config.node_hostname()]),
            Task::ForkDev => fork_env(Invocation::new(config.hardhat()), parsed).args([
                "node",
                "--hostname",
                config.node_hostname(),
                "--watch",
                "--export",
                config.node_export_file(),
            ]),
            Task::ForkTest => fork_env(Invocation::new(config.mocha()), parsed)
                .args(["--bail", "--recursive", "test"])
                .env("HARDHAT_DEPLOY_FIXTURE", "true")
                .env("HARDHAT_COMPILE", "true"),
            Task::TenderlyPush => hardhat_on(config, network).arg("tenderly:push"),
        };

        Ok(invocation.args(parsed.extra.iter().cloned()))
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn hardhat_on(config: &Config, network: &str) -> Invocation {
    Invocation::new(config.hardhat()).args(["--network", network])
}

fn fork_env(invocation: Invocation, parsed: &ParseResult) -> Invocation {
    invocation
        .env("HARDHAT_FORK", parsed.fixed_args[0].as_str())
        .env_opt("HARDHAT_FORK_NUMBER", parsed.value(BLOCK_NUMBER))
        .env_opt(
            "HARDHAT_DEPLOY_NO_IMPERSONATION",
            parsed.flag(NO_IMPERSONATION).then_some("true"),
        )
}

fn script_path<'a>(parsed: &'a ParseResult, ctx: BuildContext<'_>) -> &'a str {
    let path = parsed.fixed_args[1].as_str();
    match ctx.dir_name {
        Some(dir) => strip_project_prefix(path, dir),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn prepare(task: Task, tokens: &[&str]) -> Result<Invocation, UsageError> {
        let config = Config::default();
        let ctx = BuildContext {
            config: &config,
            dir_name: Some("contracts"),
        };
        task.prepare(&args(tokens), ctx)
    }

    #[test]
    fn names_round_trip() {
        for task in Task::ALL {
            assert_eq!(Task::from_name(task.name()), Some(task));
            assert_eq!(task.to_string(), task.name());
        }
        assert_eq!(Task::from_name("fork"), None);
        assert_eq!(Task::from_name("Deploy"), None);
    }

    #[test]
    fn run_sets_network_and_strips_prefix() {
        let inv = prepare(Task::Run, &["mainnet", "contracts/scripts/seed.ts", "--verbose"]).unwrap();

        assert_eq!(inv.program, "ts-node");
        assert_eq!(inv.args, vec!["--files", "scripts/seed.ts", "--verbose"]);
        assert_eq!(inv.env.get("HARDHAT_NETWORK").map(String::as_str), Some("mainnet"));
        assert_eq!(inv.env.get("HARDHAT_DEPLOY_LOG").map(String::as_str), Some("true"));
    }

    #[test]
    fn deploy_appends_extra() {
        let inv = prepare(Task::Deploy, &["rinkeby", "--tags", "Token"]).unwrap();

        assert_eq!(
            inv.command_line(),
            "hardhat --network rinkeby deploy --report-gas --tags Token"
        );
        assert!(inv.env.is_empty());
    }

    #[test]
    fn verify_requires_network() {
        assert_eq!(prepare(Task::Verify, &[]), Err(UsageError::MissingNetwork));
        assert_eq!(prepare(Task::Verify, &[""]), Err(UsageError::MissingNetwork));

        let inv = prepare(Task::Verify, &["mainnet", "--license", "MIT"]).unwrap();
        assert_eq!(
            inv.command_line(),
            "hardhat --network mainnet etherscan-verify --license MIT"
        );
    }

    #[test]
    fn missing_fixed_args_reported() {
        let err = prepare(Task::Export, &["mainnet"]).unwrap_err();

        assert_eq!(
            err,
            UsageError::MissingFixedArgs {
                task: Task::Export,
                expected: 2,
                got: 1
            }
        );
        assert_eq!(err.to_string(), "'export' expects 2 fixed args, got only 1");
    }

    #[test]
    fn parse_errors_pass_through() {
        let err = prepare(Task::Deploy, &["--tags", "mainnet"]).unwrap_err();
        assert_eq!(err.to_string(), "expected 1 fixed args, got only 0");
    }

    #[test]
    fn export_uses_output_path() {
        let inv = prepare(Task::Export, &["mainnet", "out/mainnet.json"]).unwrap();
        assert_eq!(
            inv.command_line(),
            "hardhat --network mainnet export --export out/mainnet.json"
        );
    }

    #[test]
    fn fork_deploy_maps_options_to_env() {
        let inv = prepare(
            Task::ForkDeploy,
            &["mainnet", "--blockNumber", "123", "--no-impersonation"],
        )
        .unwrap();

        assert_eq!(inv.command_line(), "hardhat deploy --report-gas");
        assert_eq!(inv.env.get("HARDHAT_FORK").map(String::as_str), Some("mainnet"));
        assert_eq!(inv.env.get("HARDHAT_FORK_NUMBER").map(String::as_str), Some("123"));
        assert_eq!(
            inv.env.get("HARDHAT_DEPLOY_NO_IMPERSONATION").map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn fork_without_options_sets_only_fork() {
        let inv = prepare(Task::ForkNode, &["mainnet"]).unwrap();

        assert_eq!(inv.command_line(), "hardhat node --hostname 0.0.0.0");
        assert_eq!(inv.env.len(), 1);
    }

    #[test]
    fn fork_run_deploy_flag() {
        let inv = prepare(Task::ForkRun, &["--deploy", "mainnet", "scripts/a.ts"]).unwrap();

        assert_eq!(inv.program, "ts-node");
        assert_eq!(inv.env.get("HARDHAT_DEPLOY_FIXTURE").map(String::as_str), Some("true"));
        assert_eq!(inv.env.get("HARDHAT_DEPLOY_LOG").map(String::as_str), Some("true"));
        assert_eq!(inv.env.get("HARDHAT_FORK").map(String::as_str), Some("mainnet"));

        let inv = prepare(Task::ForkRun, &["mainnet", "scripts/a.ts"]).unwrap();
        assert!(!inv.env.contains_key("HARDHAT_DEPLOY_FIXTURE"));
    }

    #[test]
    fn fork_dev_and_test_commands() {
        let dev = prepare(Task::ForkDev, &["mainnet"]).unwrap();
        assert_eq!(
            dev.command_line(),
            "hardhat node --hostname 0.0.0.0 --watch --export contractsInfo.json"
        );

        let test = prepare(Task::ForkTest, &["mainnet", "--grep", "Token"]).unwrap();
        assert_eq!(test.command_line(), "mocha --bail --recursive test --grep Token");
        assert_eq!(test.env.get("HARDHAT_COMPILE").map(String::as_str), Some("true"));
        assert_eq!(test.env.get("HARDHAT_DEPLOY_FIXTURE").map(String::as_str), Some("true"));
    }

    #[test]
    fn options_after_passthrough_are_forwarded() {
        let inv = prepare(Task::ForkTest, &["mainnet", "test/a.ts", "--blockNumber", "5"]).unwrap();

        assert!(!inv.env.contains_key("HARDHAT_FORK_NUMBER"));
        assert_eq!(
            inv.args,
            vec!["--bail", "--recursive", "test", "test/a.ts", "--blockNumber", "5"]
        );
    }

    #[test]
    fn tenderly_push() {
        let inv = prepare(Task::TenderlyPush, &["mainnet"]).unwrap();
        assert_eq!(inv.command_line(), "hardhat --network mainnet tenderly:push");
    }

    #[test]
    fn configured_tools_are_used() {
        let temp = tempfile::TempDir::new().unwrap();
        let project = temp.path().join("hhrun.toml");
        std::fs::write(
            &project,
            "[tools]\nhardhat = \"npx-hardhat\"\n[node]\nhostname = \"127.0.0.1\"",
        )
        .unwrap();
        let config = Config::from_files(None, Some(&project)).unwrap();
        let ctx = BuildContext {
            config: &config,
            dir_name: None,
        };

        let inv = Task::ForkNode.prepare(&args(&["mainnet"]), ctx).unwrap();
        assert_eq!(inv.command_line(), "npx-hardhat node --hostname 127.0.0.1");
    }
}
