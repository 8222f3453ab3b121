//! hhrun - short commands for hardhat deploy workflows
//!
//! hhrun maps a handful of task names (`deploy`, `verify`, `fork:node`, ...)
//! to invocations of hardhat, ts-node or mocha, deriving environment
//! variables such as `HARDHAT_NETWORK` and `HARDHAT_FORK` from the task's
//! arguments.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (global flags, task selection)
//! - [`engine`] - Task table, invocation building, and process execution
//! - [`core`] - Argument parsing, configuration, and project paths
//! - [`ui`] - Output utilities
//!
//! # Invariants
//!
//! 1. Usage errors are reported before any child process starts
//! 2. Exactly one child process per run, or none
//! 3. The parent's environment is never mutated; children get an overlay
//! 4. Tokens after the first pass-through argument are forwarded verbatim

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
