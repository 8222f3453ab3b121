//! core
//!
//! Core types and rules for hhrun.
//!
//! # Modules
//!
//! - [`parse`] - Raw argument classification (fixed args, options, extra)
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Project root discovery and path routing
//!
//! # Design Principles
//!
//! - Everything here is side-effect free apart from reading files
//! - Schemas are strict and self-describing

pub mod config;
pub mod parse;
pub mod paths;
