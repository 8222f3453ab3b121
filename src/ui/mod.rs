//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! All of hhrun's own output goes through this module so debug mode is
//! honored consistently.

pub mod output;
