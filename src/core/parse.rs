//! core::parse
//!
//! Raw argument classification.
//!
//! # Overview
//!
//! Every task receives the tokens that follow its name on the command line.
//! [`parse`] splits them into three buckets in a single left-to-right pass:
//!
//! - **fixed args**: the first `num_fixed` bare tokens, in order
//! - **options**: `--name` tokens named in the task's [`OptionSpec`] table
//! - **extra**: everything else, forwarded verbatim to the wrapped tool
//!
//! # Pass-through
//!
//! Once all fixed args are collected, the first bare token switches option
//! recognition off for the rest of the line. From then on every token,
//! including ones that start with `--`, lands in `extra`. This keeps flags
//! meant for hardhat or mocha from being read as our own.
//!
//! # Example
//!
//! ```
//! use hardhat_run::core::parse::{parse, OptionKind, OptionSpec};
//!
//! const SCHEMA: &[OptionSpec] = &[OptionSpec::new("blockNumber", OptionKind::String)];
//!
//! let raw: Vec<String> = ["mainnet", "--blockNumber", "123", "--verbose"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let parsed = parse(&raw, 1, SCHEMA).unwrap();
//! assert_eq!(parsed.fixed_args, vec!["mainnet"]);
//! assert_eq!(parsed.value("blockNumber"), Some("123"));
//! assert_eq!(parsed.extra, vec!["--verbose"]);
//! ```

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

/// Prefix that marks a token as a named option.
pub const OPTION_MARKER: &str = "--";

/// How a recognized option consumes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Presence only; consumes no value.
    Boolean,
    /// Consumes the following token as its value.
    String,
}

/// One entry of a task's option schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Option name without the leading marker.
    pub name: &'static str,
    /// Value kind.
    pub kind: OptionKind,
}

impl OptionSpec {
    /// Declare an option.
    pub const fn new(name: &'static str, kind: OptionKind) -> Self {
        Self { name, kind }
    }
}

/// A parsed option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// A boolean option that was present.
    Flag,
    /// A string option and the token it consumed.
    Value(String),
}

/// Output of [`parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Positional values, at most `num_fixed` of them.
    pub fixed_args: Vec<String>,
    /// Recognized options, first occurrence only.
    pub options: BTreeMap<String, OptionValue>,
    /// Tokens not consumed as positional or option input.
    pub extra: Vec<String>,
}

impl ParseResult {
    /// Positional value at `index`, if it was supplied.
    pub fn fixed(&self, index: usize) -> Option<&str> {
        self.fixed_args.get(index).map(String::as_str)
    }

    /// True if the option was recorded (either kind).
    pub fn flag(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Value of a string option, if recorded.
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(OptionValue::Value(v)) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// Errors from [`parse`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An option-like token showed up before the positionals were complete.
    #[error("expected {expected} fixed args, got only {got}")]
    InsufficientFixedArgs { expected: usize, got: usize },

    /// A string option was the last token.
    #[error("option '--{option}' requires a value")]
    MissingValue { option: String },
}

/// Classify `raw` into fixed args, options and extra tokens.
///
/// The set of already-recorded option names lives only for this call.
///
/// # Errors
///
/// - [`ParseError::InsufficientFixedArgs`] if an unrecognized or repeated
///   `--` token appears while fewer than `num_fixed` positionals are known
/// - [`ParseError::MissingValue`] if a string option has no following token
pub fn parse(
    raw: &[String],
    num_fixed: usize,
    schema: &[OptionSpec],
) -> Result<ParseResult, ParseError> {
    let mut result = ParseResult::default();
    let mut recorded: HashSet<&str> = HashSet::new();

    let mut i = 0;
    while i < raw.len() {
        let token = &raw[i];

        if let Some(name) = token.strip_prefix(OPTION_MARKER) {
            let spec = schema.iter().find(|s| s.name == name);

            match spec {
                Some(spec) if !recorded.contains(spec.name) => {
                    recorded.insert(spec.name);
                    match spec.kind {
                        OptionKind::Boolean => {
                            result.options.insert(name.to_string(), OptionValue::Flag);
                        }
                        OptionKind::String => {
                            i += 1;
                            let value = raw.get(i).ok_or_else(|| ParseError::MissingValue {
                                option: name.to_string(),
                            })?;
                            result
                                .options
                                .insert(name.to_string(), OptionValue::Value(value.clone()));
                        }
                    }
                }
                _ => {
                    if result.fixed_args.len() < num_fixed {
                        return Err(ParseError::InsufficientFixedArgs {
                            expected: num_fixed,
                            got: result.fixed_args.len(),
                        });
                    }
                    result.extra.push(token.clone());
                }
            }
        } else if result.fixed_args.len() < num_fixed {
            result.fixed_args.push(token.clone());
        } else {
            // Pass-through starts here; no more option recognition.
            recorded.extend(schema.iter().map(|s| s.name));
            result.extra.push(token.clone());
        }

        i += 1;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORK: &[OptionSpec] = &[
        OptionSpec::new("blockNumber", OptionKind::String),
        OptionSpec::new("no-impersonation", OptionKind::Boolean),
    ];

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn positional_then_unknown_flag_goes_to_extra() {
        let parsed = parse(&args(&["mainnet", "scripts/deploy.ts", "--verbose"]), 2, &[]).unwrap();

        assert_eq!(parsed.fixed_args, vec!["mainnet", "scripts/deploy.ts"]);
        assert!(parsed.options.is_empty());
        assert_eq!(parsed.extra, vec!["--verbose"]);
    }

    #[test]
    fn string_and_boolean_options() {
        let parsed = parse(
            &args(&["mainnet", "--blockNumber", "123", "--no-impersonation"]),
            1,
            FORK,
        )
        .unwrap();

        assert_eq!(parsed.fixed_args, vec!["mainnet"]);
        assert_eq!(parsed.value("blockNumber"), Some("123"));
        assert!(parsed.flag("no-impersonation"));
        assert_eq!(parsed.options.len(), 2);
        assert!(parsed.extra.is_empty());
    }

    #[test]
    fn options_may_precede_positionals() {
        let parsed = parse(&args(&["--no-impersonation", "mainnet"]), 1, FORK).unwrap();

        assert_eq!(parsed.fixed_args, vec!["mainnet"]);
        assert!(parsed.flag("no-impersonation"));
    }

    #[test]
    fn unknown_option_before_positionals_fails() {
        let err = parse(&args(&["--verbose", "mainnet"]), 1, FORK).unwrap_err();

        assert_eq!(err, ParseError::InsufficientFixedArgs { expected: 1, got: 0 });
        assert_eq!(err.to_string(), "expected 1 fixed args, got only 0");
    }

    #[test]
    fn repeated_option_is_not_reparsed() {
        let parsed = parse(
            &args(&["mainnet", "--blockNumber", "1", "--blockNumber", "2"]),
            1,
            FORK,
        )
        .unwrap();

        assert_eq!(parsed.value("blockNumber"), Some("1"));
        assert_eq!(parsed.extra, vec!["--blockNumber", "2"]);
    }

    #[test]
    fn repeated_option_before_positionals_fails() {
        let err = parse(
            &args(&["--no-impersonation", "--no-impersonation", "mainnet"]),
            1,
            FORK,
        )
        .unwrap_err();

        assert!(matches!(err, ParseError::InsufficientFixedArgs { .. }));
    }

    #[test]
    fn bare_extra_disables_option_recognition() {
        let parsed = parse(
            &args(&["mainnet", "--tags", "--no-impersonation"]),
            1,
            FORK,
        )
        .unwrap();
        // "--tags" is unknown, so recognition is still on here.
        assert!(parsed.flag("no-impersonation"));

        let parsed = parse(
            &args(&["mainnet", "tags", "--no-impersonation", "--blockNumber", "5"]),
            1,
            FORK,
        )
        .unwrap();
        assert!(parsed.options.is_empty());
        assert_eq!(
            parsed.extra,
            vec!["tags", "--no-impersonation", "--blockNumber", "5"]
        );
    }

    #[test]
    fn string_option_consumes_marker_like_value() {
        let parsed = parse(&args(&["mainnet", "--blockNumber", "--x"]), 1, FORK).unwrap();

        assert_eq!(parsed.value("blockNumber"), Some("--x"));
        assert!(parsed.extra.is_empty());
    }

    #[test]
    fn trailing_string_option_without_value_fails() {
        let err = parse(&args(&["mainnet", "--blockNumber"]), 1, FORK).unwrap_err();

        assert_eq!(
            err,
            ParseError::MissingValue {
                option: "blockNumber".to_string()
            }
        );
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let parsed = parse(&[], 2, FORK).unwrap();
        assert_eq!(parsed, ParseResult::default());
    }

    #[test]
    fn bare_marker_is_an_ordinary_extra() {
        let parsed = parse(&args(&["mainnet", "--", "x"]), 1, &[]).unwrap();
        assert_eq!(parsed.extra, vec!["--", "x"]);
    }
}
