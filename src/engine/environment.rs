//! engine::environment
//!
//! Environment contributions that do not come from task options: the
//! project's env file and the local `node_modules/.bin` directory.
//!
//! Nothing here writes to the process environment. Results are merged into
//! an [`Invocation`](crate::engine::invocation::Invocation) overlay with
//! lower precedence than the task's own variables.

use std::env;
use std::ffi::OsString;
use std::path::Path;

use thiserror::Error;

/// Errors reading an env file.
#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("failed to read env file '{path}': {source}")]
    Read {
        path: String,
        source: dotenvy::Error,
    },
}

/// Contents of an env file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EnvFile {
    /// Variables to add, in file order.
    pub vars: Vec<(String, String)>,
    /// Lines that could not be parsed.
    pub skipped: Vec<String>,
}

/// Read `path` as a dotenv file.
///
/// Variables already set in the parent environment are skipped, matching
/// the usual dotenv rule that the real environment wins. A missing file
/// yields no variables. Malformed lines are collected in
/// [`EnvFile::skipped`] and the rest of the file is still read.
pub fn load_env_file(path: &Path) -> Result<EnvFile, EnvFileError> {
    load_env_file_with(path, |key| env::var_os(key).is_some())
}

/// Like [`load_env_file`], with an explicit "already set" check.
pub fn load_env_file_with(
    path: &Path,
    is_set: impl Fn(&str) -> bool,
) -> Result<EnvFile, EnvFileError> {
    let mut file = EnvFile::default();
    if !path.is_file() {
        return Ok(file);
    }

    let read_error = |source| EnvFileError::Read {
        path: path.display().to_string(),
        source,
    };

    for item in dotenvy::from_path_iter(path).map_err(read_error)? {
        match item {
            Ok((key, value)) => {
                if !is_set(&key) {
                    file.vars.push((key, value));
                }
            }
            Err(dotenvy::Error::LineParse(line, _)) => file.skipped.push(line),
            Err(e) => return Err(read_error(e)),
        }
    }
    Ok(file)
}

/// `PATH` with `bin_dir` in front of the inherited entries.
///
/// Returns `None` if `bin_dir` does not exist or the result is not valid
/// UTF-8.
pub fn path_with_bin_dir(bin_dir: &Path) -> Option<String> {
    if !bin_dir.is_dir() {
        return None;
    }
    prepend_path(bin_dir, env::var_os("PATH"))
}

fn prepend_path(bin_dir: &Path, current: Option<OsString>) -> Option<String> {
    let inherited = current
        .as_deref()
        .map(|p| env::split_paths(p).collect::<Vec<_>>())
        .unwrap_or_default();

    let joined = env::join_paths(std::iter::once(bin_dir.to_path_buf()).chain(inherited)).ok()?;
    joined.into_string().ok()
}
