//! core::paths
//!
//! Centralized path routing for the project hhrun is invoked in.
//!
//! # Project Root
//!
//! The project root is the nearest ancestor of the working directory that
//! holds a hardhat config (`hardhat.config.ts` / `hardhat.config.js`) or,
//! failing that, a `package.json`. If neither is found the working
//! directory itself is the root.
//!
//! # Layout
//!
//! Paths derived from the root:
//! - `hhrun.toml` - Project configuration
//! - `.env` - Environment file (name configurable)
//! - `node_modules/.bin` - Locally installed tool binaries
//!
//! # Example
//!
//! ```
//! use hardhat_run::core::paths::{strip_project_prefix, ProjectPaths};
//! use std::path::PathBuf;
//!
//! let paths = ProjectPaths::new(PathBuf::from("/work/contracts"));
//! assert_eq!(paths.config_path(), PathBuf::from("/work/contracts/hhrun.toml"));
//! assert_eq!(paths.dir_name(), Some("contracts"));
//!
//! assert_eq!(
//!     strip_project_prefix("contracts/scripts/seed.ts", "contracts"),
//!     "scripts/seed.ts"
//! );
//! ```

use std::path::{Path, PathBuf};

/// Files whose presence marks a project root, in priority order.
const ROOT_MARKERS: &[&[&str]] = &[
    &["hardhat.config.ts", "hardhat.config.js"],
    &["package.json"],
];

/// Project-scoped path routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    /// Use `root` as the project root.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Find the project root at or above `cwd`.
    pub fn discover(cwd: &Path) -> Self {
        for markers in ROOT_MARKERS {
            let found = cwd
                .ancestors()
                .find(|dir| markers.iter().any(|m| dir.join(m).is_file()));
            if let Some(dir) = found {
                return Self::new(dir.to_path_buf());
            }
        }
        Self::new(cwd.to_path_buf())
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final component of the root, used for script path rewriting.
    pub fn dir_name(&self) -> Option<&str> {
        self.root.file_name().and_then(|n| n.to_str())
    }

    /// Project config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("hhrun.toml")
    }

    /// Environment file with the given name.
    pub fn env_file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Directory npm installs tool binaries into.
    pub fn node_bin_dir(&self) -> PathBuf {
        self.root.join("node_modules").join(".bin")
    }
}

/// Remove a leading `<dir_name>/` or `<dir_name>\` from `path`.
///
/// Lets a script path written relative to the project's parent directory
/// (as shells and editors often complete it) be used from inside the
/// project. Any other path is returned unchanged.
pub fn strip_project_prefix<'a>(path: &'a str, dir_name: &str) -> &'a str {
    if dir_name.is_empty() {
        return path;
    }
    path.strip_prefix(dir_name)
        .and_then(|rest| rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')))
        .unwrap_or(path)
}
