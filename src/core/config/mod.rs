//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! hhrun has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Per-project overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$HHRUN_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/hhrun/config.toml`
//! 3. `~/.hhrun/config.toml`
//!
//! # Project Config Location
//!
//! `hhrun.toml` at the project root (see [`crate::core::paths`]).
//!
//! # Example
//!
//! ```no_run
//! use hardhat_run::core::config::Config;
//! use hardhat_run::core::paths::ProjectPaths;
//! use std::path::Path;
//!
//! let paths = ProjectPaths::discover(Path::new("/path/to/project"));
//! let config = Config::load(Some(&paths)).unwrap();
//!
//! println!("hardhat binary: {}", config.hardhat());
//! println!("node hostname: {}", config.node_hostname());
//! ```

pub mod schema;

pub use schema::{ConfigFile, NodeConfig, ToolsConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::paths::ProjectPaths;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: project over global over
/// built-in default.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: ConfigFile,
    /// Project configuration (if a project file exists)
    pub project: Option<ConfigFile>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `paths` is provided, also loads the project config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or fail
    /// validation. Missing config files are not an error.
    pub fn load(paths: Option<&ProjectPaths>) -> Result<Config, ConfigError> {
        let global_path = Self::find_global();
        let project_path = paths.map(ProjectPaths::config_path);
        Self::from_files(global_path.as_deref(), project_path.as_deref())
    }

    /// Load configuration from explicit file paths.
    ///
    /// Paths that do not exist are skipped.
    pub fn from_files(global: Option<&Path>, project: Option<&Path>) -> Result<Config, ConfigError> {
        let global = match global.filter(|p| p.exists()) {
            Some(path) => Self::read_config(path)?,
            None => ConfigFile::default(),
        };
        let project = match project.filter(|p| p.exists()) {
            Some(path) => Some(Self::read_config(path)?),
            None => None,
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(Config { global, project })
    }

    /// Locate the global config file, if any.
    fn find_global() -> Option<PathBuf> {
        // 1. Check $HHRUN_CONFIG
        if let Ok(path) = std::env::var("HHRUN_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/hhrun/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("hhrun/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.hhrun/config.toml
        dirs::home_dir()
            .map(|home| home.join(".hhrun/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// First value found in project then global scope.
    fn pick<'a, T: ?Sized>(&'a self, get: impl Fn(&'a ConfigFile) -> Option<&'a T>) -> Option<&'a T> {
        self.project.as_ref().and_then(&get).or_else(|| get(&self.global))
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Hardhat binary. Defaults to "hardhat".
    pub fn hardhat(&self) -> &str {
        self.pick(|c| c.tools.as_ref().and_then(|t| t.hardhat.as_deref()))
            .unwrap_or("hardhat")
    }

    /// ts-node binary. Defaults to "ts-node".
    pub fn ts_node(&self) -> &str {
        self.pick(|c| c.tools.as_ref().and_then(|t| t.ts_node.as_deref()))
            .unwrap_or("ts-node")
    }

    /// mocha binary. Defaults to "mocha".
    pub fn mocha(&self) -> &str {
        self.pick(|c| c.tools.as_ref().and_then(|t| t.mocha.as_deref()))
            .unwrap_or("mocha")
    }

    /// Hostname for forked nodes. Defaults to "0.0.0.0".
    pub fn node_hostname(&self) -> &str {
        self.pick(|c| c.node.as_ref().and_then(|n| n.hostname.as_deref()))
            .unwrap_or("0.0.0.0")
    }

    /// Export file for `fork:dev`. Defaults to "contractsInfo.json".
    pub fn node_export_file(&self) -> &str {
        self.pick(|c| c.node.as_ref().and_then(|n| n.export_file.as_deref()))
            .unwrap_or("contractsInfo.json")
    }

    /// Environment file name. Defaults to ".env".
    pub fn env_file(&self) -> &str {
        self.pick(|c| c.env_file.as_deref()).unwrap_or(".env")
    }

    /// Configured script path prefix, if any.
    ///
    /// `None` means the project root's basename is used.
    pub fn project_dir_name(&self) -> Option<&str> {
        self.pick(|c| c.project_dir_name.as_deref())
    }

    /// Whether `node_modules/.bin` is put on the child's PATH.
    ///
    /// Defaults to `true`.
    pub fn node_bin(&self) -> bool {
        self.project
            .as_ref()
            .and_then(|p| p.node_bin)
            .or(self.global.node_bin)
            .unwrap_or(true)
    }
}
