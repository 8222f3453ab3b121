//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same file shape is used for both scopes. Every field is optional so
//! a project file can override a single key of the global file.
//!
//! # Validation
//!
//! Config values are validated after parsing: tool names, file names and
//! the node hostname must be non-empty and free of surrounding whitespace.

use serde::Deserialize;

use super::ConfigError;

/// One configuration file (global or project scope).
///
/// # Example
///
/// ```toml
/// project_dir_name = "contracts"
/// env_file = ".env"
/// node_bin = true
///
/// [tools]
/// hardhat = "hardhat"
/// ts_node = "ts-node"
/// mocha = "mocha"
///
/// [node]
/// hostname = "0.0.0.0"
/// export_file = "contractsInfo.json"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Prefix stripped from script paths (default: project root basename)
    pub project_dir_name: Option<String>,

    /// Environment file name, relative to the project root
    pub env_file: Option<String>,

    /// Prepend `node_modules/.bin` to the child's PATH
    pub node_bin: Option<bool>,

    /// Tool binaries
    pub tools: Option<ToolsConfig>,

    /// Local node settings for `fork:node` and `fork:dev`
    pub node: Option<NodeConfig>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_word("project_dir_name", self.project_dir_name.as_deref())?;
        check_word("env_file", self.env_file.as_deref())?;

        if let Some(tools) = &self.tools {
            tools.validate()?;
        }
        if let Some(node) = &self.node {
            node.validate()?;
        }

        Ok(())
    }
}

/// Tool binary overrides.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub hardhat: Option<String>,
    pub ts_node: Option<String>,
    pub mocha: Option<String>,
}

impl ToolsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_word("tools.hardhat", self.hardhat.as_deref())?;
        check_word("tools.ts_node", self.ts_node.as_deref())?;
        check_word("tools.mocha", self.mocha.as_deref())
    }
}

/// Local node settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    /// Address the forked node listens on
    pub hostname: Option<String>,

    /// File `fork:dev` exports deployment info to
    pub export_file: Option<String>,
}

impl NodeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_word("node.hostname", self.hostname.as_deref())?;
        check_word("node.export_file", self.export_file.as_deref())
    }
}

fn check_word(key: &str, value: Option<&str>) -> Result<(), ConfigError> {
    match value {
        Some(v) if v.is_empty() => Err(ConfigError::InvalidValue(format!(
            "'{}' must not be empty",
            key
        ))),
        Some(v) if v.trim() != v => Err(ConfigError::InvalidValue(format!(
            "'{}' must not have leading or trailing whitespace",
            key
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_valid() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(config, ConfigFile::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn full_file_parses() {
        let config: ConfigFile = toml::from_str(
            r#"
            project_dir_name = "contracts"
            env_file = ".env.local"
            node_bin = false

            [tools]
            hardhat = "npx-hardhat"

            [node]
            hostname = "127.0.0.1"
            "#,
        )
        .unwrap();

        assert_eq!(config.project_dir_name.as_deref(), Some("contracts"));
        assert_eq!(config.node_bin, Some(false));
        assert_eq!(
            config.tools.as_ref().and_then(|t| t.hardhat.as_deref()),
            Some("npx-hardhat")
        );
        assert!(config.tools.as_ref().unwrap().mocha.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_tool_rejected() {
        let config: ConfigFile = toml::from_str("[tools]\nmocha = \"\"").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tools.mocha"));
    }

    #[test]
    fn padded_hostname_rejected() {
        let config: ConfigFile = toml::from_str("[node]\nhostname = \" localhost\"").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_nested_field_rejected() {
        let result: Result<ConfigFile, _> = toml::from_str("[tools]\nyarn = \"yarn\"");
        assert!(result.is_err());
    }
}
