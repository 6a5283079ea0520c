use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// Analyzer configuration read from a TOML file.
///
/// ```toml
/// [options]
/// "dotnet_diagnostic.CTH001.suppress_on_record_hierarchies" = true
///
/// [files."Legacy.cs"]
/// "dotnet_diagnostic.CTH001.suppress_on_record_hierarchies" = "false"
/// ```
///
/// `[files."<path>"]` entries take precedence over `[options]`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
    #[serde(default)]
    pub files: BTreeMap<String, BTreeMap<String, OptionValue>>,
}

/// A configuration value; booleans are kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
}

impl OptionValue {
    pub fn as_str(&self) -> &str {
        match self {
            OptionValue::Bool(true) => "true",
            OptionValue::Bool(false) => "false",
            OptionValue::Text(text) => text,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_file(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<AnalyzerConfig, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Value of `key` for the file at `path`.
    pub fn lookup(&self, path: &str, key: &str) -> Option<&str> {
        self.files
            .get(path)
            .and_then(|options| options.get(key))
            .or_else(|| self.options.get(key))
            .map(OptionValue::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "dotnet_diagnostic.CTH001.suppress_on_record_hierarchies";

    #[test]
    fn parse_global_and_file_options() {
        let toml = r#"
[options]
"dotnet_diagnostic.CTH001.suppress_on_record_hierarchies" = true
other = "value"

[files."Legacy.cs"]
"dotnet_diagnostic.CTH001.suppress_on_record_hierarchies" = "False"
"#;
        let config = AnalyzerConfig::from_str(toml).unwrap();
        assert_eq!(config.lookup("Shapes.cs", KEY), Some("true"));
        assert_eq!(config.lookup("Legacy.cs", KEY), Some("False"));
        assert_eq!(config.lookup("Legacy.cs", "other"), Some("value"));
        assert_eq!(config.lookup("Shapes.cs", "missing"), None);
    }

    #[test]
    fn empty_config_has_no_options() {
        let config = AnalyzerConfig::from_str("").unwrap();
        assert!(config.options.is_empty());
        assert!(config.files.is_empty());
        assert_eq!(config.lookup("Any.cs", KEY), None);
    }

    #[test]
    fn reject_malformed_config() {
        let err = AnalyzerConfig::from_str("[options\nkey = 1").unwrap_err();
        assert!(
            err.to_string().starts_with("failed to parse analyzer config"),
            "Error: {}",
            err
        );
    }

    #[test]
    fn reject_non_scalar_values() {
        let toml = r#"
[options]
key = [1, 2]
"#;
        assert!(AnalyzerConfig::from_str(toml).is_err());
    }
}
