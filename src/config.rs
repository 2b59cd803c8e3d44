//! Configuration file support
//!
//! Loads settings from ~/.cleanindent.toml (or %USERPROFILE%\.cleanindent.toml
//! on Windows)
//!
//! Example:
//! ```text
//! # cleanindent configuration
//! enabled = true
//! simple-indent = false
//! tab-width = 8
//! indent-tabs = false
//! indent-offset = 4
//! indent-increase = '[{(\[]\s*$'
//! indent-decrease = '^\s*[})\]]'
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use toml::Table;

use crate::error::{EditorError, Result};
use crate::indent_rules::IndentRules;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether clean indent mode starts enabled
    pub enabled: bool,
    /// Copy the previous line's indentation instead of using indent rules
    pub simple_indent: bool,
    /// Tab width for columns and display
    pub tab_width: usize,
    /// Indent with tabs where possible
    pub indent_tabs: bool,
    /// Columns per indent level for the indent rules
    pub indent_offset: usize,
    /// Pattern on the previous line that opens a block
    pub indent_increase: Option<String>,
    /// Pattern on the new line that closes a block
    pub indent_decrease: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            simple_indent: false,
            tab_width: 8,
            indent_tabs: false,
            indent_offset: 4,
            indent_increase: None,
            indent_decrease: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".cleanindent.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".cleanindent.toml"))
        }
    }

    /// Load configuration from the default location. A missing file gives
    /// the defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table)?;
        Ok(config)
    }

    /// Apply settings from a parsed table. Unknown keys are ignored.
    fn apply(&mut self, table: &Table) -> Result<()> {
        if let Some(value) = get_bool(table, "enabled")? {
            self.enabled = value;
        }

        if let Some(value) = get_bool(table, "simple-indent")? {
            self.simple_indent = value;
        }

        if let Some(value) = get_bool(table, "indent-tabs")? {
            self.indent_tabs = value;
        }

        if let Some(n) = get_int(table, "tab-width")? {
            self.tab_width = n.clamp(1, 16) as usize; // Between 1 and 16
        }

        if let Some(n) = get_int(table, "indent-offset")? {
            self.indent_offset = n.clamp(1, 16) as usize;
        }

        if let Some(value) = get_str(table, "indent-increase")? {
            self.indent_increase = Some(value);
        }

        if let Some(value) = get_str(table, "indent-decrease")? {
            self.indent_decrease = Some(value);
        }

        Ok(())
    }

    /// Indent rules for the host's newline-and-indent, if any pattern is set
    pub fn indent_rules(&self) -> Result<Option<IndentRules>> {
        if self.indent_increase.is_none() && self.indent_decrease.is_none() {
            return Ok(None);
        }
        IndentRules::new(
            self.indent_offset,
            self.indent_increase.as_deref(),
            self.indent_decrease.as_deref(),
        )
        .map(Some)
    }
}

fn type_error(key: &str, expected: &str) -> EditorError {
    EditorError::Config(format!("'{}' must be {}", key, expected))
}

fn get_bool(table: &Table, key: &str) -> Result<Option<bool>> {
    table
        .get(key)
        .map(|v| v.as_bool().ok_or_else(|| type_error(key, "a boolean")))
        .transpose()
}

fn get_int(table: &Table, key: &str) -> Result<Option<i64>> {
    table
        .get(key)
        .map(|v| v.as_integer().ok_or_else(|| type_error(key, "an integer")))
        .transpose()
}

fn get_str(table: &Table, key: &str) -> Result<Option<String>> {
    table
        .get(key)
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| type_error(key, "a string"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
enabled = false
simple-indent = true
tab-width = 4
indent-tabs = true
indent-offset = 2
indent-increase = ':\s*$'
        "#;

        let config = Config::parse(contents).unwrap();
        assert!(!config.enabled);
        assert!(config.simple_indent);
        assert_eq!(config.tab_width, 4);
        assert!(config.indent_tabs);
        assert_eq!(config.indent_offset, 2);
        assert_eq!(config.indent_increase.as_deref(), Some(r":\s*$"));
        assert_eq!(config.indent_decrease, None);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_values_are_clamped() {
        let config = Config::parse("tab-width = 0\nindent-offset = 99").unwrap();
        assert_eq!(config.tab_width, 1);
        assert_eq!(config.indent_offset, 16);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = Config::parse("line-numbers = true").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let err = Config::parse("tab-width = \"wide\"").unwrap_err();
        assert!(matches!(err, EditorError::Config(_)));
        assert!(err.to_string().contains("tab-width"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(matches!(
            Config::parse("enabled = = true"),
            Err(EditorError::Config(_))
        ));
    }

    #[test]
    fn test_indent_rules_only_when_patterns_set() {
        assert!(Config::default().indent_rules().unwrap().is_none());

        let config = Config::parse("indent-increase = '\\{\\s*$'").unwrap();
        let rules = config.indent_rules().unwrap().unwrap();
        assert_eq!(rules.indent_for(0, "if x {", ""), 4);

        let config = Config::parse("indent-decrease = '(('").unwrap();
        assert!(matches!(
            config.indent_rules(),
            Err(EditorError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("cleanindent-does-not-exist.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
