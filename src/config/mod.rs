//! Configuration management for sqshell
//!
//! This module handles loading, parsing, and managing configuration from various sources:
//! - Configuration files (TOML format)
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::repl::{EditingMode, KeywordCase, LineMode};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Line editor configuration
    #[serde(default)]
    pub editor: EditorConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Line editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Editing mode active when the session starts
    #[serde(default = "default_edit_mode")]
    pub edit_mode: EditingMode,

    /// Whether Enter inserts a newline (submit with Escape-Enter)
    #[serde(default)]
    pub multiline: bool,

    /// Case of the keywords offered by completion
    #[serde(default = "default_keyword_case")]
    pub keyword_case: KeywordCase,

    /// Enable syntax highlighting of the input buffer
    #[serde(default = "default_syntax_highlighting")]
    pub syntax_highlighting: bool,

    /// Show inline suggestions from history
    #[serde(default = "default_history_hints")]
    pub history_hints: bool,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Entries the session may add on top of the stored log before the oldest
    /// drop out of up/down navigation
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file, relative paths resolve against the working directory
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default)]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_edit_mode() -> EditingMode {
    EditingMode::Emacs
}

fn default_keyword_case() -> KeywordCase {
    KeywordCase::Lower
}

fn default_syntax_highlighting() -> bool {
    true
}

fn default_history_hints() -> bool {
    true
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    PathBuf::from(".sqshell_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_color_output() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            edit_mode: default_edit_mode(),
            multiline: false,
            keyword_case: default_keyword_case(),
            syntax_highlighting: default_syntax_highlighting(),
            history_hints: default_history_hints(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: default_color_output(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: false,
        }
    }
}

impl Config {
    /// Load configuration from a file, falling back to defaults
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file simply yields the default configuration.
    ///
    /// # Arguments
    /// * `path` - Explicit configuration file, or `None` for the default location
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_config_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Render configuration as TOML text
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - `~/.sqshell/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sqshell")
            .join("config.toml")
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.history.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if self.history.persist && self.history.file_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "history.file_path".to_string(),
                value: String::new(),
            }
            .into());
        }

        Ok(())
    }

    /// Line mode selected for the session
    pub fn line_mode(&self) -> LineMode {
        if self.editor.multiline {
            LineMode::Multi
        } else {
            LineMode::Single
        }
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor.edit_mode, EditingMode::Emacs);
        assert_eq!(config.editor.keyword_case, KeywordCase::Lower);
        assert_eq!(config.line_mode(), LineMode::Single);
        assert_eq!(config.history.file_path, PathBuf::from(".sqshell_history"));
        assert!(config.history.persist);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [editor]
            multiline = true
            keyword_case = "upper"
            edit_mode = "vi"
            "#,
        )
        .unwrap();

        assert_eq!(config.line_mode(), LineMode::Multi);
        assert_eq!(config.editor.keyword_case, KeywordCase::Upper);
        assert_eq!(config.editor.edit_mode, EditingMode::Vi);
        assert!(config.editor.syntax_highlighting);
        assert_eq!(config.history.max_size, 1000);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result = Config::from_toml("[editor]\nedit_mode = \"nano\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_history() {
        let mut config = Config::default();
        config.history.max_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_editor_settings() {
        let mut config = Config::default();
        config.editor.multiline = true;
        let text = config.to_toml().unwrap();
        assert!(text.contains("multiline = true"));
        let parsed = Config::from_toml(&text).unwrap();
        assert_eq!(parsed.line_mode(), LineMode::Multi);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Config::load_from_file(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[history]\npersist = false\n").unwrap();

        let config = Config::load_from_file(Some(&path)).unwrap();
        assert!(!config.history.persist);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
    }
}
