//! Command-line interface for sqshell
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and merging with flags
//! - Subcommands (version, completion, config)
//! - The startup banner

pub mod completion;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::connection::StoreLocator;
use crate::error::Result;
use crate::repl::{EditingMode, KeywordCase};

/// sqshell - an interactive SQL shell for SQLite
#[derive(Parser, Debug)]
#[command(
    name = "sqshell",
    version,
    about = "An interactive SQL REPL for SQLite",
    long_about = "An interactive SQL shell for SQLite with keyword completion, history
suggestions, syntax highlighting and Emacs/Vi editing modes."
)]
pub struct CliArgs {
    /// Database file to open
    ///
    /// Omit it, or pass :memory:, for a transient in-memory database.
    #[arg(value_name = "DATABASE")]
    pub database: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Multi-line input: [Enter] inserts a newline, [Escape-Enter] runs
    #[arg(short = 'm', long)]
    pub multiline: bool,

    /// Case of completed keywords
    #[arg(long, value_enum, value_name = "CASE")]
    pub keyword_case: Option<KeywordCase>,

    /// Start in Vi editing mode
    #[arg(long)]
    pub vi: bool,

    /// History file path
    #[arg(long, value_name = "FILE")]
    pub history_file: Option<PathBuf>,

    /// Do not read or write the history file
    #[arg(long = "no-history")]
    pub no_history: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for sqshell
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Effective configuration (file merged with flags)
    config: Config,
}

impl CliInterface {
    /// Parse the process arguments and load configuration
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Build from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Effective configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;
        Self::apply_args_to_config(&mut config, args);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_editor_args(config, args);
        Self::apply_history_args(config, args);
        Self::apply_logging_args(config, args);

        if args.no_color {
            config.display.color_output = false;
        }
    }

    /// Apply editor-related CLI arguments to configuration
    fn apply_editor_args(config: &mut Config, args: &CliArgs) {
        if args.multiline {
            config.editor.multiline = true;
        }
        if let Some(case) = args.keyword_case {
            config.editor.keyword_case = case;
        }
        if args.vi {
            config.editor.edit_mode = EditingMode::Vi;
        }
    }

    /// Apply history-related CLI arguments to configuration
    fn apply_history_args(config: &mut Config, args: &CliArgs) {
        if let Some(path) = &args.history_file {
            config.history.file_path = path.clone();
        }
        if args.no_history {
            config.history.persist = false;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Store selected by the positional argument
    pub fn store_locator(&self) -> Result<StoreLocator> {
        StoreLocator::parse(self.args.database.as_deref())
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell, &mut std::io::stdout())?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("sqshell version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
        println!("SQLite version: {}", rusqlite::version());
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("❌ Configuration file does not exist");
            return;
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(()) => println!("✅ Configuration is valid"),
                Err(e) => println!("❌ Configuration validation failed: {}", e),
            },
            Err(e) => println!("❌ Failed to load configuration: {}", e),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        println!("Configuration file: {}", self.config_path().display());
        println!();
        println!("=== Effective Configuration ===");
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    pub fn config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }

    /// Banner printed before the first prompt
    pub fn banner(locator: &StoreLocator) -> String {
        let store = match locator {
            StoreLocator::Memory => "transient in-memory database".to_string(),
            StoreLocator::File(path) => format!("database file {}", path.display()),
        };
        format!("\nWelcome to sqshell, an SQL REPL!\nUsing {store}\n")
    }

    /// Print banner unless in quiet mode
    pub fn print_banner(&self, locator: &StoreLocator) {
        if !self.args.quiet {
            println!("{}", Self::banner(locator));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::LineMode;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(argv).unwrap()
    }

    fn interface(argv: &[&str]) -> CliInterface {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();

        let mut full = vec!["sqshell", "--config", config.to_str().unwrap()];
        full.extend_from_slice(&argv[1..]);
        CliInterface::from_args(parse(&full)).unwrap()
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = parse(&["sqshell"]);
        assert!(args.database.is_none());
        assert!(!args.multiline);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_with_database() {
        let args = parse(&["sqshell", "shop.db"]);
        assert_eq!(args.database.as_deref(), Some("shop.db"));
    }

    #[test]
    fn test_keyword_case_flag() {
        let args = parse(&["sqshell", "--keyword-case", "upper"]);
        assert_eq!(args.keyword_case, Some(KeywordCase::Upper));
        assert!(CliArgs::try_parse_from(["sqshell", "--keyword-case", "title"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = interface(&[
            "sqshell",
            "--multiline",
            "--vi",
            "--no-history",
            "--no-color",
            "-v",
        ]);
        let config = cli.config();
        assert_eq!(config.line_mode(), LineMode::Multi);
        assert_eq!(config.editor.edit_mode, EditingMode::Vi);
        assert!(!config.history.persist);
        assert!(!config.display.color_output);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_history_file_flag() {
        let cli = interface(&["sqshell", "--history-file", "/tmp/h"]);
        assert_eq!(cli.config().history.file_path, PathBuf::from("/tmp/h"));
    }

    #[test]
    fn test_store_locator() {
        assert_eq!(
            interface(&["sqshell"]).store_locator().unwrap(),
            StoreLocator::Memory
        );
        assert_eq!(
            interface(&["sqshell", ":memory:"]).store_locator().unwrap(),
            StoreLocator::Memory
        );
        assert_eq!(
            interface(&["sqshell", "a.db"]).store_locator().unwrap(),
            StoreLocator::File(PathBuf::from("a.db"))
        );
    }

    #[test]
    fn test_subcommands_parse() {
        let args = parse(&["sqshell", "completion", "zsh"]);
        assert!(matches!(args.command, Some(Commands::Completion { ref shell }) if shell == "zsh"));

        let args = parse(&["sqshell", "config", "--show"]);
        assert!(matches!(
            args.command,
            Some(Commands::Config {
                show: true,
                validate: false
            })
        ));
    }

    #[test]
    fn test_banner() {
        let banner = CliInterface::banner(&StoreLocator::Memory);
        assert!(banner.contains("Welcome to sqshell, an SQL REPL!"));
        assert!(banner.contains("in-memory"));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "[history]\nmax_size = 0\n").unwrap();

        let args = parse(&["sqshell", "--config", config.to_str().unwrap()]);
        assert!(CliInterface::from_args(args).is_err());
    }
}
