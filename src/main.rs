//! sqshell - an SQL REPL
//!
//! An interactive shell for issuing ad-hoc SQL against an SQLite database
//! and viewing results row by row.
//!
//! # Features
//!
//! - Keyword completion while typing and on demand ([C-Space] / [Tab])
//! - Append-only history with inline suggestions
//! - Emacs and Vi editing modes, toggled with [F4]
//! - Single or multi-line input
//! - Syntax highlighting
//!
//! # Usage
//!
//! ```bash
//! # Transient in-memory database
//! sqshell
//!
//! # Database file, multi-line input
//! sqshell --multiline shop.db
//! ```

use std::sync::Arc;

use sqshell::cli::CliInterface;
use sqshell::config::Config;
use sqshell::connection::ConnectionManager;
use sqshell::error::Result;
use sqshell::executor::{ExecutionBridge, SqliteExecutor};
use sqshell::repl::{
    EditorSettings, HistoryStore, InputSession, KeywordCatalog, ModeState, ReedlineEditor,
    ReplEngine,
};
use tracing::{Level, debug, warn};

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start the interactive session
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(cli.config());

    if cli.handle_subcommand()? {
        return Ok(());
    }

    run_interactive_mode(&cli)
}

/// Run application in interactive REPL mode
fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let locator = cli.store_locator()?;
    let manager = ConnectionManager::open(locator.clone())?;

    cli.print_banner(&locator);

    let mut repl = create_repl_engine(cli.config(), manager)?;
    let mut stdout = std::io::stdout();
    repl.run(&mut stdout)
}

/// Open the history store named by the configuration
///
/// An unreadable history file does not stop the session; it starts with an
/// empty history instead.
fn open_history(config: &Config) -> HistoryStore {
    if !config.history.persist {
        debug!("History persistence disabled");
        return HistoryStore::in_memory();
    }

    match HistoryStore::open(&config.history.file_path) {
        Ok(store) => store,
        Err(e) => {
            warn!("{}", e);
            eprintln!("Warning: {e}");
            HistoryStore::in_memory()
        }
    }
}

/// Create REPL engine with configuration
fn create_repl_engine(
    config: &Config,
    manager: ConnectionManager,
) -> Result<ReplEngine<ReedlineEditor, SqliteExecutor>> {
    let modes = ModeState::new(config.editor.edit_mode, config.line_mode());
    let catalog = Arc::new(KeywordCatalog::build(config.editor.keyword_case));
    let history = open_history(config);
    let use_color = config.display.color_output;

    let settings = EditorSettings {
        syntax_highlighting: config.editor.syntax_highlighting,
        history_hints: config.editor.history_hints,
        use_color,
    };
    let navigation = history.navigation_history(config.history.max_size)?;
    let editor = ReedlineEditor::new(&modes, settings, catalog, navigation);

    let session = InputSession::new(editor, modes, history, use_color);
    let bridge = ExecutionBridge::new(SqliteExecutor::new(manager));
    Ok(ReplEngine::new(session, bridge, use_color))
}

/// Initialize logging system based on configuration
///
/// Logs go to stderr so they never mix with result rows.
fn initialize_logging(config: &Config) {
    let level: Level = config.logging.level.to_tracing_level();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
