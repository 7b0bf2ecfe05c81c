use std::io::Write;

use nu_ansi_term::Color;
use tracing::{debug, warn};

use crate::error::Result;
use crate::executor::{ExecutionBridge, ExecutionResult, Executor};

use super::editor::LineEditor;
use super::session::{InputSession, InputSignal};

/// Printed once the loop ends normally
pub const GOODBYE: &str = "Goodbye!";

/// REPL engine tying input, execution and output together
pub struct ReplEngine<E: LineEditor, X: Executor> {
    /// Prompt loop
    session: InputSession<E>,

    /// Statement execution against the open store
    bridge: ExecutionBridge<X>,

    /// Whether error lines are colored
    use_color: bool,
}

impl<E: LineEditor, X: Executor> ReplEngine<E, X> {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `session` - Input session reading from the terminal
    /// * `bridge` - Execution bridge owning the connection
    /// * `use_color` - Color error lines
    pub fn new(session: InputSession<E>, bridge: ExecutionBridge<X>, use_color: bool) -> Self {
        Self {
            session,
            bridge,
            use_color,
        }
    }

    /// Run until end of input
    ///
    /// The connection is released whether the loop ends normally or on a
    /// terminal error. `Goodbye!` is printed only on a normal end.
    ///
    /// # Arguments
    /// * `out` - Sink for rows, error lines and the exit banner
    ///
    /// # Returns
    /// * `Result<()>` - Ok on end of input, error if the terminal failed
    pub fn run(&mut self, out: &mut impl Write) -> Result<()> {
        let outcome = self.run_loop(out);

        if let Err(e) = self.bridge.release() {
            warn!("Failed to release connection: {}", e);
        }

        outcome?;
        writeln!(out, "{GOODBYE}")?;
        out.flush()?;
        Ok(())
    }

    fn run_loop(&mut self, out: &mut impl Write) -> Result<()> {
        loop {
            match self.session.next()? {
                InputSignal::Stop => {
                    debug!("End of input");
                    return Ok(());
                }
                InputSignal::Continue => continue,
                InputSignal::Statement(text) => self.execute(&text, out)?,
            }
        }
    }

    /// Execute one statement and print its rows or error line
    fn execute(&mut self, text: &str, out: &mut impl Write) -> Result<()> {
        let mut write_error = None;
        let result = self.bridge.run(text, &mut |record| {
            if write_error.is_none()
                && let Err(e) = writeln!(out, "{}", record.render())
            {
                write_error = Some(e);
            }
        });

        if let Some(e) = write_error {
            return Err(e.into());
        }

        if let ExecutionResult::Error(description) = result {
            if self.use_color {
                writeln!(out, "{}", Color::Red.paint(description))?;
            } else {
                writeln!(out, "{description}")?;
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn session(&self) -> &InputSession<E> {
        &self.session
    }

    pub fn bridge(&self) -> &ExecutionBridge<X> {
        &self.bridge
    }
}
