//! Terminal rendition of the status log and confirmation dialogs.

use crate::{
    input::{SharedInput, next_line},
    user_action::is_yes,
};

use std::io::Write;

use async_trait::async_trait;
use pnoi_core::{Confirm, StatusDisplay};
use tracing::debug;

const CLEAR_MARKER: &str = "----------------------------------------";

/// [`StatusDisplay`] that prints each line to a writer.
///
/// Clearing prints a separator rather than wiping the terminal, so earlier
/// output stays in scrollback.
pub struct ConsoleDisplay<W> {
    out: W,
}

impl ConsoleDisplay<std::io::Stdout> {
    /// Display writing to stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleDisplay<W> {
    /// Display writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write + Send> StatusDisplay for ConsoleDisplay<W> {
    fn display(&mut self, message: &str) {
        debug!(message, "Status");
        let _ = writeln!(self.out, "{}", message);
        let _ = self.out.flush();
    }

    fn clear(&mut self) {
        let _ = writeln!(self.out, "{}", CLEAR_MARKER);
    }

    fn alert(&mut self, message: &str) {
        let _ = writeln!(self.out, "!! ALERT: {}", message);
        let _ = self.out.flush();
    }
}

/// [`Confirm`] that prints the prompt and reads the answer from user input.
///
/// End of input counts as no.
pub struct ConsoleConfirm<W> {
    input: SharedInput,
    out: W,
}

impl ConsoleConfirm<std::io::Stdout> {
    /// Prompt on stdout.
    pub fn stdout(input: SharedInput) -> Self {
        Self::new(input, std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleConfirm<W> {
    /// Prompt on `out`, answers from `input`.
    pub fn new(input: SharedInput, out: W) -> Self {
        Self { input, out }
    }
}

#[async_trait]
impl<W: Write + Send> Confirm for ConsoleConfirm<W> {
    async fn confirm(&mut self, prompt: &str) -> bool {
        let _ = write!(self.out, "{} [y/N] ", prompt);
        let _ = self.out.flush();

        let answer = next_line(&self.input).await;
        let confirmed = answer.as_deref().is_some_and(is_yes);

        debug!(prompt, confirmed, "Confirmation answered");

        confirmed
    }
}
