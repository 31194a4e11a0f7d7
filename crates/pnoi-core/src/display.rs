//! Status display and user confirmation seams.
//!
//! Controllers report every outcome through a [`StatusDisplay`] and ask
//! yes/no questions through a [`Confirm`]. Front ends supply their own
//! implementations; [`StatusLog`] is an in-memory log usable anywhere.

use async_trait::async_trait;

/// Append-only status log shown to the user.
pub trait StatusDisplay: Send {
    /// Append one line to the log.
    fn display(&mut self, message: &str);

    /// Remove every line from the log.
    fn clear(&mut self);

    /// Raise a blocking alert. Front ends without dialogs may leave the
    /// default, which does nothing beyond the log line already written.
    fn alert(&mut self, _message: &str) {}
}

/// Yes/no question asked before a destructive or interrupting action.
#[async_trait]
pub trait Confirm: Send {
    /// Ask `prompt` and resolve to `true` only on an explicit yes.
    async fn confirm(&mut self, prompt: &str) -> bool;
}

/// In-memory [`StatusDisplay`] that keeps lines and alerts.
#[derive(Debug, Default, Clone)]
pub struct StatusLog {
    lines: Vec<String>,
    alerts: Vec<String>,
}

impl StatusLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines currently in the log, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every alert raised so far, oldest first. Clearing the log keeps them.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl StatusDisplay for StatusLog {
    fn display(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn clear(&mut self) {
        self.lines.clear();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
