//! Galaxy AI side panel log
//!
//! Append-only: entries are never edited, removed or deduplicated.

use chrono::{DateTime, Local};

/// Who produced a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSender {
    System,
    User,
    Ai,
}

impl LogSender {
    fn badge(self) -> &'static str {
        match self {
            LogSender::System => "sys",
            LogSender::User => "you",
            LogSender::Ai => "✨ ai",
        }
    }
}

/// One line in the side panel
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: u64,
    pub sender: LogSender,
    pub text: String,
    pub at: DateTime<Local>,
}

impl LogEntry {
    /// Panel rendering, one string per text line
    pub fn render(&self) -> Vec<String> {
        let stamp = self.at.format("%H:%M:%S");
        let mut lines = self.text.lines();
        let mut out = vec![format!(
            "[{}] {:>5} │ {}",
            stamp,
            self.sender.badge(),
            lines.next().unwrap_or_default()
        )];
        out.extend(lines.map(|line| format!("{:>18} │ {}", "", line)));
        out
    }
}

/// Ordered log of everything said in the side panel
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its id
    pub fn push(&mut self, sender: LogSender, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        let text = text.into();
        tracing::debug!(id, ?sender, %text, "log entry");
        self.entries.push(LogEntry {
            id,
            sender,
            text,
            at: Local::now(),
        });
        id
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Entries appended after the first `n`
    pub fn since(&self, n: usize) -> &[LogEntry] {
        &self.entries[n.min(self.entries.len())..]
    }
}
