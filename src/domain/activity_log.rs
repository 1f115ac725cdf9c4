use std::collections::VecDeque;
use std::fmt;

// Most recent entries kept on screen.
pub const ACTIVITY_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.message)
    }
}

/// Bounded, newest-first list of human readable events.
///
/// Appending past [`ACTIVITY_LOG_CAPACITY`] drops the oldest entry.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timestamp: impl Into<String>, message: impl Into<String>) {
        self.entries.push_front(LogEntry {
            timestamp: timestamp.into(),
            message: message.into(),
        });
        self.entries.truncate(ACTIVITY_LOG_CAPACITY);
    }

    // Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|entry| entry.message.contains(needle))
    }
}
