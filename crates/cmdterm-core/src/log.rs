//! The console's output log.

/// What produced a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The user's own command, prefixed.
    Echo,
    /// The server's `output`.
    Reply,
    /// A failed exchange.
    Error,
}

impl EntryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Echo => "echo",
            Self::Reply => "reply",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Position in the log, starting at 0.
    pub seq: usize,
    /// Exchange ticket the entry belongs to.
    pub ticket: u64,
    pub kind: EntryKind,
    /// Plain text, before any markup rendering.
    pub text: String,
}

/// Append-only sequence of log entries. Lives as long as the page.
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    entries: Vec<LogEntry>,
}

impl OutputLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry and return it.
    pub fn push(&mut self, ticket: u64, kind: EntryKind, text: impl Into<String>) -> &LogEntry {
        let seq = self.entries.len();
        self.entries.push(LogEntry {
            seq,
            ticket,
            kind,
            text: text.into(),
        });
        &self.entries[seq]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }
}
