use std::collections::VecDeque;

use anyhow::Error;
use tracing::warn;

use crate::storage::HistoryStorage;

/// Sink for best-effort persistence failures. The store never surfaces
/// storage errors to its caller; they end up here instead.
pub trait Diagnostics {
    fn storage_error(&self, operation: &str, err: &Error);
}

/// Default sink: log through `tracing` and move on.
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn storage_error(&self, operation: &str, err: &Error) {
        warn!("command history {operation} failed: {err:#}");
    }
}

/// Bounded log of previously submitted commands with readline-style
/// up/down browsing.
///
/// Entries are kept newest-first. While browsing, `cursor` holds the
/// 1-based depth from the newest entry (`Some(0)` means navigation has
/// begun but nothing has been viewed yet); `None` means not browsing.
/// `snapshot` preserves whatever the user had typed before the first
/// navigation step so it can be restored when they come back down.
pub struct CommandHistory {
    entries: VecDeque<String>,
    max_size: usize,
    cursor: Option<usize>,
    snapshot: String,
    storage: Box<dyn HistoryStorage>,
    diagnostics: Box<dyn Diagnostics>,
}

impl CommandHistory {
    pub fn new(max_size: usize, storage: Box<dyn HistoryStorage>) -> Self {
        Self::with_diagnostics(max_size, storage, Box::new(TracingDiagnostics))
    }

    pub fn with_diagnostics(
        max_size: usize,
        storage: Box<dyn HistoryStorage>,
        diagnostics: Box<dyn Diagnostics>,
    ) -> Self {
        let mut history = Self {
            entries: VecDeque::new(),
            max_size: max_size.max(1),
            cursor: None,
            snapshot: String::new(),
            storage,
            diagnostics,
        };
        history.load();
        history
    }

    /// Records a submitted command. Blank input and a repeat of the
    /// newest entry are ignored; an accepted entry evicts the oldest
    /// one past `max_size`, is persisted, and ends any browsing session.
    pub fn push(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.entries.front().is_some_and(|newest| newest == text) {
            return;
        }
        self.entries.push_front(text.to_string());
        self.entries.truncate(self.max_size);
        self.save();
        self.reset_nav();
    }

    /// Call before handling the first Up press, passing the text
    /// currently in the input so it can be restored later.
    pub fn begin_navigation(&mut self, current_input: &str) {
        if self.cursor.is_none() {
            self.snapshot = current_input.to_string();
            self.cursor = Some(0);
        }
    }

    /// Steps one entry older. Returns `None` when there is no history
    /// at all; past the oldest entry it keeps returning the oldest.
    pub fn up(&mut self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let depth = match self.cursor {
            Some(d) => (d + 1).min(self.entries.len()),
            None => {
                // Up without begin_navigation: browse with an empty snapshot.
                self.snapshot.clear();
                1
            }
        };
        self.cursor = Some(depth);
        let text = self
            .entries
            .get(depth - 1)
            .cloned()
            .unwrap_or_else(|| self.snapshot.clone());
        Some(text)
    }

    /// Steps one entry newer. Moving past the newest entry ends the
    /// browsing session and hands back the snapshot text.
    pub fn down(&mut self) -> Option<String> {
        if self.entries.is_empty() {
            return Some(self.snapshot.clone());
        }
        match self.cursor {
            Some(depth) if depth > 1 => {
                let depth = depth - 1;
                self.cursor = Some(depth);
                let text = self
                    .entries
                    .get(depth - 1)
                    .cloned()
                    .unwrap_or_else(|| self.snapshot.clone());
                Some(text)
            }
            _ => {
                let snapshot = self.snapshot.clone();
                self.reset_nav();
                Some(snapshot)
            }
        }
    }

    /// Abandons the current browsing session, e.g. on focus loss.
    pub fn reset_nav(&mut self) {
        self.cursor = None;
        self.snapshot.clear();
    }

    /// Writes the full log, oldest-first, to the backend. Failures are
    /// reported to diagnostics and otherwise ignored.
    pub fn save(&mut self) {
        let oldest_first: Vec<String> = self.entries.iter().rev().cloned().collect();
        if let Err(err) = self.storage.write_all(&oldest_first) {
            self.diagnostics.storage_error("save", &err);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_navigating(&self) -> bool {
        self.cursor.is_some()
    }

    // File order is oldest-first; pushing each line to the front leaves
    // memory newest-first. Unreadable backends count as empty history.
    fn load(&mut self) {
        let lines = match self.storage.read_all() {
            Ok(lines) => lines,
            Err(err) => {
                self.diagnostics.storage_error("load", &err);
                return;
            }
        };
        for line in &lines {
            let line = line.trim();
            if !line.is_empty() {
                self.entries.push_front(line.to_string());
            }
        }
        self.entries.truncate(self.max_size);
    }
}
