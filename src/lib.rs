//! Readline-style command history for a text command box: a bounded,
//! de-duplicated, file-persisted log with up/down browsing that
//! snapshots in-progress input and restores it when browsing ends.

pub mod config;
pub mod history;
pub mod keys;
pub mod storage;

pub use config::{Config, KeyConfig};
pub use history::{CommandHistory, Diagnostics, TracingDiagnostics};
pub use keys::{Action, KeyHandler, apply};
pub use storage::{FileHistoryStorage, HistoryStorage};
