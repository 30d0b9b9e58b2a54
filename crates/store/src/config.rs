//! Store configuration

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

const fn default_busy_timeout_ms() -> u64 {
    5_000
}

/// Where the store keeps its data
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreLocation {
    /// Transient in-memory database; data is lost on drop
    #[default]
    Memory,
    /// Database file on disk; parent directories are created on open
    File(PathBuf),
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreLocation::Memory => write!(f, ":memory:"),
            StoreLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// SQLite journal mode
///
/// Values map 1:1 to SQLite `journal_mode` pragma settings. WAL is the
/// default; SQLite falls back to a memory journal for in-memory stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    /// Write-ahead logging (recommended)
    #[default]
    Wal,
    /// Rollback journal (legacy)
    Delete,
}

impl JournalMode {
    /// The SQLite pragma value
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// Configuration for opening a [`crate::SqliteStore`]
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Data location
    pub location: StoreLocation,
    /// Journal mode pragma
    pub journal_mode: JournalMode,
    /// How long a statement waits on a locked database before failing (ms)
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: StoreLocation::default(),
            journal_mode: JournalMode::default(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl StoreConfig {
    /// Config for a database file at `path`
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::File(path.into()),
            ..Self::default()
        }
    }
}
