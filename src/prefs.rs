//! Language pair preferences.
//! Two persisted strings (source and target code), JSON file on disk, read
//! once at startup and rewritten on every change. Tests and embedders that
//! handle persistence themselves can run the store purely in memory.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// The persisted preference pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub from: String,
    pub to: String,
}

impl LanguagePair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug)]
pub enum PrefsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for PrefsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefsError::Io(e) => write!(f, "prefs IO error: {e}"),
            PrefsError::Parse(e) => write!(f, "prefs parse error: {e}"),
        }
    }
}

impl std::error::Error for PrefsError {}

impl From<std::io::Error> for PrefsError {
    fn from(e: std::io::Error) -> Self {
        PrefsError::Io(e)
    }
}

impl From<serde_json::Error> for PrefsError {
    fn from(e: serde_json::Error) -> Self {
        PrefsError::Parse(e)
    }
}

/// Get/set store for the preferred language pair.
pub struct PrefsStore {
    path: Option<PathBuf>,
    current: Mutex<LanguagePair>,
}

impl PrefsStore {
    /// In-memory store, nothing written to disk.
    pub fn new(pair: LanguagePair) -> Self {
        Self {
            path: None,
            current: Mutex::new(pair),
        }
    }

    /// Load from a JSON file, falling back to `defaults` when the file is
    /// missing or unreadable. Subsequent `set` calls rewrite the file.
    pub fn load(path: impl Into<PathBuf>, defaults: LanguagePair) -> Self {
        let path = path.into();
        let current = match read_pair(&path) {
            Ok(pair) => {
                info!(path = %path.display(), from = %pair.from, to = %pair.to, "prefs_loaded");
                pair
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "prefs_load_failed_using_defaults");
                defaults
            }
        };
        Self {
            path: Some(path),
            current: Mutex::new(current),
        }
    }

    /// Current language pair.
    pub fn get(&self) -> LanguagePair {
        self.current.lock().clone()
    }

    /// Update the pair and persist it if the store is file-backed.
    pub fn set(&self, from: &str, to: &str) -> Result<(), PrefsError> {
        let pair = LanguagePair::new(from, to);
        *self.current.lock() = pair.clone();
        if let Some(path) = &self.path {
            write_pair(path, &pair)?;
            info!(from, to, "prefs_saved");
        }
        Ok(())
    }
}

fn read_pair(path: &Path) -> Result<LanguagePair, PrefsError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_pair(path: &Path, pair: &LanguagePair) -> Result<(), PrefsError> {
    let content = serde_json::to_string_pretty(pair)?;
    std::fs::write(path, content)?;
    Ok(())
}
