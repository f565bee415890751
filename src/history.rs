//! On-disk conversation history.
//!
//! A bounded JSON log of prior user/assistant turns so follow-up requests
//! ("make it recursive") can refer to earlier ones. The file is the only
//! shared mutable state in the program; there is no locking, so overlapping
//! invocations race on it and the last writer wins.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keep the last 10 turns (5 exchanges).
pub const MAX_HISTORY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Store over a single JSON file, constructed once per process and passed
/// to whoever needs it.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the persisted log. A missing, unreadable, or unparseable file
    /// is treated as no history.
    pub fn load(&self) -> Vec<Turn> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(turns) => turns,
            Err(e) => {
                debug!("ignoring corrupt history at {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Persist the log, keeping only the most recent `MAX_HISTORY` turns.
    /// Truncation drops the oldest turns first.
    pub fn save(&self, turns: &[Turn]) -> Result<()> {
        let start = turns.len().saturating_sub(MAX_HISTORY);
        let tail = &turns[start..];
        let data = serde_json::to_vec_pretty(tail).context("Failed to serialize history")?;
        write_atomic(&self.path, &data)?;
        debug!(turns = tail.len(), "saved history to {}", self.path.display());
        Ok(())
    }

    /// Delete the persisted log. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history.json"))
    }

    fn exchange(i: usize) -> [Turn; 2] {
        [
            Turn::user(format!("request {}", i)),
            Turn::assistant(format!("command {}", i)),
        ]
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let turns: Vec<Turn> = exchange(0).into_iter().collect();
        store.save(&turns).unwrap();
        assert_eq!(store.load(), turns);
    }

    #[test]
    fn test_save_keeps_only_most_recent_turns() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let turns: Vec<Turn> = (0..8).flat_map(exchange).collect();
        assert_eq!(turns.len(), 16);
        store.save(&turns).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), MAX_HISTORY);
        // Exactly the tail, order preserved
        assert_eq!(loaded.as_slice(), &turns[6..]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(dir.path().join("history.json"), "{not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear_then_load_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&exchange(0)).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear_without_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).clear().unwrap();
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        let json = serde_json::to_string(&Turn::user("ls")).unwrap();
        assert!(json.contains(r#""role":"user""#));
        let json = serde_json::to_string(&Turn::assistant("ls")).unwrap();
        assert!(json.contains(r#""role":"assistant""#));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("nested").join("history.json"));
        store.save(&exchange(0)).unwrap();
        assert_eq!(store.load().len(), 2);
    }
}
