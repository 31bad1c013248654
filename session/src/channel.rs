//! Storage channels.
//!
//! A [`StorageChannel`] is a synchronous string key/value store. The session
//! is persisted redundantly through two channels (a cookie-role channel and
//! a local-store-role channel) so that clearing either one independently
//! does not lose the session; [`SessionStore`](crate::store::SessionStore)
//! owns the pairing and the read-preference order.

use crate::error::{Result, SessionError};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Synchronous string key/value storage.
///
/// Reads must never fail hard: a channel that cannot produce a value
/// reports `None` and the session degrades to "logged out". Only writes
/// surface errors.
pub trait StorageChannel: Send + Sync {
    /// Short channel name used in logs and error values.
    fn name(&self) -> &'static str;

    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ChannelWrite`] when the backing store rejects
    /// the write.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Idempotent; failures are
    /// absorbed and logged.
    fn remove(&self, key: &str);
}

/// File-backed channel: a single JSON object persisted at a fixed path.
///
/// Each operation re-reads the file, so external edits (another process
/// clearing the file, a user deleting it) are picked up on the next access.
/// An unreadable or unparsable file is treated as empty.
#[derive(Debug, Clone)]
pub struct FileChannel {
    name: &'static str,
    path: PathBuf,
}

impl FileChannel {
    /// Create a channel persisting to `path`.
    #[must_use]
    pub const fn new(name: &'static str, path: PathBuf) -> Self {
        Self { name, path }
    }

    fn load(&self) -> Map<String, Value> {
        let Ok(text) = std::fs::read_to_string(&self.path) else {
            return Map::new();
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            _ => {
                tracing::debug!(
                    channel = self.name,
                    path = %self.path.display(),
                    "channel file is not a JSON object; treating as empty"
                );
                Map::new()
            }
        }
    }

    fn persist(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::ChannelWrite {
                channel: self.name,
                reason: e.to_string(),
            })?;
        }

        let text = serde_json::to_string(map).map_err(|e| SessionError::ChannelWrite {
            channel: self.name,
            reason: e.to_string(),
        })?;

        std::fs::write(&self.path, text).map_err(|e| SessionError::ChannelWrite {
            channel: self.name,
            reason: e.to_string(),
        })
    }
}

impl StorageChannel for FileChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.load()
            .get(key)
            .and_then(Value::as_str)
            .map(ToString::to_string)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load();
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.persist(&map)
    }

    fn remove(&self, key: &str) {
        let mut map = self.load();
        if map.remove(key).is_none() {
            return;
        }
        if let Err(error) = self.persist(&map) {
            tracing::warn!(
                channel = self.name,
                error = %error,
                "failed to persist channel after remove"
            );
        }
    }
}

/// In-memory channel.
///
/// Used by embedding hosts that manage their own persistence, and by tests.
/// Clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct MemoryChannel {
    name: &'static str,
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryChannel {
    /// Create an empty in-memory channel.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl StorageChannel for MemoryChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().map_err(|_| SessionError::ChannelWrite {
            channel: self.name,
            reason: "mutex poisoned".to_string(),
        })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_channel_round_trips() {
        let channel = MemoryChannel::new("memory");
        assert_eq!(channel.get("k"), None);

        assert!(channel.set("k", "v").is_ok());
        assert_eq!(channel.get("k"), Some("v".to_string()));

        channel.remove("k");
        assert_eq!(channel.get("k"), None);
    }

    #[test]
    fn memory_channel_clones_share_state() {
        let channel = MemoryChannel::new("memory");
        let clone = channel.clone();

        assert!(channel.set("k", "v").is_ok());
        assert_eq!(clone.get("k"), Some("v".to_string()));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn file_channel_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let channel = FileChannel::new("cookie", dir.path().join("cookies.json"));

        assert_eq!(channel.get("authToken"), None);
        assert!(channel.set("authToken", "a.b.c").is_ok());
        assert!(channel.set("userData", r#"{"id":"user-123456789"}"#).is_ok());

        assert_eq!(channel.get("authToken"), Some("a.b.c".to_string()));

        channel.remove("authToken");
        assert_eq!(channel.get("authToken"), None);
        // The other key survives the remove.
        assert_eq!(
            channel.get("userData"),
            Some(r#"{"id":"user-123456789"}"#.to_string())
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn file_channel_survives_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        std::fs::write(&path, "not json").unwrap();

        let channel = FileChannel::new("cookie", path);
        assert_eq!(channel.get("authToken"), None);
        assert!(channel.set("authToken", "a.b.c").is_ok());
        assert_eq!(channel.get("authToken"), Some("a.b.c".to_string()));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn file_channel_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let channel = FileChannel::new("local", dir.path().join("nested/store.json"));

        assert!(channel.set("k", "v").is_ok());
        assert_eq!(channel.get("k"), Some("v".to_string()));
    }

    #[test]
    fn remove_on_missing_key_is_idempotent() {
        let channel = MemoryChannel::new("memory");
        channel.remove("absent");
        channel.remove("absent");
        assert_eq!(channel.get("absent"), None);
    }
}
