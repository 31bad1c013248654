//! Storage channel with controllable write failures.

use crate::channel::{MemoryChannel, StorageChannel};
use crate::error::{Result, SessionError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory channel whose writes can be made to fail on demand.
///
/// Reads and removes keep working while writes fail, mirroring a storage
/// medium that has become read-only.
#[derive(Debug, Clone)]
pub struct FlakyChannel {
    inner: MemoryChannel,
    name: &'static str,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyChannel {
    /// Create a healthy channel; call [`fail_writes`](Self::fail_writes) to
    /// break it.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: MemoryChannel::new(name),
            name,
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Toggle write failures.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl StorageChannel for FlakyChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SessionError::ChannelWrite {
                channel: self.name,
                reason: "simulated write failure".to_string(),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_fail_only_while_toggled() {
        let channel = FlakyChannel::new("flaky");

        assert!(channel.set("k", "v").is_ok());

        channel.fail_writes(true);
        assert!(channel.set("k", "v2").is_err());
        // The earlier value is still readable.
        assert_eq!(channel.get("k"), Some("v".to_string()));

        channel.fail_writes(false);
        assert!(channel.set("k", "v3").is_ok());
        assert_eq!(channel.get("k"), Some("v3".to_string()));
    }
}
