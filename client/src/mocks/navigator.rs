//! Recording navigator for testing.

use crate::navigator::Navigator;
use std::sync::{Arc, Mutex};

/// Navigator that records every navigation instead of performing one.
///
/// Clones share the same recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visits: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    /// Create a navigator with an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths navigated to, in order.
    #[must_use]
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Number of recorded navigations.
    #[must_use]
    pub fn visit_count(&self) -> usize {
        self.visits.lock().map(|v| v.len()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to_login(&self, path: &str) {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(path.to_string());
        }
    }
}
