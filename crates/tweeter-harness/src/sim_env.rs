//! Manually advanced clock.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, SystemTime},
};

use tweeter_core::Environment;

/// Deterministic environment whose clock only moves when told to.
///
/// Clones share the clock, so a test can keep a handle and advance the time
/// seen by a manager that owns another clone.
#[derive(Debug, Clone, Default)]
pub struct SimEnv {
    /// Milliseconds since the Unix epoch.
    millis: Arc<AtomicU64>,
}

impl SimEnv {
    /// Clock starting at the Unix epoch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let millis = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        // Saturate instead of wrapping so time never goes backwards.
        let _ = self.millis.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |now| {
            Some(now.saturating_add(millis))
        });
    }
}

impl Environment for SimEnv {
    fn now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(self.millis.load(Ordering::Relaxed))
    }
}
