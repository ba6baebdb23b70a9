//! Production Environment implementation using the system clock.

use std::time::SystemTime;

use tweeter_core::Environment;

/// Production environment using wall-clock time.
///
/// `SystemTime` can in principle step backwards (NTP adjustments). Tweets
/// only use it for display and equality, so a step back never breaks an
/// invariant; it only makes `created_at` look odd.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn system_env_time_advances() {
        let env = SystemEnv::new();

        let t1 = env.now();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = env.now();

        assert!(t2 > t1, "Time should advance");
    }

    #[test]
    fn system_env_is_after_epoch() {
        let env = SystemEnv::new();
        assert!(env.now() > SystemTime::UNIX_EPOCH);
    }
}
