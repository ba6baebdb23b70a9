//! Environment abstraction for deterministic testing.
//!
//! The `Environment` trait decouples the manager from the system clock. Every
//! tweet records the time it was composed, and that time comes from here:
//!
//! - Production: the shell uses the wall clock.
//! - Tests: the harness uses a manually advanced clock so that two runs with
//!   the same operations produce identical tweets (and therefore identical
//!   equality results).
//!
//! # Invariants
//!
//! - Monotonicity: `env.now()` must never go backwards
//! - Isolation: Implementations must not share global state

use std::time::SystemTime;

/// Abstract environment providing the current time.
///
/// Implementations MUST guarantee that `now()` never goes backwards within a
/// single manager's lifetime. Tweet equality compares timestamps, so a clock
/// that jumps around does not break correctness, but it does make timelines
/// confusing to read when callers sort by `created_at`.
pub trait Environment: Clone + 'static {
    /// Returns the current time.
    ///
    /// # Invariants
    ///
    /// - Monotonicity: Subsequent calls must return times >= previous calls.
    fn now(&self) -> SystemTime;
}
