//! Logical time for the simulation
//!
//! The engine never looks at a wall clock. Time is a plain `f64` that starts
//! at zero and only moves forward, either by a cook duration or by jumping to
//! the next known arrival.

use serde::{Deserialize, Serialize};

/// Monotonic simulation clock
///
/// # Example
/// ```
/// use ratatouille_core_rs::SimClock;
///
/// let mut clock = SimClock::new();
/// assert_eq!(clock.now(), 0.0);
///
/// clock.advance_by(2.5);
/// clock.advance_to(4.0);
/// assert_eq!(clock.now(), 4.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    /// Current simulation time
    now: f64,
}

impl SimClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self { now: 0.0 }
    }

    /// Current simulation time
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance by a non-negative duration
    ///
    /// # Panics
    /// Panics if `duration` is negative or NaN. A backwards step is an engine
    /// defect, never a recoverable condition.
    pub fn advance_by(&mut self, duration: f64) {
        assert!(
            duration >= 0.0,
            "clock cannot move backwards (duration {})",
            duration
        );
        self.now += duration;
    }

    /// Jump forward to an absolute time
    ///
    /// Jumping to the current time is a no-op.
    ///
    /// # Panics
    /// Panics if `target` is earlier than `now()`.
    pub fn advance_to(&mut self, target: f64) {
        assert!(
            target >= self.now,
            "clock cannot move backwards ({} -> {})",
            self.now,
            target
        );
        self.now = target;
    }
}
