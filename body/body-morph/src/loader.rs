//! Asset load lifecycle tracking.
//!
//! The tracker models one load attempt of a body asset: the caller
//! drives I/O however it likes and reports the outcome here. The UI
//! shows a loading overlay while the attempt is in flight, but the
//! overlay has a hard ceiling so a stalled download never pins the
//! screen indefinitely.

use std::time::Duration;

use tracing::{info, warn};

/// Maximum time the loading overlay stays up, settled or not.
pub const SPINNER_CEILING: Duration = Duration::from_secs(10);

/// Phase of one asset load attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    /// The attempt is in flight.
    #[default]
    Loading,
    /// The asset loaded and a scene is available.
    Ready,
    /// The attempt failed. Terminal for this tracker; retrying is a new
    /// attempt with a new tracker.
    Failed,
}

/// Tracks one load attempt from start to a settled outcome.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use body_morph::{LoadPhase, LoadTracker};
///
/// let mut tracker = LoadTracker::new();
/// assert_eq!(tracker.phase(), LoadPhase::Loading);
/// assert!(!tracker.should_dismiss_spinner(Duration::from_secs(2)));
///
/// tracker.mark_ready();
/// assert!(tracker.is_settled());
/// assert!(tracker.should_dismiss_spinner(Duration::ZERO));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    phase: LoadPhase,
}

impl LoadTracker {
    /// Starts tracking a new load attempt.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Marks the attempt successful.
    ///
    /// Ignored if the attempt already settled.
    pub fn mark_ready(&mut self) {
        if self.is_settled() {
            return;
        }
        info!("body asset ready");
        self.phase = LoadPhase::Ready;
    }

    /// Marks the attempt failed.
    ///
    /// Ignored if the attempt already settled.
    pub fn mark_failed(&mut self) {
        if self.is_settled() {
            return;
        }
        warn!("body asset load failed");
        self.phase = LoadPhase::Failed;
    }

    /// Returns true once the attempt reached a terminal phase.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self.phase, LoadPhase::Loading)
    }

    /// Whether the loading overlay should come down.
    ///
    /// True once the attempt settles, or unconditionally after
    /// [`SPINNER_CEILING`] has elapsed since the attempt started.
    #[must_use]
    pub fn should_dismiss_spinner(&self, elapsed: Duration) -> bool {
        self.is_settled() || elapsed >= SPINNER_CEILING
    }
}
