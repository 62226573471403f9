//! Session counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Session statistics for monitoring
#[derive(Debug, Default)]
pub struct SessionStats {
    /// Cycles run
    pub cycles: AtomicU64,
    /// Sub-frames delivered by the source
    pub frames: AtomicU64,
    /// Polls that failed and degraded to the no-press path
    pub read_failures: AtomicU64,
    /// Cycles that advanced toward a live press
    pub advances: AtomicU64,
    /// Cycles that replayed the trail backward
    pub retreats: AtomicU64,
    /// Cycles with no press and an exhausted trail
    pub holds: AtomicU64,
}

impl SessionStats {
    /// One-line summary for the end-of-session log
    pub fn summary(&self) -> String {
        format!(
            "{} cycles, {} frames, {} advances, {} retreats, {} holds, {} read failures",
            self.cycles.load(Ordering::Relaxed),
            self.frames.load(Ordering::Relaxed),
            self.advances.load(Ordering::Relaxed),
            self.retreats.load(Ordering::Relaxed),
            self.holds.load(Ordering::Relaxed),
            self.read_failures.load(Ordering::Relaxed),
        )
    }
}
