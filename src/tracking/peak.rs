//! Peak location
//!
//! Scans a force frame for the cell with the strongest reading. A panel poll
//! can deliver several sub-frames; [`strongest_peak`] folds the per-frame
//! results so downstream sees one peak per cycle.

use crate::sensor::types::ForceFrame;

/// Strongest reading in one frame: grid cell plus magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePeak {
    pub row: usize,
    pub col: usize,
    pub force: f32,
}

/// Find the cell with the maximum force in a frame.
///
/// Ties resolve to the first cell in row-major scan order. Returns `None`
/// when no reading is strictly positive (no contact on the panel).
pub fn find_peak(frame: &ForceFrame) -> Option<FramePeak> {
    let dims = frame.dims();
    let mut best: Option<FramePeak> = None;

    for (idx, &force) in frame.as_slice().iter().enumerate() {
        if force <= 0.0 {
            continue;
        }
        // Strict comparison keeps the earliest cell on equal magnitudes
        if best.map_or(true, |b| force > b.force) {
            best = Some(FramePeak {
                row: idx / dims.cols,
                col: idx % dims.cols,
                force,
            });
        }
    }

    best
}

/// Fold the peaks of all sub-frames in one poll.
///
/// The magnitude is the running maximum across the poll; the coordinate is
/// taken from the sub-frame that produced it, with the later sub-frame
/// winning on equal magnitudes.
pub fn strongest_peak(frames: &[ForceFrame]) -> Option<FramePeak> {
    let mut strongest: Option<FramePeak> = None;

    for frame in frames {
        if let Some(peak) = find_peak(frame) {
            if strongest.map_or(true, |s| peak.force >= s.force) {
                strongest = Some(peak);
            }
        }
    }

    strongest
}
