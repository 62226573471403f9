//! Synthetic force pad
//!
//! A deterministic [`FrameSource`] used by demo mode, the integration tests,
//! and the benches. The orbiting variant moves a single contact around the
//! panel with a periodic press/release cadence; the scripted variant replays
//! a fixed sequence of polls.

use super::source::FrameSource;
use super::types::{ForceFrame, GridDimensions};
use crate::{Error, Result};
use std::collections::VecDeque;
use std::time::Duration;

/// Peak force of the orbiting contact, in sensor force units
const ORBIT_PRESS_FORCE: f32 = 480.0;

/// Cycles of contact followed by cycles of release in the orbit pattern
const ORBIT_PRESS_CYCLES: u64 = 180;
const ORBIT_RELEASE_CYCLES: u64 = 60;

/// Contact footprint falloff (cells)
const BLOB_SIGMA: f64 = 1.8;
const BLOB_RADIUS: i64 = 4;

/// Write a pressed contact into `frame` centered at (row, col).
///
/// The footprint is a small radial falloff around the center, so the frame
/// has one unambiguous maximum at the requested cell.
pub fn press_into(frame: &mut ForceFrame, row: usize, col: usize, force: f32) {
    let dims = frame.dims();
    for dr in -BLOB_RADIUS..=BLOB_RADIUS {
        for dc in -BLOB_RADIUS..=BLOB_RADIUS {
            let r = row as i64 + dr;
            let c = col as i64 + dc;
            if r < 0 || c < 0 || r >= dims.rows as i64 || c >= dims.cols as i64 {
                continue;
            }
            let d2 = (dr * dr + dc * dc) as f64;
            let falloff = (-d2 / (2.0 * BLOB_SIGMA * BLOB_SIGMA)).exp();
            let value = force * falloff as f32;
            if value > frame.get(r as usize, c as usize) {
                frame.set(r as usize, c as usize, value);
            }
        }
    }
}

/// Build a frame containing a single pressed contact.
pub fn press_frame(dims: GridDimensions, row: usize, col: usize, force: f32) -> ForceFrame {
    let mut frame = ForceFrame::zeroed(dims);
    press_into(&mut frame, row, col, force);
    frame
}

enum Pattern {
    /// Contact orbits the panel center, pressing and releasing periodically.
    /// Polls sleep for the configured frame interval to model the panel's
    /// native sampling latency.
    Orbit { frame_interval: Duration },
    /// Fixed sequence of polls; exhausted polls yield release frames.
    Scripted { polls: VecDeque<Vec<ForceFrame>> },
}

/// Deterministic stand-in for a force panel.
pub struct SyntheticPad {
    dims: GridDimensions,
    pattern: Pattern,
    step: u64,
    streaming: bool,
}

impl SyntheticPad {
    /// Orbiting demo contact.
    pub fn orbiting(dims: GridDimensions, frame_interval_ms: u64) -> Self {
        Self {
            dims,
            pattern: Pattern::Orbit {
                frame_interval: Duration::from_millis(frame_interval_ms),
            },
            step: 0,
            streaming: false,
        }
    }

    /// Replay the given polls in order, then report release frames.
    pub fn scripted(dims: GridDimensions, polls: Vec<Vec<ForceFrame>>) -> Self {
        Self {
            dims,
            pattern: Pattern::Scripted {
                polls: polls.into(),
            },
            step: 0,
            streaming: false,
        }
    }

    fn orbit_frame(&self) -> ForceFrame {
        let phase = self.step % (ORBIT_PRESS_CYCLES + ORBIT_RELEASE_CYCLES);
        if phase >= ORBIT_PRESS_CYCLES {
            return ForceFrame::zeroed(self.dims);
        }

        let angle = self.step as f64 * 0.05;
        let center_r = self.dims.rows as f64 / 2.0;
        let center_c = self.dims.cols as f64 / 2.0;
        let row = center_r + center_r * 0.7 * angle.sin();
        let col = center_c + center_c * 0.8 * angle.cos();
        press_frame(
            self.dims,
            row.clamp(0.0, self.dims.rows as f64 - 1.0) as usize,
            col.clamp(0.0, self.dims.cols as f64 - 1.0) as usize,
            ORBIT_PRESS_FORCE,
        )
    }
}

impl FrameSource for SyntheticPad {
    fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    fn start(&mut self) -> Result<()> {
        self.streaming = true;
        Ok(())
    }

    fn poll(&mut self) -> Result<Vec<ForceFrame>> {
        if !self.streaming {
            return Err(Error::FrameRead("source is not streaming".to_string()));
        }

        self.step += 1;
        match &mut self.pattern {
            Pattern::Orbit { frame_interval } => {
                std::thread::sleep(*frame_interval);
                Ok(vec![self.orbit_frame()])
            }
            Pattern::Scripted { polls } => match polls.pop_front() {
                Some(frames) => Ok(frames),
                None => Ok(vec![ForceFrame::zeroed(self.dims)]),
            },
        }
    }

    fn stop(&mut self) {
        self.streaming = false;
    }
}
