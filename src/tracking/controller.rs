//! Per-cycle motion control
//!
//! The controller owns the running motion state: current plotter position,
//! the bounded trail, and which phase the tracker is in. Each cycle it takes
//! the poll's peak (if any) and decides on exactly one command.

use super::limiter::limit_step;
use super::mapper::GridMapper;
use super::peak::FramePeak;
use super::trail::Trail;
use crate::plotter::driver::PlotterPoint;

/// Phase of the tracker after the most recent cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// Advancing toward a live press
    Seeking,
    /// Replaying the recorded trail backward
    Retreating,
    /// No press and no trail left; nothing to do
    Idle,
}

/// What the control loop should do this cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleCommand {
    /// Move one bounded step toward the live press
    Advance(PlotterPoint),
    /// Move back to the most recently recorded target
    Retreat(PlotterPoint),
    /// Trail exhausted with no press; issue no move
    Hold,
}

/// Sense → locate → smooth → actuate decision state machine.
#[derive(Debug)]
pub struct MotionController {
    mapper: GridMapper,
    max_step: f64,
    trail: Trail,
    position: PlotterPoint,
    state: TrackingState,
}

impl MotionController {
    /// Build a controller starting at `start` with an empty trail.
    pub fn new(mapper: GridMapper, max_step: f64, trail_capacity: usize, start: PlotterPoint) -> Self {
        Self {
            mapper,
            max_step,
            trail: Trail::new(trail_capacity),
            position: start,
            state: TrackingState::Seeking,
        }
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn position(&self) -> PlotterPoint {
        self.position
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Run one cycle of the decision ladder.
    ///
    /// A peak with positive magnitude advances toward it (mapped, velocity
    /// limited, recorded on the trail). Without a peak the trail is replayed
    /// backward one step; once it is exhausted the cycle holds.
    pub fn step(&mut self, peak: Option<FramePeak>) -> CycleCommand {
        match peak {
            Some(peak) if peak.force > 0.0 => {
                let mapped = self.mapper.map_peak(&peak);
                let next = limit_step(self.position, mapped, self.max_step);
                self.trail.push(next);
                self.position = next;
                self.state = TrackingState::Seeking;
                CycleCommand::Advance(next)
            }
            _ => match self.trail.pop() {
                Some(previous) => {
                    self.position = previous;
                    self.state = TrackingState::Retreating;
                    CycleCommand::Retreat(previous)
                }
                None => {
                    self.state = TrackingState::Idle;
                    CycleCommand::Hold
                }
            },
        }
    }
}
