//! Control loops
//!
//! One thread, one cycle at a time: poll the source, show the field, decide,
//! issue at most one plotter command. A poll failure never aborts the loop;
//! the cycle degrades to the no-press path so retreat/idle behavior is
//! preserved. The termination flag is read between cycles only.

use crate::display::heatmap::TerminalHeatmap;
use crate::plotter::driver::PenPlotter;
use crate::sensor::source::FrameSource;
use crate::sensor::types::ForceFrame;
use crate::session::stats::SessionStats;
use crate::tracking::controller::{CycleCommand, MotionController, TrackingState};
use crate::tracking::mapper::GridMapper;
use crate::tracking::peak::strongest_peak;
use crate::tracking::raster::{RasterScan, RasterStep};
use crate::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

fn expired(started: Instant, duration: Duration) -> bool {
    !duration.is_zero() && started.elapsed() >= duration
}

/// Poll one cycle's sub-frames; a failed read degrades to an empty poll.
fn poll_frames(source: &mut dyn FrameSource, stats: &SessionStats) -> Vec<ForceFrame> {
    match source.poll() {
        Ok(frames) => {
            stats.frames.fetch_add(frames.len() as u64, Ordering::Relaxed);
            frames
        }
        Err(err) => {
            warn!("frame read failed, treating cycle as no press: {err}");
            stats.read_failures.fetch_add(1, Ordering::Relaxed);
            Vec::new()
        }
    }
}

fn show_frames(heatmap: Option<&mut TerminalHeatmap>, frames: &[ForceFrame]) {
    if let Some(heatmap) = heatmap {
        for frame in frames {
            heatmap.render(frame);
        }
    }
}

/// Follow the strongest press until the operator stops the session.
pub fn run_follow(
    source: &mut dyn FrameSource,
    plotter: &mut dyn PenPlotter,
    mut heatmap: Option<&mut TerminalHeatmap>,
    controller: &mut MotionController,
    stop: &AtomicBool,
    stats: &SessionStats,
    duration: Duration,
) -> Result<()> {
    source.start()?;
    let started = Instant::now();

    while !stop.load(Ordering::SeqCst) && !expired(started, duration) {
        stats.cycles.fetch_add(1, Ordering::Relaxed);

        let frames = poll_frames(source, stats);
        show_frames(heatmap.as_deref_mut(), &frames);

        let was = controller.state();
        match controller.step(strongest_peak(&frames)) {
            CycleCommand::Advance(target) => {
                stats.advances.fetch_add(1, Ordering::Relaxed);
                debug!(x = target.x, y = target.y, "advance");
                plotter.move_to(target)?;
            }
            CycleCommand::Retreat(target) => {
                stats.retreats.fetch_add(1, Ordering::Relaxed);
                if was != TrackingState::Retreating {
                    info!("press lost, retreating along the trail");
                }
                plotter.move_to(target)?;
            }
            CycleCommand::Hold => {
                stats.holds.fetch_add(1, Ordering::Relaxed);
                if was != TrackingState::Idle {
                    warn!("trail exhausted with no press; holding");
                }
            }
        }
    }

    source.stop();
    Ok(())
}

/// Sweep one raster pass, pressure shifting the pen row.
pub fn run_raster(
    source: &mut dyn FrameSource,
    plotter: &mut dyn PenPlotter,
    mut heatmap: Option<&mut TerminalHeatmap>,
    mapper: &GridMapper,
    scan: &mut RasterScan,
    stop: &AtomicBool,
    stats: &SessionStats,
    duration: Duration,
) -> Result<()> {
    source.start()?;
    let started = Instant::now();

    while !stop.load(Ordering::SeqCst) && !expired(started, duration) {
        stats.cycles.fetch_add(1, Ordering::Relaxed);

        let frames = poll_frames(source, stats);
        show_frames(heatmap.as_deref_mut(), &frames);

        let peak = strongest_peak(&frames);
        let peak_x = peak.map(|p| mapper.map_peak(&p).x);
        let force = peak.map_or(0.0, |p| p.force);

        let was_complete = scan.is_complete();
        match scan.advance(peak_x, force) {
            RasterStep::MoveTo(target) => {
                stats.advances.fetch_add(1, Ordering::Relaxed);
                debug!(x = target.x, y = target.y, "raster step");
                plotter.move_to(target)?;
            }
            RasterStep::PassComplete => {
                stats.holds.fetch_add(1, Ordering::Relaxed);
                if !was_complete {
                    info!("raster pass complete");
                }
            }
        }
    }

    source.stop();
    Ok(())
}

/// Heatmap-only session: poll and display, no plotter.
pub fn run_monitor(
    source: &mut dyn FrameSource,
    heatmap: &mut TerminalHeatmap,
    stop: &AtomicBool,
    stats: &SessionStats,
    duration: Duration,
) -> Result<()> {
    source.start()?;
    let started = Instant::now();

    while !stop.load(Ordering::SeqCst) && !expired(started, duration) {
        stats.cycles.fetch_add(1, Ordering::Relaxed);
        let frames = poll_frames(source, stats);
        for frame in &frames {
            heatmap.render(frame);
        }
    }

    source.stop();
    Ok(())
}
