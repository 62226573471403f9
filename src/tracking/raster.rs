//! Raster-scan variant
//!
//! The secondary mode does not chase a moving peak. Y sweeps across the
//! envelope as a function of the cycle step counter — the base row advances
//! every `advance_every` steps — offset by the current force magnitude, so
//! heavier pressure raises the pen's effective row within the pass. The
//! per-cycle Y change is clamped to `dy_limit` instead of a Euclidean cap.
//! X follows the mapped peak X and holds during no-press cycles.

use crate::app::config::RasterConfig;
use crate::plotter::driver::PlotterPoint;

/// Outcome of one raster cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RasterStep {
    /// Move to the next point of the pass
    MoveTo(PlotterPoint),
    /// The sweep would leave the Y envelope; the cycle is a no-op
    PassComplete,
}

/// State of one raster pass.
#[derive(Debug)]
pub struct RasterScan {
    step: u64,
    x: f64,
    y: f64,
    advance_every: u32,
    row_height: f64,
    force_gain: f64,
    dy_limit: f64,
    y_max: f64,
    complete: bool,
}

impl RasterScan {
    pub fn new(config: &RasterConfig, y_max: f64, start_x: f64) -> Self {
        Self {
            step: 0,
            x: start_x,
            y: 0.0,
            advance_every: config.advance_every,
            row_height: config.row_height,
            force_gain: config.force_gain,
            dy_limit: config.dy_limit,
            y_max,
            complete: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Advance the pass by one cycle.
    ///
    /// `peak_x` is the mapped X of the current press, if any; `force` is the
    /// press magnitude (zero when no contact).
    pub fn advance(&mut self, peak_x: Option<f64>, force: f32) -> RasterStep {
        if self.complete {
            return RasterStep::PassComplete;
        }

        self.step += 1;
        let base = (self.step / u64::from(self.advance_every)) as f64 * self.row_height;
        let target = base + f64::from(force) * self.force_gain;
        let dy = (target - self.y).clamp(-self.dy_limit, self.dy_limit);
        let next = self.y + dy;

        if next > self.y_max {
            self.complete = true;
            return RasterStep::PassComplete;
        }

        self.y = next;
        if let Some(x) = peak_x {
            self.x = x;
        }
        RasterStep::MoveTo(PlotterPoint::new(self.x, self.y))
    }
}
