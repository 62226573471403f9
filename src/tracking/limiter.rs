//! Per-cycle velocity limiting

use crate::plotter::driver::PlotterPoint;

/// Bound one cycle's displacement to `max_step`.
///
/// If the target lies within `max_step` of the current position it passes
/// through unchanged. Otherwise the result is the point exactly `max_step`
/// from `current` on the segment toward `target`, blended with the ratio
/// `max_step / distance`.
pub fn limit_step(current: PlotterPoint, target: PlotterPoint, max_step: f64) -> PlotterPoint {
    let distance = current.distance_to(&target);
    if distance <= max_step {
        return target;
    }

    let r = max_step / distance;
    PlotterPoint::new(
        target.x * r + current.x * (1.0 - r),
        target.y * r + current.y * (1.0 - r),
    )
}
