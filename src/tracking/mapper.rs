//! Grid → plotter coordinate mapping

use super::peak::FramePeak;
use crate::app::config::MappingConfig;
use crate::plotter::driver::PlotterPoint;
use crate::sensor::types::GridDimensions;

/// Maps sensor grid cells into the plotter's travel envelope.
///
/// Both axes are mirrored in grid space before scaling: grid columns grow
/// rightward where plotter X grows leftward, and grid rows grow downward
/// where plotter Y grows upward, per the panel's mounting orientation. The
/// result is clamped component-wise into `[0, x_max] × [0, y_max]`.
///
/// The mapping is pure; the same cell and the same constants always produce
/// the same point, bit for bit.
#[derive(Debug, Clone, Copy)]
pub struct GridMapper {
    dims: GridDimensions,
    scale_x: f64,
    scale_y: f64,
    x_max: f64,
    y_max: f64,
}

impl GridMapper {
    pub fn new(dims: GridDimensions, scale_x: f64, scale_y: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            dims,
            scale_x,
            scale_y,
            x_max,
            y_max,
        }
    }

    pub fn from_config(dims: GridDimensions, config: &MappingConfig) -> Self {
        Self::new(
            dims,
            config.scale_x,
            config.scale_y,
            config.x_max,
            config.y_max,
        )
    }

    /// Map a grid cell to a plotter point.
    pub fn map(&self, row: usize, col: usize) -> PlotterPoint {
        let x = (self.dims.cols as f64 - col as f64) * self.scale_x;
        let y = (self.dims.rows as f64 - row as f64) * self.scale_y;
        PlotterPoint::new(x.clamp(0.0, self.x_max), y.clamp(0.0, self.y_max))
    }

    /// Map a located peak to a plotter point.
    pub fn map_peak(&self, peak: &FramePeak) -> PlotterPoint {
        self.map(peak.row, peak.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> GridMapper {
        GridMapper::new(GridDimensions::new(105, 185), 1.24, 1.22, 230.0, 125.0)
    }

    #[test]
    fn test_axes_are_mirrored() {
        let m = GridMapper::new(GridDimensions::new(10, 10), 1.0, 1.0, 100.0, 100.0);
        // Column 0 lands at the far X side, row 0 at the far Y side
        assert_eq!(m.map(0, 0), PlotterPoint::new(10.0, 10.0));
        assert_eq!(m.map(9, 9), PlotterPoint::new(1.0, 1.0));
    }

    #[test]
    fn test_reference_cell() {
        let m = GridMapper::new(GridDimensions::new(10, 10), 1.24, 1.22, 230.0, 125.0);
        let p = m.map(3, 4);
        assert!((p.x - 7.44).abs() < 1e-12);
        assert!((p.y - 8.54).abs() < 1e-12);
    }

    #[test]
    fn test_output_stays_in_envelope() {
        let m = mapper();
        for &(row, col) in &[(0, 0), (0, 184), (104, 0), (104, 184), (52, 92)] {
            let p = m.map(row, col);
            assert!(p.x >= 0.0 && p.x <= 230.0, "x out of envelope: {}", p.x);
            assert!(p.y >= 0.0 && p.y <= 125.0, "y out of envelope: {}", p.y);
        }
    }

    #[test]
    fn test_clamps_out_of_range_inputs() {
        // Synthetic out-of-grid cells still land inside the envelope
        let m = mapper();
        let p = m.map(500, 400);
        assert_eq!(p, PlotterPoint::new(0.0, 0.0));

        let wide = GridMapper::new(GridDimensions::new(400, 400), 1.24, 1.22, 230.0, 125.0);
        let q = wide.map(0, 0);
        assert_eq!(q, PlotterPoint::new(230.0, 125.0));
    }

    #[test]
    fn test_mapping_is_reproducible() {
        let m = mapper();
        let a = m.map(41, 97);
        let b = m.map(41, 97);
        assert_eq!(a, b);
    }
}
