//! Terminal heatmap of the force field

use crate::app::config::DisplayConfig;
use crate::sensor::types::ForceFrame;
use crate::{Error, Result};
use crossterm::style::Print;
use crossterm::{cursor, queue, terminal};
use std::io::{self, Write};
use tracing::warn;

/// Character ramp from no contact to full force
const SHADES: [char; 6] = [' ', '·', '░', '▒', '▓', '█'];

/// Fallback terminal size when the real one cannot be queried
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Normalize a frame into 8-bit display levels.
///
/// Forces are scaled against `ceiling` (readings above it saturate), then
/// gamma-corrected so light touches remain visible. A non-positive ceiling
/// disables scaling and the raw readings are clamped directly.
pub fn normalize(frame: &ForceFrame, ceiling: f32, gamma: f32) -> Vec<u8> {
    frame
        .as_slice()
        .iter()
        .map(|&force| {
            let scaled = if ceiling > 0.0 {
                (force / ceiling * 255.0).clamp(0.0, 255.0)
            } else {
                force.clamp(0.0, 255.0)
            };
            let corrected = (scaled / 255.0).powf(1.0 / gamma) * 255.0;
            corrected.round() as u8
        })
        .collect()
}

fn shade(level: u8) -> char {
    SHADES[level as usize * (SHADES.len() - 1) / 255]
}

/// Draws the pressure grid into the terminal once per poll.
pub struct TerminalHeatmap {
    ceiling: f32,
    gamma: f32,
    failed: bool,
}

impl TerminalHeatmap {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            ceiling: config.force_ceiling,
            gamma: config.gamma,
            failed: false,
        }
    }

    /// Render one frame.
    ///
    /// Failures are reported once and silence the heatmap for the rest of
    /// the session; the control loop is never affected.
    pub fn render(&mut self, frame: &ForceFrame) {
        if self.failed {
            return;
        }
        if let Err(err) = self.draw(frame) {
            warn!("heatmap disabled: {err}");
            self.failed = true;
        }
    }

    fn draw(&self, frame: &ForceFrame) -> Result<()> {
        let levels = normalize(frame, self.ceiling, self.gamma);
        let dims = frame.dims();

        // Nearest-neighbor downsample to the terminal size
        let (term_cols, term_rows) = terminal::size().unwrap_or(FALLBACK_SIZE);
        let stride_r = dims.rows.div_ceil(term_rows.max(2) as usize - 1).max(1);
        let stride_c = dims.cols.div_ceil(term_cols.max(1) as usize).max(1);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        queue!(out, cursor::MoveTo(0, 0)).map_err(display_err)?;

        let mut row = 0;
        while row < dims.rows {
            let mut line = String::with_capacity(dims.cols / stride_c + 1);
            let mut col = 0;
            while col < dims.cols {
                line.push(shade(levels[row * dims.cols + col]));
                col += stride_c;
            }
            queue!(out, Print(line), Print("\r\n")).map_err(display_err)?;
            row += stride_r;
        }

        out.flush().map_err(display_err)
    }
}

fn display_err(err: io::Error) -> Error {
    Error::Display(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::types::GridDimensions;

    fn frame_of(forces: Vec<f32>, rows: usize, cols: usize) -> ForceFrame {
        ForceFrame::new(GridDimensions::new(rows, cols), forces)
    }

    #[test]
    fn test_zero_force_maps_to_zero() {
        let frame = frame_of(vec![0.0; 4], 2, 2);
        assert_eq!(normalize(&frame, 700.0, 2.0), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_ceiling_maps_to_full_scale() {
        let frame = frame_of(vec![700.0], 1, 1);
        assert_eq!(normalize(&frame, 700.0, 2.0), vec![255]);
    }

    #[test]
    fn test_overshoot_saturates() {
        let frame = frame_of(vec![5000.0], 1, 1);
        assert_eq!(normalize(&frame, 700.0, 2.0), vec![255]);
    }

    #[test]
    fn test_gamma_lifts_low_readings() {
        // γ=2 square-roots the normalized value: 25% force → 50% brightness
        let frame = frame_of(vec![175.0], 1, 1);
        let levels = normalize(&frame, 700.0, 2.0);
        assert!((f32::from(levels[0]) - 127.5).abs() <= 1.0);
    }

    #[test]
    fn test_normalization_is_monotone() {
        let frame = frame_of(vec![0.0, 50.0, 100.0, 350.0, 700.0, 900.0], 2, 3);
        let levels = normalize(&frame, 700.0, 2.0);
        for pair in levels.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_non_positive_ceiling_disables_scaling() {
        let frame = frame_of(vec![90.0], 1, 1);
        let levels = normalize(&frame, 0.0, 1.0);
        assert_eq!(levels, vec![90]);
    }

    #[test]
    fn test_shade_covers_full_ramp() {
        assert_eq!(shade(0), ' ');
        assert_eq!(shade(255), '█');
        for level in 0..=255u16 {
            // Every level maps to some ramp entry without panicking
            let _ = shade(level as u8);
        }
    }
}
