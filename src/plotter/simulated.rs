//! Simulated plotter
//!
//! Stands in for plotter hardware: tracks carriage position, enforces the
//! connect/configure lifecycle, and records every executed move so tests can
//! assert on the emitted motion.

use super::driver::{PenPlotter, PlotterPoint};
use crate::{Error, Result};
use tracing::{debug, info};

/// In-memory pen plotter.
#[derive(Debug)]
pub struct SimulatedPlotter {
    position: PlotterPoint,
    connected: bool,
    pen_down: bool,
    pen_up_height: u8,
    pen_down_height: u8,
    moves: Vec<PlotterPoint>,
}

impl SimulatedPlotter {
    pub fn new() -> Self {
        Self {
            position: PlotterPoint::new(0.0, 0.0),
            connected: false,
            pen_down: false,
            pen_up_height: 100,
            pen_down_height: 0,
            moves: Vec::new(),
        }
    }

    /// Every move executed since connect, in order
    pub fn moves(&self) -> &[PlotterPoint] {
        &self.moves
    }

    pub fn pen_is_down(&self) -> bool {
        self.pen_down
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn require_connection(&self) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(Error::Plotter("not connected".to_string()))
        }
    }
}

impl Default for SimulatedPlotter {
    fn default() -> Self {
        Self::new()
    }
}

impl PenPlotter for SimulatedPlotter {
    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        info!("simulated plotter connected");
        Ok(())
    }

    fn configure(&mut self, pen_up_height: u8, pen_down_height: u8) -> Result<()> {
        self.require_connection()?;
        self.pen_up_height = pen_up_height;
        self.pen_down_height = pen_down_height;
        debug!(pen_up_height, pen_down_height, "plotter configured");
        Ok(())
    }

    fn pen_up(&mut self) -> Result<()> {
        self.require_connection()?;
        self.pen_down = false;
        debug!(height = self.pen_up_height, "pen up");
        Ok(())
    }

    fn pen_down(&mut self) -> Result<()> {
        self.require_connection()?;
        self.pen_down = true;
        debug!(height = self.pen_down_height, "pen down");
        Ok(())
    }

    fn move_to(&mut self, target: PlotterPoint) -> Result<()> {
        self.require_connection()?;
        debug!(x = target.x, y = target.y, "move");
        self.position = target;
        self.moves.push(target);
        Ok(())
    }

    fn position(&self) -> PlotterPoint {
        self.position
    }

    fn disconnect(&mut self) -> Result<()> {
        self.require_connection()?;
        self.connected = false;
        // Motors released; the carriage is free for manual re-alignment.
        info!("simulated plotter disconnected");
        Ok(())
    }
}
