//! Frame source boundary
//!
//! The control loop polls a [`FrameSource`] once per cycle and receives zero
//! or more sub-frames, depending on how many scans the panel buffered since
//! the previous poll. Construction performs the device open/handshake, so a
//! missing device fails before the session starts.

use super::synthetic::SyntheticPad;
use super::types::{ForceFrame, GridDimensions};
use crate::app::config::SensorConfig;
use crate::{Error, Result};
use tracing::info;

/// A device delivering pressure-grid snapshots.
pub trait FrameSource {
    /// Grid dimensions, fixed for the session
    fn dimensions(&self) -> GridDimensions;

    /// Begin streaming frames
    fn start(&mut self) -> Result<()>;

    /// Read all sub-frames buffered since the last poll.
    ///
    /// Blocks for at most the panel's native sampling latency. An empty
    /// vector is a valid result (no scan completed since the last poll).
    fn poll(&mut self) -> Result<Vec<ForceFrame>>;

    /// Stop streaming. Called once during teardown.
    fn stop(&mut self);
}

/// Open the configured force panel.
///
/// Hardware backends implement [`FrameSource`] against the vendor SDK and
/// are resolved here; this build carries only the synthetic demo pad, so
/// without `demo` the open reports the panel as absent.
pub fn open_panel(config: &SensorConfig, demo: bool) -> Result<Box<dyn FrameSource>> {
    if demo {
        let dims = GridDimensions::new(config.rows, config.cols);
        info!(
            rows = dims.rows,
            cols = dims.cols,
            "opening synthetic pad"
        );
        return Ok(Box::new(SyntheticPad::orbiting(
            dims,
            config.frame_interval_ms,
        )));
    }

    Err(Error::DeviceAbsent(
        "no panel backend compiled in; rerun with --demo for the synthetic pad".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_panel_demo() {
        let config = SensorConfig::default();
        let source = open_panel(&config, true).expect("demo pad should open");
        assert_eq!(
            source.dimensions(),
            GridDimensions::new(config.rows, config.cols)
        );
    }

    #[test]
    fn test_open_panel_without_backend_is_absent() {
        let config = SensorConfig::default();
        let result = open_panel(&config, false);
        assert!(matches!(result, Err(Error::DeviceAbsent(_))));
    }
}
