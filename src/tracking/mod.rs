//! Press tracking and motion shaping
//!
//! Turns raw force frames into bounded plotter motion:
//! - peak location over the pressure grid
//! - grid → plotter coordinate mapping
//! - per-cycle velocity limiting
//! - the bounded trail replayed backward when force disappears
//! - the per-cycle motion controller tying them together
//! - the secondary raster-scan variant

pub mod controller;
pub mod limiter;
pub mod mapper;
pub mod peak;
pub mod raster;
pub mod trail;

pub use controller::{CycleCommand, MotionController, TrackingState};
pub use mapper::GridMapper;
pub use peak::{find_peak, strongest_peak, FramePeak};
pub use raster::{RasterScan, RasterStep};
pub use trail::Trail;
