//! # touchtrace
//!
//! Drives a two-axis pen plotter toward the dominant press on a force-touch
//! panel.
//!
//! ## Overview
//!
//! Each sampling cycle the control loop reads a pressure grid from the panel,
//! locates the strongest reading, maps it into plotter space, clamps the
//! resulting motion to a maximum step distance, and issues one absolute move.
//! When no force is present the plotter retraces its own recent path backward
//! until either force resumes or the recorded trail runs out.
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`sensor`]: force-frame types and the frame source boundary
//! - [`tracking`]: peak location, coordinate mapping, velocity limiting,
//!   the bounded trail, and the per-cycle motion controller
//! - [`plotter`]: the pen plotter boundary and the simulated driver
//! - [`display`]: terminal heatmap of the normalized force field
//! - [`session`]: the control loop, its termination flag, and counters
//! - [`app`]: CLI and configuration management
//!
//! ## Control loop
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ FrameSource │───▶│    Peak     │───▶│   Mapper +  │───▶│   Plotter   │
//! │   (poll)    │    │   Locator   │    │   Limiter   │    │  (move_to)  │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                           │ no peak                            ▲
//!                           ▼                                    │
//!                    ┌─────────────┐         pop                 │
//!                    │    Trail    │────────────────────────────┘
//!                    │  (retreat)  │
//!                    └─────────────┘
//! ```

pub mod app;
pub mod display;
pub mod plotter;
pub mod sensor;
pub mod session;
pub mod tracking;

// Re-export commonly used types
pub use plotter::driver::{PenPlotter, PlotterPoint};
pub use sensor::source::FrameSource;
pub use sensor::types::{ForceFrame, GridDimensions};
pub use tracking::controller::MotionController;

/// Result type alias for the press tracker
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the press tracker
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No force panel could be opened at startup. Fatal; the session never
    /// starts and the operator must restart after reseating the device.
    #[error("no force panel available: {0}")]
    DeviceAbsent(String),

    /// A single poll failed. The cycle degrades to the no-peak path and the
    /// loop continues.
    #[error("frame read failed: {0}")]
    FrameRead(String),

    /// The plotter could not be reached at startup. Fatal.
    #[error("plotter connection failed: {0}")]
    PlotterUnreachable(String),

    /// A plotter command failed mid-session.
    #[error("plotter command failed: {0}")]
    Plotter(String),

    /// The heatmap could not be drawn. Callers treat this as non-fatal.
    #[error("display error: {0}")]
    Display(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
