//! Force-field visualization
//!
//! Optional observability surface: a terminal heatmap of the normalized,
//! gamma-corrected pressure grid. Never required for correctness; a failed
//! draw is logged and rendering is disabled for the rest of the session.

pub mod heatmap;

pub use heatmap::{normalize, TerminalHeatmap};
