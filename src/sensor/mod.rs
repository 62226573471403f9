//! Force-frame capture
//!
//! Types for pressure-grid snapshots and the frame source boundary the
//! control loop polls. Real panel hardware plugs in behind [`FrameSource`];
//! the in-tree [`SyntheticPad`] backend scripts a moving contact for demo
//! runs and tests.

pub mod source;
pub mod synthetic;
pub mod types;

pub use source::{open_panel, FrameSource};
pub use synthetic::SyntheticPad;
pub use types::{ForceFrame, GridDimensions};
