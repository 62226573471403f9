//! Session orchestration
//!
//! The per-cycle control loops (follow, raster, monitor) and the counters
//! summarizing a session. Loops check the shared termination flag between
//! cycles, so an operator stop is observed with at most one extra cycle of
//! latency.

pub mod runner;
pub mod stats;

pub use runner::{run_follow, run_monitor, run_raster};
pub use stats::SessionStats;
