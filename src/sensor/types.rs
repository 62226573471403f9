//! Core types for force-frame capture

/// Dimensions of the sensor's pressure grid.
///
/// Fixed for the lifetime of a session; obtained from the source at open
/// time and threaded explicitly into whoever needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
}

impl GridDimensions {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells in one frame
    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// One snapshot of the panel's full pressure grid.
///
/// Readings are non-negative and stored row-major. A frame is immutable once
/// delivered; the cycle that polled it owns it exclusively.
#[derive(Debug, Clone)]
pub struct ForceFrame {
    dims: GridDimensions,
    forces: Vec<f32>,
}

impl ForceFrame {
    /// Wrap a row-major force array.
    ///
    /// # Panics
    /// Panics if the array length does not match the grid dimensions.
    pub fn new(dims: GridDimensions, forces: Vec<f32>) -> Self {
        assert_eq!(
            forces.len(),
            dims.cell_count(),
            "force array length must match grid dimensions"
        );
        Self { dims, forces }
    }

    /// An all-zero frame (no contact anywhere).
    pub fn zeroed(dims: GridDimensions) -> Self {
        Self {
            dims,
            forces: vec![0.0; dims.cell_count()],
        }
    }

    pub fn dims(&self) -> GridDimensions {
        self.dims
    }

    /// Force reading at (row, col)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.forces[row * self.dims.cols + col]
    }

    /// Raw row-major force array
    pub fn as_slice(&self) -> &[f32] {
        &self.forces
    }

    /// Mutable cell access, for sources building a frame in place
    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, force: f32) {
        self.forces[row * self.dims.cols + col] = force;
    }
}
