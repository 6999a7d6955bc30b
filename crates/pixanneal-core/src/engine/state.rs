use super::error::EngineError;
use crate::core::image::{Dimensions, MAX_PIXELS, PixelArena};

/// Lifecycle of one annealing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Uninitialized,
    Loaded,
    Exported,
}

/// The resident, authoritative copy of the image and its running statistics.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    pub(crate) pixels: PixelArena,
    dims: Dimensions,
    total_energy: i64,
    swap_count: u64,
}

impl WorkingSet {
    /// Creates an empty working set with zeroed counters, rejecting shapes that cannot be resident.
    pub fn new(dims: Dimensions) -> Result<Self, EngineError> {
        if dims.height == 0 || dims.width == 0 {
            return Err(EngineError::InvalidDimensions {
                height: dims.height,
                width: dims.width,
            });
        }
        if !dims.fits_capacity() {
            return Err(EngineError::CapacityExceeded {
                height: dims.height,
                width: dims.width,
                capacity: MAX_PIXELS,
            });
        }
        Ok(Self {
            pixels: PixelArena::new(),
            dims,
            total_energy: 0,
            swap_count: 0,
        })
    }

    pub fn pixels(&self) -> &PixelArena {
        &self.pixels
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn total_energy(&self) -> i64 {
        self.total_energy
    }

    pub fn swap_count(&self) -> u64 {
        self.swap_count
    }

    pub(crate) fn reset_statistics(&mut self, total_energy: i64) {
        self.total_energy = total_energy;
        self.swap_count = 0;
    }

    /// Exchanges two pixels and books the move's precomputed energy delta.
    pub(crate) fn apply_swap(&mut self, a: usize, b: usize, delta: i64) {
        self.pixels.swap(a, b);
        self.total_energy += delta;
        self.swap_count += 1;
    }
}
