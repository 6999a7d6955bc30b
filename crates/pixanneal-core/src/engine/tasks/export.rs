use crate::core::image::{CHANNELS, Channels, Dimensions};
use crate::engine::config::Backend;
use crate::engine::state::WorkingSet;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Final state of a run as handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub dimensions: Dimensions,
    /// Channel-interleaved, row-major RGB.
    pub pixels: Vec<u8>,
    pub total_energy: i64,
    pub swap_count: u64,
}

/// Drains the working set into an interleaved buffer using the loader's tiling.
pub fn run(working_set: &WorkingSet, tile_size: usize, backend: Backend) -> RunResult {
    let dims = working_set.dimensions();
    let pixel_count = dims.pixel_count();
    let mut pixels = vec![0u8; dims.buffer_len()];

    for (tile_index, start) in (0..pixel_count).step_by(tile_size).enumerate() {
        let end = (start + tile_size).min(pixel_count);
        let destination = &mut pixels[start * CHANNELS..end * CHANNELS];
        drain_tile(working_set.pixels().channels(start..end), destination, backend);
        trace!(tile = tile_index, start, end, "Tile drained.");
    }

    debug!(
        total_energy = working_set.total_energy(),
        swap_count = working_set.swap_count(),
        "Working set exported."
    );

    RunResult {
        dimensions: dims,
        pixels,
        total_energy: working_set.total_energy(),
        swap_count: working_set.swap_count(),
    }
}

fn drain_tile(tile: Channels<'_>, destination: &mut [u8], backend: Backend) {
    let Channels { red, green, blue } = tile;
    let write = |(pixel, ((&r, &g), &b)): (&mut [u8], ((&u8, &u8), &u8))| {
        pixel[0] = r;
        pixel[1] = g;
        pixel[2] = b;
    };

    match backend {
        #[cfg(feature = "parallel")]
        Backend::Parallel => destination
            .par_chunks_exact_mut(CHANNELS)
            .zip(red.par_iter().zip(green.par_iter()).zip(blue.par_iter()))
            .for_each(write),
        _ => destination
            .chunks_exact_mut(CHANNELS)
            .zip(red.iter().zip(green.iter()).zip(blue.iter()))
            .for_each(write),
    }
}
