use crate::core::energy::pixel_energy;
use crate::core::image::{CHANNELS, ChannelsMut};
use crate::engine::config::Backend;
use crate::engine::error::EngineError;
use crate::engine::state::WorkingSet;
use crate::engine::utils::lanes;
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Stages an interleaved RGB buffer into the working set tile by tile, then accumulates the
/// initial total energy. Returns that energy.
#[instrument(level = "debug", skip_all, fields(tile_size = tile_size, backend = %backend))]
pub fn run(
    working_set: &mut WorkingSet,
    buffer: &[u8],
    tile_size: usize,
    backend: Backend,
) -> Result<i64, EngineError> {
    let dims = working_set.dimensions();
    if buffer.len() != dims.buffer_len() {
        return Err(EngineError::BufferSizeMismatch {
            expected: dims.buffer_len(),
            actual: buffer.len(),
        });
    }

    let pixel_count = dims.pixel_count();
    for (tile_index, start) in (0..pixel_count).step_by(tile_size).enumerate() {
        let end = (start + tile_size).min(pixel_count);
        let source = &buffer[start * CHANNELS..end * CHANNELS];
        copy_tile(working_set.pixels.channels_mut(start..end), source, backend);
        trace!(tile = tile_index, start, end, "Tile staged.");
    }

    let pixels = &working_set.pixels;
    let total_energy = lanes::atomic_sum(backend, pixel_count, |x| pixel_energy(pixels, dims, x));
    working_set.reset_statistics(total_energy);

    debug!(pixel_count, total_energy, "Working set loaded.");
    Ok(total_energy)
}

fn copy_tile(tile: ChannelsMut<'_>, source: &[u8], backend: Backend) {
    let ChannelsMut { red, green, blue } = tile;
    let write = |(((r, g), b), pixel): (((&mut u8, &mut u8), &mut u8), &[u8])| {
        *r = pixel[0];
        *g = pixel[1];
        *b = pixel[2];
    };

    match backend {
        #[cfg(feature = "parallel")]
        Backend::Parallel => red
            .par_iter_mut()
            .zip(green.par_iter_mut())
            .zip(blue.par_iter_mut())
            .zip(source.par_chunks_exact(CHANNELS))
            .for_each(write),
        _ => red
            .iter_mut()
            .zip(green.iter_mut())
            .zip(blue.iter_mut())
            .zip(source.chunks_exact(CHANNELS))
            .for_each(write),
    }
}
