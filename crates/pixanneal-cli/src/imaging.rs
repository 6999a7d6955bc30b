use crate::error::{CliError, Result};
use pixanneal::core::image::Dimensions;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::path::Path;
use tracing::debug;

/// An interleaved RGB8 image together with its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub dimensions: Dimensions,
    pub pixels: Vec<u8>,
}

pub fn load(path: &Path) -> Result<RgbImage> {
    debug!("Reading image from {:?}", path);
    let decoded = image::open(path)
        .map_err(|source| CliError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();

    let dimensions = Dimensions::new(decoded.height() as usize, decoded.width() as usize);
    Ok(RgbImage {
        dimensions,
        pixels: decoded.into_raw(),
    })
}

pub fn save_png(path: &Path, image: &RgbImage) -> Result<()> {
    let width = u32::try_from(image.dimensions.width)
        .map_err(|_| CliError::Argument("Image width does not fit in u32".to_string()))?;
    let height = u32::try_from(image.dimensions.height)
        .map_err(|_| CliError::Argument("Image height does not fit in u32".to_string()))?;

    image::save_buffer_with_format(
        path,
        &image.pixels,
        width,
        height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .map_err(|source| CliError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Uniformly random pixels. A seed makes the image reproducible.
pub fn random(dimensions: Dimensions, seed: Option<u64>) -> RgbImage {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut pixels = vec![0u8; dimensions.buffer_len()];
    rng.fill(pixels.as_mut_slice());
    RgbImage { dimensions, pixels }
}
