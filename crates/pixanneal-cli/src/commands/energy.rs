use crate::cli::EnergyArgs;
use crate::error::{CliError, Result};
use crate::imaging;
use pixanneal::engine::config::{Backend, EngineConfigBuilder};
use pixanneal::engine::run::AnnealingRun;
use tracing::info;

pub fn run(args: EnergyArgs) -> Result<()> {
    let image = imaging::load(&args.input)?;
    let energy = measure(&image)?;
    info!(energy, "Energy measured for {:?}", &args.input);
    println!("{}", energy);
    Ok(())
}

/// Stages the image into a run and reads back the loader's total.
fn measure(image: &imaging::RgbImage) -> Result<i64> {
    let config = EngineConfigBuilder::new()
        .lanes(1)
        .backend(Backend::default())
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let mut run = AnnealingRun::new(config);
    Ok(run.load(&image.pixels, image.dimensions)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RgbImage;
    use pixanneal::core::image::Dimensions;
    use pixanneal::engine::error::EngineError;

    #[test]
    fn measure_matches_the_two_by_two_scenario() {
        let image = RgbImage {
            dimensions: Dimensions::new(2, 2),
            pixels: vec![0, 0, 0, 10, 10, 10, 20, 20, 20, 30, 30, 30],
        };
        assert_eq!(measure(&image).unwrap(), 360);
    }

    #[test]
    fn measure_rejects_images_beyond_capacity() {
        let image = imaging::random(Dimensions::new(40, 40), Some(0));
        assert!(matches!(
            measure(&image),
            Err(CliError::Engine(EngineError::CapacityExceeded { .. }))
        ));
    }

    #[test]
    fn run_reads_a_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        let image = RgbImage {
            dimensions: Dimensions::new(3, 3),
            pixels: vec![7; 27],
        };
        imaging::save_png(&path, &image).unwrap();
        assert!(run(EnergyArgs { input: path }).is_ok());
    }
}
