use crate::cli::RunArgs;
use crate::config::PartialRunConfig;
use crate::error::Result;
use crate::imaging::{self, RgbImage};
use crate::utils::progress::CliProgressHandler;
use pixanneal::{engine::progress::ProgressReporter, workflows};
use tracing::info;

pub fn run(args: RunArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialRunConfig::from_file(path)?,
        None => PartialRunConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_cli(&args)?;

    let input = match &args.input {
        Some(path) => {
            info!("Loading input image from {:?}", path);
            imaging::load(path)?
        }
        None => {
            let dims = settings.generated_dimensions;
            info!(
                height = dims.height,
                width = dims.width,
                "No input given; generating a random image."
            );
            imaging::random(dims, settings.annealing.seed)
        }
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Annealing a {}x{} image for {} iteration(s) on {} lane(s)...",
        input.dimensions.height,
        input.dimensions.width,
        settings.annealing.iterations,
        settings.annealing.engine.lanes
    );
    info!("Invoking the core annealing workflow...");

    let outcome = workflows::anneal::run(
        &input.pixels,
        input.dimensions,
        &settings.annealing,
        &reporter,
    )?;

    let output = RgbImage {
        dimensions: outcome.result.dimensions,
        pixels: outcome.result.pixels,
    };
    imaging::save_png(&args.output, &output)?;

    println!(
        "✓ Energy {} -> {} after {} accepted swap(s). Written to: {}",
        outcome.initial_energy,
        outcome.result.total_energy,
        outcome.result.swap_count,
        args.output.display()
    );
    Ok(())
}
