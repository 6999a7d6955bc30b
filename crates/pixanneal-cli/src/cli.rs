use clap::{Args, Parser, Subcommand};
use pixanneal::engine::config::Backend;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "PIXANNEAL CLI - Reorders the pixels of an image by lane-parallel simulated annealing so that neighboring pixels become similar in color.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for the parallel backend.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anneal an image (or a randomly generated one) and write the result as PNG.
    Run(RunArgs),
    /// Print the neighbor-difference energy of an image.
    Energy(EnergyArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    // --- Input / Output ---
    /// Path to the input image. A random image is generated when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path for the annealed PNG image.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Generated Image ---
    /// Height of the generated image when no input is given.
    #[arg(long, value_name = "INT")]
    pub height: Option<usize>,

    /// Width of the generated image when no input is given.
    #[arg(long, value_name = "INT")]
    pub width: Option<usize>,

    // --- Annealing Overrides ---
    /// Override the initial temperature.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub initial_temperature: Option<f64>,

    /// Override the number of iterations.
    #[arg(short = 'n', long, value_name = "INT")]
    pub iterations: Option<u64>,

    /// Seed for the candidate sampler and the generated image.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    // --- Engine Overrides ---
    /// Override the number of lanes evaluated per iteration.
    #[arg(long, value_name = "INT")]
    pub lanes: Option<usize>,

    /// Override the execution backend.
    #[arg(long, value_name = "sequential|parallel")]
    pub backend: Option<Backend>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S annealing.iterations=5000
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug)]
pub struct EnergyArgs {
    /// Path to the image to measure.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}
