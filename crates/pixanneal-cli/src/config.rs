use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use pixanneal::core::image::Dimensions;
use pixanneal::engine::config::{
    self as core_config, AnnealingConfig, AnnealingConfigBuilder, Backend, EngineConfigBuilder,
    TemperatureSchedule,
};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 100.0;
pub const DEFAULT_ITERATIONS: u64 = 10_000_000;
pub const DEFAULT_IMAGE_SIDE: usize = 32;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum ScheduleKind {
    Linear,
    Geometric,
}

impl FromStr for ScheduleKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(ScheduleKind::Linear),
            "geometric" => Ok(ScheduleKind::Geometric),
            other => Err(CliError::Config(format!(
                "Unknown schedule '{}'. Expected 'linear' or 'geometric'.",
                other
            ))),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialAnnealingConfig {
    initial_temperature: Option<f64>,
    iterations: Option<u64>,
    seed: Option<u64>,
    schedule: Option<ScheduleKind>,
    cooling_rate: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialEngineConfig {
    lanes: Option<usize>,
    tile_size: Option<usize>,
    backend: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialImageConfig {
    height: Option<usize>,
    width: Option<usize>,
}

/// Everything a `run` needs once file, flags, and `--set` values are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub annealing: AnnealingConfig,
    /// Size of the random image generated when no input is given.
    pub generated_dimensions: Dimensions,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    annealing: Option<PartialAnnealingConfig>,
    engine: Option<PartialEngineConfig>,
    image: Option<PartialImageConfig>,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves the final settings. Precedence: `--set` values, then flags, then the file, then
    /// built-in defaults.
    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<RunSettings> {
        self.apply_cli_args(args);
        self.apply_set_values(&args.set_values)?;

        let annealing = self.annealing.take().unwrap_or_default();
        let engine = self.engine.take().unwrap_or_default();
        let image = self.image.take().unwrap_or_default();

        let backend = match engine.backend.as_deref() {
            Some(name) => Backend::from_str(name).map_err(|e| CliError::Config(e.to_string()))?,
            None => Backend::default(),
        };
        let engine_config = EngineConfigBuilder::new()
            .lanes(engine.lanes.unwrap_or(core_config::DEFAULT_LANES))
            .tile_size(engine.tile_size.unwrap_or(core_config::DEFAULT_TILE_SIZE))
            .backend(backend)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let schedule = Self::merge_schedule(annealing.schedule, annealing.cooling_rate)?;
        let annealing_config = AnnealingConfigBuilder::new()
            .initial_temperature(
                annealing
                    .initial_temperature
                    .unwrap_or(DEFAULT_INITIAL_TEMPERATURE),
            )
            .iterations(annealing.iterations.unwrap_or(DEFAULT_ITERATIONS))
            .schedule(schedule)
            .seed(annealing.seed)
            .engine(engine_config)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(RunSettings {
            annealing: annealing_config,
            generated_dimensions: Dimensions::new(
                image.height.unwrap_or(DEFAULT_IMAGE_SIDE),
                image.width.unwrap_or(DEFAULT_IMAGE_SIDE),
            ),
        })
    }

    fn merge_schedule(
        kind: Option<ScheduleKind>,
        cooling_rate: Option<f64>,
    ) -> Result<TemperatureSchedule> {
        match kind.unwrap_or(ScheduleKind::Linear) {
            ScheduleKind::Linear => Ok(TemperatureSchedule::Linear),
            ScheduleKind::Geometric => {
                let cooling_rate = cooling_rate.ok_or_else(|| {
                    CliError::Config("`geometric` schedule requires `cooling-rate`".to_string())
                })?;
                Ok(TemperatureSchedule::Geometric { cooling_rate })
            }
        }
    }

    fn apply_cli_args(&mut self, args: &RunArgs) {
        let annealing = self.annealing.get_or_insert_with(Default::default);
        if let Some(t) = args.initial_temperature {
            annealing.initial_temperature = Some(t);
        }
        if let Some(n) = args.iterations {
            annealing.iterations = Some(n);
        }
        if let Some(seed) = args.seed {
            annealing.seed = Some(seed);
        }

        let engine = self.engine.get_or_insert_with(Default::default);
        if let Some(lanes) = args.lanes {
            engine.lanes = Some(lanes);
        }
        if let Some(backend) = args.backend {
            engine.backend = Some(backend.to_string());
        }

        let image = self.image.get_or_insert_with(Default::default);
        if let Some(height) = args.height {
            image.height = Some(height);
        }
        if let Some(width) = args.width {
            image.width = Some(width);
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "annealing.initial-temperature" => {
                    self.annealing
                        .get_or_insert_with(Default::default)
                        .initial_temperature = Some(parse_value(key, value_str)?);
                }
                "annealing.iterations" => {
                    self.annealing
                        .get_or_insert_with(Default::default)
                        .iterations = Some(parse_value(key, value_str)?);
                }
                "annealing.seed" => {
                    self.annealing.get_or_insert_with(Default::default).seed =
                        Some(parse_value(key, value_str)?);
                }
                "annealing.schedule" => {
                    self.annealing.get_or_insert_with(Default::default).schedule =
                        Some(value_str.parse()?);
                }
                "annealing.cooling-rate" => {
                    self.annealing
                        .get_or_insert_with(Default::default)
                        .cooling_rate = Some(parse_value(key, value_str)?);
                }
                "engine.lanes" => {
                    self.engine.get_or_insert_with(Default::default).lanes =
                        Some(parse_value(key, value_str)?);
                }
                "engine.tile-size" => {
                    self.engine.get_or_insert_with(Default::default).tile_size =
                        Some(parse_value(key, value_str)?);
                }
                "engine.backend" => {
                    self.engine.get_or_insert_with(Default::default).backend =
                        Some(value_str.to_string());
                }
                "image.height" => {
                    self.image.get_or_insert_with(Default::default).height =
                        Some(parse_value(key, value_str)?);
                }
                "image.width" => {
                    self.image.get_or_insert_with(Default::default).width =
                        Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid {} value for {}: {}",
            std::any::type_name::<T>(),
            key,
            value
        ))
    })
}
