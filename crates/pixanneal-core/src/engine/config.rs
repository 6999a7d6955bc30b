use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Candidate lanes evaluated per iteration.
pub const DEFAULT_LANES: usize = 8;
/// Pixels staged per loader/exporter tile.
pub const DEFAULT_TILE_SIZE: usize = 1024;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// How the parallel region of each phase is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Every lane runs in turn on the calling thread. Serves as the reference oracle.
    Sequential,
    /// Lanes run on the rayon pool; each phase joins before the next starts.
    /// Without the `parallel` feature this behaves like `Sequential`.
    Parallel,
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            Backend::Parallel
        } else {
            Backend::Sequential
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Sequential => write!(f, "sequential"),
            Backend::Parallel => write!(f, "parallel"),
        }
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" | "serial" => Ok(Backend::Sequential),
            "parallel" => Ok(Backend::Parallel),
            other => Err(ConfigError::InvalidParameter {
                name: "backend",
                reason: format!("unknown backend '{other}', expected 'sequential' or 'parallel'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub lanes: usize,
    pub tile_size: usize,
    pub backend: Backend,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lanes: DEFAULT_LANES,
            tile_size: DEFAULT_TILE_SIZE,
            backend: Backend::default(),
        }
    }
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    lanes: Option<usize>,
    tile_size: Option<usize>,
    backend: Option<Backend>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lanes(mut self, lanes: usize) -> Self {
        self.lanes = Some(lanes);
        self
    }
    pub fn tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = Some(tile_size);
        self
    }
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let lanes = self.lanes.ok_or(ConfigError::MissingParameter("lanes"))?;
        if lanes == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "lanes",
                reason: "at least one lane is required".to_string(),
            });
        }
        let tile_size = self.tile_size.unwrap_or(DEFAULT_TILE_SIZE);
        if tile_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "tile_size",
                reason: "tiles must hold at least one pixel".to_string(),
            });
        }
        Ok(EngineConfig {
            lanes,
            tile_size,
            backend: self.backend.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TemperatureSchedule {
    /// `T0 * (1 - step / iterations)`.
    #[default]
    Linear,
    /// `T0 * cooling_rate^step`.
    Geometric { cooling_rate: f64 },
}

impl TemperatureSchedule {
    pub fn temperature_at(&self, initial: f64, step: u64, iterations: u64) -> f64 {
        match *self {
            TemperatureSchedule::Linear => {
                if iterations == 0 {
                    initial
                } else {
                    initial * (1.0 - step as f64 / iterations as f64)
                }
            }
            TemperatureSchedule::Geometric { cooling_rate } => {
                initial * cooling_rate.powf(step as f64)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingConfig {
    pub initial_temperature: f64,
    pub iterations: u64,
    pub schedule: TemperatureSchedule,
    pub seed: Option<u64>,
    pub engine: EngineConfig,
}

#[derive(Default)]
pub struct AnnealingConfigBuilder {
    initial_temperature: Option<f64>,
    iterations: Option<u64>,
    schedule: Option<TemperatureSchedule>,
    seed: Option<u64>,
    engine: Option<EngineConfig>,
}

impl AnnealingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = Some(temperature);
        self
    }
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.iterations = Some(iterations);
        self
    }
    pub fn schedule(mut self, schedule: TemperatureSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
    pub fn engine(mut self, engine: EngineConfig) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn build(self) -> Result<AnnealingConfig, ConfigError> {
        let initial_temperature = self
            .initial_temperature
            .ok_or(ConfigError::MissingParameter("initial_temperature"))?;
        if !initial_temperature.is_finite() || initial_temperature < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "initial_temperature",
                reason: format!("must be finite and non-negative, got {initial_temperature}"),
            });
        }

        let schedule = self.schedule.unwrap_or_default();
        if let TemperatureSchedule::Geometric { cooling_rate } = schedule {
            if !(cooling_rate > 0.0 && cooling_rate <= 1.0) {
                return Err(ConfigError::InvalidParameter {
                    name: "cooling_rate",
                    reason: format!("must lie in (0, 1], got {cooling_rate}"),
                });
            }
        }

        Ok(AnnealingConfig {
            initial_temperature,
            iterations: self
                .iterations
                .ok_or(ConfigError::MissingParameter("iterations"))?,
            schedule,
            seed: self.seed,
            engine: self.engine.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_builder_requires_lanes() {
        let result = EngineConfigBuilder::new().tile_size(64).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("lanes")));
    }

    #[test]
    fn engine_builder_applies_defaults_for_optional_fields() {
        let config = EngineConfigBuilder::new().lanes(4).build().unwrap();
        assert_eq!(config.lanes, 4);
        assert_eq!(config.tile_size, DEFAULT_TILE_SIZE);
        assert_eq!(config.backend, Backend::default());
    }

    #[test]
    fn engine_builder_rejects_zero_lanes_and_zero_tiles() {
        assert!(matches!(
            EngineConfigBuilder::new().lanes(0).build(),
            Err(ConfigError::InvalidParameter { name: "lanes", .. })
        ));
        assert!(matches!(
            EngineConfigBuilder::new().lanes(1).tile_size(0).build(),
            Err(ConfigError::InvalidParameter {
                name: "tile_size",
                ..
            })
        ));
    }

    #[test]
    fn backend_parses_case_insensitively_and_rejects_unknown_names() {
        assert_eq!("Sequential".parse::<Backend>(), Ok(Backend::Sequential));
        assert_eq!("parallel".parse::<Backend>(), Ok(Backend::Parallel));
        assert!("gpu".parse::<Backend>().is_err());
    }

    #[test]
    fn linear_schedule_decreases_to_zero_at_the_end() {
        let schedule = TemperatureSchedule::Linear;
        assert_eq!(schedule.temperature_at(100.0, 0, 10), 100.0);
        assert!((schedule.temperature_at(100.0, 5, 10) - 50.0).abs() < 1e-12);
        assert!((schedule.temperature_at(100.0, 9, 10) - 10.0).abs() < 1e-12);
        assert_eq!(schedule.temperature_at(100.0, 10, 10), 0.0);
    }

    #[test]
    fn geometric_schedule_multiplies_by_cooling_rate_each_step() {
        let schedule = TemperatureSchedule::Geometric { cooling_rate: 0.5 };
        assert_eq!(schedule.temperature_at(8.0, 0, 100), 8.0);
        assert_eq!(schedule.temperature_at(8.0, 3, 100), 1.0);
    }

    #[test]
    fn annealing_builder_requires_temperature_and_iterations() {
        assert_eq!(
            AnnealingConfigBuilder::new().iterations(10).build(),
            Err(ConfigError::MissingParameter("initial_temperature"))
        );
        assert_eq!(
            AnnealingConfigBuilder::new()
                .initial_temperature(1.0)
                .build(),
            Err(ConfigError::MissingParameter("iterations"))
        );
    }

    #[test]
    fn annealing_builder_rejects_out_of_range_cooling_rate() {
        let result = AnnealingConfigBuilder::new()
            .initial_temperature(10.0)
            .iterations(5)
            .schedule(TemperatureSchedule::Geometric { cooling_rate: 1.5 })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "cooling_rate",
                ..
            })
        ));
    }

    #[test]
    fn annealing_builder_rejects_non_finite_temperature() {
        let result = AnnealingConfigBuilder::new()
            .initial_temperature(f64::NAN)
            .iterations(5)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "initial_temperature",
                ..
            })
        ));
    }
}
