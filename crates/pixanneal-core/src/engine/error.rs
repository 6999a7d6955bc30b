use thiserror::Error;

use super::config::ConfigError;
use super::state::RunPhase;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid image dimensions {height}x{width}: both must be non-zero")]
    InvalidDimensions { height: usize, width: usize },

    #[error(
        "Image of {height}x{width} pixels exceeds the working-set capacity of {capacity} pixels"
    )]
    CapacityExceeded {
        height: usize,
        width: usize,
        capacity: usize,
    },

    #[error("Pixel buffer holds {actual} bytes, expected {expected} for the declared dimensions")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Candidate arrays disagree: {random} random indices but {changed} changed indices")]
    CandidateArrayMismatch { random: usize, changed: usize },

    #[error("Iteration supplies {actual} candidates but the engine runs {expected} lanes")]
    LaneCount { expected: usize, actual: usize },

    #[error("Temperature must be a finite number, got {0}")]
    InvalidTemperature(f64),

    #[error("Probability sample must lie in [0, 1), got {0}")]
    InvalidProbability(f64),

    #[error("Operation '{operation}' is not allowed while the run is {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: RunPhase,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
