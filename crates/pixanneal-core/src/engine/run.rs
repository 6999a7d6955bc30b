use super::candidate::{IterationInput, MoveDecision};
use super::config::EngineConfig;
use super::error::EngineError;
use super::state::{RunPhase, WorkingSet};
use super::tasks::{self, export::RunResult};
use crate::core::image::Dimensions;
use tracing::{debug, info, instrument};

/// What one iteration decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationOutcome {
    /// The reduced best move, or `None` when no lane proposed a valid swap.
    pub decision: Option<MoveDecision>,
    pub accepted: bool,
    pub total_energy: i64,
    pub swap_count: u64,
}

/// Owns one working set for the lifetime of a run and drives it through
/// `Uninitialized -> Loaded -> Exported`.
///
/// Iterations are strictly sequential: `run_iteration` takes `&mut self`, so the previous swap and
/// counter update are complete before the next evaluation reads the working set.
#[derive(Debug)]
pub struct AnnealingRun {
    config: EngineConfig,
    phase: RunPhase,
    working_set: Option<WorkingSet>,
    iterations: u64,
}

impl AnnealingRun {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            phase: RunPhase::Uninitialized,
            working_set: None,
            iterations: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn working_set(&self) -> Option<&WorkingSet> {
        self.working_set.as_ref()
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Stages `buffer` into a fresh working set and returns the initial total energy.
    #[instrument(skip_all, name = "load_working_set", fields(height = dims.height, width = dims.width))]
    pub fn load(&mut self, buffer: &[u8], dims: Dimensions) -> Result<i64, EngineError> {
        self.expect_phase(RunPhase::Uninitialized, "load")?;

        let mut working_set = WorkingSet::new(dims)?;
        let energy = tasks::load::run(
            &mut working_set,
            buffer,
            self.config.tile_size,
            self.config.backend,
        )?;

        self.working_set = Some(working_set);
        self.phase = RunPhase::Loaded;
        info!(initial_energy = energy, lanes = self.config.lanes, backend = %self.config.backend, "Run loaded.");
        Ok(energy)
    }

    /// Evaluates every lane, reduces to the best move, and decides it.
    pub fn run_iteration(&mut self, input: &IterationInput) -> Result<IterationOutcome, EngineError> {
        self.expect_phase(RunPhase::Loaded, "run_iteration")?;
        input.check(self.config.lanes)?;

        let backend = self.config.backend;
        let working_set = self.loaded_mut("run_iteration")?;

        let lane_deltas = tasks::evaluate::run(working_set, &input.candidates, backend);
        let decision = tasks::reduce::run(&lane_deltas);
        let accepted = match &decision {
            Some(best) => tasks::accept::run(working_set, best, input.temperature, input.probability),
            None => false,
        };

        let outcome = IterationOutcome {
            decision,
            accepted,
            total_energy: working_set.total_energy(),
            swap_count: working_set.swap_count(),
        };
        self.iterations += 1;
        Ok(outcome)
    }

    /// Drains the working set. Allowed exactly once, after loading.
    #[instrument(skip_all, name = "export_working_set")]
    pub fn export(&mut self) -> Result<RunResult, EngineError> {
        self.expect_phase(RunPhase::Loaded, "export")?;
        let working_set = self.loaded("export")?;

        let result = tasks::export::run(working_set, self.config.tile_size, self.config.backend);
        self.phase = RunPhase::Exported;
        debug!(iterations = self.iterations, "Run exported.");
        Ok(result)
    }

    fn expect_phase(&self, expected: RunPhase, operation: &'static str) -> Result<(), EngineError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn loaded(&self, operation: &'static str) -> Result<&WorkingSet, EngineError> {
        self.working_set.as_ref().ok_or(EngineError::InvalidPhase {
            operation,
            phase: self.phase,
        })
    }

    fn loaded_mut(&mut self, operation: &'static str) -> Result<&mut WorkingSet, EngineError> {
        let phase = self.phase;
        self.working_set
            .as_mut()
            .ok_or(EngineError::InvalidPhase { operation, phase })
    }
}
