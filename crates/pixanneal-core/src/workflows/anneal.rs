use crate::core::image::Dimensions;
use crate::engine::candidate::{Candidate, IterationInput};
use crate::engine::config::AnnealingConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::run::AnnealingRun;
use crate::engine::tasks::export::RunResult;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, instrument};

const PROGRESS_BATCH: u64 = 4096;
const STATUS_INTERVAL: u64 = 65_536;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingResult {
    pub initial_energy: i64,
    pub result: RunResult,
    pub iterations: u64,
}

/// Draws one candidate pair per lane.
///
/// The first index is drawn from rows `[0, height - 1)` and columns `[0, width - 1)` so that both
/// the `+1` and the `+width` partner stay inside the image. Strips of height or width one still
/// draw from a single row or column; lanes whose partner falls outside are rejected by the engine.
#[derive(Debug, Clone, Copy)]
struct CandidateSampler {
    dims: Dimensions,
    lanes: usize,
}

impl CandidateSampler {
    fn new(dims: Dimensions, lanes: usize) -> Self {
        Self { dims, lanes }
    }

    fn sample(&self, rng: &mut impl Rng) -> Vec<Candidate> {
        let rows = (self.dims.height - 1).max(1);
        let cols = (self.dims.width - 1).max(1);
        (0..self.lanes)
            .map(|_| {
                let row = rng.gen_range(0..rows);
                let col = rng.gen_range(0..cols);
                let random = (row * self.dims.width + col) as i64;
                if rng.gen_bool(0.5) {
                    Candidate::horizontal(random)
                } else {
                    Candidate::vertical(random, self.dims.width)
                }
            })
            .collect()
    }
}

#[instrument(skip_all, name = "annealing_workflow", fields(height = dims.height, width = dims.width))]
pub fn run(
    image: &[u8],
    dims: Dimensions,
    config: &AnnealingConfig,
    reporter: &ProgressReporter,
) -> Result<AnnealingResult, EngineError> {
    // === Phase 1: Load ===
    reporter.report(Progress::PhaseStart { name: "Loading" });
    let mut run = AnnealingRun::new(config.engine.clone());
    let initial_energy = run.load(image, dims)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Anneal ===
    anneal(&mut run, dims, config, reporter)?;

    // === Phase 3: Export ===
    reporter.report(Progress::PhaseStart { name: "Exporting" });
    let result = run.export()?;
    reporter.report(Progress::PhaseFinish);

    info!(
        initial_energy,
        final_energy = result.total_energy,
        swaps = result.swap_count,
        "Annealing complete."
    );
    Ok(AnnealingResult {
        initial_energy,
        result,
        iterations: run.iterations(),
    })
}

fn anneal(
    run: &mut AnnealingRun,
    dims: Dimensions,
    config: &AnnealingConfig,
    reporter: &ProgressReporter,
) -> Result<(), EngineError> {
    reporter.report(Progress::PhaseStart { name: "Annealing" });
    info!(
        iterations = config.iterations,
        initial_temperature = config.initial_temperature,
        lanes = config.engine.lanes,
        "Starting simulated annealing."
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sampler = CandidateSampler::new(dims, config.engine.lanes);

    reporter.report(Progress::TaskStart {
        total_steps: config.iterations,
    });
    let mut pending = 0;
    let mut last = run
        .working_set()
        .map(|ws| (ws.total_energy(), ws.swap_count()))
        .unwrap_or_default();
    for step in 0..config.iterations {
        let temperature =
            config
                .schedule
                .temperature_at(config.initial_temperature, step, config.iterations);
        let candidates = sampler.sample(&mut rng);
        let input = IterationInput::from_candidates(candidates, temperature, rng.r#gen());
        let outcome = run.run_iteration(&input)?;
        last = (outcome.total_energy, outcome.swap_count);

        pending += 1;
        if pending == PROGRESS_BATCH {
            reporter.report(Progress::TaskIncrement { steps: pending });
            pending = 0;
        }
        if step % STATUS_INTERVAL == 0 {
            reporter.report(Progress::StatusUpdate {
                text: format!("T = {:.3}, E = {}", temperature, outcome.total_energy),
            });
            debug!(
                step,
                temperature,
                energy = outcome.total_energy,
                swaps = outcome.swap_count,
                "Annealing status."
            );
        }
    }
    if pending > 0 {
        reporter.report(Progress::TaskIncrement { steps: pending });
    }
    reporter.report(Progress::TaskFinish);

    let (energy, swaps) = last;
    reporter.report(Progress::Message(format!(
        "Final energy {} after {} accepted swap(s).",
        energy, swaps
    )));
    reporter.report(Progress::PhaseFinish);
    Ok(())
}
