use crate::engine::candidate::MoveDecision;
use crate::engine::state::WorkingSet;
use tracing::trace;

/// Metropolis criterion in base two: improving moves always pass, others pass when
/// `probability < 2^(-delta / temperature)`.
///
/// A non-positive temperature degrades to greedy acceptance (`delta < 0` only) instead of
/// evaluating `0 / 0`.
pub fn should_accept(delta: i64, temperature: f64, probability: f64) -> bool {
    if delta < 0 {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    probability < (-(delta as f64) / temperature).exp2()
}

/// Decides the reduced move and, on acceptance, swaps the pair and books the delta.
/// Returns whether the move was accepted.
pub fn run(
    working_set: &mut WorkingSet,
    decision: &MoveDecision,
    temperature: f64,
    probability: f64,
) -> bool {
    let accepted = should_accept(decision.delta, temperature, probability);
    if accepted {
        working_set.apply_swap(decision.pair.first, decision.pair.second, decision.delta);
    }
    trace!(
        delta = decision.delta,
        temperature, probability, accepted, "Move decided."
    );
    accepted
}
