use super::evaluate::LaneDelta;
use crate::engine::candidate::MoveDecision;

/// Linear scan for the most improving lane. Ties keep the earliest lane; invalid lanes are
/// skipped. Returns `None` when no lane holds a valid candidate.
pub fn run(lane_deltas: &[LaneDelta]) -> Option<MoveDecision> {
    let mut best: Option<MoveDecision> = None;

    for (lane, result) in lane_deltas.iter().enumerate() {
        let LaneDelta::Evaluated { pair, delta } = *result else {
            continue;
        };
        if best.is_none_or(|current| delta < current.delta) {
            best = Some(MoveDecision { lane, pair, delta });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::candidate::{Orientation, SwapPair};

    fn evaluated(first: usize, delta: i64) -> LaneDelta {
        LaneDelta::Evaluated {
            pair: SwapPair {
                first,
                second: first + 1,
                orientation: Orientation::Horizontal,
            },
            delta,
        }
    }

    #[test]
    fn run_selects_the_minimum_delta() {
        let lanes = [evaluated(0, 5), evaluated(2, -3), evaluated(4, 1)];
        let decision = run(&lanes).unwrap();
        assert_eq!(decision.lane, 1);
        assert_eq!(decision.delta, -3);
        assert_eq!(decision.pair.first, 2);
    }

    #[test]
    fn run_keeps_first_lane_on_ties() {
        let lanes = [evaluated(0, 4), evaluated(2, -1), evaluated(4, -1)];
        assert_eq!(run(&lanes).unwrap().lane, 1);
    }

    #[test]
    fn run_skips_invalid_lanes() {
        let lanes = [LaneDelta::Invalid, evaluated(6, 9), LaneDelta::Invalid];
        let decision = run(&lanes).unwrap();
        assert_eq!(decision.lane, 1);
        assert_eq!(decision.delta, 9);
    }

    #[test]
    fn run_returns_none_when_every_lane_is_invalid() {
        assert_eq!(run(&[LaneDelta::Invalid, LaneDelta::Invalid]), None);
        assert_eq!(run(&[]), None);
    }

    #[test]
    fn run_accepts_large_positive_deltas_as_best_when_alone() {
        let decision = run(&[evaluated(0, i64::MAX)]).unwrap();
        assert_eq!(decision.delta, i64::MAX);
    }
}
