use super::error::EngineError;
use crate::core::image::Dimensions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// `changed_index == random_index + 1`, same row.
    Horizontal,
    /// `changed_index == random_index + width`, same column.
    Vertical,
}

/// A swap proposed by the host for one lane. Indices are signed so malformed input survives
/// until validation instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub random_index: i64,
    pub changed_index: i64,
}

/// A candidate whose positions have been checked against the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapPair {
    pub first: usize,
    pub second: usize,
    pub orientation: Orientation,
}

impl Candidate {
    pub fn new(random_index: i64, changed_index: i64) -> Self {
        Self {
            random_index,
            changed_index,
        }
    }

    pub fn horizontal(random_index: i64) -> Self {
        Self::new(random_index, random_index + 1)
    }

    pub fn vertical(random_index: i64, width: usize) -> Self {
        Self::new(random_index, random_index + width as i64)
    }

    /// Resolves the candidate to a pair of adjacent positions, or `None` when either index lies
    /// outside the image, the pair is not `+1`/`+width` apart, or a `+1` pair wraps a row.
    pub fn validate(&self, dims: Dimensions) -> Option<SwapPair> {
        let first = dims.position(self.random_index)?;
        let second = dims.position(self.changed_index)?;

        let orientation = if second == first + 1 && dims.row(first) == dims.row(second) {
            Orientation::Horizontal
        } else if second == first + dims.width {
            Orientation::Vertical
        } else {
            return None;
        };

        Some(SwapPair {
            first,
            second,
            orientation,
        })
    }
}

/// Everything the host supplies for one iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationInput {
    pub candidates: Vec<Candidate>,
    pub temperature: f64,
    pub probability: f64,
}

impl IterationInput {
    /// Pairs up the host's two index arrays lane by lane.
    pub fn new(
        random_indices: &[i64],
        changed_indices: &[i64],
        temperature: f64,
        probability: f64,
    ) -> Result<Self, EngineError> {
        if random_indices.len() != changed_indices.len() {
            return Err(EngineError::CandidateArrayMismatch {
                random: random_indices.len(),
                changed: changed_indices.len(),
            });
        }
        let candidates = random_indices
            .iter()
            .zip(changed_indices)
            .map(|(&r, &c)| Candidate::new(r, c))
            .collect();
        Ok(Self::from_candidates(candidates, temperature, probability))
    }

    pub fn from_candidates(candidates: Vec<Candidate>, temperature: f64, probability: f64) -> Self {
        Self {
            candidates,
            temperature,
            probability,
        }
    }

    pub(crate) fn check(&self, lanes: usize) -> Result<(), EngineError> {
        if self.candidates.len() != lanes {
            return Err(EngineError::LaneCount {
                expected: lanes,
                actual: self.candidates.len(),
            });
        }
        if !self.temperature.is_finite() {
            return Err(EngineError::InvalidTemperature(self.temperature));
        }
        if !(0.0..1.0).contains(&self.probability) {
            return Err(EngineError::InvalidProbability(self.probability));
        }
        Ok(())
    }
}

/// The best move found by the reducer for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDecision {
    pub lane: usize,
    pub pair: SwapPair,
    pub delta: i64,
}
