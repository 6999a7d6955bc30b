use crate::core::energy::swap_delta;
use crate::core::image::Dimensions;
use crate::engine::candidate::{Candidate, Orientation, SwapPair};
use crate::engine::config::Backend;
use crate::engine::state::WorkingSet;
use crate::engine::utils::lanes;
use itertools::iproduct;
use tracing::{instrument, trace};

/// Cells covered by one lane: the swapped pair plus every position adjacent to either of them.
pub const SUB_LANES: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneDelta {
    /// The lane's candidate failed validation and takes no part in the reduction.
    Invalid,
    Evaluated { pair: SwapPair, delta: i64 },
}

#[derive(Debug, Clone, Copy)]
struct LanePlan {
    pair: SwapPair,
    cells: [Option<usize>; SUB_LANES],
}

/// Column/row offsets of a lane's window relative to the pair's first position, in sub-lane
/// order. A horizontal pair spans four columns and three rows; a vertical pair the transpose.
fn window(orientation: Orientation) -> impl Iterator<Item = (isize, isize)> {
    let (cols, rows) = match orientation {
        Orientation::Horizontal => (-1..=2, -1..=1),
        Orientation::Vertical => (-1..=1, -1..=2),
    };
    iproduct!(rows, cols).map(|(dy, dx)| (dx, dy))
}

/// Position of the window cell at `(dx, dy)`, if it lies inside the image and the column offset
/// stays on the row of `origin`.
fn cell_position(dims: Dimensions, origin: usize, (dx, dy): (isize, isize)) -> Option<usize> {
    let col = dims.col(origin).checked_add_signed(dx)?;
    if col >= dims.width {
        return None;
    }
    let row = dims.row(origin).checked_add_signed(dy)?;
    if row >= dims.height {
        return None;
    }
    Some(row * dims.width + col)
}

fn plan_lane(dims: Dimensions, candidate: &Candidate) -> Option<LanePlan> {
    let pair = candidate.validate(dims)?;
    let mut cells = [None; SUB_LANES];
    for (slot, offset) in cells.iter_mut().zip(window(pair.orientation)) {
        *slot = cell_position(dims, pair.first, offset);
    }
    Some(LanePlan { pair, cells })
}

/// Computes, for every lane, the total energy change its candidate swap would cause.
///
/// Phase one fans out over `lanes * SUB_LANES` slots, each evaluating one cell into its own slot.
/// Phase two reduces each lane's private row of slots into the lane delta. The working set is only
/// read.
#[instrument(level = "trace", skip_all, fields(lanes = candidates.len()))]
pub fn run(working_set: &WorkingSet, candidates: &[Candidate], backend: Backend) -> Vec<LaneDelta> {
    let dims = working_set.dimensions();
    let pixels = working_set.pixels();
    let plans: Vec<Option<LanePlan>> = candidates.iter().map(|c| plan_lane(dims, c)).collect();

    let cell_deltas = lanes::map_slots(backend, plans.len() * SUB_LANES, |slot| {
        let (lane, sub_lane) = (slot / SUB_LANES, slot % SUB_LANES);
        match plans[lane] {
            Some(LanePlan { pair, cells }) => cells[sub_lane]
                .map_or(0, |x| swap_delta(pixels, dims, x, pair.first, pair.second)),
            None => 0,
        }
    });

    lanes::map_slots(backend, plans.len(), |lane| match plans[lane] {
        Some(plan) => {
            let row = &cell_deltas[lane * SUB_LANES..(lane + 1) * SUB_LANES];
            let delta = row.iter().sum();
            trace!(lane, first = plan.pair.first, second = plan.pair.second, delta, "Lane evaluated.");
            LaneDelta::Evaluated {
                pair: plan.pair,
                delta,
            }
        }
        None => {
            trace!(lane, "Lane candidate rejected.");
            LaneDelta::Invalid
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::energy::total_energy;
    use crate::core::image::{MAX_PIXELS, PixelArena, Rgb};
    use crate::engine::tasks::load;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn random_working_set(rng: &mut StdRng, dims: Dimensions) -> WorkingSet {
        let buffer: Vec<u8> = (0..dims.buffer_len()).map(|_| rng.r#gen()).collect();
        let mut ws = WorkingSet::new(dims).unwrap();
        load::run(&mut ws, &buffer, 1024, Backend::Sequential).unwrap();
        ws
    }

    fn brute_force_delta(ws: &WorkingSet, pair: SwapPair) -> i64 {
        let dims = ws.dimensions();
        let mut swapped: PixelArena = ws.pixels().clone();
        swapped.swap(pair.first, pair.second);
        total_energy(&swapped, dims) - total_energy(ws.pixels(), dims)
    }

    #[test]
    fn window_covers_both_positions_and_all_their_neighbors() {
        let dims = Dimensions::new(6, 6);
        for candidate in [Candidate::horizontal(14), Candidate::vertical(14, 6)] {
            let plan = plan_lane(dims, &candidate).unwrap();
            let cells: HashSet<usize> = plan.cells.iter().flatten().copied().collect();
            assert_eq!(cells.len(), SUB_LANES);
            for p in [plan.pair.first, plan.pair.second] {
                assert!(cells.contains(&p));
                for n in crate::core::energy::neighbors(dims, p) {
                    assert!(cells.contains(&n), "neighbor {n} of {p} missing");
                }
            }
        }
    }

    #[test]
    fn cells_outside_the_image_or_row_are_dropped_at_corners() {
        let dims = Dimensions::new(3, 3);
        let plan = plan_lane(dims, &Candidate::horizontal(0)).unwrap();
        // Row -1 and column -1 fall outside; cols 0..=2 of rows 0..=1 survive.
        let cells: Vec<usize> = plan.cells.iter().flatten().copied().collect();
        assert_eq!(cells, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn lane_delta_equals_brute_force_energy_difference() {
        let mut rng = StdRng::seed_from_u64(42);
        for dims in [
            Dimensions::new(32, 32),
            Dimensions::new(4, 9),
            Dimensions::new(7, 2),
            Dimensions::new(1, 16),
            Dimensions::new(16, 1),
        ] {
            let ws = random_working_set(&mut rng, dims);
            let candidates: Vec<Candidate> = (0..64)
                .map(|_| {
                    let r = rng.gen_range(0..dims.pixel_count()) as i64;
                    if rng.gen_bool(0.5) {
                        Candidate::horizontal(r)
                    } else {
                        Candidate::vertical(r, dims.width)
                    }
                })
                .collect();

            for result in run(&ws, &candidates, Backend::Sequential) {
                if let LaneDelta::Evaluated { pair, delta } = result {
                    assert_eq!(delta, brute_force_delta(&ws, pair), "{dims:?} {pair:?}");
                }
            }
        }
    }

    #[test]
    fn invalid_candidates_are_marked_and_do_not_disturb_other_lanes() {
        let dims = Dimensions::new(2, 2);
        let mut ws = WorkingSet::new(dims).unwrap();
        load::run(
            &mut ws,
            &[0, 0, 0, 10, 10, 10, 20, 20, 20, 30, 30, 30],
            1024,
            Backend::Sequential,
        )
        .unwrap();

        let candidates = [
            Candidate::new(-5, -4),
            Candidate::horizontal(1),
            Candidate::new(3, 4),
            Candidate::horizontal(0),
        ];
        let results = run(&ws, &candidates, Backend::Sequential);

        assert_eq!(results[0], LaneDelta::Invalid);
        assert_eq!(results[1], LaneDelta::Invalid);
        assert_eq!(results[2], LaneDelta::Invalid);
        assert!(matches!(results[3], LaneDelta::Evaluated { .. }));
    }

    #[test]
    fn identical_pixels_produce_zero_delta() {
        let dims = Dimensions::new(2, 2);
        let mut ws = WorkingSet::new(dims).unwrap();
        load::run(
            &mut ws,
            &[7, 7, 7, 7, 7, 7, 1, 2, 3, 200, 100, 0],
            1024,
            Backend::Sequential,
        )
        .unwrap();
        let results = run(&ws, &[Candidate::horizontal(0)], Backend::Sequential);
        assert!(matches!(
            results[0],
            LaneDelta::Evaluated { delta: 0, .. }
        ));
    }

    #[test]
    fn parallel_backend_matches_sequential_oracle() {
        let mut rng = StdRng::seed_from_u64(9);
        let dims = Dimensions::new(32, 32);
        let ws = random_working_set(&mut rng, dims);
        let upper = MAX_PIXELS as i64;
        let mut candidates: Vec<Candidate> = (0..256)
            .map(|_| Candidate::new(rng.gen_range(-4..upper + 4), rng.gen_range(-4..upper + 40)))
            .collect();
        candidates.extend((0..256).map(|_| Candidate::horizontal(rng.gen_range(0..upper))));

        assert_eq!(
            run(&ws, &candidates, Backend::Sequential),
            run(&ws, &candidates, Backend::Parallel)
        );
    }

    #[test]
    fn single_gray_pixel_pair_keeps_rgb_channels_together() {
        let dims = Dimensions::new(1, 2);
        let mut ws = WorkingSet::new(dims).unwrap();
        load::run(&mut ws, &[1, 2, 3, 4, 5, 6], 1024, Backend::Sequential).unwrap();
        assert_eq!(ws.pixels().get(1), Rgb::new(4, 5, 6));
        // Swapping the only two pixels of a strip leaves their mutual distance unchanged.
        let results = run(&ws, &[Candidate::horizontal(0)], Backend::Sequential);
        assert!(matches!(results[0], LaneDelta::Evaluated { delta: 0, .. }));
    }
}
