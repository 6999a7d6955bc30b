//! The neighbor-difference energy functional.
//!
//! Every function here is pure. Positions passed in must lie inside the image; callers are
//! responsible for rejecting malformed indices before reaching this module.

use super::image::{Dimensions, PixelArena, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];
}

/// Sum of absolute channel differences between two pixels.
#[inline]
pub fn pixel_distance(a: Rgb, b: Rgb) -> i64 {
    i64::from(a.r.abs_diff(b.r)) + i64::from(a.g.abs_diff(b.g)) + i64::from(a.b.abs_diff(b.b))
}

/// The neighbor of `x` in `direction`, if it exists without wrapping across an edge.
#[inline]
pub fn neighbor(dims: Dimensions, x: usize, direction: Direction) -> Option<usize> {
    let (row, col) = (dims.row(x), dims.col(x));
    match direction {
        Direction::Right => (col + 1 < dims.width).then(|| x + 1),
        Direction::Left => (col >= 1).then(|| x - 1),
        Direction::Down => (row + 1 < dims.height).then(|| x + dims.width),
        Direction::Up => (row >= 1).then(|| x - dims.width),
    }
}

pub fn neighbors(dims: Dimensions, x: usize) -> impl Iterator<Item = usize> {
    Direction::ALL
        .into_iter()
        .filter_map(move |direction| neighbor(dims, x, direction))
}

pub fn pixel_energy(pixels: &PixelArena, dims: Dimensions, x: usize) -> i64 {
    let own = pixels.get(x);
    neighbors(dims, x)
        .map(|n| pixel_distance(own, pixels.get(n)))
        .sum()
}

/// Change of `pixel_energy(x)` if the pixels at `i1` and `i2` were exchanged.
///
/// Only the relations of `x` that touch `i1` or `i2` are evaluated; the others cannot change.
/// Summed over every position adjacent to (or equal to) `i1` or `i2`, the result is the exact
/// change of [`total_energy`].
pub fn swap_delta(pixels: &PixelArena, dims: Dimensions, x: usize, i1: usize, i2: usize) -> i64 {
    let source = |p: usize| {
        if p == i1 {
            i2
        } else if p == i2 {
            i1
        } else {
            p
        }
    };

    let x_source = source(x);
    let (old_own, new_own) = (pixels.get(x), pixels.get(x_source));

    neighbors(dims, x)
        .filter(|&n| x_source != x || source(n) != n)
        .map(|n| {
            pixel_distance(new_own, pixels.get(source(n))) - pixel_distance(old_own, pixels.get(n))
        })
        .sum()
}

/// Brute-force energy of the whole image: `pixel_energy` summed over every position.
pub fn total_energy(pixels: &PixelArena, dims: Dimensions) -> i64 {
    (0..dims.pixel_count())
        .map(|x| pixel_energy(pixels, dims, x))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn random_arena(rng: &mut StdRng, dims: Dimensions) -> PixelArena {
        let pixels: Vec<Rgb> = (0..dims.pixel_count())
            .map(|_| Rgb::new(rng.r#gen(), rng.r#gen(), rng.r#gen()))
            .collect();
        PixelArena::from_pixels(&pixels)
    }

    #[test]
    fn pixel_distance_is_symmetric_and_sums_channels() {
        let a = Rgb::new(10, 200, 0);
        let b = Rgb::new(20, 100, 255);
        assert_eq!(pixel_distance(a, b), 10 + 100 + 255);
        assert_eq!(pixel_distance(a, b), pixel_distance(b, a));
        assert_eq!(pixel_distance(a, a), 0);
    }

    #[test]
    fn last_column_has_no_right_neighbor_and_last_row_no_down_neighbor() {
        let dims = Dimensions::new(3, 4);
        assert_eq!(neighbor(dims, 3, Direction::Right), None);
        assert_eq!(neighbor(dims, 4, Direction::Left), None);
        assert_eq!(neighbor(dims, 9, Direction::Down), None);
        assert_eq!(neighbor(dims, 1, Direction::Up), None);
        assert_eq!(neighbor(dims, 5, Direction::Right), Some(6));
        assert_eq!(neighbor(dims, 5, Direction::Down), Some(9));
    }

    #[test]
    fn same_row_test_uses_width_on_non_square_images() {
        // On a 2x5 image the last column is col 4; a height-based test would misplace it.
        let dims = Dimensions::new(2, 5);
        assert_eq!(neighbor(dims, 1, Direction::Right), Some(2));
        assert_eq!(neighbor(dims, 4, Direction::Right), None);
        assert_eq!(neighbor(dims, 5, Direction::Left), None);
        assert_eq!(neighbors(dims, 2).count(), 3);
    }

    #[test]
    fn corner_edge_and_interior_pixels_have_two_three_and_four_neighbors() {
        let dims = Dimensions::new(4, 5);
        for (row, col) in iproduct!(0..dims.height, 0..dims.width) {
            let on_row_edge = row == 0 || row == dims.height - 1;
            let on_col_edge = col == 0 || col == dims.width - 1;
            let expected = match (on_row_edge, on_col_edge) {
                (true, true) => 2,
                (true, false) | (false, true) => 3,
                (false, false) => 4,
            };
            assert_eq!(
                neighbors(dims, row * dims.width + col).count(),
                expected,
                "row {row}, col {col}"
            );
        }
    }

    #[test]
    fn corner_pixel_energy_sums_exactly_two_distances() {
        let dims = Dimensions::new(2, 2);
        let arena = PixelArena::from_pixels(&[
            Rgb::gray(0),
            Rgb::gray(10),
            Rgb::gray(20),
            Rgb::gray(30),
        ]);
        // Gray pixels differ equally in all three channels.
        assert_eq!(pixel_energy(&arena, dims, 0), 3 * (10 + 20));
        assert_eq!(pixel_energy(&arena, dims, 3), 3 * (20 + 10));
    }

    #[test]
    fn two_by_two_scenario_total_energy_counts_each_edge_from_both_sides() {
        let dims = Dimensions::new(2, 2);
        let arena = PixelArena::from_pixels(&[
            Rgb::gray(0),
            Rgb::gray(10),
            Rgb::gray(20),
            Rgb::gray(30),
        ]);
        // Edges: 0-1 = 30, 2-3 = 30, 0-2 = 60, 1-3 = 60.
        assert_eq!(total_energy(&arena, dims), 2 * (30 + 30 + 60 + 60));
    }

    #[test]
    fn single_pixel_image_has_zero_energy() {
        let dims = Dimensions::new(1, 1);
        let arena = PixelArena::from_pixels(&[Rgb::new(1, 2, 3)]);
        assert_eq!(total_energy(&arena, dims), 0);
    }

    #[test]
    fn swap_delta_matches_recomputed_pixel_energy_for_every_position() {
        let mut rng = StdRng::seed_from_u64(7);
        let dims = Dimensions::new(5, 6);
        let arena = random_arena(&mut rng, dims);

        for _ in 0..50 {
            let i1 = rng.gen_range(0..dims.pixel_count());
            let i2 = rng.gen_range(0..dims.pixel_count());
            let mut swapped = arena.clone();
            swapped.swap(i1, i2);

            for x in 0..dims.pixel_count() {
                let expected = pixel_energy(&swapped, dims, x) - pixel_energy(&arena, dims, x);
                assert_eq!(swap_delta(&arena, dims, x, i1, i2), expected, "x={x} i1={i1} i2={i2}");
            }
        }
    }

    #[test]
    fn swap_delta_is_zero_for_identical_pixels() {
        let dims = Dimensions::new(2, 2);
        let arena = PixelArena::from_pixels(&[
            Rgb::gray(5),
            Rgb::gray(5),
            Rgb::gray(90),
            Rgb::gray(40),
        ]);
        for x in 0..dims.pixel_count() {
            assert_eq!(swap_delta(&arena, dims, x, 0, 1), 0);
        }
    }
}
