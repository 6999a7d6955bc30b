//! Backend dispatch for the parallel region of a phase.
//!
//! Each helper runs one region to completion before returning, so a call boundary acts as the
//! barrier between phases regardless of backend.

use crate::engine::config::Backend;
use std::sync::atomic::{AtomicI64, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs `f` once per slot in `0..len` and gathers the results in slot order.
pub(crate) fn map_slots<T, F>(backend: Backend, len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    match backend {
        #[cfg(feature = "parallel")]
        Backend::Parallel => (0..len).into_par_iter().map(f).collect(),
        _ => (0..len).map(f).collect(),
    }
}

/// Sums `f` over `0..len` through a single atomic accumulator. Contribution order is unspecified.
pub(crate) fn atomic_sum<F>(backend: Backend, len: usize, f: F) -> i64
where
    F: Fn(usize) -> i64 + Sync + Send,
{
    let accumulator = AtomicI64::new(0);
    let contribute = |slot: usize| {
        accumulator.fetch_add(f(slot), Ordering::Relaxed);
    };

    match backend {
        #[cfg(feature = "parallel")]
        Backend::Parallel => (0..len).into_par_iter().for_each(contribute),
        _ => (0..len).for_each(contribute),
    }

    accumulator.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_slots_preserves_slot_order_on_both_backends() {
        for backend in [Backend::Sequential, Backend::Parallel] {
            let squares = map_slots(backend, 100, |i| i * i);
            assert_eq!(squares, (0..100).map(|i| i * i).collect::<Vec<_>>());
        }
    }

    #[test]
    fn atomic_sum_matches_serial_sum_on_both_backends() {
        for backend in [Backend::Sequential, Backend::Parallel] {
            let total = atomic_sum(backend, 1000, |i| i as i64 - 300);
            assert_eq!(total, (0..1000).map(|i| i as i64 - 300).sum::<i64>());
        }
    }

    #[test]
    fn empty_regions_produce_empty_results() {
        assert!(map_slots(Backend::Parallel, 0, |i| i).is_empty());
        assert_eq!(atomic_sum(Backend::Parallel, 0, |_| 1), 0);
    }
}
