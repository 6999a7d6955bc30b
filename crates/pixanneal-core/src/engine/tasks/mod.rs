//! The phases of an annealing run.
//!
//! Each submodule implements one phase of the block-resident pipeline. `load` and `export`
//! bracket a run; `evaluate`, `reduce`, and `accept` make up a single iteration, in that order.
//! Phases never overlap: a phase returns only after its parallel region has completed.

pub mod accept;
pub mod evaluate;
pub mod export;
pub mod load;
pub mod reduce;
