//! # Engine Module
//!
//! The stateful layer of PIXANNEAL: it owns a working set and drives it through the
//! block-resident annealing pipeline.
//!
//! ## Overview
//!
//! A run is staged once into a fixed-capacity working set, iterated any number of times, and
//! drained once. Each iteration evaluates one candidate swap per lane, reduces the lanes to the
//! most improving move, and applies the Metropolis criterion to that single move. The host owns
//! all randomness; the engine is deterministic given its inputs.
//!
//! ## Architecture
//!
//! - **Run Object** ([`run`]) - `AnnealingRun`, the `load` / `run_iteration` / `export` lifecycle
//! - **Candidates** ([`candidate`]) - Per-lane candidate pairs, iteration inputs, and move decisions
//! - **Configuration** ([`config`]) - Lane count, tiling, backend selection, and schedules
//! - **State Tracking** ([`state`]) - The working set, running energy, and swap counter
//! - **Phase Tasks** ([`tasks`]) - Load, evaluate, reduce, accept, and export
//! - **Progress Monitoring** ([`progress`]) - Progress reporting for host drivers
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! ## Execution Model
//!
//! - Every phase is a fork-join region; it returns only after all of its workers finish.
//! - `Backend::Sequential` is the reference execution and always available.
//! - `Backend::Parallel` distributes lanes and tiles over the rayon pool when the `parallel`
//!   feature is enabled, and must produce results identical to the sequential backend.

pub mod candidate;
pub mod config;
pub mod error;
pub mod progress;
pub mod run;
pub mod state;
pub mod tasks;
pub(crate) mod utils;
