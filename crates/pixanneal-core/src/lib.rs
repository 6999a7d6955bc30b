//! # PIXANNEAL Core Library
//!
//! A block-resident simulated annealing engine that reorders the pixels of a small RGB image so
//! that neighboring pixels become similar in color.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep concerns separate, making it
//! modular, testable, and easy to drive from different hosts.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Dimensions`, `Rgb`, `PixelArena`) and
//!   the pure energy functional, including the incremental swap delta.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer. `AnnealingRun` owns a working set and
//!   exposes the load, iterate, and export phases; each phase is implemented as a task over a
//!   sequential or rayon-backed backend.
//!
//! - **[`workflows`]: The Public API.** The highest-level entry point. It samples candidates and
//!   acceptance draws, follows a temperature schedule, and drives a complete run from an input
//!   buffer to the annealed image.

pub mod core;
pub mod engine;
pub mod workflows;
