//! # Workflows Module
//!
//! High-level drivers that run a complete annealing job on top of the engine.
//!
//! ## Overview
//!
//! The engine only evaluates what it is given. Workflows play the role of the host: they own
//! the random number generator, draw the per-lane candidates and the acceptance sample for each
//! iteration, compute the temperature from a schedule, and report progress while doing so.
//!
//! ## Architecture
//!
//! - **Annealing Workflow** ([`anneal`]) - Load, iterate under a cooling schedule, and export

pub mod anneal;
