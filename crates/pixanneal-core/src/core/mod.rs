//! # Core Module
//!
//! Stateless building blocks shared by every other layer of PIXANNEAL.
//!
//! ## Overview
//!
//! The core module defines how an image is laid out in memory and how its energy is measured.
//! Nothing in here owns a run or mutates shared state; the engine borrows these types and
//! functions to build its evaluate-reduce-accept pipeline.
//!
//! ## Architecture
//!
//! - **Image Representation** ([`image`]) - `Dimensions`, `Rgb`, and the fixed-capacity
//!   struct-of-arrays `PixelArena` that holds one working set
//! - **Energy Functional** ([`energy`]) - Pixel distance, per-pixel energy, the incremental
//!   swap delta, and the brute-force total used as a correctness oracle
//!
//! ## Conventions
//!
//! - Positions are row-major `usize` values in `[0, height * width)`.
//! - Same-row tests always use the image width; same-column tests use the height.
//! - Energies are signed 64-bit integers so that deltas and totals share one type.

pub mod energy;
pub mod image;
