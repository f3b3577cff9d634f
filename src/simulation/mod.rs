// src/simulation/mod.rs

//! Evolution and measurement of a single [`Register`](crate::core::Register).
//!
//! Gate application lives in `engine`, collapse in `measurement`. Both are
//! inherent methods on `Register`; this module has no state of its own.
//! Randomness is always supplied by the caller, so a seeded rng makes every
//! measurement reproducible.

mod engine;
mod measurement;
