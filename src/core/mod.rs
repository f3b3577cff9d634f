// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

// Re-export public types for convenient access via `qdutch::core::TypeName`
pub use error::QDutchError;
pub use state::Register;

pub mod constants;
pub use constants::qdutch_constants::{DEFAULT_NUM_QUBITS, HAND_SIZE};
