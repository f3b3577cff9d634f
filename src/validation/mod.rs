// src/validation/mod.rs

//! Invariant checks on registers and hands.

use crate::core::constants::qdutch_constants::NORM_TOLERANCE;
use crate::core::{QDutchError, Register};

/// Checks that the register is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `register` - The `Register` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `NORM_TOLERANCE`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QDutchError::DegenerateState)` otherwise.
pub fn check_normalization(register: &Register, tolerance: Option<f64>) -> Result<(), QDutchError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = register.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(QDutchError::degenerate(format!(
            "register normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
            norm_sq, effective_tolerance
        )))
    } else {
        Ok(())
    }
}

/// Checks that every register in `registers` has width `num_qubits` and is normalized.
pub fn validate_registers<'a, I>(registers: I, num_qubits: usize) -> Result<(), QDutchError>
where
    I: IntoIterator<Item = &'a Register>,
{
    for (slot, register) in registers.into_iter().enumerate() {
        if register.num_qubits() != num_qubits {
            return Err(QDutchError::degenerate(format!(
                "slot {} holds a {}-qubit register, expected {}",
                slot,
                register.num_qubits(),
                num_qubits
            )));
        }
        check_normalization(register, None)?;
    }
    Ok(())
}
