// src/core/state.rs

use crate::core::error::QDutchError;
use num_complex::Complex;
use num_traits::{One, Zero};
use rand::Rng;
use std::fmt;

/// The quantum state held by one hand slot.
///
/// A register of width `N` is a vector of `2^N` complex amplitudes indexed by
/// the `N`-bit basis label. Qubit `q` is bit `q` of that label, so qubit 0 is
/// the least significant bit.
///
/// The squared magnitudes always sum to 1 within
/// [`NORM_TOLERANCE`](crate::core::constants::qdutch_constants::NORM_TOLERANCE).
/// Gates live in [`crate::simulation`], which mutates the vector in place.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct Register {
    num_qubits: usize,
    amplitudes: Vec<Complex<f64>>,
}

impl Register {
    /// Creates a register of `num_qubits` qubits in the basis state `|0...0>`.
    pub fn new(num_qubits: usize) -> Result<Self, QDutchError> {
        let dim = dimension(num_qubits)?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::one();
        Ok(Self { num_qubits, amplitudes })
    }

    /// Creates a register already holding the classical basis state `index`.
    pub fn from_basis(num_qubits: usize, index: usize) -> Result<Self, QDutchError> {
        let mut register = Self::new(num_qubits)?;
        register.initialize_basis(index)?;
        Ok(register)
    }

    /// Creates a register in a basis state drawn uniformly from `rng`.
    pub fn random_basis<R: Rng + ?Sized>(num_qubits: usize, rng: &mut R) -> Result<Self, QDutchError> {
        let mut register = Self::new(num_qubits)?;
        let index = rng.random_range(0..register.dim());
        register.initialize_basis(index)?;
        Ok(register)
    }

    /// Builds a register from raw amplitudes without checking normalization.
    #[cfg(test)]
    pub(crate) fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex<f64>>) -> Self {
        assert_eq!(amplitudes.len(), 1 << num_qubits, "amplitude count must be 2^N");
        Self { num_qubits, amplitudes }
    }

    /// Resets the register to the one-hot vector at `index`.
    ///
    /// # Errors
    /// `InvalidArgument` when `index >= 2^N`. The register is left untouched.
    pub fn initialize_basis(&mut self, index: usize) -> Result<(), QDutchError> {
        self.check_basis_index(index)?;
        self.amplitudes.iter_mut().for_each(|amp| *amp = Complex::zero());
        self.amplitudes[index] = Complex::one();
        Ok(())
    }

    /// Register width `N`.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states, `2^N`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only view of the amplitudes, for diagnostics and tests.
    /// Game logic only ever learns a register's value by measuring it.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    pub(crate) fn check_qubit(&self, qubit: usize) -> Result<(), QDutchError> {
        if qubit >= self.num_qubits {
            return Err(QDutchError::invalid_argument(format!(
                "qubit {} out of range for a {}-qubit register",
                qubit, self.num_qubits
            )));
        }
        Ok(())
    }

    pub(crate) fn check_basis_index(&self, index: usize) -> Result<(), QDutchError> {
        if index >= self.dim() {
            return Err(QDutchError::invalid_argument(format!(
                "basis index {} out of range, expected 0..{}",
                index,
                self.dim()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

/// `2^num_qubits`, rejecting widths that are zero or overflow `usize`.
fn dimension(num_qubits: usize) -> Result<usize, QDutchError> {
    if num_qubits == 0 {
        return Err(QDutchError::invalid_argument("a register needs at least one qubit"));
    }
    u32::try_from(num_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .filter(|dim| *dim != 0 && num_qubits < usize::BITS as usize)
        .ok_or_else(|| {
            QDutchError::invalid_argument(format!(
                "{} qubits overflow the state vector dimension",
                num_qubits
            ))
        })
}
