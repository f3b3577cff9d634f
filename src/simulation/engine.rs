// src/simulation/engine.rs
use crate::core::{QDutchError, Register};
use crate::operations::{GateLayout, GateMatrix, Operation, SingleQubitGate};
use tracing::trace;

/// Unitary evolution of a single register.
///
/// Every method validates its qubit indices before touching the amplitude
/// vector, so a failed call leaves the register exactly as it was.
impl Register {
    /// Applies a single-qubit gate to `qubit`.
    ///
    /// Amplitudes whose labels differ only in bit `qubit` are paired up and
    /// the gate's 2x2 matrix is applied to each of the `2^(N-1)` pairs.
    ///
    /// # Errors
    /// `InvalidArgument` when `qubit >= N`.
    pub fn apply_single_qubit_gate(&mut self, gate: SingleQubitGate, qubit: usize) -> Result<(), QDutchError> {
        self.check_qubit(qubit)?;
        if gate == SingleQubitGate::Identity {
            return Ok(());
        }
        self.apply_matrix(&gate.matrix(), qubit);
        trace!(%gate, qubit, "applied single-qubit gate");
        Ok(())
    }

    /// Flips `target` on every basis label whose `control` bit is set.
    ///
    /// # Errors
    /// `InvalidArgument` when either index is out of range or both are equal.
    pub fn apply_controlled_not(&mut self, control: usize, target: usize) -> Result<(), QDutchError> {
        self.check_distinct_pair(control, target)?;
        self.swap_controlled_pairs(control, target);
        trace!(control, target, "applied controlled-not");
        Ok(())
    }

    /// Exchanges qubits `a` and `b` as three alternating controlled-nots.
    ///
    /// # Errors
    /// `InvalidArgument` when either index is out of range or both are equal.
    pub fn apply_swap(&mut self, a: usize, b: usize) -> Result<(), QDutchError> {
        self.check_distinct_pair(a, b)?;
        self.swap_controlled_pairs(a, b);
        self.swap_controlled_pairs(b, a);
        self.swap_controlled_pairs(a, b);
        trace!(a, b, "applied swap");
        Ok(())
    }

    /// Applies one decoded operation.
    pub fn apply_operation(&mut self, op: &Operation) -> Result<(), QDutchError> {
        match op {
            Operation::Single { gate, qubit } => self.apply_single_qubit_gate(*gate, *qubit),
            Operation::ControlledNot { control, target } => self.apply_controlled_not(*control, *target),
            Operation::Swap { a, b } => self.apply_swap(*a, *b),
        }
    }

    /// Applies every operation printed on an operator card's layout.
    ///
    /// The layout must span exactly `N` positions and decode to a valid
    /// operator; both are checked before the first gate runs.
    pub fn apply_layout(&mut self, layout: &GateLayout) -> Result<(), QDutchError> {
        if layout.len() != self.num_qubits() {
            return Err(QDutchError::invalid_argument(format!(
                "gate layout '{}' has {} positions but the register has {} qubits",
                layout,
                layout.len(),
                self.num_qubits()
            )));
        }
        let ops = layout.decode()?;
        for op in &ops {
            for qubit in op.involved_qubits() {
                self.check_qubit(qubit)?;
            }
        }
        for op in &ops {
            self.apply_operation(op)?;
        }
        Ok(())
    }

    fn check_distinct_pair(&self, first: usize, second: usize) -> Result<(), QDutchError> {
        self.check_qubit(first)?;
        self.check_qubit(second)?;
        if first == second {
            return Err(QDutchError::invalid_argument(format!(
                "a two-qubit gate needs two distinct qubits, got {} twice",
                first
            )));
        }
        Ok(())
    }

    /// In-place 2x2 contraction on the tensor factor of `qubit`.
    fn apply_matrix(&mut self, matrix: &GateMatrix, qubit: usize) {
        let mask = 1usize << qubit;
        let dim = self.dim();
        let amplitudes = self.amplitudes_mut();
        for i0 in (0..dim).filter(|i| i & mask == 0) {
            let i1 = i0 | mask;
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Controlled-not as a pure permutation, so it never introduces rounding.
    fn swap_controlled_pairs(&mut self, control: usize, target: usize) {
        let control_mask = 1usize << control;
        let target_mask = 1usize << target;
        let dim = self.dim();
        let amplitudes = self.amplitudes_mut();
        for i in (0..dim).filter(|i| i & control_mask != 0 && i & target_mask == 0) {
            amplitudes.swap(i, i | target_mask);
        }
    }
}
