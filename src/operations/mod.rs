// src/operations/mod.rs

//! The closed gate vocabulary and the gate layouts printed on operator cards.
//!
//! An operator card carries a [`GateLayout`]: one [`GateSymbol`] per qubit
//! position. [`GateLayout::decode`] turns the layout into the concrete
//! [`Operation`]s the register engine executes.

use crate::core::QDutchError;
use num_complex::Complex;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 2x2 unitary acting on one qubit.
pub type GateMatrix = [[Complex<f64>; 2]; 2];

/// Single-qubit gates a card can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SingleQubitGate {
    /// No-op.
    #[serde(rename = "I")]
    Identity,
    /// Hadamard.
    H,
    /// Pauli-X (bit flip).
    X,
    /// Pauli-Z (phase flip).
    Z,
    /// Phase gate, `diag(1, i)`.
    S,
}

impl SingleQubitGate {
    /// The gates a generator may put on a card.
    pub const DRAWABLE: [SingleQubitGate; 4] = [
        SingleQubitGate::H,
        SingleQubitGate::X,
        SingleQubitGate::Z,
        SingleQubitGate::S,
    ];

    /// Matrix of the gate in the `{|0>, |1>}` basis.
    pub fn matrix(self) -> GateMatrix {
        use std::f64::consts::FRAC_1_SQRT_2;
        let one = Complex::one();
        let zero = Complex::zero();
        match self {
            SingleQubitGate::Identity => [[one, zero], [zero, one]],
            SingleQubitGate::H => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            SingleQubitGate::X => [[zero, one], [one, zero]],
            SingleQubitGate::Z => [[one, zero], [zero, -one]],
            SingleQubitGate::S => [[one, zero], [zero, Complex::i()]],
        }
    }
}

impl fmt::Display for SingleQubitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            SingleQubitGate::Identity => "I",
            SingleQubitGate::H => "H",
            SingleQubitGate::X => "X",
            SingleQubitGate::Z => "Z",
            SingleQubitGate::S => "S",
        };
        f.write_str(symbol)
    }
}

/// Two-qubit gates a card can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TwoQubitGate {
    /// Controlled-not.
    #[serde(rename = "CNOT")]
    Cnot,
    /// Exchange of two qubits.
    #[serde(rename = "SWAP")]
    Swap,
}

impl TwoQubitGate {
    /// Every two-qubit gate in the vocabulary.
    pub const ALL: [TwoQubitGate; 2] = [TwoQubitGate::Cnot, TwoQubitGate::Swap];
}

impl fmt::Display for TwoQubitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwoQubitGate::Cnot => f.write_str("CNOT"),
            TwoQubitGate::Swap => f.write_str("SWAP"),
        }
    }
}

/// What a card prints at one qubit position.
///
/// Serialized as its printed symbol (`"H"`, `"C"`, `"SWAP"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GateSymbol {
    /// A single-qubit gate (identity included).
    Single(SingleQubitGate),
    /// Control of a controlled-not.
    Control,
    /// Target of a controlled-not.
    Target,
    /// One end of a swap.
    Swap,
}

impl GateSymbol {
    /// `true` for the identity symbol.
    pub fn is_identity(self) -> bool {
        self == GateSymbol::Single(SingleQubitGate::Identity)
    }
}

impl fmt::Display for GateSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateSymbol::Single(gate) => write!(f, "{}", gate),
            GateSymbol::Control => f.write_str("C"),
            GateSymbol::Target => f.write_str("T"),
            GateSymbol::Swap => f.write_str("SWAP"),
        }
    }
}

impl FromStr for GateSymbol {
    type Err = QDutchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(GateSymbol::Single(SingleQubitGate::Identity)),
            "H" => Ok(GateSymbol::Single(SingleQubitGate::H)),
            "X" => Ok(GateSymbol::Single(SingleQubitGate::X)),
            "Z" => Ok(GateSymbol::Single(SingleQubitGate::Z)),
            "S" => Ok(GateSymbol::Single(SingleQubitGate::S)),
            "C" => Ok(GateSymbol::Control),
            "T" => Ok(GateSymbol::Target),
            "SWAP" => Ok(GateSymbol::Swap),
            other => Err(QDutchError::invalid_argument(format!("unknown gate symbol '{}'", other))),
        }
    }
}

impl TryFrom<String> for GateSymbol {
    type Error = QDutchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GateSymbol> for String {
    fn from(symbol: GateSymbol) -> Self {
        symbol.to_string()
    }
}

/// A unitary the register engine knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// A 2x2 gate on one qubit.
    Single {
        /// The gate to apply.
        gate: SingleQubitGate,
        /// The qubit it acts on.
        qubit: usize,
    },
    /// Flip `target` on every basis label where `control` is set.
    ControlledNot {
        /// The qubit whose value gates the flip.
        control: usize,
        /// The qubit that gets flipped.
        target: usize,
    },
    /// Exchange qubits `a` and `b`.
    Swap {
        /// First qubit.
        a: usize,
        /// Second qubit.
        b: usize,
    },
}

impl Operation {
    /// Returns every qubit index the operation touches.
    pub fn involved_qubits(&self) -> Vec<usize> {
        match self {
            Operation::Single { qubit, .. } => vec![*qubit],
            Operation::ControlledNot { control, target } => vec![*control, *target],
            Operation::Swap { a, b } => vec![*a, *b],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Single { gate, qubit } => write!(f, "{}(q{})", gate, qubit),
            Operation::ControlledNot { control, target } => write!(f, "CNOT(q{} -> q{})", control, target),
            Operation::Swap { a, b } => write!(f, "SWAP(q{}, q{})", a, b),
        }
    }
}

/// The per-qubit gate symbols of an operator card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateLayout(Vec<GateSymbol>);

impl GateLayout {
    /// An all-identity layout over `num_qubits` positions.
    pub fn identity(num_qubits: usize) -> Self {
        Self(vec![GateSymbol::Single(SingleQubitGate::Identity); num_qubits])
    }

    /// Wraps explicit symbols. No structural check happens until [`decode`](Self::decode).
    pub fn from_symbols(symbols: Vec<GateSymbol>) -> Self {
        Self(symbols)
    }

    /// Overwrites the symbol at `position`.
    pub fn set(&mut self, position: usize, symbol: GateSymbol) -> Result<(), QDutchError> {
        let len = self.0.len();
        let slot = self.0.get_mut(position).ok_or_else(|| {
            QDutchError::invalid_argument(format!("position {} out of range for a {}-qubit layout", position, len))
        })?;
        *slot = symbol;
        Ok(())
    }

    /// The symbols in qubit order.
    pub fn symbols(&self) -> &[GateSymbol] {
        &self.0
    }

    /// Number of qubit positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for a layout with no positions at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Positions holding something other than identity.
    pub fn active_positions(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, symbol)| !symbol.is_identity())
            .map(|(i, _)| i)
            .collect()
    }

    /// Translates the layout into engine operations, in qubit order.
    ///
    /// Accepted shapes: all identity (no operations), one or two single-qubit
    /// gates, exactly one `C` with exactly one `T`, or exactly two `SWAP`.
    /// Two-qubit symbols never mix with other gates.
    ///
    /// # Errors
    /// `InvalidArgument` for any other arrangement.
    pub fn decode(&self) -> Result<Vec<Operation>, QDutchError> {
        let mut singles = Vec::new();
        let mut controls = Vec::new();
        let mut targets = Vec::new();
        let mut swaps = Vec::new();
        for (qubit, symbol) in self.0.iter().enumerate() {
            match symbol {
                GateSymbol::Single(SingleQubitGate::Identity) => {}
                GateSymbol::Single(gate) => singles.push(Operation::Single { gate: *gate, qubit }),
                GateSymbol::Control => controls.push(qubit),
                GateSymbol::Target => targets.push(qubit),
                GateSymbol::Swap => swaps.push(qubit),
            }
        }

        let two_qubit_symbols = controls.len() + targets.len() + swaps.len();
        match (singles.len(), controls.as_slice(), targets.as_slice(), swaps.as_slice()) {
            (0..=2, [], [], []) => Ok(singles),
            (0, [control], [target], []) => Ok(vec![Operation::ControlledNot { control: *control, target: *target }]),
            (0, [], [], [a, b]) => Ok(vec![Operation::Swap { a: *a, b: *b }]),
            _ => Err(QDutchError::invalid_argument(format!(
                "gate layout '{}' is not a valid operator ({} single-qubit and {} two-qubit symbols)",
                self,
                singles.len(),
                two_qubit_symbols
            ))),
        }
    }
}

impl fmt::Display for GateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.0.iter().enumerate() {
            write!(f, "{}{}", if i > 0 { " " } else { "" }, symbol)?;
        }
        Ok(())
    }
}

impl FromStr for GateLayout {
    type Err = QDutchError;

    /// Parses whitespace separated symbols, e.g. `"C I T"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols = s
            .split_whitespace()
            .map(GateSymbol::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if symbols.is_empty() {
            return Err(QDutchError::invalid_argument("gate layout is empty"));
        }
        Ok(Self(symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(s: &str) -> GateLayout {
        s.parse().expect("layout should parse")
    }

    #[test]
    fn test_decode_identity_layout_is_noop() {
        assert_eq!(layout("I I I").decode(), Ok(vec![]));
    }

    #[test]
    fn test_decode_two_single_gates_in_qubit_order() {
        let ops = layout("S I H").decode().expect("valid layout");
        assert_eq!(
            ops,
            vec![
                Operation::Single { gate: SingleQubitGate::S, qubit: 0 },
                Operation::Single { gate: SingleQubitGate::H, qubit: 2 },
            ]
        );
    }

    #[test]
    fn test_decode_controlled_not_keeps_roles() {
        assert_eq!(
            layout("T I C").decode(),
            Ok(vec![Operation::ControlledNot { control: 2, target: 0 }])
        );
    }

    #[test]
    fn test_decode_swap() {
        assert_eq!(layout("I SWAP SWAP").decode(), Ok(vec![Operation::Swap { a: 1, b: 2 }]));
    }

    #[test]
    fn test_decode_rejects_malformed_layouts() {
        for bad in ["H X Z", "C I I", "C T T", "SWAP I I", "SWAP H SWAP", "C X T"] {
            assert!(
                matches!(layout(bad).decode(), Err(QDutchError::InvalidArgument { .. })),
                "layout '{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_layout_text_form() {
        let text = "C I T";
        assert_eq!(layout(text).to_string(), text);
        assert!("C Q".parse::<GateLayout>().is_err());
        assert!("".parse::<GateLayout>().is_err());
    }

    #[test]
    fn test_gate_matrices_are_unitary() {
        for gate in [SingleQubitGate::Identity, SingleQubitGate::H, SingleQubitGate::X, SingleQubitGate::Z, SingleQubitGate::S] {
            let m = gate.matrix();
            // M * M^dagger == I
            for row in 0..2 {
                for col in 0..2 {
                    let entry: Complex<f64> = (0..2).map(|k| m[row][k] * m[col][k].conj()).sum();
                    let expected = if row == col { 1.0 } else { 0.0 };
                    assert!((entry.re - expected).abs() < 1e-12 && entry.im.abs() < 1e-12, "{} is not unitary", gate);
                }
            }
        }
    }
}
