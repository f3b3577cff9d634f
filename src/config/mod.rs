// src/config/mod.rs

//! Match configuration.
//!
//! Every field has a default matching the standard game, so an empty JSON
//! object is a valid configuration. [`GameConfig::validate`] is the single
//! gate through which a configuration reaches the generator and the game.

use crate::core::QDutchError;
use crate::core::constants::qdutch_constants::{
    DEFAULT_NUM_PLAYERS, DEFAULT_NUM_QUBITS, MAX_NUM_QUBITS, MIN_PLAYERS, PROBABILITY_TOLERANCE,
};
use crate::operations::{SingleQubitGate, TwoQubitGate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Root configuration of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Register width `N` of every hand slot.
    pub num_qubits: usize,
    /// Number of seats at the table.
    pub num_players: usize,
    /// Top-level card kind distribution.
    pub card_probabilities: CardProbabilities,
    /// Distribution over operator card shapes.
    pub operator_shapes: OperatorShapeProbabilities,
    /// Relative weights of the single-qubit gates printed on operator cards.
    pub single_qubit_gates: BTreeMap<SingleQubitGate, f64>,
    /// Relative weights of the two-qubit gates printed on operator cards.
    pub two_qubit_gates: BTreeMap<TwoQubitGate, f64>,
    /// Seeds the match rng. `None` draws a seed from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_qubits: DEFAULT_NUM_QUBITS,
            num_players: DEFAULT_NUM_PLAYERS,
            card_probabilities: CardProbabilities::default(),
            operator_shapes: OperatorShapeProbabilities::default(),
            single_qubit_gates: BTreeMap::from([
                (SingleQubitGate::H, 0.3),
                (SingleQubitGate::X, 0.3),
                (SingleQubitGate::Z, 0.2),
                (SingleQubitGate::S, 0.2),
            ]),
            two_qubit_gates: BTreeMap::from([(TwoQubitGate::Cnot, 0.5), (TwoQubitGate::Swap, 0.5)]),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, QDutchError> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| QDutchError::invalid_configuration(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QDutchError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            QDutchError::invalid_configuration(format!("failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), QDutchError> {
        if !(1..=MAX_NUM_QUBITS).contains(&self.num_qubits) {
            return Err(QDutchError::invalid_configuration(format!(
                "num_qubits must be between 1 and {}, got {}",
                MAX_NUM_QUBITS, self.num_qubits
            )));
        }
        if self.num_players < MIN_PLAYERS {
            return Err(QDutchError::invalid_configuration(format!(
                "num_players must be at least {}, got {}",
                MIN_PLAYERS, self.num_players
            )));
        }

        self.card_probabilities.validate()?;
        self.operator_shapes.validate()?;
        if self.num_qubits < 2 && (self.operator_shapes.double_single > 0.0 || self.operator_shapes.two_qubit > 0.0) {
            return Err(QDutchError::invalid_configuration(
                "operator shapes touching two qubits need num_qubits >= 2",
            ));
        }

        if self.single_qubit_gates.contains_key(&SingleQubitGate::Identity) {
            return Err(QDutchError::invalid_configuration(
                "single_qubit_gates may not weight the identity gate",
            ));
        }
        check_weights(
            "single_qubit_gates",
            self.single_qubit_gates.iter().map(|(gate, w)| (gate.to_string(), *w)),
        )?;
        check_weights(
            "two_qubit_gates",
            self.two_qubit_gates.iter().map(|(gate, w)| (gate.to_string(), *w)),
        )?;
        Ok(())
    }
}

/// Probabilities of drawing each card kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardProbabilities {
    pub state: f64,
    pub operator: f64,
    pub measurement: f64,
}

impl Default for CardProbabilities {
    fn default() -> Self {
        Self {
            state: 0.35,
            operator: 0.55,
            measurement: 0.10,
        }
    }
}

impl CardProbabilities {
    fn validate(&self) -> Result<(), QDutchError> {
        check_distribution(
            "card_probabilities",
            &[("state", self.state), ("operator", self.operator), ("measurement", self.measurement)],
        )
    }
}

/// Probabilities of each operator card shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperatorShapeProbabilities {
    /// One single-qubit gate.
    pub single: f64,
    /// Two independent single-qubit gates on distinct qubits.
    pub double_single: f64,
    /// One controlled-not or swap on distinct qubits.
    pub two_qubit: f64,
}

impl Default for OperatorShapeProbabilities {
    fn default() -> Self {
        // Single-qubit shapes take 75%, split 70/30 between one and two gates
        Self {
            single: 0.75 * 0.70,
            double_single: 0.75 * 0.30,
            two_qubit: 0.25,
        }
    }
}

impl OperatorShapeProbabilities {
    fn validate(&self) -> Result<(), QDutchError> {
        check_distribution(
            "operator_shapes",
            &[
                ("single", self.single),
                ("double_single", self.double_single),
                ("two_qubit", self.two_qubit),
            ],
        )
    }
}

/// Every entry finite and non-negative, summing to one.
fn check_distribution(table: &str, entries: &[(&str, f64)]) -> Result<(), QDutchError> {
    for (name, p) in entries {
        if !p.is_finite() || *p < 0.0 {
            return Err(QDutchError::invalid_configuration(format!(
                "{}.{} must be a non-negative probability, got {}",
                table, name, p
            )));
        }
    }
    let sum: f64 = entries.iter().map(|(_, p)| p).sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(QDutchError::invalid_configuration(format!(
            "{} must sum to 1, got {}",
            table, sum
        )));
    }
    Ok(())
}

/// Every weight finite and non-negative, with a positive total.
fn check_weights(table: &str, weights: impl Iterator<Item = (String, f64)>) -> Result<(), QDutchError> {
    let mut total = 0.0;
    for (name, w) in weights {
        if !w.is_finite() || w < 0.0 {
            return Err(QDutchError::invalid_configuration(format!(
                "{}.{} must be a non-negative weight, got {}",
                table, name, w
            )));
        }
        total += w;
    }
    if total <= 0.0 {
        return Err(QDutchError::invalid_configuration(format!(
            "{} needs at least one positive weight",
            table
        )));
    }
    Ok(())
}
