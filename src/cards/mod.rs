// src/cards/mod.rs

//! Cards and the weighted generator that deals them.
//!
//! A card is a plain value. It belongs to nobody until it is drawn and it is
//! discarded once applied, so there is no deck and no card history.

mod generator;

pub use generator::{CardGenerator, OperatorShape};

use crate::operations::GateLayout;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A card drawn during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Card {
    /// Re-initializes one of the active player's slots to a classical basis state.
    State {
        /// Basis index in `0..2^N`.
        basis_index: usize,
    },
    /// Applies the printed unitary to any slot on the table.
    Operator {
        /// One gate symbol per qubit position.
        layout: GateLayout,
    },
    /// Collapses one qubit of any slot and reveals its bit.
    Measurement {
        /// Qubit in `0..N`.
        qubit: usize,
    },
}

impl Card {
    /// The discriminant of this card.
    pub fn kind(&self) -> CardKind {
        match self {
            Card::State { .. } => CardKind::State,
            Card::Operator { .. } => CardKind::Operator,
            Card::Measurement { .. } => CardKind::Measurement,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::State { basis_index } => write!(f, "State({})", basis_index),
            Card::Operator { layout } => write!(f, "Operator[{}]", layout),
            Card::Measurement { qubit } => write!(f, "Measurement(q{})", qubit),
        }
    }
}

/// The three kinds of card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// See [`Card::State`].
    State,
    /// See [`Card::Operator`].
    Operator,
    /// See [`Card::Measurement`].
    Measurement,
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardKind::State => f.write_str("State"),
            CardKind::Operator => f.write_str("Operator"),
            CardKind::Measurement => f.write_str("Measurement"),
        }
    }
}
