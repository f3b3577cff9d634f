// src/game/player.rs
use crate::core::constants::qdutch_constants::HAND_SIZE;
use crate::core::{QDutchError, Register};
use rand::Rng;
use std::fmt;

/// A seat at the table: a name and a hand of [`HAND_SIZE`] registers.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: String,
    hand: Vec<Register>,
}

/// Result of collapsing a whole hand at the end of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tally {
    /// Sum of the measured slot values.
    pub(crate) score: usize,
    /// Smallest measured slot value.
    pub(crate) min_card: usize,
}

impl Player {
    /// Seats a player whose slots each start in an independent uniform basis state.
    pub(crate) fn new<R: Rng + ?Sized>(name: String, num_qubits: usize, rng: &mut R) -> Result<Self, QDutchError> {
        let hand = (0..HAND_SIZE)
            .map(|_| Register::random_basis(num_qubits, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name, hand })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The slots in table order.
    pub fn hand(&self) -> &[Register] {
        &self.hand
    }

    pub(crate) fn slot_mut(&mut self, slot: usize) -> Result<&mut Register, QDutchError> {
        self.hand.get_mut(slot).ok_or_else(|| {
            QDutchError::invalid_argument(format!("slot {} out of range, a hand has {} slots", slot, HAND_SIZE))
        })
    }

    /// Re-draws every slot as a fresh uniform basis state.
    pub(crate) fn redeal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), QDutchError> {
        for register in &mut self.hand {
            let index = rng.random_range(0..register.dim());
            register.initialize_basis(index)?;
        }
        Ok(())
    }

    /// Measures each slot once. Destructive: every slot ends up classical.
    pub(crate) fn tally<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Tally, QDutchError> {
        let values = self
            .hand
            .iter_mut()
            .map(|register| register.measure_all(rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Tally {
            score: values.iter().sum(),
            min_card: values.iter().copied().min().unwrap_or(0),
        })
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} slots)", self.name, self.hand.len())
    }
}
