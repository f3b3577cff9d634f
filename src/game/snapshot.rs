// src/game/snapshot.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who called dutch, and during which turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutchCall {
    /// Seat index of the caller.
    pub player: usize,
    /// Turn number at the moment of the call.
    pub turn: u32,
}

/// Everything a presentation layer may show without measuring anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Player names in seat order.
    pub players: Vec<String>,
    /// Seat index whose turn it is.
    pub active_player: usize,
    /// Completed rounds so far.
    pub turn: u32,
    pub dutch: Option<DutchCall>,
    /// `true` once the match is over.
    pub ended: bool,
}

impl fmt::Display for GameSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Turn {}{}", self.turn, if self.ended { " (ended)" } else { "" })?;
        for (seat, name) in self.players.iter().enumerate() {
            let marker = if seat == self.active_player { ">" } else { " " };
            let dutch = match self.dutch {
                Some(call) if call.player == seat => format!(" [dutch @ turn {}]", call.turn),
                _ => String::new(),
            };
            writeln!(f, "{} {}{}", marker, name, dutch)?;
        }
        Ok(())
    }
}
