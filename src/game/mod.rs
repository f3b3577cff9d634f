// src/game/mod.rs

//! The match state machine.
//!
//! [`Game`] owns the players, the card generator and the single rng of the
//! match. It never blocks or polls: the driving loop calls one operation per
//! player action, and every operation runs to completion before returning.
//! `&mut self` on every mutating call serializes access; a caller sharing a
//! game across threads must wrap it in a mutex.

mod player;
mod ranking;
mod snapshot;

pub use player::Player;
pub use ranking::{RankingEntry, comparison_key};
pub use snapshot::{DutchCall, GameSnapshot};

use crate::cards::{Card, CardGenerator};
use crate::config::GameConfig;
use crate::core::QDutchError;
use crate::validation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// One match of quantum dutch.
#[derive(Debug)]
pub struct Game<R = StdRng> {
    config: GameConfig,
    generator: CardGenerator,
    players: Vec<Player>,
    active_player: usize,
    turn: u32,
    dutch: Option<DutchCall>,
    ended: bool,
    rng: R,
}

impl Game<StdRng> {
    /// Sets up a match, seeding the rng from `config.seed` or from the OS.
    pub fn new(config: GameConfig) -> Result<Self, QDutchError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Game<R> {
    /// Sets up a match driven by an explicit random source.
    ///
    /// Players are named `Player 1`, `Player 2`, ... and each slot of every
    /// hand starts in an independently drawn uniform basis state.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, QDutchError> {
        let generator = CardGenerator::new(&config)?;
        let players = (0..config.num_players)
            .map(|seat| Player::new(format!("Player {}", seat + 1), config.num_qubits, &mut rng))
            .collect::<Result<Vec<_>, _>>()?;
        info!(players = players.len(), num_qubits = config.num_qubits, "match set up");
        Ok(Self {
            config,
            generator,
            players,
            active_player: 0,
            turn: 0,
            dutch: None,
            ended: false,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Seat index whose turn it is.
    pub fn active_player(&self) -> usize {
        self.active_player
    }

    /// Number of times play has wrapped back around to seat 0.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn dutch_call(&self) -> Option<DutchCall> {
        self.dutch
    }

    /// Draws two independent cards. Only the rng advances; the caller decides
    /// which card, if any, gets applied.
    pub fn draw_cards(&mut self) -> (Card, Card) {
        let first = self.generator.generate_card(&mut self.rng);
        let second = self.generator.generate_card(&mut self.rng);
        debug!(player = self.active_player, %first, %second, "drew cards");
        (first, second)
    }

    /// Applies an operator or measurement card to any slot on the table.
    ///
    /// # Returns
    /// `Some(bit)` for a measurement card, `None` for an operator card.
    ///
    /// # Errors
    /// * `InvalidCardKind` for a state card.
    /// * `InvalidArgument` for an unknown player or slot, or a layout that
    ///   does not fit the register.
    pub fn apply_operator_card(&mut self, player: usize, slot: usize, card: &Card) -> Result<Option<u8>, QDutchError> {
        let outcome = match card {
            Card::State { .. } => {
                return Err(QDutchError::InvalidCardKind {
                    expected: "Operator or Measurement",
                    found: card.kind(),
                });
            }
            Card::Operator { layout } => {
                seat_mut(&mut self.players, player)?.slot_mut(slot)?.apply_layout(layout)?;
                None
            }
            Card::Measurement { qubit } => {
                let register = seat_mut(&mut self.players, player)?.slot_mut(slot)?;
                Some(register.measure_qubit(*qubit, &mut self.rng)?)
            }
        };
        debug!(player, slot, %card, ?outcome, "applied card");
        Ok(outcome)
    }

    /// Re-initializes one of the *active* player's slots from a state card.
    ///
    /// # Errors
    /// * `InvalidCardKind` for anything but a state card.
    /// * `InvalidArgument` for an unknown slot or an out-of-range basis index.
    pub fn apply_state_card(&mut self, slot: usize, card: &Card) -> Result<(), QDutchError> {
        let Card::State { basis_index } = card else {
            return Err(QDutchError::InvalidCardKind {
                expected: "State",
                found: card.kind(),
            });
        };
        let player = self.active_player;
        seat_mut(&mut self.players, player)?.slot_mut(slot)?.initialize_basis(*basis_index)?;
        debug!(player, slot, basis_index, "applied state card");
        Ok(())
    }

    /// The active player calls dutch: play continues for one more full round.
    ///
    /// # Errors
    /// `InvalidAction` if dutch was already called or the match is over.
    pub fn call_dutch(&mut self) -> Result<(), QDutchError> {
        if let Some(call) = self.dutch {
            return Err(QDutchError::InvalidAction {
                message: format!("dutch was already called by seat {} in turn {}", call.player, call.turn),
            });
        }
        if self.ended {
            return Err(QDutchError::InvalidAction {
                message: "the match is already over".to_string(),
            });
        }
        let call = DutchCall {
            player: self.active_player,
            turn: self.turn,
        };
        self.dutch = Some(call);
        info!(player = call.player, turn = call.turn, "dutch called");
        Ok(())
    }

    /// Passes play to the next seat, counting a new turn on wrap-around.
    pub fn next_player(&mut self) {
        self.active_player = (self.active_player + 1) % self.players.len();
        if self.active_player == 0 {
            self.turn += 1;
        }
        debug!(player = self.active_player, turn = self.turn, "next player");
    }

    /// `true` once play has come back around to the dutch caller, or the
    /// match was ended explicitly.
    pub fn check_end_game(&self) -> bool {
        self.ended
            || self
                .dutch
                .is_some_and(|call| call.player == self.active_player && self.turn > call.turn)
    }

    /// Ends the match immediately.
    pub fn end_game(&mut self) {
        self.ended = true;
    }

    /// Collapses every hand and returns the standings, best first.
    ///
    /// Destructive: every slot is measured with `measure_all`, so all
    /// registers hold classical values afterwards. Marks the match as ended.
    pub fn get_ranking(&mut self) -> Result<Vec<RankingEntry>, QDutchError> {
        self.check_invariants()?;
        let mut tallies = Vec::with_capacity(self.players.len());
        for player in &mut self.players {
            let tally = player.tally(&mut self.rng)?;
            tallies.push((player.name().to_string(), tally));
        }
        let ranking = ranking::rank_tallies(tallies, self.dutch.map(|call| call.player));
        self.ended = true;
        for entry in &ranking {
            info!(rank = entry.rank, name = %entry.name, score = entry.score, "final standing");
        }
        Ok(ranking)
    }

    /// Fully measures one slot and returns its value. The slot is left in
    /// that basis state.
    pub fn reveal_slot(&mut self, player: usize, slot: usize) -> Result<usize, QDutchError> {
        let register = seat_mut(&mut self.players, player)?.slot_mut(slot)?;
        register.measure_all(&mut self.rng)
    }

    /// Re-deals every hand as fresh uniform basis states.
    pub fn reset_hands(&mut self) -> Result<(), QDutchError> {
        for player in &mut self.players {
            player.redeal(&mut self.rng)?;
        }
        debug!("hands re-dealt");
        Ok(())
    }

    /// Plain view of the match for a presentation layer.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.iter().map(|p| p.name().to_string()).collect(),
            active_player: self.active_player,
            turn: self.turn,
            dutch: self.dutch,
            ended: self.ended,
        }
    }

    /// Verifies that every slot has the configured width and a unit norm.
    pub fn check_invariants(&self) -> Result<(), QDutchError> {
        validation::validate_registers(
            self.players.iter().flat_map(|p| p.hand()),
            self.config.num_qubits,
        )
    }
}

/// Borrows one seat without locking the rest of the game.
fn seat_mut(players: &mut [Player], player: usize) -> Result<&mut Player, QDutchError> {
    let count = players.len();
    players.get_mut(player).ok_or_else(|| {
        QDutchError::invalid_argument(format!("player {} out of range, the table has {} players", player, count))
    })
}
