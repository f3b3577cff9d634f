// src/lib.rs

//! `qdutch` - Quantum Dutch, a turn-based card game played on qubit registers
//!
//! Every hand slot is a small quantum register instead of a number. Cards
//! re-initialize slots, apply gates to them or measure single qubits; at the
//! end of a match every slot is measured and the lowest total wins.
//!
//! The crate is split into a register engine (`core`, `simulation`,
//! `validation`, `operations`) that knows nothing about cards, and a game
//! engine (`cards`, `config`, `game`) that drives it. Rendering and input
//! handling are left to the caller.

pub mod cards;
pub mod config;
pub mod core;
pub mod game;
pub mod operations;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use cards::{Card, CardGenerator, CardKind};
pub use config::GameConfig;
pub use self::core::{QDutchError, Register};
pub use game::{DutchCall, Game, GameSnapshot, Player, RankingEntry};
pub use operations::{GateLayout, GateSymbol, Operation, SingleQubitGate, TwoQubitGate};
pub use validation::check_normalization;

// Example 1: Entangling two qubits of a slot
// A Hadamard followed by a controlled-not leaves qubits 0 and 1 perfectly
// correlated: measuring one fixes the other.
/// ```
/// use qdutch::{QDutchError, Register, SingleQubitGate};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut slot = Register::new(3)?;
/// slot.apply_single_qubit_gate(SingleQubitGate::H, 0)?;
/// slot.apply_controlled_not(0, 1)?;
///
/// let first = slot.measure_qubit(0, &mut rng)?;
/// let second = slot.measure_qubit(1, &mut rng)?;
/// assert_eq!(first, second);
/// qdutch::check_normalization(&slot, None)?;
/// # Ok::<(), QDutchError>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: A short match
// Two seats, the first one calls dutch straight away, one more round is
// played and the hands are scored.
/// ```
/// use qdutch::{Card, Game, GameConfig, QDutchError};
///
/// let config = GameConfig { num_players: 2, seed: Some(1), ..GameConfig::default() };
/// let mut game = Game::new(config)?;
///
/// game.apply_state_card(0, &Card::State { basis_index: 0 })?;
/// game.call_dutch()?;
/// game.next_player();
/// assert!(!game.check_end_game());
/// game.next_player();
/// assert!(game.check_end_game());
///
/// let ranking = game.get_ranking()?;
/// assert_eq!(ranking.len(), 2);
/// assert!(ranking.iter().any(|entry| entry.rank == 1));
/// # Ok::<(), QDutchError>(())
/// ```
#[doc(hidden)]
const _: () = ();
