//! Numeric and game constants shared across the engine.

/// Constants governing register sizes, tolerances and scoring
pub mod qdutch_constants {
    /// Register width used when the configuration does not override it.
    pub const DEFAULT_NUM_QUBITS: usize = 3;
    /// Widest register a game may be configured with. Bounded by the
    /// tie-break relationship asserted below.
    pub const MAX_NUM_QUBITS: usize = 5;
    /// Number of register slots in every hand.
    pub const HAND_SIZE: usize = 4;
    /// Player count used when the configuration does not override it.
    pub const DEFAULT_NUM_PLAYERS: usize = 4;
    /// Fewest players a match can be set up with.
    pub const MIN_PLAYERS: usize = 2;

    /// Subtracted from the dutch caller's comparison key.
    pub const DUTCH_BONUS: f64 = 0.5;
    /// Weight of the smallest measured slot in the comparison key.
    pub const MIN_CARD_WEIGHT: f64 = 0.01;

    /// Allowed deviation of the squared norm from 1.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Probability mass below which an amplitude counts as zero.
    pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;
    /// Allowed deviation of a probability table's sum from 1.
    pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

    // The minimum-card term must never reach the dutch bonus, whatever the width.
    const _: () = assert!(
        MIN_CARD_WEIGHT * (((1usize << MAX_NUM_QUBITS) - 1) as f64) < DUTCH_BONUS
    );
}
