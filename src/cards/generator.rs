// src/cards/generator.rs
use crate::cards::{Card, CardKind};
use crate::config::GameConfig;
use crate::core::QDutchError;
use crate::operations::{GateLayout, GateSymbol, SingleQubitGate, TwoQubitGate};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::index;

/// Shapes an operator card can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorShape {
    /// One single-qubit gate.
    Single,
    /// Two single-qubit gates on two distinct qubits.
    DoubleSingle,
    /// A controlled-not or a swap on two distinct qubits.
    TwoQubit,
}

impl OperatorShape {
    const ALL: [OperatorShape; 3] = [OperatorShape::Single, OperatorShape::DoubleSingle, OperatorShape::TwoQubit];
}

const CARD_KINDS: [CardKind; 3] = [CardKind::State, CardKind::Operator, CardKind::Measurement];

/// Deals cards from the weighted policy of a [`GameConfig`].
///
/// The generator holds no rng and no game state: each draw advances only
/// the rng passed in.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    num_qubits: usize,
    kinds: WeightedIndex<f64>,
    shapes: WeightedIndex<f64>,
    single_gates: Vec<SingleQubitGate>,
    single_weights: WeightedIndex<f64>,
    two_gates: Vec<TwoQubitGate>,
    two_weights: WeightedIndex<f64>,
}

impl CardGenerator {
    /// Builds the sampling tables of a validated configuration.
    pub fn new(config: &GameConfig) -> Result<Self, QDutchError> {
        config.validate()?;
        let p = &config.card_probabilities;
        let s = &config.operator_shapes;
        let (single_gates, single_w): (Vec<_>, Vec<_>) = config.single_qubit_gates.iter().map(|(g, w)| (*g, *w)).unzip();
        let (two_gates, two_w): (Vec<_>, Vec<_>) = config.two_qubit_gates.iter().map(|(g, w)| (*g, *w)).unzip();

        Ok(Self {
            num_qubits: config.num_qubits,
            kinds: weighted("card_probabilities", [p.state, p.operator, p.measurement])?,
            shapes: weighted("operator_shapes", [s.single, s.double_single, s.two_qubit])?,
            single_gates,
            single_weights: weighted("single_qubit_gates", single_w)?,
            two_gates,
            two_weights: weighted("two_qubit_gates", two_w)?,
        })
    }

    /// Register width the generated cards address.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Draws one card.
    pub fn generate_card<R: Rng + ?Sized>(&self, rng: &mut R) -> Card {
        match CARD_KINDS[self.kinds.sample(rng)] {
            CardKind::State => Card::State {
                basis_index: rng.random_range(0..1usize << self.num_qubits),
            },
            CardKind::Measurement => Card::Measurement {
                qubit: rng.random_range(0..self.num_qubits),
            },
            CardKind::Operator => Card::Operator {
                layout: self.generate_layout(rng),
            },
        }
    }

    /// Draws an operator layout: a shape, then its positions without
    /// replacement, then the gates for those positions.
    pub fn generate_layout<R: Rng + ?Sized>(&self, rng: &mut R) -> GateLayout {
        let mut symbols = vec![GateSymbol::Single(SingleQubitGate::Identity); self.num_qubits];
        match OperatorShape::ALL[self.shapes.sample(rng)] {
            OperatorShape::Single => {
                let qubit = rng.random_range(0..self.num_qubits);
                symbols[qubit] = GateSymbol::Single(self.draw_single_gate(rng));
            }
            OperatorShape::DoubleSingle => {
                for qubit in index::sample(rng, self.num_qubits, 2) {
                    symbols[qubit] = GateSymbol::Single(self.draw_single_gate(rng));
                }
            }
            OperatorShape::TwoQubit => {
                let picked = index::sample(rng, self.num_qubits, 2);
                let (first, second) = (picked.index(0), picked.index(1));
                match self.two_gates[self.two_weights.sample(rng)] {
                    TwoQubitGate::Cnot => {
                        symbols[first] = GateSymbol::Control;
                        symbols[second] = GateSymbol::Target;
                    }
                    TwoQubitGate::Swap => {
                        symbols[first] = GateSymbol::Swap;
                        symbols[second] = GateSymbol::Swap;
                    }
                }
            }
        }
        GateLayout::from_symbols(symbols)
    }

    fn draw_single_gate<R: Rng + ?Sized>(&self, rng: &mut R) -> SingleQubitGate {
        self.single_gates[self.single_weights.sample(rng)]
    }
}

fn weighted(table: &str, weights: impl IntoIterator<Item = f64>) -> Result<WeightedIndex<f64>, QDutchError> {
    WeightedIndex::new(weights)
        .map_err(|e| QDutchError::invalid_configuration(format!("{} cannot be sampled: {}", table, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Operation;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_operator_layouts_match_their_shape() -> Result<(), QDutchError> {
        let generator = CardGenerator::new(&GameConfig::default())?;
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..5_000 {
            let layout = generator.generate_layout(&mut rng);
            assert_eq!(layout.len(), 3);
            let active = layout.active_positions();
            assert!((1..=2).contains(&active.len()), "layout '{}'", layout);
            // decode() rejects overlapping or half-formed two-qubit gates
            let ops = layout.decode()?;
            let touched: usize = ops.iter().map(|op| op.involved_qubits().len()).sum();
            assert_eq!(touched, active.len(), "layout '{}'", layout);
        }
        Ok(())
    }

    #[test]
    fn test_state_and_measurement_cards_stay_in_range() -> Result<(), QDutchError> {
        let generator = CardGenerator::new(&GameConfig::default())?;
        let mut rng = StdRng::seed_from_u64(8);
        let mut seen_states = [false; 8];
        for _ in 0..2_000 {
            match generator.generate_card(&mut rng) {
                Card::State { basis_index } => seen_states[basis_index] = true,
                Card::Measurement { qubit } => assert!(qubit < 3),
                Card::Operator { layout } => assert_eq!(layout.len(), 3),
            }
        }
        assert!(seen_states.iter().all(|seen| *seen), "every basis index should be drawn");
        Ok(())
    }

    #[test]
    fn test_zero_weight_gates_never_appear() -> Result<(), QDutchError> {
        let mut config = GameConfig::default();
        config.card_probabilities.state = 0.0;
        config.card_probabilities.operator = 1.0;
        config.card_probabilities.measurement = 0.0;
        config.single_qubit_gates.insert(SingleQubitGate::Z, 0.0);
        config.two_qubit_gates.insert(TwoQubitGate::Swap, 0.0);
        let generator = CardGenerator::new(&config)?;
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..2_000 {
            let Card::Operator { layout } = generator.generate_card(&mut rng) else {
                panic!("only operator cards are configured");
            };
            for op in layout.decode()? {
                assert!(!matches!(op, Operation::Single { gate: SingleQubitGate::Z, .. }), "layout '{}'", layout);
                assert!(!matches!(op, Operation::Swap { .. }), "layout '{}'", layout);
            }
        }
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig { num_qubits: 0, ..GameConfig::default() };
        assert!(matches!(CardGenerator::new(&config), Err(QDutchError::InvalidConfiguration { .. })));
    }
}
