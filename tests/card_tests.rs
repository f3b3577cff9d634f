// tests/card_tests.rs

use qdutch::{Card, CardGenerator, CardKind, GameConfig, QDutchError, SingleQubitGate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

fn frequencies(generator: &CardGenerator, draws: usize, seed: u64) -> HashMap<CardKind, f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts: HashMap<CardKind, usize> = HashMap::new();
    for _ in 0..draws {
        *counts.entry(generator.generate_card(&mut rng).kind()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(kind, count)| (kind, count as f64 / draws as f64))
        .collect()
}

#[test]
fn test_card_kind_frequencies_match_config() -> Result<(), QDutchError> {
    let generator = CardGenerator::new(&GameConfig::default())?;
    let observed = frequencies(&generator, 100_000, 42);
    for (kind, expected) in [
        (CardKind::State, 0.35),
        (CardKind::Operator, 0.55),
        (CardKind::Measurement, 0.10),
    ] {
        let freq = observed.get(&kind).copied().unwrap_or(0.0);
        assert!(
            (freq - expected).abs() < 0.01,
            "{} cards drawn with frequency {}, expected {}",
            kind,
            freq,
            expected
        );
    }
    Ok(())
}

#[test]
fn test_config_from_json_drives_generator() -> Result<(), QDutchError> {
    let config = GameConfig::from_json_str(
        r#"{
            "card_probabilities": { "state": 0.0, "operator": 1.0, "measurement": 0.0 },
            "single_qubit_gates": { "H": 0.0, "X": 1.0, "Z": 0.0, "S": 0.0 }
        }"#,
    )?;
    let generator = CardGenerator::new(&config)?;
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..500 {
        let Card::Operator { layout } = generator.generate_card(&mut rng) else {
            panic!("only operator cards are enabled");
        };
        assert_eq!(layout.len(), 3);
        // Every decoded layout is either X gates or a two-qubit gate
        for op in layout.decode()? {
            if let qdutch::Operation::Single { gate, .. } = op {
                assert_eq!(gate, SingleQubitGate::X);
            }
        }
    }
    Ok(())
}

#[test]
fn test_unknown_config_field_is_rejected() {
    let result = GameConfig::from_json_str(r#"{ "num_qbits": 3 }"#);
    assert!(matches!(result, Err(QDutchError::InvalidConfiguration { .. })));
}

#[test]
fn test_card_json_shape() -> Result<(), QDutchError> {
    let card: Card = serde_json::from_str(r#"{ "type": "operator", "layout": ["C", "I", "T"] }"#)
        .map_err(|e| QDutchError::InvalidArgument { message: e.to_string() })?;
    let Card::Operator { layout } = &card else {
        panic!("expected an operator card, got {}", card);
    };
    assert_eq!(layout.to_string(), "C I T");
    assert_eq!(card.kind(), CardKind::Operator);

    let json = serde_json::to_string(&Card::Measurement { qubit: 2 })
        .map_err(|e| QDutchError::InvalidArgument { message: e.to_string() })?;
    assert_eq!(json, r#"{"type":"measurement","qubit":2}"#);
    Ok(())
}
