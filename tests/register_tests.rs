// tests/register_tests.rs

use qdutch::{GateLayout, QDutchError, Register, SingleQubitGate, check_normalization};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// Helper to check that exactly one basis index carries all the weight
fn assert_basis_state(register: &Register, index: usize) {
    for (i, amp) in register.amplitudes().iter().enumerate() {
        let expected = if i == index { 1.0 } else { 0.0 };
        assert!(
            (amp.norm_sqr() - expected).abs() < 1e-9,
            "index {} has probability {}, expected {}",
            i,
            amp.norm_sqr(),
            expected
        );
    }
}

// Uniform superposition over all eight values
fn spread(register: &mut Register) -> Result<(), QDutchError> {
    for qubit in 0..register.num_qubits() {
        register.apply_single_qubit_gate(SingleQubitGate::H, qubit)?;
    }
    Ok(())
}

fn layout(text: &str) -> GateLayout {
    text.parse().unwrap_or_else(|e| panic!("bad layout '{}': {}", text, e))
}

#[test]
fn test_norm_survives_mixed_gate_sequence() -> Result<(), QDutchError> {
    let mut register = Register::from_basis(3, 6)?;
    for text in ["H I I", "I H I", "C T I", "S I I", "I SWAP SWAP", "Z X I", "I C T", "H I H"] {
        register.apply_layout(&layout(text))?;
        check_normalization(&register, None)?;
    }
    assert!((register.norm_sqr() - 1.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_bell_pair_outcomes_agree() -> Result<(), QDutchError> {
    let mut rng = rng(11);
    for _ in 0..50 {
        let mut register = Register::new(3)?;
        register.apply_layout(&layout("H I I"))?;
        register.apply_layout(&layout("C T I"))?;
        let control = register.measure_qubit(0, &mut rng)?;
        let target = register.measure_qubit(1, &mut rng)?;
        assert_eq!(control, target, "entangled qubits must agree");
        // Qubit 2 was never touched
        assert_eq!(register.measure_qubit(2, &mut rng)?, 0);
    }
    Ok(())
}

#[test]
fn test_measure_all_is_idempotent_after_reinit() -> Result<(), QDutchError> {
    let mut rng = rng(3);
    let mut register = Register::new(3)?;
    spread(&mut register)?;

    let first = register.measure_all(&mut rng)?;
    assert_basis_state(&register, first);
    register.initialize_basis(first)?;
    let second = register.measure_all(&mut rng)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_uniform_superposition_covers_every_value() -> Result<(), QDutchError> {
    let mut rng = rng(5);
    let mut seen = [0usize; 8];
    for _ in 0..4000 {
        let mut register = Register::new(3)?;
        spread(&mut register)?;
        seen[register.measure_all(&mut rng)?] += 1;
    }
    for (value, count) in seen.iter().enumerate() {
        let freq = *count as f64 / 4000.0;
        assert!((freq - 0.125).abs() < 0.03, "value {} seen with frequency {}", value, freq);
    }
    Ok(())
}

#[test]
fn test_out_of_range_arguments_leave_register_untouched() -> Result<(), QDutchError> {
    let mut rng = rng(1);
    let mut register = Register::new(3)?;
    register.apply_single_qubit_gate(SingleQubitGate::H, 2)?;
    let before = register.clone();

    assert!(matches!(
        register.measure_qubit(3, &mut rng),
        Err(QDutchError::InvalidArgument { .. })
    ));
    assert!(matches!(
        register.initialize_basis(8),
        Err(QDutchError::InvalidArgument { .. })
    ));
    assert!(matches!(
        register.apply_single_qubit_gate(SingleQubitGate::X, 3),
        Err(QDutchError::InvalidArgument { .. })
    ));
    assert!(matches!(
        register.apply_controlled_not(1, 1),
        Err(QDutchError::InvalidArgument { .. })
    ));
    assert!(matches!(
        register.apply_swap(0, 5),
        Err(QDutchError::InvalidArgument { .. })
    ));
    assert!(matches!(
        register.apply_layout(&layout("H I I I")),
        Err(QDutchError::InvalidArgument { .. })
    ));
    assert_eq!(register, before);
    Ok(())
}

#[test]
fn test_invalid_layouts_are_rejected() -> Result<(), QDutchError> {
    let mut register = Register::new(3)?;
    for text in ["C I I", "C T T", "SWAP I I", "SWAP SWAP SWAP", "H C T", "H H H"] {
        assert!(
            register.apply_layout(&layout(text)).is_err(),
            "layout '{}' should be rejected",
            text
        );
    }
    assert_basis_state(&register, 0);
    Ok(())
}

#[test]
fn test_register_width_limits() {
    assert!(Register::new(0).is_err());
    assert!(Register::new(1).is_ok());
    assert!(Register::new(5).is_ok());
}
