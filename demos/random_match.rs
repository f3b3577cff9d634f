//! Plays one match of quantum dutch with every seat following a random policy.
//!
//! Usage: `cargo run --example random_match [config.json]`
//! Set `RUST_LOG=qdutch=debug` to follow every card.

use qdutch::core::HAND_SIZE;
use qdutch::{Card, Game, GameConfig, QDutchError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{EnvFilter, fmt};

// Hard stop in case nobody ever calls dutch
const MAX_TURNS: u32 = 12;

fn main() -> Result<(), QDutchError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt::Subscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig {
            seed: Some(2024),
            ..GameConfig::default()
        },
    };
    let num_players = config.num_players;
    let mut policy = StdRng::seed_from_u64(config.seed.unwrap_or(0).wrapping_add(1));
    let mut game = Game::new(config)?;

    println!("--- qdutch: random match with {} players ---", num_players);
    while !game.check_end_game() {
        let seat = game.active_player();
        let (first, second) = game.draw_cards();
        let card = if policy.random_bool(0.5) { first } else { second };

        match &card {
            Card::State { .. } => {
                let slot = policy.random_range(0..HAND_SIZE);
                game.apply_state_card(slot, &card)?;
                println!("{} plays {} on own slot {}", game.players()[seat].name(), card, slot);
            }
            _ => {
                let target = policy.random_range(0..num_players);
                let slot = policy.random_range(0..HAND_SIZE);
                let outcome = game.apply_operator_card(target, slot, &card)?;
                let name = game.players()[target].name().to_string();
                match outcome {
                    Some(bit) => println!("{} measures {} slot {}: {}", game.players()[seat].name(), name, slot, bit),
                    None => println!("{} plays {} on {} slot {}", game.players()[seat].name(), card, name, slot),
                }
            }
        }

        if game.dutch_call().is_none() && game.turn() >= 2 && policy.random_bool(0.2) {
            game.call_dutch()?;
            println!("{} calls dutch!", game.players()[seat].name());
        }
        if game.turn() >= MAX_TURNS {
            game.end_game();
        }
        game.next_player();
    }

    println!("\n{}", game.snapshot());
    println!("Final standings:");
    for entry in game.get_ranking()? {
        println!("  {}", entry);
    }
    Ok(())
}
