//! Seeded Rounds Example
//!
//! Plays a handful of seeded rounds against the shipped game definition
//! and prints each matrix with its reward.
//!
//! Run with: cargo run -p sf-engine --example demo_round

use rand::SeedableRng;
use rand::rngs::StdRng;
use sf_engine::{GameConfig, play_round};

fn main() {
    let config = GameConfig::from_json(include_str!("../../../config/config.json"))
        .expect("shipped definition is valid");

    println!(
        "=== {}x{} scratch card, {} symbols ===\n",
        config.rows(),
        config.columns(),
        config.symbols().len()
    );

    let mut rng = StdRng::seed_from_u64(2024);
    for round in 1..=5 {
        let result = play_round(&config, 100, &mut rng).expect("round against validated config");

        println!("round {round}:");
        for row in &result.matrix {
            println!("  {}", row.join(" "));
        }
        for (symbol, patterns) in &result.applied_winning_combinations {
            println!("  {} matched {}", symbol, patterns.join(", "));
        }
        for bonus in &result.applied_bonus_symbols {
            println!("  bonus {bonus} applied");
        }
        println!("  reward: {}\n", result.reward);
    }
}
