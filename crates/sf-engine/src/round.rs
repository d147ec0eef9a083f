//! One complete round: draw, match, score, record

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::EngineResult;
use crate::matcher::PatternMatcher;
use crate::scorer::score;

/// The externally visible record of one played round.
///
/// Serializes to the result-file shape: symbol names only, no internal
/// ids. On a losing round the map and list are present but empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Generated matrix as row-major symbol names
    pub matrix: Vec<Vec<String>>,
    /// Matched standard symbol name to its credited pattern names
    pub applied_winning_combinations: BTreeMap<String, Vec<String>>,
    /// Activated bonus symbol names, in application order
    pub applied_bonus_symbols: Vec<String>,
    /// Final reward
    pub reward: f64,
}

/// Play one round against a validated game definition.
///
/// Draws a board from the per-cell distributions, matches the win
/// patterns, scores the outcome, and assembles the round record.
pub fn play_round<R: Rng + ?Sized>(
    config: &GameConfig,
    bet: u64,
    rng: &mut R,
) -> EngineResult<RoundResult> {
    let board = Board::generate(config.distributions(), rng)?;
    let matcher = PatternMatcher::new(config.symbols(), config.patterns());
    let outcome = matcher.match_board(&board);
    let reward = score(bet, &outcome, config.symbols());

    let symbols = config.symbols();
    let applied_winning_combinations: BTreeMap<String, Vec<String>> = outcome
        .matched
        .iter()
        .map(|(id, patterns)| {
            let names = patterns.iter().map(|p| p.name.clone()).collect();
            (symbols.name_of(*id).to_string(), names)
        })
        .collect();

    let mut applied_bonus_symbols: Vec<String> = outcome
        .bonus_symbols
        .iter()
        .map(|id| symbols.name_of(*id).to_string())
        .collect();
    applied_bonus_symbols.sort();

    log::debug!(
        "round: {} matched symbols, {} active bonuses, reward {reward}",
        applied_winning_combinations.len(),
        applied_bonus_symbols.len(),
    );

    Ok(RoundResult {
        matrix: board.as_matrix(symbols)?,
        applied_winning_combinations,
        applied_bonus_symbols,
        reward,
    })
}
