//! Reward arithmetic for a matched round

use crate::matcher::MatchOutcome;
use crate::symbol::{SymbolId, SymbolTable};

/// Compute the reward for one round.
///
/// Every matched standard symbol contributes the bet scaled by the product
/// of its credited pattern multipliers, transformed through the symbol's
/// own value. The contributions are summed; a zero sum is a losing round
/// and pays nothing, bonus symbols included. A non-zero sum then has each
/// activated bonus effect applied in ascending symbol-name order.
pub fn score(bet: u64, outcome: &MatchOutcome<'_>, symbols: &SymbolTable) -> f64 {
    let base: f64 = outcome
        .matched
        .iter()
        .map(|(id, patterns)| {
            let multiplier: f64 = patterns.iter().map(|p| p.reward_multiplier).product();
            symbols.get(*id).apply(bet as f64 * multiplier)
        })
        .sum();

    if base == 0.0 {
        return 0.0;
    }

    let mut activated: Vec<SymbolId> = outcome.bonus_symbols.clone();
    activated.sort_by(|x, y| symbols.name_of(*x).cmp(symbols.name_of(*y)));

    let mut reward = base;
    for id in activated {
        reward = symbols.get(id).apply(reward);
    }
    reward
}
