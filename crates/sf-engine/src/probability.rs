//! Per-cell weighted symbol distributions

use rand::Rng;

use crate::board::Cell;
use crate::error::{EngineError, EngineResult};
use crate::symbol::SymbolId;

/// Weighted symbol distribution for a single cell.
///
/// Weights are relative: a symbol is drawn with probability
/// `weight / total`. Entries keep the order they were added in, so the
/// draw walk is deterministic for a given definition; the resulting
/// distribution does not depend on that order.
#[derive(Debug, Clone, PartialEq)]
pub struct CellDistribution {
    cell: Cell,
    weights: Vec<(SymbolId, u32)>,
}

impl CellDistribution {
    /// Create a distribution from a weight list
    pub fn new(cell: Cell, weights: Vec<(SymbolId, u32)>) -> Self {
        Self { cell, weights }
    }

    /// The cell this distribution fills
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Append a weight entry
    pub fn push(&mut self, symbol: SymbolId, weight: u32) {
        self.weights.push((symbol, weight));
    }

    /// Weight for a symbol, if present
    pub fn weight_of(&self, symbol: SymbolId) -> Option<u32> {
        self.weights
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, w)| *w)
    }

    /// Number of weight entries
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if the distribution has no entries
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|(_, w)| u64::from(*w)).sum()
    }

    /// Draw one symbol.
    ///
    /// Picks a uniform point in `[0, total)` and walks the entries,
    /// subtracting each weight from the running total until it falls at
    /// or below the point. A walk that exhausts the table without
    /// selecting cannot happen for a positive total; both failure modes
    /// are fatal engine errors rather than recoverable conditions.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> EngineResult<SymbolId> {
        let total = self.total_weight();
        if total == 0 {
            return Err(EngineError::EmptyDistribution { cell: self.cell });
        }

        let drawn = rng.random_range(0..total);
        let mut remainder = total;
        for &(symbol, weight) in &self.weights {
            remainder -= u64::from(weight);
            if remainder <= drawn {
                return Ok(symbol);
            }
        }
        Err(EngineError::DrawFellThrough { cell: self.cell })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Symbol, SymbolTable};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DRAWS: usize = 60_000;

    fn abc_ids() -> (SymbolId, SymbolId, SymbolId) {
        let mut table = SymbolTable::new();
        let a = table.insert(Symbol::standard("A", 50.0)).unwrap();
        let b = table.insert(Symbol::standard("B", 25.0)).unwrap();
        let c = table.insert(Symbol::standard("C", 10.0)).unwrap();
        (a, b, c)
    }

    fn count_draws(dist: &CellDistribution, symbol: SymbolId, seed: u64) -> usize {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..DRAWS)
            .filter(|_| dist.draw(&mut rng).unwrap() == symbol)
            .count()
    }

    fn assert_close_to_fraction(count: usize, fraction: f64) {
        let expected = fraction * DRAWS as f64;
        let tolerance = 0.02 * DRAWS as f64;
        assert!(
            (count as f64 - expected).abs() < tolerance,
            "count {count} too far from expected {expected}"
        );
    }

    #[test]
    fn test_draw_respects_weights() {
        let (a, b, c) = abc_ids();
        let dist = CellDistribution::new(Cell::new(0, 0), vec![(a, 1), (b, 2), (c, 3)]);

        assert_close_to_fraction(count_draws(&dist, a, 11), 1.0 / 6.0);
        assert_close_to_fraction(count_draws(&dist, b, 12), 2.0 / 6.0);
        assert_close_to_fraction(count_draws(&dist, c, 13), 3.0 / 6.0);
    }

    #[test]
    fn test_distribution_invariant_under_entry_order() {
        let (a, b, c) = abc_ids();
        let permuted = CellDistribution::new(Cell::new(0, 0), vec![(c, 3), (a, 1), (b, 2)]);

        assert_close_to_fraction(count_draws(&permuted, a, 21), 1.0 / 6.0);
        assert_close_to_fraction(count_draws(&permuted, b, 22), 2.0 / 6.0);
        assert_close_to_fraction(count_draws(&permuted, c, 23), 3.0 / 6.0);
    }

    #[test]
    fn test_single_entry_always_drawn() {
        let (a, _, _) = abc_ids();
        let dist = CellDistribution::new(Cell::new(1, 1), vec![(a, 7)]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(dist.draw(&mut rng).unwrap(), a);
        }
    }

    #[test]
    fn test_zero_weight_never_drawn() {
        let (a, b, _) = abc_ids();
        let dist = CellDistribution::new(Cell::new(0, 0), vec![(a, 0), (b, 5)]);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            assert_eq!(dist.draw(&mut rng).unwrap(), b);
        }
    }

    #[test]
    fn test_empty_distribution_is_fatal() {
        let dist = CellDistribution::new(Cell::new(2, 0), Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        let err = dist.draw(&mut rng).unwrap_err();
        assert!(matches!(err, EngineError::EmptyDistribution { cell } if cell == Cell::new(2, 0)));
    }

    #[test]
    fn test_total_weight() {
        let (a, b, c) = abc_ids();
        let dist = CellDistribution::new(Cell::new(0, 0), vec![(a, 1), (b, 2), (c, 3)]);
        assert_eq!(dist.total_weight(), 6);
        assert_eq!(dist.weight_of(b), Some(2));
    }
}
