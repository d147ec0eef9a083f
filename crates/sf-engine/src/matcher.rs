//! Matching win patterns against a generated board

use std::collections::BTreeMap;

use crate::board::Board;
use crate::pattern::{PatternGroup, WinPattern};
use crate::symbol::{SymbolId, SymbolTable};

/// What a board yielded: credited patterns per standard symbol, plus the
/// bonus symbols that activated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome<'a> {
    /// Standard symbol to its credited patterns, at most one per family
    pub matched: BTreeMap<SymbolId, Vec<&'a WinPattern>>,
    /// Bonus symbols present on the board whose effect is not a miss
    pub bonus_symbols: Vec<SymbolId>,
}

impl<'a> MatchOutcome<'a> {
    /// A round wins iff at least one standard symbol matched a pattern
    pub fn is_win(&self) -> bool {
        !self.matched.is_empty()
    }

    /// Credited patterns for a symbol, empty if it matched nothing
    pub fn patterns_for(&self, symbol: SymbolId) -> &[&'a WinPattern] {
        self.matched.get(&symbol).map_or(&[], |v| v.as_slice())
    }
}

/// Evaluates all declared win patterns against boards.
///
/// Patterns are bucketed by family on construction, preserving the order
/// of the input slice inside each bucket; within a family the first
/// pattern that matches is the one credited.
pub struct PatternMatcher<'a> {
    symbols: &'a SymbolTable,
    groups: BTreeMap<PatternGroup, Vec<&'a WinPattern>>,
}

impl<'a> PatternMatcher<'a> {
    /// Bucket patterns by family
    pub fn new(symbols: &'a SymbolTable, patterns: &'a [WinPattern]) -> Self {
        let mut groups: BTreeMap<PatternGroup, Vec<&'a WinPattern>> = BTreeMap::new();
        for pattern in patterns {
            groups.entry(pattern.group).or_default().push(pattern);
        }
        Self { symbols, groups }
    }

    /// Evaluate one board.
    ///
    /// When no standard symbol matches any pattern the round is a loss and
    /// bonus symbols are not examined at all.
    pub fn match_board(&self, board: &Board) -> MatchOutcome<'a> {
        let mut matched = BTreeMap::new();
        for (id, symbol) in self.symbols.iter() {
            if !symbol.is_standard() {
                continue;
            }
            let credited = self.credited_patterns(id, board);
            if !credited.is_empty() {
                matched.insert(id, credited);
            }
        }

        if matched.is_empty() {
            return MatchOutcome::default();
        }

        let bonus_symbols = self
            .symbols
            .iter()
            .filter(|(id, symbol)| {
                symbol.bonus_effect().is_some_and(|e| !e.is_miss()) && board.contains_symbol(*id)
            })
            .map(|(id, _)| id)
            .collect();

        MatchOutcome {
            matched,
            bonus_symbols,
        }
    }

    fn credited_patterns(&self, symbol: SymbolId, board: &Board) -> Vec<&'a WinPattern> {
        let mut credited = Vec::new();
        for patterns in self.groups.values() {
            if let Some(pattern) = patterns.iter().find(|p| p.matches(symbol, board)) {
                credited.push(*pattern);
            }
        }
        credited
    }
}
