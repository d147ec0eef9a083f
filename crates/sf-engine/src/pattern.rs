//! Win pattern definitions grouped into families

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell};
use crate::error::ConfigError;
use crate::symbol::SymbolId;

/// Pattern family.
///
/// Per standard symbol, at most one pattern of each family is credited
/// per round; families are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternGroup {
    /// Repetition count anywhere on the board
    SameSymbols,
    /// Full row coverage
    HorizontallyLinearSymbols,
    /// Full column coverage
    VerticallyLinearSymbols,
    /// Top-left to bottom-right diagonal
    LtrDiagonallyLinearSymbols,
    /// Top-right to bottom-left diagonal
    RtlDiagonallyLinearSymbols,
}

impl PatternGroup {
    /// All families, in evaluation order
    pub const ALL: [PatternGroup; 5] = [
        PatternGroup::SameSymbols,
        PatternGroup::HorizontallyLinearSymbols,
        PatternGroup::VerticallyLinearSymbols,
        PatternGroup::LtrDiagonallyLinearSymbols,
        PatternGroup::RtlDiagonallyLinearSymbols,
    ];

    /// Parse a group tag from a game definition
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "same_symbols" => Ok(PatternGroup::SameSymbols),
            "horizontally_linear_symbols" => Ok(PatternGroup::HorizontallyLinearSymbols),
            "vertically_linear_symbols" => Ok(PatternGroup::VerticallyLinearSymbols),
            "ltr_diagonally_linear_symbols" => Ok(PatternGroup::LtrDiagonallyLinearSymbols),
            "rtl_diagonally_linear_symbols" => Ok(PatternGroup::RtlDiagonallyLinearSymbols),
            _ => Err(ConfigError::UnknownGroup {
                group: value.to_string(),
            }),
        }
    }

    /// The definition-file tag for this family
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternGroup::SameSymbols => "same_symbols",
            PatternGroup::HorizontallyLinearSymbols => "horizontally_linear_symbols",
            PatternGroup::VerticallyLinearSymbols => "vertically_linear_symbols",
            PatternGroup::LtrDiagonallyLinearSymbols => "ltr_diagonally_linear_symbols",
            PatternGroup::RtlDiagonallyLinearSymbols => "rtl_diagonally_linear_symbols",
        }
    }

    /// Line families require covered areas; the repetition family does not
    pub fn is_linear(&self) -> bool {
        !matches!(self, PatternGroup::SameSymbols)
    }
}

/// How a pattern is satisfied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternRule {
    /// The symbol occupies exactly `count` cells anywhere on the board
    SameSymbols { count: usize },
    /// The symbol covers every cell of at least one area
    LinearSymbols { covered_areas: Vec<Vec<Cell>> },
}

/// A named win pattern from the game definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinPattern {
    /// Name used in round results
    pub name: String,
    /// Multiplier contributed when the pattern matches
    pub reward_multiplier: f64,
    /// Family this pattern belongs to
    pub group: PatternGroup,
    /// Matching rule
    pub rule: PatternRule,
}

impl WinPattern {
    /// Create a repetition-count pattern
    pub fn same_symbols(name: impl Into<String>, count: usize, reward_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            reward_multiplier,
            group: PatternGroup::SameSymbols,
            rule: PatternRule::SameSymbols { count },
        }
    }

    /// Create a line pattern over explicit covered areas
    pub fn linear(
        name: impl Into<String>,
        group: PatternGroup,
        reward_multiplier: f64,
        covered_areas: Vec<Vec<Cell>>,
    ) -> Self {
        Self {
            name: name.into(),
            reward_multiplier,
            group,
            rule: PatternRule::LinearSymbols { covered_areas },
        }
    }

    /// Check whether `symbol` satisfies this pattern on `board`.
    ///
    /// Repetition patterns require the occurrence count to equal the
    /// declared count exactly. Line patterns require at least one covered
    /// area whose every cell holds the symbol; an area cell that does not
    /// exist on the board simply never matches.
    pub fn matches(&self, symbol: SymbolId, board: &Board) -> bool {
        match &self.rule {
            PatternRule::SameSymbols { count } => board.count_symbol(symbol) == *count,
            PatternRule::LinearSymbols { covered_areas } => covered_areas
                .iter()
                .any(|area| area.iter().all(|&cell| board.symbol_at(cell) == Some(symbol))),
        }
    }
}
