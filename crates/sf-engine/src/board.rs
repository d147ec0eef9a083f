//! Matrix cells and the per-round generated board

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EngineError, EngineResult};
use crate::probability::CellDistribution;
use crate::symbol::{SymbolId, SymbolTable};

/// A zero-indexed coordinate on the game matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    /// Create a cell from its coordinates
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Parse a `"row:column"` reference as used by covered areas
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let malformed = || ConfigError::MalformedCellRef {
            value: value.to_string(),
        };
        let (row, column) = value.split_once(':').ok_or_else(malformed)?;
        let row = row.parse::<usize>().map_err(|_| malformed())?;
        let column = column.parse::<usize>().map_err(|_| malformed())?;
        Ok(Self { row, column })
    }

    /// Check if this cell lies inside a `rows` x `columns` matrix
    pub fn in_bounds(&self, rows: usize, columns: usize) -> bool {
        self.row < rows && self.column < columns
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// One round's filled matrix: every declared cell mapped to the symbol
/// drawn for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: HashMap<Cell, SymbolId>,
}

impl Board {
    /// Draw one symbol per cell distribution
    pub fn generate<R: Rng + ?Sized>(
        distributions: &[CellDistribution],
        rng: &mut R,
    ) -> EngineResult<Self> {
        let mut cells = HashMap::with_capacity(distributions.len());
        for dist in distributions {
            let symbol = dist.draw(rng)?;
            cells.insert(dist.cell(), symbol);
        }
        Ok(Self { cells })
    }

    /// Build a board from an explicit cell map
    pub fn from_cells(cells: HashMap<Cell, SymbolId>) -> Self {
        Self { cells }
    }

    /// Symbol drawn at a cell, if the cell exists
    pub fn symbol_at(&self, cell: Cell) -> Option<SymbolId> {
        self.cells.get(&cell).copied()
    }

    /// Check if a symbol appears anywhere on the board
    pub fn contains_symbol(&self, symbol: SymbolId) -> bool {
        self.cells.values().any(|&s| s == symbol)
    }

    /// Number of cells holding a symbol
    pub fn count_symbol(&self, symbol: SymbolId) -> usize {
        self.cells.values().filter(|&&s| s == symbol).count()
    }

    /// Iterate all filled cells
    pub fn cells(&self) -> impl Iterator<Item = (Cell, SymbolId)> + '_ {
        self.cells.iter().map(|(&c, &s)| (c, s))
    }

    /// Number of filled cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the board has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Render the board as a row-major matrix of symbol names.
    ///
    /// Dimensions come from the highest filled row and column; a hole
    /// inside that rectangle is an engine invariant violation.
    pub fn as_matrix(&self, symbols: &SymbolTable) -> EngineResult<Vec<Vec<String>>> {
        let Some(rows) = self.cells.keys().map(|c| c.row).max() else {
            return Ok(Vec::new());
        };
        let columns = self.cells.keys().map(|c| c.column).max().unwrap_or(0);

        let mut matrix = Vec::with_capacity(rows + 1);
        for row in 0..=rows {
            let mut line = Vec::with_capacity(columns + 1);
            for column in 0..=columns {
                let cell = Cell::new(row, column);
                let id = self
                    .symbol_at(cell)
                    .ok_or(EngineError::MissingCell { cell })?;
                line.push(symbols.name_of(id).to_string());
            }
            matrix.push(line);
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn two_symbol_table() -> (SymbolTable, SymbolId, SymbolId) {
        let mut table = SymbolTable::new();
        let a = table.insert(Symbol::standard("A", 50.0)).unwrap();
        let b = table.insert(Symbol::standard("B", 25.0)).unwrap();
        (table, a, b)
    }

    #[test]
    fn test_cell_parse() {
        assert_eq!(Cell::parse("0:2").unwrap(), Cell::new(0, 2));
        assert_eq!(Cell::parse("10:3").unwrap(), Cell::new(10, 3));
    }

    #[test]
    fn test_cell_parse_rejects_malformed() {
        for bad in ["", "1", "1:", ":2", "1:2:3", "a:b", "-1:0", "1: 2"] {
            let err = Cell::parse(bad).unwrap_err();
            assert!(
                matches!(err, ConfigError::MalformedCellRef { .. }),
                "expected malformed error for {bad:?}"
            );
        }
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::new(2, 1).to_string(), "2:1");
    }

    #[test]
    fn test_generate_fills_every_cell() {
        let (_, a, b) = two_symbol_table();
        let distributions = vec![
            CellDistribution::new(Cell::new(0, 0), vec![(a, 1), (b, 1)]),
            CellDistribution::new(Cell::new(0, 1), vec![(a, 1), (b, 1)]),
            CellDistribution::new(Cell::new(1, 0), vec![(a, 1)]),
            CellDistribution::new(Cell::new(1, 1), vec![(b, 1)]),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::generate(&distributions, &mut rng).unwrap();

        assert_eq!(board.len(), 4);
        assert_eq!(board.symbol_at(Cell::new(1, 0)), Some(a));
        assert_eq!(board.symbol_at(Cell::new(1, 1)), Some(b));
        assert!(board.symbol_at(Cell::new(0, 0)).is_some());
    }

    #[test]
    fn test_matrix_rendering() {
        let (table, a, b) = two_symbol_table();
        let board = Board::from_cells(HashMap::from([
            (Cell::new(0, 0), a),
            (Cell::new(0, 1), b),
            (Cell::new(1, 0), b),
            (Cell::new(1, 1), a),
        ]));
        let matrix = board.as_matrix(&table).unwrap();
        assert_eq!(matrix, vec![vec!["A", "B"], vec!["B", "A"]]);
    }

    #[test]
    fn test_matrix_rejects_holes() {
        let (table, a, _) = two_symbol_table();
        let board = Board::from_cells(HashMap::from([
            (Cell::new(0, 0), a),
            (Cell::new(1, 1), a),
        ]));
        let err = board.as_matrix(&table).unwrap_err();
        assert!(matches!(err, EngineError::MissingCell { .. }));
    }

    #[test]
    fn test_matrix_round_trips_cell_lookup() {
        let (table, a, b) = two_symbol_table();
        let board = Board::from_cells(HashMap::from([
            (Cell::new(0, 0), a),
            (Cell::new(0, 1), b),
            (Cell::new(1, 0), b),
            (Cell::new(1, 1), a),
        ]));
        let matrix = board.as_matrix(&table).unwrap();
        for (row, line) in matrix.iter().enumerate() {
            for (column, name) in line.iter().enumerate() {
                let id = table.id_of(name).unwrap();
                assert_eq!(board.symbol_at(Cell::new(row, column)), Some(id));
            }
        }
    }

    #[test]
    fn test_symbol_counting() {
        let (_, a, b) = two_symbol_table();
        let board = Board::from_cells(HashMap::from([
            (Cell::new(0, 0), a),
            (Cell::new(0, 1), a),
            (Cell::new(0, 2), b),
        ]));
        assert_eq!(board.count_symbol(a), 2);
        assert_eq!(board.count_symbol(b), 1);
        assert!(board.contains_symbol(b));
    }
}
