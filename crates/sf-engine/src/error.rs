//! Error types shared across the engine

use thiserror::Error;

use crate::board::Cell;

/// Errors raised while loading or validating a game definition.
///
/// Every variant carries enough context to tell the operator which part of
/// the JSON document to fix.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The definition file could not be read from disk
    #[error("{path} not found. Provide a path relative to the current working directory")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a JSON document of the expected shape
    #[error("the supplied game definition is not valid JSON: {0}")]
    Json(String),

    /// `rows` or `columns` is zero
    #[error("matrix dimensions must be positive, got {rows} rows x {columns} columns")]
    InvalidDimensions { rows: usize, columns: usize },

    /// Two symbols were declared under the same name
    #[error("symbol '{name}' is declared more than once")]
    DuplicateSymbol { name: String },

    /// A symbol declaration carries an unknown `type`
    #[error("symbol '{name}' has unsupported type '{kind}'")]
    UnknownSymbolType { name: String, kind: String },

    /// A bonus symbol declaration carries an unknown `impact`
    #[error("bonus symbol '{name}' has unsupported impact '{impact}'")]
    UnknownImpact { name: String, impact: String },

    /// A symbol declaration is missing an attribute its type requires
    #[error("symbol '{name}' is missing required attribute '{attribute}'")]
    MissingSymbolAttribute {
        name: String,
        attribute: &'static str,
    },

    /// A symbol value that must be positive is zero or negative
    #[error("symbol '{name}' attribute '{attribute}' must be positive, got {value}")]
    NonPositiveSymbolValue {
        name: String,
        attribute: &'static str,
        value: f64,
    },

    /// The standard probability list does not cover the matrix exactly once
    #[error("expected probabilities for {expected} cells, got {actual}")]
    WrongCellCount { expected: usize, actual: usize },

    /// A probability entry points outside the declared matrix
    #[error("probability entry for cell {cell} is outside the {rows}x{columns} matrix")]
    CellOutOfRange {
        cell: Cell,
        rows: usize,
        columns: usize,
    },

    /// Two probability entries target the same cell
    #[error("cell {cell} has more than one probability entry")]
    DuplicateCell { cell: Cell },

    /// A weight references a symbol that was never declared
    #[error("probabilities reference undeclared symbol '{name}'")]
    UndeclaredSymbol { name: String },

    /// A weight entry is zero
    #[error("symbol '{name}' has a non-positive weight at cell {cell}")]
    NonPositiveWeight { name: String, cell: Cell },

    /// A cell weight references a bonus symbol; bonus weights live in
    /// their own shared section
    #[error("cell {cell} lists weight for non-standard symbol '{name}'")]
    NotAStandardSymbol { name: String, cell: Cell },

    /// A cell is missing a weight for a declared standard symbol
    #[error("cell {cell} has no weight for standard symbol '{name}'")]
    MissingStandardWeight { name: String, cell: Cell },

    /// A cell ends up with no weights at all
    #[error("cell {cell} has no symbol weights")]
    EmptyCellWeights { cell: Cell },

    /// The bonus section references a standard symbol
    #[error("bonus probabilities reference non-bonus symbol '{name}'")]
    NotABonusSymbol { name: String },

    /// The bonus section is missing a weight for a declared bonus symbol
    #[error("bonus probabilities have no weight for bonus symbol '{name}'")]
    MissingBonusWeight { name: String },

    /// A bonus weight entry is zero
    #[error("bonus symbol '{name}' has a non-positive weight")]
    NonPositiveBonusWeight { name: String },

    /// A win combination carries an unknown `when` discriminator
    #[error("win combination '{name}' has unsupported condition '{when}'")]
    UnknownPatternKind { name: String, when: String },

    /// A group string is not one of the supported families
    #[error("win combination group '{group}' is not supported")]
    UnknownGroup { group: String },

    /// A win combination is missing an attribute its condition requires
    #[error("win combination '{name}' is missing required attribute '{attribute}'")]
    MissingPatternAttribute {
        name: String,
        attribute: &'static str,
    },

    /// A linear win combination was declared under a non-linear group
    #[error("win combination '{name}' uses covered areas but group '{group}' is not a line family")]
    GroupNotLinear { name: String, group: String },

    /// A win combination multiplier or count is not positive
    #[error("win combination '{name}' attribute '{attribute}' must be positive")]
    NonPositivePatternValue {
        name: String,
        attribute: &'static str,
    },

    /// A linear win combination has no covered areas, or an area with no
    /// cells (which would match every symbol vacuously)
    #[error("win combination '{name}' has an empty covered area")]
    EmptyCoveredArea { name: String },

    /// A covered-area entry is not a `row:column` string
    #[error("covered area entry '{value}' is not of the form 'row:column'")]
    MalformedCellRef { value: String },

    /// A covered-area cell points outside the declared matrix
    #[error("win combination '{name}' covers cell {cell} outside the {rows}x{columns} matrix")]
    CoveredCellOutOfRange {
        name: String,
        cell: Cell,
        rows: usize,
        columns: usize,
    },
}

/// Errors raised while playing rounds.
///
/// These indicate broken engine invariants rather than operator mistakes;
/// a validated [`GameConfig`](crate::config::GameConfig) never produces them.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A cell distribution has no weight to draw from
    #[error("cell {cell} has no positive symbol weights to draw from")]
    EmptyDistribution { cell: Cell },

    /// The draw walk exhausted the weight table without selecting
    #[error("symbol draw fell through the weight table for cell {cell}")]
    DrawFellThrough { cell: Cell },

    /// The generated board has a hole where a cell was expected
    #[error("generated board has no symbol at cell {cell}")]
    MissingCell { cell: Cell },
}

/// Convenience alias for round-level fallible operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::WrongCellCount {
            expected: 9,
            actual: 8,
        };
        assert_eq!(err.to_string(), "expected probabilities for 9 cells, got 8");

        let err = ConfigError::UnknownGroup {
            group: "spiral".into(),
        };
        assert!(err.to_string().contains("spiral"));
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::MissingCell {
            cell: Cell::new(1, 2),
        };
        assert_eq!(err.to_string(), "generated board has no symbol at cell 1:2");
    }
}
