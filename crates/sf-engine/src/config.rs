//! Game definition loading and validation
//!
//! A game definition is a JSON document declaring the matrix dimensions,
//! the symbol set, per-cell probability weights, and the win combinations.
//! The document is deserialized into raw structs first, then validated
//! and converted into the typed [`GameConfig`] the engine runs on. Any
//! inconsistency fails the whole load with a [`ConfigError`] naming the
//! offending part.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::board::Cell;
use crate::error::ConfigError;
use crate::pattern::{PatternGroup, WinPattern};
use crate::probability::CellDistribution;
use crate::symbol::{BonusEffect, Symbol, SymbolId, SymbolTable};

/// Raw top-level document, one-to-one with the JSON shape
#[derive(Debug, Deserialize)]
struct GameDocument {
    rows: usize,
    columns: usize,
    symbols: BTreeMap<String, SymbolDocument>,
    probabilities: ProbabilitiesDocument,
    win_combinations: BTreeMap<String, PatternDocument>,
}

#[derive(Debug, Deserialize)]
struct SymbolDocument {
    #[serde(rename = "type")]
    kind: String,
    reward_multiplier: Option<f64>,
    extra: Option<f64>,
    impact: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbabilitiesDocument {
    standard_symbols: Vec<CellWeightsDocument>,
    bonus_symbols: SymbolWeightsDocument,
}

#[derive(Debug, Deserialize)]
struct CellWeightsDocument {
    row: usize,
    column: usize,
    symbols: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct SymbolWeightsDocument {
    symbols: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct PatternDocument {
    when: String,
    reward_multiplier: f64,
    count: Option<usize>,
    group: Option<String>,
    covered_areas: Option<Vec<Vec<String>>>,
}

/// A validated game definition, ready to play rounds.
///
/// Construction goes through [`GameConfig::load`] or
/// [`GameConfig::from_json`] only, so a value of this type always
/// satisfies the invariants the engine relies on: full cell coverage,
/// positive weights, declared symbols everywhere, in-bounds covered
/// areas.
#[derive(Debug, Clone)]
pub struct GameConfig {
    rows: usize,
    columns: usize,
    symbols: SymbolTable,
    distributions: Vec<CellDistribution>,
    patterns: Vec<WinPattern>,
}

impl GameConfig {
    /// Load and validate a definition from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::FileNotFound {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Validate a definition held in a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let doc: GameDocument =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        Self::build(doc)
    }

    /// Matrix height
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Matrix width
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The declared symbol set
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Per-cell weight distributions, bonus weights already merged in
    pub fn distributions(&self) -> &[CellDistribution] {
        &self.distributions
    }

    /// Win patterns in ascending-name order
    pub fn patterns(&self) -> &[WinPattern] {
        &self.patterns
    }

    fn build(doc: GameDocument) -> Result<Self, ConfigError> {
        if doc.rows == 0 || doc.columns == 0 {
            return Err(ConfigError::InvalidDimensions {
                rows: doc.rows,
                columns: doc.columns,
            });
        }

        let symbols = build_symbols(&doc.symbols)?;
        let distributions = build_distributions(&doc, &symbols)?;
        let patterns = build_patterns(&doc)?;

        Ok(Self {
            rows: doc.rows,
            columns: doc.columns,
            symbols,
            distributions,
            patterns,
        })
    }
}

/// Intern symbols in ascending-name order
fn build_symbols(docs: &BTreeMap<String, SymbolDocument>) -> Result<SymbolTable, ConfigError> {
    let mut table = SymbolTable::new();
    for (name, doc) in docs {
        let symbol = match doc.kind.as_str() {
            "standard" => {
                let multiplier = require_attr(name, "reward_multiplier", doc.reward_multiplier)?;
                ensure_positive(name, "reward_multiplier", multiplier)?;
                Symbol::standard(name.clone(), multiplier)
            }
            "bonus" => {
                let impact =
                    doc.impact
                        .as_deref()
                        .ok_or_else(|| ConfigError::MissingSymbolAttribute {
                            name: name.clone(),
                            attribute: "impact",
                        })?;
                let effect = match impact {
                    "extra_bonus" => {
                        let amount = require_attr(name, "extra", doc.extra)?;
                        ensure_positive(name, "extra", amount)?;
                        BonusEffect::ExtraBonus { amount }
                    }
                    "multiply_reward" => {
                        let factor =
                            require_attr(name, "reward_multiplier", doc.reward_multiplier)?;
                        ensure_positive(name, "reward_multiplier", factor)?;
                        BonusEffect::MultiplyReward { factor }
                    }
                    "miss" => BonusEffect::Miss,
                    other => {
                        return Err(ConfigError::UnknownImpact {
                            name: name.clone(),
                            impact: other.to_string(),
                        });
                    }
                };
                Symbol::bonus(name.clone(), effect)
            }
            other => {
                return Err(ConfigError::UnknownSymbolType {
                    name: name.clone(),
                    kind: other.to_string(),
                });
            }
        };
        table.insert(symbol)?;
    }
    Ok(table)
}

fn require_attr(
    name: &str,
    attribute: &'static str,
    value: Option<f64>,
) -> Result<f64, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingSymbolAttribute {
        name: name.to_string(),
        attribute,
    })
}

fn ensure_positive(name: &str, attribute: &'static str, value: f64) -> Result<(), ConfigError> {
    if value <= 0.0 {
        return Err(ConfigError::NonPositiveSymbolValue {
            name: name.to_string(),
            attribute,
            value,
        });
    }
    Ok(())
}

/// Build one distribution per cell, appending the shared bonus weights
/// to every cell's standard weights.
fn build_distributions(
    doc: &GameDocument,
    symbols: &SymbolTable,
) -> Result<Vec<CellDistribution>, ConfigError> {
    let expected = doc.rows * doc.columns;
    let entries = &doc.probabilities.standard_symbols;
    if entries.len() != expected {
        return Err(ConfigError::WrongCellCount {
            expected,
            actual: entries.len(),
        });
    }

    let bonus_entries = validate_bonus_weights(&doc.probabilities.bonus_symbols, symbols)?;

    let mut seen = HashSet::with_capacity(expected);
    let mut distributions = Vec::with_capacity(expected);
    for entry in entries {
        let cell = Cell::new(entry.row, entry.column);
        if !cell.in_bounds(doc.rows, doc.columns) {
            return Err(ConfigError::CellOutOfRange {
                cell,
                rows: doc.rows,
                columns: doc.columns,
            });
        }
        if !seen.insert(cell) {
            return Err(ConfigError::DuplicateCell { cell });
        }

        let mut dist = CellDistribution::new(
            cell,
            Vec::with_capacity(entry.symbols.len() + bonus_entries.len()),
        );
        for (name, &weight) in &entry.symbols {
            let id = symbols
                .id_of(name)
                .ok_or_else(|| ConfigError::UndeclaredSymbol { name: name.clone() })?;
            if !symbols.get(id).is_standard() {
                return Err(ConfigError::NotAStandardSymbol {
                    name: name.clone(),
                    cell,
                });
            }
            if weight == 0 {
                return Err(ConfigError::NonPositiveWeight {
                    name: name.clone(),
                    cell,
                });
            }
            dist.push(id, weight);
        }

        for id in symbols.standard_ids() {
            if dist.weight_of(id).is_none() {
                return Err(ConfigError::MissingStandardWeight {
                    name: symbols.name_of(id).to_string(),
                    cell,
                });
            }
        }

        for &(id, weight) in &bonus_entries {
            dist.push(id, weight);
        }

        if dist.is_empty() {
            return Err(ConfigError::EmptyCellWeights { cell });
        }
        distributions.push(dist);
    }
    Ok(distributions)
}

/// Check the shared bonus weight table: declared bonus symbols only,
/// positive weights, full coverage of the declared bonus set.
fn validate_bonus_weights(
    weights: &SymbolWeightsDocument,
    symbols: &SymbolTable,
) -> Result<Vec<(SymbolId, u32)>, ConfigError> {
    let mut entries = Vec::with_capacity(weights.symbols.len());
    for (name, &weight) in &weights.symbols {
        let id = symbols
            .id_of(name)
            .ok_or_else(|| ConfigError::UndeclaredSymbol { name: name.clone() })?;
        if !symbols.get(id).is_bonus() {
            return Err(ConfigError::NotABonusSymbol { name: name.clone() });
        }
        if weight == 0 {
            return Err(ConfigError::NonPositiveBonusWeight { name: name.clone() });
        }
        entries.push((id, weight));
    }

    for id in symbols.bonus_ids() {
        if !entries.iter().any(|(e, _)| *e == id) {
            return Err(ConfigError::MissingBonusWeight {
                name: symbols.name_of(id).to_string(),
            });
        }
    }
    Ok(entries)
}

/// Build win patterns in ascending-name order
fn build_patterns(doc: &GameDocument) -> Result<Vec<WinPattern>, ConfigError> {
    let mut patterns = Vec::with_capacity(doc.win_combinations.len());
    for (name, p) in &doc.win_combinations {
        if p.reward_multiplier <= 0.0 {
            return Err(ConfigError::NonPositivePatternValue {
                name: name.clone(),
                attribute: "reward_multiplier",
            });
        }
        let pattern = match p.when.as_str() {
            "same_symbols" => {
                let count = p.count.ok_or_else(|| ConfigError::MissingPatternAttribute {
                    name: name.clone(),
                    attribute: "count",
                })?;
                if count == 0 {
                    return Err(ConfigError::NonPositivePatternValue {
                        name: name.clone(),
                        attribute: "count",
                    });
                }
                WinPattern::same_symbols(name.clone(), count, p.reward_multiplier)
            }
            "linear_symbols" => {
                let group = p
                    .group
                    .as_deref()
                    .ok_or_else(|| ConfigError::MissingPatternAttribute {
                        name: name.clone(),
                        attribute: "group",
                    })?;
                let group = PatternGroup::parse(group)?;
                if !group.is_linear() {
                    return Err(ConfigError::GroupNotLinear {
                        name: name.clone(),
                        group: group.as_str().to_string(),
                    });
                }
                let covered_areas = build_covered_areas(name, p, doc.rows, doc.columns)?;
                WinPattern::linear(name.clone(), group, p.reward_multiplier, covered_areas)
            }
            other => {
                return Err(ConfigError::UnknownPatternKind {
                    name: name.clone(),
                    when: other.to_string(),
                });
            }
        };
        patterns.push(pattern);
    }
    Ok(patterns)
}

fn build_covered_areas(
    name: &str,
    p: &PatternDocument,
    rows: usize,
    columns: usize,
) -> Result<Vec<Vec<Cell>>, ConfigError> {
    let areas_doc = p
        .covered_areas
        .as_ref()
        .ok_or_else(|| ConfigError::MissingPatternAttribute {
            name: name.to_string(),
            attribute: "covered_areas",
        })?;
    if areas_doc.is_empty() {
        return Err(ConfigError::EmptyCoveredArea {
            name: name.to_string(),
        });
    }

    let mut covered_areas = Vec::with_capacity(areas_doc.len());
    for area in areas_doc {
        if area.is_empty() {
            return Err(ConfigError::EmptyCoveredArea {
                name: name.to_string(),
            });
        }
        let mut cells = Vec::with_capacity(area.len());
        for value in area {
            let cell = Cell::parse(value)?;
            if !cell.in_bounds(rows, columns) {
                return Err(ConfigError::CoveredCellOutOfRange {
                    name: name.to_string(),
                    cell,
                    rows,
                    columns,
                });
            }
            cells.push(cell);
        }
        covered_areas.push(cells);
    }
    Ok(covered_areas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// 2x2 definition with two standard and two bonus symbols
    fn base_definition() -> serde_json::Value {
        json!({
            "rows": 2,
            "columns": 2,
            "symbols": {
                "A": {"type": "standard", "reward_multiplier": 5.0},
                "B": {"type": "standard", "reward_multiplier": 3.0},
                "+500": {"type": "bonus", "impact": "extra_bonus", "extra": 500.0},
                "MISS": {"type": "bonus", "impact": "miss"}
            },
            "probabilities": {
                "standard_symbols": [
                    {"row": 0, "column": 0, "symbols": {"A": 1, "B": 2}},
                    {"row": 0, "column": 1, "symbols": {"A": 1, "B": 2}},
                    {"row": 1, "column": 0, "symbols": {"A": 1, "B": 2}},
                    {"row": 1, "column": 1, "symbols": {"A": 1, "B": 2}}
                ],
                "bonus_symbols": {"symbols": {"+500": 1, "MISS": 4}}
            },
            "win_combinations": {
                "same_symbol_3_times": {
                    "when": "same_symbols", "count": 3,
                    "reward_multiplier": 1.0, "group": "same_symbols"
                },
                "same_symbols_horizontally": {
                    "when": "linear_symbols", "group": "horizontally_linear_symbols",
                    "reward_multiplier": 2.0,
                    "covered_areas": [["0:0", "0:1"], ["1:0", "1:1"]]
                }
            }
        })
    }

    fn parse(value: serde_json::Value) -> Result<GameConfig, ConfigError> {
        GameConfig::from_json(&value.to_string())
    }

    #[test]
    fn test_parses_valid_definition() {
        let config = parse(base_definition()).unwrap();

        assert_eq!(config.rows(), 2);
        assert_eq!(config.columns(), 2);
        assert_eq!(config.symbols().len(), 4);
        assert_eq!(config.distributions().len(), 4);
        assert_eq!(config.patterns().len(), 2);
        assert_eq!(config.patterns()[0].name, "same_symbol_3_times");
        assert_eq!(config.patterns()[1].name, "same_symbols_horizontally");
    }

    #[test]
    fn test_bonus_weights_merged_into_every_cell() {
        let config = parse(base_definition()).unwrap();
        let plus = config.symbols().id_of("+500").unwrap();
        let miss = config.symbols().id_of("MISS").unwrap();

        for dist in config.distributions() {
            assert_eq!(dist.weight_of(plus), Some(1));
            assert_eq!(dist.weight_of(miss), Some(4));
            // 1 + 2 standard, 1 + 4 bonus
            assert_eq!(dist.total_weight(), 8);
        }
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let mut doc = base_definition();
        doc["rows"] = json!(0);
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::InvalidDimensions { .. }
        ));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = GameConfig::from_json("scratch cards").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_rejects_unknown_symbol_type() {
        let mut doc = base_definition();
        doc["symbols"]["A"]["type"] = json!("wildcard");
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::UnknownSymbolType { name, .. } if name == "A"
        ));
    }

    #[test]
    fn test_rejects_standard_without_multiplier() {
        let mut doc = base_definition();
        doc["symbols"]["A"]
            .as_object_mut()
            .unwrap()
            .remove("reward_multiplier");
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::MissingSymbolAttribute { attribute: "reward_multiplier", .. }
        ));
    }

    #[test]
    fn test_rejects_negative_multiplier() {
        let mut doc = base_definition();
        doc["symbols"]["A"]["reward_multiplier"] = json!(-5.0);
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::NonPositiveSymbolValue { .. }
        ));
    }

    #[test]
    fn test_rejects_bonus_without_impact() {
        let mut doc = base_definition();
        doc["symbols"]["+500"].as_object_mut().unwrap().remove("impact");
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::MissingSymbolAttribute { attribute: "impact", .. }
        ));
    }

    #[test]
    fn test_rejects_unknown_impact() {
        let mut doc = base_definition();
        doc["symbols"]["+500"]["impact"] = json!("jackpot");
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::UnknownImpact { .. }
        ));
    }

    #[test]
    fn test_rejects_wrong_cell_count() {
        let mut doc = base_definition();
        doc["probabilities"]["standard_symbols"]
            .as_array_mut()
            .unwrap()
            .pop();
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::WrongCellCount { expected: 4, actual: 3 }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_cell() {
        let mut doc = base_definition();
        doc["probabilities"]["standard_symbols"][3]["row"] = json!(5);
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::CellOutOfRange { .. }
        ));
    }

    #[test]
    fn test_rejects_duplicate_cell() {
        let mut doc = base_definition();
        doc["probabilities"]["standard_symbols"][3]["row"] = json!(0);
        doc["probabilities"]["standard_symbols"][3]["column"] = json!(0);
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::DuplicateCell { .. }
        ));
    }

    #[test]
    fn test_rejects_undeclared_weight_symbol() {
        let mut doc = base_definition();
        doc["probabilities"]["standard_symbols"][0]["symbols"]["Z"] = json!(1);
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::UndeclaredSymbol { name } if name == "Z"
        ));
    }

    #[test]
    fn test_rejects_bonus_symbol_in_cell_weights() {
        let mut doc = base_definition();
        doc["probabilities"]["standard_symbols"][0]["symbols"]["MISS"] = json!(1);
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::NotAStandardSymbol { .. }
        ));
    }

    #[test]
    fn test_rejects_zero_weight() {
        let mut doc = base_definition();
        doc["probabilities"]["standard_symbols"][1]["symbols"]["A"] = json!(0);
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::NonPositiveWeight { .. }
        ));
    }

    #[test]
    fn test_rejects_missing_standard_weight() {
        let mut doc = base_definition();
        doc["probabilities"]["standard_symbols"][2]["symbols"]
            .as_object_mut()
            .unwrap()
            .remove("B");
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::MissingStandardWeight { name, .. } if name == "B"
        ));
    }

    #[test]
    fn test_rejects_missing_bonus_weight() {
        let mut doc = base_definition();
        doc["probabilities"]["bonus_symbols"]["symbols"]
            .as_object_mut()
            .unwrap()
            .remove("MISS");
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::MissingBonusWeight { name } if name == "MISS"
        ));
    }

    #[test]
    fn test_rejects_standard_symbol_in_bonus_weights() {
        let mut doc = base_definition();
        doc["probabilities"]["bonus_symbols"]["symbols"]["A"] = json!(1);
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::NotABonusSymbol { name } if name == "A"
        ));
    }

    #[test]
    fn test_rejects_unknown_pattern_condition() {
        let mut doc = base_definition();
        doc["win_combinations"]["same_symbol_3_times"]["when"] = json!("clustered_symbols");
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::UnknownPatternKind { .. }
        ));
    }

    #[test]
    fn test_rejects_count_pattern_without_count() {
        let mut doc = base_definition();
        doc["win_combinations"]["same_symbol_3_times"]
            .as_object_mut()
            .unwrap()
            .remove("count");
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::MissingPatternAttribute { attribute: "count", .. }
        ));
    }

    #[test]
    fn test_rejects_unknown_group() {
        let mut doc = base_definition();
        doc["win_combinations"]["same_symbols_horizontally"]["group"] = json!("spiral_symbols");
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::UnknownGroup { .. }
        ));
    }

    #[test]
    fn test_rejects_linear_pattern_in_count_group() {
        let mut doc = base_definition();
        doc["win_combinations"]["same_symbols_horizontally"]["group"] = json!("same_symbols");
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::GroupNotLinear { .. }
        ));
    }

    #[test]
    fn test_rejects_linear_pattern_without_areas() {
        let mut doc = base_definition();
        doc["win_combinations"]["same_symbols_horizontally"]
            .as_object_mut()
            .unwrap()
            .remove("covered_areas");
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::MissingPatternAttribute { attribute: "covered_areas", .. }
        ));
    }

    #[test]
    fn test_rejects_empty_covered_area() {
        let mut doc = base_definition();
        doc["win_combinations"]["same_symbols_horizontally"]["covered_areas"] = json!([[]]);
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::EmptyCoveredArea { .. }
        ));
    }

    #[test]
    fn test_rejects_malformed_cell_ref() {
        let mut doc = base_definition();
        doc["win_combinations"]["same_symbols_horizontally"]["covered_areas"] =
            json!([["0-0", "0-1"]]);
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::MalformedCellRef { .. }
        ));
    }

    #[test]
    fn test_rejects_covered_cell_out_of_range() {
        let mut doc = base_definition();
        doc["win_combinations"]["same_symbols_horizontally"]["covered_areas"] =
            json!([["0:0", "0:7"]]);
        assert!(matches!(
            parse(doc).unwrap_err(),
            ConfigError::CoveredCellOutOfRange { .. }
        ));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = GameConfig::load("no_such_definition.json").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        assert!(err.to_string().contains("no_such_definition.json"));
    }
}
