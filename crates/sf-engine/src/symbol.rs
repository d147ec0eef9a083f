//! Symbol definitions and the interned symbol table

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Interned handle for a declared symbol.
///
/// Ids are handed out by [`SymbolTable::insert`] and index into that table,
/// so the board and the matcher can work with `Copy` values instead of
/// cloning names around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(u32);

impl SymbolId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Effect a bonus symbol applies to an already-won reward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusEffect {
    /// Adds a flat amount to the reward
    ExtraBonus { amount: f64 },
    /// Scales the reward by a factor
    MultiplyReward { factor: f64 },
    /// Does nothing; the symbol is decorative
    Miss,
}

impl BonusEffect {
    /// Apply this effect to a won reward
    pub fn apply(&self, reward: f64) -> f64 {
        match self {
            BonusEffect::ExtraBonus { amount } => reward + amount,
            BonusEffect::MultiplyReward { factor } => reward * factor,
            BonusEffect::Miss => reward,
        }
    }

    /// Miss effects never activate
    pub fn is_miss(&self) -> bool {
        matches!(self, BonusEffect::Miss)
    }
}

/// How a symbol participates in scoring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Pays out via win patterns; the multiplier scales the bet
    Standard { reward_multiplier: f64 },
    /// Modifies an already-won reward when present on the board
    Bonus { effect: BonusEffect },
}

/// A declared symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Name used on the board and in the game definition
    pub name: String,
    /// Standard or bonus behavior
    pub kind: SymbolKind,
}

impl Symbol {
    /// Create a standard symbol
    pub fn standard(name: impl Into<String>, reward_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Standard { reward_multiplier },
        }
    }

    /// Create a bonus symbol
    pub fn bonus(name: impl Into<String>, effect: BonusEffect) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Bonus { effect },
        }
    }

    /// Check if this symbol pays via win patterns
    pub fn is_standard(&self) -> bool {
        matches!(self.kind, SymbolKind::Standard { .. })
    }

    /// Check if this symbol modifies won rewards
    pub fn is_bonus(&self) -> bool {
        matches!(self.kind, SymbolKind::Bonus { .. })
    }

    /// Bonus effect, if this is a bonus symbol
    pub fn bonus_effect(&self) -> Option<BonusEffect> {
        match self.kind {
            SymbolKind::Bonus { effect } => Some(effect),
            SymbolKind::Standard { .. } => None,
        }
    }

    /// Transform a base amount through this symbol.
    ///
    /// Standard symbols scale by their multiplier; bonus symbols apply
    /// their effect.
    pub fn apply(&self, base: f64) -> f64 {
        match self.kind {
            SymbolKind::Standard { reward_multiplier } => base * reward_multiplier,
            SymbolKind::Bonus { effect } => effect.apply(base),
        }
    }
}

/// The full declared symbol set, with name/id lookup in both directions.
///
/// Insertion order is the iteration order; the config builder inserts in
/// ascending-name order so downstream traversals are deterministic.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol and return its id
    pub fn insert(&mut self, symbol: Symbol) -> Result<SymbolId, ConfigError> {
        if self.id_of(&symbol.name).is_some() {
            return Err(ConfigError::DuplicateSymbol { name: symbol.name });
        }
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        Ok(id)
    }

    /// Look up a symbol id by name
    pub fn id_of(&self, name: &str) -> Option<SymbolId> {
        self.symbols
            .iter()
            .position(|s| s.name == name)
            .map(|i| SymbolId(i as u32))
    }

    /// Symbol definition for an id issued by this table
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// Name of an id issued by this table
    pub fn name_of(&self, id: SymbolId) -> &str {
        &self.symbols[id.index()].name
    }

    /// Iterate all symbols with their ids
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }

    /// Ids of all standard symbols
    pub fn standard_ids(&self) -> Vec<SymbolId> {
        self.iter()
            .filter(|(_, s)| s.is_standard())
            .map(|(id, _)| id)
            .collect()
    }

    /// Ids of all bonus symbols
    pub fn bonus_ids(&self) -> Vec<SymbolId> {
        self.iter()
            .filter(|(_, s)| s.is_bonus())
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of declared symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if no symbols are declared
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
