//! # sf-engine — Scratch Card Game Engine
//!
//! Plays probability-driven scratch-card rounds: a weighted random draw
//! fills a rows x columns matrix with symbols, declarative win patterns are
//! matched against the matrix, and a reward is computed from the bet, the
//! matched pattern multipliers, and any activated bonus symbols.
//!
//! ## Features
//!
//! - **Weighted Draws**: per-cell symbol distributions with integer weights
//! - **Pattern Families**: repetition counts plus four line families, at
//!   most one credited pattern per family and symbol
//! - **Bonus Symbols**: add, multiply, or miss effects on won rounds
//! - **Validated Definitions**: JSON game definitions checked up front, the
//!   engine itself never re-validates
//! - **Batch Simulation**: parallel seed-reproducible sessions with RTP and
//!   hit-rate statistics
//!
//! ## Architecture
//!
//! ```text
//! GameConfig (validated JSON definition)
//!     │
//!     ├── CellDistribution (weighted draw per cell)
//!     │        v
//!     │      Board ──> PatternMatcher ──> MatchOutcome
//!     │                                       │
//!     └── SymbolTable ──────> score() <───────┘
//!                                │
//!                                v
//!                           RoundResult
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod probability;
pub mod round;
pub mod scorer;
pub mod stats;
pub mod symbol;

pub use board::*;
pub use config::*;
pub use error::*;
pub use matcher::*;
pub use pattern::*;
pub use probability::*;
pub use round::*;
pub use scorer::*;
pub use stats::*;
pub use symbol::*;
