// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pokerq ranges and equity calculator.
//!
//! Hero equity is the fraction of showdowns hero wins, counting ties as half
//! a win, against one or more opponents holding random hands or hands from a
//! [Range]:
//!
//! ```
//! # use pokerq_equity::*;
//! let hero = parse_cards("7h 7d").unwrap();
//! let board = parse_cards("7s Qc 2h").unwrap();
//! let villain = Range::parse("AA,KK").unwrap();
//!
//! let calc = EquityCalculator::default();
//! let query = EquityQuery::new(&hero)
//!     .board(&board)
//!     .villain(&villain)
//!     .method(Method::Exact);
//! let equity = calc.equity(&query).unwrap();
//! assert!((equity - 0.9111).abs() < 1e-4);
//! ```
//!
//! Exact enumeration is used only when requested for a single opponent with a
//! small range on a flop, turn or river, all other queries are simulated. The
//! work is split across parallel tasks and the results are cached.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use thiserror::Error;

pub mod cache;
pub use cache::{CacheKey, EquityCache};

pub mod calculator;
pub use calculator::{
    CalculatorConfig, EquityCalculator, EquityQuery, EquityResult, MAX_OPPONENTS, Method,
};

pub mod odds;
pub use odds::{implied_odds, pot_odds};

pub mod range;
pub use range::{Combo, Range};

mod workers;

// Reexport cards types.
pub use pokerq_cards::{Card, ParseError, Rank, Suit, parse_cards};

/// Equity errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquityError {
    /// A card or range string that doesn't parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A scenario that cannot be played.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}
