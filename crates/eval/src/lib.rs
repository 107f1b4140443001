// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pokerq hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. Five cards hands are
//! classified directly, for 6 and 7 cards hands every 5 cards subset is
//! classified and the best one is kept.
//!
//! To use the evaluator parse a hand and use [EvaluatedHand] to evaluate and
//! compare hands:
//!
//! ```
//! # use pokerq_eval::*;
//! let flush = parse_cards("Ah Kh 9h 4h 2h").unwrap();
//! let straight = parse_cards("9c 8d 7s 6c 5h").unwrap();
//! let v1 = EvaluatedHand::eval(&flush).unwrap();
//! let v2 = EvaluatedHand::eval(&straight).unwrap();
//! assert_eq!(v1.category(), HandCategory::Flush);
//! assert!(v1 > v2);
//! assert!(v1.strength() > v2.strength());
//! ```
//!
//! The [outs] function gives a quick estimate of the flush and straight draws
//! for a player hole cards and a partial board.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use thiserror::Error;

pub mod eval;
pub use eval::{EvaluatedHand, HandCategory, compare, evaluate, strength};

pub mod outs;
pub use outs::{DrawKind, Outs, outs};

// Reexport cards types.
pub use pokerq_cards::{Card, Deck, ParseError, Rank, Suit, parse_cards};

/// Hand evaluation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Fewer than 5 cards to evaluate.
    #[error("hand evaluation needs at least 5 cards, got {0}")]
    InsufficientCards(usize),
    /// More than 7 cards to evaluate.
    #[error("hand evaluation takes at most 7 cards, got {0}")]
    TooManyCards(usize),
    /// A board with more than 5 cards.
    #[error("a board has at most 5 cards, got {0}")]
    InvalidBoard(usize),
}
