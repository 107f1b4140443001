// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pokerq cards types.
//!
//! This crate define types to create and parse cards:
//!
//! ```
//! # use pokerq_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "Kd".parse().unwrap();
//! assert_eq!(ah.to_string(), "Ah");
//! assert_eq!(kd.rank(), Rank::King);
//! ```
//!
//! a [parse_cards] function to parse a list of cards:
//!
//! ```
//! # use pokerq_cards::parse_cards;
//! let board = parse_cards("Qs 7s 2d").unwrap();
//! assert_eq!(board.len(), 3);
//! ```
//!
//! and a [Deck] type for shuffling, dealing, and iterating cards in the deck.
//!
//! For example to iterate through all the turn and river cards left after a
//! flop and two hole cards:
//!
//! ```
//! # use pokerq_cards::{parse_cards, Deck};
//! let dead = parse_cards("AsKs Qs7s2d").unwrap();
//! let mut counter = 0;
//! Deck::without(&dead).for_each(2, |cards| {
//!     assert_eq!(cards.len(), 2);
//!     counter += 1;
//! });
//! assert_eq!(counter, 1_081);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod card;
pub use card::{Card, Rank, Suit};

mod deck;
pub use deck::Deck;

mod parse;
pub use parse::{ParseError, parse_cards};
