// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Draws outs estimation.
//!
//! This is a quick heuristic that looks only at flush and straight draws, it
//! doesn't enumerate boards and it doesn't check if the outs make a winner.
use serde::{Deserialize, Serialize};

use crate::{Card, EvalError};

/// Outs for a flush draw, 13 cards of a suit minus the 4 known.
const FLUSH_DRAW_OUTS: u8 = 9;

/// Outs for an open ended straight draw.
const OPEN_ENDED_OUTS: u8 = 8;

/// Outs for an inside straight draw.
const GUTSHOT_OUTS: u8 = 4;

/// A kind of draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawKind {
    /// Four cards of the same suit.
    FlushDraw,
    /// Open ended or inside straight draw.
    StraightDraw,
    /// Draw to two pair.
    TwoPair,
    /// Draw to three of a kind.
    Trips,
}

/// The number of outs for each kind of draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outs {
    /// Flush draw outs.
    pub flush_draw: u8,
    /// Straight draw outs.
    pub straight_draw: u8,
    /// Two pair draw outs, not estimated yet.
    pub two_pair: u8,
    /// Trips draw outs, not estimated yet.
    pub trips: u8,
}

impl Outs {
    /// The outs for a kind of draw.
    pub fn get(&self, kind: DrawKind) -> u8 {
        match kind {
            DrawKind::FlushDraw => self.flush_draw,
            DrawKind::StraightDraw => self.straight_draw,
            DrawKind::TwoPair => self.two_pair,
            DrawKind::Trips => self.trips,
        }
    }

    /// Iterates through all the draws kinds and their outs.
    pub fn iter(&self) -> impl Iterator<Item = (DrawKind, u8)> + '_ {
        [
            DrawKind::FlushDraw,
            DrawKind::StraightDraw,
            DrawKind::TwoPair,
            DrawKind::Trips,
        ]
        .into_iter()
        .map(|kind| (kind, self.get(kind)))
    }
}

/// Estimates the outs for the given hole cards and board.
///
/// The board can have up to 5 cards.
pub fn outs(hole: [Card; 2], board: &[Card]) -> Result<Outs, EvalError> {
    if board.len() > 5 {
        return Err(EvalError::InvalidBoard(board.len()));
    }

    let cards = hole.iter().chain(board);
    let mut outs = Outs::default();

    let mut suits = [0u8; 4];
    let mut ranks = [false; 13];
    for c in cards {
        suits[c.suit() as usize] += 1;
        ranks[c.rank() as usize] = true;
    }

    if suits.contains(&4) {
        outs.flush_draw = FLUSH_DRAW_OUTS;
    }

    // Distinct rank values in ascending order.
    let distinct = ranks
        .iter()
        .enumerate()
        .filter(|(_, present)| **present)
        .map(|(r, _)| r as u8 + 2)
        .collect::<Vec<_>>();

    let spans = |width: u8| distinct.windows(4).any(|w| w[3] - w[0] == width);
    if spans(3) {
        outs.straight_draw = OPEN_ENDED_OUTS;
    } else if spans(4) {
        outs.straight_draw = GUTSHOT_OUTS;
    }

    Ok(outs)
}
