// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards tokens parsing.
use thiserror::Error;

use crate::Card;

/// Error returned when a card or range token cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid token '{token}': {reason}")]
pub struct ParseError {
    token: String,
    reason: &'static str,
}

impl ParseError {
    /// Creates an error for the given raw token.
    pub fn new(token: impl Into<String>, reason: &'static str) -> Self {
        Self {
            token: token.into(),
            reason,
        }
    }

    /// The offending token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Why the token was rejected.
    pub fn reason(&self) -> &str {
        self.reason
    }
}

/// Parses a list of cards.
///
/// Cards can be separated by whitespace or commas, or written back to back,
/// so `"As Kd"`, `"As,Kd"` and `"AsKd"` all parse to the same two cards.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseError> {
    let mut cards = Vec::new();

    for word in s
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
    {
        if !word.is_ascii() || word.len() % 2 != 0 {
            return Err(ParseError::new(word, "cards must be two characters each"));
        }

        for pos in (0..word.len()).step_by(2) {
            cards.push(word[pos..pos + 2].parse()?);
        }
    }

    Ok(cards)
}
