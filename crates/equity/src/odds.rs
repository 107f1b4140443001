// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pot odds helpers.

/// The equity needed to call a bet of `bet` into a pot of `pot`.
///
/// Returns 0 when both pot and bet are zero.
pub fn pot_odds(pot: f64, bet: f64) -> f64 {
    let total = pot + bet;
    if total == 0.0 { 0.0 } else { bet / total }
}

/// Pot odds adjusted for the `future_bets` expected to be won when the draw
/// completes with probability `hit_probability`.
///
/// Returns 0 when the adjusted pot is zero.
pub fn implied_odds(pot: f64, bet: f64, future_bets: f64, hit_probability: f64) -> f64 {
    let total = pot + future_bets * hit_probability + bet;
    if total == 0.0 { 0.0 } else { bet / total }
}
