// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Prints the preflop equity chart, suited hands above the diagonal.
//
// ```bash
// $ cargo r --release --example chart -- --num-players 2
// ```
use clap::{Parser, value_parser};
use std::time::Instant;

use pokerq_equity::*;

fn separator() {
    print!("|");
    for _ in 0..13 {
        print!("-----|");
    }
    println!();
}

#[derive(Debug, Parser)]
struct Cli {
    /// The number of opposing players.
    #[clap(long, short, default_value_t = 1, value_parser = value_parser!(u8).range(1..=6))]
    num_players: u8,
    /// The number of trials for each hand.
    #[clap(long, short, default_value_t = 100_000)]
    iterations: usize,
}

fn main() -> Result<(), EquityError> {
    let cli = Cli::parse();
    let calc = EquityCalculator::default();

    separator();

    let now = Instant::now();

    for r1 in Rank::ranks().rev() {
        let mut labels = Vec::with_capacity(13);
        let mut equities = Vec::with_capacity(13);

        for r2 in Rank::ranks().rev() {
            let hero = if r1 <= r2 {
                // Offsuit or pair
                [Card::new(r2, Suit::Hearts), Card::new(r1, Suit::Spades)]
            } else {
                // Suited cards
                [Card::new(r1, Suit::Hearts), Card::new(r2, Suit::Hearts)]
            };

            let [c1, c2] = hero;
            if c1.rank() == c2.rank() {
                labels.push(format!("{}{} ", c1.rank(), c2.rank()));
            } else if c1.suit() == c2.suit() {
                labels.push(format!("{}{}s", c1.rank(), c2.rank()));
            } else {
                labels.push(format!("{}{}o", c1.rank(), c2.rank()));
            }

            let query = EquityQuery::new(&hero)
                .opponents(cli.num_players as usize)
                .iterations(cli.iterations);
            equities.push(calc.equity(&query)? * 100.0);
        }

        print!("|");
        for label in labels {
            print!(" {label} |");
        }

        println!();

        print!("|");
        for equity in &equities {
            print!(" {:2.0}% |", equity.round());
        }
        println!();

        separator();
    }

    println!("Elapsed: {:.3}s", now.elapsed().as_secs_f64());

    Ok(())
}
