// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pokerq CLI.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use log::error;
use serde::Serialize;
use std::cmp::Ordering;

use pokerq_equity::{
    CalculatorConfig, EquityCalculator, EquityError, EquityQuery, EquityResult, Method, Range,
    implied_odds, pot_odds,
};
use pokerq_eval::{Card, EvaluatedHand, Outs, outs, parse_cards};

#[derive(Debug, Parser)]
#[clap(version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluates a 5, 6 or 7 cards hand, the first two cards are the hole cards.
    Eval {
        /// The hand cards, for example "Ah Kh Qh 7d 2c".
        cards: String,
        /// Compares the hand against another hand.
        #[clap(long, short)]
        against: Option<String>,
        /// Prints JSON output.
        #[clap(long)]
        json: bool,
    },
    /// Computes the hero equity.
    Equity(EquityArgs),
    /// Computes the equity needed to call a bet.
    Odds {
        /// The pot size before the bet.
        #[clap(long, short)]
        pot: f64,
        /// The bet to call.
        #[clap(long, short)]
        bet: f64,
        /// Bets expected to be won on later streets.
        #[clap(long, short, default_value_t = 0.0)]
        future: f64,
        /// Probability of completing the draw.
        #[clap(long, default_value_t = 0.0)]
        hit: f64,
    },
}

#[derive(Debug, clap::Args)]
struct EquityArgs {
    /// The hero hole cards.
    #[clap(long)]
    hero: String,
    /// The board cards.
    #[clap(long, short, default_value = "")]
    board: String,
    /// The opponents range, opponents get random hands if not set.
    #[clap(long, short)]
    range: Option<String>,
    /// Number of opponents.
    #[clap(long, short, default_value_t = 1)]
    opponents: usize,
    /// Number of simulation trials.
    #[clap(long, short, default_value_t = 10_000)]
    iterations: usize,
    /// The equity method, exact or simulated.
    #[clap(long, short, default_value_t = Method::Simulated)]
    method: Method,
    /// Seed for reproducible simulations.
    #[clap(long)]
    seed: Option<u64>,
    /// Number of parallel tasks.
    #[clap(long, short)]
    tasks: Option<usize>,
    /// Prints JSON output.
    #[clap(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct EvalReport {
    hand: EvaluatedHand,
    best: [Card; 5],
    strength: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    outs: Option<Outs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    against: Option<EvaluatedHand>,
}

/// Parsed cards for an equity query.
#[derive(Debug)]
struct Scenario {
    hero: Vec<Card>,
    board: Vec<Card>,
    villain: Option<Range>,
}

impl Scenario {
    fn parse(hero: &str, board: &str, range: Option<&str>) -> Result<Self, EquityError> {
        Ok(Self {
            hero: parse_cards(hero)?,
            board: parse_cards(board)?,
            villain: range.map(Range::parse).transpose()?,
        })
    }
}

fn eval(cards: &str, against: Option<&str>, json: bool) -> Result<()> {
    let cards = parse_cards(cards)?;
    let (hand, best) = EvaluatedHand::eval_with_best_hand(&cards)?;

    // The river has no draws.
    let outs = match cards.as_slice() {
        [c1, c2, board @ ..] if board.len() < 5 => Some(outs([*c1, *c2], board)?),
        _ => None,
    };

    let against = against
        .map(|s| -> Result<EvaluatedHand> { Ok(EvaluatedHand::eval(&parse_cards(s)?)?) })
        .transpose()?;

    let report = EvalReport {
        hand,
        best,
        strength: hand.strength(),
        outs,
        against,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let best = best.map(|c| c.to_string()).join(" ");
    println!("Hand:     {}", report.hand);
    println!("Best:     {best}");
    println!("Strength: {:.4}", report.strength);

    if let Some(outs) = report.outs {
        for (kind, n) in outs.iter().filter(|(_, n)| *n > 0) {
            println!("Outs:     {kind:?} {n}");
        }
    }

    if let Some(other) = report.against {
        let outcome = match report.hand.cmp(&other) {
            Ordering::Greater => "wins against",
            Ordering::Less => "loses against",
            Ordering::Equal => "ties with",
        };

        println!("Result:   {outcome} {other}");
    }

    Ok(())
}

fn equity(args: EquityArgs) -> Result<()> {
    let scenario = Scenario::parse(&args.hero, &args.board, args.range.as_deref())?;

    let mut config = CalculatorConfig {
        seed: args.seed,
        ..Default::default()
    };

    if let Some(tasks) = args.tasks {
        if tasks == 0 {
            bail!("The number of tasks must be at least 1");
        }

        config.num_tasks = tasks;
    }

    let mut query = EquityQuery::new(&scenario.hero)
        .board(&scenario.board)
        .opponents(args.opponents)
        .iterations(args.iterations)
        .method(args.method);

    if let Some(range) = &scenario.villain {
        query = query.villain(range);
    }

    let calc = EquityCalculator::new(config);
    let result: EquityResult = calc.compute(&query)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Equity: {:.2}%", result.equity * 100.0);
        println!(
            "Trials: {} wins {} ties {} ({})",
            result.trials, result.wins, result.ties, result.method
        );
    }

    Ok(())
}

fn odds(pot: f64, bet: f64, future: f64, hit: f64) -> Result<()> {
    if pot < 0.0 || bet < 0.0 || future < 0.0 {
        bail!("Pot and bets must not be negative");
    }

    if !(0.0..=1.0).contains(&hit) {
        bail!("The hit probability must be between 0 and 1");
    }

    println!("Pot odds:     {:.2}%", pot_odds(pot, bet) * 100.0);
    if future > 0.0 {
        println!(
            "Implied odds: {:.2}%",
            implied_odds(pot, bet, future, hit) * 100.0
        );
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Eval {
            cards,
            against,
            json,
        } => eval(&cards, against.as_deref(), json),
        Command::Equity(args) => equity(args),
        Command::Odds {
            pot,
            bet,
            future,
            hit,
        } => odds(pot, bet, future, hit),
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_equity_args() {
        let cli = Cli::parse_from([
            "pokerq",
            "equity",
            "--hero",
            "AsKs",
            "--board",
            "Qs 7s 2d",
            "--range",
            "QQ,AQ",
            "--method",
            "exact",
        ]);

        let Command::Equity(args) = cli.command else {
            panic!("not an equity command");
        };

        assert_eq!(args.method, Method::Exact);
        assert_eq!(args.opponents, 1);

        let scenario = Scenario::parse(&args.hero, &args.board, args.range.as_deref()).unwrap();
        assert_eq!(scenario.hero.len(), 2);
        assert_eq!(scenario.board.len(), 3);
        assert_eq!(scenario.villain.map(|r| r.len()), Some(22));
    }

    #[test]
    fn scenario_parse_errors() {
        let err = Scenario::parse("AsKx", "", None).unwrap_err();
        assert!(matches!(err, EquityError::Parse(ref e) if e.token() == "Kx"));

        let err = Scenario::parse("AsKs", "", Some("AA,ZZ")).unwrap_err();
        assert_eq!(err.to_string(), "invalid token 'ZZ': invalid rank");
    }
}
