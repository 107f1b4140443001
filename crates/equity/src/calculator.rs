// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity calculator.
use log::{debug, info};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroUsize, str::FromStr, thread, time::Instant};

use pokerq_cards::{Card, Deck, ParseError};

use crate::{
    EquityError, Range,
    cache::{CacheKey, EquityCache},
    workers::{self, Scenario, Tally},
};

/// Maximum number of opponents, with 23 players there are 52 - 46 = 6 cards
/// left for the board.
pub const MAX_OPPONENTS: usize = 22;

/// The equity computation method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Enumerates all the board completions for all villain combinations.
    Exact,
    /// Monte Carlo simulation.
    #[default]
    Simulated,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Exact => write!(f, "exact"),
            Method::Simulated => write!(f, "simulated"),
        }
    }
}

impl FromStr for Method {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Method::Exact),
            "simulated" | "montecarlo" | "monte_carlo" => Ok(Method::Simulated),
            _ => Err(ParseError::new(s, "unknown method")),
        }
    }
}

/// Calculator configuration.
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    /// Number of parallel tasks.
    pub num_tasks: usize,
    /// Exact enumeration is used only for ranges with fewer combinations.
    pub exact_range_limit: usize,
    /// Seed for reproducible simulations, if `None` each task is seeded by the
    /// OS.
    pub seed: Option<u64>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            num_tasks: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            exact_range_limit: 100,
            seed: None,
        }
    }
}

/// An equity computation request.
///
/// ```
/// # use pokerq_equity::*;
/// let hero = parse_cards("Js 4s").unwrap();
/// let board = parse_cards("Ks 7s 2d").unwrap();
/// let range = Range::parse("AK,KQ").unwrap();
/// let query = EquityQuery::new(&hero)
///     .board(&board)
///     .villain(&range)
///     .method(Method::Exact);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EquityQuery<'a> {
    hero: &'a [Card],
    board: &'a [Card],
    villain: Option<&'a Range>,
    opponents: usize,
    iterations: usize,
    method: Method,
}

impl<'a> EquityQuery<'a> {
    /// A query for hero cards against one random hand preflop.
    pub fn new(hero: &'a [Card]) -> Self {
        Self {
            hero,
            board: &[],
            villain: None,
            opponents: 1,
            iterations: 10_000,
            method: Method::Simulated,
        }
    }

    /// Sets the board cards.
    pub fn board(mut self, board: &'a [Card]) -> Self {
        self.board = board;
        self
    }

    /// Deals the opponents hands from this range.
    pub fn villain(mut self, range: &'a Range) -> Self {
        self.villain = Some(range);
        self
    }

    /// Sets the number of opponents.
    pub fn opponents(mut self, opponents: usize) -> Self {
        self.opponents = opponents;
        self
    }

    /// Sets the number of simulation trials.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the requested method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }
}

/// An equity computation result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquityResult {
    /// Wins plus half the ties over the number of trials.
    pub equity: f64,
    /// Number of trials hero won.
    pub wins: u64,
    /// Number of trials hero tied.
    pub ties: u64,
    /// Number of trials.
    pub trials: u64,
    /// The method used for the computation.
    pub method: Method,
}

/// Equity calculator with a results cache.
#[derive(Debug, Clone, Default)]
pub struct EquityCalculator {
    config: CalculatorConfig,
    cache: EquityCache,
}

impl EquityCalculator {
    /// Creates a calculator with an empty cache.
    pub fn new(config: CalculatorConfig) -> Self {
        Self::with_cache(config, EquityCache::new())
    }

    /// Creates a calculator that uses a shared cache.
    pub fn with_cache(config: CalculatorConfig, cache: EquityCache) -> Self {
        Self { config, cache }
    }

    /// The calculator configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// The calculator cache.
    pub fn cache(&self) -> &EquityCache {
        &self.cache
    }

    /// Hero equity for the query.
    ///
    /// Results are cached by hero cards, board, villain range and number of
    /// opponents, a cached value is returned regardless of the requested
    /// method and iterations.
    pub fn equity(&self, query: &EquityQuery<'_>) -> Result<f64, EquityError> {
        let hero = validate(query)?;

        let key = CacheKey::new(query.hero, query.board, query.villain, query.opponents);
        if let Some(equity) = self.cache.get(&key) {
            debug!("Cache hit equity {equity:.4}");
            return Ok(equity);
        }

        let result = self.run(query, hero);
        Ok(self.cache.insert(key, result.equity))
    }

    /// Computes the hero equity with the raw counts, the cache is not used.
    pub fn compute(&self, query: &EquityQuery<'_>) -> Result<EquityResult, EquityError> {
        let hero = validate(query)?;
        Ok(self.run(query, hero))
    }

    fn run(&self, query: &EquityQuery<'_>, hero: [Card; 2]) -> EquityResult {
        let start = Instant::now();
        let method = self.select_method(query);

        let dead = [&hero[..], query.board].concat();
        let villain = query.villain.map(|r| r.without(&dead).sorted());

        // No valid villain hand, hero wins by default.
        if villain.as_ref().is_some_and(Vec::is_empty) {
            debug!("Villain range is empty after removing dead cards");
            return EquityResult {
                equity: 1.0,
                wins: 0,
                ties: 0,
                trials: 0,
                method,
            };
        }

        let deck = Deck::without(&dead);
        let scenario = Scenario {
            hero,
            board: query.board,
            deck: &deck,
            villain: villain.as_deref(),
            opponents: query.opponents,
        };

        let tally = match (method, scenario.villain) {
            (Method::Exact, Some(combos)) => {
                workers::par_tally(self.config.num_tasks, combos.len(), |_, part| {
                    workers::enumerate(&scenario, &combos[part])
                })
            }
            _ => workers::par_tally(self.config.num_tasks, query.iterations, |task_id, part| {
                let mut rng = self.task_rng(task_id);
                workers::simulate(&scenario, part.len(), &mut rng)
            }),
        };

        let result = result_from(tally, method);

        info!(
            "{} equity {:.4} for {}{} in {} trials in {}ms",
            method,
            result.equity,
            hero[0],
            hero[1],
            result.trials,
            start.elapsed().as_millis()
        );

        result
    }

    /// Exact enumeration needs a small range, one opponent and a flop.
    fn select_method(&self, query: &EquityQuery<'_>) -> Method {
        if query.method == Method::Simulated {
            return Method::Simulated;
        }

        let eligible = query.opponents == 1
            && query.board.len() >= 3
            && query
                .villain
                .is_some_and(|r| r.len() < self.config.exact_range_limit);

        if eligible {
            Method::Exact
        } else {
            debug!("Exact enumeration not feasible, using simulation");
            Method::Simulated
        }
    }

    /// Each task has its own stream, seeded from the configured seed when
    /// present.
    fn task_rng(&self, task_id: usize) -> SmallRng {
        match self.config.seed {
            Some(seed) => {
                SmallRng::seed_from_u64(seed ^ (task_id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
            }
            None => SmallRng::from_os_rng(),
        }
    }
}

fn result_from(tally: Tally, method: Method) -> EquityResult {
    EquityResult {
        equity: tally.equity(),
        wins: tally.wins,
        ties: tally.ties,
        trials: tally.trials,
        method,
    }
}

fn validate(query: &EquityQuery<'_>) -> Result<[Card; 2], EquityError> {
    let invalid = |msg: String| Err(EquityError::InvalidScenario(msg));

    let &[c1, c2] = query.hero else {
        return invalid(format!("hero needs 2 cards, got {}", query.hero.len()));
    };

    if !matches!(query.board.len(), 0 | 3 | 4 | 5) {
        return invalid(format!(
            "board must have 0, 3, 4 or 5 cards, got {}",
            query.board.len()
        ));
    }

    if !(1..=MAX_OPPONENTS).contains(&query.opponents) {
        return invalid(format!(
            "opponents must be between 1 and {MAX_OPPONENTS}, got {}",
            query.opponents
        ));
    }

    if query.iterations == 0 {
        return invalid("iterations must be at least 1".to_string());
    }

    let mut seen = 0u64;
    for card in query.hero.iter().chain(query.board) {
        if seen & card.mask() != 0 {
            return invalid(format!("card {card} is used more than once"));
        }

        seen |= card.mask();
    }

    Ok([c1, c2])
}
