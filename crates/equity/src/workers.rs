// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel equity workers.
use rand::prelude::*;
use std::{cmp::Ordering, iter::Sum, ops, panic, thread};

use pokerq_cards::{Card, Deck};
use pokerq_eval::EvaluatedHand;

use crate::Combo;

/// Showdown counters for a worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u64,
    pub ties: u64,
    pub trials: u64,
}

impl Tally {
    /// Records the hero outcome for a trial.
    #[inline]
    pub fn record(&mut self, outcome: Ordering) {
        self.trials += 1;
        match outcome {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Less => {}
        }
    }

    /// Wins plus half the ties over the number of trials, 0.5 if there are no
    /// trials.
    pub fn equity(&self) -> f64 {
        if self.trials == 0 {
            0.5
        } else {
            (self.wins as f64 + 0.5 * self.ties as f64) / self.trials as f64
        }
    }
}

impl ops::Add for Tally {
    type Output = Tally;

    fn add(self, rhs: Tally) -> Tally {
        Tally {
            wins: self.wins + rhs.wins,
            ties: self.ties + rhs.ties,
            trials: self.trials + rhs.trials,
        }
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
        iter.fold(Tally::default(), |acc, t| acc + t)
    }
}

/// Splits `0..total` across `num_tasks` scoped threads and sums the tallies.
///
/// The `f` closure takes the task identifier and the part of the work it has
/// to do, parts sizes differ at most by one.
pub fn par_tally<F>(num_tasks: usize, total: usize, f: F) -> Tally
where
    F: Fn(usize, ops::Range<usize>) -> Tally + Sync,
{
    let num_tasks = num_tasks.clamp(1, total.max(1));
    let per_task = total / num_tasks;
    let extra = total % num_tasks;

    thread::scope(|s| {
        let handles = (0..num_tasks)
            .map(|task_id| {
                let start = task_id * per_task + task_id.min(extra);
                let end = start + per_task + usize::from(task_id < extra);
                let f = &f;
                s.spawn(move || f(task_id, start..end))
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .sum()
    })
}

/// A validated scenario, the deck and the villain combinations exclude the
/// hero and board cards.
#[derive(Debug)]
pub struct Scenario<'a> {
    pub hero: [Card; 2],
    pub board: &'a [Card],
    pub deck: &'a Deck,
    pub villain: Option<&'a [Combo]>,
    pub opponents: usize,
}

impl Scenario<'_> {
    /// Hero cards followed by the board, the board completion goes at the end.
    fn hero_hand(&self) -> [Card; 7] {
        let mut hand = [self.hero[0]; 7];
        hand[..2].copy_from_slice(&self.hero);
        hand[2..2 + self.board.len()].copy_from_slice(self.board);
        hand
    }

    fn cards_needed(&self) -> usize {
        5 - self.board.len()
    }
}

/// Plays `trials` random showdowns.
///
/// Each trial deals the opponents, completes the board from the cards left
/// and credits a win if hero beats all of them or a tie if hero ties the best
/// of them. A trial with no dealt opponent is a win.
pub fn simulate<R: Rng>(scenario: &Scenario<'_>, trials: usize, rng: &mut R) -> Tally {
    let needed = scenario.cards_needed();

    let mut cards = scenario.deck.cards().to_vec();
    let mut hero_hand = scenario.hero_hand();
    let mut villain_hand = hero_hand;
    let mut candidates: Vec<&Combo> = Vec::new();
    let mut holes: Vec<[Card; 2]> = Vec::with_capacity(scenario.opponents);
    let mut tally = Tally::default();

    for _ in 0..trials {
        holes.clear();

        // Range hands go first so that the board is uniform over the cards
        // they leave.
        let mut dealt = 0u64;
        if let Some(combos) = scenario.villain {
            for _ in 0..scenario.opponents {
                candidates.clear();
                candidates.extend(combos.iter().filter(|c| c.mask() & dealt == 0));

                // Skip the opponent if the range is exhausted.
                if let Some(combo) = candidates.choose(rng) {
                    dealt |= combo.mask();
                    holes.push(combo.cards());
                }
            }
        }

        // Each dealt combination hides at most two of the sampled cards.
        let random_holes = match scenario.villain {
            Some(_) => 0,
            None => scenario.opponents,
        };
        let (sample, _) = cards.partial_shuffle(rng, needed + 2 * (holes.len() + random_holes));
        let sample: &[Card] = sample;

        let undealt = sample.iter().filter(|c| c.mask() & dealt == 0);
        for (slot, card) in hero_hand[7 - needed..].iter_mut().zip(undealt) {
            *slot = *card;
        }

        if random_holes > 0 {
            holes.extend(sample[needed..].chunks_exact(2).map(|h| [h[0], h[1]]));
        }

        villain_hand[2..].copy_from_slice(&hero_hand[2..]);
        let hero_value = EvaluatedHand::eval7(&hero_hand);

        let mut tie = false;
        let mut lost = false;

        for hole in &holes {
            villain_hand[..2].copy_from_slice(hole);
            match hero_value.cmp(&EvaluatedHand::eval7(&villain_hand)) {
                Ordering::Less => {
                    lost = true;
                    break;
                }
                Ordering::Equal => tie = true,
                Ordering::Greater => {}
            }
        }

        tally.record(if lost {
            Ordering::Less
        } else if tie {
            Ordering::Equal
        } else {
            Ordering::Greater
        });
    }

    tally
}

/// Plays all the showdowns against each combination for all the board
/// completions.
pub fn enumerate(scenario: &Scenario<'_>, combos: &[Combo]) -> Tally {
    let needed = scenario.cards_needed();
    let mut hero_hand = scenario.hero_hand();
    let mut villain_hand = hero_hand;
    let mut tally = Tally::default();

    for combo in combos {
        villain_hand[..2].copy_from_slice(&combo.cards());

        if needed == 0 {
            let hero_value = EvaluatedHand::eval7(&hero_hand);
            tally.record(hero_value.cmp(&EvaluatedHand::eval7(&villain_hand)));
            continue;
        }

        let mut deck = scenario.deck.clone();
        combo.cards().into_iter().for_each(|c| deck.remove(c));

        deck.for_each(needed, |completion| {
            hero_hand[7 - needed..].copy_from_slice(completion);
            villain_hand[7 - needed..].copy_from_slice(completion);

            let hero_value = EvaluatedHand::eval7(&hero_hand);
            tally.record(hero_value.cmp(&EvaluatedHand::eval7(&villain_hand)));
        });
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Range;
    use pokerq_cards::parse_cards;

    fn hole(s: &str) -> [Card; 2] {
        let cards = parse_cards(s).unwrap();
        [cards[0], cards[1]]
    }

    #[test]
    fn tally_equity() {
        let mut t = Tally::default();
        assert_eq!(t.equity(), 0.5);

        t.record(Ordering::Greater);
        t.record(Ordering::Equal);
        t.record(Ordering::Less);
        t.record(Ordering::Less);
        assert_eq!(t.trials, 4);
        assert_eq!(t.equity(), 1.5 / 4.0);

        let sum = [t, t, Tally::default()].into_iter().sum::<Tally>();
        assert_eq!(sum.wins, 2);
        assert_eq!(sum.ties, 2);
        assert_eq!(sum.trials, 8);
    }

    #[test]
    fn par_tally_partitions() {
        for (num_tasks, total) in [(1, 10), (3, 10), (4, 2), (8, 0), (7, 1000)] {
            let tally = par_tally(num_tasks, total, |_, r| Tally {
                wins: r.len() as u64,
                ties: 0,
                trials: r.len() as u64,
            });

            assert_eq!(tally.trials, total as u64);
        }

        // Parts are contiguous and sizes differ at most by one.
        let sizes = parking_lot::Mutex::new(Vec::new());
        par_tally(3, 10, |task_id, r| {
            sizes.lock().push((task_id, r));
            Tally::default()
        });

        let mut sizes = sizes.into_inner();
        sizes.sort_by_key(|(id, _)| *id);
        let ranges = sizes.into_iter().map(|(_, r)| r).collect::<Vec<_>>();
        assert_eq!(ranges, vec![0..4, 4..7, 7..10]);
    }

    #[test]
    fn enumerate_river() {
        let hero = hole("Ah Ad");
        let board = parse_cards("Ks 7c 2d 9h 3s").unwrap();
        let dead = [&hero[..], &board[..]].concat();
        let deck = Deck::without(&dead);
        let combos = Range::parse("KK,AA").unwrap().without(&dead).sorted();

        let scenario = Scenario {
            hero,
            board: &board,
            deck: &deck,
            villain: Some(&combos),
            opponents: 1,
        };

        // Three KK combos make a set, the AsAc combo ties.
        let tally = enumerate(&scenario, &combos);
        assert_eq!(tally.trials, 4);
        assert_eq!(tally.wins, 0);
        assert_eq!(tally.ties, 1);
    }

    #[test]
    fn simulate_exhausted_range_wins() {
        let hero = hole("Ah Ad");
        let board = parse_cards("As 7c 2d").unwrap();
        let dead = [&hero[..], &board[..]].concat();
        let deck = Deck::without(&dead);
        let combos = Range::parse("AA").unwrap().without(&dead).sorted();
        assert!(combos.is_empty());

        let scenario = Scenario {
            hero,
            board: &board,
            deck: &deck,
            villain: Some(&combos),
            opponents: 2,
        };

        let mut rng = SmallRng::seed_from_u64(7);
        let tally = simulate(&scenario, 100, &mut rng);
        assert_eq!(tally.wins, 100);
    }

    #[test]
    fn simulate_deals_distinct_hands() {
        // The only combination beats hero on every trial.
        let hero = hole("7h 2c");
        let board = parse_cards("Ks Qd 3c 4h 9s").unwrap();
        let dead = [&hero[..], &board[..]].concat();
        let deck = Deck::without(&dead);
        let combos = Range::parse("AsAh").unwrap().sorted();

        let scenario = Scenario {
            hero,
            board: &board,
            deck: &deck,
            villain: Some(&combos),
            opponents: 2,
        };

        let mut rng = SmallRng::seed_from_u64(11);
        let tally = simulate(&scenario, 50, &mut rng);
        assert_eq!(tally.trials, 50);
        assert_eq!(tally.wins + tally.ties, 0);
    }

    #[test]
    fn tie_then_loss_gets_no_credit() {
        // Hero and 7h6s play the same king high, AhAd has a pair.
        let hero = hole("7c 6d");
        let board = parse_cards("2c 3d 8h 9s Kc").unwrap();
        let dead = [&hero[..], &board[..]].concat();
        let deck = Deck::without(&dead);

        let both = Range::parse("7h6s,AhAd").unwrap().sorted();
        let scenario = Scenario {
            hero,
            board: &board,
            deck: &deck,
            villain: Some(&both),
            opponents: 2,
        };

        let mut rng = SmallRng::seed_from_u64(5);
        let tally = simulate(&scenario, 2_000, &mut rng);
        assert_eq!(tally.trials, 2_000);
        assert_eq!(tally.wins + tally.ties, 0);
        assert_eq!(tally.equity(), 0.0);

        // The second opponent is skipped, every trial is a tie.
        let tie_only = Range::parse("7h6s").unwrap().sorted();
        let scenario = Scenario {
            villain: Some(&tie_only),
            ..scenario
        };

        let tally = simulate(&scenario, 2_000, &mut rng);
        assert_eq!(tally.ties, 2_000);
        assert_eq!(tally.equity(), 0.5);
    }

    #[test]
    fn range_cards_stay_off_the_board() {
        // With a single combination the board can never pair the villain aces.
        let hero = hole("Kh Kd");
        let board = parse_cards("Qc 7d 2h").unwrap();
        let dead = [&hero[..], &board[..]].concat();
        let deck = Deck::without(&dead);
        let combos = Range::parse("AsAc").unwrap().sorted();

        let scenario = Scenario {
            hero,
            board: &board,
            deck: &deck,
            villain: Some(&combos),
            opponents: 1,
        };

        let mut rng = SmallRng::seed_from_u64(13);
        let simulated = simulate(&scenario, 100_000, &mut rng).equity();
        let exact = enumerate(&scenario, &combos).equity();
        assert!((simulated - exact).abs() < 0.01, "{simulated} {exact}");
    }
}
