// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! A hand value is a [HandCategory] plus up to five tiebreaker ranks whose
//! meaning depends on the category:
//!
//! | category                        | tiebreakers                      |
//! |---------------------------------|----------------------------------|
//! | straight, straight/royal flush  | straight high card (5 for wheel) |
//! | four of a kind                  | quads, kicker                    |
//! | full house                      | trips, pair                      |
//! | flush, high card                | five ranks descending            |
//! | three of a kind                 | trips, two kickers descending    |
//! | two pair                        | high pair, low pair, kicker      |
//! | one pair                        | pair, three kickers descending   |
//!
//! Values compare by category first and then by tiebreakers so the derived
//! ordering of [EvaluatedHand] is the poker ordering.
use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};
use std::{cmp::Ordering, fmt};

use crate::{Card, EvalError};

/// The category of a five cards hand, from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// No pairs, straights or flushes.
    HighCard = 0,
    /// Two cards of the same rank.
    OnePair,
    /// Two different pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// A straight with all cards of the same suit.
    StraightFlush,
    /// An ace high straight flush.
    RoyalFlush,
}

impl HandCategory {
    /// The number of hand categories.
    pub const COUNT: usize = 10;

    /// All categories from the weakest to the strongest.
    pub fn categories() -> impl DoubleEndedIterator<Item = HandCategory> {
        use HandCategory::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        };

        write!(f, "{name}")
    }
}

/// The value of the best five cards hand.
///
/// Tiebreakers are stored zero padded so that hands of the same category
/// compare lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EvaluatedHand {
    category: HandCategory,
    tiebreakers: [u8; 5],
    len: u8,
}

impl EvaluatedHand {
    /// Evaluates a 5, 6 or 7 cards hand.
    pub fn eval(cards: &[Card]) -> Result<Self, EvalError> {
        check_hand_size(cards)?;
        Ok(best_hand(cards).0)
    }

    /// Evaluates a 5, 6 or 7 cards hand and returns the five cards that make
    /// the best hand.
    pub fn eval_with_best_hand(cards: &[Card]) -> Result<(Self, [Card; 5]), EvalError> {
        check_hand_size(cards)?;
        Ok(best_hand(cards))
    }

    /// Evaluates a 7 cards hand.
    #[inline]
    pub fn eval7(cards: &[Card; 7]) -> Self {
        best_hand(cards).0
    }

    /// The hand category.
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// The hand tiebreakers ranks from 2 to 14.
    pub fn tiebreakers(&self) -> &[u8] {
        &self.tiebreakers[..self.len as usize]
    }

    /// A normalized hand strength in `[0, 1]`.
    ///
    /// Each category has its own band of width 0.1 and tiebreakers place the
    /// hand inside the band, so any hand scores more than every hand of a
    /// weaker category. This is a ranking score and not a probability.
    pub fn strength(&self) -> f64 {
        let mut frac = 0.0;
        let mut scale = 1.0;
        for &t in self.tiebreakers() {
            scale /= 15.0;
            frac += t as f64 * scale;
        }

        ((self.category as u8 as f64 + frac) / HandCategory::COUNT as f64).min(1.0)
    }

    fn new(category: HandCategory, ranks: &[u8]) -> Self {
        let mut tiebreakers = [0; 5];
        tiebreakers[..ranks.len()].copy_from_slice(ranks);
        Self {
            category,
            tiebreakers,
            len: ranks.len() as u8,
        }
    }
}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreakers())
    }
}

impl Serialize for EvaluatedHand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("EvaluatedHand", 2)?;
        s.serialize_field("category", &self.category)?;
        s.serialize_field("tiebreakers", self.tiebreakers())?;
        s.end()
    }
}

/// Evaluates a 5, 6 or 7 cards hand.
pub fn evaluate(cards: &[Card]) -> Result<EvaluatedHand, EvalError> {
    EvaluatedHand::eval(cards)
}

/// Compares two hands, [Ordering::Greater] if the first hand wins.
pub fn compare(a: &[Card], b: &[Card]) -> Result<Ordering, EvalError> {
    Ok(evaluate(a)?.cmp(&evaluate(b)?))
}

/// Computes a hand normalized strength, see [EvaluatedHand::strength].
pub fn strength(cards: &[Card]) -> Result<f64, EvalError> {
    Ok(evaluate(cards)?.strength())
}

fn check_hand_size(cards: &[Card]) -> Result<(), EvalError> {
    match cards.len() {
        n if n < 5 => Err(EvalError::InsufficientCards(n)),
        n if n > 7 => Err(EvalError::TooManyCards(n)),
        _ => Ok(()),
    }
}

/// Scans all 5 cards subsets and returns the best one.
fn best_hand(cards: &[Card]) -> (EvaluatedHand, [Card; 5]) {
    let n = cards.len();
    debug_assert!((5..=7).contains(&n));

    let mut h = [cards[0], cards[1], cards[2], cards[3], cards[4]];
    let mut best = (eval5(&h), h);
    if n == 5 {
        return best;
    }

    for c1 in 0..n {
        h[0] = cards[c1];

        for c2 in (c1 + 1)..n {
            h[1] = cards[c2];

            for c3 in (c2 + 1)..n {
                h[2] = cards[c3];

                for c4 in (c3 + 1)..n {
                    h[3] = cards[c4];

                    for c5 in (c4 + 1)..n {
                        h[4] = cards[c5];

                        let value = eval5(&h);
                        if value > best.0 {
                            best = (value, h);
                        }
                    }
                }
            }
        }
    }

    best
}

/// Classifies exactly five cards.
fn eval5(cards: &[Card; 5]) -> EvaluatedHand {
    let mut counts = [0u8; 13];
    for c in cards {
        counts[c.rank() as usize] += 1;
    }

    // (count, rank value) from the highest rank, then by count descending,
    // the sort is stable so ranks stay descending within the same count.
    let mut groups = [(0u8, 0u8); 5];
    let mut n = 0;
    for (rank, &count) in counts.iter().enumerate().rev() {
        if count > 0 {
            groups[n] = (count, rank as u8 + 2);
            n += 1;
        }
    }

    let groups = &mut groups[..n];
    groups.sort_by(|a, b| b.0.cmp(&a.0));

    let mut ranks = [0u8; 5];
    for (r, g) in ranks.iter_mut().zip(groups.iter()) {
        *r = g.1;
    }
    let ranks = &ranks[..n];

    let suit = cards[0].suit();
    let is_flush = cards.iter().all(|c| c.suit() == suit);

    let straight_high = if n == 5 {
        if ranks[0] - ranks[4] == 4 {
            Some(ranks[0])
        } else if ranks == [14, 5, 4, 3, 2] {
            Some(5)
        } else {
            None
        }
    } else {
        None
    };

    use HandCategory::*;

    // Five distinct ranks, no pairs to check.
    if let Some(high) = straight_high {
        let category = match (is_flush, high) {
            (true, 14) => RoyalFlush,
            (true, _) => StraightFlush,
            _ => Straight,
        };

        return EvaluatedHand::new(category, &[high]);
    }

    let category = match (groups[0].0, groups[1].0) {
        (4, _) => FourOfAKind,
        (3, 2) => FullHouse,
        _ if is_flush => Flush,
        (3, _) => ThreeOfAKind,
        (2, 2) => TwoPair,
        (2, _) => OnePair,
        _ => HighCard,
    };

    EvaluatedHand::new(category, ranks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokerq_cards::{Deck, parse_cards};

    fn eval(s: &str) -> EvaluatedHand {
        EvaluatedHand::eval(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn royal_flush() {
        let v = eval("As Ks Qs Js Ts");
        assert_eq!(v.category(), HandCategory::RoyalFlush);
        assert_eq!(v.tiebreakers(), &[14]);
    }

    #[test]
    fn straight_flush() {
        let v = eval("9h 8h 7h 6h 5h");
        assert_eq!(v.category(), HandCategory::StraightFlush);
        assert_eq!(v.tiebreakers(), &[9]);

        let v = eval("Ad 2d 3d 4d 5d");
        assert_eq!(v.category(), HandCategory::StraightFlush);
        assert_eq!(v.tiebreakers(), &[5]);
    }

    #[test]
    fn four_of_a_kind() {
        let v = eval("Ah As Ad Ac Kh");
        assert_eq!(v.category(), HandCategory::FourOfAKind);
        assert_eq!(v.tiebreakers(), &[14, 13]);

        let v = eval("3h Ks 3d 3c 3s");
        assert_eq!(v.tiebreakers(), &[3, 13]);
    }

    #[test]
    fn full_house() {
        let v = eval("Kh Ks Kd 7h 7s");
        assert_eq!(v.category(), HandCategory::FullHouse);
        assert_eq!(v.tiebreakers(), &[13, 7]);

        // Trips rank decides before the pair rank.
        let v = eval("7h 7s 7d Kh Ks");
        assert_eq!(v.tiebreakers(), &[7, 13]);
        assert!(eval("8h 8s 8d 2h 2s") > v);
    }

    #[test]
    fn flush() {
        let v = eval("Ah Kh Qh 9h 2h");
        assert_eq!(v.category(), HandCategory::Flush);
        assert_eq!(v.tiebreakers(), &[14, 13, 12, 9, 2]);
    }

    #[test]
    fn straight() {
        let v = eval("9h 8d 7s 6c 5h");
        assert_eq!(v.category(), HandCategory::Straight);
        assert_eq!(v.tiebreakers(), &[9]);

        let v = eval("Ah Kd Qs Jc Th");
        assert_eq!(v.category(), HandCategory::Straight);
        assert_eq!(v.tiebreakers(), &[14]);
    }

    #[test]
    fn wheel_straight() {
        let wheel = eval("Ah 2d 3s 4c 5h");
        assert_eq!(wheel.category(), HandCategory::Straight);
        assert_eq!(wheel.tiebreakers(), &[5]);

        // A six high straight beats the wheel.
        assert!(eval("2h 3d 4s 5c 6h") > wheel);

        // No wrap around straights.
        assert_eq!(eval("Qh Kd As 2c 3h").category(), HandCategory::HighCard);
    }

    #[test]
    fn three_of_a_kind() {
        let v = eval("Qh Qs Qd 7h 2s");
        assert_eq!(v.category(), HandCategory::ThreeOfAKind);
        assert_eq!(v.tiebreakers(), &[12, 7, 2]);
    }

    #[test]
    fn two_pair() {
        let v = eval("Jh Js 9d 9h 2s");
        assert_eq!(v.category(), HandCategory::TwoPair);
        assert_eq!(v.tiebreakers(), &[11, 9, 2]);

        let v = eval("2h 2s 9d 9h Ks");
        assert_eq!(v.tiebreakers(), &[9, 2, 13]);
    }

    #[test]
    fn one_pair() {
        let v = eval("Th Ts 8d 6h 2s");
        assert_eq!(v.category(), HandCategory::OnePair);
        assert_eq!(v.tiebreakers(), &[10, 8, 6, 2]);
    }

    #[test]
    fn high_card() {
        let v = eval("Ah Ks Jd 9h 2s");
        assert_eq!(v.category(), HandCategory::HighCard);
        assert_eq!(v.tiebreakers(), &[14, 13, 11, 9, 2]);
    }

    #[test]
    fn seven_cards() {
        let v = eval("As Ks Qs Js Ts 9h 2d");
        assert_eq!(v.category(), HandCategory::RoyalFlush);

        // A flush hidden with a pair in the same cards.
        let cards = parse_cards("Kh 9h 9c 7h 6d 5h 2h").unwrap();
        assert_eq!(
            EvaluatedHand::eval(&cards).unwrap().category(),
            HandCategory::Flush
        );

        let (v, best) = EvaluatedHand::eval_with_best_hand(&cards).unwrap();
        assert_eq!(v.tiebreakers(), &[13, 9, 7, 5, 2]);
        assert!(best.iter().all(|c| c.suit() == pokerq_cards::Suit::Hearts));

        // Six cards with two pairs plus a better kicker.
        let v = eval("Jh Js 9d 9h 2s Ad");
        assert_eq!(v.category(), HandCategory::TwoPair);
        assert_eq!(v.tiebreakers(), &[11, 9, 14]);

        // Three pairs keep the two highest.
        let v = eval("Jh Js 9d 9h 2s 2d 5c");
        assert_eq!(v.tiebreakers(), &[11, 9, 5]);
    }

    #[test]
    fn eval7_matches_eval() {
        let cards = parse_cards("7s 7d 7h Qc 2h Qs 3d").unwrap();
        let arr: [Card; 7] = cards.clone().try_into().unwrap();
        assert_eq!(EvaluatedHand::eval7(&arr), EvaluatedHand::eval(&cards).unwrap());
        assert_eq!(EvaluatedHand::eval7(&arr).category(), HandCategory::FullHouse);
        assert_eq!(EvaluatedHand::eval7(&arr).tiebreakers(), &[7, 12]);
    }

    #[test]
    fn insufficient_cards() {
        let cards = parse_cards("As Ks Qs Js").unwrap();
        assert_eq!(
            EvaluatedHand::eval(&cards),
            Err(EvalError::InsufficientCards(4))
        );
        assert_eq!(evaluate(&[]), Err(EvalError::InsufficientCards(0)));

        let cards = parse_cards("As Ks Qs Js Ts 9s 8s 7s").unwrap();
        assert_eq!(evaluate(&cards), Err(EvalError::TooManyCards(8)));
    }

    #[test]
    fn permutations() {
        for hand in [
            "As Ks Qs Js Ts",
            "Ah 2d 3s 4c 5h",
            "Kh Ks Kd 7h 7s",
            "Jh Js 9d 9h 2s",
            "Th Ts 8d 6h 2s",
            "Ah Ks Jd 9h 2s",
        ] {
            let cards = parse_cards(hand).unwrap();
            let expected = evaluate(&cards).unwrap();

            // Heap's algorithm over all 120 orderings.
            let mut p = cards.clone();
            let mut c = [0usize; 5];
            let mut count = 1;
            let mut i = 0;
            while i < 5 {
                if c[i] < i {
                    if i % 2 == 0 {
                        p.swap(0, i);
                    } else {
                        p.swap(c[i], i);
                    }
                    assert_eq!(evaluate(&p).unwrap(), expected, "{hand} as {p:?}");
                    count += 1;
                    c[i] += 1;
                    i = 0;
                } else {
                    c[i] = 0;
                    i += 1;
                }
            }

            assert_eq!(count, 120);
        }
    }

    #[test]
    fn compare_hands() {
        let aces_kings = parse_cards("Ah As Kd Kh 2s").unwrap();
        let queens = parse_cards("Qh Qs Qd 7h 2c").unwrap();
        assert_eq!(compare(&aces_kings, &queens), Ok(Ordering::Less));
        assert_eq!(compare(&queens, &aces_kings), Ok(Ordering::Greater));

        // Same values in different suits.
        let other = parse_cards("Ad Ac Ks Kc 2h").unwrap();
        assert_eq!(compare(&aces_kings, &other), Ok(Ordering::Equal));

        // Kicker decides.
        let better_kicker = parse_cards("Ad Ac Ks Kc 3h").unwrap();
        assert_eq!(compare(&aces_kings, &better_kicker), Ok(Ordering::Less));

        assert!(compare(&aces_kings[..4], &other).is_err());
    }

    #[test]
    fn hand_strength() {
        let v = strength(&parse_cards("As Ks Qs Js Ts").unwrap()).unwrap();
        assert!(v > 0.99 && v <= 1.0);

        let weakest_flush = strength(&parse_cards("7h 5h 4h 3h 2h").unwrap()).unwrap();
        let best_straight = strength(&parse_cards("Ah Kd Qs Jc Th").unwrap()).unwrap();
        assert!(weakest_flush > best_straight);

        let low = strength(&parse_cards("7h 5d 4s 3c 2h").unwrap()).unwrap();
        assert!(low >= 0.0 && low < 0.1);
    }

    // Evaluates all 2.6M five cards hands.
    #[test]
    fn all_five_cards_hands() {
        let mut counts = [0usize; HandCategory::COUNT];
        let mut min_strength = [f64::MAX; HandCategory::COUNT];
        let mut max_strength = [f64::MIN; HandCategory::COUNT];

        Deck::default().for_each(5, |cards| {
            let v = evaluate(cards).unwrap();
            let s = v.strength();
            let idx = v.category() as usize;
            counts[idx] += 1;
            min_strength[idx] = min_strength[idx].min(s);
            max_strength[idx] = max_strength[idx].max(s);
        });

        assert_eq!(
            counts,
            [1_302_540, 1_098_240, 123_552, 54_912, 10_200, 5_108, 3_744, 624, 36, 4]
        );

        // Categories bands never overlap.
        for idx in 1..HandCategory::COUNT {
            assert!(max_strength[idx - 1] < min_strength[idx]);
        }

        assert!(min_strength[0] >= 0.0);
        assert!(max_strength[HandCategory::COUNT - 1] <= 1.0);
    }
}
