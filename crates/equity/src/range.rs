// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hands ranges.
//!
//! A range is parsed from a comma separated list of tokens:
//!
//! | token     | combinations                                  |
//! |-----------|-----------------------------------------------|
//! | `AA`      | a pocket pair, 6 combinations                 |
//! | `77+`     | pocket pairs from sevens up to aces           |
//! | `77-99`   | pocket pairs from sevens to nines             |
//! | `AKs`     | suited, 4 combinations                        |
//! | `AKo`     | offsuit, 12 combinations                      |
//! | `AK`      | suited and offsuit, 16 combinations           |
//! | `A2s+`    | A2s, A3s, up to AKs, also with `o` or no qualifier |
//! | `AsKh`    | a single combination                          |
//!
//! Whitespace and empty tokens are ignored.
use ahash::AHashSet;
use std::{fmt, str::FromStr};

use pokerq_cards::{Card, ParseError, Rank, Suit};

/// A two cards combination.
///
/// The cards are stored with the highest index card first so that the same two
/// cards always make the same combination.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Combo([Card; 2]);

impl Combo {
    /// Creates a combination, returns `None` if the two cards are the same.
    pub fn new(c1: Card, c2: Card) -> Option<Combo> {
        match c1.index().cmp(&c2.index()) {
            std::cmp::Ordering::Greater => Some(Self([c1, c2])),
            std::cmp::Ordering::Less => Some(Self([c2, c1])),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The combination cards.
    pub fn cards(&self) -> [Card; 2] {
        self.0
    }

    /// Cards bit mask.
    #[inline]
    pub fn mask(&self) -> u64 {
        self.0[0].mask() | self.0[1].mask()
    }

    /// Checks if this combination uses a card.
    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(&card)
    }

    /// A key that orders combinations canonically.
    fn sort_key(&self) -> usize {
        (self.0[0].index() << 6) | self.0[1].index()
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

impl fmt::Debug for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Combo({}{})", self.0[0], self.0[1])
    }
}

/// A set of two cards combinations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Range {
    combos: AHashSet<Combo>,
}

impl Range {
    /// Parses a range string like `"QQ+,AKs,AQo"`.
    pub fn parse(s: &str) -> Result<Range, ParseError> {
        let mut range = Range::default();

        let cleaned = s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        for token in cleaned.split(',').filter(|t| !t.is_empty()) {
            range.parse_token(token)?;
        }

        Ok(range)
    }

    /// Number of combinations in this range.
    pub fn len(&self) -> usize {
        self.combos.len()
    }

    /// Checks if this range has no combinations.
    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// Checks if the range contains a combination.
    pub fn contains(&self, combo: &Combo) -> bool {
        self.combos.contains(combo)
    }

    /// Iterates the combinations in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Combo> {
        self.combos.iter()
    }

    /// The combinations in canonical order.
    pub fn sorted(&self) -> Vec<Combo> {
        let mut combos = self.combos.iter().copied().collect::<Vec<_>>();
        combos.sort_unstable_by_key(|c| std::cmp::Reverse(c.sort_key()));
        combos
    }

    /// Removes all the combinations that use any of the dead cards.
    pub fn filter_conflicting(&mut self, dead: &[Card]) {
        let dead = dead.iter().fold(0u64, |mask, c| mask | c.mask());
        self.combos.retain(|c| c.mask() & dead == 0);
    }

    /// Returns a copy of this range without the combinations that use any of
    /// the dead cards.
    pub fn without(&self, dead: &[Card]) -> Range {
        let mut range = self.clone();
        range.filter_conflicting(dead);
        range
    }

    fn parse_token(&mut self, token: &str) -> Result<(), ParseError> {
        let err = |reason| ParseError::new(token, reason);
        let rank = |c: char| Rank::from_char(c).ok_or_else(|| err("invalid rank"));

        let chars = token.chars().collect::<Vec<_>>();
        match chars.as_slice() {
            &[r1, r2] => {
                let (hi, lo) = (rank(r1)?, rank(r2)?);
                if hi == lo {
                    self.add_pair(hi);
                } else {
                    self.add_ranks(hi, lo, Suitedness::Any);
                }
            }
            &[r1, r2, '+'] => {
                let (hi, lo) = (rank(r1)?, rank(r2)?);
                if hi == lo {
                    Rank::ranks().filter(|&r| r >= hi).for_each(|r| self.add_pair(r));
                } else {
                    self.add_kickers_plus(hi, lo, Suitedness::Any);
                }
            }
            &[r1, r2, q] => {
                let (hi, lo) = (rank(r1)?, rank(r2)?);
                if hi == lo {
                    return Err(err("a pocket pair takes no suit qualifier"));
                }

                let suitedness = Suitedness::from_char(q).ok_or_else(|| err("invalid qualifier"))?;
                self.add_ranks(hi, lo, suitedness);
            }
            &[r1, r2, q, '+'] => {
                let (hi, lo) = (rank(r1)?, rank(r2)?);
                if hi == lo {
                    return Err(err("a pocket pair takes no suit qualifier"));
                }

                let suitedness = Suitedness::from_char(q).ok_or_else(|| err("invalid qualifier"))?;
                self.add_kickers_plus(hi, lo, suitedness);
            }
            &[r1, s1, r2, s2] => {
                let suit = |c: char| Suit::from_char(c).ok_or_else(|| err("invalid suit"));
                let c1 = Card::new(rank(r1)?, suit(s1)?);
                let c2 = Card::new(rank(r2)?, suit(s2)?);
                let combo = Combo::new(c1, c2).ok_or_else(|| err("duplicated card"))?;
                self.combos.insert(combo);
            }
            &[r1, r2, '-', r3, r4] => {
                let (start, start_pair) = (rank(r1)?, rank(r2)?);
                let (end, end_pair) = (rank(r3)?, rank(r4)?);
                if start != start_pair || end != end_pair {
                    return Err(err("only pocket pairs ranges are supported"));
                }

                let (lo, hi) = (start.min(end), start.max(end));
                Rank::ranks()
                    .filter(|&r| lo <= r && r <= hi)
                    .for_each(|r| self.add_pair(r));
            }
            _ => return Err(err("unrecognized range token")),
        }

        Ok(())
    }

    fn add_pair(&mut self, rank: Rank) {
        for (i, &s1) in Suit::SUITS.iter().enumerate() {
            for &s2 in &Suit::SUITS[i + 1..] {
                self.insert(Card::new(rank, s1), Card::new(rank, s2));
            }
        }
    }

    fn add_ranks(&mut self, r1: Rank, r2: Rank, suitedness: Suitedness) {
        for s1 in Suit::suits() {
            for s2 in Suit::suits() {
                let suited = s1 == s2;
                let wanted = match suitedness {
                    Suitedness::Suited => suited,
                    Suitedness::Offsuit => !suited,
                    Suitedness::Any => true,
                };

                if wanted {
                    self.insert(Card::new(r1, s1), Card::new(r2, s2));
                }
            }
        }
    }

    /// Adds all the hands with the high rank and a kicker from the low rank up
    /// to the rank just below the high rank.
    fn add_kickers_plus(&mut self, r1: Rank, r2: Rank, suitedness: Suitedness) {
        let (hi, lo) = (r1.max(r2), r1.min(r2));
        Rank::ranks()
            .filter(|&r| lo <= r && r < hi)
            .for_each(|kicker| self.add_ranks(hi, kicker, suitedness));
    }

    fn insert(&mut self, c1: Card, c2: Card) {
        if let Some(combo) = Combo::new(c1, c2) {
            self.combos.insert(combo);
        }
    }
}

impl FromStr for Range {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

impl FromIterator<Combo> for Range {
    fn from_iter<T: IntoIterator<Item = Combo>>(iter: T) -> Self {
        Self {
            combos: iter.into_iter().collect(),
        }
    }
}

/// Lists all the combinations in canonical order, the output parses back to
/// the same range.
impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, combo) in self.sorted().iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }

            write!(f, "{combo}")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Suitedness {
    Suited,
    Offsuit,
    Any,
}

impl Suitedness {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            's' => Some(Suitedness::Suited),
            'o' => Some(Suitedness::Offsuit),
            _ => None,
        }
    }
}
