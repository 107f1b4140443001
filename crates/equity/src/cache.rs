// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity results cache.
use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use xxhash_rust::xxh3::xxh3_128;

use pokerq_cards::Card;

use crate::Range;

/// A scenario digest that doesn't depend on the cards order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u128);

impl CacheKey {
    /// Sentinel used in place of a range when opponents hold random hands.
    const RANDOM_HAND: &str = "random";

    /// Creates the key for a scenario.
    pub fn new(hero: &[Card], board: &[Card], villain: Option<&Range>, opponents: usize) -> Self {
        let sorted = |cards: &[Card]| {
            let mut tokens = cards.iter().map(ToString::to_string).collect::<Vec<_>>();
            tokens.sort_unstable();
            tokens.concat()
        };

        // The range display lists combinations in canonical order.
        let range = villain.map_or_else(|| Self::RANDOM_HAND.to_string(), ToString::to_string);

        let key = format!("{}|{}|{}|{}", sorted(hero), sorted(board), range, opponents);
        Self(xxh3_128(key.as_bytes()))
    }
}

/// A thread safe cache of equity values.
///
/// Cloning the cache gives another handle to the same entries, entries are
/// never evicted.
#[derive(Debug, Clone, Default)]
pub struct EquityCache(Arc<Shared>);

#[derive(Debug, Default)]
struct Shared {
    entries: RwLock<AHashMap<CacheKey, f64>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EquityCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an equity value.
    pub fn get(&self, key: &CacheKey) -> Option<f64> {
        let value = self.0.entries.read().get(key).copied();

        let counter = if value.is_some() {
            &self.0.hits
        } else {
            &self.0.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);

        value
    }

    /// Inserts an equity value and returns the cached value.
    ///
    /// If another thread stored a value for the same key first that value is
    /// kept and returned.
    pub fn insert(&self, key: CacheKey, equity: f64) -> f64 {
        *self.0.entries.write().entry(key).or_insert(equity)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.0.entries.read().len()
    }

    /// Checks if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.0.entries.read().is_empty()
    }

    /// Number of lookups that found a value.
    pub fn hits(&self) -> u64 {
        self.0.hits.load(Ordering::Relaxed)
    }

    /// Number of lookups that didn't find a value.
    pub fn misses(&self) -> u64 {
        self.0.misses.load(Ordering::Relaxed)
    }

    /// Removes all entries and resets the counters.
    pub fn clear(&self) {
        self.0.entries.write().clear();
        self.0.hits.store(0, Ordering::Relaxed);
        self.0.misses.store(0, Ordering::Relaxed);
    }
}
