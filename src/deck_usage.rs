//! Reservation index over the deck corpus
//!
//! Counts how many copies of each card the built decks consume, keyed by the
//! exact (edition, name) pair the deck lists use. The builder is append-only
//! and has to be sealed before any lookups happen; reconciliation only ever
//! sees the sealed, read-only form.

use std::collections::HashMap;

/// Deck section for cards parked outside any real deck, never reserved
pub const SCRATCHPAD_SECTION: &str = "scratchpad";

/// Append-only accumulator for deck reservations
#[derive(Debug, Default)]
pub struct DeckUsageBuilder {
    counts: HashMap<String, HashMap<String, u32>>,
}

impl DeckUsageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one deck entry. Scratchpad rows are ignored entirely.
    pub fn record(&mut self, edition: &str, name: &str, count: u32, section: &str) {
        if section == SCRATCHPAD_SECTION {
            return;
        }
        *self
            .counts
            .entry(edition.to_string())
            .or_default()
            .entry(name.to_string())
            .or_insert(0) += count;
    }

    /// Freeze the index. No deck can be recorded after this.
    pub fn seal(self) -> DeckUsage {
        DeckUsage {
            counts: self.counts,
        }
    }
}

/// Read-only reservation lookups over the sealed deck corpus
#[derive(Debug)]
pub struct DeckUsage {
    counts: HashMap<String, HashMap<String, u32>>,
}

impl DeckUsage {
    /// Copies reserved by built decks for this exact (edition, name) pair.
    /// Pairs never seen in any deck reserve nothing.
    pub fn lookup(&self, edition: &str, name: &str) -> u32 {
        self.counts
            .get(edition)
            .and_then(|names| names.get(name))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct (edition, name) pairs with reservations
    pub fn distinct_cards(&self) -> usize {
        self.counts.values().map(|names| names.len()).sum()
    }
}

#[cfg(test)]
#[path = "deck_usage_tests.rs"]
mod tests;
