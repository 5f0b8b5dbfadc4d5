//! Runtime configuration for a reconciliation run

use crate::error::{Result, SyncError};

/// Tuning knobs for resolution, trade quantities and pricing.
///
/// The defaults mirror the constants the collection has always been
/// processed with; the CLI only overrides a subset of them.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Markup applied to every emitted price
    pub price_modifier: f64,
    /// Floor for prices while sale mode is on
    pub min_price: f64,
    /// Keep-back threshold for non-rare stock
    pub cutoff: i64,
    /// When off, every emitted price is 0.00
    pub sale: bool,
    /// Stock in any other language is entirely tradeable
    pub base_language: String,
    /// Decked Builder mvids at or above this are bogus and never fetchable
    pub mvid_sentinel: u64,
    /// Condition column passthrough for Deckbox rows
    pub condition: String,
    /// Parallel catalog lookups during reconciliation
    pub jobs: usize,
    /// Catalog cache entry lifetime in days
    pub cache_ttl_days: i64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            price_modifier: 1.15,
            min_price: 0.25,
            cutoff: 4,
            sale: false,
            base_language: "English".to_string(),
            mvid_sentinel: 1_200_000,
            condition: String::new(),
            jobs: 4,
            cache_ttl_days: 21,
        }
    }
}

impl SyncConfig {
    /// Reject configurations that would make the run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.price_modifier <= 0.0 {
            return Err(SyncError::Config(format!(
                "price_modifier must be positive, got {}",
                self.price_modifier
            )));
        }
        if self.min_price < 0.0 {
            return Err(SyncError::Config(format!(
                "min_price must not be negative, got {}",
                self.min_price
            )));
        }
        if self.cutoff < 0 {
            return Err(SyncError::Config(format!(
                "cutoff must not be negative, got {}",
                self.cutoff
            )));
        }
        if self.jobs == 0 {
            return Err(SyncError::Config("jobs must be at least 1".to_string()));
        }
        Ok(())
    }
}
