//! Persistent cache for Scryfall lookups
//!
//! Stores responses in a JSON file to avoid redundant API calls. Every entry
//! carries its fetch time and expires after the configured TTL, so a stale
//! cache heals itself instead of pinning prices forever.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Result;
use crate::scryfall::{ScryfallCard, ScryfallSet};

#[derive(Debug, Serialize, Deserialize, Clone)]
struct CachedCard {
    cached_at: DateTime<Utc>,
    card: ScryfallCard,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct CachedSearch {
    cached_at: DateTime<Utc>,
    cards: Vec<ScryfallCard>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct CachedSetList {
    cached_at: DateTime<Utc>,
    sets: Vec<ScryfallSet>,
}

/// On-disk shape of the cache file
#[derive(Debug, Serialize, Deserialize, Default)]
struct CacheFile {
    /// Map of "uuid/<id>" and "multiverse/<mvid>" to card data
    #[serde(default)]
    cards: HashMap<String, CachedCard>,
    /// Map of "search/<set_code>/<name>" to search results
    #[serde(default)]
    searches: HashMap<String, CachedSearch>,
    #[serde(default)]
    sets: Option<CachedSetList>,
}

/// TTL-bounded memo for catalog lookups, optionally backed by a JSON file
#[derive(Debug)]
pub struct CatalogCache {
    path: Option<PathBuf>,
    ttl: Duration,
    file: CacheFile,
}

impl CatalogCache {
    /// Get the default cache file path
    fn cache_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tradelist_sync")
            .join("scryfall_cache.json")
    }

    /// Load the cache from the user cache dir, or create empty if missing
    pub fn load(ttl_days: i64) -> Self {
        Self::load_from(Self::cache_path(), ttl_days)
    }

    /// Load the cache from a specific file, or create empty if missing
    pub fn load_from(path: PathBuf, ttl_days: i64) -> Self {
        let mut file = CacheFile::default();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(parsed) => {
                        file = parsed;
                        log::info!("Loaded catalog cache with {} entries", file.cards.len());
                    }
                    Err(e) => {
                        log::warn!("Failed to parse cache file, starting fresh: {}", e);
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read cache file, starting fresh: {}", e);
                }
            }
        } else {
            log::info!("Starting with empty catalog cache");
        }
        Self {
            path: Some(path),
            ttl: Duration::days(ttl_days),
            file,
        }
    }

    /// In-memory cache with no file backing (tests, alternate endpoints)
    pub fn ephemeral(ttl_days: i64) -> Self {
        Self {
            path: None,
            ttl: Duration::days(ttl_days),
            file: CacheFile::default(),
        }
    }

    /// Save the cache to disk, dropping expired entries on the way out.
    /// Ephemeral caches skip this.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };

        self.evict_expired();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.file)?;
        std::fs::write(&path, content)?;

        log::debug!("Saved catalog cache with {} entries", self.file.cards.len());
        Ok(())
    }

    /// Drop every entry past its TTL
    fn evict_expired(&mut self) {
        let now = Utc::now();
        let ttl = self.ttl;
        self.file.cards.retain(|_, entry| now - entry.cached_at < ttl);
        self.file
            .searches
            .retain(|_, entry| now - entry.cached_at < ttl);
        if self
            .file
            .sets
            .as_ref()
            .is_some_and(|sets| now - sets.cached_at >= ttl)
        {
            self.file.sets = None;
        }
    }

    fn fresh(&self, cached_at: &DateTime<Utc>) -> bool {
        Utc::now() - *cached_at < self.ttl
    }

    /// Get a card from cache, ignoring expired entries
    pub fn card(&self, key: &str) -> Option<ScryfallCard> {
        self.file
            .cards
            .get(key)
            .filter(|entry| self.fresh(&entry.cached_at))
            .map(|entry| entry.card.clone())
    }

    /// Insert a card into cache
    pub fn put_card(&mut self, key: String, card: &ScryfallCard) {
        self.file.cards.insert(
            key,
            CachedCard {
                cached_at: Utc::now(),
                card: card.clone(),
            },
        );
    }

    /// Get a search result from cache, ignoring expired entries
    pub fn search(&self, key: &str) -> Option<Vec<ScryfallCard>> {
        self.file
            .searches
            .get(key)
            .filter(|entry| self.fresh(&entry.cached_at))
            .map(|entry| entry.cards.clone())
    }

    /// Insert a search result into cache
    pub fn put_search(&mut self, key: String, cards: &[ScryfallCard]) {
        self.file.searches.insert(
            key,
            CachedSearch {
                cached_at: Utc::now(),
                cards: cards.to_vec(),
            },
        );
    }

    /// Get the set list from cache, ignoring an expired one
    pub fn sets(&self) -> Option<Vec<ScryfallSet>> {
        self.file
            .sets
            .as_ref()
            .filter(|entry| self.fresh(&entry.cached_at))
            .map(|entry| entry.sets.clone())
    }

    /// Insert the set list into cache
    pub fn put_sets(&mut self, sets: &[ScryfallSet]) {
        self.file.sets = Some(CachedSetList {
            cached_at: Utc::now(),
            sets: sets.to_vec(),
        });
    }

    /// Get card entry count
    pub fn len(&self) -> usize {
        self.file.cards.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.file.cards.is_empty()
    }
}
