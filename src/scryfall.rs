//! Scryfall API integration for card metadata
//!
//! Lookups go through a TTL-bounded JSON cache so repeated runs over the
//! same collection barely touch the network.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::cache::CatalogCache;
use crate::error::{Result, SyncError};

/// Scryfall API base URL
pub const SCRYFALL_API: &str = "https://api.scryfall.com";

const USER_AGENT: &str = "tradelist_sync/1.0";

/// Card prices as reported by Scryfall
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ScryfallPrices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub eur: Option<String>,
    pub eur_foil: Option<String>,
}

/// The slice of the legality map we act on
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ScryfallLegalities {
    #[serde(default)]
    pub standard: Option<String>,
}

/// One face of a multi-faced card
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub type_line: String,
}

/// Card metadata from Scryfall
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScryfallCard {
    pub id: String,
    pub name: String,
    /// Set code, e.g. "m10"
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub collector_number: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default = "default_layout")]
    pub layout: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub promo: bool,
    #[serde(default)]
    pub reserved: bool,
    #[serde(default)]
    pub legalities: ScryfallLegalities,
    #[serde(default)]
    pub prices: ScryfallPrices,
    #[serde(default)]
    pub multiverse_ids: Vec<u64>,
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
}

fn default_layout() -> String {
    "normal".to_string()
}

impl ScryfallCard {
    /// True when the card is currently Standard legal
    pub fn is_standard_legal(&self) -> bool {
        self.legalities.standard.as_deref() == Some("legal")
    }

    /// True for any "Basic Land" type line
    pub fn is_basic_land(&self) -> bool {
        self.type_line.starts_with("Basic Land")
    }

    /// Non-foil market price in USD, if Scryfall knows one
    pub fn usd(&self) -> Option<f64> {
        self.prices.usd.as_deref().and_then(|p| p.parse().ok())
    }

    /// Foil market price in USD, if Scryfall knows one
    pub fn usd_foil(&self) -> Option<f64> {
        self.prices.usd_foil.as_deref().and_then(|p| p.parse().ok())
    }

    /// Front face name for multi-faced layouts
    pub fn front_face_name(&self) -> Option<&str> {
        self.card_faces.as_ref()?.first().map(|f| f.name.as_str())
    }
}

/// One entry of the Scryfall set list
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScryfallSet {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub set_type: String,
}

/// Scryfall error response body
#[derive(Debug, Deserialize)]
struct ScryfallErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    details: String,
}

#[derive(Debug, Deserialize)]
struct SetListResponse {
    #[serde(default)]
    data: Vec<ScryfallSet>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<ScryfallCard>,
}

/// The catalog operations resolution needs. `ScryfallClient` implements it
/// against the live API; tests substitute an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait CardCatalog {
    /// Fetch one card by Scryfall UUID
    async fn card_by_uuid(&self, id: &str) -> Result<ScryfallCard>;
    /// Fetch one card by multiverse id
    async fn card_by_multiverse(&self, mvid: u64) -> Result<ScryfallCard>;
    /// The full list of known sets
    async fn sets(&self) -> Result<Vec<ScryfallSet>>;
    /// Exact-name card search within one set code
    async fn search_in_set(&self, set_code: &str, name: &str) -> Result<Vec<ScryfallCard>>;
}

/// HTTP client for the Scryfall API
pub struct ScryfallClient {
    http: reqwest::Client,
    base_url: String,
    cache: Mutex<CatalogCache>,
}

impl ScryfallClient {
    /// Client against the public Scryfall API, backed by the on-disk cache
    pub fn new(cache_ttl_days: i64) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: SCRYFALL_API.to_string(),
            cache: Mutex::new(CatalogCache::load(cache_ttl_days)),
        }
    }

    /// Client against an alternate endpoint with a throwaway cache (tests)
    pub fn with_base_url(base_url: &str, cache_ttl_days: i64) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: Mutex::new(CatalogCache::ephemeral(cache_ttl_days)),
        }
    }

    /// Write the lookup cache back to disk
    pub fn persist_cache(&self) {
        if let Err(e) = self.cache.lock().unwrap().save() {
            log::warn!("Failed to save catalog cache: {}", e);
        }
    }

    fn cached_card(&self, key: &str) -> Option<ScryfallCard> {
        self.cache.lock().unwrap().card(key)
    }

    fn remember_card(&self, key: String, card: &ScryfallCard) {
        self.cache.lock().unwrap().put_card(key, card);
    }

    async fn fetch_card(&self, url: &str) -> Result<ScryfallCard> {
        log::debug!("Fetching card from Scryfall: {}", url);
        let response = self
            .http
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.json::<ScryfallCard>().await?)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    async fn error_from_response(response: reqwest::Response) -> SyncError {
        let status = response.status();
        match response.json::<ScryfallErrorBody>().await {
            Ok(body) => SyncError::CatalogNotFound {
                code: body.code,
                details: body.details,
            },
            Err(_) => SyncError::HttpStatus(status),
        }
    }
}

impl CardCatalog for ScryfallClient {
    async fn card_by_uuid(&self, id: &str) -> Result<ScryfallCard> {
        let key = format!("uuid/{}", id);
        if let Some(card) = self.cached_card(&key) {
            return Ok(card);
        }
        let url = format!("{}/cards/{}", self.base_url, id);
        let card = self.fetch_card(&url).await?;
        self.remember_card(key, &card);
        Ok(card)
    }

    async fn card_by_multiverse(&self, mvid: u64) -> Result<ScryfallCard> {
        let key = format!("multiverse/{}", mvid);
        if let Some(card) = self.cached_card(&key) {
            return Ok(card);
        }
        let url = format!("{}/cards/multiverse/{}", self.base_url, mvid);
        let card = self.fetch_card(&url).await?;
        self.remember_card(key, &card);
        Ok(card)
    }

    async fn sets(&self) -> Result<Vec<ScryfallSet>> {
        if let Some(sets) = self.cache.lock().unwrap().sets() {
            return Ok(sets);
        }
        let url = format!("{}/sets", self.base_url);
        log::info!("Fetching set list from Scryfall");
        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let sets = response.json::<SetListResponse>().await?.data;
        self.cache.lock().unwrap().put_sets(&sets);
        Ok(sets)
    }

    async fn search_in_set(&self, set_code: &str, name: &str) -> Result<Vec<ScryfallCard>> {
        let key = format!("search/{}/{}", set_code, name);
        if let Some(cards) = self.cache.lock().unwrap().search(&key) {
            return Ok(cards);
        }
        let query = format!("set:{} name:\"{}\"", set_code, name);
        let url = format!(
            "{}/cards/search?q={}",
            self.base_url,
            urlencoding::encode(&query)
        );
        log::debug!("Searching Scryfall: {}", url);
        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        // A search with zero hits comes back as an error object, not an
        // empty page, and means "no match" rather than failure.
        let cards = if response.status().is_success() {
            response.json::<SearchResponse>().await?.data
        } else {
            match Self::error_from_response(response).await {
                SyncError::CatalogNotFound { .. } => Vec::new(),
                e => return Err(e),
            }
        };
        self.cache.lock().unwrap().put_search(key, &cards);
        Ok(cards)
    }
}

#[cfg(test)]
#[path = "scryfall_tests.rs"]
mod tests;
