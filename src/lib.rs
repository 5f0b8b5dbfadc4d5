//! Tradelist Sync - MTG collection reconciliation
//!
//! Reconciles Decked Builder collection exports against built decks and
//! Scryfall metadata, computes the sellable surplus per card and finish,
//! and writes the Deckbox and MTG Studio CSVs.

pub mod cache;
pub mod config;
pub mod deck_usage;
pub mod editions;
pub mod error;
pub mod export;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod scryfall;
pub mod trade;

pub use config::SyncConfig;
pub use deck_usage::{DeckUsage, DeckUsageBuilder};
pub use error::{Result, SyncError};
pub use models::{DeckEntry, Finish, InventoryCard, TradelistRow};
pub use resolver::ResolvedCard;
pub use scryfall::{CardCatalog, ScryfallCard, ScryfallClient};
