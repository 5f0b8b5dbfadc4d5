//! Record types for collection exports, deck lists and tradelist rows

use serde::{Deserialize, Serialize};

/// One row of a Decked Builder collection export.
///
/// Fields stay exactly as exported; typed access goes through the helpers.
/// The language column is not part of the export, it gets tagged on while
/// the per-language files are merged.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InventoryCard {
    #[serde(rename = "Total Qty")]
    pub total_qty: String,
    #[serde(rename = "Reg Qty")]
    pub reg_qty: String,
    #[serde(rename = "Foil Qty")]
    pub foil_qty: String,
    #[serde(rename = "Card")]
    pub card: String,
    #[serde(rename = "Set")]
    pub set: String,
    #[serde(rename = "Mvid")]
    pub mvid: String,
    #[serde(rename = "Single Price")]
    pub single_price: String,
    #[serde(rename = "Single Foil Price")]
    pub single_foil_price: String,
    #[serde(rename = "Rarity")]
    pub rarity: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "Language", default)]
    pub language: String,
}

impl InventoryCard {
    /// Parse the total quantity, returning 0 if parsing fails
    pub fn total_count(&self) -> i64 {
        self.total_qty.parse::<i64>().unwrap_or(0)
    }

    /// Parse the non-foil quantity, returning 0 if parsing fails
    pub fn regular_count(&self) -> i64 {
        self.reg_qty.parse::<i64>().unwrap_or(0)
    }

    /// Parse the foil quantity, returning 0 if parsing fails
    pub fn foil_count(&self) -> i64 {
        self.foil_qty.parse::<i64>().unwrap_or(0)
    }

    /// Parse the multiverse id, returning 0 for promos and garbage
    pub fn mvid_u64(&self) -> u64 {
        self.mvid.parse::<u64>().unwrap_or(0)
    }

    /// Parse the non-foil price as f64, returning 0.0 if parsing fails
    pub fn price_f64(&self) -> f64 {
        self.single_price.parse::<f64>().unwrap_or(0.0)
    }

    /// Parse the foil price as f64, returning 0.0 if parsing fails
    pub fn foil_price_f64(&self) -> f64 {
        self.single_foil_price.parse::<f64>().unwrap_or(0.0)
    }

    /// The notes column when non-empty. By convention it holds a Scryfall UUID.
    pub fn note(&self) -> Option<&str> {
        if self.notes.is_empty() {
            None
        } else {
            Some(self.notes.as_str())
        }
    }
}

/// One row of a deck CSV
#[derive(Debug, Deserialize, Clone)]
pub struct DeckEntry {
    #[serde(rename = "Count")]
    pub count: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Section", default)]
    pub section: String,
    #[serde(rename = "Edition", default)]
    pub edition: String,
}

impl DeckEntry {
    /// Parse the count, returning 0 if parsing fails
    pub fn count_u32(&self) -> u32 {
        self.count.parse::<u32>().unwrap_or(0)
    }
}

/// Foil or non-foil printing variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Regular,
    Foil,
}

impl Finish {
    /// The value Deckbox expects in its Foil column
    pub fn as_deckbox_str(&self) -> &'static str {
        match self {
            Finish::Regular => "",
            Finish::Foil => "foil",
        }
    }
}

/// One reconciled tradelist row, one per owned finish of a collection row
#[derive(Debug, Clone, PartialEq)]
pub struct TradelistRow {
    /// Copies owned in this finish
    pub count: i64,
    /// Copies offered for trade, never above `count`
    pub tradelist_count: i64,
    /// Card name after catalog reconciliation
    pub name: String,
    /// Edition in Deckbox vocabulary
    pub edition: String,
    /// Collector number, "0" when the catalog never resolved
    pub card_number: String,
    pub condition: String,
    pub language: String,
    pub finish: Finish,
    /// Final asking price, already marked up and floored
    pub price: f64,
}
