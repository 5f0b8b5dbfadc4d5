//! Vendor CSV projections for reconciled rows

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::models::TradelistRow;
use crate::resolver::ResolvedCard;

/// One row of the Deckbox inventory schema
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeckboxRow {
    #[serde(rename = "Count")]
    pub count: i64,
    #[serde(rename = "Tradelist Count")]
    pub tradelist_count: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Edition")]
    pub edition: String,
    #[serde(rename = "Card Number")]
    pub card_number: String,
    #[serde(rename = "Condition")]
    pub condition: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Foil")]
    pub foil: String,
    #[serde(rename = "Signed", default)]
    pub signed: String,
    #[serde(rename = "Artist Proof", default)]
    pub artist_proof: String,
    #[serde(rename = "Altered Art", default)]
    pub altered_art: String,
    #[serde(rename = "Misprint", default)]
    pub misprint: String,
    #[serde(rename = "Promo", default)]
    pub promo: String,
    #[serde(rename = "Textless", default)]
    pub textless: String,
    #[serde(rename = "My Price")]
    pub my_price: String,
}

impl From<&TradelistRow> for DeckboxRow {
    fn from(row: &TradelistRow) -> Self {
        Self {
            count: row.count,
            tradelist_count: row.tradelist_count,
            name: row.name.clone(),
            edition: row.edition.clone(),
            card_number: row.card_number.clone(),
            condition: row.condition.clone(),
            language: row.language.clone(),
            foil: row.finish.as_deckbox_str().to_string(),
            signed: String::new(),
            artist_proof: String::new(),
            altered_art: String::new(),
            misprint: String::new(),
            promo: String::new(),
            textless: String::new(),
            my_price: format!("{:.2}", row.price),
        }
    }
}

/// Write the Deckbox inventory, appending any pre-formatted specials rows
pub fn write_deckbox<P: AsRef<Path>>(
    path: P,
    rows: &[TradelistRow],
    specials: &[DeckboxRow],
) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    let mut written = 0;
    for row in rows {
        writer.serialize(DeckboxRow::from(row))?;
        written += 1;
    }
    for special in specials {
        writer.serialize(special)?;
        written += 1;
    }
    writer.flush()?;
    log::info!(
        "Wrote {} Deckbox rows to {}",
        written,
        path.as_ref().display()
    );
    Ok(written)
}

/// Read hand-maintained Deckbox rows for verbatim append
pub fn read_specials<P: AsRef<Path>>(path: P) -> Result<Vec<DeckboxRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => log::warn!(
                "Skipping bad row in {}: {}",
                path.as_ref().display(),
                e
            ),
        }
    }
    Ok(rows)
}

/// One row of the MTG Studio import schema: the Decked Builder columns
/// with Set renamed to Edition
#[derive(Debug, Serialize, Clone)]
pub struct MtgStudioRow {
    #[serde(rename = "Total Qty")]
    pub total_qty: String,
    #[serde(rename = "Reg Qty")]
    pub reg_qty: String,
    #[serde(rename = "Foil Qty")]
    pub foil_qty: String,
    #[serde(rename = "Card")]
    pub card: String,
    #[serde(rename = "Edition")]
    pub edition: String,
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
    #[serde(rename = "Language")]
    pub language: String,
}

/// MTG Studio projection of one resolved row. Studio wants the canonical
/// catalog name whatever the layout, and no basic lands at all.
pub fn mtg_studio_row(resolved: &ResolvedCard) -> Option<MtgStudioRow> {
    let row = &resolved.row;
    let mut name = resolved.name.clone();
    if let Some(card) = &resolved.scryfall {
        if card.is_basic_land() {
            return None;
        }
        if !card.name.is_empty() {
            name = card.name.clone();
        }
    }
    Some(MtgStudioRow {
        total_qty: row.total_qty.clone(),
        reg_qty: row.reg_qty.clone(),
        foil_qty: row.foil_qty.clone(),
        card: name,
        edition: row.set.clone(),
        mvid: resolved.mvid.to_string(),
        single_price: row.single_price.clone(),
        single_foil_price: row.single_foil_price.clone(),
        rarity: row.rarity.clone(),
        notes: row.notes.clone(),
        language: row.language.clone(),
    })
}

/// Write the MTG Studio import file
pub fn write_mtg_studio<P: AsRef<Path>>(path: P, rows: &[MtgStudioRow]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    log::info!(
        "Wrote {} MTG Studio rows to {}",
        rows.len(),
        path.as_ref().display()
    );
    Ok(rows.len())
}
