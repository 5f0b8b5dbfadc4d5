//! CSV edges: deck lists, per-language collection exports, snapshot

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{DeckEntry, InventoryCard};

/// The per-language Decked Builder exports, in merge order
pub const COLLECTION_FILES: &[(&str, &str)] = &[
    ("main-en.csv", "English"),
    ("main-de.csv", "German"),
    ("main-ru.csv", "Russian"),
    ("main-it.csv", "Italian"),
    ("main-jp.csv", "Japanese"),
    ("main-fr.csv", "French"),
    ("main-kr.csv", "Korean"),
    ("main-cs.csv", "Chinese"),
];

/// Extra English stock appended after the per-language files
pub const EXTRAS_FILE: &str = "Deckbox-extras.csv";

fn reader<P: AsRef<Path>>(path: P) -> Result<csv::Reader<fs::File>> {
    Ok(csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?)
}

/// Read every deck CSV in the directory. Bookkeeping files and
/// subdirectories are skipped, bad rows are logged and dropped.
pub fn read_deck_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<DeckEntry>> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    let mut entries = Vec::new();
    for path in paths {
        if !path.is_file() {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some(".gitignore") {
            continue;
        }
        let mut read = 0usize;
        for result in reader(&path)?.deserialize::<DeckEntry>() {
            match result {
                Ok(entry) => {
                    entries.push(entry);
                    read += 1;
                }
                Err(e) => log::warn!("Skipping bad row in {}: {}", path.display(), e),
            }
        }
        log::debug!("Read {} entries from deck {}", read, path.display());
    }
    Ok(entries)
}

/// Read one collection export, tagging every row with the given language
pub fn read_collection_file<P: AsRef<Path>>(path: P, language: &str) -> Result<Vec<InventoryCard>> {
    let mut cards = Vec::new();
    for result in reader(path.as_ref())?.deserialize::<InventoryCard>() {
        match result {
            Ok(mut card) => {
                card.language = language.to_string();
                cards.push(card);
            }
            Err(e) => log::warn!(
                "Skipping bad row in {}: {}",
                path.as_ref().display(),
                e
            ),
        }
    }
    Ok(cards)
}

/// Merge the per-language collection exports plus the extras file into one
/// language-tagged list. Files that are not there are skipped.
pub fn read_collection<P: AsRef<Path>>(dir: P) -> Result<Vec<InventoryCard>> {
    let dir = dir.as_ref();
    let mut cards = Vec::new();
    for (file, language) in COLLECTION_FILES {
        let path = dir.join(file);
        if !path.exists() {
            log::debug!("No {} in {}, skipping", file, dir.display());
            continue;
        }
        cards.extend(read_collection_file(&path, language)?);
    }
    let extras = dir.join(EXTRAS_FILE);
    if extras.exists() {
        cards.extend(read_collection_file(&extras, "English")?);
    }
    log::info!("Merged {} collection rows from {}", cards.len(), dir.display());
    Ok(cards)
}

/// Write the merged language-tagged snapshot back out
pub fn write_snapshot<P: AsRef<Path>>(path: P, cards: &[InventoryCard]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for card in cards {
        writer.serialize(card)?;
    }
    writer.flush()?;
    log::info!(
        "Wrote {} merged rows to {}",
        cards.len(),
        path.as_ref().display()
    );
    Ok(())
}
