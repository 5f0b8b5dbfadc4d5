//! Two-phase reconciliation pipeline
//!
//! Phase 1 folds the whole deck corpus into the reservation index and seals
//! it. Only then does phase 2 fan the collection out to parallel workers,
//! so no row is ever reconciled against a half-built index. Workers run
//! bounded catalog lookups and results come back in input order.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::SyncConfig;
use crate::deck_usage::{DeckUsage, DeckUsageBuilder};
use crate::export::{self, MtgStudioRow};
use crate::models::{DeckEntry, InventoryCard, TradelistRow};
use crate::resolver;
use crate::scryfall::ScryfallClient;
use crate::trade;

/// Phase 1: fold the deck corpus into a sealed reservation index
pub fn build_deck_usage(entries: &[DeckEntry]) -> DeckUsage {
    let mut builder = DeckUsageBuilder::new();
    for entry in entries {
        builder.record(&entry.edition, &entry.name, entry.count_u32(), &entry.section);
    }
    let usage = builder.seal();
    log::info!("Deck corpus reserves {} distinct cards", usage.distinct_cards());
    usage
}

/// Everything phase 2 produces for one collection row
#[derive(Debug)]
pub struct RowOutput {
    pub tradelist: Vec<TradelistRow>,
    pub studio: Option<MtgStudioRow>,
}

/// Phase 2: resolve and reconcile every collection row against the sealed
/// index, with at most `config.jobs` catalog lookups in flight. Output
/// order matches input order whatever order the workers finish in.
pub async fn reconcile_collection(
    rows: Vec<InventoryCard>,
    client: Arc<ScryfallClient>,
    usage: Arc<DeckUsage>,
    config: Arc<SyncConfig>,
) -> Vec<RowOutput> {
    let semaphore = Arc::new(Semaphore::new(config.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, row) in rows.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let client = Arc::clone(&client);
        let usage = Arc::clone(&usage);
        let config = Arc::clone(&config);
        tasks.spawn(async move {
            // The semaphore is never closed, acquire cannot fail
            let _permit = semaphore.acquire_owned().await.unwrap();
            let resolved = resolver::resolve(row, client.as_ref(), &config).await;
            let tradelist = trade::compute_tradelist(&resolved, &usage, &config);
            let studio = export::mtg_studio_row(&resolved);
            (index, RowOutput { tradelist, studio })
        });
    }

    let mut outputs = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(output) => outputs.push(output),
            Err(e) => log::error!("Reconcile worker failed: {}", e),
        }
    }
    outputs.sort_by_key(|(index, _)| *index);
    outputs.into_iter().map(|(_, output)| output).collect()
}
