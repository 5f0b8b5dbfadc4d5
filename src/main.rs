//! Tradelist Sync - MTG collection reconciliation
//!
//! Builds the deck reservation index, resolves the collection against
//! Scryfall and writes the vendor tradelist CSVs.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use tradelist_sync::{export, io, pipeline, ScryfallClient, SyncConfig, TradelistRow};

/// MTG tradelist builder - computes the sellable surplus of a collection
#[derive(Parser, Debug)]
#[command(name = "tradelist_sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory with the per-language Decked Builder exports
    #[arg(short, long, default_value = ".")]
    collection: PathBuf,

    /// Directory with the deck CSVs
    #[arg(short, long, default_value = "decks")]
    decks: PathBuf,

    /// Output directory for the generated CSVs
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Offer stock for sale (prices stay 0.00 otherwise)
    #[arg(long, default_value_t = false)]
    sale: bool,

    /// Keep-back threshold for non-rare stock
    #[arg(long, default_value_t = 4)]
    cutoff: i64,

    /// Markup applied to every price
    #[arg(long, default_value_t = 1.15)]
    price_modifier: f64,

    /// Lowest price while sale mode is on
    #[arg(long, default_value_t = 0.25)]
    min_price: f64,

    /// Parallel Scryfall lookups
    #[arg(long, default_value_t = 4)]
    jobs: usize,

    /// Catalog cache lifetime in days
    #[arg(long, default_value_t = 21)]
    cache_ttl_days: i64,

    /// Condition written to every Deckbox row
    #[arg(long, default_value = "")]
    condition: String,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = SyncConfig {
        sale: args.sale,
        cutoff: args.cutoff,
        price_modifier: args.price_modifier,
        min_price: args.min_price,
        jobs: args.jobs,
        cache_ttl_days: args.cache_ttl_days,
        condition: args.condition.clone(),
        ..SyncConfig::default()
    };
    if let Err(e) = config.validate() {
        log::error!("Bad configuration: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting tradelist_sync...");

    // Phase 1: the deck corpus has to be fully indexed before any
    // collection row is reconciled
    let deck_entries = match io::read_deck_dir(&args.decks) {
        Ok(entries) => {
            log::info!(
                "Read {} deck entries from {}",
                entries.len(),
                args.decks.display()
            );
            entries
        }
        Err(e) => {
            log::error!("Failed to read decks from {}: {}", args.decks.display(), e);
            std::process::exit(1);
        }
    };
    let usage = pipeline::build_deck_usage(&deck_entries);

    let cards = match io::read_collection(&args.collection) {
        Ok(cards) => cards,
        Err(e) => {
            log::error!(
                "Failed to read collection from {}: {}",
                args.collection.display(),
                e
            );
            std::process::exit(1);
        }
    };
    if cards.is_empty() {
        log::warn!("No collection rows found in {}", args.collection.display());
    }

    let snapshot = args.output.join("DeckedBuilder.csv");
    if let Err(e) = io::write_snapshot(&snapshot, &cards) {
        log::error!("Failed to write {}: {}", snapshot.display(), e);
        std::process::exit(1);
    }

    // Phase 2: parallel resolution against Scryfall
    let client = Arc::new(ScryfallClient::new(config.cache_ttl_days));
    let outputs = pipeline::reconcile_collection(
        cards,
        Arc::clone(&client),
        Arc::new(usage),
        Arc::new(config),
    )
    .await;
    client.persist_cache();

    let mut tradelist: Vec<TradelistRow> = Vec::new();
    let mut studio = Vec::new();
    for output in outputs {
        tradelist.extend(output.tradelist);
        if let Some(row) = output.studio {
            studio.push(row);
        }
    }

    // Hand-maintained rows Decked Builder cannot track ride along verbatim
    let specials_path = args.collection.join("Deckbox-specials.csv");
    let specials = if specials_path.exists() {
        match export::read_specials(&specials_path) {
            Ok(specials) => {
                log::info!("Read {} specials rows", specials.len());
                specials
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", specials_path.display(), e);
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    let deckbox_path = args.output.join("Deckbox-inventory.csv");
    if let Err(e) = export::write_deckbox(&deckbox_path, &tradelist, &specials) {
        log::error!("Failed to write {}: {}", deckbox_path.display(), e);
        std::process::exit(1);
    }

    let studio_path = args.output.join("MTG-Studio.csv");
    if let Err(e) = export::write_mtg_studio(&studio_path, &studio) {
        log::error!("Failed to write {}: {}", studio_path.display(), e);
        std::process::exit(1);
    }

    log::info!("Reconciliation completed successfully.");
}
