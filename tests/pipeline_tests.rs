use std::fs;
use std::sync::Arc;

use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tradelist_sync::config::SyncConfig;
use tradelist_sync::export::{read_specials, write_deckbox, write_mtg_studio};
use tradelist_sync::io::{read_collection, read_deck_dir};
use tradelist_sync::models::Finish;
use tradelist_sync::pipeline::{build_deck_usage, reconcile_collection};
use tradelist_sync::scryfall::ScryfallClient;

// Test fixtures - sample data for testing

fn shivan_dragon_json() -> serde_json::Value {
    serde_json::json!({
        "id": "93b26530-342a-4b2c-b17c-82d5c7998ba9",
        "name": "Shivan Dragon",
        "set": "m10",
        "set_name": "Magic 2010",
        "collector_number": "161",
        "rarity": "rare",
        "layout": "normal",
        "type_line": "Creature — Dragon",
        "promo": false,
        "reserved": false,
        "legalities": { "standard": "not_legal" },
        "prices": { "usd": "0.60", "usd_foil": "4.20" },
        "multiverse_ids": [189899]
    })
}

fn island_json() -> serde_json::Value {
    serde_json::json!({
        "id": "20ad4590-d1a6-4f7d-b56a-b4cf1d0b1a8a",
        "name": "Island",
        "set": "m10",
        "set_name": "Magic 2010",
        "collector_number": "370",
        "rarity": "common",
        "layout": "normal",
        "type_line": "Basic Land — Island",
        "legalities": { "standard": "legal" },
        "prices": { "usd": "0.05" },
        "multiverse_ids": [370661]
    })
}

fn write_fixture_tree(root: &std::path::Path) {
    let decks = root.join("decks");
    fs::create_dir(&decks).unwrap();
    fs::write(
        decks.join("burn.csv"),
        "Count,Name,Section,Edition\n\
         3,Shivan Dragon,main,Magic 2010\n\
         4,Island,scratchpad,Magic 2010\n",
    )
    .unwrap();

    fs::write(
        root.join("main-en.csv"),
        "Total Qty,Reg Qty,Foil Qty,Card,Set,Mvid,Single Price,Single Foil Price,Rarity,Notes\n\
         6,6,0,Shivan Dragon,Magic 2010,189899,0.50,2.00,Rare,\n\
         20,20,0,Island,Magic 2010,370661,0.05,0.10,Land,\n\
         1,1,0,FNM Karn,Promo Set,0,0.00,0.00,Rare,\n",
    )
    .unwrap();
    fs::write(
        root.join("main-de.csv"),
        "Total Qty,Reg Qty,Foil Qty,Card,Set,Mvid,Single Price,Single Foil Price,Rarity,Notes\n\
         2,2,0,Shivan Dragon,Magic 2010,189899,0.50,2.00,Rare,\n",
    )
    .unwrap();
}

async fn mock_catalog() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/multiverse/189899"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shivan_dragon_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/multiverse/370661"))
        .respond_with(ResponseTemplate::new(200).set_body_json(island_json()))
        .mount(&server)
        .await;

    server
}

// End-to-end reconciliation over a fixture tree

#[tokio::test]
async fn test_reconcile_preserves_input_order() {
    let dir = tempdir().unwrap();
    write_fixture_tree(dir.path());
    let server = mock_catalog().await;

    let decks = read_deck_dir(dir.path().join("decks")).unwrap();
    let usage = Arc::new(build_deck_usage(&decks));
    let cards = read_collection(dir.path()).unwrap();
    assert_eq!(cards.len(), 4);

    let client = Arc::new(ScryfallClient::with_base_url(&server.uri(), 21));
    let config = Arc::new(SyncConfig::default());
    let outputs = reconcile_collection(cards, client, usage, config).await;

    assert_eq!(outputs.len(), 4);

    // English Shivan Dragon: rare cutoff 4 plus 3 reserved eats all six copies
    let shivan = &outputs[0].tradelist;
    assert_eq!(shivan.len(), 1);
    assert_eq!(shivan[0].count, 6);
    assert_eq!(shivan[0].tradelist_count, 0);
    assert_eq!(shivan[0].edition, "Magic 2010");
    assert_eq!(shivan[0].card_number, "161");
    assert_eq!(shivan[0].language, "English");
    assert_eq!(shivan[0].finish, Finish::Regular);
    assert_eq!(shivan[0].price, 0.0);

    // Basic land: scratchpad rows reserve nothing, everything is tradeable
    let island = &outputs[1].tradelist;
    assert_eq!(island.len(), 1);
    assert_eq!(island[0].tradelist_count, 20);
    assert_eq!(island[0].card_number, "370");

    // Promo stock never hits the catalog, card number falls back to zero
    let karn = &outputs[2].tradelist;
    assert_eq!(karn.len(), 1);
    assert_eq!(karn[0].name, "FNM Karn");
    assert_eq!(karn[0].tradelist_count, 0);
    assert_eq!(karn[0].card_number, "0");

    // German stock is fully tradeable regardless of cutoffs
    let german = &outputs[3].tradelist;
    assert_eq!(german.len(), 1);
    assert_eq!(german[0].tradelist_count, 2);
    assert_eq!(german[0].language, "German");
}

#[tokio::test]
async fn test_language_rows_share_the_catalog_cache() {
    let dir = tempdir().unwrap();
    write_fixture_tree(dir.path());

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards/multiverse/189899"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shivan_dragon_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/multiverse/370661"))
        .respond_with(ResponseTemplate::new(200).set_body_json(island_json()))
        .mount(&server)
        .await;

    let decks = read_deck_dir(dir.path().join("decks")).unwrap();
    let usage = Arc::new(build_deck_usage(&decks));
    let cards = read_collection(dir.path()).unwrap();

    let client = Arc::new(ScryfallClient::with_base_url(&server.uri(), 21));
    // One worker so the English row lands in the cache before the German one
    let config = Arc::new(SyncConfig {
        jobs: 1,
        ..Default::default()
    });
    let outputs = reconcile_collection(cards, client, usage, config).await;

    assert_eq!(outputs.len(), 4);
    assert_eq!(outputs[3].tradelist[0].name, "Shivan Dragon");
}

#[tokio::test]
async fn test_sale_prices_reach_the_deckbox_export() {
    let dir = tempdir().unwrap();
    write_fixture_tree(dir.path());
    let server = mock_catalog().await;

    let decks = read_deck_dir(dir.path().join("decks")).unwrap();
    let usage = Arc::new(build_deck_usage(&decks));
    let cards = read_collection(dir.path()).unwrap();

    let client = Arc::new(ScryfallClient::with_base_url(&server.uri(), 21));
    let config = Arc::new(SyncConfig {
        sale: true,
        ..Default::default()
    });
    let outputs = reconcile_collection(cards, client, usage, config).await;

    // Scryfall's 0.60 beats the export's 0.50, times the 1.15 markup
    let shivan = &outputs[0].tradelist[0];
    assert!((shivan.price - 0.69).abs() < 1e-9);

    // Island: 0.05 floors up to the minimum
    let island = &outputs[1].tradelist[0];
    assert!((island.price - 0.25).abs() < 1e-9);
}

// Export files written from pipeline output

#[tokio::test]
async fn test_deckbox_file_round_trip_with_specials() {
    let dir = tempdir().unwrap();
    write_fixture_tree(dir.path());
    fs::write(
        dir.path().join("Deckbox-specials.csv"),
        "Count,Tradelist Count,Name,Edition,Card Number,Condition,Language,Foil,Signed,\
         Artist Proof,Altered Art,Misprint,Promo,Textless,My Price\n\
         1,1,Demo Token,Magic 2010,1,,English,foil,,,,,,,5.00\n",
    )
    .unwrap();
    let server = mock_catalog().await;

    let decks = read_deck_dir(dir.path().join("decks")).unwrap();
    let usage = Arc::new(build_deck_usage(&decks));
    let cards = read_collection(dir.path()).unwrap();

    let client = Arc::new(ScryfallClient::with_base_url(&server.uri(), 21));
    let config = Arc::new(SyncConfig::default());
    let outputs = reconcile_collection(cards, client, usage, config).await;

    let tradelist: Vec<_> = outputs
        .iter()
        .flat_map(|o| o.tradelist.iter().cloned())
        .collect();
    let specials = read_specials(dir.path().join("Deckbox-specials.csv")).unwrap();
    assert_eq!(specials.len(), 1);

    let out = dir.path().join("Deckbox-inventory.csv");
    let written = write_deckbox(&out, &tradelist, &specials).unwrap();
    assert_eq!(written, 5);

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "Count,Tradelist Count,Name,Edition,Card Number,Condition,Language,Foil,Signed,\
         Artist Proof,Altered Art,Misprint,Promo,Textless,My Price"
    );
    assert_eq!(lines[1], "6,0,Shivan Dragon,Magic 2010,161,,English,,,,,,,,0.00");
    assert_eq!(lines[2], "20,20,Island,Magic 2010,370,,English,,,,,,,,0.00");
    assert_eq!(lines[3], "1,0,FNM Karn,Promo Set,0,,English,,,,,,,,0.00");
    assert_eq!(lines[4], "2,2,Shivan Dragon,Magic 2010,161,,German,,,,,,,,0.00");
    // Hand-maintained specials ride along verbatim at the end
    assert_eq!(lines[5], "1,1,Demo Token,Magic 2010,1,,English,foil,,,,,,,5.00");
}

#[tokio::test]
async fn test_mtg_studio_file_drops_basics_and_keeps_promos() {
    let dir = tempdir().unwrap();
    write_fixture_tree(dir.path());
    let server = mock_catalog().await;

    let decks = read_deck_dir(dir.path().join("decks")).unwrap();
    let usage = Arc::new(build_deck_usage(&decks));
    let cards = read_collection(dir.path()).unwrap();

    let client = Arc::new(ScryfallClient::with_base_url(&server.uri(), 21));
    let config = Arc::new(SyncConfig::default());
    let outputs = reconcile_collection(cards, client, usage, config).await;

    let studio: Vec<_> = outputs.iter().filter_map(|o| o.studio.clone()).collect();
    assert_eq!(studio.len(), 3);

    let out = dir.path().join("MTG-Studio.csv");
    let written = write_mtg_studio(&out, &studio).unwrap();
    assert_eq!(written, 3);

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "Total Qty,Reg Qty,Foil Qty,Card,Edition,Mvid,Single Price,Single Foil Price,Rarity,Notes,Language"
    );
    // Island is basic land stock and stays out of the Studio file
    assert_eq!(lines[1], "6,6,0,Shivan Dragon,Magic 2010,189899,0.50,2.00,Rare,,English");
    assert_eq!(lines[2], "1,1,0,FNM Karn,Promo Set,0,0.00,0.00,Rare,,English");
    assert_eq!(lines[3], "2,2,0,Shivan Dragon,Magic 2010,189899,0.50,2.00,Rare,,German");
}
