//! Unit tests for edition name normalization.

use super::*;
use serde_json::json;

fn card_in_set(code: &str, set_name: &str) -> ScryfallCard {
    serde_json::from_value(json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "name": "Some Card",
        "set": code,
        "set_name": set_name
    }))
    .unwrap()
}

#[test]
fn unknown_editions_pass_through() {
    assert_eq!(normalize("Dominaria", None), "Dominaria");
    assert_eq!(normalize("", None), "");
}

#[test]
fn vendor_spellings_are_fixed() {
    assert_eq!(
        normalize(r#"Time Spiral ""Timeshifted"""#, None),
        r#"Time Spiral "Timeshifted""#
    );
    assert_eq!(normalize("Magic: The Gathering-Commander", None), "Commander");
    assert_eq!(normalize("Commander 2013 Edition", None), "Commander 2013");
    assert_eq!(normalize("M19 Gift Pack", None), "M19 Gift Pack Promos");
    assert_eq!(
        normalize("Commander Anthology 2018", None),
        "Commander Anthology Volume II"
    );
}

#[test]
fn vocabulary_renames_apply() {
    assert_eq!(normalize("Magic 2014 Core Set", None), "Magic 2014");
    assert_eq!(
        normalize("Modern Masters 2017 Edition", None),
        "Modern Masters 2017"
    );
    assert_eq!(
        normalize("Masterpiece Series: Kaladesh Inventions", None),
        "Kaladesh Inventions"
    );
    assert_eq!(
        normalize("Duel Decks Anthology, Jace vs. Chandra", None),
        "Duel Decks Anthology: Jace vs. Chandra"
    );
}

#[test]
fn conspiracy_reprints_take_the_catalog_set_name() {
    let card = card_in_set("cns", "Conspiracy");
    assert_eq!(normalize("Magic 2014 Core Set", Some(&card)), "Conspiracy");
    assert_eq!(normalize("Anything At All", Some(&card)), "Conspiracy");
}

#[test]
fn other_catalog_sets_do_not_interfere() {
    let card = card_in_set("m14", "Magic 2014");
    assert_eq!(normalize("Magic 2014 Core Set", Some(&card)), "Magic 2014");
    assert_eq!(normalize("Dominaria", Some(&card)), "Dominaria");
}

#[test]
fn normalization_is_idempotent() {
    let inputs: Vec<&str> = EDITION_FIXES
        .iter()
        .chain(DECKBOX_EDITIONS.iter())
        .map(|(raw, _)| *raw)
        .chain(["Dominaria", "Ixalan"])
        .collect();
    for raw in inputs {
        let once = normalize(raw, None);
        let twice = normalize(&once, None);
        assert_eq!(once, twice, "normalize must be stable for {:?}", raw);
    }
}
