//! Edition name normalization between Decked Builder and Deckbox vocabularies

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::scryfall::ScryfallCard;

/// Set code whose reprints Deckbox files under the Scryfall set name
const CONSPIRACY_SET_CODE: &str = "cns";

/// One-off vendor spellings, fixed before the vocabulary table runs.
/// Each of these was found the hard way in an actual export.
const EDITION_FIXES: &[(&str, &str)] = &[
    (
        r#"Time Spiral ""Timeshifted"""#,
        r#"Time Spiral "Timeshifted""#,
    ),
    ("Magic: The Gathering-Commander", "Commander"),
    ("Commander 2013 Edition", "Commander 2013"),
    ("Planechase 2012 Edition", "Planechase 2012"),
    ("Commander Anthology 2018", "Commander Anthology Volume II"),
    ("M19 Gift Pack", "M19 Gift Pack Promos"),
];

/// Systematic Decked Builder to Deckbox edition renames
const DECKBOX_EDITIONS: &[(&str, &str)] = &[
    ("Magic 2014 Core Set", "Magic 2014"),
    ("Magic 2015 Core Set", "Magic 2015"),
    ("Modern Masters 2015 Edition", "Modern Masters 2015"),
    ("Modern Masters 2017 Edition", "Modern Masters 2017"),
    ("Commander 2014 Edition", "Commander 2014"),
    ("Commander 2015 Edition", "Commander 2015"),
    ("Commander 2016 Edition", "Commander 2016"),
    ("Commander 2017 Edition", "Commander 2017"),
    (
        "Duel Decks Anthology, Divine vs. Demonic",
        "Duel Decks Anthology: Divine vs. Demonic",
    ),
    (
        "Duel Decks Anthology, Elves vs. Goblins",
        "Duel Decks Anthology: Elves vs. Goblins",
    ),
    (
        "Duel Decks Anthology, Garruk vs. Liliana",
        "Duel Decks Anthology: Garruk vs. Liliana",
    ),
    (
        "Duel Decks Anthology, Jace vs. Chandra",
        "Duel Decks Anthology: Jace vs. Chandra",
    ),
    (
        "Global Series: Jiang Yanggu and Mu Yanling",
        "Global Series: Jiang Yanggu & Mu Yanling",
    ),
    (
        "Masterpiece Series: Amonkhet Invocations",
        "Amonkhet Invocations",
    ),
    (
        "Masterpiece Series: Kaladesh Inventions",
        "Kaladesh Inventions",
    ),
    (
        "Masterpiece Series: Zendikar Expeditions",
        "Zendikar Expeditions",
    ),
    ("Magic: The Gathering—Conspiracy", "Conspiracy"),
    ("Ugin's Fate promos", "Ugin's Fate"),
];

lazy_static! {
    static ref FIXES: HashMap<&'static str, &'static str> =
        EDITION_FIXES.iter().copied().collect();
    static ref VOCABULARY: HashMap<&'static str, &'static str> =
        DECKBOX_EDITIONS.iter().copied().collect();
}

/// Map a Decked Builder edition name to the Deckbox one.
///
/// Unknown editions pass through unchanged. A resolved catalog record from
/// the Conspiracy set wins over every table: Decked Builder files those
/// reprints under their original edition, Deckbox under Conspiracy itself.
pub fn normalize(raw: &str, catalog: Option<&ScryfallCard>) -> String {
    if let Some(card) = catalog {
        if card.set == CONSPIRACY_SET_CODE {
            return card.set_name.clone();
        }
    }
    let edition = FIXES.get(raw).copied().unwrap_or(raw);
    VOCABULARY.get(edition).copied().unwrap_or(edition).to_string()
}

#[cfg(test)]
#[path = "editions_tests.rs"]
mod tests;
