//! Trade quantity and pricing rules for reconciled rows

use crate::config::SyncConfig;
use crate::deck_usage::DeckUsage;
use crate::editions;
use crate::models::{Finish, TradelistRow};
use crate::resolver::ResolvedCard;

/// The Decked Builder rarity strings held back at a playset
pub fn is_rare_or_mythic(rarity: &str) -> bool {
    rarity == "Rare" || rarity == "Mythic Rare"
}

/// Keep-back cutoffs for one resolved row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeRules {
    pub qty_cutoff: i64,
    pub foil_cutoff: i64,
}

/// Derive the keep-back cutoffs from rarity, legality, card type and deck
/// reservations. Reservations stack on top of whatever base cutoff applies.
pub fn derive_rules(resolved: &ResolvedCard, usage: &DeckUsage, config: &SyncConfig) -> TradeRules {
    let rarity = resolved.row.rarity.as_str();
    let standard = resolved
        .scryfall
        .as_ref()
        .is_some_and(|c| c.is_standard_legal());

    let mut qty_cutoff = if is_rare_or_mythic(rarity) {
        4
    } else {
        config.cutoff
    };
    let mut foil_cutoff = 0;

    // Standard stock keeps at least a playset regardless of rarity
    if standard && qty_cutoff < 4 {
        qty_cutoff = 4;
    }

    if let Some(card) = &resolved.scryfall {
        // Basic lands are never worth keeping back, promos can go too
        if card.is_basic_land() || card.promo {
            qty_cutoff = 0;
            foil_cutoff = 0;
        }
    }

    // Copies the built decks consume stay reserved on top. Deck lists are
    // keyed by the raw export edition, not the normalized one.
    qty_cutoff += i64::from(usage.lookup(&resolved.row.set, &resolved.name));

    TradeRules {
        qty_cutoff,
        foil_cutoff,
    }
}

/// Apply the trade rules to one resolved row, emitting up to two tradelist
/// rows. The foil row always comes first, the order the exports always had.
pub fn compute_tradelist(
    resolved: &ResolvedCard,
    usage: &DeckUsage,
    config: &SyncConfig,
) -> Vec<TradelistRow> {
    let row = &resolved.row;
    let qty = row.regular_count();
    let foil_qty = row.foil_count();

    let rules = derive_rules(resolved, usage, config);
    let mut trade_qty = (qty - rules.qty_cutoff).max(0);
    let mut trade_foil_qty = (foil_qty - rules.foil_cutoff).max(0);

    // Stock in other languages is not worth keeping back
    if row.language != config.base_language {
        trade_qty = qty;
        trade_foil_qty = foil_qty;
    }

    check_set_integrity(resolved);
    let edition = editions::normalize(&row.set, resolved.scryfall.as_ref());

    let card_number = resolved
        .scryfall
        .as_ref()
        .map(|c| c.collector_number.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "0".to_string());

    let (price, foil_price) = final_prices(resolved, config);

    let mut rows = Vec::new();
    if foil_qty > 0 {
        rows.push(TradelistRow {
            count: foil_qty,
            tradelist_count: trade_foil_qty,
            name: resolved.name.clone(),
            edition: edition.clone(),
            card_number: card_number.clone(),
            condition: config.condition.clone(),
            language: row.language.clone(),
            finish: Finish::Foil,
            price: foil_price,
        });
    }
    if qty > 0 {
        rows.push(TradelistRow {
            count: qty,
            tradelist_count: trade_qty,
            name: resolved.name.clone(),
            edition,
            card_number,
            condition: config.condition.clone(),
            language: row.language.clone(),
            finish: Finish::Regular,
            price,
        });
    }
    rows
}

/// Final per-finish prices: the catalog market price beats the export price
/// when it is known and non-zero. Outside sale mode everything is 0.00,
/// inside it prices get marked up and floored.
fn final_prices(resolved: &ResolvedCard, config: &SyncConfig) -> (f64, f64) {
    let row = &resolved.row;
    let mut price = row.price_f64();
    let mut foil_price = row.foil_price_f64();

    if let Some(card) = &resolved.scryfall {
        if let Some(usd) = card.usd() {
            if usd > 0.0 {
                price = usd;
            }
        }
        if let Some(usd_foil) = card.usd_foil() {
            if usd_foil > 0.0 {
                foil_price = usd_foil;
            }
        }

        let total_value =
            price * row.regular_count() as f64 + foil_price * row.foil_count() as f64;
        if total_value > 5.0 {
            log::debug!(
                "Prices from Scryfall for {} [{}] are {}/{} Total:{:.2}",
                resolved.name,
                row.set,
                price,
                foil_price,
                total_value
            );
        }
    }

    if !config.sale {
        return (0.0, 0.0);
    }

    let mut price = price * config.price_modifier;
    let mut foil_price = foil_price * config.price_modifier;
    if price < config.min_price {
        price = config.min_price;
    }
    if foil_price < config.min_price {
        foil_price = config.min_price;
    }
    (price, foil_price)
}

/// Export/catalog set disagreement, compared on the raw export edition
pub fn set_mismatch(resolved: &ResolvedCard) -> Option<(&str, &str)> {
    let card = resolved.scryfall.as_ref()?;
    if card.set_name.is_empty() || resolved.row.set == card.set_name {
        return None;
    }
    Some((resolved.row.set.as_str(), card.set_name.as_str()))
}

/// Surface catalog/export set disagreements; never fatal
fn check_set_integrity(resolved: &ResolvedCard) {
    let Some(card) = &resolved.scryfall else {
        return;
    };
    if card.set_name.is_empty() {
        log::error!("Missing set_name from Scryfall for {:?}", resolved.name);
    } else if let Some((export, catalog)) = set_mismatch(resolved) {
        log::debug!("[mvid:{}] Set {} vs {}", resolved.mvid, export, catalog);
    }
}

#[cfg(test)]
#[path = "trade_tests.rs"]
mod tests;
