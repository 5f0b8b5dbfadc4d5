//! Tiered resolution of inventory rows against the card catalog

use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::models::InventoryCard;
use crate::scryfall::{CardCatalog, ScryfallCard};

/// An inventory row plus whatever the catalog knows about it
#[derive(Debug, Clone)]
pub struct ResolvedCard {
    pub row: InventoryCard,
    /// The catalog record, when some tier produced one
    pub scryfall: Option<ScryfallCard>,
    /// Card name after catalog reconciliation
    pub name: String,
    /// Multiverse id, possibly repaired by the set/name fallback
    pub mvid: u64,
}

/// Resolve one inventory row through the lookup tiers: UUID note first,
/// multiverse id next, set/name search last. The first hit wins and later
/// tiers are skipped. A failed lookup only demotes the row to the next
/// tier; rows no tier resolves keep their export data untouched.
pub async fn resolve<C: CardCatalog>(
    row: InventoryCard,
    catalog: &C,
    config: &SyncConfig,
) -> ResolvedCard {
    let mut mvid = row.mvid_u64();
    let name = row.card.clone();
    let mut scryfall: Option<ScryfallCard> = None;

    // Cards with a note assume a Scryfall UUID
    if let Some(note) = row.note() {
        scryfall = tier_hit(catalog.card_by_uuid(note).await, mvid, &name);
    }

    // Decked Builder bug mvids are very high and never fetchable
    if scryfall.is_none() && mvid > 0 && mvid < config.mvid_sentinel {
        scryfall = tier_hit(catalog.card_by_multiverse(mvid).await, mvid, &name);
    }

    // mvid 0 marks promos of some sort, those stay unresolved
    if scryfall.is_none() && mvid > 0 {
        match search_by_set_and_name(catalog, &row, mvid).await {
            Ok(Some(card)) => {
                // A unique multiverse id on the found card repairs the
                // bogus one from the export
                if let [id] = card.multiverse_ids[..] {
                    log::debug!("Diff is {}", mvid as i64 - id as i64);
                    mvid = id;
                }
                scryfall = Some(card);
            }
            Ok(None) => {}
            Err(e) => log::warn!("[scryfall] looking up {:?} failed: {}", name, e),
        }
    }

    let name = reconcile_name(name, scryfall.as_ref());
    log_notable(scryfall.as_ref(), &row);

    ResolvedCard {
        row,
        scryfall,
        name,
        mvid,
    }
}

/// Unwrap one lookup tier, logging any failure as a miss
fn tier_hit(result: Result<ScryfallCard>, mvid: u64, name: &str) -> Option<ScryfallCard> {
    match result {
        Ok(card) => Some(card),
        Err(SyncError::CatalogNotFound { details, .. }) => {
            log::warn!("[mvid:{}] invalid Scryfall response {:?}", mvid, details);
            None
        }
        Err(e) => {
            log::warn!("[scryfall] looking up {:?} failed: {}", name, e);
            None
        }
    }
}

/// Set/name fallback: resolve the export's set name against the set list,
/// then search for the exact card name inside that set. Anything other than
/// exactly one set and exactly one card resolves nothing.
async fn search_by_set_and_name<C: CardCatalog>(
    catalog: &C,
    row: &InventoryCard,
    mvid: u64,
) -> Result<Option<ScryfallCard>> {
    let set_name = &row.set;
    log::debug!("[mvid:{}] falling back {} [{}]", mvid, row.card, set_name);

    let sets = catalog.sets().await?;
    let matching: Vec<_> = sets.iter().filter(|s| s.name == *set_name).collect();
    if matching.len() != 1 {
        log::debug!("{} sets match {:?}", matching.len(), set_name);
        return Ok(None);
    }

    let set_code = &matching[0].code;
    log::debug!("Set code is {}", set_code);
    let cards = catalog.search_in_set(set_code, &row.card).await?;
    if cards.len() == 1 {
        return Ok(cards.into_iter().next());
    }
    log::debug!("{} candidates for {:?} in {}", cards.len(), row.card, set_code);
    Ok(None)
}

/// Align the inventory name with the catalog. Normal layouts adopt the
/// catalog name outright. Multi-faced cards are filed under their front
/// face name, which Decked Builder does not always export.
fn reconcile_name(name: String, scryfall: Option<&ScryfallCard>) -> String {
    let Some(card) = scryfall else {
        return name;
    };
    if card.name.is_empty() || card.name == name {
        return name;
    }
    if card.layout == "normal" {
        log::debug!(
            "Name mismatch {} vs {} for layout {}",
            name,
            card.name,
            card.layout
        );
        return card.name.clone();
    }
    match card.front_face_name() {
        Some(front) if front != name => {
            log::warn!(
                "Card name isn't the front face {} vs {} [{}]",
                name,
                card.name,
                card.layout
            );
            front.to_string()
        }
        _ => name,
    }
}

/// Surface reserved-list stock and anything with real market value
fn log_notable(scryfall: Option<&ScryfallCard>, row: &InventoryCard) {
    let Some(card) = scryfall else {
        return;
    };
    let usd = card.usd().unwrap_or(0.0);
    if card.reserved {
        log::debug!(
            "Reserved card: {} [{}]: {:.2}$",
            card.name,
            card.set_name,
            usd
        );
    } else if usd > 1.0 {
        let qty = row.total_count();
        log::debug!(
            "{} [{}] : {} x {:.2}$ == {:.2}$",
            card.name,
            card.set_name,
            qty,
            usd,
            usd * qty as f64
        );
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
