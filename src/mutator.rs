//! Changes to the trade offer.
//!
//! Each operation edits the [`TradeStatus`] in place, bumps its version once and asks the host
//! to redraw once, however many items were touched.

use crate::enums::TradeSide;
use crate::error::HostError;
use crate::host::TradeHost;
use crate::item::InventoryItem;
use crate::offer::{OfferSlot, TradeStatus};
use crate::types::{AppId, ContextId, ItemKey};
use std::collections::HashMap;

/// Amount placed in a slot. Stackable items are never touched so every slot holds one item.
const TRANSFER_AMOUNT: u32 = 1;

/// Places items in the offer on the side each item belongs to. Stackable items are skipped.
/// An item already in the offer is left in place, with its amount corrected if it differs.
///
/// Returns the number of slots that changed.
pub fn add_items<H>(
    status: &mut TradeStatus,
    host: &mut H,
    items: &[&InventoryItem],
) -> Result<usize, HostError>
where
    H: TradeHost + ?Sized,
{
    // Positions of existing slots, built the first time a side is touched.
    let mut slot_caches: [Option<HashMap<ItemKey, usize>>; 2] = [None, None];
    let mut changed = 0;

    for item in items {
        if item.is_stackable {
            continue;
        }

        let side = item.side();
        let slots = &mut status.side_mut(side).assets;
        let cache = slot_caches[side.index()].get_or_insert_with(|| {
            slots
                .iter()
                .enumerate()
                .map(|(position, slot)| (slot.key(), position))
                .collect()
        });
        let key = item.key();

        if let Some(position) = cache.get(&key) {
            let slot = &mut slots[*position];

            if slot.amount == TRANSFER_AMOUNT {
                continue;
            }

            slot.amount = TRANSFER_AMOUNT;
        } else {
            cache.insert(key, slots.len());
            slots.push(OfferSlot::from(*item));
        }

        changed += 1;
    }

    if changed > 0 {
        status.changes_made = true;
    }

    log::debug!("Added {changed} of {} items to offer", items.len());
    refresh(status, host, false)?;

    Ok(changed)
}

/// Removes items from one side of the offer. Items are removed last to first.
///
/// Returns the number of slots removed.
pub fn remove_items<H>(
    status: &mut TradeStatus,
    host: &mut H,
    side: TradeSide,
    keys: &[ItemKey],
) -> Result<usize, HostError>
where
    H: TradeHost + ?Sized,
{
    let slots = &mut status.side_mut(side).assets;
    let mut removed = 0;

    for key in keys.iter().rev() {
        if let Some(position) = slots.iter().position(|slot| slot.key() == *key) {
            slots.remove(position);
            removed += 1;
        }
    }

    if removed > 0 {
        status.changes_made = true;
    }

    log::debug!("Removed {removed} items from {side} side of offer");
    refresh(status, host, false)?;

    Ok(removed)
}

/// Removes every item one side has placed in the offer.
pub fn clear_side<H>(
    status: &mut TradeStatus,
    host: &mut H,
    side: TradeSide,
) -> Result<usize, HostError>
where
    H: TradeHost + ?Sized,
{
    let keys = status
        .side(side)
        .iter()
        .map(OfferSlot::key)
        .collect::<Vec<_>>();

    remove_items(status, host, side, &keys)
}

/// Places one of the partner's items in the offer and forces a redraw. The item's inventory
/// may not have loaded yet.
pub fn add_partner_item<H>(
    status: &mut TradeStatus,
    host: &mut H,
    slot: OfferSlot,
) -> Result<(), HostError>
where
    H: TradeHost + ?Sized,
{
    status.them.assets.push(slot);
    status.changes_made = true;
    refresh(status, host, true)
}

/// Makes the page load the partner's inventory for an app and context by briefly placing a
/// placeholder item from it in the offer. Any partner items in the offer are cleared.
///
/// The host is expected to reject the placeholder. Errors are logged and ignored.
pub fn force_inventory_load<H>(
    status: &mut TradeStatus,
    host: &mut H,
    appid: AppId,
    contextid: ContextId,
) where
    H: TradeHost + ?Sized,
{
    status.them.assets.push(OfferSlot::from((appid, contextid, 0)));

    if let Err(error) = host.refresh_trade_status(status, true) {
        log::debug!("Ignoring error forcing load of inventory {appid}_{contextid}: {error}");
    }

    status.them.assets.clear();

    if let Err(error) = host.refresh_trade_status(status, true) {
        log::debug!("Ignoring error forcing load of inventory {appid}_{contextid}: {error}");
    }
}

fn refresh<H>(
    status: &mut TradeStatus,
    host: &mut H,
    force: bool,
) -> Result<(), HostError>
where
    H: TradeHost + ?Sized,
{
    status.version += 1;
    host.refresh_trade_status(status, force)
}
