use super::SelectionContext;
use super::offset::{offset_index, StartIndex};
use crate::enums::{SideFilter, TradeSide};
use crate::item::InventoryItem;

/// Picks up to `amount` items matching `filter` from the active inventory of each side, in
/// scanning order. Items already in the offer are skipped.
pub(crate) fn pick_items<'a, F>(
    ctx: &SelectionContext<'a, '_>,
    sides: SideFilter,
    amount: usize,
    start: StartIndex,
    filter: F,
) -> Vec<&'a InventoryItem>
where
    F: Fn(&InventoryItem) -> bool,
{
    let mut picked = Vec::new();

    for side in sides.sides() {
        if picked.len() >= amount {
            break;
        }

        let remaining = amount - picked.len();

        picked.extend(pick_from_side(ctx, *side, remaining, start, &filter));
    }

    picked
}

fn pick_from_side<'a, F>(
    ctx: &SelectionContext<'a, '_>,
    side: TradeSide,
    amount: usize,
    start: StartIndex,
    filter: &F,
) -> Vec<&'a InventoryItem>
where
    F: Fn(&InventoryItem) -> bool,
{
    if amount == 0 {
        return Vec::new();
    }

    let Some(inventory) = ctx.active_inventory(side) else {
        return Vec::new();
    };
    let offered = ctx.status.side(side).keys();
    let candidates: Box<dyn Iterator<Item = &'a InventoryItem> + 'a> = if start.reversed {
        Box::new(inventory.iter().rev())
    } else {
        Box::new(inventory.iter())
    };
    let mut picked = Vec::new();
    // Every matching item not yet in the offer, used when the window comes up short.
    let mut available = Vec::new();
    // Position among matching items. Items already in the offer still count so that the same
    // index keeps pointing at the same item as the offer fills up.
    let mut current_index = 0;

    for item in candidates {
        if offered.contains(&item.key()) {
            if filter(item) {
                current_index += 1;
            }

            continue;
        }

        if picked.len() >= amount {
            break;
        }

        if filter(item) {
            if current_index >= start.index {
                picked.push(item);
            }

            available.push(item);
            current_index += 1;
        }
    }

    if picked.len() < amount {
        let offset = offset_index(start.index, amount, available.len());

        picked = available
            .into_iter()
            .skip(offset)
            .take(amount)
            .collect();
    }

    picked
}
