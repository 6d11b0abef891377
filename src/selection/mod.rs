//! Selecting items to add to a trade offer.
//!
//! Selection is a pure function of the loaded inventories, the current offer and a
//! [`SelectionRequest`]. Nothing is changed here; the result is handed to the
//! [`mutator`][crate::mutator] to place the items in the offer.

mod denomination;
mod offset;
mod pick;
mod recent;

pub use denomination::{Denomination, DenominationTable};
pub use offset::{offset_index, StartIndex};
pub use recent::cluster_near;

use pick::pick_items;
use crate::classifier::is_currency_key;
use crate::enums::{Mode, SideFilter, TradeSide};
use crate::error::Error;
use crate::inventory::{Inventory, InventoryContext, InventoryRepository};
use crate::item::InventoryItem;
use crate::offer::TradeStatus;
use crate::types::{AssetId, ItemKey};
use crate::SteamID;
use serde::{Serialize, Deserialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Options for selecting items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOptions {
    /// The currency used for [`Mode::Value`]. Default is Team Fortress 2 metal.
    #[serde(default)]
    pub denominations: DenominationTable,
    /// The largest step in distance between asset IDs that still counts as the same batch for
    /// [`Mode::Recent`]. Default is `100`.
    #[serde(default = "default_recent_gap")]
    pub recent_gap: u64,
}

fn default_recent_gap() -> u64 {
    100
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            denominations: DenominationTable::default(),
            recent_gap: default_recent_gap(),
        }
    }
}

/// What to select.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRequest {
    pub mode: Mode,
    /// A number of items, or a value in currency for [`Mode::Value`]. Unused for
    /// [`Mode::IdList`] and [`Mode::Recent`].
    pub amount: f64,
    /// Where to start selecting. Negative values count from the end, `-1` being the last item.
    pub start_index: i64,
    /// Whose items to select.
    pub side: SideFilter,
    /// The asset IDs to select for [`Mode::IdList`].
    pub ids: Vec<AssetId>,
}

impl SelectionRequest {
    pub fn new(
        mode: Mode,
        amount: f64,
        start_index: i64,
        side: SideFilter,
    ) -> Self {
        Self {
            mode,
            amount,
            start_index,
            side,
            ids: Vec::new(),
        }
    }

    /// Creates a request from a mode name e.g. `"ITEMS"` or `"METAL"`. An unknown mode is a
    /// programming error and is rejected.
    pub fn from_name(
        mode: &str,
        amount: f64,
        start_index: i64,
        side: SideFilter,
    ) -> Result<Self, Error> {
        let mode = Mode::from_str(mode)
            .map_err(|_| Error::UnknownMode(mode.to_owned()))?;

        Ok(Self::new(mode, amount, start_index, side))
    }

    /// A number of visible items.
    pub fn count(amount: usize, start_index: i64, side: SideFilter) -> Self {
        Self::new(Mode::Count, amount as f64, start_index, side)
    }

    /// A number of currency keys.
    pub fn keys(amount: usize, start_index: i64, side: SideFilter) -> Self {
        Self::new(Mode::Keys, amount as f64, start_index, side)
    }

    /// A value in currency e.g. `2.33` refined.
    pub fn value(amount: f64, start_index: i64, side: SideFilter) -> Self {
        Self::new(Mode::Value, amount, start_index, side)
    }

    /// Items by asset ID, from either side.
    pub fn ids(ids: Vec<AssetId>) -> Self {
        Self {
            ids,
            ..Self::new(Mode::IdList, 0.0, 0, SideFilter::Either)
        }
    }

    /// The most recently obtained batch of items.
    pub fn recent(start_index: i64, side: SideFilter) -> Self {
        Self::new(Mode::Recent, 0.0, start_index, side)
    }
}

/// The items selected for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult<'a> {
    /// The selected items, in order. May be fewer than requested.
    pub items: Vec<&'a InventoryItem>,
    /// Whether the request was fully met.
    pub satisfied: bool,
}

impl<'a> SelectionResult<'a> {
    fn counted(items: Vec<&'a InventoryItem>, amount: usize) -> Self {
        let satisfied = items.len() == amount;

        Self {
            items,
            satisfied,
        }
    }

    /// The identities of the selected items.
    pub fn keys(&self) -> Vec<ItemKey> {
        self.items.iter().map(|item| item.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Everything selection reads from. Items in the result borrow from `inventories` only, so the
/// offer can be changed while the result is held.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a, 's> {
    pub inventories: &'a InventoryRepository,
    pub status: &'s TradeStatus,
    pub options: &'s SelectionOptions,
    /// Your SteamID.
    pub you: SteamID,
    /// The partner's SteamID.
    pub them: SteamID,
    /// The inventory shown in the window. Nothing can be selected without one.
    pub active: Option<InventoryContext>,
}

impl<'a, 's> SelectionContext<'a, 's> {
    pub fn steamid(&self, side: TradeSide) -> SteamID {
        match side {
            TradeSide::You => self.you,
            TradeSide::Them => self.them,
        }
    }

    /// The side's inventory for the active app and context.
    pub fn active_inventory(&self, side: TradeSide) -> Option<&'a Inventory> {
        let inventories: &'a InventoryRepository = self.inventories;
        let active = self.active?;

        inventories.get(self.steamid(side), active.appid, active.contextid)
    }
}

/// Selects items for a request. Returns `None` when no inventory is active or the active
/// inventory has not loaded, in which case the caller should try again once it loads.
pub fn select<'a>(
    ctx: &SelectionContext<'a, '_>,
    request: &SelectionRequest,
) -> Option<SelectionResult<'a>> {
    let active = ctx.active?;

    ctx.active_inventory(active.side)?;

    let start = StartIndex::resolve(request.start_index);
    let result = match request.mode {
        Mode::Count => {
            let amount = whole_count(request.amount);
            let items = pick_items(ctx, request.side, amount, start, |item| item.visible);

            SelectionResult::counted(items, amount)
        },
        Mode::Keys => {
            let amount = whole_count(request.amount);
            let items = pick_items(ctx, request.side, amount, start, |item| {
                is_currency_key(item).is_match()
            });

            SelectionResult::counted(items, amount)
        },
        Mode::Value => select_value(ctx, request.side, request.amount, start),
        Mode::IdList => select_ids(ctx, &request.ids),
        Mode::Recent => {
            let side = match request.side {
                SideFilter::You => TradeSide::You,
                SideFilter::Them => TradeSide::Them,
                SideFilter::Either => active.side,
            };

            select_recent(ctx, side, start)
        },
    };

    log::debug!(
        "Selected {} items for {} (satisfied: {})",
        result.items.len(),
        request.mode,
        result.satisfied,
    );

    Some(result)
}

/// Counts are whole numbers of items. Fractions are dropped.
fn whole_count(amount: f64) -> usize {
    if amount.is_finite() && amount > 0.0 {
        amount.trunc() as usize
    } else {
        0
    }
}

fn select_value<'a>(
    ctx: &SelectionContext<'a, '_>,
    sides: SideFilter,
    amount: f64,
    start: StartIndex,
) -> SelectionResult<'a> {
    let table = &ctx.options.denominations;
    let target = table.to_units(amount);
    let mut total = 0;
    let mut items = Vec::new();

    for denomination in table.iter() {
        if total == target {
            break;
        }

        let value = u64::from(denomination.value);
        let needed = (target - total) / value;

        if needed == 0 {
            continue;
        }

        let amount = usize::try_from(needed).unwrap_or(usize::MAX);
        let picked = pick_items(ctx, sides, amount, start, |item| {
            table.is_denomination(item, denomination)
        });

        total += needed.min(picked.len() as u64) * value;
        items.extend(picked);
    }

    SelectionResult {
        items,
        satisfied: total == target,
    }
}

fn select_ids<'a>(
    ctx: &SelectionContext<'a, '_>,
    ids: &[AssetId],
) -> SelectionResult<'a> {
    let inventories: &'a InventoryRepository = ctx.inventories;
    let mut requested = HashSet::new();
    let mut items = Vec::new();
    let mut satisfied = true;

    for &assetid in ids {
        if !requested.insert(assetid) {
            satisfied = false;
            continue;
        }

        // Items already in the offer on their owner's side are not matched again.
        let matches = [TradeSide::You, TradeSide::Them]
            .into_iter()
            .flat_map(move |side| {
                inventories
                    .iter_user(ctx.steamid(side))
                    .filter_map(move |(_, _, inventory)| inventory.get(assetid))
                    .filter(move |item| !ctx.status.side(side).contains(item.key()))
            })
            .collect::<Vec<_>>();

        satisfied = satisfied && matches.len() == 1;
        items.extend(matches);
    }

    SelectionResult {
        items,
        satisfied,
    }
}

fn select_recent<'a>(
    ctx: &SelectionContext<'a, '_>,
    side: TradeSide,
    start: StartIndex,
) -> SelectionResult<'a> {
    let Some(inventory) = ctx.active_inventory(side) else {
        return SelectionResult {
            items: Vec::new(),
            satisfied: true,
        };
    };
    let offered = ctx.status.side(side).keys();
    let mut candidates = inventory
        .iter()
        .filter(|item| item.visible && !offered.contains(&item.key()))
        .collect::<Vec<_>>();

    if start.reversed {
        candidates.reverse();
    }

    let ids = candidates
        .iter()
        .map(|item| item.assetid)
        .collect::<Vec<_>>();
    let newest = ids.iter().copied().max().unwrap_or(0);
    let cluster = cluster_near(&ids, newest, ctx.options.recent_gap)
        .into_iter()
        .collect::<HashSet<_>>();
    let items = candidates
        .into_iter()
        .filter(|item| cluster.contains(&item.assetid))
        .collect::<Vec<_>>();

    SelectionResult {
        satisfied: cluster.len() == items.len(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::OfferSlot;
    use crate::test_helpers::{you, them, fixture_inventory, fixture_partner_inventory, named_inventory};

    struct Fixture {
        inventories: InventoryRepository,
        status: TradeStatus,
        options: SelectionOptions,
        active: Option<InventoryContext>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut inventories = InventoryRepository::new();

            inventories.insert(you(), 440, 2, fixture_inventory());
            inventories.insert(them(), 440, 2, fixture_partner_inventory());

            Self {
                inventories,
                status: TradeStatus::new(),
                options: SelectionOptions::default(),
                active: Some(InventoryContext::new(TradeSide::You, 440, 2)),
            }
        }

        fn with_inventory(inventory: Inventory) -> Self {
            let mut fixture = Self::new();

            fixture.inventories.insert(you(), 440, 2, inventory);
            fixture
        }

        fn offer(&mut self, assetids: &[AssetId]) {
            for assetid in assetids {
                self.status.me.assets.push(OfferSlot::from((440, 2, *assetid)));
            }
        }

        fn select(&self, request: &SelectionRequest) -> Option<(Vec<AssetId>, bool)> {
            let ctx = SelectionContext {
                inventories: &self.inventories,
                status: &self.status,
                options: &self.options,
                you: you(),
                them: them(),
                active: self.active,
            };

            select(&ctx, request).map(|result| {
                let assetids = result.items.iter().map(|item| item.assetid).collect();

                (assetids, result.satisfied)
            })
        }
    }

    #[test]
    fn count_returns_exact_amount_when_available() {
        let fixture = Fixture::with_inventory(named_inventory(440, 2, 1..=10, "Hat"));

        for start_index in 0..12 {
            for amount in 0..=10 {
                let request = SelectionRequest::count(amount, start_index, SideFilter::You);
                let (items, satisfied) = fixture.select(&request).unwrap();

                assert_eq!(items.len(), amount, "start {start_index}, amount {amount}");
                assert!(satisfied);
            }
        }
    }

    #[test]
    fn count_returns_everything_when_short() {
        let fixture = Fixture::with_inventory(named_inventory(440, 2, 1..=4, "Hat"));

        for start_index in [-3, -1, 0, 2, 10] {
            let request = SelectionRequest::count(6, start_index, SideFilter::You);
            let (items, satisfied) = fixture.select(&request).unwrap();

            assert_eq!(items.len(), 4);
            assert!(!satisfied);
        }
    }

    #[test]
    fn count_starts_at_index() {
        let fixture = Fixture::with_inventory(named_inventory(440, 2, 1..=10, "Hat"));
        let (items, _) = fixture.select(&SelectionRequest::count(3, 2, SideFilter::You)).unwrap();

        assert_eq!(items, vec![3, 4, 5]);
    }

    #[test]
    fn count_pulls_back_window_at_end() {
        let fixture = Fixture::with_inventory(named_inventory(440, 2, 1..=10, "Hat"));
        let (items, _) = fixture.select(&SelectionRequest::count(3, 9, SideFilter::You)).unwrap();

        assert_eq!(items, vec![8, 9, 10]);
    }

    #[test]
    fn count_selects_from_end_with_negative_index() {
        let fixture = Fixture::with_inventory(named_inventory(440, 2, 1..=10, "Hat"));
        let (items, _) = fixture.select(&SelectionRequest::count(2, -1, SideFilter::You)).unwrap();

        assert_eq!(items, vec![10, 9]);

        let (items, _) = fixture.select(&SelectionRequest::count(2, -3, SideFilter::You)).unwrap();

        assert_eq!(items, vec![8, 7]);
    }

    #[test]
    fn count_skips_items_in_offer() {
        let mut fixture = Fixture::with_inventory(named_inventory(440, 2, 1..=5, "Hat"));

        fixture.offer(&[1, 2]);

        let (items, satisfied) = fixture.select(&SelectionRequest::count(2, 0, SideFilter::You)).unwrap();

        assert_eq!(items, vec![3, 4]);
        assert!(satisfied);
    }

    #[test]
    fn index_counts_items_already_in_offer() {
        let mut fixture = Fixture::with_inventory(named_inventory(440, 2, 1..=6, "Hat"));

        fixture.offer(&[1]);

        // the item at index 2 is still asset 3 after asset 1 was added
        let (items, _) = fixture.select(&SelectionRequest::count(1, 2, SideFilter::You)).unwrap();

        assert_eq!(items, vec![3]);
    }

    #[test]
    fn count_ignores_hidden_items() {
        let mut inventory = named_inventory(440, 2, 1..=4, "Hat");

        inventory.set_visible(1, false);

        let fixture = Fixture::with_inventory(inventory);
        let (items, _) = fixture.select(&SelectionRequest::count(2, 0, SideFilter::You)).unwrap();

        assert_eq!(items, vec![2, 3]);
    }

    #[test]
    fn count_from_either_side_fills_from_yours_first() {
        let mut fixture = Fixture::new();

        fixture.inventories.insert(you(), 440, 2, named_inventory(440, 2, 1..=2, "Hat"));

        let (items, satisfied) = fixture.select(&SelectionRequest::count(4, 0, SideFilter::Either)).unwrap();

        assert_eq!(items, vec![1, 2, 1001, 1002]);
        assert!(satisfied);
    }

    #[test]
    fn selects_keys() {
        let fixture = Fixture::new();
        let (items, satisfied) = fixture.select(&SelectionRequest::keys(2, 0, SideFilter::You)).unwrap();

        assert_eq!(items, vec![1001, 1002]);
        assert!(satisfied);

        let (items, satisfied) = fixture.select(&SelectionRequest::keys(3, 0, SideFilter::Them)).unwrap();

        assert_eq!(items.len(), 2);
        assert!(!satisfied);
    }

    #[test]
    fn value_is_made_from_largest_denominations() {
        let fixture = Fixture::new();
        // 1 refined, 1 reclaimed, 2 scrap
        let (items, satisfied) = fixture.select(&SelectionRequest::value(1.55, 0, SideFilter::You)).unwrap();

        assert_eq!(items, vec![1003, 1005, 1007, 1008]);
        assert!(satisfied);
    }

    #[test]
    fn value_sums_to_target() {
        let fixture = Fixture::new();
        let table = DenominationTable::tf2_metal();

        for scrap in 0..=27 {
            let amount = scrap as f64 / 9.0;
            let ctx = SelectionContext {
                inventories: &fixture.inventories,
                status: &fixture.status,
                options: &fixture.options,
                you: you(),
                them: them(),
                active: fixture.active,
            };
            let result = select(&ctx, &SelectionRequest::value(amount, 0, SideFilter::You)).unwrap();
            let sum = result.items
                .iter()
                .filter_map(|item| table.value_of(item))
                .map(u64::from)
                .sum::<u64>();

            // the fixture holds 2 refined, 2 reclaimed and 3 scrap: 27 scrap in total
            assert_eq!(sum, scrap, "{scrap} scrap");
            assert!(result.satisfied);
        }
    }

    #[test]
    fn value_never_overshoots() {
        let fixture = Fixture::new();
        let (items, satisfied) = fixture.select(&SelectionRequest::value(5.0, 0, SideFilter::You)).unwrap();

        // everything: 18 + 6 + 3 = 27 scrap out of 45
        assert_eq!(items.len(), 7);
        assert!(!satisfied);
    }

    #[test]
    fn value_falls_back_to_smaller_denominations() {
        let mut fixture = Fixture::new();

        fixture.offer(&[1003, 1004]);

        // no refined left, so 1 refined is made from 2 reclaimed and 3 scrap
        let (items, satisfied) = fixture.select(&SelectionRequest::value(1.0, 0, SideFilter::You)).unwrap();

        assert_eq!(items, vec![1005, 1006, 1007, 1008, 1012]);
        assert!(satisfied);
    }

    #[test]
    fn ids_preserve_requested_order() {
        let fixture = Fixture::with_inventory(named_inventory(440, 2, [5, 7, 9], "Hat"));
        let (items, satisfied) = fixture.select(&SelectionRequest::ids(vec![9, 5])).unwrap();

        assert_eq!(items, vec![9, 5]);
        assert!(satisfied);
    }

    #[test]
    fn ids_omit_missing_items() {
        let fixture = Fixture::with_inventory(named_inventory(440, 2, [1, 3], "Hat"));
        let (items, satisfied) = fixture.select(&SelectionRequest::ids(vec![1, 2, 3])).unwrap();

        assert_eq!(items, vec![1, 3]);
        assert!(!satisfied);
    }

    #[test]
    fn ids_search_both_sides_and_apps() {
        let mut fixture = Fixture::with_inventory(named_inventory(440, 2, [1], "Hat"));

        fixture.inventories.insert(you(), 730, 2, named_inventory(730, 2, [50], "Case"));

        let (items, satisfied) = fixture.select(&SelectionRequest::ids(vec![50, 1001, 1])).unwrap();

        assert_eq!(items, vec![50, 1001, 1]);
        assert!(satisfied);
    }

    #[test]
    fn ids_skip_items_already_in_offer() {
        let mut fixture = Fixture::with_inventory(named_inventory(440, 2, [1, 2], "Hat"));

        fixture.offer(&[1]);

        let (items, satisfied) = fixture.select(&SelectionRequest::ids(vec![1, 2])).unwrap();

        assert_eq!(items, vec![2]);
        assert!(!satisfied);
    }

    #[test]
    fn ids_check_offer_of_owning_side() {
        let mut fixture = Fixture::with_inventory(named_inventory(440, 2, [1], "Hat"));

        // 1001 is only in the partner's inventory, so your side of the offer does not hide it
        fixture.offer(&[1001]);

        let (items, satisfied) = fixture.select(&SelectionRequest::ids(vec![1001])).unwrap();

        assert_eq!(items, vec![1001]);
        assert!(satisfied);
    }

    #[test]
    fn duplicate_ids_are_not_satisfied() {
        let fixture = Fixture::with_inventory(named_inventory(440, 2, [1], "Hat"));
        let (items, satisfied) = fixture.select(&SelectionRequest::ids(vec![1, 1])).unwrap();

        assert_eq!(items, vec![1]);
        assert!(!satisfied);
    }

    #[test]
    fn recent_selects_newest_batch() {
        let fixture = Fixture::with_inventory(named_inventory(440, 2, [100, 101, 250], "Hat"));
        let (items, satisfied) = fixture.select(&SelectionRequest::recent(0, SideFilter::You)).unwrap();

        assert_eq!(items, vec![250]);
        assert!(satisfied);
    }

    #[test]
    fn recent_keeps_inventory_order() {
        let fixture = Fixture::with_inventory(named_inventory(440, 2, [5000, 4950, 10, 4900], "Hat"));
        let (items, _) = fixture.select(&SelectionRequest::recent(0, SideFilter::You)).unwrap();

        assert_eq!(items, vec![5000, 4950, 4900]);

        let (items, _) = fixture.select(&SelectionRequest::recent(-1, SideFilter::You)).unwrap();

        assert_eq!(items, vec![4900, 4950, 5000]);
    }

    #[test]
    fn recent_ignores_items_in_offer() {
        let mut fixture = Fixture::with_inventory(named_inventory(440, 2, [100, 150, 900], "Hat"));

        fixture.offer(&[900]);

        let (items, _) = fixture.select(&SelectionRequest::recent(0, SideFilter::You)).unwrap();

        assert_eq!(items, vec![100, 150]);
    }

    #[test]
    fn nothing_is_selected_without_active_inventory() {
        let mut fixture = Fixture::new();

        fixture.active = None;

        assert!(fixture.select(&SelectionRequest::count(1, 0, SideFilter::You)).is_none());

        fixture.active = Some(InventoryContext::new(TradeSide::You, 730, 2));

        assert!(fixture.select(&SelectionRequest::count(1, 0, SideFilter::You)).is_none());
    }

    #[test]
    fn rejects_unknown_mode_name() {
        let error = SelectionRequest::from_name("HATS", 1.0, 0, SideFilter::You).unwrap_err();

        assert!(matches!(error, Error::UnknownMode(mode) if mode == "HATS"));
        assert_eq!(
            SelectionRequest::from_name("METAL", 1.0, 0, SideFilter::You).unwrap().mode,
            Mode::Value,
        );
    }
}
