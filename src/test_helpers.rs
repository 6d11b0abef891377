//! Shared fixtures for unit tests.

use crate::error::HostError;
use crate::host::TradeHost;
use crate::inventory::Inventory;
use crate::item::InventoryItem;
use crate::offer::TradeStatus;
use crate::types::{AppId, AssetId, ContextId};
use crate::SteamID;

pub fn you() -> SteamID {
    SteamID::from(76561198000000001)
}

pub fn them() -> SteamID {
    SteamID::from(76561198000000002)
}

/// A Team Fortress 2 inventory with 2 keys, 2 refined, 2 reclaimed, 3 scrap (one
/// uncraftable) and 3 other items. Asset IDs run from 1001 to 1012.
pub fn fixture_inventory() -> Inventory {
    Inventory::from_json(include_str!("fixtures/inventory_440.json")).unwrap()
}

/// The fixture inventory as seen from the partner's side.
pub fn fixture_partner_inventory() -> Inventory {
    let items = fixture_inventory()
        .iter()
        .cloned()
        .map(|mut item| {
            item.is_their_item = true;
            item
        })
        .collect::<Vec<_>>();

    Inventory::from_items(items).unwrap()
}

/// An inventory of identically named items with the given asset IDs.
pub fn named_inventory<I>(
    appid: AppId,
    contextid: ContextId,
    assetids: I,
    name: &str,
) -> Inventory
where
    I: IntoIterator<Item = AssetId>,
{
    let items = assetids
        .into_iter()
        .map(|assetid| InventoryItem::new(appid, contextid, assetid, name))
        .collect::<Vec<_>>();

    Inventory::from_items(items).unwrap()
}

/// Records every refresh the mutator asks for.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// The version and `force` flag of each refresh.
    pub refreshes: Vec<(u32, bool)>,
    pub reject: bool,
    pub locked: bool,
}

impl TradeHost for RecordingHost {
    fn refresh_trade_status(
        &mut self,
        status: &TradeStatus,
        force: bool,
    ) -> Result<(), HostError> {
        self.refreshes.push((status.version, force));

        if self.reject {
            return Err(HostError::Rejected("inventory not ready".into()));
        }

        Ok(())
    }

    fn can_modify_offer(&self) -> bool {
        !self.locked
    }
}
