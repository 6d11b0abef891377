//! Inventories loaded by the trade offer page.

use crate::enums::TradeSide;
use crate::error::Error;
use crate::item::InventoryItem;
use crate::types::{AppId, AssetId, ContextId, InventoryKey};
use crate::SteamID;
use std::collections::{BTreeMap, HashMap};
use std::slice::Iter;
use std::ops::Deref;

/// The items of one user for one app and context, in the order the page displays them.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<InventoryItem>,
    positions: HashMap<AssetId, usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory from items in display order. Fails if an asset ID appears twice.
    pub fn from_items<I>(items: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = InventoryItem>,
    {
        let mut inventory = Self::new();

        for item in items {
            inventory.push(item)?;
        }

        Ok(inventory)
    }

    /// Parses an inventory from a JSON array of items in display order.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let items: Vec<InventoryItem> = serde_json::from_str(json)?;

        Self::from_items(items)
    }

    /// Appends an item to the end of the inventory.
    pub fn push(&mut self, item: InventoryItem) -> Result<(), Error> {
        if self.positions.contains_key(&item.assetid) {
            return Err(Error::DuplicateAsset {
                appid: item.appid,
                contextid: item.contextid,
                assetid: item.assetid,
            });
        }

        self.positions.insert(item.assetid, self.items.len());
        self.items.push(item);

        Ok(())
    }

    /// Gets an item by its asset ID.
    pub fn get(&self, assetid: AssetId) -> Option<&InventoryItem> {
        self.positions
            .get(&assetid)
            .and_then(|position| self.items.get(*position))
    }

    /// The display position of an item.
    pub fn position(&self, assetid: AssetId) -> Option<usize> {
        self.positions.get(&assetid).copied()
    }

    /// Marks every item as belonging to the partner, or to you.
    pub fn set_their_items(&mut self, is_their_item: bool) {
        for item in &mut self.items {
            item.is_their_item = is_their_item;
        }
    }

    /// Sets whether an item is shown by the page's inventory filter.
    pub fn set_visible(&mut self, assetid: AssetId, visible: bool) -> bool {
        if let Some(position) = self.positions.get(&assetid) {
            self.items[*position].visible = visible;
            true
        } else {
            false
        }
    }
}

impl Deref for Inventory {
    type Target = [InventoryItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a InventoryItem;
    type IntoIter = Iter<'a, InventoryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Every inventory the page has loaded, for both users. An inventory that is missing has not
/// loaded yet.
#[derive(Debug, Clone, Default)]
pub struct InventoryRepository {
    inventories: BTreeMap<InventoryKey, Inventory>,
}

impl InventoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an inventory, returning the inventory it replaces.
    pub fn insert(
        &mut self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
        inventory: Inventory,
    ) -> Option<Inventory> {
        self.inventories.insert((u64::from(steamid), appid, contextid), inventory)
    }

    /// Removes an inventory, e.g. when the page reloads it.
    pub fn remove(
        &mut self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
    ) -> Option<Inventory> {
        self.inventories.remove(&(u64::from(steamid), appid, contextid))
    }

    pub fn get(
        &self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
    ) -> Option<&Inventory> {
        self.inventories.get(&(u64::from(steamid), appid, contextid))
    }

    pub fn get_mut(
        &mut self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
    ) -> Option<&mut Inventory> {
        self.inventories.get_mut(&(u64::from(steamid), appid, contextid))
    }

    /// Checks whether an inventory has loaded.
    pub fn is_loaded(
        &self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
    ) -> bool {
        self.get(steamid, appid, contextid).is_some()
    }

    /// Finds an item in a user's inventories.
    pub fn find_item(
        &self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
        assetid: AssetId,
    ) -> Option<&InventoryItem> {
        self.get(steamid, appid, contextid)
            .and_then(|inventory| inventory.get(assetid))
    }

    /// Iterates over all inventories ordered by SteamID, app ID and context ID.
    pub fn iter(&self) -> impl Iterator<Item = (SteamID, AppId, ContextId, &Inventory)> {
        self.inventories
            .iter()
            .map(|((steamid, appid, contextid), inventory)| {
                (SteamID::from(*steamid), *appid, *contextid, inventory)
            })
    }

    /// Iterates over all inventories belonging to a user.
    pub fn iter_user(
        &self,
        steamid: SteamID,
    ) -> impl Iterator<Item = (AppId, ContextId, &Inventory)> {
        let steamid = u64::from(steamid);

        self.inventories
            .range((steamid, AppId::MIN, ContextId::MIN)..=(steamid, AppId::MAX, ContextId::MAX))
            .map(|((_, appid, contextid), inventory)| (*appid, *contextid, inventory))
    }

    pub fn len(&self) -> usize {
        self.inventories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventories.is_empty()
    }
}

/// The inventory currently shown in the trade offer window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InventoryContext {
    /// Whose inventory tab is selected.
    pub side: TradeSide,
    pub appid: AppId,
    pub contextid: ContextId,
}

impl InventoryContext {
    pub fn new(side: TradeSide, appid: AppId, contextid: ContextId) -> Self {
        Self {
            side,
            appid,
            contextid,
        }
    }
}
