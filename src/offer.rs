//! The live state of the trade offer being edited.

use crate::enums::TradeSide;
use crate::item::InventoryItem;
use crate::types::{AppId, ContextId, AssetId, Amount, ItemKey};
use crate::serialize;
use serde::{Serialize, Deserialize};
use std::collections::HashSet;

/// An item placed in the trade offer.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct OfferSlot {
    /// The app ID e.g. `440` for Team Fortress 2.
    pub appid: AppId,
    /// The context ID.
    #[serde(with = "serialize::string")]
    pub contextid: ContextId,
    /// The unique asset ID. This value is unique to the item's `appid` and `contextid`.
    #[serde(with = "serialize::string")]
    pub assetid: AssetId,
    /// The amount. If this item is not stackable the amount will be `1`.
    pub amount: Amount,
}

impl OfferSlot {
    /// The identity of the item in this slot.
    pub fn key(&self) -> ItemKey {
        (self.appid, self.contextid, self.assetid)
    }
}

impl From<&InventoryItem> for OfferSlot {
    fn from(item: &InventoryItem) -> OfferSlot {
        OfferSlot {
            appid: item.appid,
            contextid: item.contextid,
            assetid: item.assetid,
            amount: 1,
        }
    }
}

impl From<ItemKey> for OfferSlot {
    fn from((appid, contextid, assetid): ItemKey) -> OfferSlot {
        OfferSlot {
            appid,
            contextid,
            assetid,
            amount: 1,
        }
    }
}

/// The items placed in the offer by one side, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferSideState {
    #[serde(default)]
    pub assets: Vec<OfferSlot>,
}

impl OfferSideState {
    /// Checks if an item is in the offer.
    pub fn contains(&self, key: ItemKey) -> bool {
        self.position(key).is_some()
    }

    /// The position of an item in the offer.
    pub fn position(&self, key: ItemKey) -> Option<usize> {
        self.assets.iter().position(|slot| slot.key() == key)
    }

    /// The identities of every item in the offer.
    pub fn keys(&self) -> HashSet<ItemKey> {
        self.assets.iter().map(OfferSlot::key).collect()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OfferSlot> {
        self.assets.iter()
    }
}

/// The state of the trade offer, mirroring the page's current trade status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeStatus {
    /// Incremented every time the offer is changed.
    #[serde(default)]
    pub version: u32,
    /// Your items in the offer.
    #[serde(default)]
    pub me: OfferSideState,
    /// Their items in the offer.
    #[serde(default)]
    pub them: OfferSideState,
    /// Whether the offer has been changed since it was loaded.
    #[serde(skip)]
    pub changes_made: bool,
}

impl TradeStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side(&self, side: TradeSide) -> &OfferSideState {
        match side {
            TradeSide::You => &self.me,
            TradeSide::Them => &self.them,
        }
    }

    pub fn side_mut(&mut self, side: TradeSide) -> &mut OfferSideState {
        match side {
            TradeSide::You => &mut self.me,
            TradeSide::Them => &mut self.them,
        }
    }
}
