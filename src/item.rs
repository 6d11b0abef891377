use crate::attribute_key::Attributes;
use crate::enums::TradeSide;
use crate::types::{AppId, ContextId, AssetId, ItemKey};
use crate::serialize;
use serde::{Serialize, Deserialize};

/// An item in a user's inventory as loaded by the trade offer page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// The app ID e.g. `440` for Team Fortress 2 or `730` for Counter-Strike 2.
    #[serde(deserialize_with = "serialize::string_or_number")]
    pub appid: AppId,
    /// The context ID.
    #[serde(deserialize_with = "serialize::string_or_number")]
    pub contextid: ContextId,
    /// The unique asset ID. This value is unique to the item's `appid` and `contextid`.
    #[serde(rename = "id")]
    #[serde(with = "serialize::string")]
    pub assetid: AssetId,
    /// The name of the item on the Steam Community Market.
    #[serde(default)]
    pub market_name: String,
    /// The market hash name. This is used to link to the item on the Steam Community Market.
    #[serde(default)]
    pub market_hash_name: String,
    /// Tags for this item. `None` when the item's description has not loaded.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// Whether this item is stackable, e.g. a currency in a wallet-like context.
    #[serde(default)]
    #[serde(deserialize_with = "serialize::into_bool")]
    pub is_stackable: bool,
    /// Whether this item belongs to the trade partner.
    #[serde(default)]
    #[serde(deserialize_with = "serialize::into_bool")]
    pub is_their_item: bool,
    /// Whether the item is shown by the page's current inventory filter.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// How the item is rendered.
    #[serde(default)]
    pub appearance: Attributes,
}

fn default_visible() -> bool {
    true
}

impl InventoryItem {
    /// Creates a visible, non-stackable item with no tags loaded.
    pub fn new<T>(
        appid: AppId,
        contextid: ContextId,
        assetid: AssetId,
        market_hash_name: T,
    ) -> Self
    where
        T: Into<String>,
    {
        let market_hash_name = market_hash_name.into();

        Self {
            appid,
            contextid,
            assetid,
            market_name: market_hash_name.clone(),
            market_hash_name,
            tags: None,
            is_stackable: false,
            is_their_item: false,
            visible: true,
            appearance: Attributes::default(),
        }
    }

    /// The identity of this item.
    pub fn key(&self) -> ItemKey {
        (self.appid, self.contextid, self.assetid)
    }

    /// The side of the trade this item belongs to.
    pub fn side(&self) -> TradeSide {
        TradeSide::of_item(self.is_their_item)
    }

    /// The ID of this item's element on the page e.g. `item440_2_123`.
    pub fn element_id(&self) -> String {
        format!("item{}_{}_{}", self.appid, self.contextid, self.assetid)
    }
}

/// A tag.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Tag {
    /// The game's internal name of this tag e.g. for Team Fortress 2 items: "Unique" for items
    /// under the "Quality" category or "primary" for items under the "Type" category.
    #[serde(default)]
    pub internal_name: String,
    /// The name of this tag e.g. "Key" for items under the "Type" category. This value has the
    /// alias of `localized_tag_name`.
    #[serde(alias = "localized_tag_name")]
    pub name: String,
    /// The category of this tag e.g. "Type" or "Quality".
    pub category: String,
    /// The color associated with this tag.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// The category name of this tag. This value has the alias of `localized_category_name`.
    #[serde(default)]
    #[serde(alias = "localized_category_name")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl Tag {
    /// Creates a tag with the given category and name.
    pub fn new<C, N>(category: C, name: N) -> Self
    where
        C: Into<String>,
        N: Into<String>,
    {
        let name = name.into();

        Self {
            internal_name: name.clone(),
            name,
            category: category.into(),
            color: None,
            category_name: None,
        }
    }
}
