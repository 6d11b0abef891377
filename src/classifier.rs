//! Predicates for identifying items.
//!
//! Item descriptions load lazily on the trade offer page, so a predicate can't always give a
//! yes or no answer. Every predicate here returns a [`Classification`] which keeps "the data
//! isn't loaded" apart from "the item does not match".

use crate::item::InventoryItem;
use crate::types::AppId;

/// Team Fortress 2.
pub const TF2_APPID: AppId = 440;
/// Counter-Strike 2.
pub const CS2_APPID: AppId = 730;
/// The market hash name of the Team Fortress 2 currency key.
pub const TF2_KEY_MARKET_HASH_NAME: &str = "Mann Co. Supply Crate Key";

/// The result of classifying an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The item matches.
    Match,
    /// The item does not match.
    NoMatch,
    /// The item can't be classified, either because its app is not supported or because its
    /// description has not loaded.
    Indeterminate,
}

impl Classification {
    /// Only [`Classification::Match`] is a match.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    /// Whether a definite answer was given.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Indeterminate)
    }
}

impl From<bool> for Classification {
    fn from(value: bool) -> Self {
        if value {
            Self::Match
        } else {
            Self::NoMatch
        }
    }
}

/// Checks if the item is a key used as currency in its app.
pub fn is_currency_key(item: &InventoryItem) -> Classification {
    match item.appid {
        TF2_APPID => Classification::from(item.market_hash_name == TF2_KEY_MARKET_HASH_NAME),
        CS2_APPID => has_tag(item, "Type", "Key"),
        _ => Classification::Indeterminate,
    }
}

/// Checks if the item has a tag with the given category and name.
pub fn has_tag(item: &InventoryItem, category: &str, name: &str) -> Classification {
    match &item.tags {
        Some(tags) => Classification::from(tags
            .iter()
            .any(|tag| tag.category == category && tag.name == name)),
        None => Classification::Indeterminate,
    }
}
