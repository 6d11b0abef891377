use crate::classifier::TF2_APPID;
use crate::item::InventoryItem;
use crate::types::AppId;
use serde::{Serialize, Deserialize};

/// An item used as currency and its value in the smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denomination {
    /// The market hash name of the item.
    pub market_hash_name: String,
    /// The value of one item in the smallest unit.
    pub value: u32,
}

impl Denomination {
    pub fn new<T>(market_hash_name: T, value: u32) -> Self
    where
        T: Into<String>,
    {
        Self {
            market_hash_name: market_hash_name.into(),
            value,
        }
    }
}

/// The items making up a virtual currency. Values are added from the highest denomination to
/// the lowest.
///
/// The default table is Team Fortress 2 metal, where one refined metal is worth 3 reclaimed
/// or 9 scrap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDenominationTable")]
pub struct DenominationTable {
    /// The app the currency items belong to.
    pub appid: AppId,
    /// How many of the smallest unit make up one whole unit of the value given by callers,
    /// e.g. `9` scrap in one refined.
    pub units_per_major: u32,
    denominations: Vec<Denomination>,
}

#[derive(Deserialize)]
struct RawDenominationTable {
    appid: AppId,
    units_per_major: u32,
    denominations: Vec<Denomination>,
}

impl From<RawDenominationTable> for DenominationTable {
    fn from(raw: RawDenominationTable) -> Self {
        Self::new(raw.appid, raw.units_per_major, raw.denominations)
    }
}

impl Default for DenominationTable {
    fn default() -> Self {
        Self::tf2_metal()
    }
}

impl DenominationTable {
    /// Creates a table. Denominations without value are dropped.
    pub fn new(
        appid: AppId,
        units_per_major: u32,
        mut denominations: Vec<Denomination>,
    ) -> Self {
        denominations.retain(|denomination| denomination.value > 0);
        denominations.sort_by(|a, b| b.value.cmp(&a.value));

        Self {
            appid,
            units_per_major,
            denominations,
        }
    }

    /// Team Fortress 2 metal.
    pub fn tf2_metal() -> Self {
        Self::new(TF2_APPID, 9, vec![
            Denomination::new("Refined Metal", 9),
            Denomination::new("Reclaimed Metal", 3),
            Denomination::new("Scrap Metal", 1),
        ])
    }

    /// Converts a value e.g. `1.33` refined into the smallest unit, rounded to the nearest unit.
    /// Negative and non-finite values are `0`.
    pub fn to_units(&self, amount: f64) -> u64 {
        let units = (amount * f64::from(self.units_per_major)).round();

        if units.is_finite() && units > 0.0 {
            units as u64
        } else {
            0
        }
    }

    /// The denominations from highest value to lowest.
    pub fn iter(&self) -> std::slice::Iter<'_, Denomination> {
        self.denominations.iter()
    }

    /// Checks if the item is of the given denomination.
    pub fn is_denomination(
        &self,
        item: &InventoryItem,
        denomination: &Denomination,
    ) -> bool {
        item.appid == self.appid && item.market_hash_name == denomination.market_hash_name
    }

    /// The value of an item in the smallest unit, if it is a currency item.
    pub fn value_of(&self, item: &InventoryItem) -> Option<u32> {
        self.denominations
            .iter()
            .find(|denomination| self.is_denomination(item, denomination))
            .map(|denomination| denomination.value)
    }
}
