use strum_macros::{Display, EnumString};

/// How items are selected for a trade offer. Parsing accepts both the names used by the
/// control panel (`"ITEMS"`, `"METAL"`, `"ID"`) and the descriptive names.
#[derive(Display, EnumString, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Mode {
    /// A number of items, in inventory order.
    #[strum(to_string = "COUNT", serialize = "ITEMS")]
    Count,
    /// A number of currency keys.
    #[strum(to_string = "KEYS")]
    Keys,
    /// A value in currency, made up from the configured denominations.
    #[strum(to_string = "VALUE", serialize = "METAL")]
    Value,
    /// An explicit list of asset IDs.
    #[strum(to_string = "ID_LIST", serialize = "ID")]
    IdList,
    /// The batch of most recently obtained items.
    #[strum(to_string = "RECENT")]
    Recent,
}
