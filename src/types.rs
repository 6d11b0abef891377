//! Types for common values in Steam inventories and trade offers.

/// Uniquely identifies an application on Steam. For example: 440 for Team Fortress 2.
pub type AppId = u32;
/// A context ID belonging to an [`AppId`].
pub type ContextId = u64;
/// An asset ID unique to an [`AppId`] + [`ContextId`] combination.
pub type AssetId = u64;
/// An amount for stackable items. For non-stackable items this is simply `1`.
pub type Amount = u32;
/// The identity of an item: app ID, context ID and asset ID. Unique within one user's
/// inventories.
pub type ItemKey = (AppId, ContextId, AssetId);

// Types internally used by the crate.
/// Inventories are keyed by the owner's 64-bit SteamID, app and context.
pub(crate) type InventoryKey = (u64, AppId, ContextId);
