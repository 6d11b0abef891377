//! Bulk item selection, offer summaries and batched offer updates for the Steam trade offer
//! window.
//!
//! The page hosting the window loads inventories and draws the offer. This crate decides which
//! items to add, keeps the offer state in sync through a [`TradeHost`] and renders summaries of
//! each side's items.
//!
//! ```no_run
//! use steam_tradeoffer_window::{
//!     TradeWindowBuilder,
//!     TradeHost,
//!     TradeStatus,
//!     HostError,
//!     Inventory,
//!     InventoryContext,
//!     SelectionRequest,
//!     SideFilter,
//!     SteamID,
//!     TradeSide,
//! };
//!
//! struct Page;
//!
//! impl TradeHost for Page {
//!     fn refresh_trade_status(&mut self, _status: &TradeStatus, _force: bool) -> Result<(), HostError> {
//!         Ok(())
//!     }
//! }
//!
//! let you = SteamID::from(76561198000000001);
//! let them = SteamID::from(76561198000000002);
//! let mut window = TradeWindowBuilder::new(you, them)
//!     .active_inventory(InventoryContext::new(TradeSide::You, 440, 2))
//!     .build(Page);
//! let inventory = Inventory::from_json("[]").unwrap();
//!
//! window.inventory_loaded(you, 440, 2, inventory);
//!
//! // add 2 refined worth of metal from your inventory
//! let satisfied = window.add_items(&SelectionRequest::value(2.0, 0, SideFilter::You)).unwrap();
//!
//! println!("{satisfied:?} {}", window.summarize(TradeSide::You));
//! ```

pub mod attribute_key;
pub mod classifier;
pub mod enums;
pub mod error;
pub mod helpers;
pub mod host;
pub mod inventory;
pub mod inventory_events;
pub mod item;
pub mod mutator;
pub mod offer;
pub mod preferences;
pub mod scheduler;
pub mod selection;
pub mod serialize;
pub mod summary;
pub mod types;
pub mod url_params;
pub mod window;

#[cfg(test)]
mod test_helpers;

pub use attribute_key::{AttributeKey, Attributes};
pub use classifier::Classification;
pub use enums::{ListingIntent, Mode, SideFilter, TradeSide};
pub use error::{Error, FileError, HostError};
pub use host::TradeHost;
pub use inventory::{Inventory, InventoryContext, InventoryRepository};
pub use inventory_events::{InventoryLoadRegistry, InventoryLoaded};
pub use item::{InventoryItem, Tag};
pub use offer::{OfferSideState, OfferSlot, TradeStatus};
pub use preferences::Preferences;
pub use scheduler::{DebounceRules, SummarizeScheduler};
pub use selection::{DenominationTable, SelectionOptions, SelectionRequest, SelectionResult};
pub use summary::{Summary, SummaryOptions};
pub use url_params::UrlParams;
pub use window::{ControlVisibility, TradeWindow, TradeWindowBuilder, TradeWindowOptions};

pub use steamid_ng::SteamID;
