//! The trade offer window: selection, offer changes and summaries for one trade.

mod builder;
mod controls;
mod options;

pub use builder::TradeWindowBuilder;
pub use controls::ControlVisibility;
pub use options::TradeWindowOptions;

use crate::enums::{SideFilter, TradeSide};
use crate::error::Error;
use crate::helpers::{ids_to_string, parse_app_select_option, parse_ids, parse_inventory_element_id};
use crate::host::TradeHost;
use crate::inventory::{Inventory, InventoryContext, InventoryRepository};
use crate::inventory_events::{run_callbacks, InventoryLoadRegistry, InventoryLoaded};
use crate::mutator;
use crate::offer::{OfferSlot, TradeStatus};
use crate::preferences::{self, Preferences};
use crate::scheduler::SummarizeScheduler;
use crate::selection::{select, SelectionContext, SelectionRequest};
use crate::summary::{render_summary, summarize};
use crate::types::{AppId, ContextId};
use crate::url_params::UrlParams;
use crate::SteamID;
use std::fmt;
use std::path::PathBuf;

/// The trade offer window for a trade between you and a partner.
///
/// The window holds the inventories the page has loaded and the state of the offer. Changes
/// to the offer are passed to the [`TradeHost`] to be drawn. Use [`TradeWindowBuilder`] to
/// construct one.
pub struct TradeWindow<H> {
    you: SteamID,
    them: SteamID,
    /// The inventories the page has loaded.
    pub inventories: InventoryRepository,
    /// The state of the offer.
    pub status: TradeStatus,
    host: H,
    registry: InventoryLoadRegistry<TradeWindow<H>>,
    scheduler: SummarizeScheduler,
    options: TradeWindowOptions,
    active: Option<InventoryContext>,
    params: UrlParams,
    preferences: Preferences,
    data_directory: Option<PathBuf>,
    notices: Vec<String>,
}

impl<H> fmt::Debug for TradeWindow<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TradeWindow")
            .field("you", &u64::from(self.you))
            .field("them", &u64::from(self.them))
            .field("inventories", &self.inventories.len())
            .field("status", &self.status)
            .field("registry", &self.registry)
            .field("active", &self.active)
            .field("params", &self.params)
            .field("preferences", &self.preferences)
            .finish()
    }
}

impl<H> TradeWindow<H>
where
    H: TradeHost + 'static,
{
    fn new(
        builder: TradeWindowBuilder,
        host: H,
        preferences: Preferences,
    ) -> Self {
        Self {
            you: builder.you,
            them: builder.them,
            inventories: InventoryRepository::new(),
            status: TradeStatus::new(),
            host,
            registry: InventoryLoadRegistry::new(),
            scheduler: SummarizeScheduler::new(builder.options.debounce),
            options: builder.options,
            active: builder.active,
            params: builder.params,
            preferences,
            data_directory: builder.data_directory,
            notices: Vec::new(),
        }
    }

    /// The SteamID of a side of the trade.
    pub fn steamid(&self, side: TradeSide) -> SteamID {
        match side {
            TradeSide::You => self.you,
            TradeSide::Them => self.them,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn options(&self) -> &TradeWindowOptions {
        &self.options
    }

    pub fn url_params(&self) -> &UrlParams {
        &self.params
    }

    /// Adds the items selected by a request to the offer. Returns whether the request was met,
    /// or `None` if the offer cannot be changed right now or the selected inventory has not
    /// loaded.
    pub fn add_items(&mut self, request: &SelectionRequest) -> Result<Option<bool>, Error> {
        if !self.host.can_modify_offer() {
            log::debug!("Offer cannot be modified, not adding items");
            return Ok(None);
        }

        let ctx = SelectionContext {
            inventories: &self.inventories,
            status: &self.status,
            options: &self.options.selection,
            you: self.you,
            them: self.them,
            active: self.active,
        };
        let Some(result) = select(&ctx, request) else {
            log::debug!("No inventory loaded to add items from");
            return Ok(None);
        };

        mutator::add_items(&mut self.status, &mut self.host, &result.items)?;

        Ok(Some(result.satisfied))
    }

    /// Adds items using a mode name such as `"ITEMS"`, `"KEYS"` or `"METAL"`.
    pub fn add_items_by_name(
        &mut self,
        mode: &str,
        amount: f64,
        start_index: i64,
        side: SideFilter,
    ) -> Result<Option<bool>, Error> {
        let request = SelectionRequest::from_name(mode, amount, start_index, side)?;

        self.add_items(&request)
    }

    /// Adds items from either side by their asset IDs, given as text such as `"123,456"`.
    pub fn add_ids(&mut self, text: &str) -> Result<Option<bool>, Error> {
        let Some(ids) = parse_ids(text) else {
            return Ok(None);
        };

        self.add_items(&SelectionRequest::ids(ids))
    }

    /// The asset IDs one side has placed in the offer, joined by commas.
    pub fn get_ids(&self, side: TradeSide) -> String {
        let ids = self.status
            .side(side)
            .iter()
            .map(|slot| slot.assetid)
            .collect::<Vec<_>>();

        ids_to_string(&ids)
    }

    /// Removes every item one side has placed in the offer.
    pub fn clear(&mut self, side: TradeSide) -> Result<usize, Error> {
        Ok(mutator::clear_side(&mut self.status, &mut self.host, side)?)
    }

    /// Renders the summary of one side's items. Empty when the side has no items or the
    /// summary cannot be made yet.
    pub fn summarize(&self, side: TradeSide) -> String {
        let steamid = self.steamid(side);

        summarize(&self.inventories, steamid, self.status.side(side))
            .map(|summary| {
                render_summary(side.summary_label(), &summary, steamid, &self.options.summary)
            })
            .unwrap_or_default()
    }

    /// Schedules a summary pass for one side. Passes scheduled in quick succession are merged
    /// into the last. Must be called within a tokio runtime.
    pub fn schedule_summary<F>(&mut self, side: TradeSide, task: F) -> std::time::Duration
    where
        F: FnOnce() + Send + 'static,
    {
        self.scheduler.schedule(self.status.side(side).len(), task)
    }

    /// Adds the listing price from the URL parameters: keys first, then metal, from the side
    /// paying. Returns a reason for each currency that could not be met.
    pub fn add_listing_price(&mut self, start_index: i64) -> Result<Vec<String>, Error> {
        let mut reasons = Vec::new();
        let Some(intent) = self.params.listing_intent else {
            return Ok(reasons);
        };
        let side = SideFilter::from(intent.currency_side());
        let keys = self.params.listing_currencies_keys;
        let metal = self.params.listing_currencies_metal;

        if keys > 0 {
            let request = SelectionRequest::keys(keys as usize, start_index, side);

            if self.add_items(&request)? == Some(false) {
                reasons.push("not enough keys".to_string());
            }
        }

        if metal > 0.0 {
            let request = SelectionRequest::value(metal, start_index, side);

            if self.add_items(&request)? == Some(false) {
                reasons.push("not enough metal".to_string());
            }
        }

        Ok(reasons)
    }

    /// Applies the URL parameters when the page opens. When selling to a buy order the
    /// partner's Team Fortress 2 inventory is loaded right away. A `for_item` is placed in the
    /// offer and checked once the partner's inventory loads.
    pub fn apply_url_params(&mut self) -> Result<(), Error> {
        if self.params.listing_intent.map(|intent| intent.is_selling()).unwrap_or(false) {
            mutator::force_inventory_load(
                &mut self.status,
                &mut self.host,
                crate::classifier::TF2_APPID,
                2,
            );
        }

        self.apply_for_item()
    }

    /// Places the `for_item` from the URL parameters in the offer. If the item is missing
    /// from the partner's inventory when it loads, the partner's items are cleared and a
    /// notice is added.
    pub fn apply_for_item(&mut self) -> Result<(), Error> {
        let Some((appid, contextid, assetid)) = self.params.for_item else {
            return Ok(());
        };

        mutator::add_partner_item(
            &mut self.status,
            &mut self.host,
            OfferSlot::from((appid, contextid, assetid)),
        )?;

        self.registry.register(self.them, appid, contextid, move |window: &mut Self, event| {
            if window.inventories.find_item(event.steamid, appid, contextid, assetid).is_some() {
                return;
            }

            if let Err(error) = mutator::clear_side(&mut window.status, &mut window.host, TradeSide::Them) {
                log::warn!("Error clearing unavailable item {assetid}: {error}");
            }

            window.notices.push(format!(
                "Seems like the item you are looking to buy (ID: {assetid}) is no longer available. \
                You should check other user's backpack and see if it's still there."
            ));
        });

        Ok(())
    }

    /// Runs `callback` the next time any of the user's inventories loads.
    pub fn on_user_inventory_loaded<F>(&mut self, steamid: SteamID, callback: F)
    where
        F: FnOnce(&mut Self, &InventoryLoaded) + 'static,
    {
        self.registry.register_for_user(steamid, callback);
    }

    /// Runs `callback` the next time the user's inventory for an app and context loads.
    pub fn on_inventory_loaded<F>(
        &mut self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
        callback: F,
    )
    where
        F: FnOnce(&mut Self, &InventoryLoaded) + 'static,
    {
        self.registry.register(steamid, appid, contextid, callback);
    }

    /// Stores an inventory the page has loaded and runs the callbacks waiting on it. Items are
    /// marked as the partner's when the inventory is the partner's. Returns the number of
    /// callbacks run.
    ///
    /// Summaries are not redrawn here. A side's [`summarize`][Self::summarize] output is empty
    /// until the inventories of its placed items have loaded, so summarize again after a load.
    pub fn inventory_loaded(
        &mut self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
        mut inventory: Inventory,
    ) -> usize {
        inventory.set_their_items(u64::from(steamid) == u64::from(self.them));
        self.inventories.insert(steamid, appid, contextid, inventory);
        self.notify_loaded(&InventoryLoaded::new(steamid, appid, contextid))
    }

    /// Runs the callbacks waiting on the inventory with the given element ID e.g.
    /// `inventory_76561198000000001_440_2`.
    pub fn notify_inventory_element(&mut self, element_id: &str) -> Result<usize, Error> {
        let event = InventoryLoaded::from_element_id(element_id)?;

        Ok(self.notify_loaded(&event))
    }

    fn notify_loaded(&mut self, event: &InventoryLoaded) -> usize {
        let callbacks = self.registry.take_callbacks(event);

        run_callbacks(callbacks, self, event)
    }

    /// The inventory shown in the window.
    pub fn active_inventory(&self) -> Option<InventoryContext> {
        self.active
    }

    pub fn set_active_inventory(&mut self, active: Option<InventoryContext>) {
        self.active = active;
    }

    /// Sets the inventory shown from the ID of an app select option e.g.
    /// `appselect_option_you_440_2` or an inventory's element e.g.
    /// `inventory_76561198000000001_440_2`.
    pub fn select_active_from_element_id(&mut self, element_id: &str) -> Result<InventoryContext, Error> {
        let active = if let Some((side, appid, contextid)) = parse_app_select_option(element_id) {
            InventoryContext::new(side, appid, contextid)
        } else if let Some((steamid, appid, contextid)) = parse_inventory_element_id(element_id) {
            let side = if steamid == u64::from(self.you) {
                TradeSide::You
            } else {
                TradeSide::Them
            };

            InventoryContext::new(side, appid, contextid)
        } else {
            return Err(Error::InvalidElementId(element_id.to_owned()));
        };

        self.active = Some(active);

        Ok(active)
    }

    /// The controls shown for the inventory in the window.
    pub fn controls_visibility(&self) -> Option<ControlVisibility> {
        self.active.map(|active| {
            ControlVisibility::for_inventory(active.side, active.appid, self.params.listing_intent)
        })
    }

    /// Whether the asset ID fields are shown.
    pub fn id_fields_visible(&self) -> bool {
        self.preferences.id_visible
    }

    /// Shows or hides the asset ID fields. Returns whether they are now shown.
    pub fn toggle_id_fields(&mut self) -> bool {
        self.preferences.id_visible = !self.preferences.id_visible;
        self.preferences.id_visible
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Saves preferences to the data directory, if one was set.
    pub async fn save_preferences(&self) -> Result<(), Error> {
        let Some(data_directory) = &self.data_directory else {
            return Ok(());
        };

        preferences::save_preferences(&self.preferences, data_directory).await?;

        Ok(())
    }

    /// Takes the messages to show the user.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}
