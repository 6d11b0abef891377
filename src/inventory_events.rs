//! Callbacks run when the page finishes loading an inventory.

use crate::error::Error;
use crate::helpers::parse_inventory_element_id;
use crate::types::{AppId, ContextId, InventoryKey};
use crate::SteamID;
use std::collections::HashMap;
use std::fmt;

/// An inventory finished loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InventoryLoaded {
    pub steamid: SteamID,
    pub appid: AppId,
    pub contextid: ContextId,
}

impl InventoryLoaded {
    pub fn new(steamid: SteamID, appid: AppId, contextid: ContextId) -> Self {
        Self {
            steamid,
            appid,
            contextid,
        }
    }

    /// Reads the event from the ID of the inventory's element on the page e.g.
    /// `inventory_76561198000000001_440_2`.
    pub fn from_element_id(element_id: &str) -> Result<Self, Error> {
        let (steamid, appid, contextid) = parse_inventory_element_id(element_id)
            .ok_or_else(|| Error::InvalidElementId(element_id.to_owned()))?;

        Ok(Self::new(SteamID::from(steamid), appid, contextid))
    }

    fn inventory_key(&self) -> InventoryKey {
        (u64::from(self.steamid), self.appid, self.contextid)
    }
}

/// A callback waiting for an inventory to load. It receives the value the registry is
/// notified with, usually the trade window.
pub type LoadCallback<T> = Box<dyn FnOnce(&mut T, &InventoryLoaded)>;

/// Queued callbacks waiting for inventories to load. Each callback runs once.
pub struct InventoryLoadRegistry<T> {
    users: HashMap<u64, Vec<LoadCallback<T>>>,
    inventories: HashMap<InventoryKey, Vec<LoadCallback<T>>>,
}

impl<T> Default for InventoryLoadRegistry<T> {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            inventories: HashMap::new(),
        }
    }
}

impl<T> fmt::Debug for InventoryLoadRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InventoryLoadRegistry")
            .field("users", &self.users.values().map(Vec::len).sum::<usize>())
            .field("inventories", &self.inventories.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl<T> InventoryLoadRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `callback` the next time any inventory belonging to the user loads.
    pub fn register_for_user<F>(&mut self, steamid: SteamID, callback: F)
    where
        F: FnOnce(&mut T, &InventoryLoaded) + 'static,
    {
        self.users
            .entry(u64::from(steamid))
            .or_default()
            .push(Box::new(callback));
    }

    /// Runs `callback` the next time the user's inventory for the app and context loads.
    pub fn register<F>(
        &mut self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
        callback: F,
    )
    where
        F: FnOnce(&mut T, &InventoryLoaded) + 'static,
    {
        self.inventories
            .entry((u64::from(steamid), appid, contextid))
            .or_default()
            .push(Box::new(callback));
    }

    /// Removes and returns the callbacks waiting on an event, user callbacks first, each group
    /// in the order registered. Use this when the callbacks need the value that owns the
    /// registry.
    pub fn take_callbacks(&mut self, event: &InventoryLoaded) -> Vec<LoadCallback<T>> {
        let mut callbacks = self.users
            .remove(&u64::from(event.steamid))
            .unwrap_or_default();

        if let Some(inventory_callbacks) = self.inventories.remove(&event.inventory_key()) {
            callbacks.extend(inventory_callbacks);
        }

        callbacks
    }

    /// Runs the callbacks waiting on an event. Returns how many ran.
    pub fn notify_loaded(&mut self, target: &mut T, event: &InventoryLoaded) -> usize {
        run_callbacks(self.take_callbacks(event), target, event)
    }

    /// Runs the callbacks waiting on the inventory with the given element ID.
    pub fn notify_loaded_from_element_id(
        &mut self,
        target: &mut T,
        element_id: &str,
    ) -> Result<usize, Error> {
        let event = InventoryLoaded::from_element_id(element_id)?;

        Ok(self.notify_loaded(target, &event))
    }

    /// The number of callbacks waiting.
    pub fn len(&self) -> usize {
        self.users.values().map(Vec::len).sum::<usize>() +
        self.inventories.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs callbacks taken from a registry.
pub fn run_callbacks<T>(
    callbacks: Vec<LoadCallback<T>>,
    target: &mut T,
    event: &InventoryLoaded,
) -> usize {
    let count = callbacks.len();

    for callback in callbacks {
        callback(target, event);
    }

    if count > 0 {
        log::debug!(
            "Ran {count} callbacks for inventory {}_{}_{}",
            u64::from(event.steamid),
            event.appid,
            event.contextid,
        );
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{you, them};

    fn log_to(label: &'static str) -> impl FnOnce(&mut Vec<String>, &InventoryLoaded) {
        move |log, event| log.push(format!("{label} {}", event.appid))
    }

    #[test]
    fn runs_user_callbacks_before_inventory_callbacks() {
        let mut registry = InventoryLoadRegistry::new();
        let mut log = Vec::new();

        registry.register(you(), 440, 2, log_to("a"));
        registry.register_for_user(you(), log_to("b"));
        registry.register(you(), 440, 2, log_to("c"));
        registry.register_for_user(you(), log_to("d"));

        let count = registry.notify_loaded(&mut log, &InventoryLoaded::new(you(), 440, 2));

        assert_eq!(count, 4);
        assert_eq!(log, vec!["b 440", "d 440", "a 440", "c 440"]);
        assert!(registry.is_empty());
    }

    #[test]
    fn runs_each_callback_once() {
        let mut registry = InventoryLoadRegistry::new();
        let mut log = Vec::new();
        let event = InventoryLoaded::new(you(), 440, 2);

        registry.register(you(), 440, 2, log_to("a"));

        assert_eq!(registry.notify_loaded(&mut log, &event), 1);
        assert_eq!(registry.notify_loaded(&mut log, &event), 0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn leaves_other_inventories_queued() {
        let mut registry = InventoryLoadRegistry::new();
        let mut log = Vec::new();

        registry.register(you(), 440, 2, log_to("a"));
        registry.register(you(), 730, 2, log_to("b"));
        registry.register(them(), 440, 2, log_to("c"));
        registry.register_for_user(them(), log_to("d"));

        assert_eq!(registry.notify_loaded(&mut log, &InventoryLoaded::new(you(), 730, 2)), 1);
        assert_eq!(log, vec!["b 730"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn notifies_from_element_id() {
        let mut registry = InventoryLoadRegistry::new();
        let mut log = Vec::new();

        registry.register(them(), 440, 2, log_to("a"));

        let count = registry
            .notify_loaded_from_element_id(&mut log, "inventory_76561198000000002_440_2")
            .unwrap();

        assert_eq!(count, 1);
        assert!(matches!(
            registry.notify_loaded_from_element_id(&mut log, "trade_yours"),
            Err(Error::InvalidElementId(_)),
        ));
    }
}
