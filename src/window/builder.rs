use super::{TradeWindow, TradeWindowOptions};
use crate::error::FileError;
use crate::helpers::default_data_directory;
use crate::host::TradeHost;
use crate::inventory::InventoryContext;
use crate::preferences::{load_preferences, Preferences};
use crate::url_params::UrlParams;
use crate::SteamID;
use std::path::PathBuf;

/// Builder for constructing a [`TradeWindow`].
#[derive(Debug, Clone)]
pub struct TradeWindowBuilder {
    /// Your SteamID.
    pub(crate) you: SteamID,
    /// The partner's SteamID.
    pub(crate) them: SteamID,
    pub(crate) options: TradeWindowOptions,
    /// The directory preferences are saved to. Preferences are not saved if this is not set.
    pub(crate) data_directory: Option<PathBuf>,
    /// The inventory shown when the window opens.
    pub(crate) active: Option<InventoryContext>,
    /// The parameters of the page's URL.
    pub(crate) params: UrlParams,
}

impl TradeWindowBuilder {
    /// Creates a new [`TradeWindowBuilder`] for a trade between you and a partner.
    pub fn new(you: SteamID, them: SteamID) -> Self {
        Self {
            you,
            them,
            options: TradeWindowOptions::default(),
            data_directory: None,
            active: None,
            params: UrlParams::default(),
        }
    }

    pub fn options(mut self, options: TradeWindowOptions) -> Self {
        self.options = options;
        self
    }

    /// The directory used to store preferences.
    pub fn data_directory<T>(mut self, data_directory: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.data_directory = Some(data_directory.into());
        self
    }

    /// Stores preferences in the platform's data directory.
    pub fn default_data_directory(mut self) -> Self {
        self.data_directory = Some(default_data_directory());
        self
    }

    /// The inventory shown when the window opens.
    pub fn active_inventory(mut self, active: InventoryContext) -> Self {
        self.active = Some(active);
        self
    }

    /// The parameters of the page's URL.
    pub fn url_params(mut self, params: UrlParams) -> Self {
        self.params = params;
        self
    }

    /// Builds the window. Saved preferences are loaded from the data directory when one is set.
    pub fn build<H>(self, host: H) -> TradeWindow<H>
    where
        H: TradeHost + 'static,
    {
        let preferences = self.data_directory
            .as_deref()
            .map(|data_directory| match load_preferences(data_directory) {
                Ok(preferences) => preferences,
                Err(FileError::FileSystem(error)) if error.kind() == std::io::ErrorKind::NotFound => {
                    Preferences::default()
                },
                Err(error) => {
                    log::warn!("Error loading preferences: {error}");
                    Preferences::default()
                },
            })
            .unwrap_or_default();

        TradeWindow::new(self, host, preferences)
    }
}
