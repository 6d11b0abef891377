//! Preferences saved between page loads.

use crate::error::FileError;
use crate::helpers::write_file_atomic;
use crate::serialize;
use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;

const FILENAME: &str = "preferences.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether the asset ID fields are shown.
    #[serde(default)]
    #[serde(deserialize_with = "serialize::into_bool")]
    pub id_visible: bool,
}

/// Loads preferences from the data directory.
pub fn load_preferences(path: &Path) -> Result<Preferences, FileError> {
    let filepath = path.join(FILENAME);
    let data = fs::read_to_string(filepath)?;
    let preferences: Preferences = serde_json::from_str(&data)?;

    Ok(preferences)
}

/// Saves preferences to the data directory.
pub async fn save_preferences(
    preferences: &Preferences,
    path: &Path,
) -> Result<(), FileError> {
    let filepath = path.join(FILENAME);
    let data = serde_json::to_string(preferences)?;

    write_file_atomic(filepath, data.as_bytes()).await?;

    Ok(())
}
