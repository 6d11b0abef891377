use crate::enums::TradeSide;
use crate::types::{AppId, AssetId, ContextId};
use std::path::{Path, PathBuf};
use lazy_regex::{regex, regex_captures};

/// The directory preferences are saved to when none is given.
pub fn default_data_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Writes a file by writing to a temporary file next to it and renaming it into place, so that
/// readers never see a partially written file.
pub async fn write_file_atomic<P>(
    filepath: P,
    bytes: &[u8],
) -> std::io::Result<()>
where
    P: AsRef<Path>,
{
    let filepath = filepath.as_ref();
    let mut temp_filepath = filepath.as_os_str().to_owned();

    temp_filepath.push(".tmp");

    if let Some(parent) = filepath.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    async_fs::write(&temp_filepath, bytes).await?;

    if let Err(error) = async_fs::rename(&temp_filepath, filepath).await {
        let _ = async_fs::remove_file(&temp_filepath).await;

        return Err(error);
    }

    Ok(())
}

/// Parses the ID of an inventory's element e.g. `inventory_76561198000000001_440_2` into the
/// SteamID, app ID and context ID.
pub fn parse_inventory_element_id(element_id: &str) -> Option<(u64, AppId, ContextId)> {
    let (_, steamid, appid, contextid) = regex_captures!(
        r#"^inventory_(\d+)_(\d+)_(\d+)$"#,
        element_id,
    )?;

    Some((steamid.parse().ok()?, appid.parse().ok()?, contextid.parse().ok()?))
}

/// Parses the ID of an item's element e.g. `item440_2_123`.
pub fn parse_item_element_id(element_id: &str) -> Option<(AppId, ContextId, AssetId)> {
    let (_, appid, contextid, assetid) = regex_captures!(
        r#"^item(\d+)_(\d+)_(\d+)$"#,
        element_id,
    )?;

    Some((appid.parse().ok()?, contextid.parse().ok()?, assetid.parse().ok()?))
}

/// Parses the ID of an app select option e.g. `appselect_option_you_440_2`.
pub fn parse_app_select_option(element_id: &str) -> Option<(TradeSide, AppId, ContextId)> {
    let (_, side, appid, contextid) = regex_captures!(
        r#"^appselect_option_(you|them)_(\d+)_(\d+)$"#,
        element_id,
    )?;
    let side = if side == "you" {
        TradeSide::You
    } else {
        TradeSide::Them
    };

    Some((side, appid.parse().ok()?, contextid.parse().ok()?))
}

/// Parses asset IDs from text such as `"123, 456 789"`. Returns `None` if no IDs are found.
pub fn parse_ids(text: &str) -> Option<Vec<AssetId>> {
    let ids = regex!(r#"\d+"#)
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<AssetId>().ok())
        .collect::<Vec<_>>();

    if ids.is_empty() {
        return None;
    }

    Some(ids)
}

/// Joins asset IDs with commas.
pub fn ids_to_string(ids: &[AssetId]) -> String {
    ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
