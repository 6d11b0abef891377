//! Summaries of the items one side has placed in the offer.

use crate::attribute_key::{AttributeKey, Attributes};
use crate::classifier::TF2_APPID;
use crate::inventory::InventoryRepository;
use crate::offer::OfferSideState;
use crate::types::{AppId, AssetId};
use crate::SteamID;
use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use std::fmt::Write;

/// Options for rendering summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// The URL of a particle effect image. `{}` is replaced with the effect.
    pub effect_url_template: String,
    /// The base URL of backpack.tf profiles. Team Fortress 2 items in a summary link to the
    /// user's backpack with the items selected.
    pub backpack_url_base: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            effect_url_template: "https://backpack.tf/images/440/particles/{}_94x94.png".into(),
            backpack_url_base: "https://backpack.tf/profiles".into(),
        }
    }
}

impl SummaryOptions {
    pub fn effect_url(&self, effect: &str) -> String {
        self.effect_url_template.replace("{}", effect)
    }
}

/// Visually identical items counted together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// The number of items.
    pub total: usize,
    /// Asset IDs grouped by app, in the order each app was first seen.
    pub apps: Vec<(AppId, Vec<AssetId>)>,
    /// The number of items sharing each set of attributes, in the order each was first seen.
    pub items: Vec<(AttributeKey, usize)>,
}

impl Summary {
    /// The asset IDs of an app's items.
    pub fn assetids(&self, appid: AppId) -> Option<&[AssetId]> {
        self.apps
            .iter()
            .find(|(id, _)| *id == appid)
            .map(|(_, assetids)| assetids.as_slice())
    }
}

/// Summarizes the items one side has placed in the offer. Returns `None` when no items are
/// offered or when any offered item's inventory has not loaded.
pub fn summarize(
    inventories: &InventoryRepository,
    steamid: SteamID,
    offer: &OfferSideState,
) -> Option<Summary> {
    if offer.is_empty() {
        return None;
    }

    let mut summary = Summary {
        total: offer.len(),
        ..Summary::default()
    };
    let mut item_positions: HashMap<AttributeKey, usize> = HashMap::new();

    for slot in offer.iter() {
        let Some(item) = inventories.find_item(steamid, slot.appid, slot.contextid, slot.assetid) else {
            log::debug!(
                "Item {}_{}_{} has not loaded, skipping summary",
                slot.appid,
                slot.contextid,
                slot.assetid,
            );
            return None;
        };
        let key = AttributeKey::encode(&item.appearance);

        if let Some(position) = item_positions.get(&key) {
            summary.items[*position].1 += 1;
        } else {
            item_positions.insert(key.clone(), summary.items.len());
            summary.items.push((key, 1));
        }

        if let Some((_, assetids)) = summary.apps.iter_mut().find(|(appid, _)| *appid == slot.appid) {
            assetids.push(slot.assetid);
        } else {
            summary.apps.push((slot.appid, vec![slot.assetid]));
        }
    }

    Some(summary)
}

/// The header of a summary e.g. `My summary (2 items):`.
pub fn render_header(label: &str, total: usize) -> String {
    let noun = if total == 1 { "item" } else { "items" };

    format!(
        r#"<div class="summary_header">{} summary ({total} {noun}):</div>"#,
        escape(label),
    )
}

/// Renders a summary as HTML. Items are wrapped in a link to the user's backpack.tf profile
/// when Team Fortress 2 items are included.
pub fn render_summary(
    label: &str,
    summary: &Summary,
    steamid: SteamID,
    options: &SummaryOptions,
) -> String {
    if summary.total == 0 {
        return String::new();
    }

    let mut html = render_header(label, summary.total);
    let tf2_assetids = summary.assetids(TF2_APPID);

    if let Some(assetids) = tf2_assetids {
        let url = format!(
            "{}/{}?select={}",
            options.backpack_url_base,
            u64::from(steamid),
            crate::helpers::ids_to_string(assetids),
        );

        let _ = write!(html, r#"<a title="Open on backpack.tf" href="{}" target="_blank">"#, escape(&url));
    }

    for (key, count) in &summary.items {
        let attributes = match key.attributes() {
            Ok(attributes) => attributes,
            Err(error) => {
                log::warn!("Skipping unreadable summary key: {error}");
                continue;
            },
        };

        html.push_str(&render_item(&attributes, *count, options));
    }

    if tf2_assetids.is_some() {
        html.push_str("</a>");
    }

    html
}

fn render_item(
    attributes: &Attributes,
    count: usize,
    options: &SummaryOptions,
) -> String {
    let mut classes = String::from("summary_item");
    let mut background = format!("url({})", attributes.get_img().unwrap_or_default());

    if let Some(effect) = attributes.get_effect().filter(|effect| *effect != "none") {
        let _ = write!(background, ", url('{}')", options.effect_url(effect));
    }

    if attributes.is_uncraft() {
        classes.push_str(" uncraft");
    }

    if attributes.is_strange() {
        classes.push_str(" strange");
    }

    let style = format!(
        "background-image: {background}; border-color: {};",
        attributes.get_border_color().unwrap_or_default(),
    );
    let badge = if count > 1 {
        format!(r#"<span class="summary_badge">{count}</span>"#)
    } else {
        "&nbsp;".to_string()
    };

    format!(r#"<span class="{classes}" style="{}">{badge}</span>"#, escape(&style))
}

/// Escapes text for use in HTML content and quoted attribute values.
fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::OfferSlot;
    use crate::test_helpers::{you, fixture_inventory, named_inventory};

    fn offer(assetids: &[AssetId]) -> OfferSideState {
        OfferSideState {
            assets: assetids
                .iter()
                .map(|assetid| OfferSlot::from((440, 2, *assetid)))
                .collect(),
        }
    }

    fn repository() -> InventoryRepository {
        let mut inventories = InventoryRepository::new();

        inventories.insert(you(), 440, 2, fixture_inventory());
        inventories
    }

    #[test]
    fn counts_identical_items_together() {
        let summary = summarize(&repository(), you(), &offer(&[1001, 1003, 1002])).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.items[0].1, 2);
        assert_eq!(summary.items[1].1, 1);
        assert_eq!(summary.assetids(440), Some([1001, 1003, 1002].as_slice()));
    }

    #[test]
    fn item_counts_add_up_to_total() {
        let summary = summarize(&repository(), you(), &offer(&[1001, 1002, 1003, 1009, 1010, 1011, 1012])).unwrap();
        let counted = summary.items.iter().map(|(_, count)| count).sum::<usize>();

        assert_eq!(counted, summary.total);
    }

    #[test]
    fn empty_offer_has_no_summary() {
        assert!(summarize(&repository(), you(), &OfferSideState::default()).is_none());
    }

    #[test]
    fn unloaded_item_has_no_summary() {
        assert!(summarize(&repository(), you(), &offer(&[1001, 9999])).is_none());
        assert!(summarize(&InventoryRepository::new(), you(), &offer(&[1001])).is_none());
    }

    #[test]
    fn renders_header() {
        assert_eq!(render_header("My", 1), r#"<div class="summary_header">My summary (1 item):</div>"#);
        assert_eq!(render_header("Their", 3), r#"<div class="summary_header">Their summary (3 items):</div>"#);
    }

    #[test]
    fn renders_tf2_items_with_backpack_link() {
        let summary = summarize(&repository(), you(), &offer(&[1009, 1010, 1011])).unwrap();
        let html = render_summary("My", &summary, you(), &SummaryOptions::default());

        assert!(html.starts_with(r#"<div class="summary_header">My summary (3 items):</div><a title="Open on backpack.tf" href="https://backpack.tf/profiles/76561198000000001?select=1009,1010,1011" target="_blank">"#));
        assert!(html.contains(r#"<span class="summary_badge">2</span>"#));
        assert!(html.contains("url('https://backpack.tf/images/440/particles/13_94x94.png')"));
        assert!(html.contains(r#"class="summary_item strange""#));
        assert!(html.contains("border-color: #CF6A32;"));
        assert!(html.ends_with("&nbsp;</span></a>"));
    }

    #[test]
    fn renders_other_apps_without_link() {
        let mut inventories = InventoryRepository::new();

        inventories.insert(you(), 730, 2, named_inventory(730, 2, [1], "Case"));

        let offer = OfferSideState {
            assets: vec![OfferSlot::from((730, 2, 1))],
        };
        let summary = summarize(&inventories, you(), &offer).unwrap();
        let html = render_summary("Their", &summary, you(), &SummaryOptions::default());

        assert_eq!(
            html,
            r#"<div class="summary_header">Their summary (1 item):</div><span class="summary_item" style="background-image: url(); border-color: ;">&nbsp;</span>"#,
        );
    }

    #[test]
    fn skips_effect_named_none() {
        let attributes = Attributes::new()
            .img("icon.png")
            .effect("none")
            .uncraft(true);
        let html = render_item(&attributes, 1, &SummaryOptions::default());

        assert_eq!(
            html,
            r#"<span class="summary_item uncraft" style="background-image: url(icon.png); border-color: ;">&nbsp;</span>"#,
        );
    }

    #[test]
    fn empty_summary_renders_nothing() {
        assert_eq!(render_summary("My", &Summary::default(), you(), &SummaryOptions::default()), "");
    }
}
