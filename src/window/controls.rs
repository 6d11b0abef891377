use crate::classifier::{TF2_APPID, CS2_APPID};
use crate::enums::{ListingIntent, TradeSide};
use crate::types::AppId;

/// Which of the window's controls are shown for the selected inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlVisibility {
    /// Adding a number of items. Always shown.
    pub items: bool,
    /// Adding keys.
    pub keys: bool,
    /// Adding metal.
    pub metal: bool,
    /// Adding the listing price.
    pub listing: bool,
}

impl ControlVisibility {
    /// The controls for an inventory. The listing button is shown for Team Fortress 2 when the
    /// selected inventory is the one paying the listing price.
    pub fn for_inventory(
        side: TradeSide,
        appid: AppId,
        listing_intent: Option<ListingIntent>,
    ) -> Self {
        let is_tf2 = appid == TF2_APPID;
        let is_cs2 = appid == CS2_APPID;
        let pays_listing = listing_intent
            .map(|intent| intent.currency_side() == side)
            .unwrap_or(false);

        Self {
            items: true,
            keys: is_tf2 || is_cs2,
            metal: is_tf2,
            listing: is_tf2 && pays_listing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_currency_controls_by_app() {
        let tf2 = ControlVisibility::for_inventory(TradeSide::You, 440, None);
        let cs2 = ControlVisibility::for_inventory(TradeSide::You, 730, None);
        let other = ControlVisibility::for_inventory(TradeSide::Them, 753, None);

        assert!(tf2.items && tf2.keys && tf2.metal && !tf2.listing);
        assert!(cs2.items && cs2.keys && !cs2.metal);
        assert!(other.items && !other.keys && !other.metal);
    }

    #[test]
    fn shows_listing_for_paying_side() {
        let buying = Some(ListingIntent::SellOrder);
        let selling = Some(ListingIntent::BuyOrder);

        assert!(ControlVisibility::for_inventory(TradeSide::You, 440, buying).listing);
        assert!(!ControlVisibility::for_inventory(TradeSide::Them, 440, buying).listing);
        assert!(ControlVisibility::for_inventory(TradeSide::Them, 440, selling).listing);
        assert!(!ControlVisibility::for_inventory(TradeSide::You, 440, selling).listing);
        assert!(!ControlVisibility::for_inventory(TradeSide::You, 730, buying).listing);
    }
}
