use super::TradeSide;
use num_enum::{TryFromPrimitive, IntoPrimitive};
use serde_repr::{Serialize_repr, Deserialize_repr};
use strum_macros::{Display, EnumString};

/// The intent of the listing a trade offer was opened from, given by the `listing_intent`
/// URL parameter.
#[derive(Serialize_repr, Deserialize_repr, Display, EnumString, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum ListingIntent {
    /// The listing is a buy order. We are selling to the partner, who pays with their
    /// currencies.
    BuyOrder = 0,
    /// The listing is a sell order. We are buying from the partner and pay with our
    /// currencies.
    SellOrder = 1,
}

impl ListingIntent {
    /// The side whose inventory provides the currencies for the listing price.
    pub fn currency_side(&self) -> TradeSide {
        match self {
            Self::BuyOrder => TradeSide::Them,
            Self::SellOrder => TradeSide::You,
        }
    }

    /// We are selling an item to the partner.
    pub fn is_selling(&self) -> bool {
        matches!(self, Self::BuyOrder)
    }
}
