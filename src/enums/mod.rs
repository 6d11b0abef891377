//! Enumerated types.

mod listing_intent;
mod mode;
mod trade_side;

pub use listing_intent::ListingIntent;
pub use mode::Mode;
pub use trade_side::{TradeSide, SideFilter};
