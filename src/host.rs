//! The page hosting the trade offer window.

use crate::error::HostError;
use crate::offer::TradeStatus;

/// Calls into the trade offer page. The page owns the rendered offer; this crate only asks it
/// to redraw after changing the [`TradeStatus`].
pub trait TradeHost {
    /// Redraws the offer from the given status. `force` redraws even if the version is
    /// unchanged.
    fn refresh_trade_status(
        &mut self,
        status: &TradeStatus,
        force: bool,
    ) -> Result<(), HostError>;

    /// Whether the offer can be modified in the window's current state, e.g. `false` while the
    /// "Change offer" button is shown on a received offer.
    fn can_modify_offer(&self) -> bool {
        true
    }
}

impl<T> TradeHost for &mut T
where
    T: TradeHost + ?Sized,
{
    fn refresh_trade_status(
        &mut self,
        status: &TradeStatus,
        force: bool,
    ) -> Result<(), HostError> {
        (**self).refresh_trade_status(status, force)
    }

    fn can_modify_offer(&self) -> bool {
        (**self).can_modify_offer()
    }
}
