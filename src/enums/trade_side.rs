use strum_macros::Display;

/// A side of the trade offer.
#[derive(Display, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TradeSide {
    /// The logged-in user.
    You,
    /// The trade partner.
    Them,
}

impl TradeSide {
    /// The side an item belongs to.
    pub fn of_item(is_their_item: bool) -> Self {
        if is_their_item {
            Self::Them
        } else {
            Self::You
        }
    }

    /// The label used for this side's summary.
    pub fn summary_label(&self) -> &'static str {
        match self {
            Self::You => "My",
            Self::Them => "Their",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::You => 0,
            Self::Them => 1,
        }
    }
}

/// Which sides of the trade to select items from.
#[derive(Display, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SideFilter {
    You,
    Them,
    /// Your items first, then theirs.
    Either,
}

impl SideFilter {
    /// The sides covered by this filter, in scanning order.
    pub fn sides(&self) -> &'static [TradeSide] {
        match self {
            Self::You => &[TradeSide::You],
            Self::Them => &[TradeSide::Them],
            Self::Either => &[TradeSide::You, TradeSide::Them],
        }
    }
}

impl From<TradeSide> for SideFilter {
    fn from(side: TradeSide) -> Self {
        match side {
            TradeSide::You => Self::You,
            TradeSide::Them => Self::Them,
        }
    }
}
