//! The index-offset policy shared by every selection mode.

/// A start index resolved against the candidate order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartIndex {
    /// The index into the (possibly reversed) candidates.
    pub index: usize,
    /// Whether candidates are scanned from the end.
    pub reversed: bool,
}

impl StartIndex {
    /// Resolves a signed start index. `-1` is the last candidate, `-2` the one before it, and
    /// so on.
    pub fn resolve(start_index: i64) -> Self {
        if start_index < 0 {
            Self {
                index: usize::try_from((start_index + 1).unsigned_abs()).unwrap_or(usize::MAX),
                reversed: true,
            }
        } else {
            Self {
                index: usize::try_from(start_index).unwrap_or(usize::MAX),
                reversed: false,
            }
        }
    }
}

/// Offsets the index to pick items at so that a window of `amount` items fits into `length`
/// available items. The window is pulled back to end at `length` when it would overrun.
pub fn offset_index(index: usize, amount: usize, length: usize) -> usize {
    if index.saturating_add(amount) >= length {
        length.saturating_sub(amount)
    } else {
        index
    }
}
