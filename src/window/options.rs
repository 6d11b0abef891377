use crate::scheduler::DebounceRules;
use crate::selection::SelectionOptions;
use crate::summary::SummaryOptions;

/// Options for a [`TradeWindow`][super::TradeWindow].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeWindowOptions {
    /// Options for selecting items.
    pub selection: SelectionOptions,
    /// Options for rendering summaries.
    pub summary: SummaryOptions,
    /// When to run summary passes.
    pub debounce: DebounceRules,
}
