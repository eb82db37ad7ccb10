//! Reconstruction options and configuration.

/// Width of the horizontal band treated as one column.
pub const DEFAULT_COLUMN_BAND: f64 = 100.0;

/// Options for reading-order reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingOptions {
    /// Horizontal band width; `x1` is rounded to the nearest multiple.
    /// Non-positive or non-finite values disable banding.
    pub column_band: f64,

    /// Whether sections themselves are reordered
    pub sort_sections: bool,
}

impl OrderingOptions {
    /// Create new ordering options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set column band width.
    pub fn with_column_band(mut self, band: f64) -> Self {
        self.column_band = band;
        self
    }

    /// Enable or disable section reordering.
    pub fn sort_sections(mut self, sort: bool) -> Self {
        self.sort_sections = sort;
        self
    }
}

impl Default for OrderingOptions {
    fn default() -> Self {
        Self {
            column_band: DEFAULT_COLUMN_BAND,
            sort_sections: true,
        }
    }
}

/// Options for resectioning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectioningOptions {
    /// What to do with labels outside the known vocabulary
    pub unknown_labels: UnknownLabelPolicy,

    /// Ordering used to linearize the block pool (`sort_sections` is ignored)
    pub ordering: OrderingOptions,
}

impl SectioningOptions {
    /// Create new sectioning options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set unknown label policy.
    pub fn with_unknown_labels(mut self, policy: UnknownLabelPolicy) -> Self {
        self.unknown_labels = policy;
        self
    }

    /// Fail on unrecognized labels.
    pub fn reject_unknown(mut self) -> Self {
        self.unknown_labels = UnknownLabelPolicy::Reject;
        self
    }

    /// Set ordering options used for the block pool.
    pub fn with_ordering(mut self, ordering: OrderingOptions) -> Self {
        self.ordering = ordering;
        self
    }
}

/// Handling of unrecognized labels during resectioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownLabelPolicy {
    /// Route the block to `other_blocks`
    #[default]
    Divert,
    /// Fail with an invariant violation
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let ordering = OrderingOptions::default();
        assert_eq!(ordering.column_band, 100.0);
        assert!(ordering.sort_sections);

        let sectioning = SectioningOptions::default();
        assert_eq!(sectioning.unknown_labels, UnknownLabelPolicy::Divert);
    }

    #[test]
    fn test_options_builder() {
        let options = SectioningOptions::new()
            .reject_unknown()
            .with_ordering(OrderingOptions::new().with_column_band(50.0).sort_sections(false));

        assert_eq!(options.unknown_labels, UnknownLabelPolicy::Reject);
        assert_eq!(options.ordering.column_band, 50.0);
        assert!(!options.ordering.sort_sections);
    }
}
