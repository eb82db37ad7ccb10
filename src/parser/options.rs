//! Loading options and configuration.

/// Options for loading documents from their external form.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// How block labels outside the known vocabulary are handled
    pub label_policy: LabelPolicy,
}

impl LoadOptions {
    /// Create new load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set label policy.
    pub fn with_label_policy(mut self, policy: LabelPolicy) -> Self {
        self.label_policy = policy;
        self
    }

    /// Keep unknown labels instead of rejecting them.
    pub fn permissive(mut self) -> Self {
        self.label_policy = LabelPolicy::Permissive;
        self
    }
}

/// Handling of block labels outside `{text, title, list, figure, table}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPolicy {
    /// Fail validation on an unknown label
    #[default]
    Strict,
    /// Keep the label as [`Label::Unrecognized`](crate::model::Label::Unrecognized)
    Permissive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LoadOptions::default();
        assert_eq!(options.label_policy, LabelPolicy::Strict);
    }

    #[test]
    fn test_load_options_builder() {
        let options = LoadOptions::new().permissive();
        assert_eq!(options.label_policy, LabelPolicy::Permissive);

        let options = options.with_label_policy(LabelPolicy::Strict);
        assert_eq!(options.label_policy, LabelPolicy::Strict);
    }
}
