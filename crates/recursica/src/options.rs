//! Transform configuration.

use serde::{Deserialize, Serialize};

/// Options shared by every emitter.
///
/// Deserializes from kebab-case keys so it can be embedded in a config file:
///
/// ```rust
/// use recursica::TransformOptions;
///
/// let options: TransformOptions =
///     serde_json::from_str(r#"{ "strict-references": true }"#).unwrap();
/// assert!(options.strict_references);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TransformOptions {
    /// Report known-invalid references as errors instead of silently correcting them.
    pub strict_references: bool,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_references(mut self, strict: bool) -> Self {
        self.strict_references = strict;
        self
    }
}
