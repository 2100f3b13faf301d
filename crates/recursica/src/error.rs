//! Validation and transform errors.
//!
//! A transform never stops at the first problem. Every issue found while
//! walking the documents is pushed into a [`Diagnostics`] collector, and the
//! whole list is returned at once as [`TransformError::Validation`] so a theme
//! author can fix a broken JSON file in a single pass.

use std::collections::BTreeMap;

use crate::input::DocumentRoot;

/// The specific problem behind a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationErrorKind {
    /// A `{...}` reference whose target does not exist after expansion and alias search.
    #[error("reference '{{{reference}}}' does not resolve; no variable named '{target}'")]
    UnresolvedReference { reference: String, target: String },

    /// A number that is `NaN` or infinite.
    #[error("invalid numeric value '{value}'")]
    InvalidNumber { value: f64 },

    /// A JSON value the formatter has no rule for.
    #[error("unsupported value {value}")]
    UnsupportedValue { value: String },

    /// A layer-specific ui-kit variable that is not defined for every layer.
    #[error(
        "layer-specific value defined for layer(s) {} but missing layer(s) {}",
        join_layers(.defined),
        join_layers(.missing)
    )]
    IncompleteLayerCoverage { defined: Vec<u8>, missing: Vec<u8> },

    /// Two JSON paths that encode to the same custom-property name.
    #[error("variable name '{name}' is also produced by '{other}'")]
    DuplicateVarName { name: String, other: String },

    /// A known-bad reference that was rewritten; only reported with strict references.
    #[error("reference '{{{from}}}' is a known-invalid shape; use '{{{to}}}'")]
    CorrectedReference { from: String, to: String },
}

fn join_layers(layers: &[u8]) -> String {
    layers
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One problem found at a JSON path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{path}: {kind}")]
pub struct ValidationError {
    /// Dot-joined JSON path the problem was found at.
    pub path: String,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Returns the export file name of the document this path belongs to.
    pub fn source_file(&self) -> &'static str {
        let root = self.path.split('.').next().unwrap_or_default();
        DocumentRoot::from_key(root)
            .map(DocumentRoot::file_name)
            .unwrap_or("unknown")
    }
}

/// Error returned by a transform.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// One or more validation errors were collected during the pass.
    #[error(
        "{} validation error(s) in {}:{}",
        .errors.len(),
        .outputs.join(", "),
        list_errors(.errors)
    )]
    Validation {
        /// Output file(s) whose generation failed.
        outputs: Vec<String>,
        errors: Vec<ValidationError>,
    },

    /// An input document is present but is not a JSON object.
    #[error("document '{document}' is invalid: {reason}")]
    InvalidDocument { document: String, reason: String },

    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn list_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| format!("\n  {}", e)).collect()
}

impl TransformError {
    /// Returns the collected validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            TransformError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Groups validation errors by the source document file they belong to.
    pub fn grouped_by_file(&self) -> BTreeMap<&'static str, Vec<&ValidationError>> {
        let mut groups: BTreeMap<&'static str, Vec<&ValidationError>> = BTreeMap::new();
        for error in self.validation_errors() {
            groups.entry(error.source_file()).or_default().push(error);
        }
        groups
    }
}

/// Collects validation errors over a whole pass.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<ValidationError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a problem. An identical error already recorded is not repeated.
    pub fn push(&mut self, path: &str, kind: ValidationErrorKind) {
        let error = ValidationError::new(path, kind);
        if !self.errors.contains(&error) {
            self.errors.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `output` if nothing was collected, otherwise every collected error.
    pub fn finish<T>(self, output: T) -> Result<T, Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(output)
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_reference_display() {
        let err = ValidationError::new(
            "brand.themes.light.layers.layer-0.property.surface",
            ValidationErrorKind::UnresolvedReference {
                reference: "brand.palettes.missing.100".into(),
                target: "--recursica_brand_themes_light_palettes_missing_100".into(),
            },
        );
        let msg = err.to_string();
        assert!(msg.starts_with("brand.themes.light.layers.layer-0.property.surface: "));
        assert!(msg.contains("'{brand.palettes.missing.100}'"));
        assert!(msg.contains("--recursica_brand_themes_light_palettes_missing_100"));
    }

    #[test]
    fn test_layer_coverage_display() {
        let kind = ValidationErrorKind::IncompleteLayerCoverage {
            defined: vec![0, 1],
            missing: vec![2, 3],
        };
        assert_eq!(
            kind.to_string(),
            "layer-specific value defined for layer(s) 0, 1 but missing layer(s) 2, 3"
        );
    }

    #[test]
    fn test_duplicate_var_name_display() {
        let err = ValidationError::new(
            "tokens.a_.b",
            ValidationErrorKind::DuplicateVarName {
                name: "--recursica_tokens_a___b".into(),
                other: "tokens.a._b".into(),
            },
        );
        assert_eq!(
            err.to_string(),
            "tokens.a_.b: variable name '--recursica_tokens_a___b' is also produced by 'tokens.a._b'"
        );
    }

    #[test]
    fn test_source_file() {
        let kind = ValidationErrorKind::InvalidNumber { value: f64::NAN };
        assert_eq!(
            ValidationError::new("tokens.sizes.x", kind.clone()).source_file(),
            "recursica_tokens.json"
        );
        assert_eq!(
            ValidationError::new("ui-kit.button.color", kind.clone()).source_file(),
            "recursica_ui-kit.json"
        );
        assert_eq!(
            ValidationError::new("elsewhere", kind).source_file(),
            "unknown"
        );
    }

    #[test]
    fn test_transform_error_lists_every_error() {
        let err = TransformError::Validation {
            outputs: vec!["recursica_variables_specific.css".into()],
            errors: vec![
                ValidationError::new(
                    "tokens.a",
                    ValidationErrorKind::UnsupportedValue {
                        value: "true".into(),
                    },
                ),
                ValidationError::new(
                    "brand.b",
                    ValidationErrorKind::UnsupportedValue {
                        value: "false".into(),
                    },
                ),
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("2 validation error(s) in recursica_variables_specific.css:"));
        assert!(msg.contains("\n  tokens.a: unsupported value true"));
        assert!(msg.contains("\n  brand.b: unsupported value false"));

        let groups = err.grouped_by_file();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["recursica_tokens.json"].len(), 1);
    }

    #[test]
    fn test_diagnostics_finish() {
        let diagnostics = Diagnostics::new();
        assert_eq!(diagnostics.finish("css"), Ok("css"));

        let mut diagnostics = Diagnostics::new();
        diagnostics.push(
            "tokens.x",
            ValidationErrorKind::InvalidNumber {
                value: f64::INFINITY,
            },
        );
        assert_eq!(diagnostics.len(), 1);
        let errors = diagnostics.finish("css").unwrap_err();
        assert_eq!(errors[0].path, "tokens.x");
    }
}
