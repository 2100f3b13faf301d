//! Design-token to CSS custom-property transforms for Recursica themes.
//!
//! Three JSON documents describe a theme:
//!
//! - `tokens`: primitive values (colors, sizes, opacities, font metrics)
//! - `brand`: light and dark themes, their palettes and surface layers 0 to 3,
//!   plus theme-independent typography and dimensions
//! - `ui-kit`: component declarations, some of them per layer
//!
//! Values may reference each other with `{path.to.value}`. The transforms
//! flatten the documents, resolve every reference and write CSS custom
//! properties in one of two layouts:
//!
//! - [`transform_specific`]: one `:root` block of fully-qualified names
//! - [`transform_scoped`]: physical values in `:root`, with short generic
//!   names aliased per `[data-recursica-theme]` / `[data-recursica-layer]`
//!
//! [`export`] produces the whole downloadable file set.
//!
//! Problems are never reported one at a time. A failing transform returns
//! [`TransformError::Validation`] listing every problem it found, each with
//! the JSON path it was found at.
//!
//! # Example
//!
//! ```rust
//! use recursica::{transform_specific, TransformInput, TransformOptions};
//! use serde_json::json;
//!
//! let input = TransformInput::new(
//!     json!({ "colors": { "scale-02": { "500": "#ffffff" } } }),
//!     json!({}),
//!     json!({}),
//! );
//! let files = transform_specific(&input, TransformOptions::default())?;
//! assert_eq!(files[0].filename, "recursica_variables_specific.css");
//! assert!(files[0]
//!     .contents
//!     .contains("--recursica_tokens_colors_scale-02_500: #ffffff;"));
//! # Ok::<(), recursica::TransformError>(())
//! ```

pub mod codec;
pub mod emit;
pub mod error;
pub mod export;
pub mod flatten;
pub mod format;
pub mod input;
pub mod options;
pub mod reference;
pub mod scope;
pub mod value;

pub use codec::{path_to_var_name, var_name_to_path, ExportNames};
pub use emit::{transform, CssEmitter, OutputFile, ScopedEmitter, SpecificEmitter};
pub use error::{TransformError, ValidationError, ValidationErrorKind};
pub use export::export;
pub use flatten::TokenSet;
pub use input::{DocumentRoot, TransformInput};
pub use options::TransformOptions;
pub use scope::{Scope, Theme};
pub use value::TokenValue;

/// Renders the flat stylesheet.
///
/// # Errors
///
/// See [`transform`].
pub fn transform_specific(
    input: &TransformInput,
    options: TransformOptions,
) -> Result<Vec<OutputFile>, TransformError> {
    transform(&SpecificEmitter, input, options)
}

/// Renders the theme- and layer-scoped stylesheet.
///
/// # Errors
///
/// See [`transform`].
pub fn transform_scoped(
    input: &TransformInput,
    options: TransformOptions,
) -> Result<Vec<OutputFile>, TransformError> {
    transform(&ScopedEmitter, input, options)
}
