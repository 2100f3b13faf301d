//! CSS emitters.
//!
//! Both stylesheets are produced from the same [`TokenSet`]. An emitter owns
//! only the layout decisions (which selector a variable goes under and what
//! it is called); resolution and formatting are shared through
//! [`Formatter`](crate::format::Formatter).

mod scoped;
mod specific;
mod typography;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::codec::path_to_var_name;
use crate::error::{Diagnostics, TransformError, ValidationError, ValidationErrorKind};
use crate::flatten::TokenSet;
use crate::input::TransformInput;
use crate::options::TransformOptions;

pub use scoped::{layer_selector, theme_selector, uikit_root_path, ScopedEmitter, SCOPED_FILE_NAME};
pub use specific::{SpecificEmitter, SPECIFIC_FILE_NAME};

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub filename: String,
    pub contents: String,
}

impl OutputFile {
    pub fn new(filename: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }
}

/// A stylesheet layout.
pub trait CssEmitter {
    /// Name of the file this emitter produces.
    fn file_name(&self) -> &'static str;

    /// Renders the stylesheet, or returns every problem found on the way.
    fn emit(&self, tokens: &TokenSet, options: TransformOptions) -> Result<String, Vec<ValidationError>>;
}

/// Flattens `input` and runs one emitter over it.
///
/// # Errors
///
/// [`TransformError::InvalidDocument`] for malformed documents, and
/// [`TransformError::Validation`] carrying every collected problem otherwise.
pub fn transform<E: CssEmitter + ?Sized>(
    emitter: &E,
    input: &TransformInput,
    options: TransformOptions,
) -> Result<Vec<OutputFile>, TransformError> {
    let tokens = TokenSet::from_input(input)?;
    let css = emitter.emit(&tokens, options).map_err(|errors| TransformError::Validation {
        outputs: vec![emitter.file_name().to_string()],
        errors,
    })?;
    Ok(vec![OutputFile::new(emitter.file_name(), css)])
}

/// Reports every pair of paths that would be declared under one name.
pub(crate) fn report_name_collisions(tokens: &TokenSet, diagnostics: &mut Diagnostics) {
    for (earlier, later) in tokens.name_collisions() {
        diagnostics.push(
            later,
            ValidationErrorKind::DuplicateVarName {
                name: path_to_var_name(later),
                other: earlier.to_string(),
            },
        );
    }
}

/// One selector and its custom-property declarations, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CssBlock {
    selector: String,
    declarations: BTreeMap<String, String>,
}

impl CssBlock {
    pub(crate) fn new(selector: impl Into<String>, declarations: BTreeMap<String, String>) -> Self {
        Self {
            selector: selector.into(),
            declarations,
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&self.selector);
        out.push_str(" {\n");
        for (name, value) in &self.declarations {
            out.push_str("  ");
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(";\n");
        }
        out.push_str("}\n");
    }
}

/// Joins blocks with a blank line between them.
pub(crate) fn render(blocks: &[CssBlock]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        block.write_to(&mut out);
    }
    out
}
