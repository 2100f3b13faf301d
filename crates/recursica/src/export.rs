//! The complete export file set.

use serde_json::{Map, Value};
use tracing::debug;

use crate::emit::{CssEmitter, OutputFile, ScopedEmitter, SpecificEmitter};
use crate::error::{TransformError, ValidationError};
use crate::flatten::TokenSet;
use crate::input::{DocumentRoot, TransformInput};
use crate::options::TransformOptions;

/// Produces the three JSON documents and both stylesheets, in that order.
///
/// The documents are written back wrapped under their root key so they can be
/// read in again unchanged. Nothing is returned unless both stylesheets
/// succeed; otherwise the errors of both are reported together.
///
/// # Errors
///
/// [`TransformError::InvalidDocument`] for malformed documents,
/// [`TransformError::Validation`] when either stylesheet has problems, and
/// [`TransformError::Serialize`] if a document cannot be written out.
pub fn export(input: &TransformInput, options: TransformOptions) -> Result<Vec<OutputFile>, TransformError> {
    let tokens = TokenSet::from_input(input)?;
    let emitters: [&dyn CssEmitter; 2] = [&SpecificEmitter, &ScopedEmitter];

    let mut stylesheets = Vec::with_capacity(emitters.len());
    let mut failed = Vec::new();
    let mut errors: Vec<ValidationError> = Vec::new();
    for emitter in emitters {
        match emitter.emit(&tokens, options) {
            Ok(css) => stylesheets.push(OutputFile::new(emitter.file_name(), css)),
            Err(found) => {
                failed.push(emitter.file_name().to_string());
                for error in found {
                    if !errors.contains(&error) {
                        errors.push(error);
                    }
                }
            }
        }
    }
    if !errors.is_empty() {
        return Err(TransformError::Validation {
            outputs: failed,
            errors,
        });
    }

    let mut files = DocumentRoot::ALL
        .iter()
        .map(|&root| document_file(input, root))
        .collect::<Result<Vec<_>, _>>()?;
    files.extend(stylesheets);
    debug!(files = files.len(), entries = tokens.len(), "built export bundle");
    Ok(files)
}

fn document_file(input: &TransformInput, root: DocumentRoot) -> Result<OutputFile, TransformError> {
    let body = input.document(root)?.cloned().unwrap_or_default();
    let mut wrapped = Map::new();
    wrapped.insert(root.key().to_string(), Value::Object(body));
    let mut contents = serde_json::to_string_pretty(&Value::Object(wrapped))?;
    contents.push('\n');
    Ok(OutputFile::new(root.file_name(), contents))
}
