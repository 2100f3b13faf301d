//! Subcommand handlers.
//!
//! Handlers take resolved [`Settings`] and write to a caller-supplied sink, so
//! they can be driven from tests without touching stdout.

use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use recursica::{TokenSet, TransformError, TransformInput};
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::Variant;
use crate::config::Settings;

/// Reads the configured documents; a document without a path is empty.
pub fn read_input(settings: &Settings) -> Result<TransformInput> {
    Ok(TransformInput::new(
        read_document(settings.tokens.as_deref())?,
        read_document(settings.brand.as_deref())?,
        read_document(settings.ui_kit.as_deref())?,
    ))
}

fn read_document(path: Option<&Path>) -> Result<Value> {
    let Some(path) = path else {
        return Ok(Value::Null);
    };
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Writes the export file set into the output directory.
///
/// Every file is first written to a hidden staging file next to its target.
/// The staged files are renamed into place only once all of them were
/// written; if staging fails, the staged files are removed and no target is
/// touched.
pub fn export(settings: &Settings) -> Result<Vec<PathBuf>> {
    let input = read_input(settings)?;
    let files = recursica::export(&input, settings.options)?;
    fs::create_dir_all(&settings.out)
        .with_context(|| format!("failed to create {}", settings.out.display()))?;

    let mut staged = Vec::with_capacity(files.len());
    for file in &files {
        let target = settings.out.join(&file.filename);
        let staging = settings.out.join(staging_name(&file.filename));
        if let Err(err) = fs::write(&staging, &file.contents) {
            discard(&staged);
            return Err(err).with_context(|| format!("failed to write {}", staging.display()));
        }
        staged.push((staging, target));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (staging, target) in staged {
        fs::rename(&staging, &target)
            .with_context(|| format!("failed to move {} to {}", staging.display(), target.display()))?;
        info!(path = %target.display(), "wrote file");
        written.push(target);
    }
    Ok(written)
}

fn staging_name(filename: &str) -> String {
    format!(".{}.tmp", filename)
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (staging, _) in staged {
        if let Err(err) = fs::remove_file(staging) {
            warn!(path = %staging.display(), error = %err, "failed to remove staged file");
        }
    }
}

/// Writes one stylesheet to `out`.
pub fn css(settings: &Settings, variant: Variant, out: &mut impl Write) -> Result<()> {
    let input = read_input(settings)?;
    let files = match variant {
        Variant::Specific => recursica::transform_specific(&input, settings.options)?,
        Variant::Scoped => recursica::transform_scoped(&input, settings.options)?,
    };
    for file in files {
        out.write_all(file.contents.as_bytes())?;
    }
    Ok(())
}

/// Writes `file` to `out` with internal variable names replaced by exported ones.
pub fn rename_vars(settings: &Settings, file: &Path, out: &mut impl Write) -> Result<()> {
    let input = read_input(settings)?;
    let names = TokenSet::from_input(&input)?.export_names();
    let css = fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    info!(known = names.len(), "renaming internal variable names");
    out.write_all(names.rename_css(&css).as_bytes())?;
    Ok(())
}

/// Formats an error for the terminal, grouping validation errors by source file.
pub fn describe_error(err: &anyhow::Error) -> String {
    let Some(transform) = err.downcast_ref::<TransformError>() else {
        return format!("error: {:#}", err);
    };
    let TransformError::Validation { outputs, errors } = transform else {
        return format!("error: {}", transform);
    };

    let mut message = format!(
        "error: {} validation error(s) in {}",
        errors.len(),
        outputs.join(", ")
    );
    for (file, errors) in transform.grouped_by_file() {
        let _ = write!(message, "\n{}:", file);
        for error in errors {
            let _ = write!(message, "\n  {}", error);
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use recursica::{ValidationError, ValidationErrorKind};

    use super::*;

    #[test]
    fn test_describe_validation_error() {
        let kind = ValidationErrorKind::UnsupportedValue {
            value: "true".into(),
        };
        let err = anyhow::Error::new(TransformError::Validation {
            outputs: vec!["recursica_variables_scoped.css".into()],
            errors: vec![
                ValidationError::new("ui-kit.button.flag", kind.clone()),
                ValidationError::new("brand.themes.light.flag", kind.clone()),
                ValidationError::new("brand.typography.flag", kind),
            ],
        });
        assert_eq!(
            describe_error(&err),
            "error: 3 validation error(s) in recursica_variables_scoped.css\n\
             recursica_brand.json:\n\
             \x20 brand.themes.light.flag: unsupported value true\n\
             \x20 brand.typography.flag: unsupported value true\n\
             recursica_ui-kit.json:\n\
             \x20 ui-kit.button.flag: unsupported value true"
        );
    }

    #[test]
    fn test_describe_other_error() {
        let err = anyhow::anyhow!("disk full").context("failed to write out/a.css");
        assert_eq!(describe_error(&err), "error: failed to write out/a.css: disk full");
    }

    #[test]
    fn test_missing_paths_read_as_empty() {
        let settings = Settings {
            tokens: None,
            brand: None,
            ui_kit: None,
            out: PathBuf::from("."),
            options: Default::default(),
        };
        assert_eq!(read_input(&settings).unwrap(), TransformInput::default());
    }
}
