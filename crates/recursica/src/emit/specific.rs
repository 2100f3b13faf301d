//! The flat stylesheet: one `:root` block of fully-qualified names.

use std::collections::BTreeMap;

use tracing::debug;

use super::{render, report_name_collisions, CssBlock, CssEmitter};
use crate::codec::path_to_var_name;
use crate::error::{Diagnostics, ValidationError};
use crate::flatten::TokenSet;
use crate::format::{Formatter, SpecificNaming};
use crate::options::TransformOptions;
use crate::reference::Context;

pub const SPECIFIC_FILE_NAME: &str = "recursica_variables_specific.css";

#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificEmitter;

impl CssEmitter for SpecificEmitter {
    fn file_name(&self) -> &'static str {
        SPECIFIC_FILE_NAME
    }

    fn emit(&self, tokens: &TokenSet, options: TransformOptions) -> Result<String, Vec<ValidationError>> {
        let formatter = Formatter::new(tokens.resolver(), &SpecificNaming, options);
        let mut diagnostics = Diagnostics::new();
        report_name_collisions(tokens, &mut diagnostics);
        let mut root = BTreeMap::new();
        for (path, value) in tokens.iter() {
            if let Some(css) = formatter.format(value, Context::new(path), &mut diagnostics) {
                root.insert(path_to_var_name(path), css);
            }
        }
        debug!(variables = root.len(), errors = diagnostics.len(), "emitted specific stylesheet");
        diagnostics.finish(render(&[CssBlock::new(":root", root)]))
    }
}
