//! Typography helper classes for the scoped stylesheet.

use std::collections::BTreeMap;

use super::CssBlock;
use crate::codec::{var_name_to_path, var_ref};
use crate::reference::aliases::camel_to_kebab;

/// Class name prefix of the helper classes.
pub const TYPOGRAPHY_CLASS_PREFIX: &str = ".recursica-typography-";

/// Builds one class per typography style from the root variables.
///
/// A root variable contributes when its path is exactly
/// `brand.typography.<style>.<property>`; the class declares the property
/// under its kebab-case CSS name.
pub(crate) fn helper_classes(root: &BTreeMap<String, String>) -> Vec<CssBlock> {
    let mut styles: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for name in root.keys() {
        let Some(path) = var_name_to_path(name) else {
            continue;
        };
        let segments: Vec<&str> = path.split('.').collect();
        let [brand, typography, style, property] = segments.as_slice() else {
            continue;
        };
        if *brand != "brand" || *typography != "typography" {
            continue;
        }
        styles
            .entry(style.to_string())
            .or_default()
            .entry(camel_to_kebab(property))
            .or_insert_with(|| var_ref(name));
    }
    styles
        .into_iter()
        .map(|(style, properties)| CssBlock::new(format!("{}{}", TYPOGRAPHY_CLASS_PREFIX, style), properties))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::path_to_var_name;
    use crate::emit::render;

    #[test]
    fn test_helper_classes() {
        let root: BTreeMap<String, String> = [
            "brand.typography.body.fontSize",
            "brand.typography.body.font-family",
            "brand.typography.caption.line-height",
            "brand.typography.body.nested.deep",
            "brand.dimensions.general.sm",
        ]
        .iter()
        .map(|p| (path_to_var_name(p), "x".to_string()))
        .collect();

        let css = render(&helper_classes(&root));
        assert_eq!(
            css,
            ".recursica-typography-body {\n\
             \x20 font-family: var(--recursica_brand_typography_body_font-family);\n\
             \x20 font-size: var(--recursica_brand_typography_body_fontSize);\n\
             }\n\
             \n\
             .recursica-typography-caption {\n\
             \x20 line-height: var(--recursica_brand_typography_caption_line-height);\n\
             }\n"
        );
    }
}
