//! The cascading stylesheet.
//!
//! `:root` holds one physical value per variable, under its fully-qualified
//! name. Layer-specific ui-kit values are fanned out across every theme and
//! layer, so their root names encode both (`ui-kit.<theme>.layer-<n>.<rest>`).
//!
//! Theme and theme+layer blocks then alias short generic names onto those root
//! values, letting components reference `--recursica_brand_palettes_…` and
//! pick up whichever theme and layer the surrounding markup selects:
//!
//! ```css
//! [data-recursica-theme="dark"][data-recursica-layer="1"],
//! [data-recursica-theme="dark"] [data-recursica-layer="1"] { … }
//! ```
//!
//! A theme block without a layer behaves as layer 0.

use std::collections::BTreeMap;

use tracing::debug;

use super::typography::helper_classes;
use super::{render, report_name_collisions, CssBlock, CssEmitter};
use crate::codec::{path_to_var_name, var_ref};
use crate::error::{Diagnostics, ValidationError, ValidationErrorKind};
use crate::flatten::TokenSet;
use crate::format::{Formatter, VarNaming};
use crate::options::TransformOptions;
use crate::reference::Context;
use crate::scope::{canonical_uikit_path, classify, uikit_layer, Scope, Theme, LAYERS};
use crate::value::{Amount, TokenValue};

pub const SCOPED_FILE_NAME: &str = "recursica_variables_scoped.css";

#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedEmitter;

/// Root path of a layer-specific ui-kit value for one theme and layer.
///
/// ```rust
/// use recursica::emit::uikit_root_path;
/// use recursica::scope::Theme;
///
/// assert_eq!(
///     uikit_root_path("ui-kit.button.color", Theme::Dark, 2),
///     "ui-kit.dark.layer-2.button.color"
/// );
/// ```
pub fn uikit_root_path(canonical: &str, theme: Theme, layer: u8) -> String {
    let rest = canonical.strip_prefix("ui-kit.").unwrap_or(canonical);
    format!("ui-kit.{}.layer-{}.{}", theme, layer, rest)
}

/// Names references the way `:root` stores them.
///
/// A reference to a layer-specific ui-kit path points at that layer's root
/// value for the theme being formatted, light when there is none.
struct ScopedNaming;

impl VarNaming for ScopedNaming {
    fn var_name(&self, path: &str, theme: Option<Theme>) -> String {
        match uikit_layer(path) {
            Some(layer) => path_to_var_name(&uikit_root_path(
                &canonical_uikit_path(path),
                theme.unwrap_or(Theme::Light),
                layer,
            )),
            None => path_to_var_name(path),
        }
    }
}

/// Layer-specific ui-kit entries by canonical path, then layer.
type LayeredEntries<'t> = BTreeMap<String, BTreeMap<u8, (&'t str, &'t TokenValue)>>;

impl CssEmitter for ScopedEmitter {
    fn file_name(&self) -> &'static str {
        SCOPED_FILE_NAME
    }

    fn emit(&self, tokens: &TokenSet, options: TransformOptions) -> Result<String, Vec<ValidationError>> {
        let formatter = Formatter::new(tokens.resolver(), &ScopedNaming, options);
        let mut diagnostics = Diagnostics::new();
        report_name_collisions(tokens, &mut diagnostics);

        // Pass 1: physical values.
        let mut root = BTreeMap::new();
        let mut layered: LayeredEntries<'_> = BTreeMap::new();
        for (path, value) in tokens.iter() {
            if let Some(layer) = uikit_layer(path) {
                layered
                    .entry(canonical_uikit_path(path))
                    .or_default()
                    .entry(layer)
                    .or_insert((path, value));
            } else if let Some(css) = formatter.format(value, Context::new(path), &mut diagnostics) {
                root.insert(path_to_var_name(path), css);
            }
        }

        for (canonical, layers) in &layered {
            let missing: Vec<u8> = LAYERS.iter().copied().filter(|l| !layers.contains_key(l)).collect();
            if !missing.is_empty() {
                diagnostics.push(
                    canonical,
                    ValidationErrorKind::IncompleteLayerCoverage {
                        defined: layers.keys().copied().collect(),
                        missing,
                    },
                );
            }
            for theme in Theme::ALL {
                let sibling = layers
                    .values()
                    .map(|&(_, value)| value)
                    .find(|value| **value != TokenValue::Null)
                    .map(|value| resolve_leaf(tokens, value, theme));
                let fill = placeholder(canonical, sibling);
                for (&layer, &(path, value)) in layers {
                    let context = Context::with_theme(path, theme);
                    if let Some(css) = formatter.format(value, context, &mut diagnostics) {
                        root.insert(path_to_var_name(&uikit_root_path(canonical, theme, layer)), css);
                    }
                }
                for layer in LAYERS {
                    root.entry(path_to_var_name(&uikit_root_path(canonical, theme, layer)))
                        .or_insert_with(|| fill.to_string());
                }
            }
        }

        // Pass 2: generic aliases.
        let mut themes: BTreeMap<Theme, BTreeMap<String, String>> = BTreeMap::new();
        let mut theme_layers: BTreeMap<(Theme, u8), BTreeMap<String, String>> = BTreeMap::new();
        for path in tokens.paths() {
            let full = path_to_var_name(path);
            if !root.contains_key(&full) {
                continue;
            }
            let (block, generic) = match classify(path) {
                Scope::Root => continue,
                Scope::Theme(theme) => match generic_theme_path(path) {
                    Some(generic) => (themes.entry(theme).or_default(), generic),
                    None => continue,
                },
                Scope::ThemeLayer(theme, layer) => (
                    theme_layers.entry((theme, layer)).or_default(),
                    generic_layer_path(path),
                ),
            };
            block.insert(path_to_var_name(&generic), var_ref(&full));
        }
        for canonical in layered.keys() {
            for theme in Theme::ALL {
                for layer in LAYERS {
                    let root_name = path_to_var_name(&uikit_root_path(canonical, theme, layer));
                    if root.contains_key(&root_name) {
                        theme_layers
                            .entry((theme, layer))
                            .or_default()
                            .insert(path_to_var_name(canonical), var_ref(&root_name));
                    }
                }
            }
        }
        for theme in Theme::ALL {
            if let Some(layer_zero) = theme_layers.get(&(theme, 0)) {
                let block = themes.entry(theme).or_default();
                for (name, value) in layer_zero {
                    block.entry(name.clone()).or_insert_with(|| value.clone());
                }
            }
        }

        let typography = helper_classes(&root);
        let mut blocks = vec![CssBlock::new(":root", root)];
        blocks.extend(
            themes
                .into_iter()
                .map(|(theme, declarations)| CssBlock::new(theme_selector(theme), declarations)),
        );
        blocks.extend(
            theme_layers
                .into_iter()
                .map(|((theme, layer), declarations)| CssBlock::new(layer_selector(theme, layer), declarations)),
        );
        blocks.extend(typography);

        debug!(
            blocks = blocks.len(),
            layered = layered.len(),
            errors = diagnostics.len(),
            "emitted scoped stylesheet"
        );
        diagnostics.finish(render(&blocks))
    }
}

/// `brand.themes.<theme>.<rest>` → `brand.<rest>`.
fn generic_theme_path(path: &str) -> Option<String> {
    let rest = path.splitn(4, '.').nth(3)?;
    Some(format!("brand.{}", rest))
}

/// `brand.themes.<theme>.layers.layer-<n>.<rest>` → `brand.layer.<rest>`.
fn generic_layer_path(path: &str) -> String {
    match path.splitn(6, '.').nth(5) {
        Some(rest) => format!("brand.layer.{}", rest),
        None => "brand.layer".to_string(),
    }
}

pub fn theme_selector(theme: Theme) -> String {
    format!("[data-recursica-theme=\"{}\"]", theme)
}

pub fn layer_selector(theme: Theme, layer: u8) -> String {
    format!(
        "[data-recursica-theme=\"{theme}\"][data-recursica-layer=\"{layer}\"], \
         [data-recursica-theme=\"{theme}\"] [data-recursica-layer=\"{layer}\"]"
    )
}

/// Longest reference chain followed when shaping a placeholder.
const MAX_REFERENCE_DEPTH: usize = 16;

/// Follows references from `value` to the value they finally name.
///
/// Stops at the first reference that does not resolve and returns it.
fn resolve_leaf<'t>(tokens: &'t TokenSet, value: &'t TokenValue, theme: Theme) -> &'t TokenValue {
    let resolver = tokens.resolver();
    let mut current = value;
    let mut context = Some(theme);
    for _ in 0..MAX_REFERENCE_DEPTH {
        let Some(target) = current.reference().and_then(|r| resolver.lookup(r, context)) else {
            break;
        };
        let Some(next) = tokens.get(&target) else {
            break;
        };
        context = Context::new(&target).theme.or(Some(theme));
        current = next;
    }
    current
}

/// Stand-in for a (theme, layer) that ended up without a value, shaped after
/// the resolved value of a sibling layer.
fn placeholder(canonical: &str, sibling: Option<&TokenValue>) -> &'static str {
    if canonical.contains("elevation") {
        return "none";
    }
    match sibling {
        Some(TokenValue::Color(_)) => "transparent",
        Some(TokenValue::Dimension {
            amount: Amount::Number(_),
            ..
        })
        | Some(TokenValue::Number(_)) => "0",
        Some(TokenValue::Text(_)) => "\"\"",
        Some(TokenValue::Keyword(keyword)) => keyword_placeholder(keyword),
        Some(value) => match value.reference() {
            Some(target) => reference_placeholder(target),
            None => by_name(canonical),
        },
        None => by_name(canonical),
    }
}

/// The neutral keyword of the property family `keyword` belongs to.
fn keyword_placeholder(keyword: &str) -> &'static str {
    match keyword {
        "normal" | "italic" => "normal",
        _ => "none",
    }
}

fn reference_placeholder(target: &str) -> &'static str {
    if target.contains("color") || target.contains("tone") || target.contains("palettes") {
        "transparent"
    } else if target.contains("elevation") {
        "none"
    } else {
        "0"
    }
}

fn by_name(canonical: &str) -> &'static str {
    if canonical.contains("color") {
        "transparent"
    } else {
        "0"
    }
}
