//! Flattening of the three input documents into path/value entries.
//!
//! The walk follows the token file conventions:
//!
//! - `$value` wraps the real value. When that value is a plain object (not a
//!   `{value, unit}` dimension) its children are walked, which is how
//!   composite tokens such as typography styles bundle several properties.
//! - `{value, unit}` objects and primitives are leaves.
//! - Any other object is walked key by key, skipping `$`-prefixed metadata.
//!
//! Two kinds of entries are then derived from the walked ones: elevation
//! `box-shadow` composites and the dark theme's interactive tone aliases.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::codec::{path_to_var_name, var_ref, ExportNames};
use crate::error::TransformError;
use crate::input::{DocumentRoot, TransformInput};
use crate::reference::Resolver;
use crate::scope::{Theme, LAYERS};
use crate::value::{is_dimension, TokenValue};

/// Every flattened entry of one transform input, ordered by path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSet {
    entries: BTreeMap<String, TokenValue>,
    var_names: BTreeSet<String>,
}

impl TokenSet {
    /// Flattens the input documents and adds the derived entries.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidDocument`] if a document is not a JSON object.
    pub fn from_input(input: &TransformInput) -> Result<Self, TransformError> {
        let mut entries = BTreeMap::new();
        for root in DocumentRoot::ALL {
            if let Some(document) = input.document(root)? {
                walk_children(document, root.key(), &mut entries);
            }
        }
        let walked = entries.len();

        let brand = input.document(DocumentRoot::Brand)?;
        let elevations = synthesize_elevations(brand, &mut entries);
        let aliases = synthesize_interactive_aliases(&mut entries);
        debug!(walked, elevations, aliases, "flattened token documents");

        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: BTreeMap<String, TokenValue>) -> Self {
        let var_names = entries.keys().map(|path| path_to_var_name(path)).collect();
        Self { entries, var_names }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenValue)> {
        self.entries.iter().map(|(path, value)| (path.as_str(), value))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, path: &str) -> Option<&TokenValue> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Exported variable names of every entry.
    pub fn var_names(&self) -> &BTreeSet<String> {
        &self.var_names
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.var_names)
    }

    /// Internal-to-exported name mapping for every entry.
    pub fn export_names(&self) -> ExportNames {
        ExportNames::from_paths(self.paths())
    }

    /// Paths whose variable name was already taken by an earlier path, as
    /// `(earlier, later)` in path order.
    ///
    /// Only segments starting with `_` can collide: `a._b` and `a_.b` both
    /// encode to `a___b`.
    pub fn name_collisions(&self) -> Vec<(&str, &str)> {
        let mut seen: HashMap<String, &str> = HashMap::with_capacity(self.entries.len());
        let mut collisions = Vec::new();
        for path in self.paths() {
            match seen.entry(path_to_var_name(path)) {
                Entry::Vacant(slot) => {
                    slot.insert(path);
                }
                Entry::Occupied(slot) => collisions.push((*slot.get(), path)),
            }
        }
        collisions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn walk(node: &Value, path: String, out: &mut BTreeMap<String, TokenValue>) {
    let Value::Object(map) = node else {
        out.insert(path, TokenValue::parse(node));
        return;
    };
    match map.get("$value") {
        Some(Value::Object(inner)) if !is_dimension(inner) => walk_children(inner, &path, out),
        Some(inner) => {
            out.insert(path, TokenValue::parse(inner));
        }
        None if is_dimension(map) => {
            out.insert(path, TokenValue::parse(node));
        }
        None => walk_children(map, &path, out),
    }
}

fn walk_children(map: &Map<String, Value>, prefix: &str, out: &mut BTreeMap<String, TokenValue>) {
    for (key, child) in map {
        if key.starts_with('$') {
            continue;
        }
        walk(child, format!("{}.{}", prefix, key), out);
    }
}

const SHADOW_PARTS: &[&[&str]] = &[&["x-direction", "x"], &["y-direction", "y"], &["blur"]];
const OPTIONAL_SHADOW_PARTS: &[&str] = &["spread", "color"];

fn synthesize_elevations(brand: Option<&Map<String, Value>>, entries: &mut BTreeMap<String, TokenValue>) -> usize {
    let Some(themes) = brand.and_then(|b| b.get("themes")).and_then(Value::as_object) else {
        return 0;
    };
    let mut added = 0;
    for theme in Theme::ALL {
        let Some(elevations) = themes
            .get(theme.as_str())
            .and_then(|t| t.get("elevations"))
            .and_then(Value::as_object)
        else {
            continue;
        };
        for (name, node) in elevations {
            if !node.get("$value").is_some_and(Value::is_object) {
                continue;
            }
            let base = format!("brand.themes.{}.elevations.{}", theme, name);
            let target = format!("{}.box-shadow", base);
            if entries.contains_key(&target) {
                continue;
            }
            if let Some(shadow) = compose_shadow(&base, entries) {
                entries.insert(target, shadow);
                added += 1;
            }
        }
    }
    added
}

fn compose_shadow(base: &str, entries: &BTreeMap<String, TokenValue>) -> Option<TokenValue> {
    let part = |names: &[&str]| {
        names
            .iter()
            .map(|name| format!("{}.{}", base, name))
            .find(|path| entries.get(path).is_some_and(|v| *v != TokenValue::Null))
    };
    let mut parts = Vec::with_capacity(5);
    for names in SHADOW_PARTS {
        parts.push(part(*names)?);
    }
    parts.extend(OPTIONAL_SHADOW_PARTS.iter().filter_map(|&name| part(&[name])));
    let shadow = parts
        .iter()
        .map(|path| var_ref(&path_to_var_name(path)))
        .collect::<Vec<_>>()
        .join(" ");
    Some(TokenValue::Composed(shadow))
}

const ON_TONE_FALLBACK: &str = "brand.palettes.palette-1.default.color.on-tone";
const ON_TONE_HOVER_FALLBACK: &str = "brand.palettes.palette-1.600.color.on-tone";

/// `(raw, tone alias, on-tone alias, on-tone fallback)` per interactive state.
const INTERACTIVE_STATES: &[(&str, &str, &str, &str)] = &[
    ("color", "tone", "on-tone", ON_TONE_FALLBACK),
    ("hover-color", "tone-hover", "on-tone-hover", ON_TONE_HOVER_FALLBACK),
];

static PALETTE_LEVEL_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(brand(?:\.themes\.[^.]+)?\.palettes\.[^.]+\.[^.]+)(?:\.color)?(?:\.tone)?$")
        .expect("palette level reference pattern")
});

/// The `on-tone` of the palette level a raw interactive color points at.
fn on_tone_of(reference: &str) -> Option<String> {
    let caps = PALETTE_LEVEL_REF.captures(reference)?;
    Some(format!("{}.color.on-tone", &caps[1]))
}

fn synthesize_interactive_aliases(entries: &mut BTreeMap<String, TokenValue>) -> usize {
    let known: BTreeSet<String> = entries.keys().map(|path| path_to_var_name(path)).collect();
    let resolver = Resolver::new(&known);
    let theme = Some(Theme::Dark);

    let mut additions = Vec::new();
    for layer in LAYERS {
        let base = format!("brand.themes.dark.layers.layer-{}.elements.interactive", layer);
        for &(raw, tone, on_tone, fallback) in INTERACTIVE_STATES {
            let raw_path = format!("{}.{}", base, raw);
            let Some(raw_value) = entries.get(&raw_path) else {
                continue;
            };

            let tone_path = format!("{}.{}", base, tone);
            if !entries.contains_key(&tone_path) {
                additions.push((tone_path, TokenValue::Reference(raw_path.clone())));
            }

            let on_tone_path = format!("{}.{}", base, on_tone);
            if entries.contains_key(&on_tone_path) {
                continue;
            }
            let target = raw_value
                .reference()
                .and_then(on_tone_of)
                .and_then(|reference| resolver.lookup(&reference, theme))
                .or_else(|| resolver.lookup(fallback, theme));
            match target {
                Some(target) => additions.push((on_tone_path, TokenValue::Reference(target))),
                None => debug!(path = on_tone_path.as_str(), "no on-tone target for interactive alias"),
            }
        }
    }

    let added = additions.len();
    entries.extend(additions);
    added
}
