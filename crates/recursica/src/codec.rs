//! Conversion between token paths and CSS custom-property names.
//!
//! Token paths are dot-joined JSON keys (`brand.themes.light.palettes.neutral.100`).
//! Two naming schemes sit on top of them:
//!
//! - **Exported** names (`--recursica_brand_themes_light_palettes_neutral_100`):
//!   segments joined with `_`, literal underscores inside a segment escaped as `__`.
//!   This is what the transforms emit, and it can be parsed back into a path.
//! - **Internal** names (`--recursica-brand-themes-light-palettes-neutral-100`):
//!   segments joined with `-`, as used by the editor at runtime. Segments contain
//!   hyphens themselves, so an internal name cannot be parsed on its own;
//!   [`ExportNames`] maps it to the exported form using a known set of paths.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Prefix of every exported custom-property name.
pub const VAR_PREFIX: &str = "--recursica_";

/// Prefix of every internal (editor runtime) custom-property name.
pub const INTERNAL_VAR_PREFIX: &str = "--recursica-";

/// Converts a dot-joined path into its exported custom-property name.
///
/// An empty path yields the bare prefix.
///
/// # Example
///
/// ```rust
/// use recursica::codec::path_to_var_name;
///
/// assert_eq!(
///     path_to_var_name("tokens.colors.scale-02.500"),
///     "--recursica_tokens_colors_scale-02_500"
/// );
/// assert_eq!(path_to_var_name("tokens.font_stack"), "--recursica_tokens_font__stack");
/// ```
pub fn path_to_var_name(path: &str) -> String {
    let mut name = String::with_capacity(VAR_PREFIX.len() + path.len() + 4);
    name.push_str(VAR_PREFIX);
    if path.is_empty() {
        return name;
    }
    for (i, segment) in path.split('.').enumerate() {
        if i > 0 {
            name.push('_');
        }
        for c in segment.chars() {
            if c == '_' {
                name.push_str("__");
            } else {
                name.push(c);
            }
        }
    }
    name
}

/// Parses an exported custom-property name back into its path.
///
/// `__` is read greedily as a literal underscore, a single `_` as the segment
/// separator. Returns `None` if the name does not carry [`VAR_PREFIX`].
///
/// Paths whose segments start with `_` or are empty cannot be recovered
/// exactly; every other path round-trips.
pub fn var_name_to_path(name: &str) -> Option<String> {
    let body = name.strip_prefix(VAR_PREFIX)?;
    let mut path = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '_' {
            path.push(c);
        } else if chars.peek() == Some(&'_') {
            chars.next();
            path.push('_');
        } else {
            path.push('.');
        }
    }
    Some(path)
}

/// Converts a path into the editor's internal custom-property name.
pub fn path_to_internal_name(path: &str) -> String {
    format!("{}{}", INTERNAL_VAR_PREFIX, path.replace('.', "-"))
}

/// Wraps a custom-property name in `var(...)`.
pub fn var_ref(name: &str) -> String {
    format!("var({})", name)
}

static INTERNAL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--recursica-[A-Za-z0-9_-]+").expect("internal name pattern"));

/// Mapping from internal names to exported names for a known set of paths.
///
/// # Example
///
/// ```rust
/// use recursica::codec::ExportNames;
///
/// let names = ExportNames::from_paths(["tokens.colors.scale-02.500"]);
/// assert_eq!(
///     names.rename_css("color: var(--recursica-tokens-colors-scale-02-500);"),
///     "color: var(--recursica_tokens_colors_scale-02_500);"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExportNames {
    names: HashMap<String, String>,
}

impl ExportNames {
    /// Builds the mapping from paths.
    ///
    /// When two paths produce the same internal name, the first in sorted
    /// order wins.
    pub fn from_paths<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sorted: Vec<&str> = paths.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut names = HashMap::with_capacity(sorted.len());
        for path in sorted {
            match names.entry(path_to_internal_name(path)) {
                Entry::Vacant(slot) => {
                    slot.insert(path_to_var_name(path));
                }
                Entry::Occupied(slot) => {
                    tracing::warn!(
                        internal = slot.key().as_str(),
                        kept = slot.get().as_str(),
                        path,
                        "internal variable name is ambiguous"
                    );
                }
            }
        }
        Self { names }
    }

    /// Returns the exported name for an internal name.
    pub fn exported(&self, internal: &str) -> Option<&str> {
        self.names.get(internal).map(String::as_str)
    }

    /// Rewrites every known internal name in `css` to its exported name.
    ///
    /// Unknown `--recursica-*` names are left untouched.
    pub fn rename_css(&self, css: &str) -> String {
        INTERNAL_NAME
            .replace_all(css, |caps: &Captures| match self.names.get(&caps[0]) {
                Some(exported) => exported.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
