//! Scope classification of token paths.
//!
//! Every flattened path belongs to exactly one [`Scope`], decided purely from
//! its prefix:
//!
//! | Path | Scope |
//! |------|-------|
//! | `tokens.*`, `brand.typography.*`, `brand.dimensions.*`, `ui-kit.*` | [`Scope::Root`] |
//! | `brand.themes.<theme>.layers.layer-<n>.*` | [`Scope::ThemeLayer`] |
//! | `brand.themes.<theme>.*` (anything else) | [`Scope::Theme`] |
//!
//! Layer-specific ui-kit paths (`ui-kit.…layer-<n>…`) are still root-scoped
//! JSON, but the emitters fan them out across every theme and layer; see
//! [`uikit_layer`] and [`canonical_uikit_path`].

use std::fmt;

/// The two themes every brand defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surface elevation layers.
pub const LAYERS: [u8; 4] = [0, 1, 2, 3];

/// Where a variable is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    Root,
    Theme(Theme),
    ThemeLayer(Theme, u8),
}

/// Classifies a path into its scope.
pub fn classify(path: &str) -> Scope {
    let mut segments = path.split('.');
    if segments.next() != Some("brand") || segments.next() != Some("themes") {
        return Scope::Root;
    }
    let Some(theme) = segments.next().and_then(Theme::from_name) else {
        return Scope::Root;
    };
    let layers = segments.next();
    match (layers, segments.next().and_then(parse_layer)) {
        (Some("layers"), Some(layer)) => Scope::ThemeLayer(theme, layer),
        _ => Scope::Theme(theme),
    }
}

/// Returns the theme named by a `brand.themes.<theme>.` prefix.
pub fn path_theme(path: &str) -> Option<Theme> {
    let rest = path.strip_prefix("brand.themes.")?;
    let (name, _) = rest.split_once('.')?;
    Theme::from_name(name)
}

/// Parses a `layer-<n>` segment with `n` in `0..=3`.
pub fn parse_layer(segment: &str) -> Option<u8> {
    let n: u8 = segment.strip_prefix("layer-")?.parse().ok()?;
    LAYERS.contains(&n).then_some(n)
}

/// Returns the layer of a layer-specific ui-kit path.
///
/// ```rust
/// use recursica::scope::uikit_layer;
///
/// assert_eq!(uikit_layer("ui-kit.button.layer-2.color"), Some(2));
/// assert_eq!(uikit_layer("ui-kit.button.color"), None);
/// assert_eq!(uikit_layer("brand.themes.light.layers.layer-2.x"), None);
/// ```
pub fn uikit_layer(path: &str) -> Option<u8> {
    path.strip_prefix("ui-kit.")?.split('.').find_map(parse_layer)
}

/// Strips the `layer-<n>` segment from a layer-specific ui-kit path.
///
/// Paths without a layer segment are returned unchanged.
pub fn canonical_uikit_path(path: &str) -> String {
    let mut removed = false;
    path.split('.')
        .filter(|segment| {
            if !removed && parse_layer(segment).is_some() {
                removed = true;
                false
            } else {
                true
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_root() {
        assert_eq!(classify("tokens.colors.gray.100"), Scope::Root);
        assert_eq!(classify("brand.typography.body.font-size"), Scope::Root);
        assert_eq!(classify("brand.dimensions.general.md"), Scope::Root);
        assert_eq!(classify("ui-kit.button.layer-1.color"), Scope::Root);
        assert_eq!(classify("brand.themes.sepia.palettes.x"), Scope::Root);
    }

    #[test]
    fn test_classify_theme() {
        assert_eq!(
            classify("brand.themes.dark.palettes.neutral.100.color.tone"),
            Scope::Theme(Theme::Dark)
        );
        assert_eq!(
            classify("brand.themes.light.layers.surface"),
            Scope::Theme(Theme::Light)
        );
    }

    #[test]
    fn test_classify_theme_layer() {
        assert_eq!(
            classify("brand.themes.light.layers.layer-3.property.surface"),
            Scope::ThemeLayer(Theme::Light, 3)
        );
        assert_eq!(
            classify("brand.themes.light.layers.layer-7.property.surface"),
            Scope::Theme(Theme::Light)
        );
    }

    #[test]
    fn test_path_theme() {
        assert_eq!(path_theme("brand.themes.dark.states.hover"), Some(Theme::Dark));
        assert_eq!(path_theme("brand.themes.dark"), None);
        assert_eq!(path_theme("ui-kit.button"), None);
    }

    #[test]
    fn test_canonical_uikit_path() {
        assert_eq!(
            canonical_uikit_path("ui-kit.button.layer-1.color"),
            "ui-kit.button.color"
        );
        assert_eq!(canonical_uikit_path("ui-kit.button.color"), "ui-kit.button.color");
        assert_eq!(
            canonical_uikit_path("ui-kit.card.layer-0.layer-1"),
            "ui-kit.card.layer-1"
        );
    }
}
