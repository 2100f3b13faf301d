//! Reference resolution.
//!
//! A `{...}` reference found at some JSON path is turned into the path of an
//! existing variable in three steps:
//!
//! 1. The theme of the context path is inferred ([`Context::new`]).
//! 2. Theme-relative shorthand is expanded ([`expand_theme_relative`]).
//! 3. Alias candidates are generated ([`aliases::candidates`]) and the first
//!    one whose variable name is known wins.
//!
//! If nothing matches, a small table of known-bad reference shapes is tried
//! ([`corrections`]) before giving up.

pub mod aliases;
pub mod corrections;

use std::collections::BTreeSet;

use crate::codec::path_to_var_name;
use crate::scope::{path_theme, Theme};

pub use aliases::{candidates, default_level, AliasRule, ALIAS_RULES};
pub use corrections::{correct, Correction};

/// First segments after `brand.` that live under `brand.themes.<theme>.`.
pub const THEME_SCOPED_KEYS: &[&str] = &["palettes", "elevations", "layers", "states", "text-emphasis"];

/// The path a value was found at, plus the theme references inside it resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context<'a> {
    pub path: &'a str,
    pub theme: Option<Theme>,
}

impl<'a> Context<'a> {
    /// Infers the theme from the path itself.
    ///
    /// `brand.themes.<theme>.*` uses that theme and `ui-kit.*` resolves
    /// against light. Everything else has no theme.
    pub fn new(path: &'a str) -> Self {
        let theme = path_theme(path).or_else(|| path.starts_with("ui-kit.").then_some(Theme::Light));
        Self { path, theme }
    }

    /// Uses `theme` regardless of what the path says.
    pub fn with_theme(path: &'a str, theme: Theme) -> Self {
        Self {
            path,
            theme: Some(theme),
        }
    }
}

/// Inserts `themes.<theme>` into theme-relative `brand.*` references.
///
/// ```rust
/// use recursica::reference::expand_theme_relative;
/// use recursica::scope::Theme;
///
/// assert_eq!(
///     expand_theme_relative("brand.palettes.neutral.100", Some(Theme::Dark)),
///     "brand.themes.dark.palettes.neutral.100"
/// );
/// assert_eq!(
///     expand_theme_relative("brand.palettes.black", Some(Theme::Light)),
///     "brand.themes.light.palettes.core-colors.black.tone"
/// );
/// assert_eq!(
///     expand_theme_relative("brand.palettes.neutral.100", None),
///     "brand.palettes.neutral.100"
/// );
/// ```
pub fn expand_theme_relative(reference: &str, theme: Option<Theme>) -> String {
    let (Some(theme), Some(rest)) = (theme, reference.strip_prefix("brand.")) else {
        return reference.to_string();
    };
    let first = rest.split('.').next().unwrap_or_default();
    if !THEME_SCOPED_KEYS.contains(&first) {
        return reference.to_string();
    }
    let rest = expand_palette_shorthand(rest, theme).unwrap_or_else(|| rest.to_string());
    format!("brand.themes.{}.{}", theme, rest)
}

fn expand_palette_shorthand(rest: &str, theme: Theme) -> Option<String> {
    let mut segments = rest.splitn(4, '.');
    if segments.next() != Some("palettes") {
        return None;
    }
    let palette = segments.next()?;
    let level = segments.next();
    let tail = segments.next();
    match (palette, level) {
        ("black" | "white", None) => Some(format!("palettes.core-colors.{}.tone", palette)),
        ("black" | "white", Some(level)) => {
            let tail = tail.map(|t| format!(".{}", t)).unwrap_or_default();
            Some(format!("palettes.core-colors.{}.{}{}", palette, level, tail))
        }
        (_, Some("default")) => {
            let number = default_level(theme, palette)?;
            let tail = tail.map(|t| format!(".{}", t)).unwrap_or_default();
            Some(format!("palettes.{}.{}{}", palette, number, tail))
        }
        _ => None,
    }
}

/// Outcome of resolving one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The matched path, or the expanded best guess when unresolved.
    pub path: String,
    pub resolved: bool,
    /// Set when the match was only found after a known-bad shape was rewritten.
    pub correction: Option<Correction>,
}

/// Resolves references against a set of known variable names.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    known: &'a BTreeSet<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(known: &'a BTreeSet<String>) -> Self {
        Self { known }
    }

    /// Whether `path` names a known variable.
    pub fn is_known(&self, path: &str) -> bool {
        self.known.contains(&path_to_var_name(path))
    }

    /// Returns the first known candidate for `reference`, without corrections.
    pub fn lookup(&self, reference: &str, theme: Option<Theme>) -> Option<String> {
        candidates(&expand_theme_relative(reference, theme))
            .into_iter()
            .find(|candidate| self.is_known(candidate))
    }

    pub fn resolve(&self, reference: &str, theme: Option<Theme>) -> Resolution {
        if let Some(path) = self.lookup(reference, theme) {
            return Resolution {
                path,
                resolved: true,
                correction: None,
            };
        }
        if let Some(corrected) = correct(reference) {
            if let Some(path) = self.lookup(&corrected, theme) {
                return Resolution {
                    path,
                    resolved: true,
                    correction: Some(Correction {
                        from: reference.to_string(),
                        to: corrected,
                    }),
                };
            }
        }
        Resolution {
            path: expand_theme_relative(reference, theme),
            resolved: false,
            correction: None,
        }
    }
}
