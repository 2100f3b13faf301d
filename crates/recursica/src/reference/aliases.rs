//! Ordered alias rewrite rules.
//!
//! The JSON format tolerates a handful of alternate spellings for the same
//! target (`tokens.size` vs `tokens.sizes`, `fontSize` vs `font-size`, a
//! palette level without its `color.tone` suffix, ...). Each spelling is one
//! [`AliasRule`]. [`candidates`] applies the rules in the order of
//! [`ALIAS_RULES`], and the resolver takes the first candidate that names an
//! existing variable, so the order below is the precedence.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scope::Theme;

/// A pure path rewrite.
pub struct AliasRule {
    pub name: &'static str,
    rewrite: fn(&str) -> Option<String>,
}

impl fmt::Debug for AliasRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasRule").field("name", &self.name).finish_non_exhaustive()
    }
}

impl AliasRule {
    /// Rewrites `path`, or returns `None` if the rule does not apply.
    pub fn apply(&self, path: &str) -> Option<String> {
        (self.rewrite)(path)
    }
}

/// Every alias rule, in precedence order.
pub static ALIAS_RULES: &[AliasRule] = &[
    AliasRule {
        name: "palette-default-level",
        rewrite: palette_default_level,
    },
    AliasRule {
        name: "typography-case",
        rewrite: typography_case,
    },
    AliasRule {
        name: "token-plurals",
        rewrite: token_plurals,
    },
    AliasRule {
        name: "palette-level-color",
        rewrite: palette_level_color,
    },
    AliasRule {
        name: "interactive-tone",
        rewrite: interactive_tone,
    },
    AliasRule {
        name: "dimension-renames",
        rewrite: dimension_renames,
    },
];

/// Looks up a rule by name.
pub fn rule(name: &str) -> Option<&'static AliasRule> {
    ALIAS_RULES.iter().find(|r| r.name == name)
}

/// Returns `path` followed by every alias the rules produce from it.
///
/// Each rule is applied to all candidates produced so far, so later rules
/// see the output of earlier ones. Duplicates are dropped.
pub fn candidates(path: &str) -> Vec<String> {
    let mut candidates = vec![path.to_string()];
    for rule in ALIAS_RULES {
        let produced: Vec<String> = candidates.iter().filter_map(|c| rule.apply(c)).collect();
        for candidate in produced {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }
    candidates
}

/// The numeric level a palette's `default` stands for in a theme.
pub fn default_level(theme: Theme, palette: &str) -> Option<&'static str> {
    match (theme, palette) {
        (Theme::Light, "neutral") => Some("200"),
        (Theme::Light, "palette-1" | "palette-2") => Some("400"),
        (Theme::Dark, "neutral") => Some("800"),
        (Theme::Dark, "palette-1" | "palette-2") => Some("600"),
        _ => None,
    }
}

static PALETTE_DEFAULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^brand\.themes\.([^.]+)\.palettes\.([^.]+)\.default((?:\..+)?)$")
        .expect("palette default pattern")
});

fn palette_default_level(path: &str) -> Option<String> {
    let caps = PALETTE_DEFAULT.captures(path)?;
    let theme = Theme::from_name(&caps[1])?;
    let level = default_level(theme, &caps[2])?;
    Some(format!(
        "brand.themes.{}.palettes.{}.{}{}",
        theme, &caps[2], level, &caps[3]
    ))
}

fn typography_case(path: &str) -> Option<String> {
    let rest = path.strip_prefix("brand.typography.")?;
    let (_, property) = rest.rsplit_once('.')?;
    let renamed = if property.contains('-') {
        kebab_to_camel(property)
    } else if property.chars().any(|c| c.is_ascii_uppercase()) {
        camel_to_kebab(property)
    } else {
        return None;
    };
    let parent = &path[..path.len() - property.len()];
    Some(format!("{}{}", parent, renamed))
}

const TOKEN_RENAMES: &[(&str, &str)] = &[
    ("tokens.size.", "tokens.sizes."),
    ("tokens.color.", "tokens.colors."),
    ("tokens.opacity.", "tokens.opacities."),
    ("tokens.font.size.", "tokens.font.sizes."),
    ("tokens.font.weight.", "tokens.font.weights."),
    ("tokens.font.family.", "tokens.font.families."),
];

fn token_plurals(path: &str) -> Option<String> {
    let forward = TOKEN_RENAMES.iter().map(|&(from, to)| (from, to));
    let backward = TOKEN_RENAMES.iter().map(|&(from, to)| (to, from));
    forward.chain(backward).find_map(|(from, to)| {
        path.strip_prefix(from)
            .map(|rest| format!("{}{}", to, rest))
    })
}

static PALETTE_LEVEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(brand\.themes\.[^.]+\.palettes\.[^.]+\.[^.]+)(?:\.(tone|on-tone))?$")
        .expect("palette level pattern")
});

fn palette_level_color(path: &str) -> Option<String> {
    let caps = PALETTE_LEVEL.captures(path)?;
    let leaf = caps.get(2).map_or("tone", |m| m.as_str());
    Some(format!("{}.color.{}", &caps[1], leaf))
}

static INTERACTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(brand\.themes\.[^.]+\.layers\.layer-[0-9]+\.elements\.interactive)\.(color|hover-color)$",
    )
    .expect("interactive pattern")
});

fn interactive_tone(path: &str) -> Option<String> {
    let caps = INTERACTIVE.captures(path)?;
    let tone = match &caps[2] {
        "color" => "tone",
        _ => "tone-hover",
    };
    Some(format!("{}.{}", &caps[1], tone))
}

const DIMENSION_RENAMES: &[(&str, &str)] = &[
    (
        "brand.dimensions.border-radii.md",
        "brand.dimensions.border-radii.default",
    ),
    ("brand.dimensions.general.xs", "brand.dimensions.general.sm"),
];

fn dimension_renames(path: &str) -> Option<String> {
    DIMENSION_RENAMES.iter().find_map(|&(from, to)| {
        let rest = path.strip_prefix(from)?;
        (rest.is_empty() || rest.starts_with('.')).then(|| format!("{}{}", to, rest))
    })
}

/// `font-size` → `fontSize`.
pub fn kebab_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper = false;
    for c in s.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `fontSize` → `font-size`.
pub fn camel_to_kebab(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
