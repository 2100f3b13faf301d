//! Known-bad reference shapes and their intended targets.
//!
//! Older brand files spell the core palette colors as `palettes.core-black`
//! or `palettes.core.white`. These are rewritten only after the reference as
//! written fails to resolve.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub from: String,
    pub to: String,
}

static CORE_COLOR: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(brand\.(?:themes\.[^.]+\.)?palettes)\.core-(black|white)$",
        r"^(brand\.(?:themes\.[^.]+\.)?palettes)\.core\.(black|white)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("core color pattern"))
    .collect()
});

/// Returns the intended reference for a known-bad one.
pub fn correct(reference: &str) -> Option<String> {
    CORE_COLOR.iter().find_map(|pattern| {
        pattern
            .captures(reference)
            .map(|caps| format!("{}.core-colors.{}.tone", &caps[1], &caps[2]))
    })
}
