#![allow(dead_code)]

use serde_json::{json, Value};

/// A parsed CSS rule: selector and `(name, value)` declarations in order.
pub type Block = (String, Vec<(String, String)>);

/// Parses the block layout the emitters write.
pub fn parse_blocks(css: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;
    for line in css.lines() {
        if let Some(selector) = line.strip_suffix(" {") {
            assert!(current.is_none(), "nested block at {:?}", line);
            current = Some((selector.to_string(), Vec::new()));
        } else if line == "}" {
            blocks.push(current.take().expect("closing brace without block"));
        } else if let Some(declaration) = line.strip_prefix("  ") {
            let declaration = declaration.strip_suffix(';').expect("declaration ends with ;");
            let (name, value) = declaration.split_once(": ").expect("name: value");
            current
                .as_mut()
                .expect("declaration outside block")
                .1
                .push((name.to_string(), value.to_string()));
        } else {
            assert!(line.is_empty(), "unexpected line {:?}", line);
        }
    }
    assert!(current.is_none(), "unterminated block");
    blocks
}

pub fn block<'a>(blocks: &'a [Block], selector: &str) -> &'a [(String, String)] {
    &blocks
        .iter()
        .find(|(s, _)| s == selector)
        .unwrap_or_else(|| panic!("no block {:?}", selector))
        .1
}

pub fn layer_selector(theme: &str, layer: u8) -> String {
    format!(
        "[data-recursica-theme=\"{theme}\"][data-recursica-layer=\"{layer}\"], \
         [data-recursica-theme=\"{theme}\"] [data-recursica-layer=\"{layer}\"]"
    )
}

/// The name inside `var(...)`.
pub fn var_target(value: &str) -> Option<&str> {
    value.strip_prefix("var(")?.strip_suffix(')')
}

pub fn palette(tone: &str, on_tone: &str) -> Value {
    json!({ "color": { "tone": tone, "on-tone": on_tone } })
}

/// A small but complete theme: both themes, palettes, all four layers,
/// an elevation, typography, and layer-specific ui-kit values.
pub fn sample_input() -> (Value, Value, Value) {
    let tokens = json!({
        "colors": {
            "gray": { "100": "#f5f5f5", "900": "#111111" },
            "blue": { "500": "#3366ff" }
        },
        "sizes": {
            "sm": { "$type": "dimension", "$value": { "value": 4, "unit": "px" } },
            "md": { "$type": "dimension", "$value": { "value": 8, "unit": "px" } }
        },
        "opacities": { "half": { "value": 50, "unit": "percentage" } },
        "font": {
            "families": { "body": "Inter" },
            "weights": { "regular": 400 }
        }
    });

    let mut themes = serde_json::Map::new();
    for (theme, surface, interactive) in [("light", "#f5f5f5", "#3366ff"), ("dark", "#111111", "#3366ff")] {
        let mut layers = serde_json::Map::new();
        for layer in 0..4 {
            layers.insert(
                format!("layer-{}", layer),
                json!({
                    "property": { "surface": "{brand.palettes.neutral.100}" },
                    "elements": { "interactive": { "color": "{brand.palettes.palette-1.default}" } }
                }),
            );
        }
        themes.insert(
            theme.to_string(),
            json!({
                "palettes": {
                    "neutral": { "100": palette(surface, "#000000") },
                    "palette-1": {
                        "400": palette(interactive, "#ffffff"),
                        "600": palette(interactive, "#ffffff")
                    },
                    "core-colors": { "black": { "tone": "#000000" }, "white": { "tone": "#ffffff" } }
                },
                "elevations": {
                    "elevation-1": { "$value": {
                        "x-direction": "{tokens.sizes.sm}",
                        "y-direction": "{tokens.sizes.sm}",
                        "blur": "{tokens.sizes.md}",
                        "color": "{brand.palettes.black}"
                    } }
                },
                "layers": Value::Object(layers)
            }),
        );
    }

    let brand = json!({
        "themes": Value::Object(themes),
        "typography": {
            "body": { "$value": {
                "font-family": "{tokens.font.family.body}",
                "fontWeight": "{tokens.font.weights.regular}",
                "font-size": { "value": "{tokens.size.md}", "unit": "px" }
            } }
        },
        "dimensions": { "general": { "sm": "{tokens.sizes.sm}" } }
    });

    let mut button = serde_json::Map::new();
    for layer in 0..4 {
        button.insert(
            format!("layer-{}", layer),
            json!({
                "color": "{brand.layers.layer-0.property.surface}",
                "padding": "{brand.dimensions.general.sm}"
            }),
        );
    }
    let uikit = json!({ "button": Value::Object(button), "card": { "gap": "{tokens.sizes.md}" } });

    (tokens, brand, uikit)
}
