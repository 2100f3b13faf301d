//! Typed token values.
//!
//! Leaf JSON values are parsed once, during flattening, into a [`TokenValue`].
//! The formatter then matches on the variant instead of re-inspecting raw
//! JSON at every call site.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// CSS keywords that pass through unquoted.
pub const CSS_KEYWORDS: &[&str] = &["none", "normal", "italic", "uppercase", "lowercase"];

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("hex color pattern")
});

/// Amount of a `{value, unit}` dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Number(f64),
    Reference(String),
}

/// A parsed leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Explicit JSON `null`; produces no declaration.
    Null,
    /// `{path.to.value}`, holding the inner path.
    Reference(String),
    /// `{value, unit}` object. A missing unit means a bare number.
    Dimension { amount: Amount, unit: Option<String> },
    /// `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
    Color(String),
    /// One of [`CSS_KEYWORDS`].
    Keyword(String),
    /// A string that already contains `var(`.
    Composed(String),
    /// Any other string; emitted as a quoted CSS string.
    Text(String),
    Number(f64),
    List(Vec<Value>),
    /// A value no formatting rule covers.
    Unsupported(Value),
}

impl TokenValue {
    /// Parses a JSON leaf.
    pub fn parse(value: &Value) -> TokenValue {
        match value {
            Value::Null => TokenValue::Null,
            Value::String(s) => Self::parse_str(s),
            Value::Number(n) => match n.as_f64() {
                Some(n) => TokenValue::Number(n),
                None => TokenValue::Unsupported(value.clone()),
            },
            Value::Array(items) => TokenValue::List(items.clone()),
            Value::Object(map) if is_dimension(map) => Self::parse_dimension(map),
            Value::Bool(_) | Value::Object(_) => TokenValue::Unsupported(value.clone()),
        }
    }

    fn parse_str(s: &str) -> TokenValue {
        if let Some(path) = parse_reference(s) {
            TokenValue::Reference(path.to_string())
        } else if HEX_COLOR.is_match(s) {
            TokenValue::Color(s.to_string())
        } else if CSS_KEYWORDS.contains(&s) {
            TokenValue::Keyword(s.to_string())
        } else if s.contains("var(") {
            TokenValue::Composed(s.to_string())
        } else {
            TokenValue::Text(s.to_string())
        }
    }

    fn parse_dimension(map: &Map<String, Value>) -> TokenValue {
        let unit = match map.get("unit") {
            None | Some(Value::Null) => None,
            Some(Value::String(unit)) => Some(unit.clone()),
            Some(_) => return TokenValue::Unsupported(Value::Object(map.clone())),
        };
        let amount = match map.get("value") {
            Some(Value::Number(n)) => n.as_f64().map(Amount::Number),
            Some(Value::String(s)) => parse_reference(s).map(|p| Amount::Reference(p.to_string())),
            _ => None,
        };
        match amount {
            Some(amount) => TokenValue::Dimension { amount, unit },
            None => TokenValue::Unsupported(Value::Object(map.clone())),
        }
    }

    /// Returns the referenced path, for bare references and referencing dimensions.
    pub fn reference(&self) -> Option<&str> {
        match self {
            TokenValue::Reference(path)
            | TokenValue::Dimension {
                amount: Amount::Reference(path),
                ..
            } => Some(path.as_str()),
            _ => None,
        }
    }
}

/// Returns the inner path of a `{path}` reference string.
///
/// ```rust
/// use recursica::value::parse_reference;
///
/// assert_eq!(parse_reference("{tokens.sizes.sm}"), Some("tokens.sizes.sm"));
/// assert_eq!(parse_reference("{}"), None);
/// assert_eq!(parse_reference("tokens.sizes.sm"), None);
/// ```
pub fn parse_reference(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('{')?.strip_suffix('}')?;
    (!inner.is_empty() && !inner.contains('}')).then_some(inner)
}

/// Whether an object has the `{value, unit}` dimension shape.
///
/// The object must carry `value`, and apart from `$`-prefixed metadata its only
/// other key may be `unit`.
pub fn is_dimension(map: &Map<String, Value>) -> bool {
    map.contains_key("value")
        && map
            .keys()
            .all(|k| k == "value" || k == "unit" || k.starts_with('$'))
}
