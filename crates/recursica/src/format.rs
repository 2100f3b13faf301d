//! Formatting of token values as CSS.

use serde_json::Value;
use tracing::warn;

use crate::codec::{path_to_var_name, var_ref};
use crate::error::{Diagnostics, ValidationErrorKind};
use crate::options::TransformOptions;
use crate::reference::{Context, Resolver};
use crate::scope::Theme;
use crate::value::{Amount, TokenValue};

/// Chooses the custom-property name a resolved path is referenced by.
///
/// The specific stylesheet always uses the fully-qualified name. The scoped
/// stylesheet stores layer-specific ui-kit values under theme- and
/// layer-qualified root names, so it needs the context theme as well.
pub trait VarNaming {
    fn var_name(&self, path: &str, theme: Option<Theme>) -> String;
}

/// Fully-qualified names.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificNaming;

impl VarNaming for SpecificNaming {
    fn var_name(&self, path: &str, _theme: Option<Theme>) -> String {
        path_to_var_name(path)
    }
}

/// Turns [`TokenValue`]s into CSS value text.
pub struct Formatter<'a> {
    resolver: Resolver<'a>,
    naming: &'a dyn VarNaming,
    options: TransformOptions,
}

impl<'a> Formatter<'a> {
    pub fn new(resolver: Resolver<'a>, naming: &'a dyn VarNaming, options: TransformOptions) -> Self {
        Self {
            resolver,
            naming,
            options,
        }
    }

    /// Formats `value`, or returns `None` for `null`.
    ///
    /// Problems are pushed into `diagnostics` against `context.path`; a best
    /// effort value is still returned so the stylesheet stays well-formed.
    pub fn format(
        &self,
        value: &TokenValue,
        context: Context<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        let css = match value {
            TokenValue::Null => return None,
            TokenValue::Reference(reference)
            | TokenValue::Dimension {
                amount: Amount::Reference(reference),
                ..
            } => self.reference(reference, context, diagnostics),
            TokenValue::Dimension {
                amount: Amount::Number(n),
                unit,
            } => {
                let amount = self.number(*n, context, diagnostics);
                match unit {
                    Some(unit) => format!("{}{}", amount, css_unit(unit)),
                    None => amount,
                }
            }
            TokenValue::Color(s) | TokenValue::Keyword(s) | TokenValue::Composed(s) => s.clone(),
            TokenValue::Text(s) => quote(s),
            TokenValue::Number(n) => self.number(*n, context, diagnostics),
            TokenValue::List(items) => format_list(items),
            TokenValue::Unsupported(value) => {
                let text = value.to_string();
                diagnostics.push(
                    context.path,
                    ValidationErrorKind::UnsupportedValue { value: text.clone() },
                );
                text
            }
        };
        Some(css)
    }

    fn reference(&self, reference: &str, context: Context<'_>, diagnostics: &mut Diagnostics) -> String {
        let resolution = self.resolver.resolve(reference, context.theme);
        if !resolution.resolved {
            diagnostics.push(
                context.path,
                ValidationErrorKind::UnresolvedReference {
                    reference: reference.to_string(),
                    target: path_to_var_name(&resolution.path),
                },
            );
        }
        if let Some(correction) = &resolution.correction {
            if self.options.strict_references {
                diagnostics.push(
                    context.path,
                    ValidationErrorKind::CorrectedReference {
                        from: correction.from.clone(),
                        to: correction.to.clone(),
                    },
                );
            } else {
                warn!(
                    path = context.path,
                    from = correction.from.as_str(),
                    to = correction.to.as_str(),
                    "corrected known-invalid reference"
                );
            }
        }
        var_ref(&self.naming.var_name(&resolution.path, context.theme))
    }

    fn number(&self, n: f64, context: Context<'_>, diagnostics: &mut Diagnostics) -> String {
        if !n.is_finite() {
            diagnostics.push(context.path, ValidationErrorKind::InvalidNumber { value: n });
        }
        format_number(n)
    }
}

/// Shortest decimal text for a number; `-0` prints as `0`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

/// CSS spelling of a unit name.
pub fn css_unit(unit: &str) -> &str {
    match unit {
        "percentage" | "percent" => "%",
        other => other,
    }
}

/// Quotes a CSS string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn format_list(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => quote(s),
            Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
