//! The three input documents and their normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TransformError;

/// Identifies one of the three input documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentRoot {
    Tokens,
    Brand,
    UiKit,
}

impl DocumentRoot {
    pub const ALL: [DocumentRoot; 3] = [DocumentRoot::Tokens, DocumentRoot::Brand, DocumentRoot::UiKit];

    /// The first path segment of every entry from this document.
    pub fn key(self) -> &'static str {
        match self {
            DocumentRoot::Tokens => "tokens",
            DocumentRoot::Brand => "brand",
            DocumentRoot::UiKit => "ui-kit",
        }
    }

    /// The file name this document is exported under.
    pub fn file_name(self) -> &'static str {
        match self {
            DocumentRoot::Tokens => "recursica_tokens.json",
            DocumentRoot::Brand => "recursica_brand.json",
            DocumentRoot::UiKit => "recursica_ui-kit.json",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "tokens" => Some(DocumentRoot::Tokens),
            "brand" => Some(DocumentRoot::Brand),
            "ui-kit" => Some(DocumentRoot::UiKit),
            _ => None,
        }
    }
}

/// Immutable snapshot of the documents a transform reads.
///
/// Missing documents deserialize as `null` and are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformInput {
    #[serde(default)]
    pub tokens: Value,
    #[serde(default)]
    pub brand: Value,
    #[serde(default, alias = "ui-kit")]
    pub uikit: Value,
}

impl TransformInput {
    pub fn new(tokens: Value, brand: Value, uikit: Value) -> Self {
        Self {
            tokens,
            brand,
            uikit,
        }
    }

    fn raw(&self, root: DocumentRoot) -> &Value {
        match root {
            DocumentRoot::Tokens => &self.tokens,
            DocumentRoot::Brand => &self.brand,
            DocumentRoot::UiKit => &self.uikit,
        }
    }

    /// Returns the body of a document, unwrapping a `{"<root>": {...}}` wrapper.
    ///
    /// Returns `Ok(None)` for a missing (`null`) document.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidDocument`] if the document is not an object.
    pub fn document(&self, root: DocumentRoot) -> Result<Option<&Map<String, Value>>, TransformError> {
        match self.raw(root) {
            Value::Null => Ok(None),
            Value::Object(map) => {
                if map.len() == 1 {
                    if let Some(Value::Object(inner)) = map.get(root.key()) {
                        return Ok(Some(inner));
                    }
                }
                Ok(Some(map))
            }
            other => Err(TransformError::InvalidDocument {
                document: root.key().to_string(),
                reason: format!("expected a JSON object, found {}", json_type(other)),
            }),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
