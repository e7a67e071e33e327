//! Conversion of parsed JSON / YAML documents into token trees.

use indexmap::IndexMap;

use crate::error::{TokensError, Result};

use super::tree::{Scalar, TokenTree};

/// Source document formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Detect the format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Json => "JSON",
            SourceFormat::Yaml => "YAML",
        }
    }
}

/// Parse a token document of the given format.
pub fn parse_tokens(source: &str, format: SourceFormat) -> Result<TokenTree> {
    match format {
        SourceFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(source).map_err(|e| TokensError::Parse {
                    message: format!("Invalid JSON: {}", e),
                    help: None,
                })?;
            Ok(TokenTree::from(value))
        }
        SourceFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(source).map_err(|e| TokensError::Parse {
                    message: format!("Invalid YAML: {}", e),
                    help: None,
                })?;
            TokenTree::try_from(value)
        }
    }
}

impl From<serde_json::Value> for TokenTree {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => TokenTree::Leaf(Scalar::Null),
            Value::Bool(b) => TokenTree::Leaf(Scalar::Bool(b)),
            Value::Number(n) => TokenTree::Leaf(json_number(&n)),
            Value::String(s) => TokenTree::Leaf(Scalar::String(s)),
            Value::Array(items) => {
                TokenTree::Sequence(items.into_iter().map(TokenTree::from).collect())
            }
            Value::Object(map) => TokenTree::Node(
                map.into_iter()
                    .map(|(key, child)| (key, TokenTree::from(child)))
                    .collect(),
            ),
        }
    }
}

fn json_number(n: &serde_json::Number) -> Scalar {
    match n.as_i64() {
        Some(i) => Scalar::Integer(i),
        None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

impl TryFrom<serde_yaml::Value> for TokenTree {
    type Error = TokensError;

    fn try_from(value: serde_yaml::Value) -> Result<Self> {
        use serde_yaml::Value;

        let tree = match value {
            Value::Null => TokenTree::Leaf(Scalar::Null),
            Value::Bool(b) => TokenTree::Leaf(Scalar::Bool(b)),
            Value::Number(n) => TokenTree::Leaf(yaml_number(&n)),
            Value::String(s) => TokenTree::Leaf(Scalar::String(s)),
            Value::Sequence(items) => TokenTree::Sequence(
                items
                    .into_iter()
                    .map(TokenTree::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Mapping(map) => {
                let mut children = IndexMap::with_capacity(map.len());
                for (key, child) in map {
                    children.insert(yaml_key(key)?, TokenTree::try_from(child)?);
                }
                TokenTree::Node(children)
            }
            Value::Tagged(tagged) => TokenTree::try_from(tagged.value)?,
        };

        Ok(tree)
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Scalar {
    match n.as_i64() {
        Some(i) => Scalar::Integer(i),
        None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// YAML allows non-string keys; scalars are stringified, anything else is rejected.
fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(TokensError::Parse {
            message: format!("Unsupported mapping key: {:?}", other),
            help: Some("Token group names must be strings, numbers or booleans".to_string()),
        }),
    }
}
