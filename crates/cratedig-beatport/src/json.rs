//! Typed navigation into provider JSON.
//!
//! Every accessor takes exactly one step into a [`Value`] and reports a
//! [`ShapeError`] naming the step when the expected shape is absent. Deeper
//! walks go through [`path`], which labels failures with the full dotted
//! path walked so far.

use serde_json::Value;
use thiserror::Error;

/// The JSON did not have the shape an accessor expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// An object lacked the requested key.
    #[error("missing key `{path}`")]
    MissingKey { path: String },

    /// An array was shorter than the requested index.
    #[error("missing index `{path}`")]
    MissingIndex { path: String },

    /// A value existed but had the wrong JSON type.
    #[error("expected {expected} at `{path}`")]
    WrongType {
        path: String,
        expected: &'static str,
    },
}

impl ShapeError {
    /// The dotted path at which navigation failed.
    pub fn path(&self) -> &str {
        match self {
            Self::MissingKey { path } | Self::MissingIndex { path } | Self::WrongType { path, .. } => {
                path
            }
        }
    }
}

/// One step of a [`path`] walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

/// Look up `key` in an object.
pub fn field<'v>(value: &'v Value, key: &str) -> Result<&'v Value, ShapeError> {
    lookup_key(value, key, key)
}

/// Look up element `index` in an array.
pub fn index(value: &Value, index: usize) -> Result<&Value, ShapeError> {
    lookup_index(value, index, &format!("[{index}]"))
}

/// Walk a sequence of keys and indexes.
pub fn path<'v>(value: &'v Value, steps: &[Step<'_>]) -> Result<&'v Value, ShapeError> {
    let mut current = value;
    let mut walked = String::new();
    for step in steps {
        current = match *step {
            Step::Key(key) => {
                walked = if walked.is_empty() {
                    key.to_string()
                } else {
                    format!("{walked}.{key}")
                };
                lookup_key(current, key, &walked)?
            }
            Step::Index(i) => {
                walked = format!("{walked}[{i}]");
                lookup_index(current, i, &walked)?
            }
        };
    }
    Ok(current)
}

/// A required string field.
pub fn str_field<'v>(value: &'v Value, key: &str) -> Result<&'v str, ShapeError> {
    field(value, key)?
        .as_str()
        .ok_or_else(|| wrong_type(key, "string"))
}

/// A string field whose key must be present but whose value may be null.
pub fn opt_str_field<'v>(value: &'v Value, key: &str) -> Result<Option<&'v str>, ShapeError> {
    match field(value, key)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(wrong_type(key, "string or null")),
    }
}

/// A required boolean field.
pub fn bool_field(value: &Value, key: &str) -> Result<bool, ShapeError> {
    field(value, key)?
        .as_bool()
        .ok_or_else(|| wrong_type(key, "boolean"))
}

/// A required array field.
pub fn array_field<'v>(value: &'v Value, key: &str) -> Result<&'v [Value], ShapeError> {
    field(value, key)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| wrong_type(key, "array"))
}

/// A numeric identifier, given either as a JSON integer or a numeric string.
pub fn id_field(value: &Value, key: &str) -> Result<u64, ShapeError> {
    match field(value, key)? {
        Value::Number(n) => n.as_u64().ok_or_else(|| wrong_type(key, "unsigned integer")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| wrong_type(key, "numeric string")),
        _ => Err(wrong_type(key, "integer id")),
    }
}

fn lookup_key<'v>(value: &'v Value, key: &str, walked: &str) -> Result<&'v Value, ShapeError> {
    let object = value.as_object().ok_or_else(|| ShapeError::WrongType {
        path: walked.to_string(),
        expected: "object",
    })?;
    object.get(key).ok_or_else(|| ShapeError::MissingKey {
        path: walked.to_string(),
    })
}

fn lookup_index<'v>(value: &'v Value, index: usize, walked: &str) -> Result<&'v Value, ShapeError> {
    let array = value.as_array().ok_or_else(|| ShapeError::WrongType {
        path: walked.to_string(),
        expected: "array",
    })?;
    array.get(index).ok_or_else(|| ShapeError::MissingIndex {
        path: walked.to_string(),
    })
}

fn wrong_type(key: &str, expected: &'static str) -> ShapeError {
    ShapeError::WrongType {
        path: key.to_string(),
        expected,
    }
}
