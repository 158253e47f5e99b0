//! The closed set of value types a setting can hold.
//!
//! Defaults, source values, and resolved settings are all [`Value`]s. The
//! set is deliberately closed (no open "any" type): a setting is a bool,
//! an integer, a float, a string, a filesystem path, or an ordered list
//! of these. Absence is modeled as `Option<Value>` by the caller.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SpecfigError;

/// A typed settings value.
///
/// Serializes untagged, so the JSON wire form is the natural one:
/// `true`, `5`, `1.5`, `"text"`, `[1, 2]`. Paths serialize as their
/// string form; decoding a string always yields [`Value::Str`], and
/// path-typing is restored when the owning spec re-validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Path(PathBuf),
    List(Vec<Value>),
}

impl Value {
    /// Short type label used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Path(_) => "path",
            Value::List(_) => "list",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Convert a parsed TOML value into a settings value.
    ///
    /// Tables never appear here (the source layer flattens them away) and
    /// datetimes have no counterpart in the closed value set.
    pub fn from_toml(value: toml::Value) -> Result<Value, SpecfigError> {
        match value {
            toml::Value::Boolean(b) => Ok(Value::Bool(b)),
            toml::Value::Integer(i) => Ok(Value::Int(i)),
            toml::Value::Float(f) => Ok(Value::Float(f)),
            toml::Value::String(s) => Ok(Value::Str(s)),
            toml::Value::Array(items) => Ok(Value::List(
                items
                    .into_iter()
                    .map(Value::from_toml)
                    .collect::<Result<_, _>>()?,
            )),
            other => Err(SpecfigError::InvalidValue {
                expected: "settings value",
                got: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Path(p) => write!(f, "{}", p.display()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl From<PathBuf> for Value {
    fn from(p: PathBuf) -> Value {
        Value::Path(p)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_json_round_trip() {
        for value in [
            Value::Bool(true),
            Value::Int(42),
            Value::Float(1.5),
            Value::Str("hello".into()),
        ] {
            let json = serde_json::to_string(&value).unwrap();
            let back: Value = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn list_json_round_trip() {
        let value = Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn path_serializes_as_string() {
        let value = Value::Path(PathBuf::from("/tmp/data"));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"/tmp/data\"");
    }

    #[test]
    fn string_decodes_as_str_not_path() {
        let value: Value = serde_json::from_str("\"/tmp/data\"").unwrap();
        assert_eq!(value, Value::Str("/tmp/data".into()));
    }

    #[test]
    fn from_toml_scalars() {
        assert_eq!(
            Value::from_toml(toml::Value::Boolean(true)).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            Value::from_toml(toml::Value::Integer(7)).unwrap(),
            Value::Int(7)
        );
        assert_eq!(
            Value::from_toml(toml::Value::String("x".into())).unwrap(),
            Value::Str("x".into())
        );
    }

    #[test]
    fn from_toml_array() {
        let arr = toml::Value::Array(vec![toml::Value::Integer(1), toml::Value::Integer(2)]);
        assert_eq!(
            Value::from_toml(arr).unwrap(),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn from_toml_rejects_datetime() {
        let dt: toml::Value = "d = 2020-01-01T00:00:00Z"
            .parse::<toml::Table>()
            .unwrap()
            .remove("d")
            .unwrap();
        assert!(matches!(
            Value::from_toml(dt),
            Err(SpecfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn display_list() {
        let value = Value::List(vec![Value::Int(1), Value::Str("a".into())]);
        assert_eq!(value.to_string(), "[1, a]");
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Int(5).as_int(), Some(5));
        assert_eq!(Value::Int(5).as_str(), None);
        assert_eq!(Value::Str("x".into()).as_str(), Some("x"));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
    }
}
