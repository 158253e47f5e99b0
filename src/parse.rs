//! The parser registry: named, typed value converters.
//!
//! Every setting names the converter that turns its raw source value
//! (usually a string) into its typed form. The registry is a closed enum,
//! so the set of converters is fixed at compile time and each one has a
//! stable canonical name. Those names are the wire format for serialized
//! specs and must never change.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::SpecfigError;
use crate::value::Value;

/// Normalization used for boolean strings everywhere: lowercase, then
/// membership in {"1", "on", "true"}. Anything else is false, never an error.
pub(crate) fn str2bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "1" | "on" | "true")
}

/// A registered value converter.
///
/// Identity is the canonical name: two parsers are equal iff they are the
/// same registry entry. Construct by variant, or by name lookup via
/// [`Parser::from_name`] (fails with [`SpecfigError::UnknownParser`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parser {
    Bool,
    Int,
    Float,
    Str,
    Path,
    BoolVec,
    IntVec,
    FloatVec,
    StrVec,
}

/// Registry of (parser, canonical name) associations, in declaration order.
const REGISTRY: &[(Parser, &str)] = &[
    (Parser::Bool, "parse_bool"),
    (Parser::Int, "int"),
    (Parser::Float, "float"),
    (Parser::Str, "str"),
    (Parser::Path, "Path"),
    (Parser::BoolVec, "parse_strvec_bool"),
    (Parser::IntVec, "parse_strvec_int"),
    (Parser::FloatVec, "parse_strvec_float"),
    (Parser::StrVec, "parse_strvec_str"),
];

impl Parser {
    /// Look up a converter by its canonical name.
    pub fn from_name(name: &str) -> Result<Parser, SpecfigError> {
        REGISTRY
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(p, _)| *p)
            .ok_or_else(|| SpecfigError::UnknownParser(name.to_string()))
    }

    /// The stable canonical name, equal to the lookup key and the wire form.
    pub fn name(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(p, _)| *p == self)
            .map(|(_, n)| *n)
            .expect("every parser variant is registered")
    }

    /// Apply the converter to a value.
    pub fn parse(self, value: Value) -> Result<Value, SpecfigError> {
        match self {
            Parser::Bool => Ok(Value::Bool(parse_bool(&value))),
            Parser::Int => parse_int(value),
            Parser::Float => parse_float(value),
            Parser::Str => parse_str(value),
            Parser::Path => parse_path(value),
            Parser::BoolVec => parse_vec(value, Parser::Bool),
            Parser::IntVec => parse_vec(value, Parser::Int),
            Parser::FloatVec => parse_vec(value, Parser::Float),
            Parser::StrVec => parse_vec(value, Parser::Str),
        }
    }
}

impl fmt::Display for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parser {
    type Err = SpecfigError;

    fn from_str(s: &str) -> Result<Parser, SpecfigError> {
        Parser::from_name(s)
    }
}

fn parse_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Str(s) => str2bool(s),
        // Truthiness for everything the boolean converter is not picky about.
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::List(items) => !items.is_empty(),
        Value::Path(_) => true,
    }
}

fn parse_int(value: Value) -> Result<Value, SpecfigError> {
    match value {
        Value::Int(i) => Ok(Value::Int(i)),
        Value::Bool(b) => Ok(Value::Int(b as i64)),
        Value::Float(f) => Ok(Value::Int(f as i64)),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| SpecfigError::InvalidValue {
                expected: "int",
                got: s,
            }),
        other => Err(SpecfigError::InvalidValue {
            expected: "int",
            got: other.to_string(),
        }),
    }
}

fn parse_float(value: Value) -> Result<Value, SpecfigError> {
    match value {
        Value::Float(f) => Ok(Value::Float(f)),
        Value::Int(i) => Ok(Value::Float(i as f64)),
        Value::Bool(b) => Ok(Value::Float(if b { 1.0 } else { 0.0 })),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| SpecfigError::InvalidValue {
                expected: "float",
                got: s,
            }),
        other => Err(SpecfigError::InvalidValue {
            expected: "float",
            got: other.to_string(),
        }),
    }
}

fn parse_str(value: Value) -> Result<Value, SpecfigError> {
    match value {
        Value::Str(s) => Ok(Value::Str(s)),
        Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Path(_) => {
            Ok(Value::Str(value.to_string()))
        }
        other => Err(SpecfigError::InvalidValue {
            expected: "str",
            got: other.to_string(),
        }),
    }
}

fn parse_path(value: Value) -> Result<Value, SpecfigError> {
    match value {
        Value::Path(p) => Ok(Value::Path(p)),
        Value::Str(s) => Ok(Value::Path(PathBuf::from(s))),
        other => Err(SpecfigError::InvalidValue {
            expected: "path",
            got: other.to_string(),
        }),
    }
}

/// Parse a vector representation. All elements use the same converter.
///
/// An existing list passes through unchanged. A string must be bracketed
/// with exactly one `[` and one `]`; its interior splits on commas, each
/// element is trimmed, empty elements are dropped, and the survivors run
/// through `elt_parser` in order. Anything else is not a vector.
fn parse_vec(value: Value, elt_parser: Parser) -> Result<Value, SpecfigError> {
    let s = match value {
        Value::List(items) => return Ok(Value::List(items)),
        Value::Str(s) => s,
        other => {
            return Err(SpecfigError::NotAVector {
                input: other.to_string(),
            });
        }
    };

    let well_formed = s.starts_with('[')
        && s.ends_with(']')
        && s.matches('[').count() == 1
        && s.matches(']').count() == 1;
    if !well_formed {
        return Err(SpecfigError::NotAVector { input: s });
    }

    s[1..s.len() - 1]
        .split(',')
        .map(str::trim)
        .filter(|elt| !elt.is_empty())
        .map(|elt| elt_parser.parse(Value::Str(elt.to_string())))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

/// A late-bound parser reference.
///
/// Settings are constructed (and decoded) with a bare name; validation
/// resolves the name into the registry entry. Equality is by name in both
/// forms, so a resolved reference compares equal to the name it came from.
#[derive(Debug, Clone)]
pub enum ParserRef {
    Named(String),
    Resolved(Parser),
}

impl ParserRef {
    /// The canonical name in either form.
    pub fn name(&self) -> &str {
        match self {
            ParserRef::Named(name) => name,
            ParserRef::Resolved(parser) => parser.name(),
        }
    }

    /// Resolve to a registry entry, failing with `UnknownParser` for
    /// unregistered names.
    pub fn resolve(&self) -> Result<Parser, SpecfigError> {
        match self {
            ParserRef::Named(name) => Parser::from_name(name),
            ParserRef::Resolved(parser) => Ok(*parser),
        }
    }
}

impl PartialEq for ParserRef {
    fn eq(&self, other: &ParserRef) -> bool {
        self.name() == other.name()
    }
}

impl Eq for ParserRef {}

impl From<Parser> for ParserRef {
    fn from(parser: Parser) -> ParserRef {
        ParserRef::Resolved(parser)
    }
}

impl From<&str> for ParserRef {
    fn from(name: &str) -> ParserRef {
        ParserRef::Named(name.to_string())
    }
}

impl From<String> for ParserRef {
    fn from(name: String) -> ParserRef {
        ParserRef::Named(name)
    }
}

impl fmt::Display for ParserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ParserRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ParserRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<ParserRef, D::Error> {
        let name = String::deserialize(deserializer)?;
        // Unknown names survive as Named so validation reports them as
        // UnknownParser instead of a decode error.
        Ok(match Parser::from_name(&name) {
            Ok(parser) => ParserRef::Resolved(parser),
            Err(_) => ParserRef::Named(name),
        })
    }
}

impl Serialize for Parser {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Parser {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Parser, D::Error> {
        let name = String::deserialize(deserializer)?;
        Parser::from_name(&name).map_err(D::Error::custom)
    }
}
