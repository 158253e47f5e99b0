//! The getter registry: named, typed environment-variable readers.
//!
//! Structurally the mirror of the parser registry, over a distinct set of
//! functions that read from the process environment instead of converting
//! in-memory values.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::SpecfigError;
use crate::parse::str2bool;
use crate::value::Value;

/// A registered environment reader.
///
/// Same identity contract as the parser registry: equal iff the canonical
/// names are equal, constructed by variant or by [`Getter::from_name`]
/// (fails with [`SpecfigError::UnknownGetter`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Getter {
    Str,
    Path,
    Bool,
    Int,
}

const REGISTRY: &[(Getter, &str)] = &[
    (Getter::Str, "get_str"),
    (Getter::Path, "get_path"),
    (Getter::Bool, "get_bool"),
    (Getter::Int, "get_int"),
];

impl Getter {
    /// Look up a reader by its canonical name.
    pub fn from_name(name: &str) -> Result<Getter, SpecfigError> {
        REGISTRY
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(g, _)| *g)
            .ok_or_else(|| SpecfigError::UnknownGetter(name.to_string()))
    }

    /// The stable canonical name, equal to the lookup key and the wire form.
    pub fn name(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(g, _)| *g == self)
            .map(|(_, n)| *n)
            .expect("every getter variant is registered")
    }

    /// Read the named variable from the process environment.
    ///
    /// An unset (or non-unicode) variable fails with `MissingEnvVar`.
    pub fn read(self, var: &str) -> Result<Value, SpecfigError> {
        self.read_with(var, |name| std::env::var(name).ok())
    }

    /// Like [`read`](Getter::read) but against an injectable lookup, so
    /// tests and the resolve pipeline can supply synthetic environments.
    pub fn read_with(
        self,
        var: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Value, SpecfigError> {
        let raw = lookup(var).ok_or_else(|| SpecfigError::MissingEnvVar {
            name: var.to_string(),
        })?;
        match self {
            Getter::Str => Ok(Value::Str(raw)),
            Getter::Path => Ok(Value::Path(PathBuf::from(raw))),
            Getter::Bool => Ok(Value::Bool(str2bool(raw.trim()))),
            Getter::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| SpecfigError::InvalidValue {
                    expected: "int",
                    got: raw,
                }),
        }
    }
}

impl fmt::Display for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Getter {
    type Err = SpecfigError;

    fn from_str(s: &str) -> Result<Getter, SpecfigError> {
        Getter::from_name(s)
    }
}

/// A late-bound getter reference, mirroring `ParserRef`.
#[derive(Debug, Clone)]
pub enum GetterRef {
    Named(String),
    Resolved(Getter),
}

impl GetterRef {
    pub fn name(&self) -> &str {
        match self {
            GetterRef::Named(name) => name,
            GetterRef::Resolved(getter) => getter.name(),
        }
    }

    pub fn resolve(&self) -> Result<Getter, SpecfigError> {
        match self {
            GetterRef::Named(name) => Getter::from_name(name),
            GetterRef::Resolved(getter) => Ok(*getter),
        }
    }
}

impl PartialEq for GetterRef {
    fn eq(&self, other: &GetterRef) -> bool {
        self.name() == other.name()
    }
}

impl Eq for GetterRef {}

impl From<Getter> for GetterRef {
    fn from(getter: Getter) -> GetterRef {
        GetterRef::Resolved(getter)
    }
}

impl From<&str> for GetterRef {
    fn from(name: &str) -> GetterRef {
        GetterRef::Named(name.to_string())
    }
}

impl From<String> for GetterRef {
    fn from(name: String) -> GetterRef {
        GetterRef::Named(name)
    }
}

impl fmt::Display for GetterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for GetterRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for GetterRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<GetterRef, D::Error> {
        let name = String::deserialize(deserializer)?;
        // Unknown names survive as Named so validation reports them as
        // UnknownGetter instead of a decode error.
        Ok(match Getter::from_name(&name) {
            Ok(getter) => GetterRef::Resolved(getter),
            Err(_) => GetterRef::Named(name),
        })
    }
}

impl Serialize for Getter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Getter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Getter, D::Error> {
        let name = String::deserialize(deserializer)?;
        Getter::from_name(&name).map_err(D::Error::custom)
    }
}
