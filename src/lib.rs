//! Typed, declarative settings specifications. Describe your settings as
//! data, validate once, serialize anywhere.
//!
//! Specfig models application settings as a [`Spec`]: an ordered list of
//! named [`Section`]s, each an ordered list of [`Setting`]s. Every
//! setting names its source key, its value [`Parser`], a default, a doc
//! string, and optionally an environment variable plus the [`Getter`]
//! that reads it.
//!
//! ```
//! use specfig::{Section, Setting, Spec, Value};
//!
//! let mut spec = Spec::new();
//! spec.add(
//!     Section::new("server")
//!         .add(Setting::new(
//!             "port",
//!             "port",
//!             "int",
//!             Some(Value::from("8080")),
//!             "The port number.",
//!         ))
//!         .add(Setting::new(
//!             "debug",
//!             "debug",
//!             "parse_bool",
//!             Some(Value::from(false)),
//!             "Enable debug mode.",
//!         )),
//! )?;
//!
//! // Adding validated the section: names resolved, defaults typed.
//! assert_eq!(spec[0][0].default, Some(Value::Int(8080)));
//! # Ok::<(), specfig::SpecfigError>(())
//! ```
//!
//! # Design: named converters
//!
//! Parsers and getters are registry entries identified by stable string
//! names (`"int"`, `"parse_strvec_float"`, `"get_bool"`, ...). The name
//! is the identity: it is how settings refer to their converter, how
//! converters compare equal, and how they appear in serialized specs.
//! Function identity is never serialized, only the registered name, so a
//! spec written by one process decodes in another as long as the names
//! still resolve.
//!
//! A setting may be constructed with a bare name; [`Setting::validate`]
//! (or transitively [`Spec::add`]) resolves it against the registry,
//! failing with `UnknownParser`/`UnknownGetter` for names that do not
//! exist. Validation also runs the declared default through the resolved
//! parser, so a default written as `"8080"` comes out as the integer
//! `8080` and type mismatches surface at spec-construction time, not at
//! first use.
//!
//! # Validation is all-or-nothing
//!
//! [`Spec::add`] validates the incoming section and rejects it wholesale
//! with `FaultySpec` (naming the invalid settings) if anything fails.
//! A spec never holds a partially-valid section, and decoding via
//! [`from_json`] applies the same rule: decode, validate, or fail.
//!
//! # Serialization
//!
//! [`to_json`] / [`from_json`] round-trip a spec through JSON. On the
//! wire, parser and getter fields are their canonical names and paths are
//! plain strings; decoding re-validates, which restores the typed form.
//!
//! # Resolution
//!
//! Validation deliberately does not read the environment: a spec is a
//! description, not a snapshot of the process that built it. The
//! [`resolve`] pipeline is the separate step that produces live values,
//! layering a TOML settings source and then environment overrides on top
//! of the validated defaults:
//!
//! ```text
//! Declared defaults     Setting::default, typed by validation
//!        overridden by
//! Settings file         [section] key = value, run through the parser
//!        overridden by
//! Environment           Setting::environ, read through the getter
//! ```
//!
//! An unset override variable falls through to the layer below; a set
//! but unparseable one is an error. In strict mode (the default for
//! [`resolve_path`]) source keys that match no declared setting are
//! rejected.
//!
//! # Errors
//!
//! All fallible operations return [`SpecfigError`]. Failures are
//! immediate and carry what a caller needs to report them: the unknown
//! name, the malformed entry, the offending file path, or the list of
//! invalid settings in a rejected section.

pub mod error;

mod codec;
mod env;
mod parse;
mod resolve;
mod source;
mod spec;
mod value;

#[cfg(test)]
mod fixtures;

pub use codec::{from_json, section_from_json, setting_from_json, to_json};
pub use env::{Getter, GetterRef};
pub use error::SpecfigError;
pub use parse::{Parser, ParserRef};
pub use resolve::{ResolveInput, ResolvedSettings, resolve, resolve_path};
pub use source::{load_table, section_values};
pub use spec::{Section, Setting, Spec};
pub use value::Value;
