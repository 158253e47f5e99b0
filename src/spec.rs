//! The settings specification model: [`Setting`], [`Section`], [`Spec`].
//!
//! A spec is built by adding sections, each built by adding settings.
//! Settings carry late-bound parser/getter references and untyped
//! defaults until validation resolves the references and runs each
//! default through its own parser. A section only enters a spec after it
//! validates; a failing section is rejected wholesale with `FaultySpec`.

use std::ops::Index;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::env::GetterRef;
use crate::error::SpecfigError;
use crate::parse::ParserRef;
use crate::value::Value;

/// One named, typed configuration entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Destination field name in the resolved settings.
    pub attribute: String,
    /// Source lookup key within the owning section.
    pub key: String,
    /// Converter applied to the default and to source values.
    pub parser: ParserRef,
    /// Declared default, typed once validation has run.
    #[serde(default)]
    pub default: Option<Value>,
    /// Documentation string.
    pub doc: String,
    /// Environment variable that overrides the value; empty means no
    /// override is configured.
    #[serde(default)]
    pub environ: String,
    /// Reader used for the environment override.
    #[serde(default)]
    pub environ_getter: Option<GetterRef>,
}

impl Setting {
    pub fn new(
        attribute: impl Into<String>,
        key: impl Into<String>,
        parser: impl Into<ParserRef>,
        default: Option<Value>,
        doc: impl Into<String>,
    ) -> Setting {
        Setting {
            attribute: attribute.into(),
            key: key.into(),
            parser: parser.into(),
            default,
            doc: doc.into(),
            environ: String::new(),
            environ_getter: None,
        }
    }

    /// Configure an environment override: variable name plus the getter
    /// that reads it.
    pub fn with_environ(mut self, var: impl Into<String>, getter: impl Into<GetterRef>) -> Setting {
        self.environ = var.into();
        self.environ_getter = Some(getter.into());
        self
    }

    /// Resolve the parser/getter references and type the default.
    ///
    /// After success the parser (and getter, if configured) are resolved
    /// registry entries and the default has been run through the parser.
    /// An absent default stays absent. The environment override is not
    /// consulted here; applying it is the resolve layer's job.
    ///
    /// Idempotent: re-validating a valid setting is a no-op.
    pub fn validate(&mut self) -> Result<(), SpecfigError> {
        let parser = self.parser.resolve()?;
        self.parser = ParserRef::Resolved(parser);

        if let Some(getter_ref) = &self.environ_getter {
            let getter = getter_ref.resolve()?;
            self.environ_getter = Some(GetterRef::Resolved(getter));
        }

        if let Some(default) = &self.default {
            self.default = Some(parser.parse(default.clone())?);
        }

        Ok(())
    }
}

/// A named, ordered collection of settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub settings: Vec<Setting>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Section {
        Section {
            name: name.into(),
            settings: Vec::new(),
        }
    }

    /// Append a setting. No validation happens here; that runs through
    /// [`Section::validate`] or transitively through [`Spec::add`].
    pub fn add(mut self, setting: Setting) -> Section {
        self.settings.push(setting);
        self
    }

    /// Validate every setting in insertion order, stopping at the first
    /// failure.
    pub fn validate(&mut self) -> Result<(), SpecfigError> {
        for setting in &mut self.settings {
            setting.validate()?;
        }
        Ok(())
    }

    /// Attribute names of the settings that fail validation, probed
    /// without mutating the section.
    pub fn invalid(&self) -> Vec<String> {
        self.settings
            .iter()
            .filter(|setting| {
                let mut probe = (*setting).clone();
                probe.validate().is_err()
            })
            .map(|setting| setting.attribute.clone())
            .collect()
    }

    /// Look up a setting by attribute name.
    pub fn get(&self, attribute: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.attribute == attribute)
    }

    pub fn iter(&self) -> slice::Iter<'_, Setting> {
        self.settings.iter()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

impl Index<usize> for Section {
    type Output = Setting;

    fn index(&self, idx: usize) -> &Setting {
        &self.settings[idx]
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = &'a Setting;
    type IntoIter = slice::Iter<'a, Setting>;

    fn into_iter(self) -> Self::IntoIter {
        self.settings.iter()
    }
}

/// The top-level specification: an ordered collection of sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Spec {
    pub fn new() -> Spec {
        Spec::default()
    }

    /// Validate `section` and append it.
    ///
    /// A section that fails validation is rejected with `FaultySpec`
    /// naming its invalid settings, and the spec is left unchanged.
    pub fn add(&mut self, mut section: Section) -> Result<&mut Spec, SpecfigError> {
        if section.validate().is_err() {
            return Err(SpecfigError::FaultySpec {
                invalid: section.invalid(),
                section: section.name,
            });
        }
        self.sections.push(section);
        Ok(self)
    }

    /// Validate every section in insertion order, stopping at the first
    /// failure.
    pub fn validate(&mut self) -> Result<(), SpecfigError> {
        for section in &mut self.sections {
            section.validate()?;
        }
        Ok(())
    }

    /// Look up a section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Index<usize> for Spec {
    type Output = Section;

    fn index(&self, idx: usize) -> &Section {
        &self.sections[idx]
    }
}

impl<'a> IntoIterator for &'a Spec {
    type Item = &'a Section;
    type IntoIter = slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
