//! Settings resolution: layer source values and environment overrides on
//! top of spec defaults.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, so the full
//! pipeline is testable with synthetic inputs. Per setting:
//!
//! 1. Start from the validated default
//! 2. Override with the source value, run through the setting's parser
//! 3. Override with the environment variable, read through the setting's
//!    getter (an unset variable falls through; a present-but-invalid one
//!    fails)
//!
//! Spec validation deliberately never applies environment overrides; this
//! module is the step that does.

use std::collections::HashMap;
use std::path::Path;
use std::slice;

use toml::Table;

use crate::error::SpecfigError;
use crate::source;
use crate::spec::Spec;
use crate::value::Value;

/// All pre-loaded data needed to resolve a spec. No I/O happens here.
pub struct ResolveInput {
    /// Parsed settings source document.
    pub table: Table,
    /// Raw environment pairs (pass `std::env::vars().collect()` or
    /// synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Whether to reject source keys that match no setting.
    pub strict: bool,
}

/// Resolved values, keyed by `section.attribute` in spec declaration
/// order. Settings with neither a default nor a source value are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    entries: Vec<(String, Value)>,
}

impl ResolvedSettings {
    pub fn get(&self, section: &str, attribute: &str) -> Option<&Value> {
        let wanted = format!("{section}.{attribute}");
        self.entries
            .iter()
            .find(|(key, _)| *key == wanted)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> slice::Iter<'_, (String, Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve a validated spec against pre-loaded inputs.
///
/// The source document is shape-checked and flattened first, so malformed
/// entries fail before any layering. In strict mode every source entry
/// must correspond to a declared setting.
pub fn resolve(spec: &Spec, input: ResolveInput) -> Result<ResolvedSettings, SpecfigError> {
    let values = source::section_values(&input.table)?;

    if input.strict {
        for (section_name, key, _) in &values {
            let known = spec
                .section(section_name)
                .is_some_and(|section| section.iter().any(|s| s.key == *key));
            if !known {
                return Err(SpecfigError::UnknownKey {
                    key: format!("{section_name}.{key}"),
                });
            }
        }
    }

    let env: HashMap<String, String> = input.env_vars.into_iter().collect();
    let mut entries = Vec::new();
    let mut from_source = 0usize;
    let mut from_env = 0usize;

    for section in spec {
        for setting in section {
            let parser = setting.parser.resolve()?;
            let mut value = setting.default.clone();

            let source_value = values
                .iter()
                .find(|(s, k, _)| *s == section.name && *k == setting.key)
                .map(|(_, _, v)| v.clone());
            if let Some(raw) = source_value {
                value = Some(parser.parse(raw)?);
                from_source += 1;
            }

            if !setting.environ.is_empty()
                && let Some(getter_ref) = &setting.environ_getter
            {
                let getter = getter_ref.resolve()?;
                match getter.read_with(&setting.environ, |name| env.get(name).cloned()) {
                    Ok(override_value) => {
                        value = Some(override_value);
                        from_env += 1;
                    }
                    Err(SpecfigError::MissingEnvVar { .. }) => {}
                    Err(e) => return Err(e),
                }
            }

            if let Some(value) = value {
                entries.push((format!("{}.{}", section.name, setting.attribute), value));
            }
        }
    }

    log::debug!(
        "resolved {} settings ({from_source} from source, {from_env} from environment)",
        entries.len()
    );
    Ok(ResolvedSettings { entries })
}

/// Convenience wrapper: load a settings file and resolve it against the
/// process environment in strict mode.
pub fn resolve_path(spec: &Spec, path: &Path) -> Result<ResolvedSettings, SpecfigError> {
    let table = source::load_table(path)?;
    resolve(
        spec,
        ResolveInput {
            table,
            env_vars: std::env::vars().collect(),
            strict: true,
        },
    )
}
