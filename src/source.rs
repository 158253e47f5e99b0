//! Loading and flattening TOML settings sources.
//!
//! A settings source is a TOML document whose every entry has the shape
//! `section.key = value`: top-level tables are sections, their entries
//! are raw setting values. Anything else (a loose top-level value, a
//! nested table) is malformed. This layer only hands primitive-or-string
//! values to the resolve pipeline; it never sees parsers or getters.

use std::fs;
use std::path::Path;

use toml::Table;

use crate::error::SpecfigError;
use crate::value::Value;

/// Read and parse a TOML settings file.
pub fn load_table(path: &Path) -> Result<Table, SpecfigError> {
    let content = fs::read_to_string(path).map_err(|e| SpecfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    content.parse::<Table>().map_err(|e| SpecfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Flatten a parsed document into `(section, key, value)` triples.
///
/// Fails with `MalformedSettings` on any entry that does not follow the
/// `section.key = value` shape.
pub fn section_values(table: &Table) -> Result<Vec<(String, String, Value)>, SpecfigError> {
    let mut out = Vec::new();
    for (section, entries) in table {
        let toml::Value::Table(entries) = entries else {
            return Err(SpecfigError::MalformedSettings {
                entry: section.clone(),
            });
        };
        for (key, raw) in entries {
            if raw.is_table() {
                return Err(SpecfigError::MalformedSettings {
                    entry: format!("{section}.{key}"),
                });
            }
            out.push((section.clone(), key.clone(), Value::from_toml(raw.clone())?));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table(toml_str: &str) -> Table {
        toml_str.parse::<Table>().unwrap()
    }

    #[test]
    fn flattens_sections_in_order() {
        let t = table(
            r#"
            [server]
            host = "localhost"
            port = 8080

            [database]
            pool_size = 5
            "#,
        );
        let values = section_values(&t).unwrap();
        assert_eq!(
            values,
            vec![
                ("database".into(), "pool_size".into(), Value::Int(5)),
                ("server".into(), "host".into(), Value::Str("localhost".into())),
                ("server".into(), "port".into(), Value::Int(8080)),
            ]
        );
    }

    #[test]
    fn empty_document_is_fine() {
        assert!(section_values(&Table::new()).unwrap().is_empty());
    }

    #[test]
    fn loose_top_level_value_is_malformed() {
        let t = table("port = 8080");
        assert!(matches!(
            section_values(&t),
            Err(SpecfigError::MalformedSettings { entry }) if entry == "port"
        ));
    }

    #[test]
    fn nested_table_is_malformed() {
        let t = table("[server]\n[server.tls]\ncert = \"x\"");
        assert!(matches!(
            section_values(&t),
            Err(SpecfigError::MalformedSettings { entry }) if entry == "server.tls"
        ));
    }

    #[test]
    fn array_values_pass_through() {
        let t = table("[server]\nweights = [1, 2]");
        let values = section_values(&t).unwrap();
        assert_eq!(
            values[0].2,
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn load_table_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 3000").unwrap();
        let t = load_table(file.path()).unwrap();
        assert_eq!(t["server"]["port"].as_integer().unwrap(), 3000);
    }

    #[test]
    fn load_table_missing_file_is_io_error() {
        let err = load_table(Path::new("/no/such/settings.toml")).unwrap_err();
        assert!(matches!(err, SpecfigError::Io { .. }));
        assert!(err.to_string().contains("settings.toml"));
    }

    #[test]
    fn load_table_bad_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(matches!(
            load_table(file.path()),
            Err(SpecfigError::Parse { .. })
        ));
    }
}
