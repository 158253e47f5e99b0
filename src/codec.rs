//! JSON serialization of specs.
//!
//! The wire form serializes every field by its natural type except that
//! parsers and getters become their canonical registry names and paths
//! become plain strings. Decoding a full spec re-validates it, which
//! resolves the names back into registry entries and restores path-typed
//! defaults, so a decoded spec is indistinguishable from a directly
//! constructed one and malformed data fails the same way.

use serde::Serialize;

use crate::error::SpecfigError;
use crate::spec::{Section, Setting, Spec};

/// Encode a [`Spec`], [`Section`], or [`Setting`] as JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, SpecfigError> {
    serde_json::to_string(value).map_err(SpecfigError::Encode)
}

/// Decode a [`Spec`] and validate it before returning.
///
/// Unknown parser/getter names, untypeable defaults, and structurally
/// malformed input all fail here; no partially-valid spec is returned.
pub fn from_json(json: &str) -> Result<Spec, SpecfigError> {
    let mut spec: Spec = serde_json::from_str(json).map_err(SpecfigError::Decode)?;
    spec.validate()?;
    Ok(spec)
}

/// Decode a single [`Setting`] without validating it.
pub fn setting_from_json(json: &str) -> Result<Setting, SpecfigError> {
    serde_json::from_str(json).map_err(SpecfigError::Decode)
}

/// Decode a single [`Section`] without validating it.
pub fn section_from_json(json: &str) -> Result<Section, SpecfigError> {
    serde_json::from_str(json).map_err(SpecfigError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::sample_spec;
    use crate::parse::{Parser, ParserRef};
    use crate::value::Value;
    use std::path::PathBuf;

    #[test]
    fn spec_round_trips() {
        let spec = sample_spec();
        let json = to_json(&spec).unwrap();
        let back = from_json(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn round_trip_restores_path_typing() {
        let spec = sample_spec();
        let json = to_json(&spec).unwrap();
        // On the wire the path default is a plain string.
        assert!(json.contains("\"/var/lib/app\""));
        let back = from_json(&json).unwrap();
        let data_dir = back.section("database").unwrap().get("data_dir").unwrap();
        assert_eq!(
            data_dir.default,
            Some(Value::Path(PathBuf::from("/var/lib/app")))
        );
    }

    #[test]
    fn parsers_encode_as_canonical_names() {
        let spec = sample_spec();
        let json = to_json(&spec).unwrap();
        assert!(json.contains("\"parse_bool\""));
        assert!(json.contains("\"parse_strvec_int\""));
        assert!(json.contains("\"get_int\""));
    }

    #[test]
    fn decode_rejects_unknown_parser() {
        let json = r#"{"sections": [{"name": "s", "settings": [
            {"attribute": "x", "key": "x", "parser": "does_not_exist", "doc": ""}
        ]}]}"#;
        assert!(matches!(
            from_json(json),
            Err(SpecfigError::UnknownParser(name)) if name == "does_not_exist"
        ));
    }

    #[test]
    fn decode_rejects_unknown_getter() {
        let json = r#"{"sections": [{"name": "s", "settings": [
            {"attribute": "x", "key": "x", "parser": "int", "doc": "",
             "environ": "X", "environ_getter": "does_not_exist"}
        ]}]}"#;
        assert!(matches!(
            from_json(json),
            Err(SpecfigError::UnknownGetter(_))
        ));
    }

    #[test]
    fn decode_rejects_untypeable_default() {
        let json = r#"{"sections": [{"name": "s", "settings": [
            {"attribute": "x", "key": "x", "parser": "int", "default": "five", "doc": ""}
        ]}]}"#;
        assert!(matches!(
            from_json(json),
            Err(SpecfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            from_json("not json"),
            Err(SpecfigError::Decode(_))
        ));
    }

    #[test]
    fn decode_validates_defaults() {
        // A stringy default in the wire form comes back typed.
        let json = r#"{"sections": [{"name": "s", "settings": [
            {"attribute": "port", "key": "port", "parser": "int", "default": "5", "doc": "Port"}
        ]}]}"#;
        let spec = from_json(json).unwrap();
        assert_eq!(
            spec.section("s").unwrap().get("port").unwrap().default,
            Some(Value::Int(5))
        );
    }

    #[test]
    fn setting_decodes_without_validation() {
        let json = r#"{"attribute": "port", "key": "port", "parser": "int",
                       "default": "5", "doc": "Port"}"#;
        let setting = setting_from_json(json).unwrap();
        assert!(matches!(setting.parser, ParserRef::Resolved(Parser::Int)));
        // Still the raw wire value; only validation types it.
        assert_eq!(setting.default, Some(Value::Str("5".into())));
    }

    #[test]
    fn section_round_trips() {
        let section = sample_spec().section("server").unwrap().clone();
        let json = to_json(&section).unwrap();
        let back = section_from_json(&json).unwrap();
        assert_eq!(back, section);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"attribute": "x", "key": "x", "parser": "str", "doc": ""}"#;
        let setting = setting_from_json(json).unwrap();
        assert_eq!(setting.default, None);
        assert_eq!(setting.environ, "");
        assert!(setting.environ_getter.is_none());
    }
}
