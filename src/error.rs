use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecfigError {
    #[error("Malformed settings entry '{entry}': expected 'section.key = value'")]
    MalformedSettings { entry: String },

    #[error("Not a vector: {input:?}")]
    NotAVector { input: String },

    #[error("Faulty spec: section '{section}' has invalid settings: {}", .invalid.join(", "))]
    FaultySpec {
        section: String,
        invalid: Vec<String>,
    },

    #[error("Unknown parser '{0}'")]
    UnknownParser(String),

    #[error("Unknown getter '{0}'")]
    UnknownGetter(String),

    #[error("Environment variable '{name}' is not set")]
    MissingEnvVar { name: String },

    #[error("Invalid value for {expected} conversion: {got}")]
    InvalidValue { expected: &'static str, got: String },

    #[error("Unknown key '{key}' in settings source")]
    UnknownKey { key: String },

    #[error("Failed to encode spec: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode spec: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
