//! Error types for the decree parser.
//!
//! `DecretoError` is the single error type exposed to library consumers.
//! Unrecognised lines are not errors: the parser drops them and reports
//! them through `ParseReport` instead.

use thiserror::Error;

/// Main error type for the decree library.
#[derive(Debug, Error)]
pub enum DecretoError {
    /// The decree text was empty or whitespace only.
    ///
    /// Signals an upstream extraction/cleaning failure, distinct from a
    /// decree that simply has no numbered items.
    #[error("Decree text is empty: nothing was extracted or cleaning removed everything")]
    EmptyInput,

    /// The decree JSON file lacks the expected content key.
    #[error("Key '{key}' not found or not a string in {path}")]
    MissingContentKey { key: String, path: String },

    /// Reading an input file failed.
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Output format could not be determined from the file extension.
    #[error("Unsupported output format for '{0}'. Expected .csv, .json, .yaml or .yml")]
    UnsupportedFormat(String),

    /// Output path cannot be written to.
    #[error("Invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: String, reason: String },

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// YAML serialization failed.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for decree operations.
pub type Result<T> = std::result::Result<T, DecretoError>;
