//! # Error Handling
//!
//! Errors in this crate only come from the edges: reading and parsing a
//! catalog file, or serializing a computed view. The view computation itself
//! never fails. Absent data (a missing timestamp source, an unset field, an
//! unknown sort field) resolves to a documented default, and an empty listing
//! is reported as [`crate::planner::ViewOutcome::NotFound`] rather than as an
//! error.
//!
//! The `Error` enum is built with `thiserror`, and `Result<T>` is the usual
//! alias over it.

use thiserror::Error;

/// Main error type for repolist operations
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog file was syntactically valid but semantically wrong.
    ///
    /// Carries an optional hint about how to fix it.
    #[error("Catalog parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    CatalogParse {
        message: String,
        /// Optional hint for how to fix the catalog
        hint: Option<String>,
    },

    /// The catalog file extension maps to no known format.
    #[error("Unsupported catalog format: {extension}")]
    UnsupportedFormat { extension: String },

    /// A deployment setting has an unusable value.
    #[error("Invalid setting {key}: {message}")]
    InvalidSetting { key: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A TOML parsing error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
