//! Error types for rankdex.

use thiserror::Error;

/// Result type alias using `SearchError`.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors returned by search plugins and their configuration.
///
/// Query evaluation itself never fails: unknown fields and blank text
/// degrade to empty matches. Everything here is a problem with the inputs
/// handed to a plugin.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A numeric argument outside its defined range.
    #[error("Invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    /// A required search context field was not supplied and has no default.
    #[error("Missing required search context field: {0}")]
    MissingContextField(String),

    /// A search context value does not parse as the field's declared type.
    #[error("Invalid value for search context field {field}: expected {expected}, got {value:?}")]
    InvalidContextValue {
        field: String,
        expected: &'static str,
        value: String,
    },

    /// No plugin factory is registered for a configuration's plugin type.
    #[error("Unknown plugin type: {0}")]
    UnknownPluginType(String),

    /// Plugin configuration that cannot be used.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SearchError {
    /// Create a new invalid argument error.
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
