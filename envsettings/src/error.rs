//! Error types for populating settings from the environment

/// Errors that can occur when populating a settings record.
///
/// All of these are configuration or schema errors: population stops at the
/// first one and nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// An environment-backed field has no cast to convert its raw value.
    ///
    /// This is a mistake in the schema, not in the environment.
    #[error("\"{record}\" has no cast for \"{field}\"")]
    MissingCast {
        /// Name of the record type declaring the field
        record: String,
        /// Name of the field lacking a cast
        field: String,
    },

    /// The environment variable is not set and the field has no default.
    #[error("Environment variable '{var}' is required but not set (field \"{field}\")")]
    MissingValue {
        /// Name of the field being populated
        field: String,
        /// Name of the environment variable that was looked up
        var: String,
    },

    /// The raw value could not be converted into the field's type.
    #[error("Failed to convert environment variable '{var}' for field \"{field}\": {source}")]
    Conversion {
        /// Name of the field being populated
        field: String,
        /// Name of the environment variable holding the raw value
        var: String,
        /// Underlying cast failure
        source: CastError,
    },

    /// The populated values could not be turned into the record type.
    ///
    /// Occurs when a cast produces a value the field's Rust type does not
    /// accept, or when a field the environment does not back has no
    /// `#[serde(default)]`.
    #[error("Failed to construct \"{record}\": {source}")]
    Construct {
        /// Name of the record type
        record: String,
        /// Deserialization error from the record type
        source: serde_json::Error,
    },
}

impl SettingsError {
    /// Create a missing value error
    pub fn missing(field: impl Into<String>, var: impl Into<String>) -> Self {
        Self::MissingValue {
            field: field.into(),
            var: var.into(),
        }
    }
}

/// Errors raised by a single cast.
#[derive(Debug, thiserror::Error)]
pub enum CastError {
    /// A raw string could not be parsed and no fallback was configured.
    #[error("cannot parse {value:?} as {type_name}: {message}")]
    Parse {
        /// The raw string as it appeared in the environment
        value: String,
        /// Name of the target type
        type_name: &'static str,
        /// Message from the underlying parser
        message: String,
    },

    /// An already-typed value has a type the cast does not accept.
    #[error("expected {expected} value, found {found}")]
    Type {
        /// Type the cast produces
        expected: &'static str,
        /// Type of the value that was passed in
        found: &'static str,
    },

    /// The raw string is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by a user-supplied cast.
    #[error("{0}")]
    Custom(String),
}

impl CastError {
    /// Create an error from a user-supplied cast
    pub fn custom(message: impl std::fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }
}
