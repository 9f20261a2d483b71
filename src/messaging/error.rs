//! Messaging section error definitions.

use thiserror::Error;

/// Errors raised while normalizing a messaging section.
///
/// Every variant aborts the parse of the whole document; no partial list of
/// subscriptions is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text could not be decoded, or did not decode to a mapping.
    #[error("Malformed messaging document: {0}")]
    MalformedDocument(String),

    /// A destination value (or an element inside it) has an unsupported shape.
    #[error("Invalid configuration for destination '{destination}': {detail}")]
    InvalidShape { destination: String, detail: String },

    /// A recognized option key holds a value of the wrong type.
    #[error("Option '{key}' of handler '{handler}' on destination '{destination}' must be {expected}")]
    InvalidOptionType {
        destination: String,
        handler: String,
        key: &'static str,
        expected: &'static str,
    },

    /// A handler identifier is empty or not a valid name.
    #[error("Empty or invalid handler name on destination '{destination}'")]
    EmptyHandlerName { destination: String },
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        ParseError::MalformedDocument(err.to_string())
    }
}

/// Result type for messaging parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Short human description of a decoded YAML value's kind.
pub(crate) fn value_kind(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
