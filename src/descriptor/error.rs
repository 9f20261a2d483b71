//! Descriptor error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a descriptor or reading one of its sections.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The descriptor file could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The descriptor text is not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The descriptor decoded to something other than a section mapping.
    #[error("Descriptor must be a mapping of sections, found {0}")]
    NotAMapping(&'static str),

    /// A required key is absent.
    #[error("Missing required key '{section}.{key}'")]
    MissingKey { section: String, key: String },

    /// A key holds a value of the wrong type or range.
    #[error("Invalid value for '{section}.{key}': expected {expected}")]
    InvalidValue {
        section: String,
        key: String,
        expected: &'static str,
    },
}

/// Result type for descriptor operations.
pub type DescriptorResult<T> = Result<T, DescriptorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DescriptorError::MissingKey {
            section: "application".into(),
            key: "RACK_ROOT".into(),
        };
        assert_eq!(err.to_string(), "Missing required key 'application.RACK_ROOT'");

        let err = DescriptorError::NotAMapping("a list");
        assert!(err.to_string().contains("a list"));
    }
}
