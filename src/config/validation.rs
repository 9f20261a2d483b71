//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (poll interval > 0, known log levels)
//! - Reject empty section and pool names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ToolConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::ToolConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("deployment.messaging_section must not be empty")]
    EmptyMessagingSection,

    #[error("deployment.jobs_pool_name must not be empty")]
    EmptyJobsPoolName,

    #[error("watch.poll_interval_secs must be greater than zero")]
    ZeroPollInterval,
}

/// Validate `config`, collecting every problem found.
pub fn validate_config(config: &ToolConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.logging.level.clone()));
    }
    if config.deployment.messaging_section.trim().is_empty() {
        errors.push(ValidationError::EmptyMessagingSection);
    }
    if config.deployment.jobs_pool_name.trim().is_empty() {
        errors.push(ValidationError::EmptyJobsPoolName);
    }
    if config.watch.poll_interval_secs == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ToolConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = ToolConfig::default();
        config.logging.level = "loud".into();
        config.deployment.jobs_pool_name = " ".into();
        config.watch.poll_interval_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownLogLevel("loud".into()),
                ValidationError::EmptyJobsPoolName,
                ValidationError::ZeroPollInterval,
            ]
        );
    }
}
