//! Deployment pipeline errors.

use thiserror::Error;

use crate::descriptor::DescriptorError;
use crate::messaging::ParseError;

/// Errors that abort processing of a deployment unit.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A section failed to normalize.
    #[error("Section '{section}' of deployment '{unit}': {source}")]
    Parse {
        unit: String,
        section: String,
        #[source]
        source: ParseError,
    },

    /// The descriptor or one of its non-messaging sections is invalid.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
