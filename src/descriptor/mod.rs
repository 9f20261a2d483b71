//! Deployment descriptors.
//!
//! A descriptor is one YAML file whose top-level keys are sections
//! (`application`, `web`, `messaging`, `jobs`, `pooling`). Any section may
//! also ship as its own `<section>.yml` next to the descriptor, which takes
//! precedence.

pub mod application;
pub mod error;
pub mod sections;

pub use application::AppDescriptor;
pub use error::{DescriptorError, DescriptorResult};
pub use sections::Descriptor;
