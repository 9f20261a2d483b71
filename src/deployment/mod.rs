//! Deployment processing subsystem.
//!
//! # Data Flow
//! ```text
//! descriptor file
//!     → Descriptor (sections)
//!     → DescriptorPipeline
//!         → ApplicationProcessor (application + web)
//!         → MessagingProcessor (subscriptions, one bulk attach)
//!         → JobsProcessor (declared jobs)
//!         → PoolingProcessor (explicit pools)
//!         → JobsPoolProcessor (default jobs pool)
//!     → DeploymentUnit
//! ```
//!
//! # Design Decisions
//! - Processors share no state; each call builds a fresh unit
//! - The first error aborts the unit, nothing partial is returned

pub mod error;
pub mod pipeline;
pub mod processors;
pub mod unit;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{unit_name_for, DescriptorPipeline};
pub use processors::DeploymentProcessor;
pub use unit::DeploymentUnit;
