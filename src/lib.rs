//! Deployment descriptor normalization library.
//!
//! Turns declarative YAML deployment descriptors into canonical in-memory
//! metadata: message subscriptions, runtime pool specs and the application
//! descriptor.

pub mod config;
pub mod deployment;
pub mod descriptor;
pub mod messaging;
pub mod observability;
pub mod pools;

pub use config::schema::ToolConfig;
pub use deployment::{DeploymentUnit, DescriptorPipeline};
pub use descriptor::Descriptor;
pub use messaging::{parse, Subscription};
pub use pools::{ensure_pool, PoolSpec};
