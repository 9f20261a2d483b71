//! Tool configuration subsystem.
//!
//! # Data Flow
//! ```text
//! tool config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ToolConfig (validated, immutable)
//!
//! In watch mode:
//!     watcher.rs detects a descriptor change
//!     → DescriptorPipeline re-processes it
//!     → new DeploymentUnit sent to the consumer
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::ToolConfig;
pub use schema::DeploymentConfig;
pub use schema::LoggingConfig;
pub use schema::WatchConfig;
