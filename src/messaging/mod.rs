//! Messaging section normalization.
//!
//! # Data Flow
//! ```text
//! messaging section (YAML text or decoded mapping)
//!     → parser.rs (decode, iterate destinations in order)
//!     → shape.rs (classify each destination value, expand)
//!     → subscription.rs (one record per handler, options via options.rs)
//!     → naming.rs (type name + load path)
//!     → Vec<Subscription>, attached to the deployment unit in one call
//! ```
//!
//! Parsing is pure and synchronous. Any error aborts the whole document.

pub mod error;
pub mod naming;
pub mod options;
pub mod parser;
pub mod shape;
pub mod subscription;

pub use error::{ParseError, ParseResult};
pub use options::HandlerOptions;
pub use parser::{parse, parse_destinations, parse_str};
pub use shape::DestinationShape;
pub use subscription::{build_subscription, Subscription};
