//! Observability subsystem.
//!
//! All subsystems emit structured `tracing` events with named fields
//! (`unit`, `destination`, `pool`, `section`). `logging.rs` installs the
//! subscriber once, at binary startup.

pub mod logging;
