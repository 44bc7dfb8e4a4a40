//! Logging setup for the fm binaries.
//!
//! Library crates only emit `tracing` events; this crate installs the global subscriber
//! that renders them.
mod logger;
pub use logger::*;
