//! Clipview Core - Foundation types for the producer adapter
//!
//! This crate provides the types shared by the engine side and the adapter:
//! - The producer contract and its non-owning handle
//! - The typed property table used to read producer metadata
//! - Output profile configuration (frame rate, display aspect)
//! - Audio level data

pub mod error;
pub mod levels;
pub mod producer;
pub mod profile;
pub mod properties;

pub use error::{ClipviewError, Result};
pub use levels::AudioLevels;
pub use producer::{Producer, ProducerHandle};
pub use profile::Profile;
pub use properties::{PropertyKey, ProducerExt, ValueKind};

/// Sentinel resource string an engine reports for producers that wrap
/// another producer rather than a file.
pub const NESTED_RESOURCE: &str = "<producer>";

/// Service name of the engine's variable-speed wrapper producer.
pub const TIMEWARP_SERVICE: &str = "timewarp";
