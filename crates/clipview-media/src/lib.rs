//! Clipview Media - Engine-side producers
//!
//! This crate handles:
//! - `ClipProducer`, an in-memory producer with trim points, metadata and
//!   decoded samples
//! - `AudioBuffer`, the decoded samples its levels are analyzed from

pub mod clip;

pub use clip::{AudioBuffer, ClipProducer};
