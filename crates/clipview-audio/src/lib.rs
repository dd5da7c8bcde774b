//! Clipview Audio - Level analysis for waveform display
//!
//! - `analyze_levels`: reduce interleaved samples to per-frame peaks
//! - `LevelsCache`: compute-once storage owned by each producer

pub mod analysis;
pub mod cache;

pub use analysis::analyze_levels;
pub use cache::LevelsCache;
