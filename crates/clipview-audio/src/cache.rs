//! Compute-once storage for a producer's audio levels.
//!
//! Each producer owns one cache. Analysis runs on the first request and
//! every later request returns the same shared result, so replacing a
//! producer implicitly discards its levels along with it.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

use clipview_core::{AudioLevels, Result};

/// Lazily computed, shared audio levels.
#[derive(Debug, Default)]
pub struct LevelsCache {
    levels: Mutex<Option<Arc<AudioLevels>>>,
}

impl LevelsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached levels, running `compute` on first use.
    ///
    /// The lock is held during analysis so concurrent callers never compute
    /// twice. A failed analysis is logged and left uncached.
    pub fn get_or_compute<F>(&self, compute: F) -> Option<Arc<AudioLevels>>
    where
        F: FnOnce() -> Result<AudioLevels>,
    {
        let mut slot = self.levels.lock();
        if let Some(levels) = slot.as_ref() {
            return Some(Arc::clone(levels));
        }

        match compute() {
            Ok(levels) => {
                info!(
                    frames = levels.frame_count(),
                    channels = levels.channels(),
                    "Audio levels computed"
                );
                let levels = Arc::new(levels);
                *slot = Some(Arc::clone(&levels));
                Some(levels)
            }
            Err(e) => {
                warn!(error = %e, "Audio level analysis failed");
                None
            }
        }
    }

    /// Cached levels without triggering analysis.
    pub fn get(&self) -> Option<Arc<AudioLevels>> {
        self.levels.lock().clone()
    }

    /// Store levels computed elsewhere (e.g. by a background task).
    pub fn store(&self, levels: AudioLevels) -> Arc<AudioLevels> {
        let levels = Arc::new(levels);
        *self.levels.lock() = Some(Arc::clone(&levels));
        levels
    }

    pub fn is_computed(&self) -> bool {
        self.levels.lock().is_some()
    }

    /// Drop the cached levels so the next request recomputes them.
    pub fn clear(&self) {
        self.levels.lock().take();
    }
}
