//! Audio level data for waveform display.
//!
//! One peak value per channel per video frame, stored frame-interleaved so
//! a timeline can draw a clip's waveform without touching samples.

use serde::{Deserialize, Serialize};

/// Per-frame, per-channel peak levels in `0.0..=1.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioLevels {
    channels: usize,
    values: Vec<f32>,
}

impl AudioLevels {
    /// Build levels from frame-interleaved values.
    ///
    /// A trailing incomplete frame is dropped so every frame has exactly
    /// `channels` values.
    pub fn new(channels: usize, mut values: Vec<f32>) -> Self {
        if channels == 0 {
            return Self::default();
        }
        let complete = values.len() - values.len() % channels;
        values.truncate(complete);
        Self { channels, values }
    }

    /// Number of audio channels per frame.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of video frames covered.
    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.values.len() / self.channels
        }
    }

    /// Levels of every channel for one frame.
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        if index >= self.frame_count() {
            return None;
        }
        let start = index * self.channels;
        Some(&self.values[start..start + self.channels])
    }

    /// Iterate frames in order.
    pub fn frames(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks_exact(self.channels.max(1))
    }

    /// All values, frame-interleaved.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Loudest value across all frames and channels.
    pub fn peak(&self) -> f32 {
        self.values.iter().copied().fold(0.0f32, f32::max)
    }
}
