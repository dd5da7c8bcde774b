//! Per-frame peak level computation.
//!
//! Reduces interleaved samples to one absolute peak per channel per video
//! frame, the same min/max reduction a waveform view does per pixel.

use clipview_core::{AudioLevels, ClipviewError, Result};

/// Compute audio levels from interleaved `f32` samples.
///
/// `channels` — interleaved channel count.
/// `samples_per_frame` — samples per channel in one video frame.
///
/// A trailing partial frame is analyzed like a full one. Peaks are clamped
/// to `[0, 1]`.
pub fn analyze_levels(
    samples: &[f32],
    channels: usize,
    samples_per_frame: usize,
) -> Result<AudioLevels> {
    if channels == 0 {
        return Err(ClipviewError::InvalidParameter(
            "channel count must be non-zero".into(),
        ));
    }
    if samples_per_frame == 0 {
        return Err(ClipviewError::InvalidParameter(
            "samples per frame must be non-zero".into(),
        ));
    }
    if samples.is_empty() {
        return Ok(AudioLevels::new(channels, Vec::new()));
    }

    let block = samples_per_frame * channels;
    let num_frames = samples.len().div_ceil(block);
    let mut values = Vec::with_capacity(num_frames * channels);

    for chunk in samples.chunks(block) {
        let mut peaks = vec![0.0f32; channels];
        for (i, &s) in chunk.iter().enumerate() {
            let level = s.abs();
            let peak = &mut peaks[i % channels];
            if level > *peak {
                *peak = level;
            }
        }
        values.extend(peaks.into_iter().map(|p| p.min(1.0)));
    }

    Ok(AudioLevels::new(channels, values))
}
