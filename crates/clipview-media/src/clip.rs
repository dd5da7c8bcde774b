//! In-memory producer for a media clip.
//!
//! Trim points and metadata sit behind a lock because the producer is
//! shared: the timeline trims it while UI adapters read it.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use clipview_audio::{analyze_levels, LevelsCache};
use clipview_core::{AudioLevels, ClipviewError, Producer, Profile, PropertyKey, Result};

/// Decoded interleaved audio attached to a clip.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Wrap interleaved `f32` samples.
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(ClipviewError::Audio("channel count must be non-zero".into()));
        }
        if sample_rate == 0 {
            return Err(ClipviewError::Audio("sample rate must be non-zero".into()));
        }
        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.channels as f64 / self.sample_rate as f64
    }
}

#[derive(Debug)]
struct ClipState {
    in_point: i32,
    out_point: i32,
    properties: BTreeMap<String, String>,
    valid: bool,
}

/// A media clip producer.
#[derive(Debug)]
pub struct ClipProducer {
    id: Uuid,
    profile: Profile,
    state: RwLock<ClipState>,
    audio: Option<AudioBuffer>,
    levels: LevelsCache,
}

impl ClipProducer {
    /// Create a producer for a resource with an empty range.
    pub fn new(resource: impl Into<String>) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(PropertyKey::Resource.name().to_string(), resource.into());
        Self {
            id: Uuid::new_v4(),
            profile: Profile::default(),
            state: RwLock::new(ClipState {
                in_point: 0,
                out_point: 0,
                properties,
                valid: true,
            }),
            audio: None,
            levels: LevelsCache::new(),
        }
    }

    /// Set the engine service name.
    pub fn with_service(self, service: impl Into<String>) -> Self {
        self.with_property(PropertyKey::Service, service)
    }

    /// Set the in and out points.
    pub fn with_range(self, in_point: i32, out_point: i32) -> Result<Self> {
        self.set_in_and_out(in_point, out_point)?;
        Ok(self)
    }

    /// Set a table property.
    pub fn with_property(self, key: PropertyKey, value: impl Into<String>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Profile used to split audio into frames.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Attach decoded audio.
    pub fn with_audio(mut self, audio: AudioBuffer) -> Self {
        self.audio = Some(audio);
        self.levels.clear();
        self
    }

    /// Wrap in an `Arc` for sharing with adapters.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn audio(&self) -> Option<&AudioBuffer> {
        self.audio.as_ref()
    }

    /// Trim the clip. Rejects `out_point < in_point`.
    pub fn set_in_and_out(&self, in_point: i32, out_point: i32) -> Result<()> {
        if out_point < in_point {
            return Err(ClipviewError::InvalidParameter(format!(
                "out point {out_point} precedes in point {in_point}"
            )));
        }
        let mut state = self.state.write();
        state.in_point = in_point;
        state.out_point = out_point;
        debug!(producer = %self.id, in_point, out_point, "Clip trimmed");
        Ok(())
    }

    /// Set a raw engine property.
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.state.write().properties.insert(name.into(), value.into());
    }

    /// Set a table property.
    pub fn set_property(&self, key: PropertyKey, value: impl Into<String>) {
        self.set(key.name(), value);
    }

    pub fn clear_property(&self, key: PropertyKey) {
        self.state.write().properties.remove(key.name());
    }

    /// Snapshot of all raw properties.
    pub fn properties(&self) -> BTreeMap<String, String> {
        self.state.read().properties.clone()
    }

    /// Mark the producer unusable, e.g. after its resource went away.
    pub fn close(&self) {
        self.state.write().valid = false;
        debug!(producer = %self.id, "Clip closed");
    }

    /// Whether audio levels have been analyzed yet.
    pub fn audio_levels_computed(&self) -> bool {
        self.levels.is_computed()
    }
}

impl Producer for ClipProducer {
    fn is_valid(&self) -> bool {
        self.state.read().valid
    }

    fn get_in(&self) -> i32 {
        self.state.read().in_point
    }

    fn get_out(&self) -> i32 {
        self.state.read().out_point
    }

    fn get(&self, name: &str) -> Option<String> {
        self.state.read().properties.get(name).cloned()
    }

    fn audio_levels(&self) -> Option<Arc<AudioLevels>> {
        let audio = self.audio.as_ref()?;
        self.levels.get_or_compute(|| {
            analyze_levels(
                audio.samples(),
                audio.channels() as usize,
                self.profile.samples_per_frame(audio.sample_rate()),
            )
        })
    }
}
