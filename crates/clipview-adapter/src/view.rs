//! Derived producer properties.
//!
//! Every accessor reads the producer afresh and starts from the same guard:
//! an empty, dropped or invalid producer yields the accessor's default, so
//! callers never check validity themselves.

use std::path::Path;
use std::sync::Arc;

use clipview_core::{
    AudioLevels, Producer, ProducerExt, ProducerHandle, Profile, PropertyKey, NESTED_RESOURCE,
    TIMEWARP_SERVICE,
};

/// Read-only derived view of the currently bound producer.
#[derive(Debug, Clone, Default)]
pub struct ProducerView {
    handle: ProducerHandle,
    profile: Profile,
}

impl ProducerView {
    pub fn new(handle: ProducerHandle, profile: Profile) -> Self {
        Self { handle, profile }
    }

    pub fn handle(&self) -> &ProducerHandle {
        &self.handle
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub(crate) fn replace_handle(&mut self, handle: ProducerHandle) {
        self.handle = handle;
    }

    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    /// Run `read` against a live producer, or return `default`.
    fn guarded<T>(&self, default: T, read: impl FnOnce(&dyn Producer) -> T) -> T {
        match self.handle.upgrade() {
            Some(producer) => read(producer.as_ref()),
            None => default,
        }
    }

    /// First included frame. A timeline cut's override wins over the
    /// engine in-point so time-based effects follow the cut.
    pub fn in_point(&self) -> i32 {
        self.guarded(0, |p| p.int(PropertyKey::FilterIn).unwrap_or_else(|| p.get_in()))
    }

    /// Last included frame.
    pub fn out_point(&self) -> i32 {
        self.guarded(0, |p| p.int(PropertyKey::FilterOut).unwrap_or_else(|| p.get_out()))
    }

    /// Frames between in and out, inclusive, saturated to the `i32` range.
    pub fn duration(&self) -> i32 {
        self.guarded(0, |p| {
            let in_point = p.int(PropertyKey::FilterIn).unwrap_or_else(|| p.get_in());
            let out_point = p.int(PropertyKey::FilterOut).unwrap_or_else(|| p.get_out());
            let frames = i64::from(out_point) - i64::from(in_point) + 1;
            frames.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
        })
    }

    /// Display aspect ratio; the profile's when the producer has none.
    pub fn aspect_ratio(&self) -> f64 {
        let fallback = self.profile.display_aspect_ratio();
        self.guarded(fallback, |p| {
            [PropertyKey::ForceAspectRatio, PropertyKey::AspectRatio]
                .into_iter()
                .filter_map(|key| p.float(key))
                .find(|ratio| *ratio > 0.0)
                .unwrap_or(fallback)
        })
    }

    /// Media path. Nested producers report their service instead.
    pub fn resource(&self) -> String {
        self.guarded(String::new(), |p| {
            let resource = p.text(PropertyKey::Resource).unwrap_or_default();
            if resource == NESTED_RESOURCE {
                if let Some(service) = p.text(PropertyKey::Service) {
                    return service;
                }
            }
            resource
        })
    }

    pub fn service_name(&self) -> String {
        self.guarded(String::new(), |p| {
            p.text(PropertyKey::Service).unwrap_or_default()
        })
    }

    /// Opaque content key, surfaced as stored by the engine.
    pub fn cache_key(&self) -> String {
        self.guarded(String::new(), |p| p.text(PropertyKey::Hash).unwrap_or_default())
    }

    /// Caption, else title, else the resource's file name, else service.
    pub fn display_name(&self) -> String {
        self.guarded(String::new(), |p| {
            p.text(PropertyKey::Caption)
                .or_else(|| p.text(PropertyKey::Title))
                .or_else(|| {
                    p.text(PropertyKey::Resource)
                        .filter(|r| r != NESTED_RESOURCE)
                        .and_then(|r| title_from_resource(&r))
                })
                .or_else(|| p.text(PropertyKey::Service))
                .unwrap_or_default()
        })
    }

    /// The producer's cached levels; empty when none are available.
    pub fn audio_levels(&self) -> Arc<AudioLevels> {
        self.guarded(None, |p| p.audio_levels())
            .unwrap_or_default()
    }

    pub fn fade_in_length(&self) -> i32 {
        self.guarded(0, |p| p.int(PropertyKey::FadeIn).unwrap_or(0))
    }

    pub fn fade_out_length(&self) -> i32 {
        self.guarded(0, |p| p.int(PropertyKey::FadeOut).unwrap_or(0))
    }

    /// Speed factor; only timewarp producers change speed.
    pub fn playback_speed(&self) -> f64 {
        self.guarded(1.0, |p| {
            if p.text(PropertyKey::Service).as_deref() == Some(TIMEWARP_SERVICE) {
                p.float(PropertyKey::WarpSpeed).unwrap_or(1.0)
            } else {
                1.0
            }
        })
    }
}

/// Last path segment, for both local paths and URLs.
fn title_from_resource(resource: &str) -> Option<String> {
    let trimmed = resource.trim_end_matches(['/', '\\']);
    let segment = trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())?;
    let name = Path::new(segment)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(segment);
    Some(name.to_string())
}
