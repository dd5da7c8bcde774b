//! The producer adapter.
//!
//! Binds one producer handle at a time and turns producer replacement,
//! trim changes and position updates into notifications. Rebinding fires a
//! single coarse `producer_changed`; in and out points additionally get
//! their own events so trim UIs can react without a full refresh.
//!
//! The adapter lives on one thread (the UI thread). Listeners run
//! synchronously inside the call that triggered them.

use crossbeam_channel::Receiver;
use std::sync::Arc;
use tracing::{debug, trace};

use clipview_core::{AudioLevels, ProducerHandle, Profile};

use crate::signal::{AdapterEvent, ConnectionId, EventFeed, Signal};
use crate::view::ProducerView;

/// Change-notifying view of a shared producer.
#[derive(Debug, Default)]
pub struct ProducerAdapter {
    view: ProducerView,
    position: i32,
    /// Last in/out values announced through the fine-grained signals.
    observed_in: i32,
    observed_out: i32,
    producer_changed: Signal<ProducerView>,
    position_changed: Signal<i32>,
    seeked: Signal<i32>,
    in_changed: Signal<i32>,
    out_changed: Signal<i32>,
    audio_levels_changed: Signal<ProducerView>,
    feed: EventFeed,
}

impl ProducerAdapter {
    /// Create an adapter with no producer, using the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter with no producer for the given output profile.
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            view: ProducerView::new(ProducerHandle::empty(), profile),
            ..Self::default()
        }
    }

    // ── Producer binding ───────────────────────────────────────

    /// Rebind to `producer`, which may be empty or invalid.
    ///
    /// Always emits exactly one `producer_changed`, even when rebinding the
    /// same producer. In/out events follow only for values that differ from
    /// the last ones announced. Position is left untouched.
    pub fn set_producer(&mut self, producer: ProducerHandle) {
        let same = self.view.handle().same_producer(&producer);
        self.view.replace_handle(producer);
        debug!(
            valid = self.view.is_valid(),
            same,
            resource = %self.view.resource(),
            "Producer bound"
        );

        self.producer_changed.emit(&self.view);
        self.feed.publish(AdapterEvent::ProducerChanged);
        self.sync_trim();
    }

    /// Detach the current producer.
    pub fn clear_producer(&mut self) {
        self.set_producer(ProducerHandle::empty());
    }

    /// The bound handle.
    pub fn producer(&self) -> &ProducerHandle {
        self.view.handle()
    }

    /// Derived view of the bound producer.
    pub fn view(&self) -> &ProducerView {
        &self.view
    }

    /// Re-read in/out after the engine trimmed the shared producer.
    pub fn notify_trim_changed(&mut self) {
        debug!("Trim change reported");
        self.sync_trim();
    }

    /// Announce that the producer finished computing its audio levels.
    pub fn notify_audio_levels_ready(&mut self) {
        debug!(frames = self.view.audio_levels().frame_count(), "Audio levels ready");
        self.audio_levels_changed.emit(&self.view);
        self.feed.publish(AdapterEvent::AudioLevelsChanged);
    }

    fn sync_trim(&mut self) {
        let in_point = self.view.in_point();
        if in_point != self.observed_in {
            self.observed_in = in_point;
            self.in_changed.emit(&in_point);
            self.feed.publish(AdapterEvent::InChanged(in_point));
        }

        let out_point = self.view.out_point();
        if out_point != self.observed_out {
            self.observed_out = out_point;
            self.out_changed.emit(&out_point);
            self.feed.publish(AdapterEvent::OutChanged(out_point));
        }
    }

    // ── Position ───────────────────────────────────────────────

    /// Adapter-local frame index.
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Update the displayed position without moving playback.
    ///
    /// No range check is made; bounds belong to the playback engine.
    pub fn set_position(&mut self, position: i32) {
        self.position = position;
        trace!(position, "Position updated");
        self.position_changed.emit(&position);
        self.feed.publish(AdapterEvent::PositionChanged(position));
    }

    /// Update the position and ask playback to move there.
    pub fn seek(&mut self, position: i32) {
        self.set_position(position);
        trace!(position, "Seek requested");
        self.seeked.emit(&position);
        self.feed.publish(AdapterEvent::Seeked(position));
    }

    // ── Derived properties ─────────────────────────────────────

    pub fn is_valid(&self) -> bool {
        self.view.is_valid()
    }

    pub fn in_point(&self) -> i32 {
        self.view.in_point()
    }

    pub fn out_point(&self) -> i32 {
        self.view.out_point()
    }

    pub fn duration(&self) -> i32 {
        self.view.duration()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.view.aspect_ratio()
    }

    pub fn resource(&self) -> String {
        self.view.resource()
    }

    pub fn service_name(&self) -> String {
        self.view.service_name()
    }

    pub fn cache_key(&self) -> String {
        self.view.cache_key()
    }

    pub fn display_name(&self) -> String {
        self.view.display_name()
    }

    pub fn audio_levels(&self) -> Arc<AudioLevels> {
        self.view.audio_levels()
    }

    pub fn fade_in_length(&self) -> i32 {
        self.view.fade_in_length()
    }

    pub fn fade_out_length(&self) -> i32 {
        self.view.fade_out_length()
    }

    pub fn playback_speed(&self) -> f64 {
        self.view.playback_speed()
    }

    // ── Listeners ──────────────────────────────────────────────

    /// Coarse notification after every rebind; covers all derived properties.
    pub fn on_producer_changed(
        &mut self,
        listener: impl FnMut(&ProducerView) + 'static,
    ) -> ConnectionId {
        self.producer_changed.connect(listener)
    }

    pub fn on_position_changed(&mut self, listener: impl FnMut(&i32) + 'static) -> ConnectionId {
        self.position_changed.connect(listener)
    }

    /// Imperative seek requests, for whoever drives playback.
    pub fn on_seeked(&mut self, listener: impl FnMut(&i32) + 'static) -> ConnectionId {
        self.seeked.connect(listener)
    }

    pub fn on_in_changed(&mut self, listener: impl FnMut(&i32) + 'static) -> ConnectionId {
        self.in_changed.connect(listener)
    }

    pub fn on_out_changed(&mut self, listener: impl FnMut(&i32) + 'static) -> ConnectionId {
        self.out_changed.connect(listener)
    }

    pub fn on_audio_levels_changed(
        &mut self,
        listener: impl FnMut(&ProducerView) + 'static,
    ) -> ConnectionId {
        self.audio_levels_changed.connect(listener)
    }

    /// Remove a listener from whichever signal holds it.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        self.producer_changed.disconnect(id)
            || self.position_changed.disconnect(id)
            || self.seeked.disconnect(id)
            || self.in_changed.disconnect(id)
            || self.out_changed.disconnect(id)
            || self.audio_levels_changed.disconnect(id)
    }

    /// Receive every event over a channel.
    pub fn subscribe(&mut self) -> Receiver<AdapterEvent> {
        self.feed.subscribe()
    }
}
