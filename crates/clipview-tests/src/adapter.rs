//! Integration tests for the producer adapter.
//!
//! Exercises clipview-adapter against producers built by clipview-media.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use clipview_adapter::{AdapterEvent, ProducerAdapter};
use clipview_core::{ProducerHandle, Profile, PropertyKey};
use clipview_media::{AudioBuffer, ClipProducer};
use proptest::prelude::*;

// ── Helpers ────────────────────────────────────────────────────

fn interview() -> Arc<ClipProducer> {
    ClipProducer::new("/media/day1/interview.mov")
        .with_range(10, 99)
        .unwrap()
        .with_service("avformat")
        .with_property(PropertyKey::Hash, "9b1c4e")
        .with_property(PropertyKey::AspectRatio, "4:3")
        .with_property(PropertyKey::FadeIn, "12")
        .with_property(PropertyKey::FadeOut, "24")
        .shared()
}

fn broll() -> Arc<ClipProducer> {
    ClipProducer::new("/media/day2/broll.mp4")
        .with_range(0, 49)
        .unwrap()
        .with_service("avformat")
        .with_property(PropertyKey::Caption, "City B-roll")
        .shared()
}

fn count_events(adapter: &mut ProducerAdapter) -> Rc<RefCell<usize>> {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    adapter.on_producer_changed(move |_| *sink.borrow_mut() += 1);
    count
}

// ── Defaults ───────────────────────────────────────────────────

#[test]
fn unattached_adapter_reads_defaults() {
    let adapter = ProducerAdapter::new();
    assert_eq!(adapter.in_point(), 0);
    assert_eq!(adapter.out_point(), 0);
    assert_eq!(adapter.duration(), 0);
    assert_eq!(adapter.resource(), "");
    assert_eq!(adapter.service_name(), "");
    assert_eq!(adapter.cache_key(), "");
    assert_eq!(adapter.display_name(), "");
    assert!(adapter.audio_levels().is_empty());
    assert_eq!(adapter.fade_in_length(), 0);
    assert_eq!(adapter.fade_out_length(), 0);
    assert_eq!(adapter.aspect_ratio(), Profile::default().display_aspect_ratio());
}

// ── Binding ────────────────────────────────────────────────────

#[test]
fn attach_then_detach_scenario() {
    let producer = interview();
    let mut adapter = ProducerAdapter::new();

    adapter.set_producer(ProducerHandle::new(&producer));
    assert_eq!(adapter.duration(), 90);

    adapter.set_producer(ProducerHandle::empty());
    assert_eq!(adapter.duration(), 0);
    assert_eq!(adapter.in_point(), 0);
    assert_eq!(adapter.out_point(), 0);
}

#[test]
fn attached_producer_properties_surface() {
    let producer = interview();
    let mut adapter = ProducerAdapter::new();
    adapter.set_producer(ProducerHandle::new(&producer));

    assert_eq!(adapter.resource(), "/media/day1/interview.mov");
    assert_eq!(adapter.service_name(), "avformat");
    assert_eq!(adapter.cache_key(), "9b1c4e");
    assert_eq!(adapter.display_name(), "interview.mov");
    assert!((adapter.aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
    assert_eq!(adapter.fade_in_length(), 12);
    assert_eq!(adapter.fade_out_length(), 24);
    assert_eq!(adapter.playback_speed(), 1.0);
}

#[test]
fn rebinding_shows_no_trace_of_previous_producer() {
    let first = interview();
    let second = broll();
    let mut adapter = ProducerAdapter::new();

    adapter.set_producer(ProducerHandle::new(&first));
    adapter.set_producer(ProducerHandle::new(&second));

    assert_eq!(adapter.in_point(), 0);
    assert_eq!(adapter.out_point(), 49);
    assert_eq!(adapter.duration(), 50);
    assert_eq!(adapter.resource(), "/media/day2/broll.mp4");
    assert_eq!(adapter.display_name(), "City B-roll");
    assert_eq!(adapter.cache_key(), "");
    assert_eq!(adapter.fade_in_length(), 0);
    assert_eq!(adapter.aspect_ratio(), Profile::default().display_aspect_ratio());
}

#[test]
fn rebinding_same_producer_is_idempotent() {
    let producer = interview();
    let mut adapter = ProducerAdapter::new();
    let count = count_events(&mut adapter);

    adapter.set_producer(ProducerHandle::new(&producer));
    let before = (adapter.in_point(), adapter.out_point(), adapter.display_name());
    let rx = adapter.subscribe();
    adapter.set_producer(ProducerHandle::new(&producer));

    assert_eq!(*count.borrow(), 2);
    assert_eq!(
        (adapter.in_point(), adapter.out_point(), adapter.display_name()),
        before
    );
    let events: Vec<AdapterEvent> = rx.try_iter().collect();
    assert_eq!(events, vec![AdapterEvent::ProducerChanged]);
}

#[test]
fn consecutive_rebinds_emit_one_coarse_event_each() {
    let first = interview();
    let second = broll();
    let mut adapter = ProducerAdapter::new();
    let count = count_events(&mut adapter);
    let rx = adapter.subscribe();

    adapter.set_producer(ProducerHandle::new(&first));
    adapter.set_producer(ProducerHandle::new(&second));

    assert_eq!(*count.borrow(), 2);
    let events: Vec<AdapterEvent> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            AdapterEvent::ProducerChanged,
            AdapterEvent::InChanged(10),
            AdapterEvent::OutChanged(99),
            AdapterEvent::ProducerChanged,
            AdapterEvent::InChanged(0),
            AdapterEvent::OutChanged(49),
        ]
    );
}

#[test]
fn producer_changed_listener_reads_new_producer() {
    let first = interview();
    let second = broll();
    let mut adapter = ProducerAdapter::new();
    let names = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&names);
    adapter.on_producer_changed(move |view| sink.borrow_mut().push(view.display_name()));

    adapter.set_producer(ProducerHandle::new(&first));
    adapter.set_producer(ProducerHandle::new(&second));

    assert_eq!(*names.borrow(), vec!["interview.mov", "City B-roll"]);
}

// ── Lifetime ───────────────────────────────────────────────────

#[test]
fn adapter_does_not_keep_producer_alive() {
    let producer = interview();
    let mut adapter = ProducerAdapter::new();
    adapter.set_producer(ProducerHandle::new(&producer));
    assert_eq!(Arc::strong_count(&producer), 1);

    drop(producer);
    assert!(!adapter.is_valid());
    assert_eq!(adapter.duration(), 0);
    assert_eq!(adapter.resource(), "");
}

#[test]
fn closed_producer_reads_defaults() {
    let producer = interview();
    let mut adapter = ProducerAdapter::new();
    adapter.set_producer(ProducerHandle::new(&producer));

    producer.close();

    assert!(!adapter.is_valid());
    assert_eq!(adapter.duration(), 0);
    assert_eq!(adapter.cache_key(), "");
}

// ── Trim ───────────────────────────────────────────────────────

#[test]
fn engine_trim_reaches_fine_grained_listeners() {
    let producer = interview();
    let mut adapter = ProducerAdapter::new();
    adapter.set_producer(ProducerHandle::new(&producer));
    let coarse = count_events(&mut adapter);
    let outs = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&outs);
    adapter.on_out_changed(move |out| sink.borrow_mut().push(*out));

    producer.set_in_and_out(10, 59).unwrap();
    adapter.notify_trim_changed();

    assert_eq!(*outs.borrow(), vec![59]);
    assert_eq!(*coarse.borrow(), 0);
    assert_eq!(adapter.duration(), 50);
}

#[test]
fn full_range_duration_saturates() {
    let producer = ClipProducer::new("long.mov")
        .with_range(0, i32::MAX)
        .unwrap()
        .shared();
    let mut adapter = ProducerAdapter::new();
    adapter.set_producer(ProducerHandle::new(&producer));
    assert_eq!(adapter.duration(), i32::MAX);

    producer.set_property(PropertyKey::FilterIn, "-2147483648");
    producer.set_property(PropertyKey::FilterOut, "10");
    assert_eq!(adapter.in_point(), i32::MIN);
    assert_eq!(adapter.duration(), i32::MAX);
}

// ── Position ───────────────────────────────────────────────────

#[test]
fn set_position_and_seek_keep_position_consistent() {
    let producer = interview();
    let mut adapter = ProducerAdapter::new();
    adapter.set_producer(ProducerHandle::new(&producer));
    let rx = adapter.subscribe();

    adapter.set_position(5);
    assert_eq!(adapter.position(), 5);
    adapter.seek(7);
    assert_eq!(adapter.position(), 7);

    let events: Vec<AdapterEvent> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            AdapterEvent::PositionChanged(5),
            AdapterEvent::PositionChanged(7),
            AdapterEvent::Seeked(7),
        ]
    );
}

#[test]
fn position_survives_rebinding() {
    let mut adapter = ProducerAdapter::new();
    adapter.seek(33);
    let producer = broll();
    adapter.set_producer(ProducerHandle::new(&producer));
    adapter.clear_producer();
    assert_eq!(adapter.position(), 33);
}

// ── Audio levels ───────────────────────────────────────────────

#[test]
fn audio_levels_belong_to_each_producer() {
    // 4 frames of loud stereo, 2 frames of quiet mono at 25 fps / 48 kHz
    let loud = AudioBuffer::new(vec![0.9f32; 1920 * 2 * 4], 2, 48000).unwrap();
    let quiet = AudioBuffer::new(vec![0.1f32; 1920 * 2], 1, 48000).unwrap();
    let first = ClipProducer::new("loud.wav").with_audio(loud).shared();
    let second = ClipProducer::new("quiet.wav").with_audio(quiet).shared();
    let mut adapter = ProducerAdapter::new();

    adapter.set_producer(ProducerHandle::new(&first));
    let levels = adapter.audio_levels();
    assert_eq!((levels.frame_count(), levels.channels()), (4, 2));
    assert!(Arc::ptr_eq(&levels, &adapter.audio_levels()));

    adapter.set_producer(ProducerHandle::new(&second));
    assert!(!second.audio_levels_computed());
    let levels = adapter.audio_levels();
    assert_eq!((levels.frame_count(), levels.channels()), (2, 1));
    assert!((levels.peak() - 0.1).abs() < 1e-6);
    assert!(first.audio_levels_computed());
}

// ── Properties ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn duration_matches_trim(in_point in 0i32..100_000, len in 0i32..100_000) {
        let out_point = in_point + len;
        let producer = ClipProducer::new("p.mov")
            .with_range(in_point, out_point)
            .unwrap()
            .shared();
        let mut adapter = ProducerAdapter::new();
        adapter.set_producer(ProducerHandle::new(&producer));

        prop_assert_eq!(adapter.duration(), adapter.out_point() - adapter.in_point() + 1);
        prop_assert_eq!(adapter.duration(), len + 1);
    }

    #[test]
    fn position_is_passed_through(position in any::<i32>()) {
        let mut adapter = ProducerAdapter::new();
        adapter.seek(position);
        prop_assert_eq!(adapter.position(), position);
    }
}
