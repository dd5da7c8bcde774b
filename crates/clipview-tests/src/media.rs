//! Integration tests for engine-side producers and profile files.

use clipview_adapter::ProducerAdapter;
use clipview_audio::analyze_levels;
use clipview_core::{Producer, ProducerHandle, Profile, PropertyKey};
use clipview_media::{AudioBuffer, ClipProducer};

#[test]
fn timewarp_producer_feeds_adapter() {
    let producer = ClipProducer::new("<producer>")
        .with_service("timewarp")
        .with_range(0, 239)
        .unwrap()
        .with_property(PropertyKey::WarpSpeed, "2.0")
        .with_property(PropertyKey::Caption, "Fast forward")
        .shared();
    let mut adapter = ProducerAdapter::new();
    adapter.set_producer(ProducerHandle::new(&producer));

    assert_eq!(adapter.duration(), 240);
    assert_eq!(adapter.playback_speed(), 2.0);
    assert_eq!(adapter.resource(), "timewarp");
    assert_eq!(adapter.display_name(), "Fast forward");
}

#[test]
fn profile_file_sets_adapter_default_aspect() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vertical.json");
    Profile::new(1080, 1920, 30, 1).save_to_file(&path).unwrap();

    let profile = Profile::load_from_file(&path).unwrap();
    let adapter = ProducerAdapter::with_profile(profile);

    assert!((adapter.aspect_ratio() - 9.0 / 16.0).abs() < 1e-12);
}

#[test]
fn producer_levels_match_direct_analysis() {
    let profile = Profile::new(1280, 720, 50, 1);
    let samples: Vec<f32> = (0..960 * 5).map(|i| ((i % 97) as f32 / 97.0) - 0.5).collect();
    let audio = AudioBuffer::new(samples.clone(), 1, 48000).unwrap();
    let producer = ClipProducer::new("ramp.wav")
        .with_profile(profile.clone())
        .with_audio(audio);

    let expected = analyze_levels(&samples, 1, profile.samples_per_frame(48000)).unwrap();
    let levels = producer.audio_levels().unwrap();

    assert_eq!(levels.frame_count(), 5);
    assert_eq!(*levels, expected);
}
