use super::*;

use crate::{
    animation::ease::Ease, foundation::core::Rect, headless::HeadlessDocument,
    reveal::presentation::SectionOptions,
};

fn doc_with_target() -> (HeadlessDocument, NodeId) {
    let mut doc = HeadlessDocument::new(800.0).unwrap();
    let root = doc.root();
    // Starts 1000px down: "top 85%" at scroll 320, "top 30%" at scroll 760.
    let target = doc.add_element(root, Rect::new(0.0, 1000.0, 1200.0, 1600.0));
    (doc, target)
}

fn attached(config: RevealConfig) -> (HeadlessDocument, NodeId, RevealBinding) {
    let (mut doc, target) = doc_with_target();
    let mut b = RevealBinding::new(BindingId(7), target, config, Presentation::Plain);
    b.attach(&mut doc).unwrap();
    (doc, target, b)
}

fn pump(doc: &mut HeadlessDocument, b: &mut RevealBinding, now: f64) {
    for (owner, handle) in doc.take_frames() {
        assert_eq!(owner, b.id());
        b.on_frame(doc, handle, now);
    }
}

#[test]
fn attach_writes_start_state_before_any_scroll() {
    let (doc, target, b) = attached(RevealConfig::default());
    assert_eq!(b.lifecycle(), Lifecycle::Observing);
    assert_eq!(doc.style(target, "filter"), Some("blur(15px) brightness(0.7)"));
    assert_eq!(doc.style(target, "opacity"), Some("0.6"));
    assert_eq!(doc.observers_for(b.id()), 1);
    assert_eq!(doc.pending_frames_for(b.id()), 1);
}

#[test]
fn attach_twice_is_rejected() {
    let (mut doc, _, mut b) = attached(RevealConfig::default());
    assert!(b.attach(&mut doc).unwrap_err().is_configuration());
}

#[test]
fn unattached_target_is_a_configuration_error() {
    let (mut doc, target) = doc_with_target();
    doc.disconnect(target);
    let mut b = RevealBinding::new(
        BindingId(0),
        target,
        RevealConfig::default(),
        Presentation::Plain,
    );
    assert!(b.attach(&mut doc).unwrap_err().is_configuration());
    assert_eq!(doc.observer_count(), 0);
}

#[test]
fn scroll_events_coalesce_into_one_frame() {
    let (mut doc, target, mut b) = attached(RevealConfig::default());
    pump(&mut doc, &mut b, 0.0);

    doc.scroll_to(400.0);
    b.on_scroll(&mut doc);
    doc.scroll_to(540.0);
    b.on_scroll(&mut doc);
    b.on_scroll(&mut doc);
    assert_eq!(doc.pending_frames_for(b.id()), 1);
    assert_eq!(b.stats().scroll_events, 3);

    pump(&mut doc, &mut b, 0.016);
    // Latest position wins: (540 - 320) / 440 = 0.5.
    assert_eq!(doc.style(target, "filter"), Some("blur(7.5px) brightness(0.85)"));
    assert_eq!(doc.style(target, "opacity"), Some("0.8"));
}

#[test]
fn stale_frames_are_discarded() {
    let (mut doc, target, mut b) = attached(RevealConfig::default());
    pump(&mut doc, &mut b, 0.0);
    let before = b.stats().frames_applied;

    doc.scroll_to(2000.0);
    b.on_frame(&mut doc, FrameHandle(999), 0.1);
    assert_eq!(b.stats().stale_frames, 1);
    assert_eq!(b.stats().frames_applied, before);
    assert_eq!(doc.style(target, "opacity"), Some("0.6"));
}

#[test]
fn detach_is_idempotent_and_cancels_everything() {
    let (mut doc, _, mut b) = attached(RevealConfig::default());
    doc.scroll_to(500.0);
    b.on_scroll(&mut doc);
    b.detach(&mut doc);
    assert_eq!(b.lifecycle(), Lifecycle::Detached);
    assert_eq!(doc.pending_frames(), 0);
    assert_eq!(doc.observer_count(), 0);

    let writes = doc.writes().len();
    b.detach(&mut doc);
    b.on_scroll(&mut doc);
    assert_eq!(doc.writes().len(), writes);
    assert_eq!(doc.pending_frames(), 0);
}

#[test]
fn reduced_motion_reveals_without_observer() {
    let cfg = RevealConfig {
        reduced_motion: true,
        ..RevealConfig::default()
    };
    let (mut doc, target, mut b) = attached(cfg);
    assert_eq!(b.lifecycle(), Lifecycle::Settled(SettleReason::ReducedMotion));
    assert_eq!(doc.observer_count(), 0);
    assert_eq!(doc.pending_frames(), 0);
    assert_eq!(doc.style(target, "filter"), Some("blur(0px) brightness(1)"));
    assert_eq!(doc.style(target, "opacity"), Some("1"));

    b.on_scroll(&mut doc);
    assert_eq!(b.stats().scroll_events, 0);
}

#[test]
fn missing_scroll_primitive_falls_back_to_end_state() {
    let (mut doc, target) = doc_with_target();
    doc.set_scroll_observation(false);
    let mut b = RevealBinding::new(
        BindingId(1),
        target,
        RevealConfig::section(),
        Presentation::Section(SectionOptions::default()),
    );
    b.attach(&mut doc).unwrap();
    assert_eq!(
        b.lifecycle(),
        Lifecycle::Settled(SettleReason::EnvironmentUnavailable)
    );
    assert_eq!(doc.style(target, "opacity"), Some("1"));
    let overlay = b.mounted().overlay.unwrap();
    assert_eq!(doc.style(overlay, "opacity"), Some("0"));
}

#[test]
fn frame_after_target_left_document_is_a_no_op() {
    let (mut doc, target, mut b) = attached(RevealConfig::default());
    pump(&mut doc, &mut b, 0.0);
    let writes = doc.writes().len();

    doc.scroll_to(700.0);
    b.on_scroll(&mut doc);
    doc.disconnect(target);
    pump(&mut doc, &mut b, 0.016);

    assert_eq!(doc.writes().len(), writes);
    assert_eq!(b.stats().detached_callbacks, 1);
}

#[test]
fn one_shot_plays_on_enter_and_never_reverses() {
    let cfg = RevealConfig::default().one_shot(0.5, Ease::Linear);
    let (mut doc, target, mut b) = attached(cfg);

    // Before the window: nothing plays.
    pump(&mut doc, &mut b, 0.0);
    assert_eq!(doc.pending_frames(), 0);
    assert_eq!(doc.style(target, "opacity"), Some("0.6"));

    doc.scroll_to(330.0);
    b.on_scroll(&mut doc);
    pump(&mut doc, &mut b, 1.0);
    assert_eq!(doc.style(target, "opacity"), Some("0.6"));
    assert_eq!(doc.pending_frames(), 1);

    // Scrolling back up mid-play does not reverse the animation.
    doc.scroll_to(0.0);
    b.on_scroll(&mut doc);
    pump(&mut doc, &mut b, 1.25);
    assert_eq!(doc.style(target, "opacity"), Some("0.8"));

    pump(&mut doc, &mut b, 1.5);
    assert_eq!(doc.style(target, "opacity"), Some("1"));
    assert_eq!(b.lifecycle(), Lifecycle::Settled(SettleReason::Completed));
    assert_eq!(doc.observer_count(), 0);
    assert_eq!(doc.pending_frames(), 0);
}

#[test]
fn unchanged_progress_skips_redundant_writes() {
    let (mut doc, _, mut b) = attached(RevealConfig::default());
    doc.scroll_to(500.0);
    b.on_scroll(&mut doc);
    pump(&mut doc, &mut b, 0.0);
    let writes = doc.writes().len();

    b.on_scroll(&mut doc);
    pump(&mut doc, &mut b, 0.016);
    assert_eq!(doc.writes().len(), writes);
}
