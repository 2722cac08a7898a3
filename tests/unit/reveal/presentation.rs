use super::*;

use crate::{foundation::core::Rect, headless::HeadlessDocument};

fn doc() -> (HeadlessDocument, NodeId) {
    let mut doc = HeadlessDocument::new(800.0).unwrap();
    let root = doc.root();
    let target = doc.add_element(root, Rect::new(0.0, 900.0, 1000.0, 1500.0));
    (doc, target)
}

#[test]
fn section_overlay_is_prepended_and_filled() {
    let (mut doc, target) = doc();
    let existing = doc.add_element(target, Rect::new(0.0, 900.0, 1000.0, 1000.0));
    let p = Presentation::Section(SectionOptions {
        overlay_enabled: true,
        fill: OverlayFill::fog_gradient(),
    });
    let m = p.mount(&mut doc, target).unwrap();
    let overlay = m.overlay.unwrap();
    assert_eq!(doc.children(target), vec![overlay, existing]);
    assert_eq!(
        doc.style(overlay, "background"),
        Some("linear-gradient(to bottom, rgba(0, 0, 0, 0.9), rgba(0, 0, 0, 0.35))")
    );
    assert_eq!(doc.style(overlay, "pointer-events"), Some("none"));
    assert!(doc.is_decorative(overlay));
    assert!(!doc.is_decorative(existing));

    // The overlay fills the section and paints between background and content.
    assert_eq!(doc.style(target, "position"), Some("relative"));
    assert_eq!(doc.style(overlay, "position"), Some("absolute"));
    assert_eq!(doc.style(overlay, "inset"), Some("0"));
    assert_eq!(doc.style(overlay, "z-index"), Some("0"));
    assert_eq!(doc.style(existing, "position"), Some("relative"));
    assert_eq!(doc.style(existing, "z-index"), Some("1"));
    assert_eq!(m.created, vec![overlay]);
}

#[test]
fn section_without_overlay_animates_target_only() {
    let (mut doc, target) = doc();
    let p = Presentation::Section(SectionOptions {
        overlay_enabled: false,
        ..SectionOptions::default()
    });
    let m = p.mount(&mut doc, target).unwrap();
    assert!(m.overlay.is_none());
    let plan = p.compile(target, &RevealConfig::section(), &m);
    assert_eq!(plan.tracks.len(), 1);
    assert_eq!(plan.tracks[0].role, TrackRole::Target);
}

#[test]
fn flat_fill_renders_a_color() {
    let fill = OverlayFill::Flat {
        color: Rgba::new(12, 10, 20, 0.5),
    };
    assert_eq!(fill.css(), "rgba(12, 10, 20, 0.5)");
}

#[test]
fn content_schedules_children_after_container_offset() {
    let (mut doc, target) = doc();
    let kids: Vec<NodeId> = (0..4)
        .map(|i| {
            let y = 900.0 + f64::from(i) * 100.0;
            doc.add_element(target, Rect::new(0.0, y, 1000.0, y + 80.0))
        })
        .collect();
    doc.mark(kids[0], REVEAL_CHILD_MARKER);
    doc.mark(kids[2], REVEAL_CHILD_MARKER);

    let opts = ContentOptions::default();
    let p = Presentation::Content(opts.clone());
    let m = p.mount(&mut doc, target).unwrap();
    assert_eq!(m.children, vec![kids[0], kids[2]]);

    let plan = p.compile(target, &RevealConfig::content(), &m);
    let c0 = plan.track(TrackRole::Child(0)).unwrap();
    let c1 = plan.track(TrackRole::Child(1)).unwrap();
    assert_eq!(c0.node, kids[0]);
    assert!((c0.at - 0.2).abs() < 1e-12);
    assert!((c1.at - 0.3).abs() < 1e-12);
    assert_eq!(c0.from.translate_y_px, Some(30.0));
    assert!(plan.total >= c1.end_time());

    // Container pass carries no brightness channel.
    let target_track = plan.track(TrackRole::Target).unwrap();
    assert!(target_track.from.brightness.is_none());
}

#[test]
fn image_requires_exactly_one_child() {
    let (mut doc, target) = doc();
    let p = Presentation::Image(ImageOptions::default());
    assert!(p.mount(&mut doc, target).unwrap_err().is_configuration());

    doc.add_element(target, Rect::new(0.0, 900.0, 1000.0, 1500.0));
    doc.add_element(target, Rect::new(0.0, 900.0, 1000.0, 1500.0));
    assert!(p.mount(&mut doc, target).is_err());
}

#[test]
fn image_clips_frame_and_scales_uniformly() {
    let (mut doc, target) = doc();
    let image = doc.add_element(target, Rect::new(0.0, 900.0, 1000.0, 1500.0));
    let p = Presentation::Image(ImageOptions::default());
    let m = p.mount(&mut doc, target).unwrap();
    assert_eq!(m.image, Some(image));
    assert_eq!(doc.style(target, "overflow"), Some("hidden"));
    assert_eq!(doc.style(image, "object-fit"), Some("cover"));
    assert_eq!(doc.style(image, "transform-origin"), Some("center center"));

    let plan = p.compile(target, &RevealConfig::image(), &m);
    let t = plan.track(TrackRole::Image).unwrap();
    assert_eq!(t.from.scale, Some(1.1));
    assert_eq!(t.to.scale, Some(1.0));
    assert!(t.from.brightness.is_none());
    assert!(plan.track(TrackRole::Target).is_none());
    let v = plan.track(TrackRole::Vignette).unwrap();
    assert_eq!(v.node, m.vignette.unwrap());
}

#[test]
fn text_units_skip_whitespace_in_the_stagger() {
    let (mut doc, target) = doc();
    let p = Presentation::Text(TextOptions::new("quiet  motion here", SplitMode::Words));
    let m = p.mount(&mut doc, target).unwrap();
    assert_eq!(m.units.len(), 5);
    assert_eq!(doc.text(m.units[1].0), Some("\u{a0}\u{a0}"));
    assert_eq!(doc.style(m.units[1].0, "white-space"), Some("pre"));

    let plan = p.compile(target, &RevealConfig::text(), &m);
    let units: Vec<&Track> = plan
        .tracks
        .iter()
        .filter(|t| matches!(t.role, TrackRole::Unit(_)))
        .collect();
    assert_eq!(units.len(), 3);
    assert_eq!(units[2].node, m.units[4].0);
    assert!((units[2].at - 0.06).abs() < 1e-12);
}

#[test]
fn invalid_options_are_configuration_errors() {
    let bad = [
        Presentation::Content(ContentOptions {
            stagger: -0.1,
            ..ContentOptions::default()
        }),
        Presentation::Content(ContentOptions {
            child_marker: " ".to_string(),
            ..ContentOptions::default()
        }),
        Presentation::Image(ImageOptions {
            scale_start: 0.0,
            ..ImageOptions::default()
        }),
        Presentation::Text(TextOptions {
            unit_duration: 0.0,
            ..TextOptions::default()
        }),
    ];
    for p in bad {
        assert!(p.validate().unwrap_err().is_configuration(), "{p:?}");
    }
}

#[test]
fn presentation_json_is_tagged_by_kind() {
    let p: Presentation =
        serde_json::from_str(r#"{ "kind": "text", "text": "hi there", "split": "chars" }"#)
            .unwrap();
    let Presentation::Text(o) = p else {
        panic!("expected text presentation");
    };
    assert_eq!(o.split, SplitMode::Chars);
    assert_eq!(o.stagger, 0.03);

    let p: Presentation = serde_json::from_str(r#"{ "kind": "section" }"#).unwrap();
    assert_eq!(p, Presentation::Section(SectionOptions::default()));
}
