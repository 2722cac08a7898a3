use super::*;

fn tp(s: &str) -> TriggerPoint {
    TriggerPoint::parse(s).unwrap()
}

#[test]
fn keywords_and_percentages_parse() {
    let p = tp("top 85%");
    assert_eq!(p.element, Anchor::fraction(0.0));
    assert_eq!(p.viewport, Anchor::fraction(0.85));

    let p = tp("center bottom");
    assert_eq!(p.element, Anchor::fraction(0.5));
    assert_eq!(p.viewport, Anchor::fraction(1.0));
}

#[test]
fn pixel_lengths_and_relative_offsets_parse() {
    let p = tp("top+=40 120px");
    assert_eq!(
        p.element,
        Anchor {
            fraction: 0.0,
            offset_px: 40.0
        }
    );
    assert_eq!(
        p.viewport,
        Anchor {
            fraction: 0.0,
            offset_px: 120.0
        }
    );

    let p = tp("bottom-=10% 50");
    assert!((p.element.fraction - 0.9).abs() < 1e-12);
    assert_eq!(p.viewport.offset_px, 50.0);
}

#[test]
fn malformed_points_are_configuration_errors() {
    for bad in ["", "top", "top 85% extra", "middle 50%", "top abc%"] {
        let err = TriggerPoint::parse(bad).unwrap_err();
        assert!(err.is_configuration(), "{bad:?} -> {err}");
    }
}

#[test]
fn serde_round_trips_through_text() {
    let p: TriggerPoint = serde_json::from_str("\"top   90%\"").unwrap();
    assert_eq!(p.as_str(), "top 90%");
    assert_eq!(serde_json::to_string(&p).unwrap(), "\"top 90%\"");
    assert!(serde_json::from_str::<TriggerPoint>("\"nowhere\"").is_err());
}

#[test]
fn order_check_rejects_reversed_windows() {
    assert!(check_order(&tp("top 85%"), &tp("top 30%")).is_ok());
    assert!(check_order(&tp("top 30%"), &tp("top 85%")).is_err());
    assert!(check_order(&tp("top 50%"), &tp("top 50%")).is_err());
    assert!(check_order(&tp("bottom 50%"), &tp("top 50%")).is_err());
    assert!(check_order(&tp("top 80%"), &tp("bottom 80%")).is_ok());
}

#[test]
fn span_resolves_against_geometry() {
    // Element at y=1000, 400 tall; viewport 800 tall.
    let bounds = Rect::new(0.0, 1000.0, 1200.0, 1400.0);
    let span = ScrollSpan::resolve(&tp("top 90%"), &tp("top 40%"), bounds, 800.0).unwrap();
    assert_eq!(span.start, 1000.0 - 720.0);
    assert_eq!(span.end, 1000.0 - 320.0);

    assert_eq!(span.progress(0.0).get(), 0.0);
    assert_eq!(span.progress(480.0).get(), 0.5);
    assert_eq!(span.progress(5000.0).get(), 1.0);
    assert!(!span.entered(279.0));
    assert!(span.entered(280.0));
}

#[test]
fn span_rejects_end_before_start_for_this_geometry() {
    // "bottom 100%" is reached after "top 10%" only when the element is shorter
    // than 90% of the viewport.
    let tall = Rect::new(0.0, 0.0, 100.0, 2000.0);
    let err =
        ScrollSpan::resolve(&tp("bottom 100%"), &tp("top 10%"), tall, 800.0).unwrap_err();
    assert!(err.is_configuration());

    let short = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(ScrollSpan::resolve(&tp("bottom 100%"), &tp("top 10%"), short, 800.0).is_ok());
}
