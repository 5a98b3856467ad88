// Host-side tests for the scroll rules that drive the header, anchors and hero fade.

use site_core::constants::{NAV_BACKGROUND_SCROLLED, NAV_BACKGROUND_TOP};
use site_core::scroll::*;

#[test]
fn header_is_top_up_to_and_including_threshold() {
    for y in [0.0, 50.0, 99.9, 100.0] {
        assert_eq!(HeaderStyle::for_scroll(y), HeaderStyle::Top, "y={y}");
    }
    assert_eq!(HeaderStyle::Top.background(), NAV_BACKGROUND_TOP);
}

#[test]
fn header_is_scrolled_past_threshold() {
    for y in [100.01, 101.0, 5000.0] {
        assert_eq!(HeaderStyle::for_scroll(y), HeaderStyle::Scrolled, "y={y}");
    }
    assert_eq!(HeaderStyle::Scrolled.background(), NAV_BACKGROUND_SCROLLED);
}

#[test]
fn header_toggles_back_and_forth_without_hysteresis() {
    let seq = [99.0, 101.0, 100.0, 150.0, 20.0];
    let styles: Vec<_> = seq.iter().map(|&y| HeaderStyle::for_scroll(y)).collect();
    assert_eq!(
        styles,
        vec![
            HeaderStyle::Top,
            HeaderStyle::Scrolled,
            HeaderStyle::Top,
            HeaderStyle::Scrolled,
            HeaderStyle::Top
        ]
    );
}

#[test]
fn anchor_target_subtracts_header_height() {
    assert_eq!(anchor_scroll_top(1200.0, 80.0), 1120.0);
    assert_eq!(anchor_scroll_top(40.0, 80.0), -40.0);
}

#[test]
fn fragment_selector_accepts_only_named_fragments() {
    assert_eq!(fragment_selector("#team"), Some("#team"));
    assert_eq!(fragment_selector("  #about "), Some("#about"));
    assert_eq!(fragment_selector("#"), None);
    assert_eq!(fragment_selector(""), None);
    assert_eq!(fragment_selector("/faq#x"), None);
}

#[test]
fn hero_fades_within_first_viewport_only() {
    assert_eq!(hero_fade_opacity(0.0, 800.0), Some(1.0));
    let half = hero_fade_opacity(400.0, 800.0).unwrap();
    assert!((half - 0.6).abs() < 1e-9);
    assert_eq!(hero_fade_opacity(800.0, 800.0), None);
    assert_eq!(hero_fade_opacity(1200.0, 800.0), None);
    assert_eq!(hero_fade_opacity(10.0, 0.0), None);
}
