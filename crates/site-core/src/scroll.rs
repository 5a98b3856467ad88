//! Scroll-driven header and hero rules.
//!
//! The web front-end feeds raw scroll positions and element metrics in and
//! writes whatever these functions return; nothing here touches the DOM.

use crate::constants::{
    HERO_FADE_FACTOR, NAV_BACKGROUND_SCROLLED, NAV_BACKGROUND_TOP, NAV_SCROLLED_THRESHOLD_PX,
};

/// Header look selected by the current scroll position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderStyle {
    Top,
    Scrolled,
}

impl HeaderStyle {
    /// No hysteresis: the same position always yields the same style.
    pub fn for_scroll(scroll_y: f64) -> Self {
        if scroll_y > NAV_SCROLLED_THRESHOLD_PX {
            HeaderStyle::Scrolled
        } else {
            HeaderStyle::Top
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            HeaderStyle::Top => NAV_BACKGROUND_TOP,
            HeaderStyle::Scrolled => NAV_BACKGROUND_SCROLLED,
        }
    }
}

/// Extract the fragment selector from an in-page anchor `href`.
///
/// Returns `None` for anything that cannot name an element (`"#"` alone or a
/// non-fragment link), which makes the click a suppressed no-op.
pub fn fragment_selector(href: &str) -> Option<&str> {
    let href = href.trim();
    if !href.starts_with('#') || href.len() < 2 {
        return None;
    }
    Some(href)
}

/// Scroll destination for a fragment target under a fixed header.
#[inline]
pub fn anchor_scroll_top(target_offset_top: f64, header_height: f64) -> f64 {
    target_offset_top - header_height
}

/// Opacity for the hero text, or `None` once the first viewport is gone.
pub fn hero_fade_opacity(scroll_y: f64, viewport_height: f64) -> Option<f64> {
    if viewport_height <= 0.0 || scroll_y >= viewport_height {
        return None;
    }
    Some(1.0 - (scroll_y / viewport_height * HERO_FADE_FACTOR))
}
