//! Staggered fade-in bookkeeping for content cards.

use crate::constants::{REVEAL_DURATION_SEC, REVEAL_OFFSET_PX, REVEAL_STAGGER_SEC};
use fnv::FnvHashMap;

/// Inline style values written to a card.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: String,
}

impl RevealStyle {
    pub fn hidden() -> Self {
        Self {
            opacity: "0",
            transform: format!("translateY({}px)", REVEAL_OFFSET_PX),
        }
    }

    pub fn visible() -> Self {
        Self {
            opacity: "1",
            transform: "translateY(0)".to_string(),
        }
    }
}

/// CSS transition for the card at `index`, delayed by `index × stagger`.
pub fn reveal_transition(index: usize) -> String {
    let delay = format_seconds(index as f64 * REVEAL_STAGGER_SEC);
    let dur = format_seconds(REVEAL_DURATION_SEC);
    format!("opacity {dur}s ease {delay}s, transform {dur}s ease {delay}s")
}

// Shortest decimal form, so 0.30000000000000004 renders as 0.3.
fn format_seconds(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    let s = format!("{:.3}", rounded);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// First intersection: the caller writes the visible style.
    Revealed,
    /// Already visible; nothing to write.
    AlreadyRevealed,
    /// Key was never registered.
    Unknown,
}

/// Observed element set keyed by the card's registration index.
///
/// Each entry flips false → true once and is never reset.
#[derive(Debug, Default)]
pub struct RevealSet {
    revealed: FnvHashMap<u32, bool>,
}

impl RevealSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: u32) {
        self.revealed.entry(key).or_insert(false);
    }

    pub fn on_intersect(&mut self, key: u32) -> RevealOutcome {
        match self.revealed.get_mut(&key) {
            None => RevealOutcome::Unknown,
            Some(true) => RevealOutcome::AlreadyRevealed,
            Some(flag) => {
                *flag = true;
                RevealOutcome::Revealed
            }
        }
    }

    pub fn is_revealed(&self, key: u32) -> bool {
        self.revealed.get(&key).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }
}
