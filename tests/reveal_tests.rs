use site_core::reveal::*;

#[test]
fn transition_delay_is_staggered_by_index() {
    assert_eq!(
        reveal_transition(0),
        "opacity 0.6s ease 0s, transform 0.6s ease 0s"
    );
    assert_eq!(
        reveal_transition(3),
        "opacity 0.6s ease 0.3s, transform 0.6s ease 0.3s"
    );
    assert_eq!(
        reveal_transition(12),
        "opacity 0.6s ease 1.2s, transform 0.6s ease 1.2s"
    );
}

#[test]
fn hidden_and_visible_styles() {
    let hidden = RevealStyle::hidden();
    assert_eq!(hidden.opacity, "0");
    assert_eq!(hidden.transform, "translateY(30px)");
    let visible = RevealStyle::visible();
    assert_eq!(visible.opacity, "1");
    assert_eq!(visible.transform, "translateY(0)");
}

#[test]
fn each_card_reveals_exactly_once() {
    let mut set = RevealSet::new();
    for key in 0..3 {
        set.register(key);
    }
    assert_eq!(set.len(), 3);
    assert!(!set.is_revealed(1));

    assert_eq!(set.on_intersect(1), RevealOutcome::Revealed);
    assert!(set.is_revealed(1));
    for _ in 0..5 {
        assert_eq!(set.on_intersect(1), RevealOutcome::AlreadyRevealed);
    }
    assert!(!set.is_revealed(0));
    assert!(!set.is_revealed(2));
}

#[test]
fn re_registering_does_not_reset_a_revealed_card() {
    let mut set = RevealSet::new();
    set.register(7);
    set.on_intersect(7);
    set.register(7);
    assert!(set.is_revealed(7));
}

#[test]
fn unknown_keys_are_ignored() {
    let mut set = RevealSet::new();
    assert_eq!(set.on_intersect(42), RevealOutcome::Unknown);
    assert!(set.is_empty());
}
