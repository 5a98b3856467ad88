// Host-side checks for the DOM contract and tuning constants.
// The main crate is wasm-only, so the selector table is included directly.

#![allow(dead_code)]
mod dom_contract {
    include!("../src/constants.rs");
}

use dom_contract::*;
use site_core::constants::*;

#[test]
fn selectors_are_well_formed() {
    assert!(NAVBAR_SELECTOR.starts_with('.'));
    assert!(STATS_SECTION_SELECTOR.starts_with('.'));
    assert!(STAT_NUMBER_SELECTOR.starts_with('.'));
    assert!(HERO_LOADING_TEXT_SELECTOR.starts_with('.'));
    let cards: Vec<_> = REVEAL_CARD_SELECTOR.split(',').map(str::trim).collect();
    assert_eq!(cards, vec![".project-card", ".team-card"]);
    // ids are looked up with getElementById, so no leading '#'
    assert!(!HERO_CONTAINER_ID.starts_with('#'));
    assert!(!HERO_LOADING_ID.starts_with('#'));
    assert!(REVEAL_KEY_ATTR.starts_with("data-"));
}

#[test]
fn model_url_is_page_relative_stl() {
    assert!(!HERO_MODEL_URL.starts_with('/'));
    assert!(HERO_MODEL_URL.to_ascii_lowercase().ends_with(".stl"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tuning_constants_have_logical_relationships() {
    assert!(CONTROLS_MIN_DISTANCE < CONTROLS_MAX_DISTANCE);
    let eye = CAMERA_POSITION;
    let d = (eye[0] * eye[0] + eye[1] * eye[1] + eye[2] * eye[2]).sqrt();
    assert!(d >= CONTROLS_MIN_DISTANCE && d <= CONTROLS_MAX_DISTANCE);
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CONTROLS_DAMPING_FACTOR > 0.0 && CONTROLS_DAMPING_FACTOR < 1.0);

    // the model and the whole shadow-casting area fit inside the key light frustum
    assert!(MODEL_TARGET_SIZE < KEY_SHADOW_HALF_EXTENT);
    assert!(KEY_SHADOW_NEAR < KEY_SHADOW_FAR);
    let key = KEY_LIGHT_POSITION;
    let key_d = (key[0] * key[0] + key[1] * key[1] + key[2] * key[2]).sqrt();
    assert!(key_d > KEY_SHADOW_NEAR && key_d < KEY_SHADOW_FAR);

    assert!(BIG_STAR_SIZE > SMALL_STAR_SIZE);
    assert!(BIG_STAR_COUNT < SMALL_STAR_COUNT);
    assert_eq!(COUNTER_DURATION_MS % COUNTER_TICK_MS, 0);
    assert!(REVEAL_THRESHOLD < COUNTER_SECTION_THRESHOLD);
}

#[test]
fn hex_colours_unpack_to_unit_rgb() {
    assert_eq!(rgb_from_hex(0xffffff), [1.0, 1.0, 1.0]);
    assert_eq!(rgb_from_hex(0x000000), [0.0, 0.0, 0.0]);
    let gold = rgb_from_hex(BIG_STAR_COLOR);
    assert!((gold[0] - 212.0 / 255.0).abs() < 1e-6);
    assert!((gold[2] - 55.0 / 255.0).abs() < 1e-6);
}

#[test]
fn key_light_shadow_projection_contains_the_model() {
    let (_, lights) = site_core::default_rig();
    let vp = lights[0].shadow_view_projection().unwrap();
    for corner in [
        glam::Vec3::splat(2.5),
        glam::Vec3::splat(-2.5),
        glam::Vec3::new(2.5, -2.5, 2.5),
    ] {
        let ndc = vp.project_point3(corner);
        assert!(ndc.x.abs() < 1.0 && ndc.y.abs() < 1.0, "{:?}", ndc);
        assert!(ndc.z > 0.0 && ndc.z < 1.0, "{:?}", ndc);
    }
    assert!(lights[1].shadow_view_projection().is_none());
}
