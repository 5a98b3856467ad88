use glam::Vec3;
use site_core::orbit::*;

fn controls(settings: OrbitSettings) -> OrbitControls {
    OrbitControls::new(Vec3::new(12.0, 8.0, 12.0), Vec3::ZERO, settings)
}

fn still() -> OrbitSettings {
    OrbitSettings {
        auto_rotate: false,
        ..OrbitSettings::default()
    }
}

#[test]
fn spherical_round_trips_an_offset() {
    let v = Vec3::new(12.0, 8.0, 12.0);
    let s = Spherical::from_offset(v);
    assert!((s.radius - v.length()).abs() < 1e-4);
    assert!(s.to_offset().abs_diff_eq(v, 1e-4));
}

#[test]
fn idle_rig_keeps_its_eye() {
    let mut c = controls(still());
    let eye = c.update();
    assert!(eye.abs_diff_eq(Vec3::new(12.0, 8.0, 12.0), 1e-4));
}

#[test]
fn auto_rotation_orbits_at_constant_distance() {
    let mut c = controls(OrbitSettings::default());
    let start = c.spherical().theta;
    let mut eye = Vec3::ZERO;
    for _ in 0..600 {
        eye = c.update();
    }
    assert!(c.spherical().theta < start, "auto-rotate turns left (theta decreases)");
    assert!((eye.length() - Vec3::new(12.0, 8.0, 12.0).length()).abs() < 1e-3);
    assert!((eye.y - 8.0).abs() < 1e-3, "height unchanged");
}

#[test]
fn auto_rotation_angle_matches_speed() {
    let c = controls(OrbitSettings::default());
    let expected = std::f32::consts::TAU / 3600.0 * 0.5;
    assert!((c.auto_rotation_angle() - expected).abs() < 1e-9);
}

#[test]
fn damping_spreads_a_drag_over_frames_and_converges() {
    let mut c = controls(still());
    let theta0 = c.spherical().theta;
    c.rotate_left(1.0);
    c.update();
    let after_one = theta0 - c.spherical().theta;
    assert!((after_one - 0.05).abs() < 1e-5, "first frame applies damping_factor");
    for _ in 0..1000 {
        c.update();
    }
    let total = theta0 - c.spherical().theta;
    assert!((total - 1.0).abs() < 1e-3, "total={total}");
}

#[test]
fn undamped_drag_applies_immediately() {
    let mut c = controls(OrbitSettings {
        enable_damping: false,
        ..still()
    });
    let theta0 = c.spherical().theta;
    c.rotate_left(0.5);
    c.update();
    assert!((theta0 - c.spherical().theta - 0.5).abs() < 1e-5);
    c.update();
    assert!((theta0 - c.spherical().theta - 0.5).abs() < 1e-5);
}

#[test]
fn polar_angle_is_clamped() {
    let mut c = controls(OrbitSettings {
        enable_damping: false,
        ..still()
    });
    c.rotate_up(10.0);
    let eye = c.update();
    assert!(c.spherical().phi > 0.0);
    assert!(eye.y > 0.0 && eye.x.abs() < 1e-3 && eye.z.abs() < 1e-3);
}

#[test]
fn distance_is_clamped_to_range() {
    let mut near = OrbitControls::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, still());
    near.update();
    assert!((near.distance() - 5.0).abs() < 1e-5);

    let mut far = OrbitControls::new(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO, still());
    far.update();
    assert!((far.distance() - 30.0).abs() < 1e-5);
}

#[test]
fn zoom_and_pan_are_disabled_by_default() {
    let mut c = controls(still());
    let before = c.distance();
    assert!(!c.dolly(2.0));
    assert!(!c.pan(Vec3::X));
    c.update();
    assert_eq!(c.target, Vec3::ZERO);
    assert!((c.distance() - before).abs() < 1e-5);
}

#[test]
fn drag_scales_with_element_height() {
    let mut a = controls(OrbitSettings {
        enable_damping: false,
        ..still()
    });
    let theta0 = a.spherical().theta;
    a.drag(100.0, 0.0, 1000.0);
    a.update();
    let turned = theta0 - a.spherical().theta;
    assert!((turned - std::f32::consts::TAU * 0.1).abs() < 1e-4);
}
