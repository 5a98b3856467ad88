// Host-side tests for the hero viewer state machine and scene graph.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use site_core::constants::*;
use site_core::*;

fn viewer() -> HeroViewer {
    let mut rng = StdRng::seed_from_u64(7);
    HeroViewer::new(HeroConfig::default(), Viewport::new(1280, 720), &mut rng)
}

fn offset_box_stl() -> Vec<u8> {
    // Two triangles spanning x 10..14, y -2..0, z 3..4: centre (12, -1, 3.5), max dim 4.
    let facets: [[[f32; 3]; 3]; 2] = [
        [[10.0, -2.0, 3.0], [14.0, -2.0, 3.0], [10.0, 0.0, 4.0]],
        [[14.0, -2.0, 3.0], [14.0, 0.0, 4.0], [10.0, 0.0, 4.0]],
    ];
    let mut out = vec![0u8; 80];
    out.extend_from_slice(&(facets.len() as u32).to_le_bytes());
    for corners in facets {
        out.extend_from_slice(&[0u8; 12]);
        for v in corners {
            for c in v {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        out.extend_from_slice(&[0u8; 2]);
    }
    out
}

#[test]
fn new_viewer_is_scene_ready_with_stars_and_lights() {
    let v = viewer();
    assert_eq!(v.phase(), &ViewerPhase::SceneReady);
    assert!(v.scene().mesh().is_none());

    let fields = &v.scene().star_fields;
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].len(), 2000);
    assert_eq!(fields[1].len(), 200);
    assert!(fields[0].positions.iter().flatten().all(|c| c.abs() <= 150.0));
    assert!(fields[1].positions.iter().flatten().all(|c| c.abs() <= 125.0));
    assert!(fields[0].style.size_attenuation);
    assert!(fields[1].style.size_attenuation);

    let lights = &v.scene().lights;
    assert_eq!(lights.len(), 3);
    assert_eq!(lights.iter().filter(|l| l.casts_shadow()).count(), 1);
    let frustum = lights[0].shadow.unwrap();
    assert_eq!((frustum.left, frustum.right), (-30.0, 30.0));
    assert_eq!(frustum.map_size, 2048);
}

// On-screen size of an attenuated point, matching shaders/points.wgsl.
fn star_pixel_size(style: &StarStyle, depth: f32, surface_height: f32) -> f32 {
    if style.size_attenuation {
        style.size * surface_height / (2.0 * depth)
    } else {
        style.size.max(1.0)
    }
}

#[test]
fn gold_stars_render_larger_than_white_stars() {
    let v = viewer();
    let white = &v.scene().star_fields[0].style;
    let gold = &v.scene().star_fields[1].style;
    assert_eq!(gold.color, rgb_from_hex(0xd4af37));
    for depth in [20.0, 60.0, 100.0, 250.0] {
        let w = star_pixel_size(white, depth, 1080.0);
        let g = star_pixel_size(gold, depth, 1080.0);
        assert!(g > w, "depth {}: white {:.2}px gold {:.2}px", depth, w, g);
    }
}

#[test]
fn scene_lights_follow_the_config() {
    let mut config = HeroConfig::default();
    config.lights = LightRigConfig {
        ambient: AmbientLight {
            color: [0.2, 0.4, 0.6],
            intensity: 0.9,
        },
        directional: vec![DirectionalLight {
            color: [1.0, 0.0, 0.0],
            intensity: 2.0,
            position: Vec3::new(0.0, 5.0, 5.0),
            shadow: None,
        }],
    };
    let mut rng = StdRng::seed_from_u64(3);
    let v = HeroViewer::new(config, Viewport::new(800, 600), &mut rng);

    let scene = v.scene();
    assert_eq!(scene.ambient.color, [0.2, 0.4, 0.6]);
    assert_eq!(scene.ambient.intensity, 0.9);
    assert_eq!(scene.lights.len(), 1);
    assert_eq!(scene.lights[0].intensity, 2.0);
    assert!(!scene.lights[0].casts_shadow());
}

#[test]
fn default_light_config_is_the_standard_rig() {
    let rig = LightRigConfig::default();
    assert_eq!(rig.ambient.intensity, AMBIENT_INTENSITY);
    assert_eq!(rig.directional.len(), 3);
    assert_eq!(rig.directional[0].intensity, KEY_LIGHT_INTENSITY);
    assert!(rig.directional[0].casts_shadow());
}

#[test]
fn camera_starts_with_configured_projection() {
    let v = viewer();
    let cam = v.camera();
    assert!((cam.fovy_radians - 60f32.to_radians()).abs() < 1e-6);
    assert_eq!((cam.znear, cam.zfar), (0.1, 1000.0));
    assert!(cam.eye.abs_diff_eq(Vec3::new(12.0, 8.0, 12.0), 1e-5));
    assert!((cam.aspect - 1280.0 / 720.0).abs() < 1e-6);
}

#[test]
fn loaded_model_is_centred_and_scaled_to_target_size() {
    let mut v = viewer();
    v.begin_loading().unwrap();
    let node = v.on_model_bytes(&offset_box_stl()).unwrap();

    let local = node.local_bounds().unwrap();
    assert!(local.center().abs_diff_eq(Vec3::ZERO, 1e-5));
    assert!((local.max_dimension() * node.scale - MODEL_TARGET_SIZE).abs() < 1e-4);

    let world = node.world_bounds().unwrap();
    assert!(world.center().abs_diff_eq(Vec3::ZERO, 1e-4));
    assert!((world.max_dimension() - MODEL_TARGET_SIZE).abs() < 1e-3);

    assert!((node.rotation_y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert!(node.cast_shadow && node.receive_shadow);
    assert_eq!(v.phase(), &ViewerPhase::ModelReady);
}

#[test]
fn mesh_is_added_at_most_once() {
    let mut v = viewer();
    v.begin_loading().unwrap();
    v.on_model_bytes(&offset_box_stl()).unwrap();
    assert!(v.on_model_bytes(&offset_box_stl()).is_err());
    assert!(v.begin_loading().is_err());
    assert!(v.scene().mesh().is_some());
}

#[test]
fn model_cannot_arrive_before_loading_starts() {
    let mut v = viewer();
    let err = v.on_model_bytes(&offset_box_stl()).unwrap_err();
    assert!(matches!(err, ModelLoadError::Viewer(ViewerError::InvalidTransition { .. })));
    assert!(v.scene().mesh().is_none());
}

#[test]
fn load_failure_shows_fixed_message_and_adds_no_mesh() {
    let mut v = viewer();
    v.begin_loading().unwrap();
    let msg = v.on_load_failed(&ModelLoadError::Status(404));
    assert_eq!(msg, LOAD_ERROR_MESSAGE);
    assert_eq!(v.phase(), &ViewerPhase::LoadError);
    assert!(v.scene().mesh().is_none());
    assert!(v.begin_loading().is_err(), "no retry from the error state");
}

#[test]
fn bad_model_bytes_surface_as_parse_errors() {
    let mut v = viewer();
    v.begin_loading().unwrap();
    let err = v.on_model_bytes(b"not a model").unwrap_err();
    assert!(matches!(err, ModelLoadError::Parse(_)));
    v.on_load_failed(&err);
    assert!(v.scene().mesh().is_none());
}

#[test]
fn degenerate_model_is_a_fit_error() {
    let mut v = viewer();
    v.begin_loading().unwrap();
    let geom = MeshGeometry {
        vertices: vec![
            MeshVertex {
                position: [1.0, 1.0, 1.0],
                normal: [0.0, 1.0, 0.0],
            };
            3
        ],
    };
    let err = v.on_model_loaded(geom).unwrap_err();
    assert!(matches!(err, ModelLoadError::Fit(FitError::Degenerate(_))));
    assert_eq!(v.phase(), &ViewerPhase::LoadError);
}

#[test]
fn progress_readout_is_rounded_percentage() {
    let mut v = viewer();
    assert_eq!(v.on_progress(1.0, 2.0), None, "not loading yet");
    v.begin_loading().unwrap();
    assert_eq!(
        v.on_progress(333.0, 1000.0).as_deref(),
        Some("Cargando Rover... 33%")
    );
    assert_eq!(v.phase(), &ViewerPhase::ModelLoading { percent: Some(33) });
    assert_eq!(
        v.on_progress(1000.0, 1000.0).as_deref(),
        Some("Cargando Rover... 100%")
    );
    assert_eq!(v.on_progress(10.0, 0.0), None, "unknown total");
}

#[test]
fn resize_updates_aspect_and_output_size() {
    let mut v = viewer();
    v.resize(Viewport::new(800, 1000));
    assert!((v.camera().aspect - 0.8).abs() < 1e-6);
    assert_eq!(v.output_size(), Viewport::new(800, 1000));
    let proj = v.camera().projection_matrix();
    assert!((proj.y_axis.y / proj.x_axis.x - 0.8).abs() < 1e-5);
}

#[test]
fn frames_spin_the_model_only_when_auto_rotate_is_on() {
    let mut v = viewer();
    let state = v.frame();
    assert!(state.model.is_none());

    v.begin_loading().unwrap();
    v.on_model_bytes(&offset_box_stl()).unwrap();
    let yaw0 = v.scene().mesh().unwrap().rotation_y;
    for _ in 0..10 {
        v.frame();
    }
    let yaw1 = v.scene().mesh().unwrap().rotation_y;
    assert!((yaw1 - yaw0 - 10.0 * MODEL_SPIN_PER_FRAME).abs() < 1e-5);

    v.auto_rotate_model = false;
    let state = v.frame();
    assert_eq!(v.scene().mesh().unwrap().rotation_y, yaw1);
    assert!(state.model.is_some());
}

#[test]
fn frames_move_the_camera_around_the_origin() {
    let mut v = viewer();
    let d0 = v.camera().eye.length();
    let first = v.frame().eye;
    for _ in 0..100 {
        v.frame();
    }
    let later = v.camera().eye;
    assert!(!later.abs_diff_eq(first, 1e-3));
    assert!((later.length() - d0).abs() < 1e-3);
}

#[test]
fn stop_token_is_shared_between_clones() {
    let token = StopToken::new();
    let observer = token.clone();
    assert!(!observer.is_stopped());
    token.stop();
    assert!(observer.is_stopped());
}

#[test]
fn page_report_counts_attached_components() {
    let report = PageReport {
        scroll: Attachment::Attached,
        reveal: Attachment::Skipped {
            missing: ".project-card, .team-card",
        },
        counters: Attachment::Attached,
        hero: Attachment::Skipped {
            missing: "hero-canvas-container",
        },
    };
    assert_eq!(report.attached_count(), 2);
    assert!(report.to_string().contains("hero=skipped (missing hero-canvas-container)"));
}
