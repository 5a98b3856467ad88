// Page behavior and hero scene tuning shared by the web front-end and tests.

// Header
pub const NAV_SCROLLED_THRESHOLD_PX: f64 = 100.0; // strict: scrolled only when scroll_y > threshold
pub const NAV_BACKGROUND_TOP: &str = "rgba(26, 71, 42, 0.95)";
pub const NAV_BACKGROUND_SCROLLED: &str = "rgba(26, 71, 42, 0.98)";

// Hero text fade while the first viewport is scrolled away
pub const HERO_FADE_FACTOR: f64 = 0.8;

// Reveal animation
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
pub const REVEAL_OFFSET_PX: f64 = 30.0;
pub const REVEAL_DURATION_SEC: f64 = 0.6;
pub const REVEAL_STAGGER_SEC: f64 = 0.1;

// Counter animation
pub const COUNTER_TICK_MS: u32 = 16;
pub const COUNTER_DURATION_MS: u32 = 2000;
pub const COUNTER_SECTION_THRESHOLD: f64 = 0.5;

// Hero viewer start-up
pub const HERO_INIT_DELAY_MS: i32 = 100;

// Camera
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_POSITION: [f32; 3] = [12.0, 8.0, 12.0];
pub const SCENE_BACKGROUND: [f32; 3] = [0.0, 0.0, 0.0];

// Orbit controls
pub const CONTROLS_DAMPING_FACTOR: f32 = 0.05;
pub const CONTROLS_MIN_DISTANCE: f32 = 5.0;
pub const CONTROLS_MAX_DISTANCE: f32 = 30.0;
pub const CONTROLS_AUTO_ROTATE_SPEED: f32 = 0.5; // full turn every 120 frames at speed 1
pub const CONTROLS_ROTATE_SPEED: f32 = 1.0;

// Lights
pub const AMBIENT_COLOR: u32 = 0xffffff;
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const KEY_LIGHT_COLOR: u32 = 0xffd4a3;
pub const KEY_LIGHT_INTENSITY: f32 = 1.2;
pub const KEY_LIGHT_POSITION: [f32; 3] = [20.0, 30.0, 10.0];
pub const KEY_SHADOW_HALF_EXTENT: f32 = 30.0;
pub const KEY_SHADOW_NEAR: f32 = 0.5;
pub const KEY_SHADOW_FAR: f32 = 500.0;
pub const KEY_SHADOW_MAP_SIZE: u32 = 2048;
pub const FILL_LIGHT_A_COLOR: u32 = 0x8888ff;
pub const FILL_LIGHT_A_INTENSITY: f32 = 0.3;
pub const FILL_LIGHT_A_POSITION: [f32; 3] = [-10.0, 10.0, -10.0];
pub const FILL_LIGHT_B_COLOR: u32 = 0xffffff;
pub const FILL_LIGHT_B_INTENSITY: f32 = 0.4;
pub const FILL_LIGHT_B_POSITION: [f32; 3] = [0.0, -10.0, 0.0];

// Starfields (extent is the full side of the sampling cube)
pub const SMALL_STAR_COUNT: usize = 2000;
pub const SMALL_STAR_EXTENT: f32 = 300.0;
pub const SMALL_STAR_COLOR: u32 = 0xffffff;
pub const SMALL_STAR_SIZE: f32 = 0.3;
pub const SMALL_STAR_OPACITY: f32 = 0.8;
pub const BIG_STAR_COUNT: usize = 200;
pub const BIG_STAR_EXTENT: f32 = 250.0;
pub const BIG_STAR_COLOR: u32 = 0xd4af37;
pub const BIG_STAR_SIZE: f32 = 0.5;
pub const BIG_STAR_OPACITY: f32 = 0.6;

// Model
pub const MODEL_TARGET_SIZE: f32 = 5.0;
pub const MODEL_BASE_YAW: f32 = std::f32::consts::FRAC_PI_2;
pub const MODEL_SPIN_PER_FRAME: f32 = 0.003;
pub const MODEL_COLOR: u32 = 0xcccccc;
pub const MODEL_ROUGHNESS: f32 = 0.4;
pub const MODEL_METALNESS: f32 = 0.8;

// Overlay text
pub const LOADING_TEXT_PREFIX: &str = "Cargando Rover... ";
pub const LOAD_ERROR_MESSAGE: &str =
    "Error al cargar el modelo 3D.<br>Verifica que el archivo STL existe.";

/// Convert a packed `0xRRGGBB` colour into linear-ish `[r, g, b]` in 0..1.
#[inline]
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
