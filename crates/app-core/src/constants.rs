// Shared tuning constants for the hero background and counters.

// Field layout
pub const PARTICLE_COUNT: usize = 120;
pub const SPHERE_RADIUS: f32 = 6.0;

// Two discrete color classes (rgb, 0..1)
pub const PRIMARY_BLUE: [f32; 3] = [0.12, 0.53, 0.90]; // #1E88E5
pub const ACCENT_BLUE: [f32; 3] = [0.31, 0.76, 0.97]; // #4FC3F7
pub const COLOR_CLASS_THRESHOLD: f32 = 0.5;

// Idle motion
pub const IDLE_AMOUNT: f32 = 0.15; // world units of drift per axis
pub const IDLE_Z_SCALE: f32 = 0.5;
pub const TIME_STEP: f32 = 0.01; // time accumulator advance per reference frame

// Cursor repulsion
pub const REPULSION_RADIUS: f32 = 1.5; // capture radius is twice this
pub const REPULSION_STRENGTH: f32 = 2.5;
pub const CURSOR_DEPTH: f32 = 0.0; // cursor is treated as a point at this z
pub const CURSOR_WORLD_SCALE: f32 = 5.0; // maps [-1, 1] screen space to world units
pub const CURSOR_IDLE_TIMEOUT_MS: u64 = 200;

// Per-frame smoothing factors at the reference frame rate
pub const CURSOR_SMOOTHING: f32 = 0.15;
pub const POSITION_DAMPING: f32 = 0.1;
pub const REFERENCE_FPS: f32 = 60.0;
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // longer gaps (hidden tab) are clamped

// Color modulation near the cursor
pub const COLOR_FLOOR: f32 = 0.7; // dimmest multiplier, right at the cursor
pub const COLOR_NEAR: f32 = 0.5; // distance where dimming starts to fade out
pub const COLOR_FALLOFF: f32 = 2.0;
pub const INACTIVE_COLOR_DISTANCE: f32 = 10.0;

// Links
pub const LINK_DISTANCE: f32 = 2.0;
pub const GRID_MIN_POINTS: usize = 512; // below this the pairwise scan is used

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Counters
pub const COUNTER_DURATION_MS: f64 = 2000.0;
