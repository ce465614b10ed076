// Shared tuning constants for the starfield engine and the debug effects.

// Ambient spawn cadence (milliseconds)
pub const FIRST_SPAWN_DELAY_MIN_MS: f64 = 4_000.0;
pub const FIRST_SPAWN_DELAY_SPAN_MS: f64 = 6_000.0;
pub const NEXT_SPAWN_DELAY_MIN_MS: f64 = 9_000.0;
pub const NEXT_SPAWN_DELAY_SPAN_MS: f64 = 14_000.0;

// Live-entity collection
pub const MAX_LIVE_ENTITIES: usize = 7; // oldest entity is evicted beyond this
pub const ENTITY_REMOVAL_GRACE_MS: f64 = 400.0; // lets the exit transition finish

// Variant distribution: cumulative thresholds on a uniform [0,1) draw
pub const STREAK_THRESHOLD: f32 = 0.4;
pub const METEOR_THRESHOLD: f32 = 0.8;

// Pointer trail
pub const POINTER_TRAIL_JITTER_PX: f32 = 14.0;
pub const POINTER_TRAIL_SIZE_JITTER_MAX_PX: f32 = 4.0;
pub const POINTER_CAP_BASE: f32 = 40.0;
pub const POINTER_CAP_PER_DENSITY: f32 = 40.0;
pub const POINTER_CAP_MAX: usize = 220;
pub const TRAIL_PARTICLE_REMOVAL_GRACE_MS: f32 = 80.0;

// Meteor trail
pub const METEOR_TRAIL_MIN_STEP_PX: f32 = 0.2; // ignore sub-pixel movement
pub const METEOR_TRAIL_DISTANCE_UNIT_PX: f32 = 14.0; // px of travel per density unit
pub const METEOR_TRAIL_BACK_OFFSET_PX: f32 = 10.0; // particles land behind the head
pub const METEOR_TRAIL_GRACE_MS: f64 = 240.0; // emitter outlives the meteor by this
pub const METEOR_CAP_BASE: f32 = 140.0;
pub const METEOR_CAP_PER_DENSITY: f32 = 80.0;
pub const METEOR_CAP_MAX: usize = 360;
pub const METEOR_TRAIL_MIN_DURATION_MS: f32 = 120.0;

// Background parallax
pub const PARALLAX_DAMPING_MIN: f64 = 0.05;
pub const PARALLAX_DAMPING_MAX: f64 = 0.35;
pub const PARALLAX_APPLY_THRESHOLD_PX: f64 = 0.1;
pub const DEFAULT_PARALLAX_SMOOTHING: f64 = 0.15;
pub const DEFAULT_SPEED_NEAR: f64 = 0.6;
pub const DEFAULT_SPEED_FAR: f64 = 0.25;
pub const DEFAULT_TILE_HEIGHT_PX: f64 = 512.0;

// Emoji rain
pub const RAIN_DROP_INTERVAL_MS: i32 = 320;
pub const RAIN_TEARDOWN_GRACE_MS: i32 = 600; // falling drops finish before the layer goes

// Confetti
pub const CONFETTI_PIECE_COUNT: usize = 140;
pub const CONFETTI_LAYER_LIFETIME_MS: i32 = 2_400;

// Screen shake
pub const SHAKE_DEFAULT_DURATION_MS: f64 = 700.0;

// Keystroke clicks
pub const KEY_CLICK_MIN_INTERVAL_MS: f64 = 35.0;

// Gravity drop
pub const GRAVITY_FLOOR_MARGIN_PX: f64 = 16.0;
pub const GRAVITY_TRANSITION: &str = "transform 1.1s cubic-bezier(0.2, 0.9, 0.25, 1)";
