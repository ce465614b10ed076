// Class names, attributes and style variables the site CSS binds against.
// Keyframes and visual styling live in the page stylesheet; this crate only
// writes the hooks.

// Engine-owned layers
pub const ENTITY_LAYER_CLASS: &str = "starfield-layer";
pub const ENTITY_CLASS: &str = "starfield-entity";
pub const ENTITY_ID_ATTR: &str = "data-entity-id";
pub const TRAIL_LAYER_CLASS: &str = "cursor-trail-layer";
pub const TRAIL_PARTICLE_CLASS: &str = "cursor-trail-particle";
pub const TRAIL_EMOJI_CLASS: &str = "cursor-trail-particle--emoji";
pub const TRAIL_EMOJI_CODE_CLASS: &str = "cursor-trail-particle--emoji-code";

// Debug overlays and root classes
pub const OVERLAY_ATTR: &str = "data-debug-overlay";
pub const GRID_OVERLAY_CLASS: &str = "debug-grid-overlay-layer";
pub const RAINBOW_OVERLAY_CLASS: &str = "debug-rainbow-overlay";
pub const RAINBOW_MODE_CLASS: &str = "debug-rainbow-mode";
pub const LOW_RES_CLASS: &str = "debug-low-res";
pub const INVERT_CLASS: &str = "debug-invert";
pub const FLASHLIGHT_CLASS: &str = "debug-flashlight";
pub const SHAKE_CLASS: &str = "debug-shake";

// Rain shower
pub const RAIN_LAYER_CLASS: &str = "debug-rain-layer";
pub const RAIN_LAYER_ACTIVE_CLASS: &str = "debug-rain-layer--active";
pub const RAIN_DROP_CLASS: &str = "debug-rain-drop";

// Confetti
pub const CONFETTI_LAYER_CLASS: &str = "debug-confetti-layer";
pub const CONFETTI_PIECE_CLASS: &str = "debug-confetti-piece";

// Gravity mode
pub const GRAVITY_MODE_CLASS: &str = "debug-gravity-mode";
pub const GRAVITY_ACTIVE_CLASS: &str = "debug-gravity-active";
pub const GRAVITY_TARGET_SELECTOR: &str = "a, button, section, article, div, span, li, ul, ol, \
     header, footer, main, aside, nav, figure, img, canvas, p, h1, h2, h3, h4, h5, h6";
pub const DEBUG_PANEL_SELECTOR: &str = "[data-debug-panel]";
pub const GRAVITY_OPT_OUT_SELECTOR: &str = "[data-debug-ignore-gravity]";

// Style variables
pub const VAR_STARS_NEAR: &str = "--stars-y-1";
pub const VAR_STARS_FAR: &str = "--stars-y-2";
pub const VAR_STARS_ENTITY: &str = "--stars-entity-offset";
pub const VAR_CURSOR_X: &str = "--cursor-x";
pub const VAR_CURSOR_Y: &str = "--cursor-y";
pub const VAR_DEBUG_CURSOR: &str = "--debug-cursor";
pub const CURSOR_ATTR: &str = "data-debug-cursor";

// Scroll and preferences
pub const SCROLL_CONTAINER_SELECTOR: &str = "[data-scroll-container]";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Keystroke click envelope (seconds)
pub const KEY_CLICK_FLOOR: f32 = 0.0001;
pub const KEY_CLICK_LEVEL: f32 = 0.12;
pub const KEY_CLICK_ATTACK_S: f64 = 0.005;
pub const KEY_CLICK_STOP_S: f64 = 0.12;
