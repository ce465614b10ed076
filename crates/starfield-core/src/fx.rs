use rand::prelude::*;

use crate::constants::*;

/// Confetti palette, cycled by piece index.
pub const CONFETTI_COLORS: [&str; 7] = [
    "#FDE047", "#60A5FA", "#F97316", "#22D3EE", "#F472B6", "#A855F7", "#34D399",
];

/// Glyphs for the emoji rain shower.
pub const RAIN_GLYPHS: [&str; 9] = ["✨", "🍔", "🍕", "🌈", "💾", "🛸", "⭐️", "💡", "🎉"];

/// One confetti rectangle. Fields feed node styles directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub color: &'static str,
    pub left_pct: f32,
    pub width_px: f32,
    pub height_px: f32,
    pub delay_s: f32,
    pub duration_s: f32,
    pub rotation_deg: f32,
    pub drift_px: f32,
}

pub fn confetti_piece(index: usize, rng: &mut impl Rng) -> ConfettiPiece {
    ConfettiPiece {
        color: CONFETTI_COLORS[index % CONFETTI_COLORS.len()],
        left_pct: rng.gen::<f32>() * 100.0,
        width_px: 6.0 + rng.gen::<f32>() * 8.0,
        height_px: 10.0 + rng.gen::<f32>() * 14.0,
        delay_s: rng.gen::<f32>() * 0.25,
        duration_s: 1.2 + rng.gen::<f32>() * 0.8,
        rotation_deg: rng.gen::<f32>() * 720.0 - 360.0,
        drift_px: rng.gen::<f32>() * 120.0 - 60.0,
    }
}

/// One falling emoji drop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainDrop {
    pub glyph: &'static str,
    pub left_pct: f32,
    pub font_size_rem: f32,
    pub duration_s: f32,
    pub delay_s: f32,
    pub drift_px: f32,
}

pub fn rain_drop(rng: &mut impl Rng) -> RainDrop {
    RainDrop {
        glyph: RAIN_GLYPHS.choose(rng).copied().unwrap_or("✨"),
        left_pct: rng.gen::<f32>() * 100.0,
        font_size_rem: 0.85 + rng.gen::<f32>() * 0.75,
        duration_s: 3.5 + rng.gen::<f32>() * 2.5,
        delay_s: rng.gen::<f32>() * 0.5,
        drift_px: rng.gen::<f32>() * 60.0 - 30.0,
    }
}

/// Synthesis parameters for one keystroke click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyClick {
    pub frequency_hz: f32,
    pub detune_cents: f32,
    pub cutoff_hz: f32,
    /// Seconds from onset to the end of the exponential gain decay.
    pub decay_s: f64,
}

pub fn key_click(rng: &mut impl Rng) -> KeyClick {
    KeyClick {
        frequency_hz: 240.0 + rng.gen::<f32>() * 220.0,
        detune_cents: (rng.gen::<f32>() - 0.5) * 60.0,
        cutoff_hz: 420.0 + rng.gen::<f32>() * 280.0,
        decay_s: 0.08 + rng.gen::<f64>() * 0.03,
    }
}

/// Keys that produce a click: printable characters plus a few editing
/// keys, with modifier chords and auto-repeat filtered out.
pub fn key_click_allowed(key: &str, repeat: bool, meta: bool, ctrl: bool, alt: bool) -> bool {
    if meta || ctrl || alt || repeat {
        return false;
    }
    if key.chars().count() > 1 && key != "Backspace" && key != "Enter" && key != "Tab" {
        return false;
    }
    true
}

/// Minimum-interval gate between keystroke clicks.
#[derive(Clone, Copy, Debug)]
pub struct KeyGate {
    last_trigger_ms: f64,
}

impl Default for KeyGate {
    fn default() -> Self {
        Self {
            last_trigger_ms: f64::NEG_INFINITY,
        }
    }
}

impl KeyGate {
    /// True when enough time has passed since the last click; arms the
    /// gate as a side effect.
    pub fn try_pass(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_trigger_ms < KEY_CLICK_MIN_INTERVAL_MS {
            return false;
        }
        self.last_trigger_ms = now_ms;
        true
    }
}

/// Fall parameters for one gravity-grabbed element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravityFall {
    pub distance_px: f64,
    pub tilt_deg: f64,
}

/// The fall covers whatever remains between the element's bottom edge and
/// the viewport floor, less a margin; never negative.
pub fn gravity_fall(
    viewport_height_px: f64,
    element_bottom_px: f64,
    rng: &mut impl Rng,
) -> GravityFall {
    GravityFall {
        distance_px: (viewport_height_px - element_bottom_px - GRAVITY_FLOOR_MARGIN_PX).max(0.0),
        tilt_deg: (rng.gen::<f64>() - 0.5) * 8.0,
    }
}

/// Inline styles captured before gravity animates an element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineSnapshot {
    pub transform: String,
    pub transition: String,
}

/// Capture-once keyed store backing gravity restore. Keys are whatever
/// identity the caller uses (element handles in the web layer); entries
/// survive until drained.
#[derive(Clone, Debug)]
pub struct SnapshotStore<K> {
    entries: Vec<(K, InlineSnapshot)>,
}

impl<K: PartialEq> SnapshotStore<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Stores a snapshot unless the key was already captured. Returns
    /// whether the snapshot was stored.
    pub fn capture(&mut self, key: K, snapshot: InlineSnapshot) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.entries.push((key, snapshot));
        true
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.iter().any(|(entry, _)| entry == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes and returns every entry, oldest first.
    pub fn drain(&mut self) -> Vec<(K, InlineSnapshot)> {
        std::mem::take(&mut self.entries)
    }
}

impl<K: PartialEq> Default for SnapshotStore<K> {
    fn default() -> Self {
        Self::new()
    }
}
