use glam::Vec2;
use rand::prelude::*;

use crate::constants::*;

/// Monotonic identifier for a spawned entity. Rendered into the DOM as
/// `data-entity-id` so overlay nodes can be correlated with engine state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three decorative entity kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityVariant {
    Streak,
    Meteor,
    Asteroid,
}

impl EntityVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityVariant::Streak => "streak",
            EntityVariant::Meteor => "meteor",
            EntityVariant::Asteroid => "asteroid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "streak" => Some(EntityVariant::Streak),
            "meteor" => Some(EntityVariant::Meteor),
            "asteroid" => Some(EntityVariant::Asteroid),
            _ => None,
        }
    }

    /// Ambient distribution: 40% streak, 40% meteor, 20% asteroid.
    pub(crate) fn sample(rng: &mut impl Rng) -> Self {
        let draw = rng.gen::<f32>();
        if draw < STREAK_THRESHOLD {
            EntityVariant::Streak
        } else if draw < METEOR_THRESHOLD {
            EntityVariant::Meteor
        } else {
            EntityVariant::Asteroid
        }
    }
}

/// Viewport dimensions in CSS pixels. Degenerate sizes collapse to one so
/// aspect ratios and unit conversions stay finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width_px: f32,
    pub height_px: f32,
}

impl Viewport {
    pub fn new(width_px: f32, height_px: f32) -> Self {
        let clamp = |v: f32| if v.is_finite() && v > 0.0 { v } else { 1.0 };
        Self {
            width_px: clamp(width_px),
            height_px: clamp(height_px),
        }
    }

    /// height / width: maps a vh-per-vw slope into screen space.
    pub fn aspect(&self) -> f32 {
        self.height_px / self.width_px
    }

    /// Converts a viewport-relative point (vw, vh) to CSS pixels.
    pub fn to_px(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x / 100.0 * self.width_px,
            point.y / 100.0 * self.height_px,
        )
    }
}

/// Variant-specific presentation parameters, sampled once at spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityShape {
    Streak {
        /// Heading along the travel vector, degrees.
        angle_deg: f32,
        /// Extra rotation accumulated over the full flight, degrees.
        spin_deg: f32,
        trail_length_vw: f32,
        thickness_px: f32,
    },
    Meteor {
        size_px: f32,
        tilt_deg: f32,
        /// Seconds per full revolution of the sprite.
        spin_period_s: f32,
    },
    Asteroid {
        size_px: f32,
        spin_period_s: f32,
    },
}

/// A spawned decorative entity. Immutable after creation; position and
/// rotation are derived from elapsed time, never stored back.
///
/// Positions are viewport-relative: `base` and `delta` are (vw, vh), and
/// `mid` (when present) bends the path into a shallow quadratic arc.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub variant: EntityVariant,
    pub spawned_at_ms: f64,
    pub duration_ms: f64,
    pub base: Vec2,
    pub delta: Vec2,
    pub mid: Option<Vec2>,
    pub shape: EntityShape,
}

impl Entity {
    /// Samples a fresh entity. Manual spawns use wider, faster travel
    /// ranges so a debug-triggered entity is visible immediately.
    pub(crate) fn sample(
        rng: &mut impl Rng,
        id: EntityId,
        variant: EntityVariant,
        manual: bool,
        now_ms: f64,
        viewport: Viewport,
    ) -> Self {
        match variant {
            EntityVariant::Streak => {
                let base_x = if manual {
                    -18.0
                } else {
                    -12.0 + rng.gen::<f32>() * 6.0
                };
                let base_y = if manual {
                    20.0 + rng.gen::<f32>() * 60.0
                } else {
                    8.0 + rng.gen::<f32>() * 70.0
                };
                let travel_x = if manual {
                    120.0 + rng.gen::<f32>() * 15.0
                } else {
                    48.0 + rng.gen::<f32>() * 32.0
                };
                let travel_y = if manual {
                    12.0 + rng.gen::<f32>() * 22.0
                } else {
                    14.0 + rng.gen::<f32>() * 18.0
                };
                let mid_x = travel_x * 0.5 + (rng.gen::<f32>() - 0.5) * 6.0;
                let mid_y = travel_y * 0.45 + (rng.gen::<f32>() - 0.5) * 4.0;
                let duration_ms = 2_300.0 + rng.gen::<f64>() * 1_800.0;
                let spin_deg = (rng.gen::<f32>() - 0.5) * 20.0;
                let trail_length_vw = 12.0 + rng.gen::<f32>() * 6.0;
                let thickness_px = 1.0 + rng.gen::<f32>() * 1.4;
                // The heading must match what the eye sees, so the vh slope
                // is scaled by the viewport aspect before taking the angle.
                let angle_deg = (travel_y * viewport.aspect()).atan2(travel_x).to_degrees();
                Self {
                    id,
                    variant,
                    spawned_at_ms: now_ms,
                    duration_ms,
                    base: Vec2::new(base_x, base_y),
                    delta: Vec2::new(travel_x, travel_y),
                    mid: Some(Vec2::new(mid_x, mid_y)),
                    shape: EntityShape::Streak {
                        angle_deg,
                        spin_deg,
                        trail_length_vw,
                        thickness_px,
                    },
                }
            }
            EntityVariant::Meteor => {
                let start_x = if manual {
                    -16.0 + rng.gen::<f32>() * 12.0
                } else {
                    -18.0 + rng.gen::<f32>() * 14.0
                };
                let start_y = if manual {
                    -8.0 + rng.gen::<f32>() * 16.0
                } else {
                    -12.0 + rng.gen::<f32>() * 26.0
                };
                let travel_x = if manual {
                    148.0 + rng.gen::<f32>() * 16.0
                } else {
                    132.0 + rng.gen::<f32>() * 28.0
                };
                let travel_y = if manual {
                    62.0 + rng.gen::<f32>() * 18.0
                } else {
                    58.0 + rng.gen::<f32>() * 28.0
                };
                let duration_ms = 4_800.0 + rng.gen::<f64>() * 2_800.0;
                let size_px = 30.0 + rng.gen::<f32>() * 28.0;
                let tilt_deg = (rng.gen::<f32>() - 0.5) * 20.0;
                let spin_period_s = 4.2 + rng.gen::<f32>() * 2.8;
                Self {
                    id,
                    variant,
                    spawned_at_ms: now_ms,
                    duration_ms,
                    base: Vec2::new(start_x, start_y),
                    delta: Vec2::new(travel_x, travel_y),
                    mid: None,
                    shape: EntityShape::Meteor {
                        size_px,
                        tilt_deg,
                        spin_period_s,
                    },
                }
            }
            EntityVariant::Asteroid => {
                let base_x = if manual {
                    5.0 + rng.gen::<f32>() * 20.0
                } else {
                    rng.gen::<f32>() * 100.0
                };
                let base_y = if manual {
                    20.0 + rng.gen::<f32>() * 60.0
                } else {
                    rng.gen::<f32>() * 90.0
                };
                let travel_x = if manual {
                    60.0 + rng.gen::<f32>() * 24.0
                } else {
                    (rng.gen::<f32>() - 0.5) * 18.0
                };
                let travel_y = if manual {
                    24.0 + rng.gen::<f32>() * 30.0
                } else {
                    14.0 + rng.gen::<f32>() * 26.0
                };
                let mid_x = travel_x * 0.55 + (rng.gen::<f32>() - 0.5) * 6.0;
                let mid_y = travel_y * 0.5 + (rng.gen::<f32>() - 0.5) * 6.0;
                let duration_ms = 9_500.0 + rng.gen::<f64>() * 5_500.0;
                let spin_period_s = 9.0 + rng.gen::<f32>() * 6.0;
                let size_px = 9.0 + rng.gen::<f32>() * 7.0;
                Self {
                    id,
                    variant,
                    spawned_at_ms: now_ms,
                    duration_ms,
                    base: Vec2::new(base_x, base_y),
                    delta: Vec2::new(travel_x, travel_y),
                    mid: Some(Vec2::new(mid_x, mid_y)),
                    shape: EntityShape::Asteroid {
                        size_px,
                        spin_period_s,
                    },
                }
            }
        }
    }

    /// Normalized flight progress, clamped to [0, 1].
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (((now_ms - self.spawned_at_ms) / self.duration_ms) as f32).clamp(0.0, 1.0)
    }

    /// Current path position in viewport units (vw, vh).
    ///
    /// Streaks and asteroids follow a quadratic arc through `mid`; meteors
    /// travel linearly along `delta`.
    pub fn position_at(&self, now_ms: f64) -> Vec2 {
        let t = self.progress(now_ms);
        let rel = match self.mid {
            Some(mid) => mid * (2.0 * (1.0 - t) * t) + self.delta * (t * t),
            None => self.delta * t,
        };
        self.base + rel
    }

    /// Current rotation in degrees.
    pub fn rotation_at(&self, now_ms: f64) -> f32 {
        match self.shape {
            EntityShape::Streak { angle_deg, spin_deg, .. } => {
                angle_deg + spin_deg * self.progress(now_ms)
            }
            EntityShape::Meteor { tilt_deg, .. } => tilt_deg,
            EntityShape::Asteroid { spin_period_s, .. } => {
                let elapsed_s = ((now_ms - self.spawned_at_ms).max(0.0) / 1_000.0) as f32;
                (elapsed_s / spin_period_s * 360.0) % 360.0
            }
        }
    }

    /// Current on-screen position in CSS pixels, including the vertical
    /// parallax offset applied to the whole entity layer.
    pub fn screen_position(&self, now_ms: f64, viewport: Viewport, entity_offset_px: f32) -> Vec2 {
        let px = viewport.to_px(self.position_at(now_ms));
        Vec2::new(px.x, px.y + entity_offset_px)
    }

    /// Unit direction of the full travel vector in screen space. Zero
    /// travel yields the zero vector rather than NaN.
    pub fn travel_direction(&self, viewport: Viewport) -> Vec2 {
        let delta_px = viewport.to_px(self.delta);
        let length = delta_px.length();
        if length > 0.0 {
            delta_px / length
        } else {
            Vec2::ZERO
        }
    }

    /// When this entity leaves the live collection: flight duration plus a
    /// grace period that lets the exit transition finish.
    pub fn removal_due_ms(&self) -> f64 {
        self.spawned_at_ms + self.duration_ms + ENTITY_REMOVAL_GRACE_MS
    }

    pub fn expired(&self, now_ms: f64) -> bool {
        now_ms >= self.removal_due_ms()
    }
}
