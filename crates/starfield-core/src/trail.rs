use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;

use crate::constants::*;
use crate::entity::EntityId;

/// Visual kind of a trail particle. Names double as the CSS class
/// modifier on the particle node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrailKind {
    #[default]
    None,
    Spark,
    Ember,
    Pixel,
    EmojiSparkle,
    EmojiStar,
    EmojiHeart,
    EmojiCode,
}

impl TrailKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TrailKind::None => "none",
            TrailKind::Spark => "spark",
            TrailKind::Ember => "ember",
            TrailKind::Pixel => "pixel",
            TrailKind::EmojiSparkle => "emoji-sparkle",
            TrailKind::EmojiStar => "emoji-star",
            TrailKind::EmojiHeart => "emoji-heart",
            TrailKind::EmojiCode => "emoji-code",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(TrailKind::None),
            "spark" => Some(TrailKind::Spark),
            "ember" => Some(TrailKind::Ember),
            "pixel" => Some(TrailKind::Pixel),
            "emoji-sparkle" => Some(TrailKind::EmojiSparkle),
            "emoji-star" => Some(TrailKind::EmojiStar),
            "emoji-heart" => Some(TrailKind::EmojiHeart),
            "emoji-code" => Some(TrailKind::EmojiCode),
            _ => None,
        }
    }

    /// Text content for emoji kinds; other kinds render as styled boxes.
    pub fn glyph(self) -> Option<&'static str> {
        match self {
            TrailKind::EmojiSparkle => Some("✨"),
            TrailKind::EmojiStar => Some("⭐"),
            TrailKind::EmojiHeart => Some("💖"),
            TrailKind::EmojiCode => Some("</>"),
            _ => None,
        }
    }

    pub fn is_none(self) -> bool {
        self == TrailKind::None
    }
}

/// Pointer-trail settings. Arrives raw off the control channel and is
/// normalized through [`TrailConfig::sanitize`] before use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailConfig {
    pub enabled: bool,
    pub kind: TrailKind,
    pub density: f32,
    pub duration_ms: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: TrailKind::None,
            density: 0.0,
            duration_ms: 600.0,
        }
    }
}

impl TrailConfig {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whole-record replacement semantics: a request that is disabled,
    /// typeless, or has non-positive density collapses to the disabled
    /// record. Non-finite density falls back to 1, non-finite or zero
    /// duration to 600ms.
    pub fn sanitize(requested: Self) -> Self {
        if !requested.enabled || requested.kind.is_none() || requested.density <= 0.0 {
            return Self::disabled();
        }
        let density = if requested.density.is_finite() {
            requested.density
        } else {
            1.0
        };
        let duration_ms = if requested.duration_ms.is_finite() && requested.duration_ms != 0.0 {
            requested.duration_ms
        } else {
            600.0
        };
        Self {
            enabled: true,
            kind: requested.kind,
            density,
            duration_ms,
        }
    }
}

/// Meteor-trail settings after validation. Per-field update: non-finite
/// values keep the previous field, and duration never drops below 120ms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeteorTrailConfig {
    pub density: f32,
    pub duration_ms: f32,
    pub size_variance_px: f32,
    pub spread_px: f32,
}

impl Default for MeteorTrailConfig {
    fn default() -> Self {
        Self {
            density: 1.6,
            duration_ms: 720.0,
            size_variance_px: 8.0,
            spread_px: 18.0,
        }
    }
}

impl MeteorTrailConfig {
    pub fn apply(&mut self, update: MeteorTrailUpdate) {
        if update.density.is_finite() {
            self.density = update.density.max(0.0);
        }
        if update.duration_ms.is_finite() {
            self.duration_ms = update.duration_ms.max(METEOR_TRAIL_MIN_DURATION_MS);
        }
        if update.size_variance_px.is_finite() {
            self.size_variance_px = update.size_variance_px.max(0.0);
        }
        if update.spread_px.is_finite() {
            self.spread_px = update.spread_px.max(0.0);
        }
    }
}

/// Raw meteor-trail request as it arrives off the control channel.
/// Fields may be non-finite; [`MeteorTrailConfig::apply`] validates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeteorTrailUpdate {
    pub density: f32,
    pub duration_ms: f32,
    pub size_variance_px: f32,
    pub spread_px: f32,
}

/// One particle ready for the overlay layer. The position already carries
/// its jitter; `layer_cap` tells the renderer when to evict old nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSpec {
    pub kind: TrailKind,
    pub x_px: f32,
    pub y_px: f32,
    pub duration_ms: f32,
    pub size_jitter_px: f32,
    pub layer_cap: usize,
}

/// Layer cap while the pointer trail drives emission.
pub fn pointer_layer_cap(density: f32) -> usize {
    let cap = POINTER_CAP_BASE + density.max(0.0) * POINTER_CAP_PER_DENSITY;
    (cap as usize).min(POINTER_CAP_MAX)
}

/// Layer cap while a meteor trail drives emission.
pub fn meteor_layer_cap(density: f32) -> usize {
    let cap = METEOR_CAP_BASE + density.max(0.0) * METEOR_CAP_PER_DENSITY;
    (cap as usize).min(METEOR_CAP_MAX)
}

fn jittered(point: Vec2, jitter: f32, rng: &mut impl Rng) -> Vec2 {
    if jitter > 0.0 {
        Vec2::new(
            point.x + (rng.gen::<f32>() - 0.5) * jitter,
            point.y + (rng.gen::<f32>() - 0.5) * jitter,
        )
    } else {
        point
    }
}

/// Fractional emit budget for the pointer path. Density accrues once per
/// pointer-move; whole particles are emitted and the remainder carries to
/// the next move.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTrail {
    carry: f32,
}

impl PointerTrail {
    pub fn reset(&mut self) {
        self.carry = 0.0;
    }

    /// Emits for one pointer-move at `position` (CSS px). A disabled
    /// config yields nothing; an enabled config yields at least one
    /// particle so low densities still give visible feedback.
    pub fn pointer_move(
        &mut self,
        config: &TrailConfig,
        position: Vec2,
        rng: &mut impl Rng,
    ) -> SmallVec<[ParticleSpec; 2]> {
        let mut out = SmallVec::new();
        if !config.enabled {
            return out;
        }
        self.carry += config.density.max(0.0);
        let mut count = self.carry.floor() as u32;
        self.carry -= count as f32;
        if count == 0 && config.density > 0.0 {
            count = 1;
            self.carry = 0.0;
        }
        let cap = pointer_layer_cap(config.density);
        for _ in 0..count {
            let at = jittered(position, POINTER_TRAIL_JITTER_PX, rng);
            let size_jitter_px = if config.kind == TrailKind::Pixel {
                0.0
            } else {
                rng.gen::<f32>() * POINTER_TRAIL_SIZE_JITTER_MAX_PX
            };
            out.push(ParticleSpec {
                kind: config.kind,
                x_px: at.x,
                y_px: at.y,
                duration_ms: config.duration_ms,
                size_jitter_px,
                layer_cap: cap,
            });
        }
        out
    }
}

/// Distance-budget emitter that follows one meteor. It runs from spawn
/// until the meteor's flight duration plus a grace period and survives
/// the entity being evicted early (it simply stops receiving positions).
#[derive(Clone, Debug)]
pub struct MeteorTrail {
    entity: EntityId,
    started_at_ms: f64,
    flight_ms: f64,
    last_point: Vec2,
    last_direction: Vec2,
    carry: f32,
}

impl MeteorTrail {
    pub fn new(
        entity: EntityId,
        now_ms: f64,
        flight_ms: f64,
        start: Vec2,
        direction: Vec2,
    ) -> Self {
        Self {
            entity,
            started_at_ms: now_ms,
            flight_ms,
            last_point: start,
            last_direction: direction,
            carry: 0.0,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn finished(&self, now_ms: f64) -> bool {
        now_ms - self.started_at_ms >= self.flight_ms + METEOR_TRAIL_GRACE_MS
    }

    /// The burst fired at spawn time, before the first frame advances.
    pub fn initial_burst(
        &self,
        kind: TrailKind,
        config: &MeteorTrailConfig,
        rng: &mut impl Rng,
    ) -> Option<ParticleSpec> {
        if kind.is_none() || config.density <= 0.0 {
            return None;
        }
        emit_behind(kind, config, self.last_point, self.last_direction, rng)
    }

    /// Advances the tracker to the meteor's current head position,
    /// emitting one particle per whole unit of accrued distance budget.
    pub fn step(
        &mut self,
        now_ms: f64,
        head: Vec2,
        kind: TrailKind,
        config: &MeteorTrailConfig,
        rng: &mut impl Rng,
    ) -> SmallVec<[ParticleSpec; 2]> {
        let mut out = SmallVec::new();
        if self.finished(now_ms) {
            return out;
        }
        let delta = head - self.last_point;
        let distance = delta.length();
        if distance > METEOR_TRAIL_MIN_STEP_PX {
            self.last_direction = delta / distance;
            self.carry += config.density.max(0.0) * (distance / METEOR_TRAIL_DISTANCE_UNIT_PX);
            while self.carry >= 1.0 {
                self.carry -= 1.0;
                // Budget is consumed even when the kind emits nothing.
                if let Some(spec) = emit_behind(kind, config, head, self.last_direction, rng) {
                    out.push(spec);
                }
            }
        }
        self.last_point = head;
        out
    }
}

/// Particles land just behind the head along the direction of travel,
/// jittered by spread and sized by variance.
fn emit_behind(
    kind: TrailKind,
    config: &MeteorTrailConfig,
    head: Vec2,
    direction: Vec2,
    rng: &mut impl Rng,
) -> Option<ParticleSpec> {
    if kind.is_none() || config.duration_ms <= 0.0 {
        return None;
    }
    let behind = head - direction * METEOR_TRAIL_BACK_OFFSET_PX;
    let at = jittered(behind, config.spread_px.max(0.0), rng);
    let size_jitter_px = if config.size_variance_px > 0.0 {
        rng.gen::<f32>() * config.size_variance_px
    } else {
        0.0
    };
    Some(ParticleSpec {
        kind,
        x_px: at.x,
        y_px: at.y,
        duration_ms: config.duration_ms,
        size_jitter_px,
        layer_cap: meteor_layer_cap(config.density),
    })
}
