use crate::constants::*;

/// Wraps a raw offset into the tile modulus. A degenerate tile size gives
/// a neutral offset instead of NaN.
pub fn wrap_offset(value: f64, size: f64) -> f64 {
    if !size.is_finite() || size <= 0.0 {
        return 0.0;
    }
    let remainder = value % size;
    if remainder.is_finite() {
        remainder
    } else {
        0.0
    }
}

/// Layer speeds and tiling for the scrolling background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxOptions {
    pub speed_near: f64,
    pub speed_far: f64,
    pub tile_height_px: f64,
    /// -1 scrolls the layers against the page, +1 with it.
    pub direction: f64,
    pub smoothing: f64,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            speed_near: DEFAULT_SPEED_NEAR,
            speed_far: DEFAULT_SPEED_FAR,
            tile_height_px: DEFAULT_TILE_HEIGHT_PX,
            direction: -1.0,
            smoothing: DEFAULT_PARALLAX_SMOOTHING,
        }
    }
}

/// Offsets written to the background style variables, CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParallaxOffsets {
    pub near_px: f64,
    pub far_px: f64,
    pub entity_px: f64,
}

impl ParallaxOffsets {
    pub const NEUTRAL: Self = Self {
        near_px: 0.0,
        far_px: 0.0,
        entity_px: 0.0,
    };
}

/// Exponentially smooths the scroll position and derives the wrapped
/// layer offsets. One instance per mounted background.
#[derive(Clone, Copy, Debug)]
pub struct ParallaxTracker {
    options: ParallaxOptions,
    damping: f64,
    animated: f64,
    applied: f64,
}

impl ParallaxTracker {
    pub fn new(options: ParallaxOptions) -> Self {
        let smoothing = if options.smoothing.is_finite() {
            options.smoothing
        } else {
            DEFAULT_PARALLAX_SMOOTHING
        };
        Self {
            options,
            damping: smoothing.clamp(PARALLAX_DAMPING_MIN, PARALLAX_DAMPING_MAX),
            animated: 0.0,
            applied: 0.0,
        }
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Offsets for an exact scroll position, bypassing smoothing.
    pub fn offsets_for(&self, scroll_px: f64) -> ParallaxOffsets {
        let o = &self.options;
        ParallaxOffsets {
            near_px: wrap_offset(scroll_px * o.speed_near * o.direction, o.tile_height_px),
            far_px: wrap_offset(scroll_px * o.speed_far * o.direction, o.tile_height_px),
            entity_px: scroll_px * o.direction,
        }
    }

    /// Adopts the current scroll position without animating toward it, as
    /// on mount. Returns the offsets to apply immediately.
    pub fn prime(&mut self, scroll_px: f64) -> ParallaxOffsets {
        self.animated = scroll_px;
        self.applied = scroll_px;
        self.offsets_for(scroll_px)
    }

    /// One smoothing step toward `target_px`. Returns offsets only when
    /// the animated value moved beyond the apply threshold, so tiny
    /// residuals stop producing style writes.
    pub fn step(&mut self, target_px: f64) -> Option<ParallaxOffsets> {
        self.animated += (target_px - self.animated) * self.damping;
        if (self.animated - self.applied).abs() > PARALLAX_APPLY_THRESHOLD_PX {
            self.applied = self.animated;
            Some(self.offsets_for(self.animated))
        } else {
            None
        }
    }

    /// Raw entity-layer offset currently applied. Meteor trail heads are
    /// positioned with this.
    pub fn entity_offset_px(&self) -> f64 {
        self.applied * self.options.direction
    }

    /// Drops all motion state and returns the neutral offsets.
    pub fn reset(&mut self) -> ParallaxOffsets {
        self.animated = 0.0;
        self.applied = 0.0;
        ParallaxOffsets::NEUTRAL
    }
}
