use starfield_core::*;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn enabled_config(kind: TrailKind, density: f32, duration_ms: f32) -> TrailConfig {
    TrailConfig {
        enabled: true,
        kind,
        density,
        duration_ms,
    }
}

#[test]
fn sanitize_collapses_inactive_requests() {
    let disabled = TrailConfig::default();
    assert_eq!(
        TrailConfig::sanitize(TrailConfig {
            enabled: false,
            ..enabled_config(TrailKind::Ember, 2.0, 700.0)
        }),
        disabled
    );
    assert_eq!(
        TrailConfig::sanitize(enabled_config(TrailKind::None, 2.0, 700.0)),
        disabled
    );
    assert_eq!(
        TrailConfig::sanitize(enabled_config(TrailKind::Ember, 0.0, 700.0)),
        disabled
    );
    assert_eq!(
        TrailConfig::sanitize(enabled_config(TrailKind::Ember, -1.5, 700.0)),
        disabled
    );
}

#[test]
fn sanitize_backfills_non_finite_fields() {
    // NaN density is not rejected by the non-positive check; it falls back
    // to a density of one.
    let config = TrailConfig::sanitize(enabled_config(TrailKind::Spark, f32::NAN, 700.0));
    assert!(config.enabled);
    assert_eq!(config.density, 1.0);

    let config = TrailConfig::sanitize(enabled_config(TrailKind::Spark, 2.0, f32::NAN));
    assert_eq!(config.duration_ms, 600.0);
    let config = TrailConfig::sanitize(enabled_config(TrailKind::Spark, 2.0, 0.0));
    assert_eq!(config.duration_ms, 600.0);
}

#[test]
fn pointer_budget_carries_fractions_across_moves() {
    let mut rng = rng();
    let mut trail = PointerTrail::default();
    let config = enabled_config(TrailKind::Ember, 1.5, 700.0);

    let counts: Vec<usize> = (0..4)
        .map(|i| {
            trail
                .pointer_move(&config, Vec2::new(i as f32 * 10.0, 50.0), &mut rng)
                .len()
        })
        .collect();
    // carry: 1.5 -> emit 1 keep .5; 2.0 -> emit 2 keep 0; repeat.
    assert_eq!(counts, vec![1, 2, 1, 2]);
}

#[test]
fn pointer_floor_of_one_fires_and_drops_the_remainder() {
    let mut rng = rng();
    let mut trail = PointerTrail::default();
    let config = enabled_config(TrailKind::Ember, 0.4, 700.0);

    for _ in 0..8 {
        let specs = trail.pointer_move(&config, Vec2::new(5.0, 5.0), &mut rng);
        assert_eq!(specs.len(), 1, "sub-unit density still gives one particle");
    }
}

#[test]
fn pointer_particles_are_jittered_and_capped() {
    let mut rng = rng();
    let mut trail = PointerTrail::default();
    let config = enabled_config(TrailKind::Ember, 1.5, 700.0);
    let origin = Vec2::new(100.0, 200.0);

    for _ in 0..50 {
        for spec in trail.pointer_move(&config, origin, &mut rng) {
            assert!((spec.x_px - origin.x).abs() <= 7.0, "x jitter out of band");
            assert!((spec.y_px - origin.y).abs() <= 7.0, "y jitter out of band");
            assert!((0.0..4.0).contains(&spec.size_jitter_px));
            assert_eq!(spec.duration_ms, 700.0);
            assert_eq!(spec.kind, TrailKind::Ember);
            assert_eq!(spec.layer_cap, 100); // 40 + 1.5 * 40
        }
    }
}

#[test]
fn pixel_kind_has_no_size_jitter() {
    let mut rng = rng();
    let mut trail = PointerTrail::default();
    let config = enabled_config(TrailKind::Pixel, 1.0, 700.0);
    for _ in 0..10 {
        for spec in trail.pointer_move(&config, Vec2::ZERO, &mut rng) {
            assert_eq!(spec.size_jitter_px, 0.0);
        }
    }
}

#[test]
fn disabled_pointer_config_emits_nothing_and_reset_clears_carry() {
    let mut rng = rng();
    let mut trail = PointerTrail::default();
    let config = enabled_config(TrailKind::Ember, 1.6, 700.0);

    trail.pointer_move(&config, Vec2::ZERO, &mut rng);
    trail.reset();
    // Without the reset the carried 0.6 would make this move emit two.
    let specs = trail.pointer_move(&config, Vec2::ZERO, &mut rng);
    assert_eq!(specs.len(), 1);

    let disabled = TrailConfig::default();
    assert!(trail.pointer_move(&disabled, Vec2::ZERO, &mut rng).is_empty());
}

#[test]
fn layer_caps_scale_with_density_up_to_their_limits() {
    assert_eq!(pointer_layer_cap(1.5), 100);
    assert_eq!(pointer_layer_cap(10.0), 220);
    assert_eq!(meteor_layer_cap(1.6), 268);
    assert_eq!(meteor_layer_cap(10.0), 360);
    assert_eq!(meteor_layer_cap(-2.0), 140);
}

#[test]
fn meteor_config_update_floors_and_keeps_previous_on_non_finite() {
    let mut config = MeteorTrailConfig::default();
    config.apply(MeteorTrailUpdate {
        density: -3.0,
        duration_ms: 10.0,
        size_variance_px: f32::NAN,
        spread_px: -1.0,
    });
    assert_eq!(config.density, 0.0);
    assert_eq!(config.duration_ms, 120.0);
    assert_eq!(config.size_variance_px, 8.0, "NaN keeps the previous value");
    assert_eq!(config.spread_px, 0.0);

    config.apply(MeteorTrailUpdate {
        density: f32::INFINITY,
        duration_ms: f32::NAN,
        size_variance_px: 12.0,
        spread_px: 24.0,
    });
    assert_eq!(config.density, 0.0, "infinite density keeps the previous value");
    assert_eq!(config.duration_ms, 120.0);
    assert_eq!(config.size_variance_px, 12.0);
    assert_eq!(config.spread_px, 24.0);
}

#[test]
fn meteor_budget_accrues_with_distance() {
    let mut rng = rng();
    let config = MeteorTrailConfig {
        density: 1.4,
        duration_ms: 600.0,
        size_variance_px: 0.0,
        spread_px: 0.0,
    };
    let mut trail = MeteorTrail::new(EntityId(1), 0.0, 5_000.0, Vec2::ZERO, Vec2::X);

    let mut counts = Vec::new();
    for i in 1..=3 {
        let head = Vec2::new(i as f32 * 14.0, 0.0);
        counts.push(trail.step(i as f64 * 16.0, head, TrailKind::Ember, &config, &mut rng).len());
    }
    // carry per 14px step is 1.4: emit 1 keep .4, emit 1 keep .8, emit 2.
    assert_eq!(counts, vec![1, 1, 2]);
}

#[test]
fn meteor_particles_land_behind_the_head() {
    let mut rng = rng();
    let config = MeteorTrailConfig {
        density: 1.0,
        duration_ms: 600.0,
        size_variance_px: 0.0,
        spread_px: 0.0,
    };
    let mut trail = MeteorTrail::new(EntityId(1), 0.0, 5_000.0, Vec2::ZERO, Vec2::X);

    let head = Vec2::new(28.0, 0.0);
    let specs = trail.step(16.0, head, TrailKind::Ember, &config, &mut rng);
    assert_eq!(specs.len(), 2);
    for spec in &specs {
        // Rightward travel, zero spread: exactly ten pixels back.
        assert_eq!(spec.x_px, 18.0);
        assert_eq!(spec.y_px, 0.0);
        assert_eq!(spec.size_jitter_px, 0.0);
    }
}

#[test]
fn sub_pixel_movement_accrues_no_budget() {
    let mut rng = rng();
    let config = MeteorTrailConfig {
        density: 50.0,
        duration_ms: 600.0,
        size_variance_px: 0.0,
        spread_px: 0.0,
    };
    let mut trail = MeteorTrail::new(EntityId(1), 0.0, 5_000.0, Vec2::ZERO, Vec2::X);

    for i in 1..=20 {
        let head = Vec2::new(i as f32 * 0.15, 0.0);
        let specs = trail.step(i as f64, head, TrailKind::Ember, &config, &mut rng);
        assert!(specs.is_empty(), "0.15px steps must stay below the distance gate");
    }
}

#[test]
fn meteor_trail_stops_after_flight_plus_grace() {
    let mut rng = rng();
    let config = MeteorTrailConfig::default();
    let mut trail = MeteorTrail::new(EntityId(1), 0.0, 1_000.0, Vec2::ZERO, Vec2::X);

    assert!(!trail.finished(1_239.0));
    assert!(trail.finished(1_240.0));

    let specs = trail.step(1_240.0, Vec2::new(500.0, 0.0), TrailKind::Ember, &config, &mut rng);
    assert!(specs.is_empty(), "a finished trail must not emit");
}

#[test]
fn none_kind_consumes_budget_without_emitting() {
    let mut rng = rng();
    let config = MeteorTrailConfig {
        density: 2.0,
        duration_ms: 600.0,
        size_variance_px: 0.0,
        spread_px: 0.0,
    };
    let mut trail = MeteorTrail::new(EntityId(1), 0.0, 5_000.0, Vec2::ZERO, Vec2::X);

    let specs = trail.step(16.0, Vec2::new(140.0, 0.0), TrailKind::None, &config, &mut rng);
    assert!(specs.is_empty());
    assert!(trail
        .initial_burst(TrailKind::None, &config, &mut rng)
        .is_none());
}

#[test]
fn initial_burst_respects_density_and_points_backwards() {
    let mut rng = rng();
    let config = MeteorTrailConfig {
        density: 1.0,
        duration_ms: 600.0,
        size_variance_px: 0.0,
        spread_px: 0.0,
    };
    let start = Vec2::new(-200.0, -60.0);
    let direction = Vec2::new(0.8, 0.6);
    let trail = MeteorTrail::new(EntityId(1), 0.0, 5_000.0, start, direction);

    let spec = trail
        .initial_burst(TrailKind::Ember, &config, &mut rng)
        .expect("positive density bursts at spawn");
    assert!((spec.x_px - (start.x - direction.x * 10.0)).abs() < 1e-4);
    assert!((spec.y_px - (start.y - direction.y * 10.0)).abs() < 1e-4);

    let silent = MeteorTrailConfig {
        density: 0.0,
        ..config
    };
    assert!(trail.initial_burst(TrailKind::Ember, &silent, &mut rng).is_none());
}

#[test]
fn emoji_kinds_expose_their_glyphs() {
    assert_eq!(TrailKind::EmojiSparkle.glyph(), Some("✨"));
    assert_eq!(TrailKind::EmojiCode.glyph(), Some("</>"));
    assert_eq!(TrailKind::Ember.glyph(), None);
    assert!(TrailKind::None.is_none());
    for kind in [
        TrailKind::None,
        TrailKind::Spark,
        TrailKind::Ember,
        TrailKind::Pixel,
        TrailKind::EmojiSparkle,
        TrailKind::EmojiStar,
        TrailKind::EmojiHeart,
        TrailKind::EmojiCode,
    ] {
        assert_eq!(TrailKind::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(TrailKind::parse("comet"), None);
}
