// Host-side integration tests for the starfield engine. Everything here
// runs natively; time is fed in explicitly.

use starfield_core::*;

use glam::Vec2;

fn make_engine() -> StarfieldEngine {
    StarfieldEngine::new(42)
}

fn viewport() -> Viewport {
    Viewport::new(1280.0, 800.0)
}

fn tick(engine: &mut StarfieldEngine, now_ms: f64) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    engine.tick(now_ms, viewport(), 0.0, &mut events);
    events
}

fn send(engine: &mut StarfieldEngine, command: EngineCommand, now_ms: f64) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    engine.apply(command, now_ms, viewport(), 0.0, &mut events);
    events
}

fn spawn_manual(engine: &mut StarfieldEngine, variant: EntityVariant, now_ms: f64) -> Vec<EngineEvent> {
    send(engine, EngineCommand::Spawn { variant: Some(variant) }, now_ms)
}

#[test]
fn first_tick_arms_the_short_initial_delay() {
    let mut engine = make_engine();
    assert_eq!(engine.next_spawn_at_ms(), None);
    tick(&mut engine, 1_000.0);
    let due = engine.next_spawn_at_ms().expect("armed on first tick");
    assert!(
        (5_000.0..11_000.0).contains(&due),
        "first spawn due at {due}, expected 4-10s after the first tick"
    );
    assert_eq!(engine.live_len(), 0, "nothing spawns before the delay runs out");
}

#[test]
fn ambient_spawn_fires_at_due_time_and_rearms_the_long_cadence() {
    let mut engine = make_engine();
    tick(&mut engine, 0.0);
    let due = engine.next_spawn_at_ms().unwrap();

    let events = tick(&mut engine, due);
    assert!(
        events.iter().any(|e| matches!(e, EngineEvent::Spawned(_))),
        "expected a spawn at the due time"
    );
    assert_eq!(engine.live_len(), 1);

    let next = engine.next_spawn_at_ms().unwrap();
    let delay = next - due;
    assert!(
        (9_000.0..23_000.0).contains(&delay),
        "ambient cadence rearmed at {delay}ms, expected 9-23s"
    );
}

#[test]
fn ambient_variant_distribution_is_roughly_40_40_20() {
    let mut engine = make_engine();
    let mut now = 0.0;
    tick(&mut engine, now);

    let mut streaks = 0;
    let mut meteors = 0;
    let mut asteroids = 0;
    for _ in 0..400 {
        now = engine.next_spawn_at_ms().unwrap();
        for event in tick(&mut engine, now) {
            if let EngineEvent::Spawned(entity) = event {
                match entity.variant {
                    EntityVariant::Streak => streaks += 1,
                    EntityVariant::Meteor => meteors += 1,
                    EntityVariant::Asteroid => asteroids += 1,
                }
            }
        }
    }
    let total = streaks + meteors + asteroids;
    assert_eq!(total, 400);
    let share = |count: i32| count as f64 / total as f64;
    assert!(
        (0.30..0.50).contains(&share(streaks)),
        "streak share {} out of expected band",
        share(streaks)
    );
    assert!(
        (0.30..0.50).contains(&share(meteors)),
        "meteor share {} out of expected band",
        share(meteors)
    );
    assert!(
        (0.10..0.30).contains(&share(asteroids)),
        "asteroid share {} out of expected band",
        share(asteroids)
    );
}

#[test]
fn spawned_durations_stay_inside_variant_ranges() {
    let mut engine = make_engine();
    for i in 0..60 {
        let now = i as f64 * 50.0;
        let variant = match i % 3 {
            0 => EntityVariant::Streak,
            1 => EntityVariant::Meteor,
            _ => EntityVariant::Asteroid,
        };
        for event in spawn_manual(&mut engine, variant, now) {
            if let EngineEvent::Spawned(entity) = event {
                let range = match entity.variant {
                    EntityVariant::Streak => 2_300.0..4_100.0,
                    EntityVariant::Meteor => 4_800.0..7_600.0,
                    EntityVariant::Asteroid => 9_500.0..15_000.0,
                };
                assert!(
                    range.contains(&entity.duration_ms),
                    "{:?} duration {} outside {:?}",
                    entity.variant,
                    entity.duration_ms,
                    range
                );
            }
        }
    }
}

#[test]
fn live_collection_never_exceeds_the_cap_and_evicts_fifo() {
    let mut engine = make_engine();
    let mut first_ids = Vec::new();
    let mut evicted = Vec::new();
    for i in 0..20 {
        let events = spawn_manual(&mut engine, EntityVariant::Streak, i as f64);
        for event in events {
            match event {
                EngineEvent::Spawned(entity) => {
                    if first_ids.len() < 5 {
                        first_ids.push(entity.id);
                    }
                }
                EngineEvent::Removed(id) => evicted.push(id),
                _ => {}
            }
        }
        assert!(
            engine.live_len() <= 7,
            "live collection grew to {} after spawn {i}",
            engine.live_len()
        );
    }
    assert_eq!(engine.live_len(), 7);
    // Oldest-first eviction: the first spawned ids leave first.
    assert_eq!(&evicted[..5], &first_ids[..]);
}

#[test]
fn entity_expires_at_duration_plus_grace() {
    let mut engine = make_engine();
    let spawned = spawn_manual(&mut engine, EntityVariant::Asteroid, 0.0);
    let entity = spawned
        .iter()
        .find_map(|e| match e {
            EngineEvent::Spawned(entity) => Some(entity.clone()),
            _ => None,
        })
        .expect("spawn event");

    let just_before = entity.duration_ms + 399.0;
    let events = tick(&mut engine, just_before);
    assert!(
        !events.iter().any(|e| matches!(e, EngineEvent::Removed(_))),
        "entity removed before duration + 400ms"
    );
    assert_eq!(engine.live_len(), 1);

    let due = entity.duration_ms + 400.0;
    let events = tick(&mut engine, due);
    assert!(
        events.contains(&EngineEvent::Removed(entity.id)),
        "entity not removed at duration + 400ms"
    );
    assert!(
        engine.entities().all(|e| e.id != entity.id),
        "removed id still present in the live collection"
    );
}

#[test]
fn reduced_motion_clears_state_and_ignores_commands() {
    let mut engine = make_engine();
    spawn_manual(&mut engine, EntityVariant::Meteor, 0.0);
    assert_eq!(engine.live_len(), 1);
    assert_eq!(engine.active_meteor_trails(), 1);

    let mut events = Vec::new();
    engine.set_reduced_motion(true, &mut events);
    assert!(events.contains(&EngineEvent::Cleared));
    assert_eq!(engine.live_len(), 0);
    assert_eq!(engine.active_meteor_trails(), 0);

    // Manual spawns and ambient ticks are both inert now.
    let events = spawn_manual(&mut engine, EntityVariant::Streak, 10.0);
    assert!(events.is_empty());
    assert_eq!(engine.live_len(), 0);
    let events = tick(&mut engine, 60_000.0);
    assert!(events.is_empty());
    assert_eq!(engine.next_spawn_at_ms(), None);
}

#[test]
fn engaging_reduced_motion_drops_the_flashlight() {
    let mut engine = make_engine();
    send(&mut engine, EngineCommand::Flashlight { enabled: true }, 0.0);

    let mut events = Vec::new();
    engine.set_reduced_motion(true, &mut events);
    assert!(
        events.contains(&EngineEvent::Flashlight(false)),
        "reduced motion must turn the flashlight off"
    );

    // Releasing the preference does not silently re-enable it.
    events.clear();
    engine.set_reduced_motion(false, &mut events);
    assert!(!events.contains(&EngineEvent::Flashlight(true)));
}

#[test]
fn leaving_reduced_motion_rearms_and_resets_trail_settings() {
    let mut engine = make_engine();
    send(
        &mut engine,
        EngineCommand::Trail(TrailConfig {
            enabled: true,
            kind: TrailKind::Pixel,
            density: 3.0,
            duration_ms: 500.0,
        }),
        0.0,
    );
    assert_eq!(engine.trail_config().kind, TrailKind::Pixel);

    let mut events = Vec::new();
    engine.set_reduced_motion(true, &mut events);
    engine.set_reduced_motion(false, &mut events);

    assert_eq!(engine.trail_config(), TrailConfig::default());
    assert_eq!(engine.meteor_trail_config(), MeteorTrailConfig::default());
    assert_eq!(engine.meteor_trail_kind(), TrailKind::Ember);

    tick(&mut engine, 100_000.0);
    let due = engine.next_spawn_at_ms().expect("rearmed after re-enable");
    let delay = due - 100_000.0;
    assert!(
        (4_000.0..10_000.0).contains(&delay),
        "re-enable should use the short first delay, got {delay}ms"
    );
}

#[test]
fn manual_meteor_spawn_starts_a_trail_with_an_initial_burst() {
    let mut engine = make_engine();
    let events = spawn_manual(&mut engine, EntityVariant::Meteor, 0.0);
    assert_eq!(engine.active_meteor_trails(), 1);
    // Default meteor-trail settings are live from the start.
    assert!(
        events.iter().any(|e| matches!(e, EngineEvent::Particle(_))),
        "expected the spawn-time burst under default settings"
    );
}

#[test]
fn meteor_trail_emits_along_the_flight_and_stops_after_grace() {
    let mut engine = make_engine();
    let events = spawn_manual(&mut engine, EntityVariant::Meteor, 0.0);
    let entity = events
        .iter()
        .find_map(|e| match e {
            EngineEvent::Spawned(entity) => Some(entity.clone()),
            _ => None,
        })
        .unwrap();

    // Stay short of the first ambient due time so only this meteor flies.
    tick(&mut engine, 1.0);
    let ambient_due = engine.next_spawn_at_ms().unwrap();
    let horizon = (entity.duration_ms + 240.0).min(ambient_due - 1.0);

    let mut particles = 0;
    let mut now = 16.0;
    while now < horizon {
        for event in tick(&mut engine, now) {
            if matches!(event, EngineEvent::Particle(_)) {
                particles += 1;
            }
        }
        now += 16.0;
    }
    assert!(
        particles > 10,
        "a default-config meteor should shed particles steadily, got {particles}"
    );
    assert_eq!(engine.active_meteor_trails(), 1, "tracker lives through the flight");
}

#[test]
fn zero_density_meteor_trail_never_emits() {
    let mut engine = make_engine();
    send(
        &mut engine,
        EngineCommand::MeteorTrail(MeteorTrailUpdate {
            density: 0.0,
            duration_ms: 600.0,
            size_variance_px: 0.0,
            spread_px: 0.0,
        }),
        0.0,
    );
    let events = spawn_manual(&mut engine, EntityVariant::Meteor, 0.0);
    assert!(
        !events.iter().any(|e| matches!(e, EngineEvent::Particle(_))),
        "zero density must suppress the spawn-time burst"
    );

    tick(&mut engine, 1.0);
    let ambient_due = engine.next_spawn_at_ms().unwrap();
    let mut now = 16.0;
    while now < ambient_due - 1.0 {
        let events = tick(&mut engine, now);
        assert!(
            !events.iter().any(|e| matches!(e, EngineEvent::Particle(_))),
            "zero-density trail emitted at {now}ms"
        );
        now += 16.0;
    }
}

#[test]
fn trail_command_sanitizes_and_clears_on_disable() {
    let mut engine = make_engine();
    let events = send(
        &mut engine,
        EngineCommand::Trail(TrailConfig {
            enabled: true,
            kind: TrailKind::Spark,
            density: 0.0,
            duration_ms: 700.0,
        }),
        0.0,
    );
    // Zero density collapses to the disabled record and clears the layer.
    assert_eq!(engine.trail_config(), TrailConfig::default());
    assert!(events.contains(&EngineEvent::TrailLayerCleared));
    // The meteor trail still follows the requested kind.
    assert_eq!(engine.meteor_trail_kind(), TrailKind::Spark);
}

#[test]
fn pointer_trail_emits_at_least_one_particle_per_move_when_enabled() {
    let mut engine = make_engine();
    send(
        &mut engine,
        EngineCommand::Trail(TrailConfig {
            enabled: true,
            kind: TrailKind::Ember,
            density: 0.3,
            duration_ms: 700.0,
        }),
        0.0,
    );

    for i in 0..10 {
        let mut events = Vec::new();
        engine.pointer_moved(Vec2::new(100.0 + i as f32, 200.0), &mut events);
        let count = events
            .iter()
            .filter(|e| matches!(e, EngineEvent::Particle(_)))
            .count();
        assert_eq!(count, 1, "low density still guarantees one particle per move");
    }
}

#[test]
fn pointer_trail_is_silent_when_disabled_or_reduced() {
    let mut engine = make_engine();
    let mut events = Vec::new();
    engine.pointer_moved(Vec2::new(10.0, 10.0), &mut events);
    assert!(events.is_empty(), "disabled trail must not emit");

    send(
        &mut engine,
        EngineCommand::Trail(TrailConfig {
            enabled: true,
            kind: TrailKind::Ember,
            density: 2.0,
            duration_ms: 700.0,
        }),
        0.0,
    );
    engine.set_reduced_motion(true, &mut events);
    events.clear();
    engine.pointer_moved(Vec2::new(10.0, 10.0), &mut events);
    assert!(events.is_empty(), "reduced motion must mute the pointer trail");
}

#[test]
fn flashlight_command_passes_through() {
    let mut engine = make_engine();
    let events = send(&mut engine, EngineCommand::Flashlight { enabled: true }, 0.0);
    assert_eq!(events, vec![EngineEvent::Flashlight(true)]);
}

#[test]
fn entity_ids_are_unique_and_monotonic() {
    let mut engine = make_engine();
    let mut previous: Option<EntityId> = None;
    for i in 0..12 {
        for event in spawn_manual(&mut engine, EntityVariant::Asteroid, i as f64) {
            if let EngineEvent::Spawned(entity) = event {
                if let Some(prev) = previous {
                    assert!(entity.id > prev, "ids must grow: {prev:?} then {:?}", entity.id);
                }
                previous = Some(entity.id);
            }
        }
    }
}
