use std::collections::VecDeque;

use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::constants::*;
use crate::entity::{Entity, EntityId, EntityVariant, Viewport};
use crate::trail::{
    MeteorTrail, MeteorTrailConfig, MeteorTrailUpdate, ParticleSpec, PointerTrail, TrailConfig,
    TrailKind,
};

/// Commands accepted by the engine, normally sent from the debug panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineCommand {
    /// Immediate spawn. `Some` marks a manual spawn with its wider travel
    /// ranges; `None` draws from the ambient distribution.
    Spawn { variant: Option<EntityVariant> },
    Flashlight { enabled: bool },
    /// Wholesale pointer-trail replacement, raw off the channel.
    Trail(TrailConfig),
    /// Wholesale meteor-trail replacement, raw off the channel.
    MeteorTrail(MeteorTrailUpdate),
}

/// Observable engine output, consumed by the renderer once per tick.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    Spawned(Entity),
    Removed(EntityId),
    /// All live entities dropped at once (reduced motion engaged).
    Cleared,
    Particle(ParticleSpec),
    /// Pointer-trail layer must drop its nodes immediately.
    TrailLayerCleared,
    Flashlight(bool),
}

/// The starfield engine: ambient spawn scheduling, the bounded live set,
/// both trail emitters, and the control-channel state.
///
/// Pure with respect to the host. Time, viewport and the parallax entity
/// offset come in through [`tick`](Self::tick); every outward effect
/// leaves as an [`EngineEvent`].
pub struct StarfieldEngine {
    rng: StdRng,
    next_id: u64,
    live: VecDeque<Entity>,
    meteor_trails: Vec<MeteorTrail>,
    next_spawn_at_ms: Option<f64>,
    reduced_motion: bool,
    trail: TrailConfig,
    pointer: PointerTrail,
    meteor_trail_config: MeteorTrailConfig,
    meteor_trail_kind: TrailKind,
}

impl StarfieldEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_id: 1,
            live: VecDeque::with_capacity(MAX_LIVE_ENTITIES),
            meteor_trails: Vec::new(),
            next_spawn_at_ms: None,
            reduced_motion: false,
            trail: TrailConfig::default(),
            pointer: PointerTrail::default(),
            meteor_trail_config: MeteorTrailConfig::default(),
            meteor_trail_kind: TrailKind::Ember,
        }
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.live.iter()
    }

    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    pub fn next_spawn_at_ms(&self) -> Option<f64> {
        self.next_spawn_at_ms
    }

    pub fn active_meteor_trails(&self) -> usize {
        self.meteor_trails.len()
    }

    pub fn trail_config(&self) -> TrailConfig {
        self.trail
    }

    pub fn meteor_trail_config(&self) -> MeteorTrailConfig {
        self.meteor_trail_config
    }

    pub fn meteor_trail_kind(&self) -> TrailKind {
        self.meteor_trail_kind
    }

    /// Applies the OS reduced-motion preference. Engaging it clears every
    /// live entity, drops the flashlight, and resets all trail state;
    /// releasing it re-arms the shorter first-spawn delay with trail
    /// settings back at their defaults.
    pub fn set_reduced_motion(&mut self, reduced: bool, out: &mut Vec<EngineEvent>) {
        if reduced == self.reduced_motion {
            return;
        }
        self.reduced_motion = reduced;
        self.next_spawn_at_ms = None;
        self.meteor_trails.clear();
        self.trail = TrailConfig::default();
        self.pointer.reset();
        self.meteor_trail_config = MeteorTrailConfig::default();
        self.meteor_trail_kind = TrailKind::Ember;
        if reduced {
            self.live.clear();
            out.push(EngineEvent::Cleared);
            out.push(EngineEvent::Flashlight(false));
        }
        out.push(EngineEvent::TrailLayerCleared);
    }

    /// Applies one control-channel command. Commands are dropped while
    /// reduced motion is active, as if the channel had no listener.
    pub fn apply(
        &mut self,
        command: EngineCommand,
        now_ms: f64,
        viewport: Viewport,
        entity_offset_px: f32,
        out: &mut Vec<EngineEvent>,
    ) {
        if self.reduced_motion {
            log::debug!("[engine] dropping {command:?}: reduced motion active");
            return;
        }
        match command {
            EngineCommand::Spawn { variant } => {
                self.spawn(variant, now_ms, viewport, entity_offset_px, out);
            }
            EngineCommand::Flashlight { enabled } => {
                out.push(EngineEvent::Flashlight(enabled));
            }
            EngineCommand::Trail(requested) => {
                // The meteor trail follows the requested kind even when
                // the pointer trail itself ends up disabled.
                self.meteor_trail_kind = requested.kind;
                self.trail = TrailConfig::sanitize(requested);
                self.pointer.reset();
                if !self.trail.enabled {
                    out.push(EngineEvent::TrailLayerCleared);
                }
            }
            EngineCommand::MeteorTrail(update) => {
                self.meteor_trail_config.apply(update);
            }
        }
    }

    /// Feeds one pointer-move sample in CSS pixels.
    pub fn pointer_moved(&mut self, position: Vec2, out: &mut Vec<EngineEvent>) {
        if self.reduced_motion {
            return;
        }
        for spec in self.pointer.pointer_move(&self.trail, position, &mut self.rng) {
            out.push(EngineEvent::Particle(spec));
        }
    }

    /// Advances one frame: fires due ambient spawns, expires entities at
    /// `duration + grace`, and walks every live meteor trail. Inert while
    /// reduced motion is active.
    pub fn tick(
        &mut self,
        now_ms: f64,
        viewport: Viewport,
        entity_offset_px: f32,
        out: &mut Vec<EngineEvent>,
    ) {
        if self.reduced_motion {
            return;
        }

        let due = match self.next_spawn_at_ms {
            Some(due) => due,
            None => {
                // The first entity appears sooner than the ambient cadence.
                let due = now_ms
                    + FIRST_SPAWN_DELAY_MIN_MS
                    + self.rng.gen::<f64>() * FIRST_SPAWN_DELAY_SPAN_MS;
                self.next_spawn_at_ms = Some(due);
                due
            }
        };
        if now_ms >= due {
            self.spawn(None, now_ms, viewport, entity_offset_px, out);
            self.next_spawn_at_ms = Some(
                now_ms + NEXT_SPAWN_DELAY_MIN_MS + self.rng.gen::<f64>() * NEXT_SPAWN_DELAY_SPAN_MS,
            );
        }

        // Durations differ per variant, so expiry order is not FIFO.
        self.live.retain(|entity| {
            if entity.expired(now_ms) {
                out.push(EngineEvent::Removed(entity.id));
                false
            } else {
                true
            }
        });

        let kind = self.meteor_trail_kind;
        let config = self.meteor_trail_config;
        for trail in &mut self.meteor_trails {
            // An evicted meteor leaves its trail idling until the grace
            // period runs out.
            if let Some(entity) = self.live.iter().find(|e| e.id == trail.entity()) {
                let head = entity.screen_position(now_ms, viewport, entity_offset_px);
                for spec in trail.step(now_ms, head, kind, &config, &mut self.rng) {
                    out.push(EngineEvent::Particle(spec));
                }
            }
        }
        self.meteor_trails.retain(|trail| !trail.finished(now_ms));
    }

    fn spawn(
        &mut self,
        requested: Option<EntityVariant>,
        now_ms: f64,
        viewport: Viewport,
        entity_offset_px: f32,
        out: &mut Vec<EngineEvent>,
    ) {
        let manual = requested.is_some();
        let variant = requested.unwrap_or_else(|| EntityVariant::sample(&mut self.rng));
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let entity = Entity::sample(&mut self.rng, id, variant, manual, now_ms, viewport);

        while self.live.len() >= MAX_LIVE_ENTITIES {
            if let Some(evicted) = self.live.pop_front() {
                out.push(EngineEvent::Removed(evicted.id));
            }
        }

        out.push(EngineEvent::Spawned(entity.clone()));

        if variant == EntityVariant::Meteor {
            let start = entity.screen_position(now_ms, viewport, entity_offset_px);
            let direction = entity.travel_direction(viewport);
            let trail = MeteorTrail::new(id, now_ms, entity.duration_ms, start, direction);
            if let Some(spec) =
                trail.initial_burst(self.meteor_trail_kind, &self.meteor_trail_config, &mut self.rng)
            {
                out.push(EngineEvent::Particle(spec));
            }
            self.meteor_trails.push(trail);
        }

        self.live.push_back(entity);
    }
}
