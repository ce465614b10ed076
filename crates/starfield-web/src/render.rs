//! DOM renderer: turns engine events into overlay nodes and repaints the
//! live entities from their model-published positions every frame.

use fnv::FnvHashMap;
use web_sys as web;

use starfield_core::{
    Entity, EntityId, EntityShape, EngineEvent, ParticleSpec, StarfieldEngine, TrailKind, Viewport,
    TRAIL_PARTICLE_REMOVAL_GRACE_MS,
};

use crate::constants::*;
use crate::dom;
use crate::sched::{self, Timers};

pub struct Renderer {
    document: web::Document,
    root: web::HtmlElement,
    entity_layer: web::HtmlElement,
    trail_layer: web::HtmlElement,
    nodes: FnvHashMap<EntityId, web::HtmlElement>,
    timers: Timers,
}

impl Renderer {
    pub fn new(document: &web::Document, timers: Timers) -> anyhow::Result<Self> {
        let root = dom::root_element(document).ok_or_else(|| anyhow::anyhow!("no document root"))?;
        let body = dom::body(document).ok_or_else(|| anyhow::anyhow!("no body"))?;
        let entity_layer = dom::create_element(document, "div", ENTITY_LAYER_CLASS)
            .ok_or_else(|| anyhow::anyhow!("entity layer creation failed"))?;
        let trail_layer = dom::create_element(document, "div", TRAIL_LAYER_CLASS)
            .ok_or_else(|| anyhow::anyhow!("trail layer creation failed"))?;
        body.append_child(&entity_layer)
            .map_err(|e| anyhow::anyhow!("append entity layer: {e:?}"))?;
        body.append_child(&trail_layer)
            .map_err(|e| anyhow::anyhow!("append trail layer: {e:?}"))?;
        Ok(Self {
            document: document.clone(),
            root,
            entity_layer,
            trail_layer,
            nodes: FnvHashMap::default(),
            timers,
        })
    }

    pub fn apply(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::Spawned(entity) => self.create_entity_node(entity),
            EngineEvent::Removed(id) => self.remove_entity_node(*id),
            EngineEvent::Cleared => self.clear_entities(),
            EngineEvent::Particle(spec) => self.spawn_particle(spec),
            EngineEvent::TrailLayerCleared => self.clear_trail_layer(),
            EngineEvent::Flashlight(enabled) => self.set_flashlight(*enabled),
        }
    }

    /// Writes each live entity's current transform. Positions come from the
    /// entity model, never read back from layout.
    pub fn repaint(
        &self,
        engine: &StarfieldEngine,
        now_ms: f64,
        viewport: Viewport,
        entity_offset_px: f32,
    ) {
        for entity in engine.entities() {
            if let Some(node) = self.nodes.get(&entity.id) {
                let position = entity.screen_position(now_ms, viewport, entity_offset_px);
                let rotation = entity.rotation_at(now_ms);
                dom::set_style_var(
                    node,
                    "transform",
                    &format!(
                        "translate3d({:.2}px, {:.2}px, 0) rotate({:.2}deg)",
                        position.x, position.y, rotation
                    ),
                );
            }
        }
    }

    pub fn set_flashlight(&self, enabled: bool) {
        dom::toggle_class(&self.root, FLASHLIGHT_CLASS, enabled);
    }

    fn create_entity_node(&mut self, entity: &Entity) {
        let class = format!("{ENTITY_CLASS} {ENTITY_CLASS}--{}", entity.variant.as_str());
        let Some(node) = dom::create_element(&self.document, "div", &class) else {
            return;
        };
        let _ = node.set_attribute(ENTITY_ID_ATTR, &entity.id.to_string());

        // Path variables in viewport units; the stylesheet animates against
        // these while the per-frame transform carries the computed position.
        dom::set_style_var(&node, "--base-x", &format!("{:.3}vw", entity.base.x));
        dom::set_style_var(&node, "--base-y", &format!("{:.3}vh", entity.base.y));
        dom::set_style_var(&node, "--delta-x", &format!("{:.3}vw", entity.delta.x));
        dom::set_style_var(&node, "--delta-y", &format!("{:.3}vh", entity.delta.y));
        if let Some(mid) = entity.mid {
            dom::set_style_var(&node, "--mid-x", &format!("{:.3}vw", mid.x));
            dom::set_style_var(&node, "--mid-y", &format!("{:.3}vh", mid.y));
        }
        dom::set_style_var(&node, "--duration", &format!("{:.0}ms", entity.duration_ms));
        match entity.shape {
            EntityShape::Streak {
                angle_deg,
                spin_deg,
                trail_length_vw,
                thickness_px,
            } => {
                dom::set_style_var(&node, "--angle", &format!("{angle_deg:.3}deg"));
                dom::set_style_var(&node, "--spin", &format!("{spin_deg:.3}deg"));
                dom::set_style_var(&node, "--trail-length", &format!("{trail_length_vw:.3}vw"));
                dom::set_style_var(&node, "--thickness", &format!("{thickness_px:.3}px"));
            }
            EntityShape::Meteor {
                size_px,
                tilt_deg,
                spin_period_s,
            } => {
                dom::set_style_var(&node, "--size", &format!("{size_px:.3}px"));
                dom::set_style_var(&node, "--tilt", &format!("{tilt_deg:.3}deg"));
                dom::set_style_var(&node, "--spin-duration", &format!("{spin_period_s:.2}s"));
            }
            EntityShape::Asteroid {
                size_px,
                spin_period_s,
            } => {
                dom::set_style_var(&node, "--size", &format!("{size_px:.3}px"));
                dom::set_style_var(&node, "--spin-duration", &format!("{spin_period_s:.2}s"));
            }
        }

        let _ = self.entity_layer.append_child(&node);
        self.nodes.insert(entity.id, node);
    }

    fn remove_entity_node(&mut self, id: EntityId) {
        if let Some(node) = self.nodes.remove(&id) {
            node.remove();
        }
    }

    fn clear_entities(&mut self) {
        for (_, node) in self.nodes.drain() {
            node.remove();
        }
    }

    /// Shared particle primitive for the pointer and meteor paths. The node
    /// self-removes after its animation window; the layer cap evicts oldest
    /// children first.
    fn spawn_particle(&self, spec: &ParticleSpec) {
        if spec.kind.is_none() {
            return;
        }
        let class = format!(
            "{TRAIL_PARTICLE_CLASS} {TRAIL_PARTICLE_CLASS}--{}",
            spec.kind.as_str()
        );
        let Some(particle) = dom::create_element(&self.document, "span", &class) else {
            return;
        };
        if let Some(glyph) = spec.kind.glyph() {
            particle.set_text_content(Some(glyph));
            let _ = particle.class_list().add_1(TRAIL_EMOJI_CLASS);
            if spec.kind == TrailKind::EmojiCode {
                let _ = particle.class_list().add_1(TRAIL_EMOJI_CODE_CLASS);
            }
        }
        dom::set_px_var(&particle, "left", spec.x_px as f64);
        dom::set_px_var(&particle, "top", spec.y_px as f64);
        dom::set_style_var(
            &particle,
            "animation-duration",
            &format!("{:.0}ms", spec.duration_ms),
        );
        if spec.size_jitter_px > 0.0 {
            dom::set_px_var(&particle, "--trail-size-jitter", spec.size_jitter_px as f64);
        }
        let _ = self.trail_layer.append_child(&particle);

        // The node may already be gone by then (cap eviction); remove() on a
        // detached node is harmless.
        let node = particle.clone();
        sched::schedule(
            &self.timers,
            (spec.duration_ms + TRAIL_PARTICLE_REMOVAL_GRACE_MS) as i32,
            move || node.remove(),
        );

        while self.trail_layer.child_element_count() as usize > spec.layer_cap {
            match self.trail_layer.first_element_child() {
                Some(oldest) => oldest.remove(),
                None => break,
            }
        }
    }

    fn clear_trail_layer(&self) {
        self.trail_layer.set_inner_html("");
    }

    /// Removes every engine-owned node and clears the flashlight class.
    /// Safe to call more than once.
    pub fn release(&mut self) {
        self.clear_entities();
        self.entity_layer.remove();
        self.trail_layer.remove();
        self.set_flashlight(false);
    }
}
