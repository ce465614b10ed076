//! The per-frame loop: drain commands, tick the engine, step the parallax,
//! repaint. One `requestAnimationFrame` chain owned by the app, cancelled
//! on release.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use starfield_core::{EngineEvent, ParallaxOffsets, ParallaxOptions, ParallaxTracker, StarfieldEngine};

use crate::bus::CommandBus;
use crate::constants::*;
use crate::dom;
use crate::render::Renderer;

/// Web half of the background parallax: resolves the scroll container,
/// feeds the tracker, and writes the offset variables on the root.
pub struct Background {
    tracker: ParallaxTracker,
    document: web::Document,
    root: web::HtmlElement,
    container: Option<web::Element>,
    reduced: bool,
}

impl Background {
    pub fn new(document: &web::Document, root: web::HtmlElement, options: ParallaxOptions) -> Self {
        Self {
            tracker: ParallaxTracker::new(options),
            document: document.clone(),
            root,
            container: None,
            reduced: false,
        }
    }

    /// The cached container is dropped once it leaves the document, so a
    /// replaced scroll node is picked up instead of read stale.
    fn resolve_container(&mut self) -> Option<web::Element> {
        if let Some(container) = &self.container {
            if container.is_connected() {
                return Some(container.clone());
            }
        }
        let found = self
            .document
            .query_selector(SCROLL_CONTAINER_SELECTOR)
            .ok()
            .flatten();
        self.container = found.clone();
        found
    }

    fn target_scroll(&mut self, window: &web::Window) -> f64 {
        match self.resolve_container() {
            Some(container) => container.scroll_top() as f64,
            None => window.scroll_y().unwrap_or(0.0),
        }
    }

    pub fn invalidate_container(&mut self) {
        self.container = None;
    }

    /// Adopts the current scroll position without animating, as on mount.
    pub fn prime(&mut self, window: &web::Window) {
        let scroll = self.target_scroll(window);
        let offsets = self.tracker.prime(scroll);
        self.apply(offsets);
    }

    pub fn step(&mut self, window: &web::Window) {
        if self.reduced {
            return;
        }
        let target = self.target_scroll(window);
        if let Some(offsets) = self.tracker.step(target) {
            self.apply(offsets);
        }
    }

    pub fn entity_offset_px(&self) -> f64 {
        if self.reduced {
            0.0
        } else {
            self.tracker.entity_offset_px()
        }
    }

    pub fn set_reduced(&mut self, reduced: bool) {
        self.reduced = reduced;
        if reduced {
            self.reset();
        }
    }

    /// Neutral offsets, written immediately.
    pub fn reset(&mut self) {
        let offsets = self.tracker.reset();
        self.apply(offsets);
    }

    fn apply(&self, offsets: ParallaxOffsets) {
        dom::set_px_var(&self.root, VAR_STARS_NEAR, offsets.near_px);
        dom::set_px_var(&self.root, VAR_STARS_FAR, offsets.far_px);
        dom::set_px_var(&self.root, VAR_STARS_ENTITY, offsets.entity_px);
    }
}

pub struct FrameContext {
    pub engine: Rc<RefCell<StarfieldEngine>>,
    pub bus: CommandBus,
    pub renderer: Rc<RefCell<Renderer>>,
    pub background: Rc<RefCell<Background>>,
    pub started: Instant,
    pub events: Vec<EngineEvent>,
}

impl FrameContext {
    pub fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1_000.0
    }

    pub fn frame(&mut self) {
        let Some(window) = web::window() else {
            return;
        };
        let now_ms = self.now_ms();
        let viewport = dom::viewport(&window);

        self.background.borrow_mut().step(&window);
        let entity_offset_px = self.background.borrow().entity_offset_px() as f32;

        self.events.clear();
        let mut engine = self.engine.borrow_mut();
        for command in self.bus.drain() {
            engine.apply(command, now_ms, viewport, entity_offset_px, &mut self.events);
        }
        engine.tick(now_ms, viewport, entity_offset_px, &mut self.events);

        let mut renderer = self.renderer.borrow_mut();
        for event in &self.events {
            renderer.apply(event);
        }
        renderer.repaint(&engine, now_ms, viewport, entity_offset_px);
    }
}

/// Self-rescheduling rAF loop with a tracked frame id.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    pub fn start(ctx: Rc<RefCell<FrameContext>>) -> Self {
        let raf_id = Rc::new(Cell::new(None::<i32>));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let tick_for_frame = tick.clone();
        let raf_for_frame = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            ctx.borrow_mut().frame();
            if let Some(window) = web::window() {
                if let Some(closure) = tick_for_frame.borrow().as_ref() {
                    if let Ok(id) =
                        window.request_animation_frame(closure.as_ref().unchecked_ref())
                    {
                        raf_for_frame.set(Some(id));
                    }
                }
            }
        }) as Box<dyn FnMut()>));
        if let Some(window) = web::window() {
            if let Some(closure) = tick.borrow().as_ref() {
                if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                    raf_id.set(Some(id));
                }
            }
        }
        Self { raf_id, tick }
    }

    pub fn stop(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(window) = web::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}
