#![cfg(target_arch = "wasm32")]
//! WASM front-end for the starfield effects engine. `EffectsApp` is mounted
//! once at the application shell and survives route changes; the debug
//! panel talks to it through the typed methods below.

mod audio;
mod bus;
mod constants;
mod dom;
mod effects;
mod events;
mod frame;
mod render;
mod sched;

use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use web_sys as web;

use starfield_core::{
    EngineCommand, EntityVariant, MeteorTrailUpdate, ParallaxOptions, StarfieldEngine, TrailConfig,
    TrailKind, SHAKE_DEFAULT_DURATION_MS,
};

use bus::CommandBus;
use constants::*;
use effects::{
    ClassToggle, ConfettiBurst, CursorOverride, GravityMode, OverlayToggle, Rainbow, RainShower,
    Shake, TypeSound,
};
use frame::{Background, FrameContext, FrameLoop};
use render::Renderer;
use sched::{ListenerHandle, TimerRegistry, Timers};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starfield-web starting");
    Ok(())
}

struct App {
    bus: CommandBus,
    timers: Timers,
    renderer: Rc<RefCell<Renderer>>,
    background: Rc<RefCell<Background>>,
    frame_loop: FrameLoop,
    listeners: Vec<ListenerHandle>,
    reduced_motion: Option<ListenerHandle>,
    root: web::HtmlElement,

    grid: OverlayToggle,
    rainbow: Rainbow,
    low_res: ClassToggle,
    invert: ClassToggle,
    rain: RainShower,
    gravity: GravityMode,
    type_sound: TypeSound,
    confetti: ConfettiBurst,
    shake: Shake,
    cursor: CursorOverride,
}

impl App {
    fn mount() -> anyhow::Result<Self> {
        let (window, document) = dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
        let root = dom::root_element(&document).ok_or_else(|| anyhow::anyhow!("no document root"))?;
        let body = dom::body(&document).ok_or_else(|| anyhow::anyhow!("no body"))?;

        let timers = TimerRegistry::new();
        let seed = js_sys::Date::now() as u64;
        let engine = Rc::new(RefCell::new(StarfieldEngine::new(seed)));
        // Separate stream for the effect samplers so panel toggles never
        // perturb the spawn schedule.
        let rng = Rc::new(RefCell::new(StdRng::seed_from_u64(
            seed ^ 0x9e37_79b9_7f4a_7c15,
        )));
        let bus = CommandBus::new();

        let renderer = Rc::new(RefCell::new(Renderer::new(&document, timers.clone())?));
        let mut background = Background::new(&document, root.clone(), ParallaxOptions::default());
        background.prime(&window);
        let background = Rc::new(RefCell::new(background));

        let reduced_motion = events::wire_reduced_motion(&engine, &renderer, &background);
        let mut listeners = Vec::new();
        if let Some(handle) = events::wire_pointer_move(&engine, &renderer, &root) {
            listeners.push(handle);
        }
        if let Some(handle) = events::wire_resize(&background) {
            listeners.push(handle);
        }

        let ctx = Rc::new(RefCell::new(FrameContext {
            engine: engine.clone(),
            bus: bus.clone(),
            renderer: renderer.clone(),
            background: background.clone(),
            started: Instant::now(),
            events: Vec::new(),
        }));
        let frame_loop = FrameLoop::start(ctx);

        log::info!("[engine] effects app mounted (seed={seed})");

        Ok(Self {
            bus,
            timers: timers.clone(),
            renderer,
            background,
            frame_loop,
            listeners,
            reduced_motion,
            root: root.clone(),
            grid: OverlayToggle::new(document.clone(), GRID_OVERLAY_CLASS, "grid"),
            rainbow: Rainbow::new(document.clone(), root.clone()),
            low_res: ClassToggle::new(root.clone(), LOW_RES_CLASS),
            invert: ClassToggle::new(root.clone(), INVERT_CLASS),
            rain: RainShower::new(document.clone(), timers.clone(), rng.clone()),
            gravity: GravityMode::new(document.clone(), root.clone(), rng.clone()),
            type_sound: TypeSound::new(document.clone(), rng.clone()),
            confetti: ConfettiBurst::new(document, timers.clone(), rng),
            shake: Shake::new(body, timers),
            cursor: CursorOverride::new(root),
        })
    }

    fn release(&mut self) {
        log::info!("[engine] releasing effects app");
        self.frame_loop.stop();
        self.listeners.clear();
        self.reduced_motion.take();

        self.grid.disable();
        self.rainbow.set(false);
        self.low_res.set(false);
        self.invert.set(false);
        self.rain.release();
        self.gravity.release();
        self.type_sound.release();
        self.confetti.release();
        self.shake.release();
        self.cursor.release();

        sched::cancel_all(&self.timers);
        self.renderer.borrow_mut().release();
        self.background.borrow_mut().reset();
        dom::remove_style_var(&self.root, VAR_CURSOR_X);
        dom::remove_style_var(&self.root, VAR_CURSOR_Y);

        debug_assert_eq!(self.timers.borrow().pending_len(), 0);
    }
}

/// Panel-facing API. All methods are no-ops after `release`.
#[wasm_bindgen]
pub struct EffectsApp {
    inner: Option<App>,
}

#[wasm_bindgen]
impl EffectsApp {
    /// Builds the engine, layers and listeners. One instance per page load.
    pub fn mount() -> Result<EffectsApp, JsValue> {
        let app = App::mount().map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
        Ok(EffectsApp { inner: Some(app) })
    }

    /// Requests an immediate spawn. An unrecognized or absent variant draws
    /// from the ambient distribution.
    pub fn spawn_entity(&mut self, variant: Option<String>) {
        if let Some(app) = self.inner.as_ref() {
            let variant = variant.as_deref().and_then(EntityVariant::parse);
            app.bus.publish(EngineCommand::Spawn { variant });
        }
    }

    pub fn set_flashlight(&mut self, enabled: bool) {
        if let Some(app) = self.inner.as_ref() {
            app.bus.publish(EngineCommand::Flashlight { enabled });
        }
    }

    pub fn set_trail(&mut self, enabled: bool, kind: &str, density: f32, duration_ms: f32) {
        if let Some(app) = self.inner.as_ref() {
            let kind = TrailKind::parse(kind).unwrap_or(TrailKind::None);
            app.bus.publish(EngineCommand::Trail(TrailConfig {
                enabled,
                kind,
                density,
                duration_ms,
            }));
        }
    }

    pub fn set_meteor_trail(
        &mut self,
        density: f32,
        duration_ms: f32,
        size_variance: f32,
        spread: f32,
    ) {
        if let Some(app) = self.inner.as_ref() {
            app.bus.publish(EngineCommand::MeteorTrail(MeteorTrailUpdate {
                density,
                duration_ms,
                size_variance_px: size_variance,
                spread_px: spread,
            }));
        }
    }

    pub fn set_grid(&mut self, enabled: bool) {
        if let Some(app) = self.inner.as_mut() {
            app.grid.set(enabled);
        }
    }

    pub fn set_rainbow(&mut self, enabled: bool) {
        if let Some(app) = self.inner.as_mut() {
            app.rainbow.set(enabled);
        }
    }

    pub fn set_low_res(&mut self, enabled: bool) {
        if let Some(app) = self.inner.as_mut() {
            app.low_res.set(enabled);
        }
    }

    pub fn set_invert(&mut self, enabled: bool) {
        if let Some(app) = self.inner.as_mut() {
            app.invert.set(enabled);
        }
    }

    pub fn set_rain(&mut self, enabled: bool) {
        if let Some(app) = self.inner.as_mut() {
            app.rain.set(enabled);
        }
    }

    pub fn set_gravity(&mut self, enabled: bool) {
        if let Some(app) = self.inner.as_mut() {
            app.gravity.set(enabled);
        }
    }

    pub fn set_type_sound(&mut self, enabled: bool) {
        if let Some(app) = self.inner.as_mut() {
            app.type_sound.set(enabled);
        }
    }

    pub fn fire_confetti(&mut self, count: Option<u32>) {
        if let Some(app) = self.inner.as_ref() {
            app.confetti.fire(count.map(|c| c as usize));
        }
    }

    pub fn shake(&mut self, duration_ms: Option<f64>) {
        if let Some(app) = self.inner.as_mut() {
            app.shake.trigger(duration_ms.unwrap_or(SHAKE_DEFAULT_DURATION_MS));
        }
    }

    /// `"auto"` or an empty string clears the override.
    pub fn set_cursor(&mut self, cursor: &str) {
        if let Some(app) = self.inner.as_ref() {
            app.cursor.set(cursor);
        }
    }

    /// Tears everything down: loop, timers, listeners, layers, style
    /// variables. Idempotent; further calls on this instance do nothing.
    pub fn release(&mut self) {
        if let Some(mut app) = self.inner.take() {
            app.release();
        }
    }
}
