use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use web_sys as web;

use starfield_core::{rain_drop, RAIN_DROP_INTERVAL_MS, RAIN_TEARDOWN_GRACE_MS};

use crate::constants::*;
use crate::dom;
use crate::sched::{self, IntervalHandle, ListenerHandle, Timers};

/// Emoji rain: a fixed-cadence interval drops randomized glyphs into an
/// overlay layer; each drop removes itself when its fall animation ends.
pub struct RainShower {
    document: web::Document,
    timers: Timers,
    rng: Rc<RefCell<StdRng>>,
    layer: Option<web::HtmlElement>,
    listener: Option<ListenerHandle>,
    drops: Option<IntervalHandle>,
    // A disabled layer waiting out its grace period. Held here as well as
    // in the timer closure so release() can still remove the node when the
    // timer gets cancelled out from under it.
    fading: Rc<RefCell<Option<web::HtmlElement>>>,
}

impl RainShower {
    pub fn new(document: web::Document, timers: Timers, rng: Rc<RefCell<StdRng>>) -> Self {
        Self {
            document,
            timers,
            rng,
            layer: None,
            listener: None,
            drops: None,
            fading: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set(&mut self, enabled: bool) {
        if enabled {
            self.enable();
        } else {
            self.disable();
        }
    }

    pub fn enable(&mut self) {
        if self.drops.is_some() {
            return;
        }
        let Some(layer) = self.ensure_layer() else {
            return;
        };
        let _ = layer.class_list().add_1(RAIN_LAYER_ACTIVE_CLASS);
        let document = self.document.clone();
        let rng = self.rng.clone();
        self.drops = IntervalHandle::start(RAIN_DROP_INTERVAL_MS, move || {
            spawn_drop(&document, &layer, &rng);
        });
    }

    /// Stops the cadence at once; the layer lingers briefly so drops already
    /// falling can finish.
    pub fn disable(&mut self) {
        if let Some(mut drops) = self.drops.take() {
            drops.cancel();
        }
        if let Some(layer) = self.layer.take() {
            let _ = layer.class_list().remove_1(RAIN_LAYER_ACTIVE_CLASS);
            let listener = self.listener.take();
            if let Some(previous) = self.fading.borrow_mut().replace(layer.clone()) {
                previous.remove();
            }
            let fading = self.fading.clone();
            sched::schedule(&self.timers, RAIN_TEARDOWN_GRACE_MS, move || {
                drop(listener);
                layer.remove();
                // Only clear the slot if it still holds this layer; a
                // re-enabled and re-disabled shower may have replaced it.
                let mut slot = fading.borrow_mut();
                if slot.as_ref() == Some(&layer) {
                    slot.take();
                }
            });
        }
    }

    /// Immediate teardown, no grace period.
    pub fn release(&mut self) {
        if let Some(mut drops) = self.drops.take() {
            drops.cancel();
        }
        self.listener.take();
        if let Some(layer) = self.layer.take() {
            layer.remove();
        }
        if let Some(layer) = self.fading.borrow_mut().take() {
            layer.remove();
        }
    }

    fn ensure_layer(&mut self) -> Option<web::HtmlElement> {
        if let Some(layer) = &self.layer {
            return Some(layer.clone());
        }
        let body = dom::body(&self.document)?;
        let layer = dom::create_element(&self.document, "div", RAIN_LAYER_CLASS)?;
        let _ = layer.set_attribute(OVERLAY_ATTR, "rain");
        body.append_child(&layer).ok()?;
        // One delegated listener removes drops as their animations finish.
        self.listener = Some(ListenerHandle::listen(
            &layer,
            "animationend",
            false,
            |ev: web::Event| {
                if let Some(target) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) {
                    if target.class_list().contains(RAIN_DROP_CLASS) {
                        target.remove();
                    }
                }
            },
        ));
        self.layer = Some(layer.clone());
        Some(layer)
    }
}

fn spawn_drop(document: &web::Document, layer: &web::HtmlElement, rng: &Rc<RefCell<StdRng>>) {
    let drop = rain_drop(&mut *rng.borrow_mut());
    let Some(node) = dom::create_element(document, "span", RAIN_DROP_CLASS) else {
        return;
    };
    node.set_text_content(Some(drop.glyph));
    dom::set_style_var(&node, "left", &format!("{:.2}%", drop.left_pct));
    dom::set_style_var(&node, "font-size", &format!("{:.2}rem", drop.font_size_rem));
    dom::set_style_var(&node, "animation-duration", &format!("{:.2}s", drop.duration_s));
    dom::set_style_var(&node, "animation-delay", &format!("{:.2}s", drop.delay_s));
    dom::set_px_var(&node, "--rain-drift", drop.drift_px as f64);
    let _ = layer.append_child(&node);
}
