use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use web_sys as web;

use starfield_core::{confetti_piece, CONFETTI_LAYER_LIFETIME_MS, CONFETTI_PIECE_COUNT};

use crate::constants::*;
use crate::dom;
use crate::sched::{self, ListenerHandle, Timers};

/// One-shot confetti burst. Every call builds a fresh layer; pieces remove
/// themselves as their animations end and the layer is dropped by a tracked
/// timeout regardless.
pub struct ConfettiBurst {
    document: web::Document,
    timers: Timers,
    rng: Rc<RefCell<StdRng>>,
    layers: Rc<RefCell<Vec<web::HtmlElement>>>,
}

impl ConfettiBurst {
    pub fn new(document: web::Document, timers: Timers, rng: Rc<RefCell<StdRng>>) -> Self {
        Self {
            document,
            timers,
            rng,
            layers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn fire(&self, count: Option<usize>) {
        let count = count.unwrap_or(CONFETTI_PIECE_COUNT);
        let Some(body) = dom::body(&self.document) else {
            return;
        };
        let Some(layer) = dom::create_element(&self.document, "div", CONFETTI_LAYER_CLASS) else {
            return;
        };
        let _ = layer.set_attribute(OVERLAY_ATTR, "confetti");
        if body.append_child(&layer).is_err() {
            return;
        }

        let listener = ListenerHandle::listen(&layer, "animationend", false, |ev: web::Event| {
            if let Some(target) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) {
                if target.class_list().contains(CONFETTI_PIECE_CLASS) {
                    target.remove();
                }
            }
        });

        {
            let mut rng = self.rng.borrow_mut();
            for index in 0..count {
                let piece = confetti_piece(index, &mut *rng);
                let Some(node) = dom::create_element(&self.document, "span", CONFETTI_PIECE_CLASS)
                else {
                    continue;
                };
                dom::set_style_var(&node, "background-color", piece.color);
                dom::set_style_var(&node, "left", &format!("{:.2}%", piece.left_pct));
                dom::set_px_var(&node, "width", piece.width_px as f64);
                dom::set_px_var(&node, "height", piece.height_px as f64);
                dom::set_style_var(&node, "animation-delay", &format!("{:.2}s", piece.delay_s));
                dom::set_style_var(&node, "animation-duration", &format!("{:.2}s", piece.duration_s));
                dom::set_style_var(
                    &node,
                    "--confetti-rotation",
                    &format!("{:.2}deg", piece.rotation_deg),
                );
                dom::set_px_var(&node, "--confetti-drift", piece.drift_px as f64);
                let _ = layer.append_child(&node);
            }
        }

        self.layers.borrow_mut().push(layer.clone());
        let layers = self.layers.clone();
        sched::schedule(&self.timers, CONFETTI_LAYER_LIFETIME_MS, move || {
            drop(listener);
            layer.remove();
            layers.borrow_mut().retain(|live| live != &layer);
        });
    }

    /// Drops any layers whose lifetime timers have not yet fired.
    pub fn release(&self) {
        for layer in self.layers.borrow_mut().drain(..) {
            layer.remove();
        }
    }
}
