use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use web_sys as web;

use starfield_core::{gravity_fall, InlineSnapshot, SnapshotStore, GRAVITY_TRANSITION};

use crate::constants::*;
use crate::sched::ListenerHandle;

/// Gravity mode: a capture-phase pointerdown listener drops whatever was
/// clicked to the bottom of the viewport. Original inline styles are kept
/// in a keyed store and restored wholesale on disable.
pub struct GravityMode {
    enabled: bool,
    document: web::Document,
    root: web::HtmlElement,
    listener: Option<ListenerHandle>,
    store: Rc<RefCell<SnapshotStore<web::HtmlElement>>>,
    rng: Rc<RefCell<StdRng>>,
}

impl GravityMode {
    pub fn new(
        document: web::Document,
        root: web::HtmlElement,
        rng: Rc<RefCell<StdRng>>,
    ) -> Self {
        Self {
            enabled: false,
            document,
            root,
            listener: None,
            store: Rc::new(RefCell::new(SnapshotStore::new())),
            rng,
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
        if self.enabled {
            return;
        }
        self.enabled = true;
        let _ = self.root.class_list().add_1(GRAVITY_MODE_CLASS);
        let store = self.store.clone();
        let rng = self.rng.clone();
        self.listener = Some(ListenerHandle::listen(
            &self.document,
            "pointerdown",
            true,
            move |ev: web::Event| {
                let pointer: web::PointerEvent = ev.unchecked_into();
                if pointer.button() != 0 {
                    return;
                }
                let Some(target) = pointer
                    .target()
                    .and_then(|t| t.dyn_into::<web::Element>().ok())
                else {
                    return;
                };
                let Ok(Some(hit)) = target.closest(GRAVITY_TARGET_SELECTOR) else {
                    return;
                };
                if ignored(&hit) {
                    return;
                }
                let Ok(element) = hit.dyn_into::<web::HtmlElement>() else {
                    return;
                };
                apply_fall(&element, &store, &rng);
            },
        ));
    }

    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.listener.take();
        let _ = self.root.class_list().remove_1(GRAVITY_MODE_CLASS);
        for (element, snapshot) in self.store.borrow_mut().drain() {
            restore(&element, &snapshot);
        }
    }

    pub fn release(&mut self) {
        self.disable();
    }
}

fn ignored(element: &web::Element) -> bool {
    matches!(element.closest(DEBUG_PANEL_SELECTOR), Ok(Some(_)))
        || matches!(element.closest(GRAVITY_OPT_OUT_SELECTOR), Ok(Some(_)))
}

fn apply_fall(
    element: &web::HtmlElement,
    store: &Rc<RefCell<SnapshotStore<web::HtmlElement>>>,
    rng: &Rc<RefCell<StdRng>>,
) {
    let Some(window) = web::window() else {
        return;
    };
    let viewport_h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let rect = element.get_bounding_client_rect();
    let fall = gravity_fall(viewport_h, rect.bottom(), &mut *rng.borrow_mut());

    let style = element.style();
    // Capture once per element: a second grab keeps the first snapshot so
    // disable() restores the true pre-gravity styles.
    store.borrow_mut().capture(
        element.clone(),
        InlineSnapshot {
            transform: style.get_property_value("transform").unwrap_or_default(),
            transition: style.get_property_value("transition").unwrap_or_default(),
        },
    );

    let _ = style.set_property("will-change", "transform");
    let _ = style.set_property("transition", GRAVITY_TRANSITION);
    let _ = style.set_property(
        "transform",
        &format!(
            "translate3d(0, {:.2}px, 0) rotate({:.2}deg)",
            fall.distance_px, fall.tilt_deg
        ),
    );
    let _ = element.class_list().add_1(GRAVITY_ACTIVE_CLASS);
}

fn restore(element: &web::HtmlElement, snapshot: &InlineSnapshot) {
    let style = element.style();
    let _ = style.set_property("transform", &snapshot.transform);
    let _ = style.set_property("transition", &snapshot.transition);
    let _ = style.remove_property("will-change");
    let _ = element.class_list().remove_1(GRAVITY_ACTIVE_CLASS);
}
