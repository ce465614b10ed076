use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use web_sys as web;

use starfield_core::{key_click, key_click_allowed, KeyGate};

use crate::audio::KeyClickSynth;
use crate::sched::ListenerHandle;

/// Keystroke clicks: a capture-phase keydown listener gated to plain,
/// non-repeated keys and a minimum interval. Disable only detaches the
/// listener; the audio context lives until `release` so re-enabling is
/// instant.
pub struct TypeSound {
    enabled: bool,
    document: web::Document,
    listener: Option<ListenerHandle>,
    synth: Rc<RefCell<KeyClickSynth>>,
    gate: Rc<RefCell<KeyGate>>,
    rng: Rc<RefCell<StdRng>>,
}

impl TypeSound {
    pub fn new(document: web::Document, rng: Rc<RefCell<StdRng>>) -> Self {
        Self {
            enabled: false,
            document,
            listener: None,
            synth: Rc::new(RefCell::new(KeyClickSynth::new())),
            gate: Rc::new(RefCell::new(KeyGate::default())),
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
        let synth = self.synth.clone();
        let gate = self.gate.clone();
        let rng = self.rng.clone();
        self.listener = Some(ListenerHandle::listen(
            &self.document,
            "keydown",
            true,
            move |ev: web::Event| {
                let key_event: web::KeyboardEvent = ev.unchecked_into();
                if !key_click_allowed(
                    &key_event.key(),
                    key_event.repeat(),
                    key_event.meta_key(),
                    key_event.ctrl_key(),
                    key_event.alt_key(),
                ) {
                    return;
                }
                if !gate.borrow_mut().try_pass(js_sys::Date::now()) {
                    return;
                }
                let click = key_click(&mut *rng.borrow_mut());
                synth.borrow_mut().trigger(click);
            },
        ));
    }

    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.listener.take();
    }

    pub fn release(&mut self) {
        self.disable();
        self.synth.borrow_mut().release();
    }
}
