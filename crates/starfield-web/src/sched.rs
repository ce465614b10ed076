//! Tracked timers, intervals and listeners. Every handle this module gives
//! out can be cancelled on teardown; nothing here calls `Closure::forget`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fnv::FnvHashMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One-shot timeout registry keyed by the browser timer id. A fired timer
/// removes its own entry; anything still pending can be cancelled wholesale.
pub struct TimerRegistry {
    pending: FnvHashMap<i32, Closure<dyn FnMut()>>,
}

pub type Timers = Rc<RefCell<TimerRegistry>>;

impl TimerRegistry {
    pub fn new() -> Timers {
        Rc::new(RefCell::new(Self {
            pending: FnvHashMap::default(),
        }))
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Schedules `callback` after `delay_ms`. Returns the timer id, or `None`
/// when there is no window to schedule on.
pub fn schedule(timers: &Timers, delay_ms: i32, callback: impl FnOnce() + 'static) -> Option<i32> {
    let window = web::window()?;
    let registry = Rc::downgrade(timers);
    let id_cell = Rc::new(Cell::new(None::<i32>));
    let id_for_fire = id_cell.clone();
    let mut callback = Some(callback);
    let closure = Closure::wrap(Box::new(move || {
        if let (Some(registry), Some(id)) = (registry.upgrade(), id_for_fire.get()) {
            registry.borrow_mut().pending.remove(&id);
        }
        if let Some(callback) = callback.take() {
            callback();
        }
    }) as Box<dyn FnMut()>);
    let id = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms,
        )
        .ok()?;
    id_cell.set(Some(id));
    timers.borrow_mut().pending.insert(id, closure);
    Some(id)
}

/// Cancels one pending timer. A no-op for timers that already fired.
pub fn cancel(timers: &Timers, id: i32) {
    if timers.borrow_mut().pending.remove(&id).is_some() {
        if let Some(window) = web::window() {
            window.clear_timeout_with_handle(id);
        }
    }
}

pub fn cancel_all(timers: &Timers) {
    let drained: Vec<i32> = {
        let mut registry = timers.borrow_mut();
        let ids = registry.pending.keys().copied().collect();
        registry.pending.clear();
        ids
    };
    if let Some(window) = web::window() {
        for id in drained {
            window.clear_timeout_with_handle(id);
        }
    }
}

/// A repeating timer. Cancelled explicitly or on drop.
pub struct IntervalHandle {
    id: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalHandle {
    pub fn start(period_ms: i32, mut callback: impl FnMut() + 'static) -> Option<Self> {
        let window = web::window()?;
        let closure = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .ok()?;
        Some(Self {
            id: Some(id),
            _closure: closure,
        })
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(window) = web::window() {
                window.clear_interval_with_handle(id);
            }
        }
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// An event listener that retains its closure and unregisters itself on
/// release (or drop). Release is idempotent.
pub struct ListenerHandle {
    target: web::EventTarget,
    event: &'static str,
    capture: bool,
    closure: Option<Closure<dyn FnMut(web::Event)>>,
}

impl ListenerHandle {
    pub fn listen<T: AsRef<web::EventTarget>>(
        target: &T,
        event: &'static str,
        capture: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let target = target.as_ref().clone();
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let wired = if capture {
            target.add_event_listener_with_callback_and_bool(
                event,
                closure.as_ref().unchecked_ref(),
                true,
            )
        } else {
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        };
        if let Err(e) = wired {
            log::warn!("[fx] could not attach {event} listener: {e:?}");
        }
        Self {
            target,
            event,
            capture,
            closure: Some(closure),
        }
    }

    pub fn release(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = if self.capture {
                self.target.remove_event_listener_with_callback_and_bool(
                    self.event,
                    closure.as_ref().unchecked_ref(),
                    true,
                )
            } else {
                self.target
                    .remove_event_listener_with_callback(self.event, closure.as_ref().unchecked_ref())
            };
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.release();
    }
}
