use web_sys as web;

use crate::constants::*;
use crate::dom;
use crate::sched::{self, Timers};

/// Root-class toggle (low-res, invert, the rainbow mode class).
pub struct ClassToggle {
    root: web::HtmlElement,
    class: &'static str,
    enabled: bool,
}

impl ClassToggle {
    pub fn new(root: web::HtmlElement, class: &'static str) -> Self {
        Self {
            root,
            class,
            enabled: false,
        }
    }

    pub fn set(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        dom::toggle_class(&self.root, self.class, enabled);
    }
}

/// Full-screen overlay node toggle (grid, the rainbow overlay half).
pub struct OverlayToggle {
    document: web::Document,
    class: &'static str,
    marker: &'static str,
    node: Option<web::HtmlElement>,
}

impl OverlayToggle {
    pub fn new(document: web::Document, class: &'static str, marker: &'static str) -> Self {
        Self {
            document,
            class,
            marker,
            node: None,
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
        if self.node.is_some() {
            return;
        }
        let Some(body) = dom::body(&self.document) else {
            return;
        };
        let Some(node) = dom::create_element(&self.document, "div", self.class) else {
            return;
        };
        let _ = node.set_attribute(OVERLAY_ATTR, self.marker);
        let _ = body.append_child(&node);
        self.node = Some(node);
    }

    pub fn disable(&mut self) {
        if let Some(node) = self.node.take() {
            node.remove();
        }
    }
}

/// Rainbow is a class on the root plus an overlay node, toggled together.
pub struct Rainbow {
    class: ClassToggle,
    overlay: OverlayToggle,
}

impl Rainbow {
    pub fn new(document: web::Document, root: web::HtmlElement) -> Self {
        Self {
            class: ClassToggle::new(root, RAINBOW_MODE_CLASS),
            overlay: OverlayToggle::new(document, RAINBOW_OVERLAY_CLASS, "rainbow"),
        }
    }

    pub fn set(&mut self, enabled: bool) {
        self.class.set(enabled);
        self.overlay.set(enabled);
    }
}

/// One-shot page shake. Re-triggering replaces the pending removal timer so
/// the class lives for the full requested duration.
pub struct Shake {
    body: web::HtmlElement,
    timers: Timers,
    pending: Option<i32>,
}

impl Shake {
    pub fn new(body: web::HtmlElement, timers: Timers) -> Self {
        Self {
            body,
            timers,
            pending: None,
        }
    }

    pub fn trigger(&mut self, duration_ms: f64) {
        let _ = self.body.class_list().add_1(SHAKE_CLASS);
        if let Some(id) = self.pending.take() {
            sched::cancel(&self.timers, id);
        }
        let body = self.body.clone();
        self.pending = sched::schedule(&self.timers, duration_ms.max(0.0) as i32, move || {
            let _ = body.class_list().remove_1(SHAKE_CLASS);
        });
    }

    pub fn release(&mut self) {
        if let Some(id) = self.pending.take() {
            sched::cancel(&self.timers, id);
        }
        let _ = self.body.class_list().remove_1(SHAKE_CLASS);
    }
}

/// Debug cursor override: an attribute for CSS selectors plus a variable
/// for rules that want the raw value.
pub struct CursorOverride {
    root: web::HtmlElement,
}

impl CursorOverride {
    pub fn new(root: web::HtmlElement) -> Self {
        Self { root }
    }

    pub fn set(&self, cursor: &str) {
        if cursor.is_empty() || cursor == "auto" {
            let _ = self.root.remove_attribute(CURSOR_ATTR);
            dom::remove_style_var(&self.root, VAR_DEBUG_CURSOR);
        } else {
            let _ = self.root.set_attribute(CURSOR_ATTR, cursor);
            dom::set_style_var(&self.root, VAR_DEBUG_CURSOR, cursor);
        }
    }

    pub fn release(&self) {
        self.set("auto");
    }
}
