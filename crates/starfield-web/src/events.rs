//! Input and preference wiring: pointer movement, window resize, and the
//! reduced-motion media query.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use starfield_core::StarfieldEngine;

use crate::constants::*;
use crate::dom;
use crate::frame::Background;
use crate::render::Renderer;
use crate::sched::ListenerHandle;

/// Cursor variables plus pointer-trail emission, one listener on the window.
pub fn wire_pointer_move(
    engine: &Rc<RefCell<StarfieldEngine>>,
    renderer: &Rc<RefCell<Renderer>>,
    root: &web::HtmlElement,
) -> Option<ListenerHandle> {
    let window = web::window()?;
    let engine = engine.clone();
    let renderer = renderer.clone();
    let root = root.clone();
    let mut events = Vec::new();
    Some(ListenerHandle::listen(
        &window,
        "pointermove",
        false,
        move |ev: web::Event| {
            let pointer: web::PointerEvent = ev.unchecked_into();
            let Some(window) = web::window() else {
                return;
            };
            let viewport = dom::viewport(&window);
            let x = pointer.client_x() as f32;
            let y = pointer.client_y() as f32;
            dom::set_style_var(
                &root,
                VAR_CURSOR_X,
                &format!("{:.2}%", x / viewport.width_px * 100.0),
            );
            dom::set_style_var(
                &root,
                VAR_CURSOR_Y,
                &format!("{:.2}%", y / viewport.height_px * 100.0),
            );

            events.clear();
            engine.borrow_mut().pointer_moved(Vec2::new(x, y), &mut events);
            if !events.is_empty() {
                let mut renderer = renderer.borrow_mut();
                for event in &events {
                    renderer.apply(event);
                }
            }
        },
    ))
}

/// A resize may replace the scroll container; drop the cached node.
pub fn wire_resize(background: &Rc<RefCell<Background>>) -> Option<ListenerHandle> {
    let window = web::window()?;
    let background = background.clone();
    Some(ListenerHandle::listen(&window, "resize", false, move |_| {
        background.borrow_mut().invalidate_container();
    }))
}

pub fn apply_reduced_motion(
    reduced: bool,
    engine: &Rc<RefCell<StarfieldEngine>>,
    renderer: &Rc<RefCell<Renderer>>,
    background: &Rc<RefCell<Background>>,
) {
    let mut events = Vec::new();
    engine.borrow_mut().set_reduced_motion(reduced, &mut events);
    {
        let mut renderer = renderer.borrow_mut();
        for event in &events {
            renderer.apply(event);
        }
    }
    background.borrow_mut().set_reduced(reduced);
    if reduced {
        log::info!("[engine] reduced motion engaged; spawning disabled");
    }
}

/// Reads the preference once, applies it, and subscribes for changes.
/// Without matchMedia support the engine simply stays animated.
pub fn wire_reduced_motion(
    engine: &Rc<RefCell<StarfieldEngine>>,
    renderer: &Rc<RefCell<Renderer>>,
    background: &Rc<RefCell<Background>>,
) -> Option<ListenerHandle> {
    let window = web::window()?;
    match window.match_media(REDUCED_MOTION_QUERY) {
        Ok(Some(query)) => {
            apply_reduced_motion(query.matches(), engine, renderer, background);
            let engine = engine.clone();
            let renderer = renderer.clone();
            let background = background.clone();
            Some(ListenerHandle::listen(
                &query,
                "change",
                false,
                move |ev: web::Event| {
                    let change: web::MediaQueryListEvent = ev.unchecked_into();
                    apply_reduced_motion(change.matches(), &engine, &renderer, &background);
                },
            ))
        }
        _ => {
            log::warn!("[engine] matchMedia unavailable; reduced-motion preference not tracked");
            None
        }
    }
}
