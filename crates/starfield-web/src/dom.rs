use starfield_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

#[inline]
pub fn root_element(document: &web::Document) -> Option<web::HtmlElement> {
    document
        .document_element()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn body(document: &web::Document) -> Option<web::HtmlElement> {
    document.body()
}

pub fn create_element(
    document: &web::Document,
    tag: &str,
    class_name: &str,
) -> Option<web::HtmlElement> {
    let element = document.create_element(tag).ok()?;
    element.set_class_name(class_name);
    element.dyn_into::<web::HtmlElement>().ok()
}

#[inline]
pub fn set_style_var(element: &web::HtmlElement, name: &str, value: &str) {
    let _ = element.style().set_property(name, value);
}

#[inline]
pub fn set_px_var(element: &web::HtmlElement, name: &str, value: f64) {
    set_style_var(element, name, &format!("{value:.2}px"));
}

#[inline]
pub fn remove_style_var(element: &web::HtmlElement, name: &str) {
    let _ = element.style().remove_property(name);
}

#[inline]
pub fn toggle_class(element: &web::HtmlElement, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// Viewport dimensions in CSS pixels; degenerate values collapse inside
/// [`Viewport::new`].
pub fn viewport(window: &web::Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    Viewport::new(width as f32, height as f32)
}
