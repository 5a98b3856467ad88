use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

/// First element matching `selector`, as an `HtmlElement`.
pub fn query_html(root: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// All elements matching `selector` under `root`, in document order.
pub fn query_all(root: &web::Element, selector: &str) -> Vec<web::Element> {
    match root.query_selector_all(selector) {
        Ok(list) => node_list_elements(&list),
        Err(_) => Vec::new(),
    }
}

pub fn query_all_document(document: &web::Document, selector: &str) -> Vec<web::Element> {
    match document.query_selector_all(selector) {
        Ok(list) => node_list_elements(&list),
        Err(_) => Vec::new(),
    }
}

fn node_list_elements(list: &web::NodeList) -> Vec<web::Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

#[inline]
pub fn set_style(el: &web::Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        _ = html.style().set_property(property, value);
    }
}

/// Viewport size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    (w, h)
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
pub fn add_listener<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Run `f` once after `delay_ms`.
pub fn set_timeout(window: &web::Window, delay_ms: i32, f: impl FnOnce() + 'static) {
    let closure = Closure::once_into_js(f);
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.unchecked_ref(),
        delay_ms,
    );
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, width: u32, height: u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    canvas.set_width(((width as f64 * dpr) as u32).max(1));
    canvas.set_height(((height as f64 * dpr) as u32).max(1));
    _ = canvas
        .style()
        .set_property("width", &format!("{}px", width));
    _ = canvas
        .style()
        .set_property("height", &format!("{}px", height));
}
