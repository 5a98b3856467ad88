use crate::constants::{HERO_LOADING_ID, HERO_LOADING_TEXT_SELECTOR};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Update the percentage readout inside the loading overlay.
#[inline]
pub fn set_progress_text(document: &web::Document, text: &str) {
    if let Ok(Some(el)) = document.query_selector(HERO_LOADING_TEXT_SELECTOR) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    let overlay = document
        .get_element_by_id(HERO_LOADING_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
    if let Some(el) = overlay {
        _ = el.style().set_property("display", "none");
    }
}

/// Replace the overlay contents with the fixed failure message.
pub fn show_error(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(HERO_LOADING_ID) {
        el.set_inner_html(&format!(
            "<div class=\"hero-loading-text\">{}</div>",
            message
        ));
    }
}
