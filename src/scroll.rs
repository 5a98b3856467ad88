use crate::constants::*;
use crate::dom;
use site_core::scroll::{anchor_scroll_top, fragment_selector, hero_fade_opacity, HeaderStyle};
use site_core::Attachment;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wire in-page anchor scrolling, the header background toggle, and the hero fade.
pub fn attach(window: &web::Window, document: &web::Document) -> Attachment {
    let anchors = dom::query_all_document(document, IN_PAGE_ANCHOR_SELECTOR);
    for anchor in &anchors {
        wire_anchor(anchor, document);
    }
    log::info!("[scroll] {} in-page anchors", anchors.len());

    if let Some(hero) = dom::query_html(document, HERO_CONTENT_SELECTOR) {
        let w = window.clone();
        dom::add_listener(window, "scroll", move |_: web::Event| {
            let scrolled = w.page_y_offset().unwrap_or(0.0);
            let (_, viewport_h) = dom::viewport_size(&w);
            if let Some(opacity) = hero_fade_opacity(scrolled, viewport_h) {
                _ = hero.style().set_property("opacity", &opacity.to_string());
            }
        });
    }

    let Some(navbar) = dom::query_html(document, NAVBAR_SELECTOR) else {
        return Attachment::Skipped {
            missing: NAVBAR_SELECTOR,
        };
    };
    let w = window.clone();
    dom::add_listener(window, "scroll", move |_: web::Event| {
        let style = HeaderStyle::for_scroll(w.scroll_y().unwrap_or(0.0));
        _ = navbar.style().set_property("background", style.background());
    });
    Attachment::Attached
}

fn wire_anchor(anchor: &web::Element, document: &web::Document) {
    let href = anchor.get_attribute("href").unwrap_or_default();
    let document = document.clone();
    dom::add_listener(anchor, "click", move |ev: web::MouseEvent| {
        ev.prevent_default();
        let Some(selector) = fragment_selector(&href) else {
            return;
        };
        // Fragments that are not valid selectors behave like a missing target.
        let target = document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        let Some(target) = target else {
            return;
        };
        let header_h = dom::query_html(&document, NAVBAR_SELECTOR)
            .map(|nav| nav.offset_height() as f64)
            .unwrap_or(0.0);
        let top = anchor_scroll_top(target.offset_top() as f64, header_h);
        if let Some(window) = web::window() {
            let opts = web::ScrollToOptions::new();
            opts.set_top(top);
            opts.set_behavior(web::ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&opts);
        }
    });
}
