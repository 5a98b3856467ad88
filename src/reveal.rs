use crate::constants::*;
use crate::dom;
use site_core::constants::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
use site_core::reveal::{reveal_transition, RevealOutcome, RevealSet, RevealStyle};
use site_core::Attachment;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Hide every card and fade each one in the first time it scrolls into view.
pub fn attach(document: &web::Document) -> anyhow::Result<Attachment> {
    let cards = dom::query_all_document(document, REVEAL_CARD_SELECTOR);
    if cards.is_empty() {
        return Ok(Attachment::Skipped {
            missing: REVEAL_CARD_SELECTOR,
        });
    }

    let set = Rc::new(RefCell::new(RevealSet::new()));
    let set_cb = set.clone();
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let Some(key) = reveal_key(&target) else {
                    continue;
                };
                // Cards stay observed; later intersections fall through as no-ops.
                if set_cb.borrow_mut().on_intersect(key) == RevealOutcome::Revealed {
                    apply(&target, &RevealStyle::visible());
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    init.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    callback.forget();

    let hidden = RevealStyle::hidden();
    for (index, card) in cards.iter().enumerate() {
        let key = index as u32;
        apply(card, &hidden);
        dom::set_style(card, "transition", &reveal_transition(index));
        _ = card.set_attribute(REVEAL_KEY_ATTR, &key.to_string());
        set.borrow_mut().register(key);
        observer.observe(card);
    }
    log::info!("[reveal] observing {} cards", cards.len());
    Ok(Attachment::Attached)
}

fn reveal_key(el: &web::Element) -> Option<u32> {
    el.get_attribute(REVEAL_KEY_ATTR)?.parse().ok()
}

fn apply(el: &web::Element, style: &RevealStyle) {
    dom::set_style(el, "opacity", style.opacity);
    dom::set_style(el, "transform", &style.transform);
}
