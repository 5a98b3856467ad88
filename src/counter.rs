use crate::constants::*;
use crate::dom;
use site_core::constants::{COUNTER_DURATION_MS, COUNTER_SECTION_THRESHOLD, COUNTER_TICK_MS};
use site_core::counter::{parse_counter_target, Counter, CounterTick, SectionTrigger};
use site_core::Attachment;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Count every stat in the stats section up from zero, once, when it is half visible.
pub fn attach(document: &web::Document) -> anyhow::Result<Attachment> {
    let Some(section) = document
        .query_selector(STATS_SECTION_SELECTOR)
        .ok()
        .flatten()
    else {
        return Ok(Attachment::Skipped {
            missing: STATS_SECTION_SELECTOR,
        });
    };

    let mut trigger = SectionTrigger::default();
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() || !trigger.arm() {
                    continue;
                }
                let target = entry.target();
                let stats = dom::query_all(&target, STAT_NUMBER_SELECTOR);
                log::info!("[counter] section visible, animating {} stats", stats.len());
                for stat in stats {
                    start_counter(stat);
                }
                observer.unobserve(&target);
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(COUNTER_SECTION_THRESHOLD));
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    callback.forget();
    observer.observe(&section);
    Ok(Attachment::Attached)
}

fn start_counter(stat: web::Element) {
    let text = stat.text_content().unwrap_or_default();
    let Some(target) = parse_counter_target(&text) else {
        log::warn!("[counter] non-numeric stat {:?} left as is", text);
        return;
    };
    let Some(window) = web::window() else {
        return;
    };
    stat.set_text_content(Some("0"));

    let mut counter = Counter::new(target, COUNTER_DURATION_MS, COUNTER_TICK_MS);
    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let handle_tick = handle.clone();
    let tick = Closure::wrap(Box::new(move || match counter.tick() {
        CounterTick::Show(v) => stat.set_text_content(Some(&v.to_string())),
        CounterTick::Done(v) => {
            stat.set_text_content(Some(&v.to_string()));
            if let (Some(id), Some(w)) = (handle_tick.take(), web::window()) {
                w.clear_interval_with_handle(id);
            }
        }
        CounterTick::Idle => {}
    }) as Box<dyn FnMut()>);

    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        COUNTER_TICK_MS as i32,
    ) {
        Ok(id) => handle.set(Some(id)),
        Err(e) => log::error!("[counter] setInterval failed: {:?}", e),
    }
    tick.forget();
}
