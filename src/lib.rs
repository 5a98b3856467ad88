#![cfg(target_arch = "wasm32")]
use site_core::{Attachment, PageReport};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
mod counter;
mod dom;
mod events;
mod frame;
mod hero;
mod loader;
mod overlay;
mod render;
mod reveal;
mod scroll;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("rover-site starting");

    spawn_local(async move {
        if let Err(e) = init() {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

// Each component is wired independently; a missing target only skips that one.
fn init() -> anyhow::Result<()> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;

    let report = PageReport {
        scroll: scroll::attach(&window, &document),
        reveal: or_skip("reveal", reveal::attach(&document)),
        counters: or_skip("counter", counter::attach(&document)),
        hero: hero::attach(&window, &document),
    };
    log::info!(
        "[page] {} of 4 components attached: {}",
        report.attached_count(),
        report
    );
    Ok(())
}

fn or_skip(component: &str, result: anyhow::Result<Attachment>) -> Attachment {
    result.unwrap_or_else(|e| {
        log::error!("[{}] attach failed: {:?}", component, e);
        Attachment::Skipped {
            missing: "IntersectionObserver",
        }
    })
}
