use crate::constants::*;
use crate::frame::{self, FrameContext};
use crate::render::GpuState;
use crate::{dom, events, loader, overlay};
use instant::Instant;
use site_core::constants::{HERO_INIT_DELAY_MS, LOAD_ERROR_MESSAGE};
use site_core::{Attachment, HeroConfig, HeroViewer, StopToken, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Schedule the hero viewer to mount shortly after the page finishes loading.
pub fn attach(window: &web::Window, document: &web::Document) -> Attachment {
    let Some(container) = document.get_element_by_id(HERO_CONTAINER_ID) else {
        return Attachment::Skipped {
            missing: HERO_CONTAINER_ID,
        };
    };

    // The module may finish loading after the window `load` event.
    if document.ready_state() == "complete" {
        schedule_mount(window, container);
    } else {
        let w = window.clone();
        dom::add_listener(window, "load", move |_: web::Event| {
            schedule_mount(&w, container.clone());
        });
    }
    Attachment::Attached
}

fn schedule_mount(window: &web::Window, container: web::Element) {
    dom::set_timeout(window, HERO_INIT_DELAY_MS, move || {
        spawn_local(async move {
            if let Err(e) = mount(container).await {
                log::error!("[hero] init error: {:?}", e);
                if let Some((_, document)) = dom::window_document() {
                    overlay::show_error(&document, LOAD_ERROR_MESSAGE);
                }
            }
        });
    });
}

async fn mount(container: web::Element) -> anyhow::Result<()> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;

    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let viewport = current_viewport(&window);
    dom::sync_canvas_backing_size(&canvas, viewport.width, viewport.height);

    let viewer = HeroViewer::new(HeroConfig::default(), viewport, &mut rand::thread_rng());
    // The canvas joins the page only once a GPU surface exists for it.
    let gpu = GpuState::new(&canvas, viewer.scene()).await?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    log::info!(
        "[hero] scene ready: {} star layers, {} lights",
        viewer.scene().star_fields.len(),
        viewer.scene().lights.len()
    );

    let viewer = Rc::new(RefCell::new(viewer));
    let gpu = Rc::new(RefCell::new(gpu));

    wire_resize(&window, &canvas, viewer.clone(), gpu.clone());
    events::wire_orbit_drag(&canvas, viewer.clone());

    let stop = StopToken::new();
    {
        let stop = stop.clone();
        dom::add_listener(&window, "pagehide", move |_: web::Event| stop.stop());
    }
    frame::start_loop(
        FrameContext {
            viewer: viewer.clone(),
            gpu: gpu.clone(),
        },
        stop,
    );

    spawn_local(load_model(document, viewer, gpu));
    Ok(())
}

fn current_viewport(window: &web::Window) -> Viewport {
    let (w, h) = dom::viewport_size(window);
    Viewport::new(w.max(1.0) as u32, h.max(1.0) as u32)
}

// Only wired once the camera and renderer exist.
fn wire_resize(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    viewer: Rc<RefCell<HeroViewer>>,
    gpu: Rc<RefCell<GpuState>>,
) {
    let w = window.clone();
    let canvas = canvas.clone();
    dom::add_listener(window, "resize", move |_: web::Event| {
        let viewport = current_viewport(&w);
        viewer.borrow_mut().resize(viewport);
        dom::sync_canvas_backing_size(&canvas, viewport.width, viewport.height);
        gpu.borrow_mut().resize(canvas.width(), canvas.height());
    });
}

async fn load_model(
    document: web::Document,
    viewer: Rc<RefCell<HeroViewer>>,
    gpu: Rc<RefCell<GpuState>>,
) {
    if let Err(e) = viewer.borrow_mut().begin_loading() {
        log::warn!("[load] {}", e);
        return;
    }
    let started = Instant::now();
    let progress_viewer = viewer.clone();
    let progress_doc = document.clone();
    let fetched = loader::fetch_bytes(HERO_MODEL_URL, move |loaded, total| {
        if let Some(text) = progress_viewer.borrow_mut().on_progress(loaded, total) {
            overlay::set_progress_text(&progress_doc, &text);
        }
    })
    .await;

    let mut v = viewer.borrow_mut();
    let placed = fetched.and_then(|bytes| {
        let node = v.on_model_bytes(&bytes)?;
        gpu.borrow_mut().set_model(node);
        Ok(())
    });
    match placed {
        Ok(()) => {
            overlay::hide(&document);
            log::info!("[load] model ready in {:?}", started.elapsed());
        }
        Err(e) => {
            let message = v.on_load_failed(&e);
            overlay::show_error(&document, message);
        }
    }
}
