use crate::render::GpuState;
use site_core::{HeroViewer, StopToken};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Viewer state and GPU resources driven by the animation frame loop.
pub struct FrameContext {
    pub viewer: Rc<RefCell<HeroViewer>>,
    pub gpu: Rc<RefCell<GpuState>>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let mut viewer = self.viewer.borrow_mut();
        let state = viewer.frame();
        let mut gpu = self.gpu.borrow_mut();
        match gpu.render(&state, viewer.scene()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
            }
            Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
        }
    }
}

/// Run `frame_ctx.frame()` once per display refresh until `stop` is signalled.
pub fn start_loop(frame_ctx: FrameContext, stop: StopToken) {
    let frame_ctx = RefCell::new(frame_ctx);
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if stop.is_stopped() {
            // Break the self-reference so the closure can be freed.
            tick_clone.borrow_mut().take();
            log::info!("[hero] render loop stopped");
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
