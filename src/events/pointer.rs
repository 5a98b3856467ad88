use crate::dom;
use site_core::HeroViewer;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Pointer drag bookkeeping for the orbit rig.
#[derive(Clone, Copy, Debug, Default)]
struct DragState {
    active: bool,
    pointer_id: i32,
    last_x: f32,
    last_y: f32,
}

/// Rotate the camera rig by dragging on the canvas.
///
/// Wheel events are left alone so the page keeps scrolling over the hero.
pub fn wire_orbit_drag(canvas: &web::HtmlCanvasElement, viewer: Rc<RefCell<HeroViewer>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));

    {
        let drag = drag.clone();
        let canvas_capture = canvas.clone();
        dom::add_listener(canvas, "pointerdown", move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            d.active = true;
            d.pointer_id = ev.pointer_id();
            d.last_x = ev.client_x() as f32;
            d.last_y = ev.client_y() as f32;
            _ = canvas_capture.set_pointer_capture(ev.pointer_id());
        });
    }
    {
        let drag = drag.clone();
        let canvas_h = canvas.clone();
        dom::add_listener(canvas, "pointermove", move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            if !d.active || d.pointer_id != ev.pointer_id() {
                return;
            }
            let x = ev.client_x() as f32;
            let y = ev.client_y() as f32;
            let (dx, dy) = (x - d.last_x, y - d.last_y);
            d.last_x = x;
            d.last_y = y;
            viewer
                .borrow_mut()
                .controls_mut()
                .drag(dx, dy, canvas_h.client_height() as f32);
        });
    }
    for name in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        let canvas_release = canvas.clone();
        dom::add_listener(canvas, name, move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            if d.pointer_id == ev.pointer_id() {
                d.active = false;
                _ = canvas_release.release_pointer_capture(ev.pointer_id());
            }
        });
    }
}
