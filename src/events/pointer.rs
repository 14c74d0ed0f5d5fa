use crate::core::CursorState;
use crate::dom::{self, ListenerGuard};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Listeners feeding the hero's cursor. Dropping this detaches them.
pub struct PointerWiring {
    _guards: Vec<ListenerGuard>,
}

pub fn wire_pointer_handlers(cursor: Rc<RefCell<CursorState>>) -> PointerWiring {
    let mut guards = Vec::new();
    let Some(document) = dom::window_document() else {
        return PointerWiring { _guards: guards };
    };
    guards.extend(wire_mousemove(&document, cursor.clone()));
    guards.extend(wire_mouseleave(&document, cursor));
    PointerWiring { _guards: guards }
}

fn wire_mousemove(
    document: &web::Document,
    cursor: Rc<RefCell<CursorState>>,
) -> Option<ListenerGuard> {
    ListenerGuard::passive(document, "mousemove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let Some(window) = web::window() else {
            return;
        };
        let (width, height) = dom::viewport_size(&window);
        cursor.borrow_mut().on_move(
            ev.client_x() as f32,
            ev.client_y() as f32,
            width,
            height,
            Instant::now(),
        );
    })
}

fn wire_mouseleave(
    document: &web::Document,
    cursor: Rc<RefCell<CursorState>>,
) -> Option<ListenerGuard> {
    ListenerGuard::passive(document, "mouseleave", move |_| {
        cursor.borrow_mut().on_leave();
    })
}
