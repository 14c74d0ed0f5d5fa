use crate::core::{CursorState, HeroScene, SceneError};
use crate::dom;
use crate::render::GpuSurface;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: HeroScene<GpuSurface>,
    pub cursor: Rc<RefCell<CursorState>>,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        self.scene.resize(self.canvas.width(), self.canvas.height());

        let mut cursor = self.cursor.borrow_mut();
        cursor.expire(now);
        match self.scene.frame(dt_sec, &mut cursor) {
            Ok(()) | Err(SceneError::Disposed) => {}
            Err(e) => log::warn!("[hero] {e}"),
        }
    }

    pub fn dispose(&mut self) {
        self.scene.dispose();
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owns a running requestAnimationFrame loop.
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
}

impl LoopHandle {
    /// Stop scheduling frames. Safe to call more than once.
    pub fn cancel(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // breaks the closure's self-reference
        self.tick.borrow_mut().take();
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(tick: &TickClosure, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        raf_id.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let running = Rc::new(Cell::new(true));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: TickClosure = Rc::new(RefCell::new(None));

    let tick_clone = tick.clone();
    let running_clone = running.clone();
    let raf_clone = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running_clone.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        if running_clone.get() {
            request_frame(&tick_clone, &raf_clone);
        }
    }) as Box<dyn FnMut()>));

    request_frame(&tick, &raf_id);
    LoopHandle {
        running,
        raf_id,
        tick,
    }
}

/// Keep the canvas backing store in step with its CSS box.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) -> Option<dom::ListenerGuard> {
    dom::sync_canvas_backing_size(canvas);
    let window = web::window()?;
    let canvas = canvas.clone();
    dom::ListenerGuard::passive(&window, "resize", move |_| {
        dom::sync_canvas_backing_size(&canvas);
    })
}
