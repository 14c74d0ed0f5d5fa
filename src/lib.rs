#![cfg(target_arch = "wasm32")]
use crate::core::{CursorState, FieldConfig, HeroScene, ParticleField};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod counters;
mod dom;
mod events;
mod frame;
mod notification;
mod render;
mod site;

use constants::{CANVAS_MAX_ATTEMPTS, CANVAS_RETRY_MS, HERO_CANVAS_ID};

/// Everything the running hero holds on to; dropped on page unload.
struct Hero {
    frame_ctx: Rc<RefCell<frame::FrameContext>>,
    frame_loop: frame::LoopHandle,
    _pointer: events::PointerWiring,
    _resize: Option<dom::ListenerGuard>,
}

impl Hero {
    fn teardown(self) {
        self.frame_loop.cancel();
        self.frame_ctx.borrow_mut().dispose();
        log::info!("[hero] torn down");
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    dom::dom_ready().await;

    site::init();
    counters::init();

    let hero = start_hero().await?;
    let hero = Rc::new(RefCell::new(Some(hero)));
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    if let Some(guard) = dom::ListenerGuard::new(&window, "beforeunload", move |_| {
        if let Some(h) = hero.borrow_mut().take() {
            h.teardown();
        }
    }) {
        guard.forget();
    }
    Ok(())
}

/// The canvas may be inserted after the scripts run, so poll for it briefly.
async fn find_canvas() -> anyhow::Result<web::HtmlCanvasElement> {
    for attempt in 0..CANVAS_MAX_ATTEMPTS {
        let found = dom::window_document()
            .and_then(|d| d.get_element_by_id(HERO_CANVAS_ID))
            .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok());
        if let Some(canvas) = found {
            if attempt > 0 {
                log::info!("[hero] canvas found after {} retries", attempt);
            }
            return Ok(canvas);
        }
        dom::sleep(CANVAS_RETRY_MS).await;
    }
    Err(anyhow::anyhow!(
        "missing #{HERO_CANVAS_ID} after {CANVAS_MAX_ATTEMPTS} attempts"
    ))
}

async fn start_hero() -> anyhow::Result<Hero> {
    let canvas = find_canvas().await?;
    let resize = frame::wire_canvas_resize(&canvas);

    let config = FieldConfig::default();
    let surface = render::GpuSurface::new(&canvas, config.count).await?;
    let field = ParticleField::new(config, &mut rand::thread_rng());
    let scene = HeroScene::new(surface, field);

    let cursor = Rc::new(RefCell::new(CursorState::default()));
    let pointer = events::wire_pointer_handlers(cursor.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        cursor,
        canvas,
        last_instant: Instant::now(),
    }));
    let frame_loop = frame::start_loop(frame_ctx.clone());

    Ok(Hero {
        frame_ctx,
        frame_loop,
        _pointer: pointer,
        _resize: resize,
    })
}
