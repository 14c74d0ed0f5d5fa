//! Count-up stats: trigger each `.counter[data-target]` once when it gets
//! near the viewport, then animate its text from 0 to the target.

use crate::constants::{
    COUNTED_CLASS, COUNTER_FALLBACK_MS, COUNTER_LAST_RESORT_MS, COUNTER_MAX_SCANS,
    COUNTER_OBSERVER_MARGIN, COUNTER_SELECTOR,
};
use crate::core::counter::{
    near_viewport, CounterAnimation, CounterState, ViewportMargin, INITIAL_MARGIN, SCROLL_MARGIN,
};
use crate::dom::{self, ListenerGuard};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

struct Counter {
    el: web::Element,
    state: Cell<CounterState>,
}

impl Counter {
    fn new(el: web::Element) -> Self {
        let state = CounterState::from_attr(el.get_attribute("data-target").as_deref());
        Self {
            el,
            state: Cell::new(state),
        }
    }

    fn trigger(&self) {
        // the class is also the marker for counters started elsewhere on the page
        if self.el.class_list().contains(COUNTED_CLASS) {
            return;
        }
        let mut state = self.state.get();
        let animation = state.trigger();
        self.state.set(state);
        if let Some(animation) = animation {
            _ = self.el.class_list().add_1(COUNTED_CLASS);
            animate(self.el.clone(), animation);
        }
    }

    fn trigger_if_near(&self, viewport_height: f64, margin: ViewportMargin) {
        let rect = self.el.get_bounding_client_rect();
        if near_viewport(rect.top(), rect.bottom(), viewport_height, margin) {
            self.trigger();
        }
    }
}

type Counters = Rc<Vec<Counter>>;

fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn animate(el: web::Element, animation: CounterAnimation) {
    let started_at = now_ms();
    schedule_frame(el, animation, started_at);
}

fn schedule_frame(el: web::Element, animation: CounterAnimation, started_at: f64) {
    let Some(window) = web::window() else {
        return;
    };
    let cb = Closure::once_into_js(move |timestamp: f64| {
        let frame = animation.sample(timestamp - started_at);
        el.set_text_content(Some(&frame.value.to_string()));
        if !frame.finished {
            schedule_frame(el, animation, started_at);
        }
    });
    _ = window.request_animation_frame(cb.unchecked_ref());
}

fn trigger_all(counters: &Counters) {
    for c in counters.iter() {
        c.trigger();
    }
}

fn check_all(counters: &Counters, margin: ViewportMargin) {
    let Some(window) = web::window() else {
        return;
    };
    let vh = dom::viewport_height(&window);
    for c in counters.iter() {
        c.trigger_if_near(vh, margin);
    }
}

fn observe(counters: &Counters) {
    let for_cb = counters.clone();
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
                if let Some(c) = for_cb.iter().find(|c| c.el == target) {
                    c.trigger();
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let opts = web::IntersectionObserverInit::new();
    opts.set_root_margin(COUNTER_OBSERVER_MARGIN);
    opts.set_threshold(&JsValue::from_f64(0.0));
    match web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &opts) {
        Ok(observer) => {
            for c in counters.iter() {
                observer.observe(&c.el);
            }
            callback.forget();
        }
        Err(e) => log::warn!("[counters] IntersectionObserver unavailable: {e:?}"),
    }
}

fn wire_scroll(counters: &Counters) {
    let Some(window) = web::window() else {
        return;
    };
    for event in ["scroll", "resize"] {
        let counters = counters.clone();
        if let Some(guard) = ListenerGuard::passive(&window, event, move |_| {
            check_all(&counters, SCROLL_MARGIN);
        }) {
            guard.forget();
        }
    }
}

/// Find the page's counters and wire every trigger path. Runs at most once;
/// if no counters are in the document yet it rescans a few times first.
pub fn init() {
    scan(0);

    dom::set_timeout(COUNTER_LAST_RESORT_MS, || {
        let Some(document) = dom::window_document() else {
            return;
        };
        let counters: Counters = Rc::new(
            dom::query_all(&document, COUNTER_SELECTOR)
                .into_iter()
                .map(Counter::new)
                .collect(),
        );
        trigger_all(&counters);
    });
}

fn scan(attempt: u32) {
    if INITIALIZED.load(Ordering::SeqCst) {
        return;
    }
    let Some(document) = dom::window_document() else {
        return;
    };
    let elements = dom::query_all(&document, COUNTER_SELECTOR);
    if elements.is_empty() {
        if attempt + 1 < COUNTER_MAX_SCANS {
            dom::set_timeout(COUNTER_FALLBACK_MS, move || scan(attempt + 1));
        }
        return;
    }
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    let counters: Counters = Rc::new(elements.into_iter().map(Counter::new).collect());
    log::info!("[counters] {} counters", counters.len());

    check_all(&counters, INITIAL_MARGIN);
    observe(&counters);
    wire_scroll(&counters);

    let fallback = counters.clone();
    dom::set_timeout(COUNTER_FALLBACK_MS, move || trigger_all(&fallback));
}
