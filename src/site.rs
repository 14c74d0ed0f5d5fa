//! Page behaviors: navbar, mobile menu, anchor scrolling, fade-ins, the
//! contact form, card hover, hero parallax and the loader.
//!
//! Every wiring function returns early when its elements are missing.

use crate::constants::*;
use crate::core::site::{
    anchor_target, in_viewport, navbar_classes, parallax, scroll_target, ContactForm,
    NotificationKind, FORM_SENDING_LABEL, FORM_SUCCESS_MESSAGE,
};
use crate::dom::{self, ListenerGuard};
use crate::notification;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

fn keep(guard: Option<ListenerGuard>) {
    if let Some(g) = guard {
        g.forget();
    }
}

fn scroll_y(window: &web::Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

fn html_element(el: web::Element) -> Option<web::HtmlElement> {
    el.dyn_into::<web::HtmlElement>().ok()
}

pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }
    let (Some(window), Some(document)) = (web::window(), dom::window_document()) else {
        return;
    };
    init_navbar(&window, &document);
    init_mobile_menu(&document);
    init_smooth_scrolling(&window, &document);
    init_fade_in(&window, &document);
    init_contact_form(&document);
    enhance_service_cards(&document);
    init_parallax(&window, &document);
    remove_loader(&document);
}

fn init_navbar(window: &web::Window, document: &web::Document) {
    let Some(navbar) = document.get_element_by_id(NAVBAR_ID) else {
        return;
    };
    let win = window.clone();
    keep(ListenerGuard::passive(window, "scroll", move |_| {
        let classes = navbar_classes(scroll_y(&win));
        let cl = navbar.class_list();
        for c in classes.add {
            _ = cl.add_1(c);
        }
        for c in classes.remove {
            _ = cl.remove_1(c);
        }
    }));
}

fn init_mobile_menu(document: &web::Document) {
    let (Some(button), Some(menu)) = (
        document.get_element_by_id(MOBILE_MENU_BUTTON_ID),
        document.get_element_by_id(MOBILE_MENU_ID),
    ) else {
        return;
    };

    let toggled = menu.clone();
    let icon = button.query_selector("svg").ok().flatten();
    keep(ListenerGuard::new(&button, "click", move |_| {
        _ = toggled.class_list().toggle(HIDDEN_CLASS);
        if let Some(icon) = &icon {
            _ = icon.class_list().toggle(ICON_ROTATED_CLASS);
        }
    }));

    if let Ok(links) = menu.query_selector_all("a") {
        for link in (0..links.length()).filter_map(|i| links.item(i)) {
            let menu = menu.clone();
            keep(ListenerGuard::new(&link, "click", move |_| {
                _ = menu.class_list().add_1(HIDDEN_CLASS);
            }));
        }
    }

    // click anywhere else closes the menu
    keep(ListenerGuard::new(document, "click", move |ev| {
        let target = ev.target().and_then(|t| t.dyn_into::<web::Node>().ok());
        let target = target.as_ref();
        if !menu.contains(target) && !button.contains(target) {
            _ = menu.class_list().add_1(HIDDEN_CLASS);
        }
    }));
}

fn init_smooth_scrolling(window: &web::Window, document: &web::Document) {
    for link in dom::query_all(document, NAV_LINK_SELECTOR) {
        let win = window.clone();
        let doc = document.clone();
        let anchor = link.clone();
        keep(ListenerGuard::new(&link, "click", move |ev| {
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            let Some(id) = anchor_target(&href) else {
                return;
            };
            ev.prevent_default();
            let Some(target) = doc.get_element_by_id(id) else {
                return;
            };
            let navbar_height = doc
                .get_element_by_id(NAVBAR_ID)
                .and_then(html_element)
                .map(|n| n.offset_height() as f64)
                .unwrap_or(0.0);
            let top = scroll_target(
                target.get_bounding_client_rect().top(),
                scroll_y(&win),
                navbar_height,
            );
            let opts = web::ScrollToOptions::new();
            opts.set_top(top);
            opts.set_behavior(web::ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&opts);
        }));
    }
}

fn init_fade_in(window: &web::Window, document: &web::Document) {
    let elements = dom::query_all(document, FADE_IN_SELECTOR);
    if elements.is_empty() {
        return;
    }

    let callback = Closure::wrap(Box::new(
        |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    _ = target.class_list().add_1(VISIBLE_CLASS);
                    observer.unobserve(&target);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);
    let opts = web::IntersectionObserverInit::new();
    opts.set_threshold(&JsValue::from_f64(FADE_IN_THRESHOLD));
    opts.set_root_margin(FADE_IN_MARGIN);
    match web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &opts) {
        Ok(observer) => {
            for el in &elements {
                observer.observe(el);
            }
            callback.forget();
        }
        Err(e) => log::warn!("[site] IntersectionObserver unavailable: {e:?}"),
    }

    let vh = dom::viewport_height(window);
    for el in elements {
        let rect = el.get_bounding_client_rect();
        if in_viewport(rect.top(), rect.bottom(), vh) {
            dom::set_timeout(FADE_IN_INITIAL_DELAY_MS, move || {
                _ = el.class_list().add_1(VISIBLE_CLASS);
            });
        }
    }
}

fn form_field(data: &web::FormData, name: &str) -> String {
    data.get(name).as_string().unwrap_or_default()
}

fn init_contact_form(document: &web::Document) {
    let Some(form) = document
        .get_element_by_id(CONTACT_FORM_ID)
        .and_then(|el| el.dyn_into::<web::HtmlFormElement>().ok())
    else {
        return;
    };
    let doc = document.clone();
    let submitted = form.clone();
    keep(ListenerGuard::new(&form, "submit", move |ev| {
        let Ok(data) = web::FormData::new_with_form(&submitted) else {
            return;
        };
        let fields = ContactForm {
            name: form_field(&data, "name"),
            email: form_field(&data, "email"),
            phone: form_field(&data, "phone"),
            service: form_field(&data, "service"),
            message: form_field(&data, "message"),
        };
        if let Err(e) = fields.validate() {
            ev.prevent_default();
            notification::show(&doc, &e.to_string(), NotificationKind::Error);
            return;
        }

        // the browser carries on with the normal form post
        if let Some(button) = submitted
            .query_selector(SUBMIT_BUTTON_SELECTOR)
            .ok()
            .flatten()
            .and_then(|b| b.dyn_into::<web::HtmlButtonElement>().ok())
        {
            button.set_text_content(Some(FORM_SENDING_LABEL));
            button.set_disabled(true);
        }
        let doc = doc.clone();
        dom::set_timeout(FORM_SUCCESS_DELAY_MS, move || {
            notification::show(&doc, FORM_SUCCESS_MESSAGE, NotificationKind::Success);
        });
    }));
}

fn enhance_service_cards(document: &web::Document) {
    for card in dom::query_all(document, SERVICE_CARD_SELECTOR)
        .into_iter()
        .filter_map(html_element)
    {
        for (event, transform) in [
            ("mouseenter", CARD_HOVER_TRANSFORM),
            ("mouseleave", CARD_REST_TRANSFORM),
        ] {
            let style = card.style();
            keep(ListenerGuard::passive(&card, event, move |_| {
                _ = style.set_property("transform", transform);
            }));
        }
    }
}

fn init_parallax(window: &web::Window, document: &web::Document) {
    let Some(hero) = document.get_element_by_id(HERO_SECTION_ID) else {
        return;
    };
    let Some(hero) = html_element(hero) else {
        return;
    };
    let win = window.clone();
    keep(ListenerGuard::passive(window, "scroll", move |_| {
        let Some(content) = hero
            .query_selector(HERO_CONTENT_SELECTOR)
            .ok()
            .flatten()
            .and_then(html_element)
        else {
            return;
        };
        if let Some(p) = parallax(scroll_y(&win), hero.offset_height() as f64) {
            let style = content.style();
            _ = style.set_property("transform", &format!("translateY({}px)", p.translate_y_px));
            _ = style.set_property("opacity", &p.opacity.to_string());
        }
    }));
}

fn remove_loader(document: &web::Document) {
    let Some(loader) = document
        .query_selector(LOADER_SELECTOR)
        .ok()
        .flatten()
        .and_then(html_element)
    else {
        return;
    };
    _ = loader.style().set_property("opacity", "0");
    dom::set_timeout(LOADER_EXIT_MS, move || loader.remove());
}
