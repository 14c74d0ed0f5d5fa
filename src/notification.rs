use crate::constants::{
    NOTIFICATION_ENTER_DELAY_MS, NOTIFICATION_EXIT_MS, NOTIFICATION_SELECTOR,
    NOTIFICATION_VISIBLE_MS,
};
use crate::core::site::NotificationKind;
use crate::dom;
use web_sys as web;

const SHOWN: [&str; 2] = ["translate-x-0", "opacity-100"];
const OFFSCREEN: [&str; 2] = ["translate-x-full", "opacity-0"];

fn slide_in(el: &web::Element) {
    let cl = el.class_list();
    _ = cl.remove_2(OFFSCREEN[0], OFFSCREEN[1]);
    _ = cl.add_2(SHOWN[0], SHOWN[1]);
}

fn slide_out(el: &web::Element) {
    let cl = el.class_list();
    _ = cl.remove_2(SHOWN[0], SHOWN[1]);
    _ = cl.add_2(OFFSCREEN[0], OFFSCREEN[1]);
}

/// Replace any visible toast with `message`, slide it in, then remove it
/// after a few seconds.
pub fn show(document: &web::Document, message: &str, kind: NotificationKind) {
    if let Ok(Some(existing)) = document.query_selector(NOTIFICATION_SELECTOR) {
        existing.remove();
    }
    let Ok(el) = document.create_element("div") else {
        return;
    };
    el.set_class_name(&kind.class_name());
    for class in OFFSCREEN {
        _ = el.class_list().add_1(class);
    }
    el.set_text_content(Some(message));
    let Some(body) = document.body() else {
        return;
    };
    if body.append_child(&el).is_err() {
        return;
    }

    let entering = el.clone();
    dom::set_timeout(NOTIFICATION_ENTER_DELAY_MS, move || slide_in(&entering));

    dom::set_timeout(NOTIFICATION_VISIBLE_MS, move || {
        slide_out(&el);
        dom::set_timeout(NOTIFICATION_EXIT_MS, move || el.remove());
    });
}
