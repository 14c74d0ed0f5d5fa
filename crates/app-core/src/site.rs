//! Page behavior rules that don't need a DOM: navbar style, contact form
//! validation, toast styling, parallax and anchor parsing.

pub const NAVBAR_SOLID_AFTER_PX: f64 = 100.0;
pub const NAVBAR_SOLID_CLASSES: &[&str] = &["bg-white", "dark:bg-slate-900", "shadow-lg"];
pub const NAVBAR_TRANSLUCENT_CLASSES: &[&str] = &["bg-white/80", "dark:bg-slate-900/80"];

pub const PARALLAX_SPEED: f64 = 0.5;
pub const PARALLAX_FADE: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavbarClasses {
    pub add: &'static [&'static str],
    pub remove: &'static [&'static str],
}

/// Which classes to add and remove on the navbar at a given scroll offset.
pub fn navbar_classes(scroll_y: f64) -> NavbarClasses {
    if scroll_y > NAVBAR_SOLID_AFTER_PX {
        NavbarClasses {
            add: NAVBAR_SOLID_CLASSES,
            remove: NAVBAR_TRANSLUCENT_CLASSES,
        }
    } else {
        NavbarClasses {
            add: NAVBAR_TRANSLUCENT_CLASSES,
            remove: NAVBAR_SOLID_CLASSES,
        }
    }
}

/// Same shape as `^[^\s@]+@[^\s@]+\.[^\s@]+$`: one `@`, no whitespace, and a
/// dot in the domain with something on both sides of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // the regex backtracks to any dot, so one interior dot is enough
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

impl ContactForm {
    /// `service` is optional; everything else is required.
    pub fn validate(&self) -> Result<(), FormError> {
        let required = [&self.name, &self.email, &self.phone, &self.message];
        if required.iter().any(|f| f.is_empty()) {
            return Err(FormError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }
}

pub const FORM_SUCCESS_MESSAGE: &str = "Thank you! We'll reply within 24 hours.";
pub const FORM_SENDING_LABEL: &str = "Sending...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn class_name(self) -> String {
        let color = match self {
            NotificationKind::Success => "bg-green-600 text-white",
            NotificationKind::Error => "bg-red-600 text-white",
        };
        format!(
            "notification fixed top-24 right-4 z-50 px-6 py-4 rounded-lg shadow-xl transform transition-all duration-300 {color}"
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
    pub translate_y_px: f64,
    pub opacity: f64,
}

/// Hero content offset while the hero is still on screen; `None` once scrolled past it.
pub fn parallax(scroll_y: f64, hero_height: f64) -> Option<Parallax> {
    if hero_height <= 0.0 || scroll_y >= hero_height {
        return None;
    }
    Some(Parallax {
        translate_y_px: scroll_y * PARALLAX_SPEED,
        opacity: 1.0 - (scroll_y / hero_height) * PARALLAX_FADE,
    })
}

/// `#section` → `Some("section")`; other links are left to the browser.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset to scroll to so the section sits just under the navbar.
#[inline]
pub fn scroll_target(rect_top: f64, page_y_offset: f64, navbar_height: f64) -> f64 {
    rect_top + page_y_offset - navbar_height
}

/// Initial check for fade-in elements already on screen.
#[inline]
pub fn in_viewport(rect_top: f64, rect_bottom: f64, viewport_height: f64) -> bool {
    rect_top < viewport_height && rect_bottom > 0.0
}
