// Page hooks and tuning used by the web front-end.

// Element ids and selectors the page provides
pub const HERO_CANVAS_ID: &str = "hero-canvas";
pub const HERO_SECTION_ID: &str = "hero";
pub const HERO_CONTENT_SELECTOR: &str = ".relative.z-10";
pub const NAVBAR_ID: &str = "navbar";
pub const MOBILE_MENU_BUTTON_ID: &str = "mobile-menu-btn";
pub const MOBILE_MENU_ID: &str = "mobile-menu";
pub const NAV_LINK_SELECTOR: &str = ".nav-link, #mobile-menu a";
pub const FADE_IN_SELECTOR: &str = ".fade-in";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const COUNTER_SELECTOR: &str = ".counter[data-target]";
pub const SERVICE_CARD_SELECTOR: &str = "#services .bg-white, #services .dark\\:bg-slate-800";
pub const LOADER_SELECTOR: &str = ".loader";
pub const NOTIFICATION_SELECTOR: &str = ".notification";
pub const SUBMIT_BUTTON_SELECTOR: &str = "button[type=\"submit\"]";

// Classes toggled by the scripts
pub const COUNTED_CLASS: &str = "counted";
pub const VISIBLE_CLASS: &str = "visible";
pub const HIDDEN_CLASS: &str = "hidden";
pub const ICON_ROTATED_CLASS: &str = "rotate-90";

// Hero render look
pub const POINT_SIZE: f32 = 0.1; // world units
pub const POINT_OPACITY: f32 = 0.7;
pub const LINE_OPACITY: f32 = 0.2;

// Hero startup: wait for the canvas, then give up
pub const CANVAS_RETRY_MS: i32 = 100;
pub const CANVAS_MAX_ATTEMPTS: u32 = 50;

// Counters
pub const COUNTER_FALLBACK_MS: i32 = 200; // trigger everything shortly after setup
pub const COUNTER_MAX_SCANS: u32 = 15; // rescans while the page has no counters yet
pub const COUNTER_LAST_RESORT_MS: i32 = 3000;
pub const COUNTER_OBSERVER_MARGIN: &str = "500px";

// Fade-in
pub const FADE_IN_THRESHOLD: f64 = 0.1;
pub const FADE_IN_MARGIN: &str = "0px 0px -50px 0px";
pub const FADE_IN_INITIAL_DELAY_MS: i32 = 100;

// Notifications
pub const NOTIFICATION_ENTER_DELAY_MS: i32 = 10;
pub const NOTIFICATION_VISIBLE_MS: i32 = 4000;
pub const NOTIFICATION_EXIT_MS: i32 = 300;
pub const FORM_SUCCESS_DELAY_MS: i32 = 100;

// Service card hover
pub const CARD_HOVER_TRANSFORM: &str = "translateY(-8px) scale(1.02)";
pub const CARD_REST_TRANSFORM: &str = "translateY(0) scale(1)";

// Loader fade-out
pub const LOADER_EXIT_MS: i32 = 300;
