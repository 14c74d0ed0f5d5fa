pub use app_core::*;

// Shaders bundled as string constants
pub static HERO_WGSL: &str = include_str!("../../shaders/hero.wgsl");
