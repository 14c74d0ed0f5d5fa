//! Pointer state fed into the particle field.
//!
//! Event handlers only write scalars here; the frame loop reads it once per
//! tick through [`CursorState::expire`] and the field's `step`.

use crate::constants::{CURSOR_IDLE_TIMEOUT_MS, CURSOR_WORLD_SCALE};
use glam::Vec2;
use instant::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct CursorState {
    /// Latest sampled position in world units (x right, y up).
    pub normalized_position: Vec2,
    /// Eased position the field actually reacts to.
    pub smoothed_position: Vec2,
    pub is_active: bool,
    last_move_at: Option<Instant>,
    idle_timeout: Duration,
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new(Duration::from_millis(CURSOR_IDLE_TIMEOUT_MS))
    }
}

impl CursorState {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            normalized_position: Vec2::ZERO,
            smoothed_position: Vec2::ZERO,
            is_active: false,
            last_move_at: None,
            idle_timeout,
        }
    }

    /// Record a pointer move at client pixel `(x, y)` in a `width × height` viewport.
    pub fn on_move(&mut self, client_x: f32, client_y: f32, width: f32, height: f32, now: Instant) {
        self.normalized_position = client_to_world(client_x, client_y, width, height);
        self.is_active = true;
        self.last_move_at = Some(now);
    }

    /// Pointer left the viewport: stop repulsion and pull the target back to the origin.
    pub fn on_leave(&mut self) {
        self.is_active = false;
        self.normalized_position = Vec2::ZERO;
        self.last_move_at = None;
    }

    /// Clear `is_active` once the pointer has been still for the idle timeout.
    pub fn expire(&mut self, now: Instant) {
        if let Some(at) = self.last_move_at {
            if now >= at && now.duration_since(at) >= self.idle_timeout {
                self.is_active = false;
                self.last_move_at = None;
            }
        }
    }

    /// Ease the smoothed position toward the latest sample.
    pub fn smooth(&mut self, alpha: f32) {
        self.smoothed_position += (self.normalized_position - self.smoothed_position) * alpha;
    }
}

/// Map client pixels to the field's world plane: center is the origin,
/// edges are at ±`CURSOR_WORLD_SCALE`, y points up.
#[inline]
pub fn client_to_world(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    let half_x = (width * 0.5).max(1.0);
    let half_y = (height * 0.5).max(1.0);
    Vec2::new(
        (client_x - half_x) / half_x * CURSOR_WORLD_SCALE,
        -(client_y - half_y) / half_y * CURSOR_WORLD_SCALE,
    )
}
