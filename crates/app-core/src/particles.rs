//! Decorative particle field for the hero section.
//!
//! A fixed set of points sits on a sphere, drifts with a small per-point idle
//! oscillation and is pushed away from the cursor while it moves. Positions
//! never jump: every frame they ease toward a freshly computed target.

use crate::constants::*;
use crate::cursor::CursorState;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub count: usize,
    pub radius: f32,
    pub primary_color: Vec3,
    pub accent_color: Vec3,
    pub idle_amount: f32,
    pub repulsion_radius: f32,
    pub repulsion_strength: f32,
    pub cursor_depth: f32,
    pub position_damping: f32,
    pub cursor_smoothing: f32,
    pub time_step: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            radius: SPHERE_RADIUS,
            primary_color: Vec3::from_array(PRIMARY_BLUE),
            accent_color: Vec3::from_array(ACCENT_BLUE),
            idle_amount: IDLE_AMOUNT,
            repulsion_radius: REPULSION_RADIUS,
            repulsion_strength: REPULSION_STRENGTH,
            cursor_depth: CURSOR_DEPTH,
            position_damping: POSITION_DAMPING,
            cursor_smoothing: CURSOR_SMOOTHING,
            time_step: TIME_STEP,
        }
    }
}

impl FieldConfig {
    /// Distance from the cursor beyond which repulsion is zero.
    #[inline]
    pub fn capture_radius(&self) -> f32 {
        self.repulsion_radius * 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub original_position: Vec3,
    pub current_position: Vec3,
    pub base_color: Vec3,
    pub color: Vec3,
}

impl Point {
    pub fn new(position: Vec3, base_color: Vec3) -> Self {
        Self {
            original_position: position,
            current_position: position,
            base_color,
            color: base_color,
        }
    }
}

pub struct ParticleField {
    config: FieldConfig,
    points: Vec<Point>,
    time: f32,
}

impl ParticleField {
    /// Scatter `config.count` points uniformly over the sphere surface.
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, rng: &mut R) -> Self {
        let points = (0..config.count)
            .map(|_| {
                let theta = rng.gen::<f32>() * TAU;
                // acos of a uniform value avoids clustering at the poles
                let phi = (rng.gen::<f32>() * 2.0 - 1.0).acos();
                let position = Vec3::new(
                    config.radius * phi.sin() * theta.cos(),
                    config.radius * phi.sin() * theta.sin(),
                    config.radius * phi.cos(),
                );
                let color = if rng.gen::<f32>() < COLOR_CLASS_THRESHOLD {
                    config.primary_color
                } else {
                    config.accent_color
                };
                Point::new(position, color)
            })
            .collect();
        Self::from_points(config, points)
    }

    /// Build a field from explicit points; `config.count` is overwritten to match.
    pub fn from_points(mut config: FieldConfig, points: Vec<Point>) -> Self {
        config.count = points.len();
        Self {
            config,
            points,
            time: 0.0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Copy current positions and colors into reusable render buffers.
    pub fn write_buffers(&self, positions: &mut Vec<Vec3>, colors: &mut Vec<Vec3>) {
        positions.clear();
        colors.clear();
        positions.extend(self.points.iter().map(|p| p.current_position));
        colors.extend(self.points.iter().map(|p| p.color));
    }

    /// Advance one display frame of `dt_sec` seconds.
    ///
    /// Speeds are tuned at 60 fps; other refresh rates scale the time step and
    /// convert the per-frame smoothing factors so the motion looks the same.
    pub fn step(&mut self, dt_sec: f32, cursor: &mut CursorState) {
        let frames = dt_sec.clamp(0.0, MAX_FRAME_DT_SEC) * REFERENCE_FPS;
        self.time += self.config.time_step * frames;

        cursor.smooth(frame_alpha(self.config.cursor_smoothing, frames));
        let cursor_pos = cursor
            .smoothed_position
            .extend(self.config.cursor_depth);
        let active = cursor.is_active;
        let damping = frame_alpha(self.config.position_damping, frames);
        let capture = self.config.capture_radius();

        for (i, p) in self.points.iter_mut().enumerate() {
            let away = p.current_position - cursor_pos;
            let distance = away.length();

            let target = p.original_position
                + idle_offset(self.time, i, self.config.idle_amount)
                + repulsion_offset(away, active, capture, self.config.repulsion_strength);
            p.current_position += (target - p.current_position) * damping;

            let color_distance = if active {
                distance
            } else {
                INACTIVE_COLOR_DISTANCE
            };
            p.color = p.base_color * color_scale(color_distance);
        }
    }
}

/// Small organic drift; each index gets its own phase.
#[inline]
pub fn idle_offset(time: f32, index: usize, amount: f32) -> Vec3 {
    let i = index as f32;
    Vec3::new(
        (time + i * 0.1).sin() * amount,
        (time + i * 0.15).cos() * amount,
        (time * 0.8 + i * 0.2).sin() * amount * IDLE_Z_SCALE,
    )
}

/// Push along `away` (cursor → point). Linear falloff from `strength` at the
/// cursor to zero at `capture_radius`; zero when the cursor is inactive.
#[inline]
pub fn repulsion_offset(away: Vec3, active: bool, capture_radius: f32, strength: f32) -> Vec3 {
    if !active {
        return Vec3::ZERO;
    }
    let distance = away.length();
    if distance >= capture_radius {
        return Vec3::ZERO;
    }
    let force = (1.0 - distance / capture_radius) * strength;
    let dir = if distance > 0.0 {
        away / distance
    } else {
        Vec3::ZERO
    };
    dir * force
}

/// 0 right next to the cursor, 1 once far enough away.
#[inline]
pub fn color_intensity(distance: f32) -> f32 {
    ((distance - COLOR_NEAR) / COLOR_FALLOFF).clamp(0.0, 1.0)
}

#[inline]
pub fn color_scale(distance: f32) -> f32 {
    COLOR_FLOOR + color_intensity(distance) * (1.0 - COLOR_FLOOR)
}

/// Convert a per-frame blend factor tuned at the reference rate into the
/// factor for `frames` reference frames.
#[inline]
pub fn frame_alpha(alpha: f32, frames: f32) -> f32 {
    1.0 - (1.0 - alpha.clamp(0.0, 1.0)).powf(frames.max(0.0))
}
