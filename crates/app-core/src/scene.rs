//! Hero scene context: the particle field, its links and the surface that draws them.
//!
//! The scene is created once, ticked by the host's frame callback and torn
//! down explicitly; nothing here lives in globals.

use crate::cursor::CursorState;
use crate::links::LinkBuilder;
use crate::particles::ParticleField;
use glam::Vec3;

/// Drawing target for the hero scene. Rasterization lives entirely behind it.
pub trait RenderSurface {
    type Handle: Copy;

    fn create_point_cloud(&mut self, positions: &[Vec3], colors: &[Vec3]) -> Self::Handle;
    fn create_line_set(&mut self, positions: &[Vec3], colors: &[Vec3]) -> Self::Handle;
    /// Replace the geometry behind `handle`; the vertex count may change.
    fn update_geometry(&mut self, handle: Self::Handle, positions: &[Vec3], colors: &[Vec3]);
    fn render_frame(&mut self) -> anyhow::Result<()>;
    fn on_resize(&mut self, width: u32, height: u32);
    fn dispose(&mut self);
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("scene already disposed")]
    Disposed,
    #[error("render failed: {0:#}")]
    Render(anyhow::Error),
}

pub struct HeroScene<S: RenderSurface> {
    surface: S,
    field: ParticleField,
    links: LinkBuilder,
    points_handle: S::Handle,
    lines_handle: S::Handle,
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    disposed: bool,
}

impl<S: RenderSurface> HeroScene<S> {
    pub fn new(surface: S, field: ParticleField) -> Self {
        Self::with_links(surface, field, LinkBuilder::default())
    }

    pub fn with_links(mut surface: S, field: ParticleField, mut links: LinkBuilder) -> Self {
        let mut positions = Vec::with_capacity(field.len());
        let mut colors = Vec::with_capacity(field.len());
        field.write_buffers(&mut positions, &mut colors);
        let points_handle = surface.create_point_cloud(&positions, &colors);
        links.rebuild(&positions, &colors);
        let lines_handle =
            surface.create_line_set(links.segment_positions(), links.segment_colors());
        log::info!(
            "[hero] scene ready: {} points, {} links",
            field.len(),
            links.links().len()
        );
        Self {
            surface,
            field,
            links,
            points_handle,
            lines_handle,
            positions,
            colors,
            disposed: false,
        }
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// One frame: step the field, relink, upload and draw.
    pub fn frame(&mut self, dt_sec: f32, cursor: &mut CursorState) -> Result<(), SceneError> {
        if self.disposed {
            return Err(SceneError::Disposed);
        }
        self.field.step(dt_sec, cursor);
        self.field.write_buffers(&mut self.positions, &mut self.colors);
        self.surface
            .update_geometry(self.points_handle, &self.positions, &self.colors);

        self.links.rebuild(&self.positions, &self.colors);
        self.surface.update_geometry(
            self.lines_handle,
            self.links.segment_positions(),
            self.links.segment_colors(),
        );

        self.surface.render_frame().map_err(SceneError::Render)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.disposed {
            self.surface.on_resize(width, height);
        }
    }

    /// Release the surface's resources. Safe to call more than once.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.surface.dispose();
            log::info!("[hero] scene disposed");
        }
    }
}

impl<S: RenderSurface> Drop for HeroScene<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
